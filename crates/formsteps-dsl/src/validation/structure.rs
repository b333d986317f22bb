use std::collections::{HashMap, HashSet};

use crate::display::FormDisplayDocument;
use crate::validation::{error_codes, ValidationError, Validator};

/// Validates the element structure of a form display:
/// - Field and group names are unique
/// - Group children refer to declared fields or groups
/// - Groups are not nested in cycles
pub struct StructureValidator;

impl StructureValidator {
    /// Create a new structure validator
    pub fn new() -> Self {
        StructureValidator
    }

    /// Report every name declared more than once, in first-seen order
    fn validate_unique_names(&self, document: &FormDisplayDocument) -> Vec<ValidationError> {
        let display = &document.form_display;
        let mut seen = HashSet::new();
        let mut duplicates: Vec<&str> = Vec::new();

        let names = display
            .fields
            .iter()
            .map(String::as_str)
            .chain(display.groups.iter().map(|g| g.name.as_str()));
        for name in names {
            if !seen.insert(name) && !duplicates.contains(&name) {
                duplicates.push(name);
            }
        }

        duplicates
            .into_iter()
            .map(|name| ValidationError {
                code: error_codes::DUPLICATE_ID,
                message: format!(
                    "Duplicate name: '{}' - field and group names must be unique within a form display",
                    name
                ),
                path: Some("form_display".to_string()),
                group: display
                    .groups
                    .iter()
                    .any(|g| g.name == name)
                    .then(|| name.to_string()),
            })
            .collect()
    }

    /// Validate group children
    fn validate_children(&self, document: &FormDisplayDocument) -> Vec<ValidationError> {
        let display = &document.form_display;
        let declared: HashSet<&str> = display
            .fields
            .iter()
            .map(String::as_str)
            .chain(display.groups.iter().map(|g| g.name.as_str()))
            .collect();

        let mut errors = Vec::new();
        for (idx, group) in display.groups.iter().enumerate() {
            for child in &group.children {
                if !declared.contains(child.as_str()) {
                    errors.push(ValidationError {
                        code: error_codes::INVALID_REFERENCE,
                        message: format!(
                            "Group '{}' contains '{}', which is neither a declared field nor a declared group",
                            group.name, child
                        ),
                        path: Some(format!("form_display.groups[{}].children", idx)),
                        group: Some(group.name.clone()),
                    });
                }
            }
        }
        errors
    }

    /// Detect groups nested in cycles
    fn detect_circular_groups(&self, document: &FormDisplayDocument) -> Vec<ValidationError> {
        let groups = &document.form_display.groups;
        let graph: HashMap<&str, Vec<&str>> = groups
            .iter()
            .map(|group| {
                let nested = group
                    .children
                    .iter()
                    .map(String::as_str)
                    .filter(|child| groups.iter().any(|g| g.name == *child))
                    .collect();
                (group.name.as_str(), nested)
            })
            .collect();

        let mut visited = HashSet::with_capacity(groups.len());
        let mut path_set = HashSet::with_capacity(groups.len());
        let mut cycles = Vec::new();

        // Declaration order keeps the reported cycles stable
        for group in groups {
            Self::find_cycles(
                group.name.as_str(),
                &graph,
                &mut visited,
                &mut path_set,
                &mut Vec::new(),
                &mut cycles,
            );
        }

        cycles
            .into_iter()
            .map(|cycle: Vec<String>| {
                let mut formatted = cycle.join(" → ");
                formatted.push_str(" → ");
                formatted.push_str(&cycle[0]);
                ValidationError {
                    code: error_codes::CIRCULAR_GROUP,
                    message: format!("Circular group nesting detected: {}", formatted),
                    path: Some("form_display.groups".to_string()),
                    group: Some(cycle[0].clone()),
                }
            })
            .collect()
    }

    /// Depth-first search recording every back edge as a cycle
    fn find_cycles<'a>(
        node: &'a str,
        graph: &HashMap<&'a str, Vec<&'a str>>,
        visited: &mut HashSet<&'a str>,
        path_set: &mut HashSet<&'a str>,
        current_path: &mut Vec<&'a str>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        if path_set.contains(node) {
            if let Some(cycle_start) = current_path.iter().position(|&n| n == node) {
                cycles.push(current_path[cycle_start..].iter().map(|s| s.to_string()).collect());
            }
            return;
        }
        if !visited.insert(node) {
            return;
        }

        path_set.insert(node);
        current_path.push(node);

        if let Some(children) = graph.get(node) {
            for &child in children {
                Self::find_cycles(child, graph, visited, path_set, current_path, cycles);
            }
        }

        current_path.pop();
        path_set.remove(node);
    }
}

impl Validator for StructureValidator {
    fn validate(&self, document: &FormDisplayDocument) -> Vec<ValidationError> {
        let mut errors = self.validate_unique_names(document);
        errors.extend(self.validate_children(document));
        errors.extend(self.detect_circular_groups(document));
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_form_display;
    use pretty_assertions::assert_eq;

    fn codes(yaml: &str) -> Vec<&'static str> {
        let document = parse_form_display(yaml).unwrap();
        StructureValidator::new()
            .validate(&document)
            .into_iter()
            .map(|e| e.code)
            .collect()
    }

    #[test]
    fn test_self_nested_group() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
          groups:
            - name: group_loop
              format_type: details
              children: [group_loop]
        "#;
        assert_eq!(codes(yaml), vec![error_codes::CIRCULAR_GROUP]);
    }

    #[test]
    fn test_cycle_reported_once() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
          groups:
            - name: group_a
              format_type: details
              children: [group_b]
            - name: group_b
              format_type: details
              children: [group_c]
            - name: group_c
              format_type: details
              children: [group_a]
        "#;
        let document = parse_form_display(yaml).unwrap();
        let errors = StructureValidator::new().validate(&document);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("group_a → group_b → group_c → group_a"));
    }

    #[test]
    fn test_shared_child_is_not_a_cycle() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
          fields: [title]
          groups:
            - name: group_a
              format_type: details
              children: [group_c, title]
            - name: group_b
              format_type: details
              children: [group_c]
            - name: group_c
              format_type: details
        "#;
        assert!(codes(yaml).is_empty());
    }

    #[test]
    fn test_duplicates_reported_once_per_name() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
          fields: [title, title, body]
          groups:
            - name: title
              format_type: details
            - name: body
              format_type: details
        "#;
        let document = parse_form_display(yaml).unwrap();
        let errors = StructureValidator::new().validate(&document);
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(errors.len(), 2);
        assert!(messages[0].contains("'title'"));
        assert!(messages[1].contains("'body'"));
    }
}
