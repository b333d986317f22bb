use tracing::debug;

use crate::display::FormDisplayDocument;
use crate::error::DslError;

/// Supported document version
pub const SUPPORTED_DSL_VERSION: &str = "1.0";

/// Parse a YAML string into a FormDisplayDocument.
///
/// This function handles the initial conversion from YAML text to structured
/// data. It does not validate names, references or settings; that is handled
/// separately by the validation module.
///
/// # Arguments
///
/// * `yaml_str` - A YAML string containing a form display document
///
/// # Returns
///
/// A `Result` containing either the parsed `FormDisplayDocument` or a `DslError`
pub fn parse_form_display(yaml_str: &str) -> Result<FormDisplayDocument, DslError> {
    let document: FormDisplayDocument = serde_yaml::from_str(yaml_str)?;

    if document.dsl_version != SUPPORTED_DSL_VERSION {
        return Err(DslError::UnsupportedVersion {
            found: document.dsl_version,
        });
    }

    debug!(
        entity_type = %document.form_display.entity_type,
        bundle = %document.form_display.bundle,
        groups = document.form_display.groups.len(),
        "Parsed form display"
    );
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_document() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
        "#;

        let doc = parse_form_display(yaml).unwrap();
        assert_eq!(doc.form_display.mode, "default");
        assert!(doc.form_display.fields.is_empty());
        assert!(doc.form_display.groups.is_empty());
    }

    #[test]
    fn test_invalid_yaml_syntax() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          groups: [
            - name: broken
        "#;

        match parse_form_display(yaml).unwrap_err() {
            DslError::Yaml(_) => {}
            err => panic!("Expected Yaml, got {:?}", err),
        }
    }

    #[test]
    fn test_missing_group_name() {
        let yaml = r#"
        dsl_version: "1.0"
        form_display:
          entity_type: node
          bundle: page
          groups:
            - format_type: steps
        "#;

        assert!(matches!(parse_form_display(yaml), Err(DslError::Yaml(_))));
    }

    #[test]
    fn test_unsupported_dsl_version() {
        let yaml = r#"
        dsl_version: "2.0"
        form_display:
          entity_type: node
          bundle: page
        "#;

        match parse_form_display(yaml).unwrap_err() {
            DslError::UnsupportedVersion { found } => assert_eq!(found, "2.0"),
            err => panic!("Expected UnsupportedVersion, got {:?}", err),
        }
    }
}
