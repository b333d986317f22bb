//! Form tree model
//!
//! A flat map of named elements. Groups reference their children by name,
//! which lets a layout nest groups arbitrarily deep (and, when misconfigured,
//! in cycles). Traversals keep a visited set so a cycle cannot loop forever.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::domain::url::Url;

/// Handler that persists the record in the default entity form
pub const SAVE_HANDLER: &str = "::save";

/// Handler that builds the record in the default entity form
pub const SUBMIT_FORM_HANDLER: &str = "::submitForm";

/// Handler that sends the entity confirmation mail
pub const CONFIRMATION_HANDLER: &str = "entity_confirmation_form_op_submit";

/// Handler that runs the step transition
pub const STEPS_HANDLER: &str = "form_steps_submit";

/// Kind of a form element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ElementKind {
    /// Input field
    Field,
    /// Field group with named children
    Group {
        /// Names of the child fields and groups
        children: Vec<String>,
    },
    /// Rendered markup
    Markup(String),
}

/// A named form element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormElement {
    /// Kind of the element
    pub kind: ElementKind,

    /// Whether the element is rendered and processed
    pub access: bool,
}

impl FormElement {
    pub fn field() -> Self {
        Self {
            kind: ElementKind::Field,
            access: true,
        }
    }

    pub fn group<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            kind: ElementKind::Group {
                children: children.into_iter().map(Into::into).collect(),
            },
            access: true,
        }
    }

    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            kind: ElementKind::Markup(text.into()),
            access: true,
        }
    }

    /// Children of a group, empty for other kinds
    pub fn children(&self) -> &[String] {
        match &self.kind {
            ElementKind::Group { children } => children,
            _ => &[],
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ElementKind::Group { .. })
    }
}

/// A submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitButton {
    /// Control name sent as the triggering element
    pub name: String,

    /// Button label
    pub label: String,

    /// Submit handlers run in order
    pub handlers: Vec<String>,

    /// Elements whose validation errors are reported. `None` reports all.
    pub limit_validation_errors: Option<Vec<String>>,
}

impl SubmitButton {
    pub fn new(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            handlers: Vec::new(),
            limit_validation_errors: None,
        }
    }

    pub fn with_handlers<I, S>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.handlers = handlers.into_iter().map(Into::into).collect();
        self
    }
}

/// A link rendered as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkAction {
    /// Link text
    pub title: String,

    /// Link target
    pub url: Url,

    /// CSS classes
    #[serde(default)]
    pub classes: Vec<String>,

    /// Cache contexts the link varies by
    #[serde(default)]
    pub cache_contexts: Vec<String>,
}

impl LinkAction {
    pub fn new(title: impl Into<String>, url: Url) -> Self {
        Self {
            title: title.into(),
            url,
            classes: Vec::new(),
            cache_contexts: Vec::new(),
        }
    }
}

/// Form action area
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormActions {
    /// Primary submit button
    pub submit: Option<SubmitButton>,

    /// Previous step button
    pub previous: Option<SubmitButton>,

    /// Preview button
    pub preview: Option<SubmitButton>,

    /// Cancel link
    pub cancel: Option<LinkAction>,

    /// Delete link
    pub delete: Option<LinkAction>,
}

/// A form ready to be rendered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormTree {
    /// Page title override
    pub title: Option<String>,

    /// Form attributes
    pub attributes: BTreeMap<String, Value>,

    /// Elements by name, in render order
    pub elements: IndexMap<String, FormElement>,

    /// Action area
    pub actions: FormActions,
}

impl FormTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an element
    pub fn with_element(mut self, name: impl Into<String>, element: FormElement) -> Self {
        self.elements.insert(name.into(), element);
        self
    }

    /// Replace the action area
    pub fn with_actions(mut self, actions: FormActions) -> Self {
        self.actions = actions;
        self
    }

    /// Look up an element
    pub fn element(&self, name: &str) -> Option<&FormElement> {
        self.elements.get(name)
    }

    /// Add or replace an element
    pub fn insert(&mut self, name: impl Into<String>, element: FormElement) {
        self.elements.insert(name.into(), element);
    }

    /// Whether an element is rendered. Unknown elements are not.
    pub fn is_accessible(&self, name: &str) -> bool {
        self.elements.get(name).map(|e| e.access).unwrap_or(false)
    }

    /// Hide an element and, for groups, everything nested under it
    pub fn deny_access(&mut self, name: &str) {
        let mut visited = HashSet::new();
        let mut pending = vec![name.to_string()];

        while let Some(current) = pending.pop() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if let Some(element) = self.elements.get_mut(&current) {
                element.access = false;
                pending.extend(element.children().iter().rev().cloned());
            }
        }
    }

    /// Names of all fields nested under a group, in depth-first order
    pub fn nested_fields(&self, group: &str) -> Vec<String> {
        let mut fields = Vec::new();
        let mut visited = HashSet::new();
        self.collect_fields(group, &mut visited, &mut fields);
        fields
    }

    fn collect_fields(&self, group: &str, visited: &mut HashSet<String>, fields: &mut Vec<String>) {
        if !visited.insert(group.to_string()) {
            return;
        }
        let Some(element) = self.elements.get(group) else {
            return;
        };
        for child in element.children() {
            match self.elements.get(child).map(|e| &e.kind) {
                Some(ElementKind::Field) => {
                    if !fields.contains(child) {
                        fields.push(child.clone());
                    }
                }
                Some(ElementKind::Group { .. }) => self.collect_fields(child, visited, fields),
                _ => {}
            }
        }
    }

    /// Add elements to the primary button's validation restriction list,
    /// starting an empty list if none exists yet
    pub fn limit_validation_to<I>(&mut self, names: I)
    where
        I: IntoIterator<Item = String>,
    {
        if let Some(submit) = self.actions.submit.as_mut() {
            let limits = submit.limit_validation_errors.get_or_insert_with(Vec::new);
            for name in names {
                if !limits.contains(&name) {
                    limits.push(name);
                }
            }
        }
    }

    /// Current validation restriction list of the primary button
    pub fn validation_limits(&self) -> Option<&[String]> {
        self.actions
            .submit
            .as_ref()
            .and_then(|s| s.limit_validation_errors.as_deref())
    }
}
