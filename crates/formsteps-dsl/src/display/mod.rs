//! Form display document model

use serde::{Deserialize, Serialize};

use formsteps_core::{
    FormActions, FormElement, FormTree, LayoutConfig, LayoutEntry, StepSettings, SubmitButton,
    SAVE_HANDLER, SUBMIT_FORM_HANDLER, SUBMIT_TRIGGER,
};

/// Format type of the groups that become steps
pub const STEP_FORMAT_TYPE: &str = "steps";

/// The complete form display document.
/// This is the top-level structure of a YAML form display file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDisplayDocument {
    /// The DSL version (e.g., "1.0")
    pub dsl_version: String,

    /// The form display
    pub form_display: FormDisplayDefinition,
}

/// Form display of one record type and bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDisplayDefinition {
    /// Record type, e.g. "node"
    pub entity_type: String,

    /// Record bundle, e.g. "article"
    pub bundle: String,

    /// Form mode
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Field names in render order
    #[serde(default)]
    pub fields: Vec<String>,

    /// Field groups in declaration order
    #[serde(default)]
    pub groups: Vec<GroupDefinition>,
}

fn default_mode() -> String {
    "default".to_string()
}

/// A field group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupDefinition {
    /// Unique group name
    pub name: String,

    /// Format discriminator
    pub format_type: String,

    /// Administrative label
    #[serde(default)]
    pub label: String,

    /// Ordering weight
    #[serde(default)]
    pub weight: i32,

    /// Names of the fields and groups placed in this group
    #[serde(default)]
    pub children: Vec<String>,

    /// Format settings
    #[serde(default)]
    pub format_settings: StepSettings,
}

impl GroupDefinition {
    /// Whether the group is a step
    pub fn is_step(&self) -> bool {
        self.format_type == STEP_FORMAT_TYPE
    }

    fn to_layout_entry(&self) -> LayoutEntry {
        LayoutEntry::new(self.format_type.clone(), self.weight)
            .with_label(self.label.clone())
            .with_children(self.children.iter().cloned())
            .with_settings(self.format_settings.clone())
    }
}

impl FormDisplayDocument {
    /// Layout configuration with every group in declaration order
    pub fn layout_config(&self) -> LayoutConfig {
        self.form_display
            .groups
            .iter()
            .fold(LayoutConfig::new(), |layout, group| {
                layout.with_group(group.name.clone(), group.to_layout_entry())
            })
    }

    /// Form tree with a node per field and group and the save button
    pub fn form_tree(&self) -> FormTree {
        let display = &self.form_display;
        let mut form = FormTree::new().with_actions(FormActions {
            submit: Some(
                SubmitButton::new(SUBMIT_TRIGGER, "Save")
                    .with_handlers([SUBMIT_FORM_HANDLER, SAVE_HANDLER]),
            ),
            ..Default::default()
        });
        for field in &display.fields {
            form.insert(field.clone(), FormElement::field());
        }
        for group in &display.groups {
            form.insert(group.name.clone(), FormElement::group(group.children.iter().cloned()));
        }
        form
    }

    /// Groups that become steps
    pub fn step_groups(&self) -> impl Iterator<Item = &GroupDefinition> {
        self.form_display.groups.iter().filter(|g| g.is_step())
    }
}
