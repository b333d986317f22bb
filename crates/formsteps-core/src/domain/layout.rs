//! Declarative layout configuration
//!
//! The host form display declares field groups keyed by group name. Only the
//! groups whose format type matches the configured step format become steps.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::step::{StepDefinition, StepKey, StepSettings};

/// One declared field group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// Format discriminator, e.g. "steps", "details", "fieldset"
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

impl LayoutEntry {
    /// Create an entry with no children and empty settings
    pub fn new(format_type: impl Into<String>, weight: i32) -> Self {
        Self {
            format_type: format_type.into(),
            label: String::new(),
            weight,
            children: Vec::new(),
            format_settings: StepSettings::default(),
        }
    }

    /// Set the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the children
    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Set the format settings
    pub fn with_settings(mut self, settings: StepSettings) -> Self {
        self.format_settings = settings;
        self
    }

    /// Turn the entry into a step definition under the given key
    pub fn to_step(&self, key: &str) -> StepDefinition {
        StepDefinition {
            key: StepKey::from(key),
            label: self.label.clone(),
            weight: self.weight,
            settings: self.format_settings.clone(),
        }
    }
}

/// Field group declarations in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayoutConfig {
    groups: IndexMap<String, LayoutEntry>,
}

impl LayoutConfig {
    /// Create an empty layout
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group declaration
    pub fn with_group(mut self, name: impl Into<String>, entry: LayoutEntry) -> Self {
        self.insert(name, entry);
        self
    }

    /// Add or replace a group declaration
    pub fn insert(&mut self, name: impl Into<String>, entry: LayoutEntry) {
        self.groups.insert(name.into(), entry);
    }

    /// Look up a group
    pub fn get(&self, name: &str) -> Option<&LayoutEntry> {
        self.groups.get(name)
    }

    /// Groups in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &LayoutEntry)> {
        self.groups.iter()
    }

    /// Groups with the given format type, in declaration order
    pub fn groups_of_type<'a>(
        &'a self,
        format_type: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a LayoutEntry)> + 'a {
        self.groups
            .iter()
            .filter(move |(_, entry)| entry.format_type == format_type)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
