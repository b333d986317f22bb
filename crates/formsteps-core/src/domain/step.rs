use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Value object: Step key
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepKey(pub String);

impl StepKey {
    /// Create a step key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Borrow the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StepKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StepKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StepKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for StepKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

/// Per-step labels, button labels and URL templates.
///
/// Every setting is optional. An absent or empty value disables the feature
/// it controls for the step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    /// Form title when creating a new record
    pub add_label: Option<String>,

    /// Form title when editing an existing record
    pub edit_label: Option<String>,

    /// Cancel link label
    pub cancel_button: Option<String>,

    /// Cancel link URL template
    pub cancel_path: Option<String>,

    /// Previous step button label
    pub previous_button: Option<String>,

    /// Primary button label while a succeeding step exists
    pub next_button: Option<String>,

    /// Primary button label otherwise
    pub submit_button: Option<String>,

    /// Preview button label
    pub preview_button: Option<String>,

    /// Delete link label
    pub delete_button: Option<String>,

    /// Delete link URL template
    pub delete_path: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl StepSettings {
    /// Title for the form, depending on whether the record is new
    pub fn title(&self, is_new: bool) -> Option<&str> {
        if is_new {
            non_empty(&self.add_label)
        } else {
            non_empty(&self.edit_label)
        }
    }

    pub fn cancel_label(&self) -> Option<&str> {
        non_empty(&self.cancel_button)
    }

    pub fn cancel_path(&self) -> Option<&str> {
        non_empty(&self.cancel_path)
    }

    pub fn previous_label(&self) -> Option<&str> {
        non_empty(&self.previous_button)
    }

    pub fn next_label(&self) -> Option<&str> {
        non_empty(&self.next_button)
    }

    pub fn submit_label(&self) -> Option<&str> {
        non_empty(&self.submit_button)
    }

    pub fn preview_label(&self) -> Option<&str> {
        non_empty(&self.preview_button)
    }

    pub fn delete_label(&self) -> Option<&str> {
        non_empty(&self.delete_button)
    }

    pub fn delete_path(&self) -> Option<&str> {
        non_empty(&self.delete_path)
    }
}

/// One declared step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDefinition {
    /// Key of the step, also the key of its field group
    pub key: StepKey,

    /// Administrative label
    #[serde(default)]
    pub label: String,

    /// Ordering weight, only used while building the catalog
    #[serde(default)]
    pub weight: i32,

    /// Step settings
    #[serde(default)]
    pub settings: StepSettings,
}

impl StepDefinition {
    /// Create a step definition with empty settings
    pub fn new(key: impl Into<StepKey>, weight: i32) -> Self {
        let key = key.into();
        Self {
            label: key.0.clone(),
            key,
            weight,
            settings: StepSettings::default(),
        }
    }

    /// Replace the settings
    pub fn with_settings(mut self, settings: StepSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replace the label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Ordered step mapping. Insertion order is navigation order.
///
/// Serialized as a list so the order survives storage formats with sorted maps.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<StepDefinition>", into = "Vec<StepDefinition>")]
pub struct StepSequence {
    steps: IndexMap<StepKey, StepDefinition>,
}

impl StepSequence {
    /// Create an empty sequence
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Whether the sequence has no steps
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Key of the first step
    pub fn first_key(&self) -> Option<&StepKey> {
        self.steps.first().map(|(key, _)| key)
    }

    /// Key of the last step
    pub fn last_key(&self) -> Option<&StepKey> {
        self.steps.last().map(|(key, _)| key)
    }

    /// Key at a position
    pub fn key_at(&self, index: usize) -> Option<&StepKey> {
        self.steps.get_index(index).map(|(key, _)| key)
    }

    /// Position of a key
    pub fn position(&self, key: &str) -> Option<usize> {
        self.steps.get_index_of(key)
    }

    /// Whether a key is part of the sequence
    pub fn contains(&self, key: &str) -> bool {
        self.steps.contains_key(key)
    }

    /// Look up a step
    pub fn get(&self, key: &str) -> Option<&StepDefinition> {
        self.steps.get(key)
    }

    /// Settings of a step, for in-place edits. The key stays fixed; use
    /// [`StepSequence::remove`] and [`StepSequence::insert_at`] to rename.
    pub fn settings_mut(&mut self, key: &str) -> Option<&mut StepSettings> {
        self.steps.get_mut(key).map(|step| &mut step.settings)
    }

    /// Append a step, or replace the definition in place if the key exists
    pub fn insert(&mut self, step: StepDefinition) -> Option<StepDefinition> {
        self.steps.insert(step.key.clone(), step)
    }

    /// Insert a step at a position, moving it if the key already exists
    pub fn insert_at(&mut self, index: usize, step: StepDefinition) {
        let index = index.min(self.steps.len());
        let (current, _) = self.steps.insert_full(step.key.clone(), step);
        let target = index.min(self.steps.len() - 1);
        self.steps.move_index(current, target);
    }

    /// Remove a step, keeping the order of the others
    pub fn remove(&mut self, key: &str) -> Option<StepDefinition> {
        self.steps.shift_remove(key)
    }

    /// Keys in navigation order
    pub fn keys(&self) -> impl Iterator<Item = &StepKey> {
        self.steps.keys()
    }

    /// Steps in navigation order
    pub fn iter(&self) -> impl Iterator<Item = &StepDefinition> {
        self.steps.values()
    }

    /// Reorder the steps with a comparator. The sort is stable.
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut(&StepDefinition, &StepDefinition) -> std::cmp::Ordering,
    {
        self.steps.sort_by(|_, a, _, b| compare(a, b));
    }
}

impl From<Vec<StepDefinition>> for StepSequence {
    fn from(steps: Vec<StepDefinition>) -> Self {
        steps.into_iter().collect()
    }
}

impl From<StepSequence> for Vec<StepDefinition> {
    fn from(sequence: StepSequence) -> Self {
        sequence.steps.into_values().collect()
    }
}

impl FromIterator<StepDefinition> for StepSequence {
    fn from_iter<I: IntoIterator<Item = StepDefinition>>(iter: I) -> Self {
        let mut sequence = StepSequence::new();
        for step in iter {
            sequence.insert(step);
        }
        sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(keys: &[&str]) -> StepSequence {
        keys.iter()
            .enumerate()
            .map(|(i, key)| StepDefinition::new(*key, i as i32))
            .collect()
    }

    #[test]
    fn test_first_and_last_keys() {
        let seq = sequence(&["a", "b", "c"]);
        assert_eq!(seq.first_key(), Some(&StepKey::from("a")));
        assert_eq!(seq.last_key(), Some(&StepKey::from("c")));
        assert_eq!(seq.position("b"), Some(1));
        assert_eq!(seq.key_at(2), Some(&StepKey::from("c")));
        assert!(seq.key_at(3).is_none());

        let empty = StepSequence::new();
        assert!(empty.first_key().is_none());
        assert!(empty.last_key().is_none());
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut seq = sequence(&["a", "b", "c"]);
        seq.remove("b");
        let keys: Vec<_> = seq.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "c"]);
    }

    #[test]
    fn test_insert_at_moves_existing_key() {
        let mut seq = sequence(&["a", "b", "c"]);
        seq.insert_at(0, StepDefinition::new("c", 10));
        let keys: Vec<_> = seq.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["c", "a", "b"]);

        seq.insert_at(99, StepDefinition::new("confirm", 0));
        assert_eq!(seq.last_key(), Some(&StepKey::from("confirm")));
    }

    #[test]
    fn test_blank_settings_are_disabled() {
        let settings = StepSettings {
            add_label: Some("Create".to_string()),
            edit_label: Some("   ".to_string()),
            next_button: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(settings.title(true), Some("Create"));
        assert_eq!(settings.title(false), None);
        assert_eq!(settings.next_label(), None);
        assert_eq!(settings.submit_label(), None);
    }

    #[test]
    fn test_sequence_keeps_order_through_json() {
        let seq = sequence(&["z", "a", "m"]);
        let value = serde_json::to_value(&seq).unwrap();
        assert!(value.is_array());

        let back: StepSequence = serde_json::from_value(value).unwrap();
        let keys: Vec<_> = back.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_settings_edit_keeps_keys_in_sync() {
        let mut seq = sequence(&["a", "b"]);
        seq.settings_mut("b").unwrap().next_button = Some("Continue".to_string());
        assert!(seq.settings_mut("missing").is_none());

        let value = serde_json::to_value(&seq).unwrap();
        let back: StepSequence = serde_json::from_value(value).unwrap();
        assert_eq!(back, seq);
        assert_eq!(back.get("b").unwrap().settings.next_label(), Some("Continue"));
        assert!(back.iter().all(|step| back.position(step.key.as_str()).is_some()));
    }
}
