//! Record and form object fakes.
//!
//! A host builds a fresh form object on every request. [`SaveLog`] is shared
//! between those form objects so a test can count persistence calls across
//! the whole session.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::sync::Arc;

use formsteps_core::{FormTree, Record, RecordForm, StepsError, Submission};

/// In-memory record for testing.
#[derive(Debug, Clone, PartialEq)]
pub struct TestRecord {
    /// Record type
    pub entity_type: String,
    /// Record bundle
    pub bundle: String,
    /// Persisted ID, `None` for new records
    pub id: Option<String>,
    /// Whether the record carries an owner attribute
    pub owned: bool,
    /// Owner ID
    pub owner: Option<u64>,
    /// Field values built from submissions
    pub values: Map<String, Value>,
}

impl TestRecord {
    /// Creates a new, unsaved record with an owner attribute.
    pub fn new(entity_type: &str, bundle: &str) -> Self {
        Self {
            entity_type: entity_type.to_string(),
            bundle: bundle.to_string(),
            id: None,
            owned: true,
            owner: None,
            values: Map::new(),
        }
    }

    /// Sets the persisted ID.
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Sets the owner.
    pub fn with_owner(mut self, owner: u64) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Removes the owner attribute.
    pub fn without_owner_field(mut self) -> Self {
        self.owned = false;
        self.owner = None;
        self
    }
}

impl Record for TestRecord {
    fn is_new(&self) -> bool {
        self.id.is_none()
    }

    fn id(&self) -> Option<String> {
        self.id.clone()
    }

    fn entity_type_id(&self) -> &str {
        &self.entity_type
    }

    fn bundle(&self) -> &str {
        &self.bundle
    }

    fn has_owner(&self) -> bool {
        self.owned
    }

    fn owner_id(&self) -> Option<u64> {
        self.owner
    }

    fn set_owner_id(&mut self, owner: Option<u64>) {
        if self.owned {
            self.owner = owner;
        }
    }
}

/// Records persisted by test form objects, in save order.
#[derive(Debug, Clone, Default)]
pub struct SaveLog {
    saved: Arc<Mutex<Vec<TestRecord>>>,
}

impl SaveLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of save calls.
    pub fn count(&self) -> usize {
        self.saved.lock().len()
    }

    /// Snapshot of the saved records.
    pub fn records(&self) -> Vec<TestRecord> {
        self.saved.lock().clone()
    }

    /// Most recently saved record.
    pub fn last(&self) -> Option<TestRecord> {
        self.saved.lock().last().cloned()
    }

    fn push(&self, record: TestRecord) {
        self.saved.lock().push(record);
    }
}

/// Form object over a [`TestRecord`].
///
/// Building a record merges the submitted values into a copy of the current
/// record. Saving appends the record to the shared [`SaveLog`].
#[derive(Debug, Clone)]
pub struct TestRecordForm {
    operation: String,
    record: TestRecord,
    log: SaveLog,
    clear_owner_on_build: bool,
    fail_save: Option<String>,
}

impl TestRecordForm {
    /// Creates a form object for the "default" operation.
    pub fn new(record: TestRecord, log: SaveLog) -> Self {
        Self {
            operation: "default".to_string(),
            record,
            log,
            clear_owner_on_build: false,
            fail_save: None,
        }
    }

    /// Sets the form operation.
    pub fn with_operation(mut self, operation: &str) -> Self {
        self.operation = operation.to_string();
        self
    }

    /// Clears the owner whenever a record is built, as a host does when the
    /// owner widget is hidden on the submitted step.
    pub fn clearing_owner_on_build(mut self) -> Self {
        self.clear_owner_on_build = true;
        self
    }

    /// Makes every save fail with a `RecordError`.
    pub fn failing_save(mut self, message: &str) -> Self {
        self.fail_save = Some(message.to_string());
        self
    }

    /// Consumes the form object and returns the record under edit.
    pub fn into_record(self) -> TestRecord {
        self.record
    }
}

impl RecordForm for TestRecordForm {
    type Record = TestRecord;

    fn operation(&self) -> &str {
        &self.operation
    }

    fn record(&self) -> &TestRecord {
        &self.record
    }

    fn record_mut(&mut self) -> &mut TestRecord {
        &mut self.record
    }

    fn set_record(&mut self, record: TestRecord) {
        self.record = record;
    }

    fn build_record(&self, _form: &FormTree, submission: &Submission) -> Result<TestRecord, StepsError> {
        let mut record = self.record.clone();
        for (name, value) in &submission.values {
            record.values.insert(name.clone(), value.clone());
        }
        if self.clear_owner_on_build {
            record.owner = None;
        }
        Ok(record)
    }

    fn save(&mut self, _form: &FormTree, _submission: &Submission) -> Result<(), StepsError> {
        if let Some(message) = &self.fail_save {
            return Err(StepsError::RecordError(message.clone()));
        }
        if self.record.id.is_none() {
            self.record.id = Some((self.log.count() + 1).to_string());
        }
        self.log.push(self.record.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_build_merges_submitted_values() {
        let form = TestRecordForm::new(TestRecord::new("node", "article").with_owner(4), SaveLog::new())
            .clearing_owner_on_build();
        let submission = Submission::submit().with_value("title", json!("Hello"));

        let built = form.build_record(&FormTree::new(), &submission).unwrap();
        assert_eq!(built.values.get("title"), Some(&json!("Hello")));
        assert_eq!(built.owner, None);
        assert_eq!(form.record().owner, Some(4));
    }

    #[test]
    fn test_save_assigns_id_and_logs() {
        let log = SaveLog::new();
        let mut form = TestRecordForm::new(TestRecord::new("node", "article"), log.clone());

        form.save(&FormTree::new(), &Submission::submit()).unwrap();
        assert_eq!(log.count(), 1);
        assert_eq!(log.last().and_then(|r| r.id), Some("1".to_string()));
        assert!(!form.record().is_new());
    }

    #[test]
    fn test_owner_ignored_without_owner_field() {
        let mut record = TestRecord::new("taxonomy_term", "tags").without_owner_field();
        record.set_owner_id(Some(9));
        assert_eq!(record.owner_id(), None);
        assert!(!record.has_owner());
    }
}
