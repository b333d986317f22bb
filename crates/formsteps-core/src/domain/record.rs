//! Host-side collaborators: the record under edit, the form object that
//! builds and persists it, and the current actor.

use std::fmt::Debug;

use crate::domain::form::FormTree;
use crate::domain::state::Submission;
use crate::StepsError;

/// The entity being edited
pub trait Record: Debug + Send + Sync {
    /// Whether the record has never been persisted
    fn is_new(&self) -> bool;

    /// Persisted identity, if any
    fn id(&self) -> Option<String>;

    /// Record type, e.g. "node"
    fn entity_type_id(&self) -> &str;

    /// Record sub-type, e.g. "article"
    fn bundle(&self) -> &str;

    /// Whether the record carries an owner attribute
    fn has_owner(&self) -> bool {
        false
    }

    /// Owner of the record
    fn owner_id(&self) -> Option<u64> {
        None
    }

    /// Replace the owner of the record
    fn set_owner_id(&mut self, _owner: Option<u64>) {}
}

/// The form object that owns the record under edit
pub trait RecordForm {
    /// Concrete record type
    type Record: Record + Clone + 'static;

    /// Form operation, e.g. "default", "edit" or "delete"
    fn operation(&self) -> &str;

    /// Record under edit
    fn record(&self) -> &Self::Record;

    /// Record under edit, mutably
    fn record_mut(&mut self) -> &mut Self::Record;

    /// Re-associate the record under edit
    fn set_record(&mut self, record: Self::Record);

    /// Build an updated record from the submitted values
    fn build_record(
        &self,
        form: &FormTree,
        submission: &Submission,
    ) -> Result<Self::Record, StepsError>;

    /// Persist the record under edit
    fn save(&mut self, form: &FormTree, submission: &Submission) -> Result<(), StepsError>;
}

/// The user performing the edit
#[cfg_attr(test, mockall::automock)]
pub trait CurrentActor: Send + Sync {
    /// ID of the current user
    fn id(&self) -> u64;
}
