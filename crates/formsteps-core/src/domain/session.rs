use serde_json::Value;
use std::fmt;
use std::sync::Arc;

use crate::domain::state::{FormSessionId, StepSessionState};
use crate::domain::store::FormStateStore;
use crate::StepsError;

/// Storage key of the step state
pub const STATE_KEY: &str = "form_steps";

/// Storage key of the owner captured when the session started
pub const ORIGINAL_OWNER_KEY: &str = "original_owner";

/// Per-request view of one form-editing session
pub struct FormSession {
    id: FormSessionId,
    store: Arc<dyn FormStateStore>,
    rebuild: bool,
    finished: bool,
}

impl fmt::Debug for FormSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormSession")
            .field("id", &self.id)
            .field("rebuild", &self.rebuild)
            .field("finished", &self.finished)
            .finish()
    }
}

impl FormSession {
    /// Open a new session with a generated ID
    pub fn new(store: Arc<dyn FormStateStore>) -> Self {
        Self::resume(FormSessionId::generate(), store)
    }

    /// Re-open an existing session for the next request
    pub fn resume(id: FormSessionId, store: Arc<dyn FormStateStore>) -> Self {
        Self {
            id,
            store,
            rebuild: false,
            finished: false,
        }
    }

    pub fn id(&self) -> &FormSessionId {
        &self.id
    }

    /// Whether the form should be rebuilt and shown again
    pub fn needs_rebuild(&self) -> bool {
        self.rebuild
    }

    pub fn set_rebuild(&mut self, rebuild: bool) {
        self.rebuild = rebuild;
    }

    /// Whether the multi-step edit has completed
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Mark the multi-step edit as completed
    pub fn finish(&mut self) {
        self.finished = true;
        self.rebuild = false;
    }

    /// Whether step state exists for this session
    pub fn has_state(&self) -> Result<bool, StepsError> {
        Ok(self.store.get(&self.id, STATE_KEY)?.is_some())
    }

    /// Load the step state
    pub fn load_state(&self) -> Result<Option<StepSessionState>, StepsError> {
        match self.store.get(&self.id, STATE_KEY)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Store the step state
    pub fn save_state(&self, state: &StepSessionState) -> Result<(), StepsError> {
        self.store
            .set(&self.id, STATE_KEY, serde_json::to_value(state)?)
    }

    /// Owner captured when the session started
    pub fn original_owner(&self) -> Result<Option<u64>, StepsError> {
        Ok(self
            .store
            .get(&self.id, ORIGINAL_OWNER_KEY)?
            .and_then(|v| v.as_u64()))
    }

    /// Capture the owner unless one was captured already
    pub fn capture_owner(&self, owner: Option<u64>) -> Result<(), StepsError> {
        if self.original_owner()?.is_some() {
            return Ok(());
        }
        let value = owner.map(Value::from).unwrap_or(Value::Null);
        self.store.set(&self.id, ORIGINAL_OWNER_KEY, value)
    }

    /// Drop everything stored for the session
    pub fn discard(&self) -> Result<(), StepsError> {
        self.store.clear_session(&self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::step::{StepDefinition, StepSequence};
    use crate::domain::store::tests::MapStore;

    #[test]
    fn test_state_round_trip() {
        let session = FormSession::new(Arc::new(MapStore::default()));
        assert!(!session.has_state().unwrap());
        assert!(session.load_state().unwrap().is_none());

        let steps: StepSequence = vec![StepDefinition::new("a", 0)].into();
        let state = StepSessionState::start(steps).unwrap();
        session.save_state(&state).unwrap();

        assert!(session.has_state().unwrap());
        assert_eq!(session.load_state().unwrap(), Some(state));
    }

    #[test]
    fn test_owner_captured_once() {
        let session = FormSession::new(Arc::new(MapStore::default()));
        session.capture_owner(None).unwrap();
        assert_eq!(session.original_owner().unwrap(), None);

        session.capture_owner(Some(4)).unwrap();
        session.capture_owner(Some(9)).unwrap();
        assert_eq!(session.original_owner().unwrap(), Some(4));
    }

    #[test]
    fn test_resume_shares_storage() {
        let store: Arc<dyn FormStateStore> = Arc::new(MapStore::default());
        let first = FormSession::new(store.clone());
        first.capture_owner(Some(1)).unwrap();

        let second = FormSession::resume(first.id().clone(), store);
        assert_eq!(second.original_owner().unwrap(), Some(1));
        assert!(!second.needs_rebuild());

        second.discard().unwrap();
        assert_eq!(first.original_owner().unwrap(), None);
    }

    #[test]
    fn test_finish_clears_rebuild() {
        let mut session = FormSession::new(Arc::new(MapStore::default()));
        session.set_rebuild(true);
        session.finish();
        assert!(session.is_finished());
        assert!(!session.needs_rebuild());
    }
}
