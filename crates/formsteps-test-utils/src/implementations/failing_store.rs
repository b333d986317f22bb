//! Form state store that fails every operation.

use serde_json::Value;

use formsteps_core::{FormSessionId, FormStateStore, StepsError};

/// Store whose every call returns a `StateStoreError`.
#[derive(Debug, Clone, Default)]
pub struct FailingFormStateStore {
    /// Message carried by the returned errors
    pub message: String,
}

impl FailingFormStateStore {
    /// Creates a failing store with the given error message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    fn error(&self) -> StepsError {
        StepsError::StateStoreError(self.message.clone())
    }
}

impl FormStateStore for FailingFormStateStore {
    fn get(&self, _session: &FormSessionId, _key: &str) -> Result<Option<Value>, StepsError> {
        Err(self.error())
    }

    fn set(&self, _session: &FormSessionId, _key: &str, _value: Value) -> Result<(), StepsError> {
        Err(self.error())
    }

    fn delete(&self, _session: &FormSessionId, _key: &str) -> Result<(), StepsError> {
        Err(self.error())
    }

    fn clear_session(&self, _session: &FormSessionId) -> Result<(), StepsError> {
        Err(self.error())
    }
}
