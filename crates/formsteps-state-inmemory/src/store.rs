//! In-memory implementation of the FormStateStore interface

use dashmap::DashMap;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, trace};

use formsteps_core::{FormSessionId, FormStateStore, StepsError};

/// In-memory implementation of FormStateStore
#[derive(Debug, Default)]
pub struct InMemoryFormStateStore {
    /// Map of session ID -> (key -> value)
    sessions: DashMap<String, HashMap<String, Value>>,
}

impl InMemoryFormStateStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions holding at least one value
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }
}

impl FormStateStore for InMemoryFormStateStore {
    fn get(&self, session: &FormSessionId, key: &str) -> Result<Option<Value>, StepsError> {
        Ok(self
            .sessions
            .get(&session.0)
            .and_then(|values| values.get(key).cloned()))
    }

    fn set(&self, session: &FormSessionId, key: &str, value: Value) -> Result<(), StepsError> {
        trace!("Setting form state: session={}, key={}", session.0, key);
        self.sessions
            .entry(session.0.clone())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, session: &FormSessionId, key: &str) -> Result<(), StepsError> {
        let now_empty = match self.sessions.get_mut(&session.0) {
            Some(mut values) => {
                values.remove(key);
                values.is_empty()
            }
            None => false,
        };
        // Drop empty sessions so session_count stays meaningful
        if now_empty {
            self.sessions.remove_if(&session.0, |_, values| values.is_empty());
        }
        Ok(())
    }

    fn clear_session(&self, session: &FormSessionId) -> Result<(), StepsError> {
        if self.sessions.remove(&session.0).is_some() {
            debug!("Cleared form state for session {}", session.0);
        }
        Ok(())
    }
}
