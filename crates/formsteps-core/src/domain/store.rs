//! Form-session storage interface
//!
//! The host keeps opaque per-session values that survive the round trips of
//! one form-editing session and nothing beyond it. External crates implement
//! this trait to provide the storage.

use serde_json::Value;

use crate::domain::state::FormSessionId;
use crate::StepsError;

/// Storage for values scoped to one form-editing session
pub trait FormStateStore: Send + Sync {
    /// Get a value for a session
    fn get(&self, session: &FormSessionId, key: &str) -> Result<Option<Value>, StepsError>;

    /// Set a value for a session
    fn set(&self, session: &FormSessionId, key: &str, value: Value) -> Result<(), StepsError>;

    /// Delete a value for a session
    fn delete(&self, session: &FormSessionId, key: &str) -> Result<(), StepsError>;

    /// Drop everything stored for a session
    fn clear_session(&self, session: &FormSessionId) -> Result<(), StepsError>;
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Minimal store for unit tests
    #[derive(Default)]
    pub(crate) struct MapStore {
        values: Mutex<HashMap<(String, String), Value>>,
    }

    impl FormStateStore for MapStore {
        fn get(&self, session: &FormSessionId, key: &str) -> Result<Option<Value>, StepsError> {
            let values = self.values.lock().unwrap();
            Ok(values.get(&(session.0.clone(), key.to_string())).cloned())
        }

        fn set(&self, session: &FormSessionId, key: &str, value: Value) -> Result<(), StepsError> {
            let mut values = self.values.lock().unwrap();
            values.insert((session.0.clone(), key.to_string()), value);
            Ok(())
        }

        fn delete(&self, session: &FormSessionId, key: &str) -> Result<(), StepsError> {
            let mut values = self.values.lock().unwrap();
            values.remove(&(session.0.clone(), key.to_string()));
            Ok(())
        }

        fn clear_session(&self, session: &FormSessionId) -> Result<(), StepsError> {
            let mut values = self.values.lock().unwrap();
            values.retain(|(s, _), _| s != &session.0);
            Ok(())
        }
    }

    #[test]
    fn test_map_store_scopes_by_session() {
        let store = MapStore::default();
        let a = FormSessionId("a".to_string());
        let b = FormSessionId("b".to_string());

        store.set(&a, "k", Value::from(1)).unwrap();
        store.set(&b, "k", Value::from(2)).unwrap();
        store.clear_session(&a).unwrap();

        assert_eq!(store.get(&a, "k").unwrap(), None);
        assert_eq!(store.get(&b, "k").unwrap(), Some(Value::from(2)));
    }
}
