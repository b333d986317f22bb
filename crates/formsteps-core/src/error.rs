use thiserror::Error;

/// Core error type for the step sequencing runtime
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StepsError {
    /// Form session storage failed
    #[error("State store error: {0}")]
    StateStoreError(String),

    /// Session state could not be (de)serialized
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// An extension hook returned an error
    #[error("Extension hook error: {0}")]
    ExtensionHookError(String),

    /// Building or persisting the record failed
    #[error("Record error: {0}")]
    RecordError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl StepsError {
    /// Wrap a failed extension hook, keeping the hook name in the message
    pub fn hook(hook_name: &str, err: anyhow::Error) -> Self {
        StepsError::ExtensionHookError(format!("{}: {:#}", hook_name, err))
    }
}

impl From<serde_json::Error> for StepsError {
    fn from(err: serde_json::Error) -> Self {
        StepsError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for StepsError {
    fn from(err: serde_yaml::Error) -> Self {
        StepsError::ConfigurationError(err.to_string())
    }
}

impl From<String> for StepsError {
    fn from(err: String) -> Self {
        StepsError::Other(err)
    }
}

impl From<&str> for StepsError {
    fn from(err: &str) -> Self {
        StepsError::Other(err.to_string())
    }
}
