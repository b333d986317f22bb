use std::error::Error;
use std::fmt;

use crate::display::FormDisplayDocument;
use crate::error::DslError;

mod settings;
mod structure;

/// Represents a validation error that occurred during document processing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code (should be a constant identifier)
    pub code: &'static str,

    /// Human-readable error message
    pub message: String,

    /// Optional path to the location of the error (e.g., "form_display.groups[2]")
    pub path: Option<String>,

    /// Group the error belongs to, if any
    pub group: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)?;
        match (&self.group, &self.path) {
            (Some(group), _) => write!(f, " (in group '{}')", group),
            (None, Some(path)) => write!(f, " (at {})", path),
            (None, None) => Ok(()),
        }
    }
}

impl Error for ValidationError {}

/// Validation error codes
pub mod error_codes {
    /// Child that is neither a declared field nor a declared group
    pub const INVALID_REFERENCE: &str = "ERR_DSL_VALIDATION_INVALID_REFERENCE";

    /// Field or group name used more than once
    pub const DUPLICATE_ID: &str = "ERR_DSL_VALIDATION_DUPLICATE_ID";

    /// Groups nested in a cycle
    pub const CIRCULAR_GROUP: &str = "ERR_DSL_VALIDATION_CIRCULAR_GROUP";

    /// Step group without a label
    pub const MISSING_LABEL: &str = "ERR_DSL_VALIDATION_MISSING_LABEL";

    /// Cancel or delete URL that is not usable
    pub const INVALID_URL: &str = "ERR_DSL_VALIDATION_INVALID_URL";
}

/// A trait for validators that check specific aspects of the document
pub trait Validator {
    /// Validate the document and return a list of validation errors (if any)
    fn validate(&self, document: &FormDisplayDocument) -> Vec<ValidationError>;
}

/// Validate a parsed form display document
pub fn validate_display(document: &FormDisplayDocument) -> Result<(), DslError> {
    let validators: Vec<Box<dyn Validator>> = vec![
        Box::new(structure::StructureValidator::new()),
        Box::new(settings::SettingsValidator::new()),
    ];

    let mut errors = Vec::new();
    for validator in validators {
        errors.extend(validator.validate(document));
    }

    if !errors.is_empty() {
        let display = &document.form_display;
        return Err(DslError::InvalidDisplay {
            display: format!("{}.{}.{}", display.entity_type, display.bundle, display.mode),
            errors,
        });
    }

    Ok(())
}

pub use settings::{validate_url, URL_INVALID, URL_NOT_LOCAL_OR_EXTERNAL};
