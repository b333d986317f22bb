use std::fmt;
use thiserror::Error;

use crate::parser::SUPPORTED_DSL_VERSION;
use crate::validation::ValidationError;

/// Code reported when a display has more than one validation error
pub const MULTIPLE_ERRORS_CODE: &str = "ERR_DSL_VALIDATION_MULTIPLE";

/// Errors raised while loading a form display document
#[derive(Error, Debug)]
pub enum DslError {
    /// The document is not valid YAML or does not match the document shape
    #[error("Form display is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document declares a version this crate does not read
    #[error("Form display version '{}' is not supported, expected '{}'", .found, SUPPORTED_DSL_VERSION)]
    UnsupportedVersion {
        /// Version declared by the document
        found: String,
    },

    /// The document parsed but failed validation. Never empty.
    #[error("{}", InvalidDisplayFormat(.display, .errors))]
    InvalidDisplay {
        /// `entity_type.bundle.mode` of the rejected display
        display: String,
        errors: Vec<ValidationError>,
    },
}

// Helper struct to format the validation errors of a display
struct InvalidDisplayFormat<'a>(&'a str, &'a [ValidationError]);

impl fmt::Display for InvalidDisplayFormat<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let InvalidDisplayFormat(display, errors) = *self;
        if let [only] = errors {
            return write!(f, "Form display '{}' is invalid: {}", display, only);
        }
        write!(f, "Form display '{}' is invalid ({} issues):", display, errors.len())?;
        for (i, err) in errors.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, err)?;
        }
        Ok(())
    }
}

impl DslError {
    /// Validation errors carried by this error, empty for other kinds
    pub fn validation_errors(&self) -> &[ValidationError] {
        match self {
            DslError::InvalidDisplay { errors, .. } => errors,
            _ => &[],
        }
    }

    /// Names of the groups with validation errors, in report order
    pub fn groups(&self) -> Vec<&str> {
        let mut groups: Vec<&str> = Vec::new();
        for name in self.validation_errors().iter().filter_map(|e| e.group.as_deref()) {
            if !groups.contains(&name) {
                groups.push(name);
            }
        }
        groups
    }

    /// Stable error code. A single validation error reports its own code.
    pub fn error_code(&self) -> &'static str {
        match self {
            DslError::Yaml(_) => "ERR_DSL_YAML_PARSE",
            DslError::UnsupportedVersion { .. } => "ERR_DSL_UNSUPPORTED_VERSION",
            DslError::InvalidDisplay { errors, .. } => match errors.as_slice() {
                [only] => only.code,
                _ => MULTIPLE_ERRORS_CODE,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::error_codes;

    fn error(code: &'static str, group: Option<&str>) -> ValidationError {
        ValidationError {
            code,
            message: "broken".to_string(),
            path: None,
            group: group.map(str::to_string),
        }
    }

    #[test]
    fn test_single_error_reports_its_code() {
        let err = DslError::InvalidDisplay {
            display: "node.page.default".to_string(),
            errors: vec![error(error_codes::MISSING_LABEL, Some("group_one"))],
        };
        assert_eq!(err.error_code(), error_codes::MISSING_LABEL);
        assert_eq!(
            err.to_string(),
            "Form display 'node.page.default' is invalid: ERR_DSL_VALIDATION_MISSING_LABEL: broken (in group 'group_one')"
        );
    }

    #[test]
    fn test_groups_are_listed_once() {
        let err = DslError::InvalidDisplay {
            display: "node.page.default".to_string(),
            errors: vec![
                error(error_codes::MISSING_LABEL, Some("group_one")),
                error(error_codes::DUPLICATE_ID, None),
                error(error_codes::INVALID_URL, Some("group_one")),
                error(error_codes::INVALID_URL, Some("group_two")),
            ],
        };
        assert_eq!(err.error_code(), MULTIPLE_ERRORS_CODE);
        assert_eq!(err.groups(), vec!["group_one", "group_two"]);
        assert!(err.to_string().starts_with("Form display 'node.page.default' is invalid (4 issues):"));
    }

    #[test]
    fn test_unsupported_version_message() {
        let err = DslError::UnsupportedVersion {
            found: "2.0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Form display version '2.0' is not supported, expected '1.0'"
        );
        assert!(err.groups().is_empty());
    }
}
