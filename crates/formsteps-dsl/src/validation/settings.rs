use formsteps_core::is_valid_url;

use crate::display::FormDisplayDocument;
use crate::validation::{error_codes, ValidationError, Validator};

/// Message for a URL that is neither absolute nor a local path
pub const URL_NOT_LOCAL_OR_EXTERNAL: &str =
    "The URL must begin with a forward slash or be external.";

/// Message for a URL with characters a URL cannot hold
pub const URL_INVALID: &str = "The URL does not exist or is invalid.";

/// Check a cancel or delete URL setting.
///
/// Empty values are allowed. Otherwise the value must be a valid absolute
/// URL or start with `/`, and must consist of URL characters. Record tokens
/// such as `[node:id]` pass.
pub fn validate_url(value: &str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Ok(());
    }
    if !is_valid_url(value, true) && !value.starts_with('/') {
        return Err(URL_NOT_LOCAL_OR_EXTERNAL);
    }
    if !is_valid_url(value, false) {
        return Err(URL_INVALID);
    }
    Ok(())
}

/// Validates step group settings:
/// - Step groups carry a label
/// - Cancel and delete URLs are local paths or external URLs
pub struct SettingsValidator;

impl SettingsValidator {
    /// Create a new settings validator
    pub fn new() -> Self {
        SettingsValidator
    }
}

impl Validator for SettingsValidator {
    fn validate(&self, document: &FormDisplayDocument) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (idx, group) in document.form_display.groups.iter().enumerate() {
            let path = format!("form_display.groups[{}]", idx);

            if group.is_step() && group.label.trim().is_empty() {
                errors.push(ValidationError {
                    code: error_codes::MISSING_LABEL,
                    message: format!("Step '{}' has no label", group.name),
                    path: Some(format!("{}.label", path)),
                    group: Some(group.name.clone()),
                });
            }

            let settings = &group.format_settings;
            for (name, value) in [
                ("cancel_path", &settings.cancel_path),
                ("delete_path", &settings.delete_path),
            ] {
                let Some(value) = value else { continue };
                if let Err(message) = validate_url(value) {
                    errors.push(ValidationError {
                        code: error_codes::INVALID_URL,
                        message: message.to_string(),
                        path: Some(format!("{}.format_settings.{}", path, name)),
                        group: Some(group.name.clone()),
                    });
                }
            }
        }

        errors
    }
}
