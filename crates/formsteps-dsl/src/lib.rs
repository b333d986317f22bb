//! # Formsteps DSL
//!
//! Form displays are described in YAML documents: the fields of a record
//! type and bundle and the field groups laid out over them. Groups of the
//! `steps` format type split the form into steps. This crate provides
//! functionality for parsing, validating, and converting these documents
//! into the layout configuration and form tree used by formsteps-core.
//!
//! ## Features
//!
//! * YAML form display documents
//! * Validation of names, group children and group nesting
//! * Author-time validation of step labels and cancel/delete URLs
//! * Conversion into `LayoutConfig` and `FormTree`
//!
//! ## Example
//!
//! ```
//! use formsteps_dsl::parse_and_validate_form_display;
//!
//! let yaml = r#"
//! dsl_version: "1.0"
//! form_display:
//!   entity_type: node
//!   bundle: article
//!   fields: [title, body]
//!   groups:
//!     - name: group_basics
//!       format_type: steps
//!       label: Basics
//!       children: [title]
//!     - name: group_content
//!       format_type: steps
//!       label: Content
//!       weight: 1
//!       children: [body]
//! "#;
//!
//! let document = parse_and_validate_form_display(yaml).unwrap();
//! assert_eq!(document.layout_config().len(), 2);
//! ```

mod error;
mod parser;

pub mod display;
pub mod validation;

pub use display::{FormDisplayDefinition, FormDisplayDocument, GroupDefinition, STEP_FORMAT_TYPE};
pub use error::{DslError, MULTIPLE_ERRORS_CODE};
pub use parser::{parse_form_display, SUPPORTED_DSL_VERSION};
pub use validation::{
    error_codes, validate_display, validate_url, ValidationError, URL_INVALID,
    URL_NOT_LOCAL_OR_EXTERNAL,
};

/// Parse and validate a form display YAML string.
///
/// This function performs both parsing and validation of a document:
/// 1. Parses the YAML into structured data
/// 2. Validates names, references, nesting and step settings
/// 3. Returns the validated `FormDisplayDocument` or detailed errors
///
/// # Arguments
///
/// * `yaml_str` - A YAML string containing a form display document
///
/// # Errors
///
/// * Invalid YAML syntax or missing required fields
/// * Unsupported DSL version
/// * Validation errors; all of them are reported at once
///
/// # Examples
///
/// ```
/// use formsteps_dsl::parse_and_validate_form_display;
///
/// let yaml = r#"
/// dsl_version: "1.0"
/// form_display:
///   entity_type: node
///   bundle: page
///   fields: [title]
///   groups:
///     - name: group_one
///       format_type: steps
///       label: One
///       children: [title, summary]  # summary is not declared
/// "#;
///
/// let error = parse_and_validate_form_display(yaml).unwrap_err();
/// assert!(error.error_code().contains("INVALID_REFERENCE"));
/// ```
pub fn parse_and_validate_form_display(yaml_str: &str) -> Result<FormDisplayDocument, DslError> {
    let document = parse_form_display(yaml_str)?;
    validate_display(&document)?;
    Ok(document)
}

/// Returns a version string for the Formsteps DSL crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
