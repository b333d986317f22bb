//!
//! Formsteps Core - Multi-step entity forms
//!
//! This crate splits an entity form into ordered steps declared as field
//! groups, keeps the navigation state for each form-editing session and
//! persists the record exactly once, when the last step is submitted.
//! Extension hooks may alter the steps, the navigation state and the
//! assembled form.

#![forbid(unsafe_code)]

/// Domain layer - steps, session state, form model and host interfaces
pub mod domain;

/// Application services - step resolution and the step session driver
pub mod application;

/// Configuration
pub mod config;

/// Error types
pub mod error;

// Re-export key types
pub use config::StepsConfig;
pub use error::StepsError;

pub use application::catalog::StepCatalog;
pub use application::step_session::{StepSession, DESTINATION_CACHE_CONTEXT, UNSAVED_ATTRIBUTE};

pub use domain::form::{
    ElementKind, FormActions, FormElement, FormTree, LinkAction, SubmitButton,
    CONFIRMATION_HANDLER, SAVE_HANDLER, STEPS_HANDLER, SUBMIT_FORM_HANDLER,
};
pub use domain::hooks::{ExtensionPoint, ExtensionRegistry, HookScope};
pub use domain::layout::{LayoutConfig, LayoutEntry};
pub use domain::record::{CurrentActor, Record, RecordForm};
pub use domain::session::FormSession;
pub use domain::state::{
    FormSessionId, NavigationAction, StepSessionState, Submission, PREVIOUS_TRIGGER,
    SUBMIT_TRIGGER,
};
pub use domain::step::{StepDefinition, StepKey, StepSequence, StepSettings};
pub use domain::store::FormStateStore;
pub use domain::url::{is_valid_url, resolve_template, RecordTokenReplacer, TokenReplacer, Url};
