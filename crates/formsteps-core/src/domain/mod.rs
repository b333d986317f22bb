/// Step definitions and ordered sequences
pub mod step;

/// Declarative layout configuration
pub mod layout;

/// Navigable session state
pub mod state;

/// Form tree model
pub mod form;

/// Record, form object and actor interfaces
pub mod record;

/// Form-session storage interface
pub mod store;

/// Per-request session handle
pub mod session;

/// Extension points
pub mod hooks;

/// URL helpers
pub mod url;
