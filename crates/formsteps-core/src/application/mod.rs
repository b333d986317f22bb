/// Step resolution from layout configuration
pub mod catalog;

/// Multi-step form driver
pub mod step_session;
