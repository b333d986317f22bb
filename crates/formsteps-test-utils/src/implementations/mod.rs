//! Test implementations (fakes) of the host-side collaborators.

mod actor;
mod failing_store;
mod record_form;

pub use actor::*;
pub use failing_store::*;
pub use record_form::*;
