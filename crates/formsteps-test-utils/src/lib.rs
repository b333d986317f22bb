//! Testing utilities for Formsteps.
//!
//! This crate provides test implementations (fakes) of the host-side
//! collaborators, test data generators for layouts, forms and form display
//! documents, assertion utilities, and tracing setup for tests.

pub mod assertions;
pub mod data_generators;
pub mod implementations;
pub mod util;

pub use implementations::{FailingFormStateStore, FixedActor, SaveLog, TestRecord, TestRecordForm};
pub use util::init_test_tracing;
