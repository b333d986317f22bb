//! In-memory form-session storage for Formsteps
//!
//! This crate provides an in-memory implementation of the
//! `FormStateStore` interface defined in formsteps-core. It is primarily
//! useful for development, testing, and single-process deployments where
//! sessions do not have to survive a restart.

pub mod store;
pub use store::InMemoryFormStateStore;
