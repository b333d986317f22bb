//! Assertion utilities for validating step state and rendered forms.
//!
//! This module provides helper functions for validating and asserting
//! properties of formsteps data structures, making tests more concise and
//! readable.

mod step_state;

// Re-export all assertion helpers for easy access
pub use step_state::*;
