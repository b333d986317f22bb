//! Test data generators for Formsteps.
//!
//! This module provides functions for generating layouts, form trees and
//! form display documents used across the formsteps test suites.

mod dsl;
mod forms;
mod layouts;

// Re-export all data generators for easy access
pub use dsl::*;
pub use forms::*;
pub use layouts::*;
