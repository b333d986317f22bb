//! Assertion utilities for step state and the forms rendered for it.

use formsteps_core::{FormTree, StepSessionState};
use thiserror::Error;

/// Error type for step state validation failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepStateValidationError {
    #[error("Invalid current step: expected {expected}, got {actual}")]
    InvalidCurrentStep { expected: String, actual: String },

    #[error("Positional flags disagree with step {0}")]
    InconsistentFlags(String),

    #[error("Step {0} should be hidden")]
    StepVisible(String),

    #[error("Step {0} should be visible")]
    StepHidden(String),
}

/// Asserts that the state is positioned on the expected step and that its
/// first and last flags match that position.
///
/// # Arguments
///
/// * `state` - The step state to validate
/// * `expected` - Key of the expected current step
pub fn assert_current_step(
    state: &StepSessionState,
    expected: &str,
) -> Result<(), StepStateValidationError> {
    if state.current_step.as_str() != expected {
        return Err(StepStateValidationError::InvalidCurrentStep {
            expected: expected.to_string(),
            actual: state.current_step.to_string(),
        });
    }
    if !state.flags_consistent() {
        return Err(StepStateValidationError::InconsistentFlags(
            state.current_step.to_string(),
        ));
    }
    Ok(())
}

/// Asserts that the form shows the current step and hides every other one.
///
/// # Arguments
///
/// * `form` - The altered form
/// * `state` - The step state the form was altered for
pub fn assert_only_current_step_visible(
    form: &FormTree,
    state: &StepSessionState,
) -> Result<(), StepStateValidationError> {
    for key in state.steps.keys() {
        let visible = form.is_accessible(key.as_str());
        if key == &state.current_step {
            if form.element(key.as_str()).is_some() && !visible {
                return Err(StepStateValidationError::StepHidden(key.to_string()));
            }
        } else if visible {
            return Err(StepStateValidationError::StepVisible(key.to_string()));
        }
    }
    Ok(())
}
