use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::step::{StepDefinition, StepKey, StepSequence};

/// Name of the control that moves one step back
pub const PREVIOUS_TRIGGER: &str = "form_steps_previous";

/// Name of the primary submit control
pub const SUBMIT_TRIGGER: &str = "op";

/// Value object: Form session ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FormSessionId(pub String);

impl FormSessionId {
    /// Generate a fresh session ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

/// Navigable step state for one form-editing session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSessionState {
    /// Ordered steps
    pub steps: StepSequence,

    /// Key of the step currently presented
    pub current_step: StepKey,

    /// Whether the current step is the first one
    pub is_first: bool,

    /// Whether the current step is the last one. Extension hooks may force
    /// this to `true` to complete the form early.
    pub is_last: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last updated timestamp
    pub updated_at: DateTime<Utc>,
}

impl StepSessionState {
    /// Create the state positioned on the first step. Returns `None` for an
    /// empty sequence.
    pub fn start(steps: StepSequence) -> Option<Self> {
        let first = steps.first_key()?.clone();
        let now = Utc::now();
        let mut state = Self {
            steps,
            current_step: first,
            is_first: false,
            is_last: false,
            created_at: now,
            updated_at: now,
        };
        state.refresh_flags();
        Some(state)
    }

    /// Definition of the current step
    pub fn current(&self) -> Option<&StepDefinition> {
        self.steps.get(self.current_step.as_str())
    }

    /// Position of the current step
    pub fn position(&self) -> Option<usize> {
        self.steps.position(self.current_step.as_str())
    }

    /// Force completion on the next primary submit
    pub fn force_complete(&mut self) {
        self.is_last = true;
    }

    /// Move to a position, clamped to the sequence bounds
    pub fn move_to(&mut self, index: usize) {
        let last = self.steps.len().saturating_sub(1);
        if let Some(key) = self.steps.key_at(index.min(last)) {
            self.current_step = key.clone();
        }
        self.refresh_flags();
    }

    /// Recompute the positional flags from the current key
    pub fn refresh_flags(&mut self) {
        self.is_first = self.steps.first_key() == Some(&self.current_step);
        self.is_last = self.steps.last_key() == Some(&self.current_step);
        self.updated_at = Utc::now();
    }

    /// Whether the flags agree with the current position
    pub fn flags_consistent(&self) -> bool {
        self.is_first == (self.steps.first_key() == Some(&self.current_step))
            && self.is_last == (self.steps.last_key() == Some(&self.current_step))
    }
}

/// The control that triggered a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationAction {
    /// Go back one step
    Previous,
    /// Primary submit: go forward, or complete on the last step
    Submit,
    /// Any other control. Does not move the cursor.
    Other(String),
}

impl NavigationAction {
    /// Classify a triggering control name
    pub fn from_trigger(name: &str) -> Self {
        match name {
            PREVIOUS_TRIGGER => NavigationAction::Previous,
            SUBMIT_TRIGGER => NavigationAction::Submit,
            other => NavigationAction::Other(other.to_string()),
        }
    }
}

/// Submitted values plus the name of the triggering control
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    /// Submitted values keyed by element name
    pub values: Map<String, Value>,

    /// Name of the control that triggered the submission
    pub trigger: String,
}

impl Submission {
    /// Submission through the primary control
    pub fn submit() -> Self {
        Self {
            values: Map::new(),
            trigger: SUBMIT_TRIGGER.to_string(),
        }
    }

    /// Submission through the previous control
    pub fn previous() -> Self {
        Self {
            values: Map::new(),
            trigger: PREVIOUS_TRIGGER.to_string(),
        }
    }

    /// Submission through an arbitrary control
    pub fn triggered_by(trigger: impl Into<String>) -> Self {
        Self {
            values: Map::new(),
            trigger: trigger.into(),
        }
    }

    /// Add a submitted value
    pub fn with_value(mut self, name: &str, value: Value) -> Self {
        self.values.insert(name.to_string(), value);
        self
    }

    /// Look up a submitted value
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Classified triggering control
    pub fn action(&self) -> NavigationAction {
        NavigationAction::from_trigger(&self.trigger)
    }
}
