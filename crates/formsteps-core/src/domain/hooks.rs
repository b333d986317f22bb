//! Extension points
//!
//! Every extension point is invoked in three tiers: hooks registered for all
//! records, then hooks registered for the record's type, then hooks
//! registered for the record's type and bundle. Within a tier hooks run in
//! registration order. A failing hook aborts the invocation and the error is
//! returned to the caller.

use std::fmt;
use tracing::trace;

use crate::domain::form::FormTree;
use crate::domain::record::Record;
use crate::domain::session::FormSession;
use crate::domain::state::{StepSessionState, Submission};
use crate::domain::step::StepSequence;
use crate::StepsError;

/// Hook that may add, remove, reorder or modify the resolved steps
pub type StepsAlterHook =
    Box<dyn Fn(&mut StepSequence, &FormSession, &dyn Record) -> anyhow::Result<()> + Send + Sync>;

/// Hook that may rewrite the navigation state before the cursor moves
pub type StateAlterHook = Box<
    dyn Fn(&mut StepSessionState, &FormSession, &Submission, &dyn Record) -> anyhow::Result<()>
        + Send
        + Sync,
>;

/// Hook that may alter the fully assembled form
pub type CompleteFormAlterHook = Box<
    dyn Fn(&mut FormTree, &FormSession, &dyn Record, &StepSessionState) -> anyhow::Result<()>
        + Send
        + Sync,
>;

/// Which records a hook applies to
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookScope {
    /// Every record
    Global,
    /// Records of one type
    EntityType(String),
    /// Records of one type and bundle
    Bundle {
        /// Record type
        entity_type: String,
        /// Record bundle
        bundle: String,
    },
}

impl HookScope {
    /// Scope for a record type
    pub fn entity_type(entity_type: impl Into<String>) -> Self {
        HookScope::EntityType(entity_type.into())
    }

    /// Scope for a record type and bundle
    pub fn bundle(entity_type: impl Into<String>, bundle: impl Into<String>) -> Self {
        HookScope::Bundle {
            entity_type: entity_type.into(),
            bundle: bundle.into(),
        }
    }

    /// Invocation tier: 0 global, 1 type, 2 type and bundle
    fn tier(&self) -> u8 {
        match self {
            HookScope::Global => 0,
            HookScope::EntityType(_) => 1,
            HookScope::Bundle { .. } => 2,
        }
    }

    /// Whether the hook applies to the record
    pub fn matches(&self, record: &dyn Record) -> bool {
        match self {
            HookScope::Global => true,
            HookScope::EntityType(entity_type) => entity_type == record.entity_type_id(),
            HookScope::Bundle {
                entity_type,
                bundle,
            } => entity_type == record.entity_type_id() && bundle == record.bundle(),
        }
    }

    /// Descriptive hook name for the given extension point
    pub fn hook_name(&self, point: ExtensionPoint) -> String {
        match self {
            HookScope::Global => format!("form_steps_{}", point.suffix()),
            HookScope::EntityType(entity_type) => {
                format!("{}_form_steps_{}", entity_type, point.suffix())
            }
            HookScope::Bundle {
                entity_type,
                bundle,
            } => format!("{}_{}_form_steps_{}", entity_type, bundle, point.suffix()),
        }
    }
}

/// The extension points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtensionPoint {
    /// Catalog resolution
    AlterSteps,
    /// Every transition, before the cursor moves
    AlterStepsState,
    /// After all per-step form changes
    AlterCompleteForm,
}

impl ExtensionPoint {
    fn suffix(self) -> &'static str {
        match self {
            ExtensionPoint::AlterSteps => "alter",
            ExtensionPoint::AlterStepsState => "state_alter",
            ExtensionPoint::AlterCompleteForm => "complete_form_alter",
        }
    }
}

impl fmt::Display for ExtensionPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

struct Registered<H> {
    scope: HookScope,
    hook: H,
}

/// Ordered hooks for one extension point
struct HookList<H> {
    hooks: Vec<Registered<H>>,
}

impl<H> Default for HookList<H> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<H> HookList<H> {
    fn push(&mut self, scope: HookScope, hook: H) {
        self.hooks.push(Registered { scope, hook });
    }

    /// Hooks applying to the record, tier by tier, registration order within a tier
    fn for_record<'a>(&'a self, record: &dyn Record) -> Vec<&'a Registered<H>> {
        let mut matching: Vec<_> = self
            .hooks
            .iter()
            .filter(|r| r.scope.matches(record))
            .collect();
        matching.sort_by_key(|r| r.scope.tier());
        matching
    }

    fn len(&self) -> usize {
        self.hooks.len()
    }
}

/// Registry of all extension hooks, built once per request
#[derive(Default)]
pub struct ExtensionRegistry {
    steps_alter: HookList<StepsAlterHook>,
    state_alter: HookList<StateAlterHook>,
    complete_form_alter: HookList<CompleteFormAlterHook>,
}

impl fmt::Debug for ExtensionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtensionRegistry")
            .field("steps_alter", &self.steps_alter.len())
            .field("state_alter", &self.state_alter.len())
            .field("complete_form_alter", &self.complete_form_alter.len())
            .finish()
    }
}

impl ExtensionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a hook on the alter-steps extension point
    pub fn on_steps_alter<F>(&mut self, scope: HookScope, hook: F) -> &mut Self
    where
        F: Fn(&mut StepSequence, &FormSession, &dyn Record) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.steps_alter.push(scope, Box::new(hook));
        self
    }

    /// Register a hook on the alter-steps-state extension point
    pub fn on_state_alter<F>(&mut self, scope: HookScope, hook: F) -> &mut Self
    where
        F: Fn(&mut StepSessionState, &FormSession, &Submission, &dyn Record) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.state_alter.push(scope, Box::new(hook));
        self
    }

    /// Register a hook on the alter-complete-form extension point
    pub fn on_complete_form_alter<F>(&mut self, scope: HookScope, hook: F) -> &mut Self
    where
        F: Fn(&mut FormTree, &FormSession, &dyn Record, &StepSessionState) -> anyhow::Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.complete_form_alter.push(scope, Box::new(hook));
        self
    }

    /// Run the alter-steps hooks
    pub fn alter_steps(
        &self,
        steps: &mut StepSequence,
        session: &FormSession,
        record: &dyn Record,
    ) -> Result<(), StepsError> {
        for registered in self.steps_alter.for_record(record) {
            let name = registered.scope.hook_name(ExtensionPoint::AlterSteps);
            trace!(hook = %name, "Invoking extension hook");
            (registered.hook)(steps, session, record).map_err(|e| StepsError::hook(&name, e))?;
        }
        Ok(())
    }

    /// Run the alter-steps-state hooks
    pub fn alter_state(
        &self,
        state: &mut StepSessionState,
        session: &FormSession,
        submission: &Submission,
        record: &dyn Record,
    ) -> Result<(), StepsError> {
        for registered in self.state_alter.for_record(record) {
            let name = registered.scope.hook_name(ExtensionPoint::AlterStepsState);
            trace!(hook = %name, "Invoking extension hook");
            (registered.hook)(state, session, submission, record)
                .map_err(|e| StepsError::hook(&name, e))?;
        }
        Ok(())
    }

    /// Run the alter-complete-form hooks
    pub fn alter_complete_form(
        &self,
        form: &mut FormTree,
        session: &FormSession,
        record: &dyn Record,
        state: &StepSessionState,
    ) -> Result<(), StepsError> {
        for registered in self.complete_form_alter.for_record(record) {
            let name = registered.scope.hook_name(ExtensionPoint::AlterCompleteForm);
            trace!(hook = %name, "Invoking extension hook");
            (registered.hook)(form, session, record, state)
                .map_err(|e| StepsError::hook(&name, e))?;
        }
        Ok(())
    }
}
