use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::application::catalog::StepCatalog;
use crate::config::StepsConfig;
use crate::domain::form::{
    FormTree, LinkAction, SubmitButton, CONFIRMATION_HANDLER, STEPS_HANDLER,
};
use crate::domain::hooks::ExtensionRegistry;
use crate::domain::layout::LayoutConfig;
use crate::domain::record::{CurrentActor, Record, RecordForm};
use crate::domain::session::FormSession;
use crate::domain::state::{NavigationAction, StepSessionState, Submission, PREVIOUS_TRIGGER};
use crate::domain::url::{resolve_template, TokenReplacer, Url};
use crate::StepsError;

/// Form attribute set when a session already holds step state
pub const UNSAVED_ATTRIBUTE: &str = "data-unsaved";

/// Cache context the cancel link varies by
pub const DESTINATION_CACHE_CONTEXT: &str = "url.query_args:destination";

/// Service driving a multi-step entity form.
///
/// One instance serves many requests. All per-session data lives in the
/// [`FormSession`] passed to each call.
pub struct StepSession {
    /// Step resolution
    catalog: StepCatalog,

    /// Extension hooks
    registry: Arc<ExtensionRegistry>,

    /// Token expansion for cancel and delete paths
    tokens: Arc<dyn TokenReplacer>,

    /// Current user, for the cancel fallback
    actor: Arc<dyn CurrentActor>,

    /// Runtime configuration
    config: StepsConfig,
}

impl StepSession {
    /// Create a new step session service
    pub fn new(
        registry: Arc<ExtensionRegistry>,
        tokens: Arc<dyn TokenReplacer>,
        actor: Arc<dyn CurrentActor>,
        config: StepsConfig,
    ) -> Self {
        Self {
            catalog: StepCatalog::new(registry.clone(), config.format_type.clone()),
            registry,
            tokens,
            actor,
            config,
        }
    }

    /// Runtime configuration
    pub fn config(&self) -> &StepsConfig {
        &self.config
    }

    /// Load the session's step state, creating it on first use.
    ///
    /// Captures the record's owner the first time it is called for a
    /// session. Returns `None` when the record's form declares no steps.
    pub fn initialize(
        &self,
        session: &FormSession,
        layout: &LayoutConfig,
        record: &dyn Record,
    ) -> Result<Option<StepSessionState>, StepsError> {
        if record.has_owner() {
            session.capture_owner(record.owner_id())?;
        }

        if let Some(state) = session.load_state()? {
            return Ok(Some(state));
        }

        let steps = self.catalog.resolve(layout, record, session)?;
        let Some(state) = StepSessionState::start(steps) else {
            return Ok(None);
        };
        session.save_state(&state)?;

        info!(
            session = %session.id().0,
            steps = state.steps.len(),
            current_step = %state.current_step,
            "Started step session"
        );
        Ok(Some(state))
    }

    /// Hide every step but the current one and restrict the primary
    /// button's validation to the fields nested under the current step
    pub fn apply_visibility_and_validation(&self, state: &StepSessionState, form: &mut FormTree) {
        for key in state.steps.keys() {
            if key != &state.current_step {
                form.deny_access(key.as_str());
                continue;
            }
            if form.element(key.as_str()).map_or(false, |e| e.is_group()) {
                let fields = form.nested_fields(key.as_str());
                form.limit_validation_to(fields);
            }
        }
    }

    /// Apply the current step's title and action overrides, then run the
    /// complete-form hooks
    pub fn compute_header_and_actions(
        &self,
        state: &StepSessionState,
        session: &FormSession,
        record: &dyn Record,
        form: &mut FormTree,
    ) -> Result<(), StepsError> {
        let Some(step) = state.current() else {
            return Ok(());
        };
        let settings = &step.settings;

        if let Some(title) = settings.title(record.is_new()) {
            form.title = Some(title.to_string());
        }

        if state.is_first {
            if let Some(label) = settings.cancel_label() {
                let mut cancel = LinkAction::new(label, self.resolve_cancel_url(state, record));
                cancel.classes.push("button".to_string());
                cancel
                    .cache_contexts
                    .push(DESTINATION_CACHE_CONTEXT.to_string());
                form.actions.cancel = Some(cancel);
            }
        } else if let Some(label) = settings.previous_label() {
            let limits = form.validation_limits().map(<[String]>::to_vec);
            let mut previous =
                SubmitButton::new(PREVIOUS_TRIGGER, label).with_handlers([STEPS_HANDLER]);
            previous.limit_validation_errors = Some(limits.unwrap_or_default());
            form.actions.previous = Some(previous);
        }

        let primary_label = match settings.next_label() {
            Some(next) if !state.is_last => Some(next),
            _ => settings.submit_label(),
        };
        if let (Some(label), Some(submit)) = (primary_label, form.actions.submit.as_mut()) {
            submit.label = label.to_string();
        }

        if form.actions.preview.is_some() {
            match settings.preview_label() {
                Some(label) => {
                    if let Some(preview) = form.actions.preview.as_mut() {
                        preview.label = label.to_string();
                    }
                }
                None => form.actions.preview = None,
            }
        }

        if form.actions.delete.is_some() {
            match settings.delete_label() {
                Some(label) => {
                    let url = settings
                        .delete_path()
                        .map(|path| resolve_template(path, record, self.tokens.as_ref()));
                    if let Some(delete) = form.actions.delete.as_mut() {
                        delete.title = label.to_string();
                        if let Some(url) = url {
                            delete.url = url;
                        }
                    }
                }
                None => form.actions.delete = None,
            }
        }

        self.registry
            .alter_complete_form(form, session, record, state)
    }

    /// Target of the cancel link: the current step's cancel path, else the
    /// persisted record, else the current user
    pub fn resolve_cancel_url(&self, state: &StepSessionState, record: &dyn Record) -> Url {
        if let Some(path) = state.current().and_then(|step| step.settings.cancel_path()) {
            return resolve_template(path, record, self.tokens.as_ref());
        }
        if let Some(id) = record.id() {
            return Url::canonical(record.entity_type_id(), &id);
        }
        Url::route("entity.user.canonical", "user", self.actor.id().to_string())
    }

    /// Route the primary button through the step transition. Only the
    /// confirmation handler survives, and only on the last step.
    pub fn install_submit_handlers(&self, state: &StepSessionState, form: &mut FormTree) {
        if let Some(submit) = form.actions.submit.as_mut() {
            submit
                .handlers
                .retain(|handler| state.is_last && handler == CONFIRMATION_HANDLER);
            submit.handlers.insert(0, STEPS_HANDLER.to_string());
        }
    }

    /// Rewrite a freshly built form for the session's current step.
    ///
    /// Returns the step state the form was rendered for, or `None` when
    /// steps do not apply to the form.
    pub fn alter_form<F: RecordForm>(
        &self,
        form: &mut FormTree,
        session: &FormSession,
        layout: &LayoutConfig,
        form_object: &F,
    ) -> Result<Option<StepSessionState>, StepsError> {
        if !self.config.applies_to(form_object.operation()) {
            debug!(operation = form_object.operation(), "Operation without steps");
            return Ok(None);
        }
        let record = form_object.record();

        if self.config.mark_unsaved && session.has_state()? {
            form.attributes
                .insert(UNSAVED_ATTRIBUTE.to_string(), Value::Bool(true));
        }

        let Some(state) = self.initialize(session, layout, record)? else {
            return Ok(None);
        };
        if state.current().is_none() {
            warn!(
                session = %session.id().0,
                current_step = %state.current_step,
                "Current step missing from step state"
            );
            return Ok(None);
        }

        self.apply_visibility_and_validation(&state, form);
        self.compute_header_and_actions(&state, session, record, form)?;
        self.install_submit_handlers(&state, form);

        Ok(Some(state))
    }

    /// Handle a submission of a multi-step form.
    ///
    /// Moves the cursor for navigation triggers and persists the record
    /// exactly once when the primary button is pressed on the last step.
    /// Completion ends the session: its stored data is discarded, so a
    /// repeated submission of the same session finds no step state.
    /// Returns the updated state, or `None` when the session has no usable
    /// step state.
    pub fn submit_transition<F: RecordForm>(
        &self,
        session: &mut FormSession,
        form: &FormTree,
        submission: &Submission,
        form_object: &mut F,
    ) -> Result<Option<StepSessionState>, StepsError> {
        let Some(mut state) = session.load_state()? else {
            debug!(session = %session.id().0, "No step state for submission");
            return Ok(None);
        };
        if state.position().is_none() {
            warn!(
                session = %session.id().0,
                current_step = %state.current_step,
                "Current step missing from step state"
            );
            return Ok(None);
        }

        session.set_rebuild(true);
        let record = form_object.build_record(form, submission)?;
        form_object.set_record(record);

        self.registry
            .alter_state(&mut state, session, submission, form_object.record())?;

        let Some(cursor) = state.position() else {
            warn!(
                session = %session.id().0,
                current_step = %state.current_step,
                "Extension hooks moved the current step out of the step state"
            );
            return Ok(None);
        };

        let target = match submission.action() {
            NavigationAction::Previous => cursor.saturating_sub(1),
            NavigationAction::Submit if !state.is_last => cursor + 1,
            NavigationAction::Submit => {
                self.complete(session, form, submission, form_object)?;
                return Ok(Some(state));
            }
            NavigationAction::Other(trigger) => {
                debug!(trigger = %trigger, "Submission without navigation");
                cursor
            }
        };

        state.move_to(target);
        session.save_state(&state)?;

        debug!(
            session = %session.id().0,
            current_step = %state.current_step,
            "Step transition"
        );
        Ok(Some(state))
    }

    fn complete<F: RecordForm>(
        &self,
        session: &mut FormSession,
        form: &FormTree,
        submission: &Submission,
        form_object: &mut F,
    ) -> Result<(), StepsError> {
        let original_owner = session.original_owner()?;
        let record = form_object.record_mut();
        if record.has_owner() && record.owner_id().is_none() {
            record.set_owner_id(original_owner);
        }

        form_object.save(form, submission)?;
        session.finish();
        session.discard()?;

        info!(
            session = %session.id().0,
            entity_type = form_object.record().entity_type_id(),
            bundle = form_object.record().bundle(),
            "Completed multi-step form"
        );
        Ok(())
    }
}
