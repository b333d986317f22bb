//! Request-by-request driver shared by the integration tests.
//!
//! Every call opens the session again from the shared store and builds a
//! fresh form and form object, the way a host handles separate requests.

#![allow(dead_code)]

use std::sync::Arc;

use formsteps_core::{
    ExtensionRegistry, FormSession, FormSessionId, FormStateStore, FormTree, LayoutConfig,
    RecordTokenReplacer, StepSession, StepSessionState, StepsConfig, StepsError, Submission,
};
use formsteps_state_inmemory::InMemoryFormStateStore;
use formsteps_test_utils::data_generators::article_form;
use formsteps_test_utils::{init_test_tracing, FixedActor, SaveLog, TestRecord, TestRecordForm};

pub const ACTOR_ID: u64 = 31;

pub struct Harness {
    pub steps: StepSession,
    pub store: Arc<InMemoryFormStateStore>,
    pub session_id: FormSessionId,
    pub layout: LayoutConfig,
    pub record: TestRecord,
    pub log: SaveLog,
    pub form: fn() -> FormTree,
    pub clear_owner_on_build: bool,
}

impl Harness {
    pub fn new(registry: ExtensionRegistry, layout: LayoutConfig, record: TestRecord) -> Self {
        init_test_tracing();
        let store = Arc::new(InMemoryFormStateStore::new());
        let session_id = FormSession::new(store.clone()).id().clone();
        Self {
            steps: StepSession::new(
                Arc::new(registry),
                Arc::new(RecordTokenReplacer),
                Arc::new(FixedActor(ACTOR_ID)),
                StepsConfig::default(),
            ),
            store,
            session_id,
            layout,
            record,
            log: SaveLog::new(),
            form: article_form,
            clear_owner_on_build: false,
        }
    }

    pub fn session(&self) -> FormSession {
        let store: Arc<dyn FormStateStore> = self.store.clone();
        FormSession::resume(self.session_id.clone(), store)
    }

    pub fn form_object(&self) -> TestRecordForm {
        let form = TestRecordForm::new(self.record.clone(), self.log.clone());
        if self.clear_owner_on_build {
            form.clearing_owner_on_build()
        } else {
            form
        }
    }

    /// Build and alter the form for the next request
    pub fn try_render(&self) -> Result<(FormTree, Option<StepSessionState>), StepsError> {
        let mut form = (self.form)();
        let state = self
            .steps
            .alter_form(&mut form, &self.session(), &self.layout, &self.form_object())?;
        Ok((form, state))
    }

    pub fn render(&self) -> (FormTree, Option<StepSessionState>) {
        self.try_render().expect("form should render")
    }

    /// Render the form, then submit it through the given control
    pub fn try_submit(
        &mut self,
        submission: Submission,
    ) -> Result<(Option<StepSessionState>, FormSession), StepsError> {
        let (form, _) = self.try_render()?;
        let mut session = self.session();
        let mut form_object = self.form_object();
        let state = self
            .steps
            .submit_transition(&mut session, &form, &submission, &mut form_object)?;
        self.record = form_object.into_record();
        Ok((state, session))
    }

    pub fn submit(&mut self, submission: Submission) -> (StepSessionState, FormSession) {
        let (state, session) = self.try_submit(submission).expect("submission should succeed");
        (state.expect("steps should be active"), session)
    }

    pub fn stored_state(&self) -> Option<StepSessionState> {
        self.session().load_state().expect("state should load")
    }
}
