//! Shared world state for escalation BDD scenarios.

use std::sync::Arc;

use escalator::escalation::{
    adapters::memory::{InMemoryWorkItemStore, RecordingTrigger, StaticWorkItemForm},
    domain::{CollectionUrl, Comment, DEFAULT_PORTAL_TENANT, PortalLinkExtractor, WorkItem},
    ports::FormLifecycle,
    services::{EscalationFormController, EscalationOutcome, EscalationResult, EscalationWorkflow},
};
use mockable::DefaultClock;
use rstest::fixture;

/// Store type used by the BDD world.
pub type TestStore = InMemoryWorkItemStore<DefaultClock>;

/// Controller type used by the BDD world.
pub type TestController =
    EscalationFormController<StaticWorkItemForm, RecordingTrigger, TestStore>;

/// Scenario world for escalation behaviour tests.
pub struct EscalationWorld {
    pub store: TestStore,
    pub trigger: Arc<RecordingTrigger>,
    pub ticket: Option<WorkItem>,
    pub comments: Vec<Comment>,
    pub controller: Option<TestController>,
    pub last_result: Option<EscalationResult<EscalationOutcome>>,
}

impl EscalationWorld {
    /// Creates a world with an empty store and no open form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: InMemoryWorkItemStore::new(DefaultClock),
            trigger: Arc::new(RecordingTrigger::new()),
            ticket: None,
            comments: Vec::new(),
            controller: None,
            last_result: None,
        }
    }

    /// Opens `form` in a new controller and delivers the loaded event.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection URL or portal tenant is invalid.
    pub fn open_form(&mut self, form: StaticWorkItemForm) -> Result<(), eyre::Report> {
        let workflow = EscalationWorkflow::new(
            Arc::new(self.store.clone()),
            PortalLinkExtractor::new(DEFAULT_PORTAL_TENANT)?,
        );
        let controller = EscalationFormController::new(
            Arc::new(form),
            Arc::clone(&self.trigger),
            workflow,
            CollectionUrl::for_organization("contoso")?,
        );
        run_async(controller.on_loaded());
        self.controller = Some(controller);
        Ok(())
    }
}

impl Default for EscalationWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> EscalationWorld {
    EscalationWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
