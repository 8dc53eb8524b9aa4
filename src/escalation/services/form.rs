//! Binds the escalation workflow to a host work item form.

use crate::escalation::{
    domain::{CollectionUrl, Notification, TriggerState, fields},
    ports::{
        EscalationTrigger, FormLifecycle, WorkItemForm, WorkItemFormResult, WorkItemStore,
    },
    services::workflow::{EscalationError, EscalationOutcome, EscalationWorkflow},
};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::{debug, error, info};

/// Values captured from the form when it finished loading.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    /// Identifier of the open work item; zero for unsaved items.
    pub work_item_id: Option<u32>,
    /// Team project of the open work item.
    pub project: Option<String>,
    /// Area path of the open work item.
    pub area_path: Option<String>,
}

/// Work item form contribution driving the escalation trigger.
///
/// The controller captures the form context on load and passes it to the
/// workflow explicitly on every click. It does not disable itself: the host
/// must honour the `Busy` trigger state to avoid duplicate escalations.
pub struct EscalationFormController<F, T, S>
where
    F: WorkItemForm,
    T: EscalationTrigger,
    S: WorkItemStore,
{
    form: Arc<F>,
    trigger: Arc<T>,
    workflow: EscalationWorkflow<S>,
    collection: CollectionUrl,
    snapshot: RwLock<FormSnapshot>,
}

impl<F, T, S> EscalationFormController<F, T, S>
where
    F: WorkItemForm,
    T: EscalationTrigger,
    S: WorkItemStore,
{
    /// Creates a controller for one form instance.
    #[must_use]
    pub fn new(
        form: Arc<F>,
        trigger: Arc<T>,
        workflow: EscalationWorkflow<S>,
        collection: CollectionUrl,
    ) -> Self {
        Self {
            form,
            trigger,
            workflow,
            collection,
            snapshot: RwLock::new(FormSnapshot::default()),
        }
    }

    /// Returns the most recently captured form values.
    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.snapshot
            .read()
            .map(|snapshot| snapshot.clone())
            .unwrap_or_default()
    }

    /// Handles a click on the escalation trigger.
    ///
    /// The trigger is busy while the workflow runs, hidden after success,
    /// and enabled again after any failure so the user can retry. Retrying
    /// after a partial failure creates another issue.
    ///
    /// # Errors
    ///
    /// Returns the workflow's [`EscalationError`] after the user has been
    /// notified.
    pub async fn on_escalate_click(&self) -> Result<EscalationOutcome, EscalationError> {
        self.trigger.show(TriggerState::Busy);
        let snapshot = self.snapshot();

        let result = self
            .workflow
            .escalate_from_form(
                snapshot.work_item_id,
                snapshot.project.as_deref(),
                self.collection.clone(),
            )
            .await;

        match &result {
            Ok(outcome) => {
                self.trigger.notify(Notification::Escalated(outcome.issue_id));
                self.trigger.show(TriggerState::Hidden);
            }
            Err(EscalationError::MissingContext(_)) => {
                self.trigger.notify(Notification::MissingContext);
                self.trigger.show(TriggerState::Enabled);
            }
            Err(_) => {
                self.trigger.notify(Notification::Failed);
                self.trigger.show(TriggerState::Enabled);
            }
        }
        result
    }

    async fn capture(&self) -> WorkItemFormResult<FormSnapshot> {
        let work_item_id = self.form.work_item_id().await?;
        let values = self
            .form
            .field_values(&[fields::TEAM_PROJECT, fields::TITLE, fields::AREA_PATH])
            .await?;
        let text = |name: &str| {
            values
                .get(name)
                .and_then(serde_json::Value::as_str)
                .map(ToOwned::to_owned)
        };
        Ok(FormSnapshot {
            work_item_id: Some(work_item_id),
            project: text(fields::TEAM_PROJECT),
            area_path: text(fields::AREA_PATH),
        })
    }
}

#[async_trait]
impl<F, T, S> FormLifecycle for EscalationFormController<F, T, S>
where
    F: WorkItemForm,
    T: EscalationTrigger,
    S: WorkItemStore,
{
    async fn on_loaded(&self) {
        let snapshot = match self.capture().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(error = %err, "failed to load work item form data");
                return;
            }
        };

        let state = TriggerState::for_area_path(snapshot.area_path.as_deref());
        info!(
            work_item_id = ?snapshot.work_item_id,
            area_path = snapshot.area_path.as_deref().unwrap_or_default(),
            visible = state.is_visible(),
            "work item form loaded"
        );
        match self.snapshot.write() {
            Ok(mut current) => *current = snapshot,
            Err(err) => error!(error = %err, "form snapshot lock poisoned"),
        }
        self.trigger.show(state);
    }

    fn on_field_changed(&self, field: &str) {
        debug!(field, "ignoring field change");
    }
}
