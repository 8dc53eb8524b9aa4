//! Service layer for escalating a support ticket into a linked issue.

use crate::escalation::{
    domain::{
        CollectionUrl, Comment, EscalationContext, EscalationPayload, EscalationProgress,
        EscalationRunId, EscalationState, MissingEscalationContext, PatchDocument,
        PortalLinkExtractor, ProjectName, WorkItem, WorkItemId, fields,
    },
    ports::{WorkItemStore, WorkItemStoreError},
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{Instrument, debug, error, info, info_span, warn};

/// Service-level errors for an escalation invocation.
///
/// Every error is terminal for the invocation; nothing is retried or rolled
/// back.
#[derive(Debug, Error)]
pub enum EscalationError {
    /// The host did not provide a saved work item and project.
    #[error(transparent)]
    MissingContext(#[from] MissingEscalationContext),

    /// The source ticket could not be read.
    #[error("failed to fetch support ticket {ticket_id}")]
    Fetch {
        /// Source ticket identifier.
        ticket_id: WorkItemId,
        /// Store failure.
        #[source]
        source: WorkItemStoreError,
    },

    /// The issue could not be created; the ticket was left untouched.
    #[error("failed to create issue for support ticket {ticket_id}")]
    Create {
        /// Source ticket identifier.
        ticket_id: WorkItemId,
        /// Store failure.
        #[source]
        source: WorkItemStoreError,
    },

    /// Listing or copying a comment failed after the issue was created.
    #[error(
        "issue {issue_id} was created but copying comments from support ticket {ticket_id} \
         stopped after {copied} comment(s)"
    )]
    CommentCopy {
        /// Source ticket identifier.
        ticket_id: WorkItemId,
        /// Identifier of the issue that was already created.
        issue_id: WorkItemId,
        /// Number of comments copied before the failure.
        copied: usize,
        /// Store failure.
        #[source]
        source: WorkItemStoreError,
    },

    /// The ticket could not be moved to the second-line area path after the
    /// issue was created.
    #[error("issue {issue_id} was created but support ticket {ticket_id} was not reclassified")]
    Update {
        /// Source ticket identifier.
        ticket_id: WorkItemId,
        /// Identifier of the issue that was already created.
        issue_id: WorkItemId,
        /// Store failure.
        #[source]
        source: WorkItemStoreError,
    },
}

impl EscalationError {
    /// Returns the step that was active when the invocation failed.
    #[must_use]
    pub const fn failed_in(&self) -> EscalationState {
        match self {
            Self::MissingContext(_) => EscalationState::Validating,
            Self::Fetch { .. } => EscalationState::Fetching,
            Self::Create { .. } => EscalationState::Creating,
            Self::CommentCopy { .. } => EscalationState::CopyingComments,
            Self::Update { .. } => EscalationState::Reclassifying,
        }
    }

    /// Returns the issue left behind by a partial escalation.
    #[must_use]
    pub const fn created_issue(&self) -> Option<WorkItemId> {
        match self {
            Self::CommentCopy { issue_id, .. } | Self::Update { issue_id, .. } => Some(*issue_id),
            Self::MissingContext(_) | Self::Fetch { .. } | Self::Create { .. } => None,
        }
    }
}

/// Result type for escalation workflow operations.
pub type EscalationResult<T> = Result<T, EscalationError>;

/// Summary of a completed escalation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationOutcome {
    /// Correlation identifier of the invocation.
    pub run_id: EscalationRunId,
    /// Source ticket identifier.
    pub ticket_id: WorkItemId,
    /// Identifier of the created issue.
    pub issue_id: WorkItemId,
    /// Number of comments copied to the issue.
    pub copied_comments: usize,
    /// Customer portal link carried into the issue description.
    pub portal_link: Option<String>,
}

/// Escalation orchestration service.
///
/// Each call to [`EscalationWorkflow::escalate`] is a short-lived,
/// non-resumable sequence of store calls issued one at a time. Concurrent
/// invocations for the same ticket are not guarded against and each creates
/// its own issue.
#[derive(Clone)]
pub struct EscalationWorkflow<S>
where
    S: WorkItemStore,
{
    store: Arc<S>,
    extractor: PortalLinkExtractor,
}

impl<S> EscalationWorkflow<S>
where
    S: WorkItemStore,
{
    /// Creates a new escalation workflow.
    #[must_use]
    pub const fn new(store: Arc<S>, extractor: PortalLinkExtractor) -> Self {
        Self { store, extractor }
    }

    /// Returns the link extractor used to derive issue descriptions.
    #[must_use]
    pub const fn extractor(&self) -> &PortalLinkExtractor {
        &self.extractor
    }

    /// Validates raw host form values and runs the escalation.
    ///
    /// No store call is made when the context is incomplete.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationError::MissingContext`] when the work item id or
    /// project is absent, or any error of [`EscalationWorkflow::escalate`].
    pub async fn escalate_from_form(
        &self,
        work_item_id: Option<u32>,
        project: Option<&str>,
        collection: CollectionUrl,
    ) -> EscalationResult<EscalationOutcome> {
        let context = EscalationContext::from_form(work_item_id, project, collection)
            .inspect_err(|err| warn!(error = %err, "escalation requested without form context"))?;
        self.escalate(&context).await
    }

    /// Escalates the context's support ticket.
    ///
    /// Steps run in strict order: fetch the ticket, derive the payload,
    /// create the issue, copy comments oldest first, then move the ticket to
    /// the second-line area path. The first failure aborts the remaining
    /// steps. Comment copying stops at the first failed copy.
    ///
    /// # Errors
    ///
    /// Returns the [`EscalationError`] variant of the failed step.
    pub async fn escalate(
        &self,
        context: &EscalationContext,
    ) -> EscalationResult<EscalationOutcome> {
        let span = info_span!(
            "escalation",
            run_id = %context.run_id(),
            ticket_id = %context.work_item_id(),
            project = %context.project(),
        );
        let mut progress = EscalationProgress::new();
        let result = self.run_steps(context, &mut progress).instrument(span.clone()).await;

        let _entered = span.enter();
        match &result {
            Ok(outcome) => {
                transition(&mut progress, EscalationState::Succeeded);
                info!(
                    issue_id = %outcome.issue_id,
                    copied_comments = outcome.copied_comments,
                    "support ticket escalated"
                );
            }
            Err(err) => {
                if let Err(invalid) = progress.fail() {
                    error!(error = %invalid, "escalation state machine out of sequence");
                }
                error!(
                    error = %err,
                    cause = ?std::error::Error::source(err).map(ToString::to_string),
                    failed_in = %err.failed_in(),
                    created_issue = ?err.created_issue().map(WorkItemId::value),
                    "support ticket escalation failed"
                );
            }
        }
        result
    }

    async fn run_steps(
        &self,
        context: &EscalationContext,
        progress: &mut EscalationProgress,
    ) -> EscalationResult<EscalationOutcome> {
        let ticket_id = context.work_item_id();
        transition(progress, EscalationState::Validating);

        transition(progress, EscalationState::Fetching);
        let ticket = self
            .store
            .get_work_item(ticket_id)
            .await
            .map_err(|source| EscalationError::Fetch { ticket_id, source })?;
        let payload = EscalationPayload::derive(&ticket, context, &self.extractor);
        debug!(
            portal_link = payload.portal_link().unwrap_or_default(),
            "derived issue payload"
        );

        transition(progress, EscalationState::Creating);
        let issue = self.create_issue(context, &payload).await?;
        let issue_id = issue.id();

        transition(progress, EscalationState::CopyingComments);
        let copied_comments = self.copy_comments(context.project(), ticket_id, issue_id).await?;

        transition(progress, EscalationState::Reclassifying);
        self.store
            .update_work_item(
                ticket_id,
                &PatchDocument::reclassify(fields::SECOND_LINE_AREA_PATH),
            )
            .await
            .map_err(|source| EscalationError::Update {
                ticket_id,
                issue_id,
                source,
            })?;

        Ok(EscalationOutcome {
            run_id: context.run_id(),
            ticket_id,
            issue_id,
            copied_comments,
            portal_link: payload.portal_link().map(ToOwned::to_owned),
        })
    }

    async fn create_issue(
        &self,
        context: &EscalationContext,
        payload: &EscalationPayload,
    ) -> EscalationResult<WorkItem> {
        let issue = self
            .store
            .create_work_item(
                context.project(),
                fields::ISSUE_TYPE,
                &payload.to_patch_document(),
            )
            .await
            .map_err(|source| EscalationError::Create {
                ticket_id: context.work_item_id(),
                source,
            })?;
        info!(issue_id = %issue.id(), "created linked issue");
        Ok(issue)
    }

    async fn copy_comments(
        &self,
        project: &ProjectName,
        ticket_id: WorkItemId,
        issue_id: WorkItemId,
    ) -> EscalationResult<usize> {
        let comment_copy_error = |copied, source| EscalationError::CommentCopy {
            ticket_id,
            issue_id,
            copied,
            source,
        };

        let mut comments: Vec<Comment> = self
            .store
            .get_comments(project, ticket_id)
            .await
            .map_err(|source| comment_copy_error(0, source))?;
        comments.sort_by_key(|comment| comment.created_date);

        for (copied, comment) in comments.iter().enumerate() {
            self.store
                .update_work_item(issue_id, &PatchDocument::history_entry(comment.text.as_str()))
                .await
                .map_err(|source| comment_copy_error(copied, source))?;
            debug!(comment_id = comment.id, "copied comment");
        }
        Ok(comments.len())
    }
}

fn transition(progress: &mut EscalationProgress, target: EscalationState) {
    match progress.advance_to(target) {
        Ok(previous) => debug!(from = %previous, to = %target, "escalation state changed"),
        Err(err) => error!(error = %err, "escalation state machine out of sequence"),
    }
}
