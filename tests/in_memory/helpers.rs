//! Shared test helpers for in-memory escalation integration tests.

use chrono::{DateTime, TimeZone, Utc};
use escalator::escalation::{
    adapters::memory::{InMemoryWorkItemStore, RecordingTrigger, StaticWorkItemForm},
    domain::{
        CollectionUrl, Comment, DEFAULT_PORTAL_TENANT, PortalLinkExtractor, WorkItem, WorkItemId,
        fields,
    },
    services::{EscalationFormController, EscalationWorkflow},
};
use mockable::DefaultClock;
use rstest::fixture;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

/// Store type used across in-memory integration tests.
pub type TestStore = InMemoryWorkItemStore<DefaultClock>;

/// Controller type used across in-memory integration tests.
pub type TestController =
    EscalationFormController<StaticWorkItemForm, RecordingTrigger, TestStore>;

/// Identifier of the seeded support ticket.
pub const TICKET_ID: u32 = 100;

/// Customer details blob holding a portal dashboard link.
pub const CUSTOMER_DETAILS: &str = concat!(
    r#"<div>Customer: ACME AG</div>"#,
    r#"<div><a href="https://fuse.portals.swisslife.ch/dashboard/cust/55">Open in Fuse</a></div>"#,
);

/// Provides a tokio runtime for async operations in tests.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created.
#[fixture]
pub fn runtime() -> io::Result<Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// Provides an empty in-memory store.
#[fixture]
pub fn store() -> TestStore {
    InMemoryWorkItemStore::new(DefaultClock)
}

/// Builds a work item identifier.
///
/// # Errors
///
/// Returns an error when `value` is zero.
pub fn work_item_id(value: u32) -> Result<WorkItemId, eyre::Report> {
    Ok(WorkItemId::new(value)?)
}

/// Builds a comment timestamp on a fixed day.
///
/// # Errors
///
/// Returns an error when `hour` is out of range.
pub fn at(hour: u32) -> Result<DateTime<Utc>, eyre::Report> {
    Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid hour {hour}"))
}

/// Builds the support ticket used by most scenarios.
///
/// # Errors
///
/// Returns an error when the ticket identifier is invalid.
pub fn support_ticket() -> Result<WorkItem, eyre::Report> {
    Ok(WorkItem::new(work_item_id(TICKET_ID)?)
        .with_field(fields::TITLE, "Printer issue")
        .with_field(fields::DESCRIPTION, "<p>broken</p>")
        .with_field(fields::AREA_PATH, fields::SUPPORT_AREA_PATH)
        .with_field(fields::TEAM_PROJECT, "CTRM")
        .with_field(fields::CUSTOMER_DETAILS, CUSTOMER_DETAILS))
}

/// Seeds the support ticket with two comments, newest first.
///
/// # Errors
///
/// Returns an error if the store cannot be seeded.
pub fn seed_ticket(store: &TestStore) -> Result<WorkItem, eyre::Report> {
    let ticket = support_ticket()?;
    store.insert(
        ticket.clone(),
        vec![
            Comment::new(11, "<p>Called back, no answer.</p>", at(15)?),
            Comment::new(10, "<p>Customer reports a jam.</p>", at(9)?),
        ],
    )?;
    Ok(ticket)
}

/// Builds a controller over `store` for a form showing `ticket`.
///
/// # Errors
///
/// Returns an error if the collection URL or portal tenant is invalid.
pub fn controller_for(
    store: &TestStore,
    ticket: &WorkItem,
    trigger: &Arc<RecordingTrigger>,
) -> Result<TestController, eyre::Report> {
    let workflow = EscalationWorkflow::new(
        Arc::new(store.clone()),
        PortalLinkExtractor::new(DEFAULT_PORTAL_TENANT)?,
    );
    Ok(EscalationFormController::new(
        Arc::new(StaticWorkItemForm::showing(ticket)),
        Arc::clone(trigger),
        workflow,
        CollectionUrl::for_organization("contoso")?,
    ))
}
