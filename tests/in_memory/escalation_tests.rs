//! End-to-end escalation through the form controller and in-memory store.

use super::helpers::{
    TICKET_ID, TestStore, controller_for, runtime, seed_ticket, store, work_item_id,
};
use escalator::escalation::{
    adapters::memory::{RecordingTrigger, StoreOperation},
    domain::{Notification, TriggerState, fields},
    ports::FormLifecycle,
};
use rstest::rstest;
use std::io;
use std::sync::Arc;
use tokio::runtime::Runtime;

#[rstest]
fn escalation_produces_linked_issue_with_history(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let ticket = seed_ticket(&store)?;
    let trigger = Arc::new(RecordingTrigger::new());
    let controller = controller_for(&store, &ticket, &trigger)?;

    rt.block_on(controller.on_loaded());
    let outcome = rt.block_on(controller.on_escalate_click())?;

    let issue = store
        .peek(outcome.issue_id)?
        .ok_or_else(|| eyre::eyre!("created issue missing from store"))?;
    eyre::ensure!(
        issue.title() == "Escalated from #100: Printer issue",
        "unexpected title {}",
        issue.title()
    );
    eyre::ensure!(
        issue.area_path() == Some(fields::SECOND_LINE_AREA_PATH),
        "issue filed in the wrong area path"
    );
    let description = issue.description();
    eyre::ensure!(
        description.starts_with(
            "<p><a href=\"https://fuse.portals.swisslife.ch/dashboard/cust/55\" target=\"_blank\">"
        ),
        "portal link block missing: {description}"
    );
    eyre::ensure!(
        description.contains(
            "<a href=\"https://dev.azure.com/contoso/CTRM/_workitems/edit/100\" target=\"_blank\">#100</a>"
        ),
        "backlink missing: {description}"
    );
    eyre::ensure!(
        description.ends_with("<p>Original Description:</p>\n<p>broken</p>"),
        "original description not appended verbatim: {description}"
    );

    let parent = issue
        .relations()
        .first()
        .ok_or_else(|| eyre::eyre!("issue has no parent relation"))?;
    eyre::ensure!(parent.rel == fields::HIERARCHY_REVERSE, "wrong relation kind");
    eyre::ensure!(
        parent.url == "https://dev.azure.com/contoso/CTRM/_apis/wit/workItems/100",
        "wrong parent URL {}",
        parent.url
    );

    let history: Vec<String> = store
        .peek_comments(outcome.issue_id)?
        .into_iter()
        .map(|comment| comment.text)
        .collect();
    eyre::ensure!(
        history
            == vec![
                "<p>Customer reports a jam.</p>".to_owned(),
                "<p>Called back, no answer.</p>".to_owned(),
            ],
        "comments not copied oldest first: {history:?}"
    );

    let reclassified = store
        .peek(work_item_id(TICKET_ID)?)?
        .ok_or_else(|| eyre::eyre!("ticket missing from store"))?;
    eyre::ensure!(
        reclassified.area_path() == Some(fields::SECOND_LINE_AREA_PATH),
        "ticket was not reclassified"
    );
    eyre::ensure!(
        trigger.notifications() == vec![Notification::Escalated(outcome.issue_id)],
        "unexpected notifications {:?}",
        trigger.notifications()
    );
    Ok(())
}

#[rstest]
fn reclassified_ticket_no_longer_shows_trigger(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let ticket = seed_ticket(&store)?;
    let first_trigger = Arc::new(RecordingTrigger::new());
    let controller = controller_for(&store, &ticket, &first_trigger)?;
    rt.block_on(controller.on_loaded());
    rt.block_on(controller.on_escalate_click())?;

    let reloaded = store
        .peek(work_item_id(TICKET_ID)?)?
        .ok_or_else(|| eyre::eyre!("ticket missing from store"))?;
    let second_trigger = Arc::new(RecordingTrigger::new());
    let reopened = controller_for(&store, &reloaded, &second_trigger)?;
    rt.block_on(reopened.on_loaded());

    eyre::ensure!(
        second_trigger.current() == Some(TriggerState::Hidden),
        "trigger still shown after reclassification"
    );
    Ok(())
}

#[rstest]
fn comment_copy_failure_keeps_ticket_in_support(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let ticket = seed_ticket(&store)?;
    store.fail_on(StoreOperation::Update)?;
    let trigger = Arc::new(RecordingTrigger::new());
    let controller = controller_for(&store, &ticket, &trigger)?;

    rt.block_on(controller.on_loaded());
    let err = rt
        .block_on(controller.on_escalate_click())
        .err()
        .ok_or_else(|| eyre::eyre!("escalation unexpectedly succeeded"))?;

    let issue_id = err
        .created_issue()
        .ok_or_else(|| eyre::eyre!("partial failure should name the created issue"))?;
    eyre::ensure!(
        store.peek_comments(issue_id)?.is_empty(),
        "no comment should have been copied"
    );
    let unchanged = store
        .peek(work_item_id(TICKET_ID)?)?
        .ok_or_else(|| eyre::eyre!("ticket missing from store"))?;
    eyre::ensure!(
        unchanged.area_path() == Some(fields::SUPPORT_AREA_PATH),
        "ticket must stay in the support area path"
    );
    eyre::ensure!(
        trigger.notifications() == vec![Notification::Failed],
        "user should see the generic failure message"
    );
    eyre::ensure!(
        trigger.current() == Some(TriggerState::Enabled),
        "trigger should be re-enabled for retry"
    );
    Ok(())
}
