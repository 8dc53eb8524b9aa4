//! In-memory store behaviour relied on by the escalation workflow.

use super::helpers::{TestStore, at, runtime, store, work_item_id};
use escalator::escalation::{
    adapters::memory::{StoreCall, StoreOperation},
    domain::{
        Comment, PatchDocument, PatchOperation, ProjectName, WorkItem, WorkItemRelation, fields,
    },
    ports::{WorkItemStore, WorkItemStoreError},
};
use rstest::rstest;
use std::io;
use tokio::runtime::Runtime;

#[rstest]
fn created_ids_follow_seeded_ids(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    store.insert(WorkItem::new(work_item_id(41)?), Vec::new())?;
    let project = ProjectName::new("CTRM")?;

    let created = rt.block_on(store.create_work_item(
        &project,
        fields::ISSUE_TYPE,
        &PatchDocument::new().with(PatchOperation::add_field(fields::TITLE, "T")),
    ))?;

    eyre::ensure!(created.id() == work_item_id(42)?, "unexpected id {}", created.id());
    eyre::ensure!(created.title() == "T", "title not applied");
    eyre::ensure!(
        created.field_str(fields::TEAM_PROJECT) == Some("CTRM"),
        "project not recorded"
    );
    Ok(())
}

#[rstest]
fn history_updates_append_comments(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let id = work_item_id(7)?;
    store.insert(WorkItem::new(id), vec![Comment::new(3, "seeded", at(8)?)])?;

    rt.block_on(store.update_work_item(id, &PatchDocument::history_entry("appended")))?;

    let comments = rt.block_on(store.get_comments(&ProjectName::new("CTRM")?, id))?;
    let texts: Vec<&str> = comments.iter().map(|comment| comment.text.as_str()).collect();
    eyre::ensure!(texts == vec!["seeded", "appended"], "unexpected comments {texts:?}");
    eyre::ensure!(
        comments.last().map(|comment| comment.id) == Some(4),
        "comment ids should continue after seeded ids"
    );
    let stored = store
        .peek(id)?
        .ok_or_else(|| eyre::eyre!("work item missing"))?;
    eyre::ensure!(
        stored.field(fields::HISTORY).is_none(),
        "history is not a stored field"
    );
    Ok(())
}

#[rstest]
fn relations_are_appended(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let id = work_item_id(7)?;
    store.insert(WorkItem::new(id), Vec::new())?;
    let relation = WorkItemRelation::hierarchy_reverse("https://host/p/_apis/wit/workItems/1");

    let updated = rt.block_on(store.update_work_item(
        id,
        &PatchDocument::new().with(PatchOperation::add_relation(&relation)),
    ))?;

    eyre::ensure!(updated.relations() == [relation], "relation not appended");
    Ok(())
}

#[rstest]
fn unknown_work_items_are_not_found(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let id = work_item_id(9)?;

    let read = rt.block_on(store.get_work_item(id));
    let update = rt.block_on(store.update_work_item(id, &PatchDocument::reclassify("A")));

    eyre::ensure!(
        matches!(read, Err(WorkItemStoreError::NotFound(missing)) if missing == id),
        "read should report not found"
    );
    eyre::ensure!(
        matches!(update, Err(WorkItemStoreError::NotFound(missing)) if missing == id),
        "update should report not found"
    );
    Ok(())
}

#[rstest]
fn injected_failures_are_journaled(
    runtime: io::Result<Runtime>,
    store: TestStore,
) -> Result<(), eyre::Report> {
    let rt = runtime?;
    let id = work_item_id(7)?;
    store.insert(WorkItem::new(id), Vec::new())?;
    store.fail_on(StoreOperation::ListComments)?;
    let project = ProjectName::new("Other")?;

    let listed = rt.block_on(store.get_comments(&project, id));

    eyre::ensure!(
        matches!(listed, Err(WorkItemStoreError::Transport(_))),
        "listing should fail with a transport error"
    );
    eyre::ensure!(
        store.journal()?
            == vec![StoreCall::ListComments {
                project: "Other".to_owned(),
                id,
            }],
        "failed call should still be journaled with its project"
    );
    Ok(())
}
