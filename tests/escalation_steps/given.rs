//! Given steps for escalation BDD scenarios.

use super::world::EscalationWorld;
use chrono::{Duration, TimeZone, Utc};
use escalator::escalation::{
    adapters::memory::StaticWorkItemForm,
    domain::{Comment, WorkItem, WorkItemId, fields},
};
use eyre::WrapErr;
use rstest_bdd_macros::given;

fn ticket_in(id: u32, title: String, area_path: &str) -> Result<WorkItem, eyre::Report> {
    let ticket_id = WorkItemId::new(id).wrap_err("construct ticket id")?;
    Ok(WorkItem::new(ticket_id)
        .with_field(fields::TITLE, title)
        .with_field(fields::DESCRIPTION, "<p>Printer jams on every job.</p>")
        .with_field(fields::TEAM_PROJECT, "CTRM")
        .with_field(fields::AREA_PATH, area_path))
}

#[given(r#"a support ticket #{id:u32} titled "{title}" in the support area path"#)]
fn support_ticket(world: &mut EscalationWorld, id: u32, title: String) -> Result<(), eyre::Report> {
    world.ticket = Some(ticket_in(id, title, fields::SUPPORT_AREA_PATH)?);
    Ok(())
}

#[given(r#"a support ticket #{id:u32} titled "{title}" in the second-line area path"#)]
fn second_line_ticket(
    world: &mut EscalationWorld,
    id: u32,
    title: String,
) -> Result<(), eyre::Report> {
    world.ticket = Some(ticket_in(id, title, fields::SECOND_LINE_AREA_PATH)?);
    Ok(())
}

#[given(r#"the customer details link to "{url}""#)]
fn customer_details_link(world: &mut EscalationWorld, url: String) -> Result<(), eyre::Report> {
    let ticket = world
        .ticket
        .take()
        .ok_or_else(|| eyre::eyre!("missing ticket in scenario world"))?;
    world.ticket = Some(ticket.with_field(
        fields::CUSTOMER_DETAILS,
        format!(r#"<div><a href="{url}">Open customer</a></div>"#),
    ));
    Ok(())
}

#[given("the ticket has {count:usize} comments")]
fn ticket_comments(world: &mut EscalationWorld, count: usize) -> Result<(), eyre::Report> {
    let start = Utc
        .with_ymd_and_hms(2024, 3, 1, 9, 0, 0)
        .single()
        .ok_or_else(|| eyre::eyre!("invalid start timestamp"))?;
    world.comments = (1..=count)
        .rev()
        .map(|n| {
            let offset = i64::try_from(n).wrap_err("comment offset")?;
            let id = u64::try_from(n).wrap_err("comment id")?;
            Ok(Comment::new(
                id,
                format!("<p>Comment {n}</p>"),
                start + Duration::minutes(offset),
            ))
        })
        .collect::<Result<_, eyre::Report>>()?;
    Ok(())
}

#[given("the store rejects reclassification")]
fn store_rejects_reclassification(world: &mut EscalationWorld) -> Result<(), eyre::Report> {
    let reclassify_call = world.comments.len() + 1;
    world
        .store
        .fail_update_call(reclassify_call, "TF401320: Rule Error for field Area Path.")
        .wrap_err("inject reclassification failure")?;
    Ok(())
}

#[given("the ticket is open in the work item form")]
fn ticket_open_in_form(world: &mut EscalationWorld) -> Result<(), eyre::Report> {
    let ticket = world
        .ticket
        .clone()
        .ok_or_else(|| eyre::eyre!("missing ticket in scenario world"))?;
    world
        .store
        .insert(ticket.clone(), world.comments.clone())
        .wrap_err("seed support ticket")?;
    world.open_form(StaticWorkItemForm::showing(&ticket))
}

#[given("an unsaved work item in the support area path")]
fn unsaved_work_item(world: &mut EscalationWorld) -> Result<(), eyre::Report> {
    world.open_form(
        StaticWorkItemForm::new(0)
            .with_field(fields::TEAM_PROJECT, "CTRM")
            .with_field(fields::AREA_PATH, fields::SUPPORT_AREA_PATH),
    )
}
