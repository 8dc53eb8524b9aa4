//! When steps for escalation BDD scenarios.

use super::world::{EscalationWorld, run_async};
use rstest_bdd_macros::when;

#[when("the user clicks the escalation trigger")]
fn click_escalation_trigger(world: &mut EscalationWorld) -> Result<(), eyre::Report> {
    let controller = world
        .controller
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no work item form is open in scenario world"))?;
    world.last_result = Some(run_async(controller.on_escalate_click()));
    Ok(())
}
