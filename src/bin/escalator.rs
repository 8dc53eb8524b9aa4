//! Escalates a support ticket from the command line.
//!
//! Usage:
//!
//! ```text
//! escalator --organization contoso --project CTRM escalate --work-item 100
//! escalator --organization contoso --project CTRM check --work-item 100
//! ```
//!
//! The personal access token is read from `--token` or `AZURE_DEVOPS_PAT`.
//! `escalate` loads the ticket the way the work item form does and only
//! proceeds when the escalation trigger would be visible, unless `--force`
//! is given. Log verbosity follows `RUST_LOG` (default `info`).

use clap::{Parser, Subcommand};
use escalator::config::ConnectionArgs;
use escalator::escalation::{
    adapters::{
        memory::{RecordingTrigger, StaticWorkItemForm},
        rest::AzureDevOpsWorkItemStore,
    },
    domain::{TriggerState, WorkItemId},
    ports::{EscalationTrigger, FormLifecycle, WorkItemStore},
    services::{EscalationFormController, EscalationWorkflow},
};
use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::runtime::Builder;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Parser)]
#[command(name = "escalator", version, about = "Escalate support tickets to second-line issues")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a linked issue from a support ticket and reclassify the ticket.
    Escalate {
        /// Support ticket identifier.
        #[arg(long)]
        work_item: u32,
        /// Escalate even when the ticket is outside the support area path.
        #[arg(long)]
        force: bool,
    },
    /// Report whether the escalation trigger would be shown for a ticket.
    Check {
        /// Support ticket identifier.
        #[arg(long)]
        work_item: u32,
    },
}

fn main() -> Result<ExitCode, BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<ExitCode, BoxError> {
    let config = cli.connection.resolve()?;
    info!(
        collection = %config.store.collection,
        project = %config.project,
        portal_tenant = config.extractor.tenant(),
        "escalator starting"
    );
    let collection = config.store.collection.clone();
    let store = Arc::new(AzureDevOpsWorkItemStore::new(config.store)?);
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Check { work_item } => {
            let ticket = store.get_work_item(WorkItemId::new(work_item)?).await?;
            let state = TriggerState::for_area_path(ticket.area_path());
            let verdict = if state.is_visible() { "visible" } else { "hidden" };
            writeln!(
                stdout,
                "#{work_item}: trigger {verdict} (area path: {})",
                ticket.area_path().unwrap_or_default()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Escalate { work_item, force } => {
            let ticket = store.get_work_item(WorkItemId::new(work_item)?).await?;
            let form = Arc::new(StaticWorkItemForm::showing(&ticket));
            let trigger = Arc::new(RecordingTrigger::new());
            let workflow = EscalationWorkflow::new(Arc::clone(&store), config.extractor);
            let controller = EscalationFormController::new(
                form,
                Arc::clone(&trigger),
                workflow,
                collection,
            );

            controller.on_loaded().await;
            if trigger.current() != Some(TriggerState::Enabled) {
                if !force {
                    writeln!(
                        stdout,
                        "#{work_item} is not a support ticket awaiting escalation; use --force to escalate anyway"
                    )?;
                    return Ok(ExitCode::from(2));
                }
                warn!(work_item, "escalating outside the support area path");
                trigger.show(TriggerState::Enabled);
            }

            let result = controller.on_escalate_click().await;
            for notification in trigger.notifications() {
                writeln!(stdout, "{notification}")?;
            }
            Ok(if result.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}
