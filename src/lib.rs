//! Escalator: support ticket escalation for Azure DevOps.
//!
//! A support ticket filed in the customer support area path can be
//! escalated into a second-line `Issue`. The issue carries a link to the
//! customer's portal dashboard, a back-link to the ticket, the ticket's
//! original description, and a copy of every ticket comment. The ticket is
//! then moved to the second-line area path.
//!
//! # Architecture
//!
//! Escalator follows hexagonal architecture principles:
//!
//! - **Domain**: Payload derivation and escalation state with no I/O
//! - **Ports**: Work item store, host form, and trigger interfaces
//! - **Adapters**: Azure DevOps REST store and in-memory test doubles
//!
//! # Modules
//!
//! - [`escalation`]: Ticket-to-issue escalation workflow and form binding
//! - [`config`]: Command-line and environment configuration

pub mod config;
pub mod escalation;
