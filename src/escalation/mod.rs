//! Support ticket escalation.
//!
//! Escalating a support ticket creates a linked second-line issue carrying
//! the customer portal link, a backlink, the original description, and the
//! ticket's comments, then files the ticket under the second-line area path.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
