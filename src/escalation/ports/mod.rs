//! Port contracts for support ticket escalation.
//!
//! Ports define infrastructure-agnostic interfaces used by escalation
//! services: the remote work item store, the host form, and the trigger UI.

pub mod form;
pub mod store;
pub mod trigger;

pub use form::{FormLifecycle, WorkItemForm, WorkItemFormError, WorkItemFormResult};
pub use store::{WorkItemStore, WorkItemStoreError, WorkItemStoreResult};
pub use trigger::EscalationTrigger;
