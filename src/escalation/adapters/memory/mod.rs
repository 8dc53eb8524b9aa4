//! In-memory adapters for escalation tests and local runs.

mod form;
mod store;
mod trigger;

pub use form::StaticWorkItemForm;
pub use store::{InMemoryWorkItemStore, StoreCall, StoreOperation};
pub use trigger::RecordingTrigger;
