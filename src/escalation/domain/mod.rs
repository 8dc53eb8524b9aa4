//! Domain model for support ticket escalation.
//!
//! The escalation domain derives a second-line issue from a support ticket
//! and describes every store mutation as a patch document, keeping the
//! transport to the work-tracking system outside of the domain boundary.

mod context;
mod error;
pub mod fields;
mod ids;
mod patch;
mod payload;
mod portal_link;
mod state;
mod trigger;
mod work_item;

pub use context::{EscalationContext, MissingEscalationContext, MissingPart};
pub use error::{EscalationDomainError, InvalidEscalationTransition};
pub use ids::{CollectionUrl, EscalationRunId, ProjectName, WorkItemId};
pub use patch::{PatchDocument, PatchOp, PatchOperation};
pub use payload::{EscalationPayload, escalated_title};
pub use portal_link::{DEFAULT_PORTAL_TENANT, PortalLinkExtractor};
pub use state::{EscalationProgress, EscalationState};
pub use trigger::{Notification, TriggerState};
pub use work_item::{Comment, WorkItem, WorkItemRelation};
