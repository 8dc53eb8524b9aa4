//! Derivation of the new issue from the source ticket.

use super::{
    EscalationContext, PatchDocument, PatchOperation, PortalLinkExtractor, WorkItem,
    WorkItemRelation, fields,
};

/// Field values and parent link for the issue created by an escalation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationPayload {
    title: String,
    area_path: String,
    description: String,
    parent: WorkItemRelation,
    portal_link: Option<String>,
}

impl EscalationPayload {
    /// Derives the issue payload from a source ticket.
    ///
    /// This step performs no I/O. The original description is embedded as
    /// opaque HTML without reparsing.
    #[must_use]
    pub fn derive(
        ticket: &WorkItem,
        context: &EscalationContext,
        extractor: &PortalLinkExtractor,
    ) -> Self {
        let portal_link = extractor
            .extract(ticket.customer_details())
            .map(ToOwned::to_owned);
        let description = compose_description(
            portal_link.as_deref(),
            &context.ticket_edit_url(),
            context.work_item_id().value(),
            ticket.description(),
        );

        Self {
            title: escalated_title(context.work_item_id().value(), ticket.title()),
            area_path: fields::SECOND_LINE_AREA_PATH.to_owned(),
            description,
            parent: WorkItemRelation::hierarchy_reverse(context.ticket_api_url()),
            portal_link,
        }
    }

    /// Returns the issue title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the issue area path.
    #[must_use]
    pub fn area_path(&self) -> &str {
        &self.area_path
    }

    /// Returns the composed description HTML.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the relation pointing back at the source ticket.
    #[must_use]
    pub const fn parent(&self) -> &WorkItemRelation {
        &self.parent
    }

    /// Returns the customer portal link found in the ticket, if any.
    #[must_use]
    pub fn portal_link(&self) -> Option<&str> {
        self.portal_link.as_deref()
    }

    /// Builds the creation request: title, area path, description, then
    /// the parent relation.
    #[must_use]
    pub fn to_patch_document(&self) -> PatchDocument {
        PatchDocument::new()
            .with(PatchOperation::add_field(fields::TITLE, self.title.as_str()))
            .with(PatchOperation::add_field(
                fields::AREA_PATH,
                self.area_path.as_str(),
            ))
            .with(PatchOperation::add_field(
                fields::DESCRIPTION,
                self.description.as_str(),
            ))
            .with(PatchOperation::add_relation(&self.parent))
    }
}

/// Title of the escalated issue: `Escalated from #{id}: {title}`.
#[must_use]
pub fn escalated_title(ticket_id: u32, ticket_title: &str) -> String {
    format!("Escalated from #{ticket_id}: {ticket_title}")
}

fn compose_description(
    portal_link: Option<&str>,
    ticket_edit_url: &str,
    ticket_id: u32,
    original_description: &str,
) -> String {
    let mut body = String::new();
    if let Some(link) = portal_link {
        body.push_str(&format!(
            "<p><a href=\"{link}\" target=\"_blank\">Show customer in Fuse</a></p>\n"
        ));
    }
    body.push_str(&format!(
        "<p>Escalated from Support Ticket <a href=\"{ticket_edit_url}\" target=\"_blank\">#{ticket_id}</a>.</p>\n"
    ));
    body.push_str("<p>Original Description:</p>\n");
    body.push_str(original_description);
    body
}
