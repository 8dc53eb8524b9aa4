//! Customer portal link extraction from free-text or HTML content.

use super::EscalationDomainError;
use regex::{Regex, RegexBuilder};

/// Tenant domain of the production customer portal.
pub const DEFAULT_PORTAL_TENANT: &str = "swisslife.ch";

/// Finds the customer portal dashboard link inside customer details.
///
/// A link is the literal `https://fuse.portals.{tenant}/dashboard/` prefix
/// followed by one or more characters other than `"` and `)`, so the match
/// stops before an HTML attribute quote or a closing markdown parenthesis.
/// Matching ignores ASCII case. Only the first link is returned.
#[derive(Debug, Clone)]
pub struct PortalLinkExtractor {
    tenant: String,
    pattern: Regex,
}

impl PortalLinkExtractor {
    /// Creates an extractor for the given portal tenant domain.
    ///
    /// # Errors
    ///
    /// Returns [`EscalationDomainError::InvalidPortalTenant`] when the tenant
    /// is empty, contains characters outside a host name, or does not yield
    /// a valid pattern.
    pub fn new(tenant: &str) -> Result<Self, EscalationDomainError> {
        let normalized = tenant.trim().trim_matches('.');
        let is_host = !normalized.is_empty()
            && normalized
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '.');
        if !is_host {
            return Err(EscalationDomainError::InvalidPortalTenant(
                tenant.to_owned(),
            ));
        }

        let source = format!(
            r#"https://fuse\.portals\.{}/dashboard/[^")]+"#,
            regex::escape(normalized)
        );
        let pattern = RegexBuilder::new(&source)
            .case_insensitive(true)
            .build()
            .map_err(|_| EscalationDomainError::InvalidPortalTenant(tenant.to_owned()))?;

        Ok(Self {
            tenant: normalized.to_owned(),
            pattern,
        })
    }

    /// Returns the tenant domain the extractor matches.
    #[must_use]
    pub fn tenant(&self) -> &str {
        &self.tenant
    }

    /// Returns the first portal link in `customer_details`, unmodified.
    ///
    /// Absence of a link is not an error.
    #[must_use]
    pub fn extract<'a>(&self, customer_details: &'a str) -> Option<&'a str> {
        self.pattern
            .find(customer_details)
            .map(|found| found.as_str())
    }
}
