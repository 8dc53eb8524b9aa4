//! Command-line and environment configuration.
//!
//! Every value can be given as a flag or through its environment variable.
//! Settings are validated before any request is sent.

use crate::escalation::{
    adapters::rest::StoreSettings,
    domain::{
        CollectionUrl, DEFAULT_PORTAL_TENANT, EscalationDomainError, PortalLinkExtractor,
        ProjectName,
    },
};
use clap::Args;
use std::time::Duration;
use thiserror::Error;

/// Connection options shared by all commands.
#[derive(Clone, Args)]
pub struct ConnectionArgs {
    /// Azure DevOps organization name, used to build the cloud collection
    /// URL.
    #[arg(long, env = "AZURE_DEVOPS_ORG")]
    pub organization: Option<String>,

    /// Explicit collection URL; takes precedence over the organization.
    #[arg(long, env = "AZURE_DEVOPS_COLLECTION_URL")]
    pub collection_url: Option<String>,

    /// Personal access token with work item read and write scope.
    #[arg(long, env = "AZURE_DEVOPS_PAT", hide_env_values = true)]
    pub token: String,

    /// Team project of the support tickets. Each escalation files its issue
    /// and lists comments in the ticket's own project.
    #[arg(long, env = "AZURE_DEVOPS_PROJECT")]
    pub project: String,

    /// Customer portal tenant domain used for link extraction.
    #[arg(long, env = "ESCALATOR_PORTAL_TENANT", default_value = DEFAULT_PORTAL_TENANT)]
    pub portal_tenant: String,

    /// Per-request timeout in milliseconds.
    #[arg(long, env = "ESCALATOR_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct EscalatorConfig {
    /// REST store connection settings.
    pub store: StoreSettings,
    /// Team project of the support tickets.
    pub project: ProjectName,
    /// Customer portal link extractor.
    pub extractor: PortalLinkExtractor,
}

/// Errors raised while validating configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Neither an organization nor a collection URL was provided.
    #[error("either --organization or --collection-url must be set")]
    MissingCollection,

    /// The access token is blank.
    #[error("personal access token must not be empty")]
    EmptyToken,

    /// A value failed domain validation.
    #[error(transparent)]
    Invalid(#[from] EscalationDomainError),
}

impl ConnectionArgs {
    /// Validates the options into runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the collection cannot be determined, the
    /// token is blank, or a value is malformed.
    pub fn resolve(&self) -> Result<EscalatorConfig, ConfigError> {
        let collection = match (self.collection_url.as_deref(), self.organization.as_deref()) {
            (Some(url), _) => CollectionUrl::new(url)?,
            (None, Some(organization)) => CollectionUrl::for_organization(organization)?,
            (None, None) => return Err(ConfigError::MissingCollection),
        };
        let token = self.token.trim();
        if token.is_empty() {
            return Err(ConfigError::EmptyToken);
        }
        let project = ProjectName::new(self.project.as_str())?;
        let extractor = PortalLinkExtractor::new(&self.portal_tenant)?;

        let store = StoreSettings::new(collection, token)
            .with_request_timeout(Duration::from_millis(self.timeout_ms));
        Ok(EscalatorConfig {
            store,
            project,
            extractor,
        })
    }
}
