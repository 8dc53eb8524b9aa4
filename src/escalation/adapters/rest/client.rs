//! Azure DevOps work item tracking REST adapter.

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode, header};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;
use tracing::{debug, warn};

use super::models::{CommentListResponse, CommentResponse, ErrorResponse, WorkItemResponse};
use crate::escalation::{
    domain::{CollectionUrl, Comment, PatchDocument, ProjectName, WorkItem, WorkItemId},
    ports::{WorkItemStore, WorkItemStoreError, WorkItemStoreResult},
};

const WORK_ITEMS_API_VERSION: &str = "7.1";
const COMMENTS_API_VERSION: &str = "7.1-preview.4";
const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";
const MAX_ERROR_MESSAGE_CHARS: usize = 512;

/// Connection settings for [`AzureDevOpsWorkItemStore`].
#[derive(Clone, PartialEq, Eq)]
pub struct StoreSettings {
    /// Collection base URL, such as `https://dev.azure.com/contoso`.
    pub collection: CollectionUrl,
    /// Personal access token sent with basic authentication.
    pub personal_access_token: String,
    /// Timeout applied to each request.
    pub request_timeout: Duration,
}

impl StoreSettings {
    /// Creates settings with a 30 second request timeout.
    #[must_use]
    pub fn new(collection: CollectionUrl, personal_access_token: impl Into<String>) -> Self {
        Self {
            collection,
            personal_access_token: personal_access_token.into(),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl fmt::Debug for StoreSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StoreSettings")
            .field("collection", &self.collection)
            .field("personal_access_token", &"<redacted>")
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

/// Work item store backed by the Azure DevOps REST API.
///
/// Requests are sent one at a time and never retried.
#[derive(Debug, Clone)]
pub struct AzureDevOpsWorkItemStore {
    http: reqwest::Client,
    settings: StoreSettings,
}

impl AzureDevOpsWorkItemStore {
    /// Creates a store client.
    ///
    /// # Errors
    ///
    /// Returns [`WorkItemStoreError::Transport`] when the HTTP client cannot
    /// be built.
    pub fn new(settings: StoreSettings) -> WorkItemStoreResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::USER_AGENT,
            header::HeaderValue::from_static("escalator"),
        );
        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(settings.request_timeout.max(Duration::from_millis(1)))
            .build()
            .map_err(WorkItemStoreError::transport)?;
        Ok(Self { http, settings })
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn settings(&self) -> &StoreSettings {
        &self.settings
    }

    fn collection_url(&self, path: &str) -> String {
        format!("{}/{path}", self.settings.collection)
    }

    fn project_url(&self, project: &ProjectName, path: &str) -> String {
        format!("{}/{project}/{path}", self.settings.collection)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        request.basic_auth("", Some(&self.settings.personal_access_token))
    }

    fn patch_body(document: &PatchDocument) -> WorkItemStoreResult<Vec<u8>> {
        serde_json::to_vec(document).map_err(WorkItemStoreError::transport)
    }

    async fn send_json<T>(
        &self,
        operation: &'static str,
        subject: Option<WorkItemId>,
        request: RequestBuilder,
    ) -> WorkItemStoreResult<T>
    where
        T: DeserializeOwned,
    {
        let response = self
            .authorize(request)
            .send()
            .await
            .map_err(WorkItemStoreError::transport)?;
        let status = response.status();
        debug!(operation, status = status.as_u16(), "work item store responded");

        if status == StatusCode::NOT_FOUND
            && let Some(id) = subject
        {
            return Err(WorkItemStoreError::NotFound(id));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(WorkItemStoreError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }
        response
            .json::<T>()
            .await
            .map_err(WorkItemStoreError::transport)
    }
}

fn error_message(body: &str) -> String {
    let message = serde_json::from_str::<ErrorResponse>(body)
        .map(|error| error.message)
        .unwrap_or_else(|_| body.trim().to_owned());
    if message.chars().count() <= MAX_ERROR_MESSAGE_CHARS {
        return message;
    }
    let truncated: String = message.chars().take(MAX_ERROR_MESSAGE_CHARS).collect();
    format!("{truncated}...")
}

#[async_trait]
impl WorkItemStore for AzureDevOpsWorkItemStore {
    async fn get_work_item(&self, id: WorkItemId) -> WorkItemStoreResult<WorkItem> {
        let request = self
            .http
            .get(self.collection_url(&format!("_apis/wit/workitems/{id}")))
            .query(&[
                ("$expand", "relations"),
                ("api-version", WORK_ITEMS_API_VERSION),
            ]);
        let response: WorkItemResponse = self.send_json("get work item", Some(id), request).await?;
        response.into_domain()
    }

    async fn create_work_item(
        &self,
        project: &ProjectName,
        type_name: &str,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem> {
        let request = self
            .http
            .post(self.project_url(project, &format!("_apis/wit/workitems/${type_name}")))
            .query(&[("api-version", WORK_ITEMS_API_VERSION)])
            .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .body(Self::patch_body(document)?);
        let response: WorkItemResponse = self.send_json("create work item", None, request).await?;
        response.into_domain()
    }

    async fn update_work_item(
        &self,
        id: WorkItemId,
        document: &PatchDocument,
    ) -> WorkItemStoreResult<WorkItem> {
        let request = self
            .http
            .patch(self.collection_url(&format!("_apis/wit/workitems/{id}")))
            .query(&[("api-version", WORK_ITEMS_API_VERSION)])
            .header(header::CONTENT_TYPE, JSON_PATCH_CONTENT_TYPE)
            .body(Self::patch_body(document)?);
        let response: WorkItemResponse =
            self.send_json("update work item", Some(id), request).await?;
        response.into_domain()
    }

    async fn get_comments(
        &self,
        project: &ProjectName,
        id: WorkItemId,
    ) -> WorkItemStoreResult<Vec<Comment>> {
        let url = self.project_url(project, &format!("_apis/wit/workItems/{id}/comments"));
        let mut comments = Vec::new();
        let mut continuation: Option<String> = None;
        loop {
            let mut request = self
                .http
                .get(&url)
                .query(&[("order", "asc"), ("api-version", COMMENTS_API_VERSION)]);
            if let Some(token) = continuation.as_deref() {
                request = request.query(&[("continuationToken", token)]);
            }
            let page: CommentListResponse =
                self.send_json("list comments", Some(id), request).await?;
            comments.extend(
                page.comments
                    .into_iter()
                    .filter(|comment| !comment.is_deleted)
                    .map(CommentResponse::into_domain),
            );
            match page.continuation_token {
                Some(token) if continuation.as_deref() == Some(token.as_str()) => {
                    warn!(work_item_id = %id, "comment listing repeated its continuation token");
                    break;
                }
                Some(token) if !token.is_empty() => continuation = Some(token),
                _ => break,
            }
        }
        Ok(comments)
    }
}
