//! REST API client for the annotation platform.
//!
//! Wraps the assignment and task endpoints (listing, verdicts, batch task
//! creation) using [`reqwest`]. Every request carries the
//! `Authorization: OAuth <token>` header.

use async_trait::async_trait;
use diagroup_pipeline::platform::{
    Assignment, AssignmentStatus, Platform, PlatformError, TaskSubmission,
};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;

/// Page size requested when listing assignments.
const PAGE_LIMIT: usize = 100;

/// HTTP client for one platform account.
pub struct PlatformClient {
    client: reqwest::Client,
    api_url: String,
    token: String,
}

/// One page of the assignment listing.
#[derive(Debug, Deserialize)]
pub struct AssignmentPage {
    pub items: Vec<Assignment>,
    #[serde(default)]
    pub has_more: bool,
}

/// Body of an assignment verdict (`PATCH /assignments/{id}`).
#[derive(Debug, Serialize)]
struct VerdictBody<'a> {
    status: AssignmentStatus,
    public_comment: &'a str,
}

/// Errors from the platform REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The platform returned a non-2xx status code.
    #[error("Platform API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl From<ClientError> for PlatformError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Request(e) => PlatformError::Request(e.to_string()),
            ClientError::Api { status, body } => PlatformError::Api { status, body },
        }
    }
}

impl PlatformClient {
    /// Build a client from connection settings.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self::with_client(client, config))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            token: config.token.clone(),
        }
    }

    /// List every submitted assignment of a pool, following pagination.
    pub async fn list_submitted(&self, pool_id: &str) -> Result<Vec<Assignment>, ClientError> {
        let mut assignments = Vec::new();
        let mut after: Option<String> = None;

        loop {
            let response = self
                .assignments_request(pool_id, after.as_deref())
                .send()
                .await?;
            let page: AssignmentPage = Self::parse_response(response).await?;

            let has_more = page.has_more && !page.items.is_empty();
            after = page.items.last().map(|a| a.id.clone());
            assignments.extend(page.items);

            if !has_more {
                break;
            }
        }

        tracing::debug!(pool_id, count = assignments.len(), "Fetched submitted assignments");
        Ok(assignments)
    }

    /// Set the final status of an assignment.
    pub async fn set_verdict(
        &self,
        assignment_id: &str,
        status: AssignmentStatus,
        comment: &str,
    ) -> Result<(), ClientError> {
        let response = self
            .verdict_request(assignment_id, status, comment)
            .send()
            .await?;

        Self::check_status(response).await
    }

    /// Create tasks in one batch request.
    pub async fn create_task_batch(
        &self,
        tasks: &[TaskSubmission],
        allow_defaults: bool,
        open_pool: bool,
    ) -> Result<(), ClientError> {
        let response = self
            .create_tasks_request(tasks, allow_defaults, open_pool)
            .send()
            .await?;

        Self::check_status(response).await
    }

    // ---- request builders ----

    fn assignments_request(&self, pool_id: &str, after: Option<&str>) -> reqwest::RequestBuilder {
        let limit = PAGE_LIMIT.to_string();
        let mut query = vec![
            ("pool_id", pool_id),
            ("status", "SUBMITTED"),
            ("sort", "id"),
            ("limit", limit.as_str()),
        ];
        if let Some(id) = after {
            query.push(("id_gt", id));
        }

        self.authorized(self.client.get(self.url("/api/v1/assignments")))
            .query(&query)
    }

    fn verdict_request(
        &self,
        assignment_id: &str,
        status: AssignmentStatus,
        comment: &str,
    ) -> reqwest::RequestBuilder {
        let body = VerdictBody {
            status,
            public_comment: comment,
        };

        self.authorized(
            self.client
                .patch(self.url(&format!("/api/v1/assignments/{assignment_id}"))),
        )
        .json(&body)
    }

    fn create_tasks_request(
        &self,
        tasks: &[TaskSubmission],
        allow_defaults: bool,
        open_pool: bool,
    ) -> reqwest::RequestBuilder {
        self.authorized(self.client.post(self.url("/api/v1/tasks")))
            .query(&[
                ("allow_defaults", allow_defaults),
                ("open_pool", open_pool),
            ])
            .json(tasks)
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder.header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_url, path)
    }

    // ---- response helpers ----

    /// Ensure the response has a success status code.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl Platform for PlatformClient {
    async fn fetch_submitted_assignments(
        &self,
        pool_id: &str,
    ) -> Result<Vec<Assignment>, PlatformError> {
        Ok(self.list_submitted(pool_id).await?)
    }

    async fn accept_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError> {
        Ok(self.set_verdict(id, AssignmentStatus::Accepted, comment).await?)
    }

    async fn reject_assignment(&self, id: &str, comment: &str) -> Result<(), PlatformError> {
        Ok(self.set_verdict(id, AssignmentStatus::Rejected, comment).await?)
    }

    async fn create_tasks(
        &self,
        tasks: &[TaskSubmission],
        allow_defaults: bool,
        open_pool: bool,
    ) -> Result<(), PlatformError> {
        Ok(self
            .create_task_batch(tasks, allow_defaults, open_pool)
            .await?)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
