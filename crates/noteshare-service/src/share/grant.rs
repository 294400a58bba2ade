//! Granting note access to the recipient of an accepted share request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::info;

use noteshare_core::config::GrantConfig;
use noteshare_core::error::{AppError, ErrorKind};
use noteshare_core::result::AppResult;

/// Collaborator that gives `grantee_email` access to a note.
#[async_trait]
pub trait AccessGrant: Send + Sync + 'static {
    /// Grant access to `resource_id` for `grantee_email`.
    async fn grant(&self, resource_id: &str, grantee_email: &str) -> AppResult<()>;
}

/// Grant that only records the decision in the log.
///
/// Used when no notes service endpoint is configured.
#[derive(Debug, Clone, Default)]
pub struct NoopAccessGrant;

#[async_trait]
impl AccessGrant for NoopAccessGrant {
    async fn grant(&self, resource_id: &str, grantee_email: &str) -> AppResult<()> {
        info!(resource_id, grantee = grantee_email, "Access grant skipped, no endpoint configured");
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct CollaboratorBody<'a> {
    email: &'a str,
    role: &'a str,
}

/// Grant backed by the notes service collaborator endpoint.
///
/// Issues `POST {endpoint}/notes/{resource_id}/collaborators` with
/// `{"email", "role"}`. Any non-2xx answer is an external service error.
#[derive(Debug, Clone)]
pub struct HttpAccessGrant {
    client: Client,
    endpoint: Url,
    role: String,
}

impl HttpAccessGrant {
    /// Create a grant client for `endpoint`.
    pub fn new(endpoint: &str, role: impl Into<String>, timeout: Duration) -> AppResult<Self> {
        let endpoint = Url::parse(endpoint).map_err(|e| {
            AppError::with_source(
                ErrorKind::Configuration,
                format!("Invalid grant endpoint '{endpoint}'"),
                e,
            )
        })?;
        if endpoint.cannot_be_a_base() {
            return Err(AppError::configuration(format!(
                "Grant endpoint '{endpoint}' cannot carry a path"
            )));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
        })?;

        Ok(Self {
            client,
            endpoint,
            role: role.into(),
        })
    }

    /// Collaborator endpoint for one note.
    fn collaborators_url(&self, resource_id: &str) -> AppResult<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|()| AppError::configuration("Grant endpoint cannot carry a path"))?
            .pop_if_empty()
            .extend(["notes", resource_id, "collaborators"]);
        Ok(url)
    }
}

#[async_trait]
impl AccessGrant for HttpAccessGrant {
    async fn grant(&self, resource_id: &str, grantee_email: &str) -> AppResult<()> {
        let url = self.collaborators_url(resource_id)?;
        let body = CollaboratorBody {
            email: grantee_email,
            role: &self.role,
        };

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    format!("Access grant request for note {resource_id} failed"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Notes service refused access grant for note {resource_id}: {status}"
            )));
        }

        info!(resource_id, grantee = grantee_email, role = %self.role, "Access granted");
        Ok(())
    }
}

/// Build the grant collaborator described by `config`.
pub fn build_access_grant(config: &GrantConfig) -> AppResult<Arc<dyn AccessGrant>> {
    match config.endpoint.as_deref().map(str::trim) {
        Some(endpoint) if !endpoint.is_empty() => Ok(Arc::new(HttpAccessGrant::new(
            endpoint,
            config.role.clone(),
            Duration::from_secs(config.timeout_seconds),
        )?)),
        _ => Ok(Arc::new(NoopAccessGrant)),
    }
}
