//! HTTP implementation of the accounts API
//!
//! Thin wrapper over `reqwest`: builds the collection URLs, signs every
//! request through the configured [`RequestSigner`], races each call against
//! the caller's cancellation token and maps non-success statuses to
//! [`ClientError::Status`]. No retries and no backoff; a failed call is
//! reported once and the caller decides what to do.

use crate::api::{cancellable, AccountsApi, RequestSigner};
use crate::config::ClientConfig;
use crate::types::{AccountId, AccountType, ClientError, RemoteAccount, UpdateAccountRequest};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, Response, Url};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Error body returned by the API on failure
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct StudentLogoutRequest<'a> {
    #[serde(rename = "studentId")]
    student_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct StudentLogoutResponse {
    #[serde(default)]
    success: bool,
    message: Option<String>,
}

/// `reqwest`-backed [`AccountsApi`]
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base: Url,
    http: reqwest::Client,
    signer: Arc<dyn RequestSigner>,
}

impl HttpApiClient {
    /// Create a client for `base_url` (e.g. `http://localhost:5000`)
    ///
    /// # Errors
    ///
    /// Returns a Config error if `base_url` is not an absolute http(s) URL or
    /// the underlying HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        signer: Arc<dyn RequestSigner>,
    ) -> Result<Self, ClientError> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::config(format!("invalid base URL {:?}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ClientError::config(format!(
                "base URL cannot take a path: {}",
                base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { base, http, signer })
    }

    /// Create a client from validated configuration
    pub fn from_config(config: &ClientConfig) -> Result<Self, ClientError> {
        Self::new(&config.base_url, config.timeout(), config.signer()?)
    }

    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    /// Base URL extended by `segments`, each percent-encoded as one path segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn account_url(&self, kind: AccountType, id: Option<&AccountId>) -> Url {
        match id {
            Some(id) => self.endpoint(&["api", kind.collection(), id.as_str()]),
            None => self.endpoint(&["api", kind.collection()]),
        }
    }

    /// Start a signed JSON request
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .header(CONTENT_TYPE, "application/json");
        self.signer.sign(builder)
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(
        &self,
        request: RequestBuilder,
        cancel: &CancellationToken,
    ) -> Result<Response, ClientError> {
        let response =
            cancellable(cancel, async { Ok::<_, ClientError>(request.send().await?) }).await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = cancellable(cancel, async {
            Ok::<_, ClientError>(response.bytes().await?)
        })
        .await;
        let bytes = match body {
            Ok(bytes) => bytes,
            Err(ClientError::Cancelled) => return Err(ClientError::Cancelled),
            Err(error) => {
                debug!(%error, "Could not read error body");
                Default::default()
            }
        };
        let message = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.message);

        warn!(status = status.as_u16(), message = ?message, "API request failed");
        Err(ClientError::status(status.as_u16(), message))
    }
}

#[async_trait]
impl AccountsApi for HttpApiClient {
    async fn list_accounts(
        &self,
        kind: AccountType,
        cancel: &CancellationToken,
    ) -> Result<Vec<RemoteAccount>, ClientError> {
        let url = self.account_url(kind, None);
        debug!(path = url.path(), "GET");

        let response = self.send(self.request(Method::GET, url), cancel).await?;
        cancellable(cancel, async {
            Ok::<_, ClientError>(response.json::<Vec<RemoteAccount>>().await?)
        })
        .await
    }

    async fn update_account(
        &self,
        kind: AccountType,
        id: &AccountId,
        body: &UpdateAccountRequest,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let url = self.account_url(kind, Some(id));
        debug!(path = url.path(), "PUT");

        self.send(self.request(Method::PUT, url).json(body), cancel)
            .await?;
        Ok(())
    }

    async fn delete_account(
        &self,
        kind: AccountType,
        id: &AccountId,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let url = self.account_url(kind, Some(id));
        debug!(path = url.path(), "DELETE");

        self.send(self.request(Method::DELETE, url), cancel).await?;
        Ok(())
    }

    async fn logout_student(
        &self,
        id_number: &str,
        cancel: &CancellationToken,
    ) -> Result<(), ClientError> {
        let url = self.endpoint(&["api", "students", "logout"]);
        debug!(path = url.path(), "POST");

        let body = StudentLogoutRequest {
            student_id: id_number,
        };
        let response = self
            .send(self.request(Method::POST, url).json(&body), cancel)
            .await?;
        let status = response.status().as_u16();

        let reply: StudentLogoutResponse =
            cancellable(cancel, async { Ok::<_, ClientError>(response.json().await?) })
                .await?;
        if reply.success {
            Ok(())
        } else {
            Err(ClientError::status(
                status,
                Some(reply.message.unwrap_or_else(|| "Logout failed".to_string())),
            ))
        }
    }
}
