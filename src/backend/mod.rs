// backend/mod.rs - Clients for the managed backend (Supabase)
//
// Identity (GoTrue, /auth/v1) and records (PostgREST, /rest/v1) sit behind the
// IdentityGateway and RecordStore traits so handlers never see HTTP details.

pub mod identity;
pub mod records;

pub use identity::{IdentityGateway, SupabaseIdentity};
pub use records::{RecordStore, SupabaseRecords};

use std::time::Duration;

use reqwest::{RequestBuilder, Response};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::config::BackendConfig;

/// Answer given to callers when the backend could not be reached or replied
/// with something unreadable. The detail goes to the log only.
pub const MSG_BACKEND_UNAVAILABLE: &str = "Serviço indisponível no momento.";

/// Errors from backend calls
#[derive(Debug, Error)]
pub enum BackendError {
    /// The provider answered with a non-success status
    #[error("{message}")]
    Provider { status: u16, message: String },

    #[error("backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected backend response: {0}")]
    InvalidResponse(String),

    #[error("invalid backend url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl BackendError {
    /// Message suitable for surfacing to API callers. Only provider answers
    /// are passed on; transport and decoding failures can carry request URLs.
    pub fn client_message(&self) -> String {
        match self {
            BackendError::Provider { message, .. } => message.clone(),
            _ => MSG_BACKEND_UNAVAILABLE.to_string(),
        }
    }
}

/// Connection settings shared by both Supabase clients
#[derive(Debug, Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: Url,
    api_key: String,
}

impl SupabaseClient {
    pub fn new(config: &BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Self::with_http(http, &config.url, &config.key)
    }

    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        api_key: impl Into<String>,
    ) -> Result<Self, BackendError> {
        // Url::join drops the last path segment unless the base ends with '/'
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');

        Ok(Self {
            http,
            base_url: Url::parse(&base)?,
            api_key: api_key.into(),
        })
    }

    pub fn endpoint(&self, path: &str) -> Result<Url, BackendError> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Start a request authenticated with the project key
    pub fn request(&self, method: reqwest::Method, url: Url) -> RequestBuilder {
        self.request_as(method, url, &self.api_key)
    }

    /// Start a request on behalf of the holder of `bearer`
    pub fn request_as(&self, method: reqwest::Method, url: Url, bearer: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(bearer)
    }
}

/// Turn a provider response into its JSON body, or a `BackendError::Provider`
/// carrying the provider's own message.
pub(crate) async fn read_json(response: Response) -> Result<Value, BackendError> {
    let status = response.status();
    let body = response.text().await?;

    if status.is_success() {
        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        return serde_json::from_str(&body)
            .map_err(|e| BackendError::InvalidResponse(e.to_string()));
    }

    let message = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| error_message(&v))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });

    tracing::debug!(status = status.as_u16(), %message, "backend rejected request");

    Err(BackendError::Provider {
        status: status.as_u16(),
        message,
    })
}

/// GoTrue and PostgREST disagree on where the message lives
fn error_message(body: &Value) -> Option<String> {
    ["msg", "error_description", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_string)
}
