use async_trait::async_trait;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{read_json, BackendError, SupabaseClient};
use crate::models::{AuthResponse, User};

/// Identity provider operations used by the API
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Create an account; `nome` is stored as user metadata
    async fn sign_up(
        &self,
        nome: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError>;

    /// Exchange email and password for a session
    async fn sign_in_with_password(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError>;

    /// Resolve an access token to the user it was issued for
    async fn get_user(&self, token: &str) -> Result<User, BackendError>;
}

/// Credentials body shared by sign-up and sign-in. Absent values are left
/// out rather than sent as `null`.
#[derive(Debug, Serialize)]
struct Credentials<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<SignUpMetadata<'a>>,
}

/// Becomes `user_metadata` on the new account
#[derive(Debug, Serialize)]
struct SignUpMetadata<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    nome: Option<&'a str>,
}

/// GoTrue client (`/auth/v1`)
#[derive(Debug, Clone)]
pub struct SupabaseIdentity {
    client: SupabaseClient,
}

impl SupabaseIdentity {
    pub fn new(client: SupabaseClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IdentityGateway for SupabaseIdentity {
    async fn sign_up(
        &self,
        nome: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError> {
        let url = self.client.endpoint("auth/v1/signup")?;
        let body = Credentials {
            email,
            password,
            data: Some(SignUpMetadata { nome }),
        };

        let response = self.client.request(Method::POST, url).json(&body).send().await?;
        let payload = read_json(response).await?;

        tracing::info!("sign-up accepted by identity provider");
        Ok(AuthResponse::from_provider(payload))
    }

    async fn sign_in_with_password(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<AuthResponse, BackendError> {
        let mut url = self.client.endpoint("auth/v1/token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");
        let body = Credentials {
            email,
            password,
            data: None,
        };

        let response = self.client.request(Method::POST, url).json(&body).send().await?;
        let payload = read_json(response).await?;

        if payload.get("access_token").and_then(Value::as_str).is_none() {
            return Err(BackendError::InvalidResponse(
                "sign-in response carried no access_token".to_string(),
            ));
        }

        Ok(AuthResponse::from_provider(payload))
    }

    async fn get_user(&self, token: &str) -> Result<User, BackendError> {
        let url = self.client.endpoint("auth/v1/user")?;

        let response = self.client.request_as(Method::GET, url, token).send().await?;
        let payload = read_json(response).await?;

        serde_json::from_value(payload).map_err(|e| BackendError::InvalidResponse(e.to_string()))
    }
}
