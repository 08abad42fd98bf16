use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identity resolved from a bearer token. Owned by the identity provider and
/// only materialized for the lifetime of one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    /// Phone-only accounts carry no email (`null` or absent)
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
}

impl User {
    /// Display name captured as `nome` at registration
    pub fn display_name(&self) -> Option<&str> {
        self.user_metadata.get("nome").and_then(Value::as_str)
    }

    /// Role claim set server-side by the identity provider
    pub fn role(&self) -> Option<&str> {
        self.app_metadata.get("role").and_then(Value::as_str)
    }
}

/// `{user, session}` payload returned from registration and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub user: Value,
    pub session: Option<Value>,
}

impl AuthResponse {
    /// Reshape a raw identity-provider payload.
    ///
    /// A payload carrying `access_token` is a session whose `user` field is the
    /// user. Anything else (sign-up awaiting email confirmation) is the user
    /// itself and there is no session yet.
    pub fn from_provider(payload: Value) -> Self {
        if payload.get("access_token").is_some() {
            let user = payload.get("user").cloned().unwrap_or(Value::Null);
            Self {
                user,
                session: Some(payload),
            }
        } else {
            Self {
                user: payload,
                session: None,
            }
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|s| s.get("access_token"))
            .and_then(Value::as_str)
    }
}
