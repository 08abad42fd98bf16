use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::JsonBody;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

/// POST /login - exchange email and password for a session
///
/// Any provider failure is reported as `401 { "error": "Credenciais inválidas." }`.
pub async fn login_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let data = state
        .identity
        .sign_in_with_password(payload.email.as_deref(), payload.senha.as_deref())
        .await
        .map_err(|e| {
            tracing::info!("login refused: {}", e);
            ApiError::invalid_credentials()
        })?;

    Ok(Json(json!({ "data": data })))
}
