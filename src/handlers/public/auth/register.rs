use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::JsonBody;
use crate::state::AppState;
use crate::validation;

pub const MSG_REGISTERED: &str = "Usuário cadastrado com sucesso!";

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub nome: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub senha: Option<String>,
}

/// POST /cadastro - create an account with the identity provider
///
/// Input: `{ "nome": "...", "email": "...", "senha": "..." }`
///
/// Output: `201 { "message": "...", "data": { "user": ..., "session": ... } }`,
/// or `400 { "error": <provider message> }`.
pub async fn register_post(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    if state.strict_validation {
        validation::validate_registration(
            payload.nome.as_deref(),
            payload.email.as_deref(),
            payload.senha.as_deref(),
        )?;
    }

    let data = state
        .identity
        .sign_up(
            payload.nome.as_deref(),
            payload.email.as_deref(),
            payload.senha.as_deref(),
        )
        .await
        .map_err(|e| {
            tracing::warn!("registration refused: {}", e);
            ApiError::bad_request(e.client_message())
        })?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": MSG_REGISTERED, "data": data })),
    ))
}
