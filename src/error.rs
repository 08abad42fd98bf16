// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const MSG_UNAUTHORIZED: &str = "Não autorizado.";
pub const MSG_FORBIDDEN: &str = "Acesso restrito ao profissional.";
pub const MSG_INVALID_CREDENTIALS: &str = "Credenciais inválidas.";
pub const MSG_CHAMADO_NOT_FOUND: &str = "Chamado não encontrado ou erro ao deletar.";
pub const MSG_INVALID_INPUT: &str = "Dados inválidos.";

/// HTTP API error with status code and client-facing message
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),
    ValidationError {
        message: String,
        field_errors: BTreeMap<String, String>,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 403 Forbidden
    Forbidden(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::ValidationError { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::Forbidden(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
        }
    }

    /// Response body. Not-found answers use `message`; everything else `error`.
    pub fn to_json(&self) -> Value {
        match self {
            ApiError::ValidationError { message, field_errors } => json!({
                "error": message,
                "field_errors": field_errors,
            }),
            ApiError::NotFound(message) => json!({ "message": message }),
            _ => json!({ "error": self.message() }),
        }
    }
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn validation_error(field_errors: BTreeMap<String, String>) -> Self {
        ApiError::ValidationError {
            message: MSG_INVALID_INPUT.to_string(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized() -> Self {
        ApiError::Unauthorized(MSG_UNAUTHORIZED.to_string())
    }

    pub fn invalid_credentials() -> Self {
        ApiError::Unauthorized(MSG_INVALID_CREDENTIALS.to_string())
    }

    pub fn forbidden() -> Self {
        ApiError::Forbidden(MSG_FORBIDDEN.to_string())
    }

    pub fn chamado_not_found() -> Self {
        ApiError::NotFound(MSG_CHAMADO_NOT_FOUND.to_string())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }
}

// Provider answers surface verbatim; anything else is logged and replaced
impl From<crate::backend::BackendError> for ApiError {
    fn from(err: crate::backend::BackendError) -> Self {
        tracing::error!("backend error: {}", err);
        ApiError::internal_server_error(err.client_message())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
