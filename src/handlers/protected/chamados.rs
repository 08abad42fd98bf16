use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::JsonBody;
use crate::models::{Chamado, NewChamado, User};
use crate::state::AppState;
use crate::validation;

pub const MSG_DELETED: &str = "Chamado excluído com sucesso.";

#[derive(Debug, Default, Deserialize)]
pub struct CreateChamadoRequest {
    #[serde(default)]
    pub titulo: Option<Value>,
    #[serde(default)]
    pub descricao: Option<Value>,
}

/// POST /chamados - open a service request owned by the caller
pub async fn create_post(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    JsonBody(payload): JsonBody<CreateChamadoRequest>,
) -> Result<(StatusCode, Json<Chamado>), ApiError> {
    if state.strict_validation {
        validation::validate_new_chamado(payload.titulo.as_ref(), payload.descricao.as_ref())?;
    }

    let chamado = state
        .records
        .insert(NewChamado {
            titulo: payload.titulo,
            descricao: payload.descricao,
            usuario_id: user.id,
        })
        .await?;

    tracing::info!(user_id = %user.id, id = ?chamado.id(), "chamado created");
    Ok((StatusCode::CREATED, Json(chamado)))
}

/// GET /chamados - the caller's service requests, newest first
pub async fn list_get(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Chamado>>, ApiError> {
    let chamados = state.records.list_by_owner(user.id).await?;
    Ok(Json(chamados))
}

/// DELETE /chamados/:id - remove one of the caller's service requests
///
/// Ownership is part of the delete filter, so a record owned by someone else
/// and a record that does not exist both answer 404.
pub async fn delete(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    match state.records.delete_owned(&id, user.id).await {
        Ok(removed) if removed > 0 => {
            tracing::info!(user_id = %user.id, %id, "chamado deleted");
            Ok(Json(json!({ "message": MSG_DELETED })))
        }
        Ok(_) => Err(ApiError::chamado_not_found()),
        Err(e) => {
            tracing::warn!(user_id = %user.id, %id, "delete failed: {}", e);
            Err(ApiError::chamado_not_found())
        }
    }
}
