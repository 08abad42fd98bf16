use axum::{extract::State, Extension, Json};

use crate::error::ApiError;
use crate::models::{Chamado, User};
use crate::state::AppState;

/// GET /todos-os-chamados - every service request, newest first
pub async fn list_all_get(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> Result<Json<Vec<Chamado>>, ApiError> {
    let chamados = state.records.list_all().await?;

    tracing::info!(user_id = %user.id, count = chamados.len(), "listed all chamados");
    Ok(Json(chamados))
}
