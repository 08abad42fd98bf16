use axum::Json;
use serde_json::{json, Value};

pub const LIVENESS_MESSAGE: &str = "API Marido de Aluguel está online!";

/// GET / - plain-text liveness string
pub async fn root() -> &'static str {
    LIVENESS_MESSAGE
}

/// GET /health - process health; does not touch the backend
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now(),
    }))
}
