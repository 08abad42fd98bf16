use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{elevated, protected, public};
use crate::middleware::{require_identity, require_privileged};
use crate::state::AppState;

/// Build the full router
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(public_routes())
        // Bearer token required
        .merge(protected_routes(state.clone()))
        // Bearer token + privileged identity
        .merge(elevated_routes(state.clone()))
        .with_state(state)
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/cadastro", post(public::register_post))
        .route("/login", post(public::login_post))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/chamados", post(protected::create_post).get(protected::list_get))
        .route("/chamados/:id", delete(protected::delete_chamado))
        .route_layer(from_fn_with_state(state, require_identity))
}

fn elevated_routes(state: AppState) -> Router<AppState> {
    // Layers run outermost-first: identity is resolved before the privilege check
    Router::new()
        .route("/todos-os-chamados", get(elevated::list_all_get))
        .route_layer(from_fn_with_state(state.clone(), require_privileged))
        .route_layer(from_fn_with_state(state, require_identity))
}
