use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::bearer_token;
use crate::backend::IdentityGateway;
use crate::error::ApiError;
use crate::models::User;
use crate::state::AppState;

/// Resolve the caller from the `Authorization` header.
///
/// A missing or malformed header and a token the provider rejects all yield
/// `None`. Every call costs one identity-provider round trip.
pub async fn resolve_identity(headers: &HeaderMap, identity: &dyn IdentityGateway) -> Option<User> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    let token = bearer_token(header)?;

    match identity.get_user(token).await {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!("token rejected by identity provider: {}", e);
            None
        }
    }
}

/// Rejects unauthenticated requests with 401 and injects the resolved `User`
/// into request extensions
pub async fn require_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = resolve_identity(request.headers(), state.identity.as_ref())
        .await
        .ok_or_else(ApiError::unauthorized)?;

    tracing::debug!(user_id = %user.id, "request authenticated");
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

/// Rejects authenticated but unprivileged callers with 403.
/// Must run after `require_identity`.
pub async fn require_privileged(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let user = request
        .extensions()
        .get::<User>()
        .ok_or_else(ApiError::unauthorized)?;

    if !state.privileges.is_privileged(user) {
        tracing::warn!(user_id = %user.id, "privileged route refused");
        return Err(ApiError::forbidden());
    }

    Ok(next.run(request).await)
}
