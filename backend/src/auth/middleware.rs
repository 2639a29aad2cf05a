//! Authentication middleware
//!
//! Provides the session interceptor for protected route groups and an
//! extractor that hands the resolved identity to handlers.
//!
//! The identity travels as a typed request extension, so handlers never
//! look it up by a string key.

use crate::auth::cookie;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    extract::{FromRef, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

/// Account identity behind a live session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Already resolved by `require_session`; don't hit the store twice
        if let Some(user) = parts.extensions.get::<AuthUser>() {
            return Ok(user.clone());
        }

        let app_state = AppState::from_ref(state);
        let token = cookie::session_token(&parts.headers)?;
        Ok(app_state.validator().validate(&token).await?)
    }
}

/// Session interceptor for a group of protected routes
///
/// Rejects the request before the handler runs unless the session cookie
/// names a live session, then attaches the owner's [`AuthUser`].
pub async fn require_session(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = cookie::session_token(request.headers())?;
    let user = state.validator().validate(&token).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
