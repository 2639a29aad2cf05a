//! Authentication routes
//!
//! Form-based registration, login and logout, plus the identity endpoint
//! behind the session interceptor.
//!
//! Successful form posts answer with `303 See Other`; login sets the
//! session cookie and logout clears it.

use crate::auth::{cookie, require_session, AuthUser};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header::SET_COOKIE, HeaderMap},
    middleware,
    response::{IntoResponse, Redirect},
    routing::{get, post},
    Form, Json, Router,
};
use werd_shared::{Credentials, CurrentUserResponse};

/// Create auth routes
pub fn auth_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/me", get(current_user))
        .route_layer(middleware::from_fn_with_state(state, require_session));

    Router::new()
        .route("/register", post(register))
        .route("/createUser", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .merge(protected)
}

/// Unreadable form bodies are the caller's fault, whatever axum thinks
fn credentials(form: Result<Form<Credentials>, FormRejection>) -> ApiResult<Credentials> {
    form.map(|Form(credentials)| credentials)
        .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))
}

/// Register a new account
///
/// POST /auth/register
async fn register(
    State(state): State<AppState>,
    form: Result<Form<Credentials>, FormRejection>,
) -> ApiResult<Redirect> {
    let creds = credentials(form)?;
    state.auth().register(&creds.username, &creds.password).await?;
    Ok(Redirect::to("/"))
}

/// Log in and receive a session cookie
///
/// POST /auth/login
async fn login(
    State(state): State<AppState>,
    form: Result<Form<Credentials>, FormRejection>,
) -> ApiResult<impl IntoResponse> {
    let creds = credentials(form)?;
    let issued = state.auth().login(&creds.username, &creds.password).await?;

    Ok((
        [(SET_COOKIE, cookie::issue(&issued.token, issued.expires_at))],
        Redirect::to("/"),
    ))
}

/// Revoke the caller's session
///
/// POST /auth/logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<impl IntoResponse> {
    let token = cookie::session_token(&headers)?;
    state.auth().logout(&token).await?;

    Ok(([(SET_COOKIE, cookie::clear())], Redirect::to("/auth/login")))
}

/// Identity behind the current session
///
/// GET /auth/me
async fn current_user(user: AuthUser) -> Json<CurrentUserResponse> {
    Json(CurrentUserResponse {
        user_id: user.user_id.to_string(),
        username: user.username,
    })
}
