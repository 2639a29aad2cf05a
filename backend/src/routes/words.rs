//! Random word routes

use crate::auth::require_session;
use crate::error::{ApiError, ApiResult};
use crate::services::words::WORDS_PER_REQUEST;
use crate::state::AppState;
use axum::{extract::State, middleware, routing::get, Json, Router};
use werd_shared::WordEntry;

/// Create word routes (session required)
pub fn word_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/words", get(random_words))
        .route_layer(middleware::from_fn_with_state(state, require_session))
}

/// GET /words - five rarity-weighted random words
async fn random_words(State(state): State<AppState>) -> ApiResult<Json<Vec<WordEntry>>> {
    if state.words.is_empty() {
        return Err(ApiError::ServiceUnavailable("No word lists loaded".to_string()));
    }
    Ok(Json(state.words.sample(WORDS_PER_REQUEST)))
}
