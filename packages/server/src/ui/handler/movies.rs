//! Movie listing handler.

use std::sync::Arc;

use axum::{Json, extract::State};
use serde_json::Value;

use crate::ui::{error::ApiError, extractor::AuthUser, state::AppState};

/// GET /movies
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
) -> Result<Json<Value>, ApiError> {
    let movies = state
        .movies
        .execute()
        .await
        .map_err(|_| ApiError::internal("Error fetching movies"))?;
    Ok(Json(movies))
}
