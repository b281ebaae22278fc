//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
};

use crate::{
    domain::RoomName,
    infrastructure::dto::http::{RoomDetailDto, RoomSummaryDto},
    ui::{error::ApiError, state::AppState},
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.rooms.list().await;

    // Domain Model から DTO への変換
    let summaries = rooms
        .into_iter()
        .map(|room| RoomSummaryDto {
            name: room.name.into_string(),
            participants: room.participants,
            message_count: room.message_count,
        })
        .collect();

    Json(summaries)
}

/// Get room detail by name
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room): Path<String>,
) -> Result<Json<RoomDetailDto>, ApiError> {
    let name = RoomName::new(room).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let Some(room) = state.rooms.detail(&name).await else {
        return Err(ApiError::not_found(format!("Room '{}' not found", name)));
    };

    // Domain Model から DTO への変換
    Ok(Json(RoomDetailDto {
        name: room.name.into_string(),
        participants: room.participants.iter().map(Into::into).collect(),
        messages: room.messages.iter().map(Into::into).collect(),
    }))
}
