//! Account endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    infrastructure::dto::http::{
        DataResponse, DeleteAccountRequest, LoginRequest, MessageResponse, PaginationDto,
        PasswordResetConfirmRequest, PasswordResetRequest, PublicUserDto, RegisterRequest,
        SearchUsersQuery, SearchUsersResponse, TokenResponse, UpdateProfileRequest, UserDto,
    },
    ui::{
        error::ApiError,
        extractor::{ApiJson, ApiQuery, AuthUser},
        state::AppState,
    },
    usecase::{RegisterInput, UpdateProfileInput},
};

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<TokenResponse>), ApiError> {
    let token = state
        .register
        .execute(RegisterInput {
            username: request.username,
            email: request.email,
            password: request.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// POST /auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    let token = state
        .login
        .execute(request.email, request.password)
        .await?;
    Ok(Json(TokenResponse { token }))
}

/// GET /auth/profile
pub async fn get_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
) -> Result<Json<DataResponse<UserDto>>, ApiError> {
    let account = state.profile.get(&identity.user_id).await?;
    Ok(Json(DataResponse::ok(UserDto::from(&account))))
}

/// PUT /auth/profile
pub async fn update_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiJson(request): ApiJson<UpdateProfileRequest>,
) -> Result<Json<DataResponse<UserDto>>, ApiError> {
    let account = state
        .profile
        .update(
            &identity.user_id,
            UpdateProfileInput {
                username: request.username,
                email: request.email,
                current_password: request.current_password,
                new_password: request.new_password,
            },
        )
        .await?;
    Ok(Json(DataResponse::ok(UserDto::from(&account))))
}

/// DELETE /auth/profile
pub async fn delete_profile(
    State(state): State<Arc<AppState>>,
    AuthUser(identity): AuthUser,
    ApiJson(request): ApiJson<DeleteAccountRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .profile
        .delete(&identity.user_id, request.password)
        .await?;
    Ok(Json(MessageResponse::ok("Account deleted successfully")))
}

/// POST /auth/password-reset
///
/// The issued token is never returned to the caller; it reaches the user
/// out of band.
pub async fn request_password_reset(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.password_reset.request(request.email).await?;
    Ok(Json(MessageResponse::ok("Password reset requested")))
}

/// POST /auth/password-reset/confirm
pub async fn reset_password(
    State(state): State<Arc<AppState>>,
    ApiJson(request): ApiJson<PasswordResetConfirmRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .password_reset
        .reset(request.token, request.new_password)
        .await?;
    Ok(Json(MessageResponse::ok("Password reset successful")))
}

/// GET /users/search
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    ApiQuery(query): ApiQuery<SearchUsersQuery>,
) -> Result<Json<SearchUsersResponse>, ApiError> {
    let page = state
        .user_directory
        .search(query.query, query.page, query.limit)
        .await?;
    Ok(Json(SearchUsersResponse {
        success: true,
        data: page.items.iter().map(PublicUserDto::from).collect(),
        pagination: PaginationDto::from(&page),
    }))
}

/// GET /users/{id}
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<PublicUserDto>>, ApiError> {
    let account = state.user_directory.get_user(&id).await?;
    Ok(Json(DataResponse::ok(PublicUserDto::from(&account))))
}
