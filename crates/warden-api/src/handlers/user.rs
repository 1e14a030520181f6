//! User management handlers.

use axum::Json;
use axum::extract::State;

use warden_core::error::AppError;
use warden_service::user::{NewUser, UserUpdate};

use crate::dto::request::{ChangePasswordRequest, CreateUserRequest, UpdateUserRequest, validate};
use crate::dto::response::{ApiResponse, UserResponse};
use crate::extractors::{AuthUser, UserIdPath};
use crate::state::AppState;

/// GET {base}/users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<UserResponse>>>, AppError> {
    let users = state.user_service.find_all().await?;
    Ok(Json(ApiResponse::ok(
        "Find All Success",
        users.into_iter().map(UserResponse::from).collect(),
    )))
}

/// POST {base}/users
pub async fn create_user(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    validate(&req)?;

    let user = state
        .user_service
        .save(
            &auth,
            NewUser {
                username: req.username,
                password: req.password,
                enabled: req.enabled,
                roles: req.roles,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok("Add Success", user.into())))
}

/// GET {base}/users/{userId}
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    let user = state.user_service.find_by_id(id).await?;
    Ok(Json(ApiResponse::ok("Find One Success", user.into())))
}

/// PUT {base}/users/{userId}
pub async fn update_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserIdPath(id): UserIdPath,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserResponse>>, AppError> {
    validate(&req)?;

    let user = state
        .user_service
        .update(
            &auth,
            id,
            UserUpdate {
                username: req.username,
                enabled: req.enabled,
                roles: req.roles,
            },
        )
        .await?;

    Ok(Json(ApiResponse::ok("Update Success", user.into())))
}

/// DELETE {base}/users/{userId}
pub async fn delete_user(
    State(state): State<AppState>,
    auth: AuthUser,
    UserIdPath(id): UserIdPath,
) -> Result<Json<ApiResponse<()>>, AppError> {
    state.user_service.delete(&auth, id).await?;
    Ok(Json(ApiResponse::message("Delete Success")))
}

/// PATCH {base}/users/{userId}/password
pub async fn change_password(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    validate(&req)?;

    state
        .user_service
        .change_password(
            id,
            &req.old_password,
            &req.new_password,
            &req.confirm_new_password,
        )
        .await?;

    Ok(Json(ApiResponse::message("Change Password Success")))
}
