//! Login handler.

use axum::Json;
use axum::extract::State;
use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Basic;

use warden_core::error::AppError;

use crate::dto::response::{ApiResponse, LoginResponse};
use crate::state::AppState;

/// POST {base}/users/login
///
/// Credentials arrive as HTTP Basic. The returned token replaces any token
/// previously whitelisted for the user.
pub async fn login(
    State(state): State<AppState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
) -> Result<Json<ApiResponse<LoginResponse>>, AppError> {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        return Err(AppError::authentication(
            "Full authentication is required to access this resource",
        ));
    };

    let result = state
        .token_issuer
        .login(basic.username(), basic.password())
        .await?;

    Ok(Json(ApiResponse::ok(
        "User Info and JSON Web Token",
        LoginResponse {
            user_info: result.user.into(),
            token: result.token.token,
        },
    )))
}
