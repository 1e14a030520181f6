//! Route definitions for the Warden HTTP API.
//!
//! All routes are mounted under `server.base_url`. Every route sits behind
//! `authenticate` and the whitelist interceptor; guarded routes add
//! `require_owner` or `require_admin` on top.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(public_routes())
        .merge(user_routes(&state))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::whitelist::enforce_whitelist,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::authenticate::authenticate,
        ));

    let base = state.config.server.base_url.trim_end_matches('/');
    let root = if base.is_empty() {
        Router::new().merge(api_routes)
    } else {
        Router::new().nest(base, api_routes)
    };

    root.layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(&state.config.server.cors))
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Login and health: no caller required.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/login", post(handlers::auth::login))
        .route("/health", get(handlers::health::health))
}

/// User management, guarded per method.
fn user_routes(state: &AppState) -> Router<AppState> {
    let owner = axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::authorize::require_owner,
    );
    let admin = axum_middleware::from_fn(middleware::authorize::require_admin);

    Router::new()
        .route(
            "/users",
            get(handlers::user::list_users)
                .post(handlers::user::create_user)
                .route_layer(admin.clone()),
        )
        .route(
            "/users/{userId}",
            get(handlers::user::get_user)
                .put(handlers::user::update_user)
                .route_layer(owner.clone())
                .merge(delete(handlers::user::delete_user).route_layer(admin)),
        )
        .route(
            "/users/{userId}/password",
            patch(handlers::user::change_password).route_layer(owner),
        )
}
