//! Auth Routers
//!
//! Each router carries its own auth middleware; mount them under
//! `/api/v1/admin`, `/api/v1/app` and `/api/v1/landing`.

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthStore;
use crate::presentation::handlers;
use crate::presentation::middleware::{authenticate_admin, authenticate_user};
use crate::presentation::state::AuthState;

/// Admin back-office routes
pub fn admin_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthStore,
{
    let state = AuthState::new(repo, config);

    Router::new()
        .route("/auth/signin", post(handlers::admin_sign_in::<R>))
        .route("/auth/signout", post(handlers::admin_sign_out::<R>))
        .route("/auth/me", get(handlers::admin_me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_admin::<R>,
        ))
        .with_state(state)
}

/// End-user routes
pub fn app_router<R>(repo: R, config: AuthConfig) -> Router
where
    R: AuthStore,
{
    let state = AuthState::new(repo, config);

    Router::new()
        .route("/auth/signup", post(handlers::app_sign_up::<R>))
        .route("/auth/signin", post(handlers::app_sign_in::<R>))
        .route("/auth/signout", post(handlers::app_sign_out::<R>))
        .route("/auth/me", get(handlers::app_me))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            authenticate_user::<R>,
        ))
        .with_state(state)
}

/// Public marketing endpoints; no routes yet
pub fn landing_router() -> Router {
    Router::new()
}
