//! Auth Middleware
//!
//! Resolves the session cookie to a principal and attaches it to the
//! request. Bypassed paths (sign-in, sign-up) pass through untouched and
//! are matched against the full original path, so the check is the same
//! whether or not the router is nested.

use axum::extract::{OriginalUri, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use platform::cookie::extract_cookie;

use crate::application::admin::AuthenticateAdminUseCase;
use crate::application::app::AuthenticateUserUseCase;
use crate::domain::repository::{
    AdminRepository, AdminSessionRepository, UserRepository, UserSessionRepository,
};
use crate::domain::value_object::session_token::SessionToken;
use crate::presentation::extract::{CurrentAdmin, CurrentUser};
use crate::presentation::state::AuthState;

fn is_bypassed(req: &Request, bypass_paths: &[String]) -> bool {
    let path = req
        .extensions()
        .get::<OriginalUri>()
        .map(|uri| uri.0.path())
        .unwrap_or_else(|| req.uri().path());

    bypass_paths.iter().any(|bypassed| bypassed == path)
}

fn session_token(req: &Request, cookie_name: &str) -> Option<SessionToken> {
    extract_cookie(req.headers(), cookie_name).map(SessionToken::from_string)
}

/// Requires a valid `admin_session` cookie outside the bypass list
pub async fn authenticate_admin<R>(
    State(state): State<AuthState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: AdminRepository + AdminSessionRepository + Send + Sync + 'static,
{
    if is_bypassed(&req, &state.config.admin_bypass_paths) {
        return next.run(req).await;
    }

    let token = session_token(&req, &state.config.admin_cookie_name);
    let use_case = AuthenticateAdminUseCase::new(state.repo.clone(), state.repo.clone());

    match use_case.execute(token).await {
        Ok(admin) => {
            req.extensions_mut().insert(CurrentAdmin(admin));
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}

/// Requires a valid `user_session` cookie outside the bypass list
pub async fn authenticate_user<R>(
    State(state): State<AuthState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: UserRepository + UserSessionRepository + Send + Sync + 'static,
{
    if is_bypassed(&req, &state.config.user_bypass_paths) {
        return next.run(req).await;
    }

    let token = session_token(&req, &state.config.user_cookie_name);
    let use_case = AuthenticateUserUseCase::new(state.repo.clone(), state.repo.clone());

    match use_case.execute(token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            next.run(req).await
        }
        Err(err) => err.into_response(),
    }
}
