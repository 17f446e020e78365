//! HTTP Handlers
//!
//! Handlers translate HTTP into use case calls and never interpret
//! errors; `AuthError` renders itself into the response envelope.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::response::ApiResponse;
use platform::cookie::extract_cookie;

use crate::application::admin::{AdminMeUseCase, AdminSignInUseCase, AdminSignOutUseCase};
use crate::application::app::{
    SignUpUseCase, UserMeUseCase, UserSignInUseCase, UserSignOutUseCase,
};
use crate::application::input::{SignInInput, SignUpInput};
use crate::domain::repository::AuthStore;
use crate::domain::value_object::session_token::SessionToken;
use crate::error::AuthResult;
use crate::presentation::dto::{AdminMeResponse, SignInRequest, SignUpRequest, UserMeResponse};
use crate::presentation::extract::{ApiJson, ClientContext, CurrentAdmin, CurrentUser};
use crate::presentation::state::AuthState;

/// 200 `{"message":"ok"}` carrying a session cookie
fn signed_in(set_cookie: String) -> Response {
    ([(header::SET_COOKIE, set_cookie)], ApiResponse::ok_message()).into_response()
}

/// 204 clearing the session cookie
fn signed_out(delete_cookie: String) -> Response {
    (StatusCode::NO_CONTENT, [(header::SET_COOKIE, delete_cookie)]).into_response()
}

// ============================================================================
// Admin
// ============================================================================

/// POST /api/v1/admin/auth/signin
pub async fn admin_sign_in<R>(
    State(state): State<AuthState<R>>,
    ClientContext(client): ClientContext,
    ApiJson(req): ApiJson<SignInRequest>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let use_case =
        AdminSignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email_address: req.email_address,
            password: req.password,
            client,
        })
        .await?;

    let cookie = state
        .config
        .admin_cookie()
        .build_set_cookie(output.session_token.as_str());
    Ok(signed_in(cookie))
}

/// POST /api/v1/admin/auth/signout
pub async fn admin_sign_out<R>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    if let Some(token) = extract_cookie(&headers, &state.config.admin_cookie_name) {
        AdminSignOutUseCase::new(state.repo.clone())
            .execute(&SessionToken::from_string(token))
            .await?;
    }

    Ok(signed_out(state.config.admin_cookie().build_delete_cookie()))
}

/// GET /api/v1/admin/auth/me
pub async fn admin_me(current: Option<CurrentAdmin>) -> AuthResult<ApiResponse<AdminMeResponse>> {
    let output = AdminMeUseCase.execute(current.as_ref().map(|c| &c.0))?;
    Ok(ApiResponse::ok(output.into()))
}

// ============================================================================
// App (end users)
// ============================================================================

/// POST /api/v1/app/auth/signup
pub async fn app_sign_up<R>(
    State(state): State<AuthState<R>>,
    ClientContext(client): ClientContext,
    ApiJson(req): ApiJson<SignUpRequest>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email_address: req.email_address,
            password: req.password,
            client,
        })
        .await?;

    let cookie = state
        .config
        .user_cookie()
        .build_set_cookie(output.session_token.as_str());
    Ok(signed_in(cookie))
}

/// POST /api/v1/app/auth/signin
pub async fn app_sign_in<R>(
    State(state): State<AuthState<R>>,
    ClientContext(client): ClientContext,
    ApiJson(req): ApiJson<SignInRequest>,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    let use_case =
        UserSignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(SignInInput {
            email_address: req.email_address,
            password: req.password,
            client,
        })
        .await?;

    let cookie = state
        .config
        .user_cookie()
        .build_set_cookie(output.session_token.as_str());
    Ok(signed_in(cookie))
}

/// POST /api/v1/app/auth/signout
pub async fn app_sign_out<R>(
    State(state): State<AuthState<R>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: AuthStore,
{
    if let Some(token) = extract_cookie(&headers, &state.config.user_cookie_name) {
        UserSignOutUseCase::new(state.repo.clone())
            .execute(&SessionToken::from_string(token))
            .await?;
    }

    Ok(signed_out(state.config.user_cookie().build_delete_cookie()))
}

/// GET /api/v1/app/auth/me
pub async fn app_me(current: Option<CurrentUser>) -> AuthResult<ApiResponse<UserMeResponse>> {
    let output = UserMeUseCase.execute(current.as_ref().map(|c| &c.0))?;
    Ok(ApiResponse::ok(output.into()))
}
