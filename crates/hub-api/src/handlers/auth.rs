//! Authentication handlers
//!
//! Registration, login, email verification and the session probe.

use axum::{extract::State, Json};
use hub_service::dto::{
    AuthResponse, LoginRequest, MessageResponse, RegisterRequest, RegisterResponse,
    ResendVerificationRequest, SessionResponse, VerifyEmailRequest,
};
use hub_service::AuthService;

use crate::extractors::{OptionalAuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Register a new user
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<RegisterResponse>>> {
    let service = AuthService::new(state.service_context());
    let response = service.register(request).await?;
    Ok(Created(Json(response)))
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.login(request).await?;
    Ok(Json(response))
}

/// POST /auth/verify-email
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<VerifyEmailRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.verify_email(request).await?;
    Ok(Json(response))
}

/// POST /auth/resend-verification
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<ResendVerificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.resend_verification(request).await?;
    Ok(Json(response))
}

/// Current user, or `authenticated: false`
///
/// GET /auth/session
pub async fn session(
    State(state): State<AppState>,
    auth: OptionalAuthUser,
) -> ApiResult<Json<SessionResponse>> {
    let service = AuthService::new(state.service_context());
    let response = service.session(auth.user_id()).await?;
    Ok(Json(response))
}
