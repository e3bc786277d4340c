//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use platform::cookie::{extract_session_token, set_cookie_header};
use platform::mail::Mailer;
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, ResendOtpInput, ResendOtpOutcome, ResendOtpUseCase, SignInInput,
    SignInUseCase, SignUpInput, SignUpUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    MessageResponse, ResendOtpRequest, ResendOtpResponse, SessionStatusResponse, SignInRequest,
    SignInResponse, SignUpRequest, SignUpResponse, VerifyOtpRequest, VerifyOtpResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, M>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<SessionTokens>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/auth/signup
pub async fn sign_up<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignUpRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignUpInput {
            name: req.name,
            email: req.email,
            password: req.password,
            role: req.role,
            departments: req.departments,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User created successfully. Please verify your email with the OTP sent."
                .to_string(),
            redirect_to: output.redirect_to.to_string(),
            email: output.email,
        }),
    ))
}

// ============================================================================
// OTP
// ============================================================================

/// POST /api/auth/verify-otp
pub async fn verify_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<VerifyOtpRequest>,
) -> AuthResult<Json<VerifyOtpResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = VerifyOtpUseCase::new(state.repo.clone());

    let output = use_case
        .execute(VerifyOtpInput {
            email: req.email,
            otp: req.otp,
        })
        .await?;

    Ok(Json(VerifyOtpResponse {
        message: "Email verified successfully".to_string(),
        redirect_to: output.redirect_to.to_string(),
        user: output.user.into(),
    }))
}

/// POST /api/auth/resend-otp
pub async fn resend_otp<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<ResendOtpRequest>,
) -> AuthResult<Json<ResendOtpResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ResendOtpUseCase::new(
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let outcome = use_case.execute(ResendOtpInput { email: req.email }).await?;

    let response = match outcome {
        ResendOtpOutcome::Sent => ResendOtpResponse {
            message: "A new OTP has been sent to your email".to_string(),
            already_verified: false,
        },
        ResendOtpOutcome::AlreadyVerified => ResendOtpResponse {
            message: "Email is already verified".to_string(),
            already_verified: true,
        },
    };

    Ok(Json(response))
}

// ============================================================================
// Sign In / Out
// ============================================================================

/// POST /api/auth/signin
pub async fn sign_in<R, M>(
    State(state): State<AuthAppState<R, M>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .session_cookie()
        .build_set_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(SignInResponse {
            message: "Signed in successfully".to_string(),
            redirect_to: output.redirect_to,
            user: output.user.into(),
        }),
    ))
}

/// POST /api/auth/logout
///
/// Tokens are stateless: this only tells the client to drop the cookie.
pub async fn logout<R, M>(State(state): State<AuthAppState<R, M>>) -> impl IntoResponse
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let cookie = state.config.session_cookie().build_expired_cookie();

    (
        StatusCode::OK,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

// ============================================================================
// Session Status
// ============================================================================

/// GET /api/auth/status
pub async fn session_status<R, M>(
    State(state): State<AuthAppState<R, M>>,
    headers: HeaderMap,
) -> Json<SessionStatusResponse>
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let token = extract_session_token(&headers, &state.config.session_cookie_name);
    let use_case = CheckSessionUseCase::new(state.tokens.clone());

    match use_case.execute(token.as_deref()) {
        Ok(claims) => Json(SessionStatusResponse {
            authenticated: true,
            user_id: Some(claims.sub),
            role: Some(claims.role),
            expires_at: claims.expires_at(),
        }),
        Err(_) => Json(SessionStatusResponse::anonymous()),
    }
}
