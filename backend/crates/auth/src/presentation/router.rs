//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use platform::mail::{MailTransport, Mailer};
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::infra::postgres::PgAuthRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAuthRepository,
    mailer: MailTransport,
    tokens: Arc<SessionTokens>,
    config: AuthConfig,
) -> Router {
    auth_router_generic(repo, mailer, tokens, config)
}

/// Create a generic Auth router for any repository and mailer
pub fn auth_router_generic<R, M>(
    repo: R,
    mailer: M,
    tokens: Arc<SessionTokens>,
    config: AuthConfig,
) -> Router
where
    R: UserRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens,
        config: Arc::new(config),
    };

    Router::new()
        .route("/signup", post(handlers::sign_up::<R, M>))
        .route("/verify-otp", post(handlers::verify_otp::<R, M>))
        .route("/resend-otp", post(handlers::resend_otp::<R, M>))
        .route("/signin", post(handlers::sign_in::<R, M>))
        .route("/logout", post(handlers::logout::<R, M>))
        .route("/status", get(handlers::session_status::<R, M>))
        .with_state(state)
}
