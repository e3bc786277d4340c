//! Access Gate Middleware
//!
//! Guards the worker and leader page areas. Use with
//! `axum::middleware::from_fn_with_state`.

use axum::body::Body;
use axum::extract::State;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::extract_session_token;
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::application::CheckSessionUseCase;
use crate::domain::services::{self, GateDecision, TokenState};

/// Middleware state
#[derive(Clone)]
pub struct GateState {
    check: CheckSessionUseCase,
    cookie_name: Arc<str>,
}

impl GateState {
    pub fn new(tokens: Arc<SessionTokens>, cookie_name: impl Into<Arc<str>>) -> Self {
        Self {
            check: CheckSessionUseCase::new(tokens),
            cookie_name: cookie_name.into(),
        }
    }
}

/// Redirect page requests that the session may not see
pub async fn access_gate(
    State(state): State<GateState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();

    // Skip token verification for paths outside the protected areas
    if services::protected_area(&path).is_none() {
        return next.run(req).await;
    }

    let token = extract_session_token(req.headers(), &state.cookie_name);
    let token_state = state.check.token_state(token.as_deref());

    match services::decide(&path, token_state) {
        GateDecision::Allow => next.run(req).await,
        GateDecision::Redirect(target) => {
            if token_state == TokenState::Invalid {
                tracing::warn!(path = %path, "Gate redirect: invalid session token");
            } else {
                tracing::debug!(path = %path, target = %target, "Gate redirect");
            }
            Redirect::temporary(&target).into_response()
        }
    }
}
