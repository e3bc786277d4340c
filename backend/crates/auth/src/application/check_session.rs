//! Check Session Use Case
//!
//! Verifies a presented session token. Tokens are stateless, so this
//! never touches the database.

use std::sync::Arc;

use chrono::Utc;
use platform::token::{SessionClaims, SessionTokens, TokenError};

use crate::domain::services::TokenState;
use crate::error::{AuthError, AuthResult};

/// Check session use case
#[derive(Clone)]
pub struct CheckSessionUseCase {
    tokens: Arc<SessionTokens>,
}

impl CheckSessionUseCase {
    pub fn new(tokens: Arc<SessionTokens>) -> Self {
        Self { tokens }
    }

    /// Claims of a valid token, or `SessionInvalid`
    pub fn execute(&self, token: Option<&str>) -> AuthResult<SessionClaims> {
        let token = token.ok_or(AuthError::SessionInvalid)?;
        self.tokens.verify(token, Utc::now()).map_err(|e| {
            log_rejection(&e);
            AuthError::SessionInvalid
        })
    }

    /// Token outcome as consumed by the access gate
    pub fn token_state(&self, token: Option<&str>) -> TokenState {
        match token {
            None => TokenState::Missing,
            Some(token) => match self.tokens.verify(token, Utc::now()) {
                Ok(claims) => TokenState::Valid(claims.role),
                Err(e) => {
                    log_rejection(&e);
                    TokenState::Invalid
                }
            },
        }
    }
}

fn log_rejection(e: &TokenError) {
    match e {
        TokenError::Expired => tracing::debug!("Expired session token"),
        _ => tracing::warn!(reason = %e, "Rejected session token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use kernel::id::UserId;
    use kernel::role::Role;

    fn use_case() -> (CheckSessionUseCase, Arc<SessionTokens>) {
        let tokens = Arc::new(SessionTokens::with_random_secret(Duration::days(7)));
        (CheckSessionUseCase::new(tokens.clone()), tokens)
    }

    #[test]
    fn test_valid_token() {
        let (check, tokens) = use_case();
        let user_id = UserId::new();
        let (token, _) = tokens.issue(user_id, Role::Leader, Utc::now());

        assert_eq!(check.execute(Some(&token)).unwrap().sub, user_id);
        assert_eq!(check.token_state(Some(&token)), TokenState::Valid(Role::Leader));
    }

    #[test]
    fn test_missing_and_invalid_tokens() {
        let (check, _) = use_case();
        assert!(matches!(check.execute(None), Err(AuthError::SessionInvalid)));
        assert!(matches!(check.execute(Some("x.y")), Err(AuthError::SessionInvalid)));
        assert_eq!(check.token_state(None), TokenState::Missing);
        assert_eq!(check.token_state(Some("garbage")), TokenState::Invalid);
    }

    #[test]
    fn test_expired_token_is_invalid() {
        let (check, tokens) = use_case();
        let (token, _) = tokens.issue(UserId::new(), Role::Worker, Utc::now() - Duration::days(8));
        assert_eq!(check.token_state(Some(&token)), TokenState::Invalid);
    }
}
