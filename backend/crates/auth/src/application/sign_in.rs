//! Sign In Use Case
//!
//! Checks credentials and issues a stateless session token.

use std::sync::Arc;

use chrono::Utc;
use platform::token::{SessionClaims, SessionTokens};

use crate::application::config::AuthConfig;
use crate::application::profile::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Sign in input
#[derive(Debug, Default)]
pub struct SignInInput {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Sign in output
pub struct SignInOutput {
    /// Session token for cookie
    pub session_token: String,
    pub claims: SessionClaims,
    pub user: UserProfile,
    pub redirect_to: String,
}

/// Sign in use case
pub struct SignInUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<SessionTokens>,
    config: Arc<AuthConfig>,
}

impl<U> SignInUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<SessionTokens>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            tokens,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let (Some(email), Some(password)) = (input.email, input.password) else {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        };

        // Unknown and malformed addresses fail like a wrong password
        let email = Email::new(email).map_err(|_| AuthError::InvalidCredentials)?;
        let user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let raw_password =
            RawPassword::for_verification(password).ok_or(AuthError::InvalidCredentials)?;
        if !user
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_verified {
            tracing::info!(user_id = %user.user_id, "Sign-in refused: email not verified");
            return Err(AuthError::NotVerified);
        }

        let (session_token, claims) = self.tokens.issue(user.user_id, user.role, Utc::now());

        tracing::info!(
            user_id = %user.user_id,
            role = %user.role,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token,
            claims,
            redirect_to: user.landing_path(),
            user: UserProfile::from(&user),
        })
    }
}
