//! Verify OTP Use Case
//!
//! Consumes the emailed code and marks the account verified. A failed
//! attempt leaves the stored code untouched.

use std::sync::Arc;

use chrono::Utc;

use crate::application::profile::UserProfile;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Where the frontend goes once the email is verified
pub const SIGN_IN_PAGE_PATH: &str = "/signin";

#[derive(Debug, Default)]
pub struct VerifyOtpInput {
    pub email: Option<String>,
    pub otp: Option<String>,
}

#[derive(Debug)]
pub struct VerifyOtpOutput {
    pub user: UserProfile,
    pub redirect_to: &'static str,
}

pub struct VerifyOtpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> VerifyOtpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, input: VerifyOtpInput) -> AuthResult<VerifyOtpOutput> {
        let (Some(email), Some(otp)) = (input.email, input.otp) else {
            return Err(AuthError::Validation("Email and OTP are required".to_string()));
        };
        let email = Email::new(email)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let now = Utc::now();
        user.check_otp(&otp, now)?;
        user.mark_verified(now);
        self.user_repo.update(&user).await?;

        tracing::info!(user_id = %user.user_id, email = %user.email, "Email verified");

        Ok(VerifyOtpOutput {
            user: UserProfile::from(&user),
            redirect_to: SIGN_IN_PAGE_PATH,
        })
    }
}
