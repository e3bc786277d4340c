//! Resend OTP Use Case
//!
//! Issues a replacement code, at most once per cooldown window. The new
//! code is persisted before mailing; a mail failure is reported but the
//! new code and send time stay in place.

use std::sync::Arc;

use chrono::Utc;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::notifications::{OtpMailKind, otp_email};
use crate::domain::entity::user::PendingOtp;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Default)]
pub struct ResendOtpInput {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOtpOutcome {
    Sent,
    /// Nothing to do; the account is already verified
    AlreadyVerified,
}

pub struct ResendOtpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> ResendOtpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    pub fn new(user_repo: Arc<U>, mailer: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            mailer,
            config,
        }
    }

    pub async fn execute(&self, input: ResendOtpInput) -> AuthResult<ResendOtpOutcome> {
        let email = Email::required(input.email)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if user.is_verified {
            return Ok(ResendOtpOutcome::AlreadyVerified);
        }

        let now = Utc::now();
        let check = self.config.otp_cooldown().check(user.last_otp_sent_at, now);
        if !check.allowed {
            return Err(AuthError::OtpCooldown {
                retry_after_secs: check.retry_after_secs,
            });
        }

        let otp = PendingOtp::issue(now, self.config.otp_ttl);
        user.reissue_otp(otp.clone(), now);
        self.user_repo.update(&user).await?;

        self.mailer
            .send(otp_email(&user, &otp, self.config.otp_ttl, OtpMailKind::Resend))
            .await?;

        tracing::info!(user_id = %user.user_id, "OTP resent");
        Ok(ResendOtpOutcome::Sent)
    }
}
