//! Sign Up Use Case
//!
//! Creates an unverified account and mails it a verification code. If the
//! mail cannot be sent the account is deleted again, so no account exists
//! that could never be verified.

use std::sync::Arc;

use chrono::Utc;
use kernel::role::Role;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::notifications::{OtpMailKind, otp_email};
use crate::domain::entity::user::{PendingOtp, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    department_set::DepartmentSet,
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Where the frontend goes to enter the emailed code
pub const OTP_PAGE_PATH: &str = "/otp-page";

/// Sign up input; every field is optional so absence is reported as 400
#[derive(Debug, Default)]
pub struct SignUpInput {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub departments: Option<Vec<String>>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub email: String,
    pub redirect_to: &'static str,
}

/// Sign up use case
pub struct SignUpUseCase<U, M>
where
    U: UserRepository,
    M: Mailer,
{
    user_repo: Arc<U>,
    mailer: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> SignUpUseCase<U, M>
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

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let (Some(name), Some(email), Some(password), Some(role)) =
            (input.name, input.email, input.password, input.role)
        else {
            return Err(AuthError::Validation("All fields are required".to_string()));
        };

        let name = DisplayName::new(name)?;
        let email = Email::new(email)?;
        let role: Role = role.parse()?;
        let departments = DepartmentSet::for_signup(role, input.departments)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(password)?;
        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let now = Utc::now();
        let otp = PendingOtp::issue(now, self.config.otp_ttl);
        let user = User::new(
            name,
            email,
            password_hash,
            role,
            departments,
            otp.clone(),
            now,
        );
        self.user_repo.create(&user).await?;

        let message = otp_email(&user, &otp, self.config.otp_ttl, OtpMailKind::Signup);
        if let Err(e) = self.mailer.send(message).await {
            tracing::error!(
                user_id = %user.user_id,
                error = %e,
                "OTP mail failed; rolling back signup"
            );
            self.user_repo.delete(&user.user_id).await?;
            return Err(AuthError::EmailDelivery(
                "Failed to send OTP email. Please try again.".to_string(),
            ));
        }

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            role = %user.role,
            "User signed up"
        );

        Ok(SignUpOutput {
            email: user.email.as_str().to_string(),
            redirect_to: OTP_PAGE_PATH,
        })
    }
}
