//! User Entity
//!
//! A portal account: identity, credentials, role, department memberships
//! and the OTP verification state.
//!
//! ## OTP state
//! `pending_otp` is `Some` only between issuing a code and either a
//! successful verification or the next reissue. Code and expiry travel
//! together so one can never be set without the other.

use chrono::{DateTime, Duration, Utc};
use kernel::department::Department;
use kernel::id::UserId;
use kernel::role::Role;

use crate::domain::value_object::{
    department_set::DepartmentSet, display_name::DisplayName, email::Email, otp_code::OtpCode,
    user_password::UserPassword,
};
use crate::error::{AuthError, AuthResult};

/// Landing page for workers, whatever their memberships
pub const WORKER_LANDING_PATH: &str = "/workers";

/// An issued, not yet consumed, verification code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOtp {
    pub code: OtpCode,
    pub expires_at: DateTime<Utc>,
}

impl PendingOtp {
    pub fn issue(now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            code: OtpCode::generate(),
            expires_at: now + ttl,
        }
    }
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    pub name: DisplayName,
    pub email: Email,
    pub password_hash: UserPassword,
    pub role: Role,
    pub departments: DepartmentSet,
    pub is_verified: bool,
    pub pending_otp: Option<PendingOtp>,
    /// Time of the last OTP mail, used for the resend cooldown
    pub last_otp_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create an unverified user holding a freshly issued OTP
    pub fn new(
        name: DisplayName,
        email: Email,
        password_hash: UserPassword,
        role: Role,
        departments: DepartmentSet,
        otp: PendingOtp,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: UserId::new(),
            name,
            email,
            password_hash,
            role,
            departments,
            is_verified: false,
            pending_otp: Some(otp),
            last_otp_sent_at: Some(now),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace any pending code with a new one
    pub fn reissue_otp(&mut self, otp: PendingOtp, now: DateTime<Utc>) {
        self.pending_otp = Some(otp);
        self.last_otp_sent_at = Some(now);
        self.updated_at = now;
    }

    /// Check a supplied code without changing state
    ///
    /// A mismatch is reported before expiry, so an expired code only
    /// reports `OtpExpired` to someone who actually holds it.
    pub fn check_otp(&self, supplied: &str, now: DateTime<Utc>) -> AuthResult<()> {
        let pending = self.pending_otp.as_ref().ok_or(AuthError::InvalidOtp)?;
        let supplied = OtpCode::parse(supplied).ok_or(AuthError::InvalidOtp)?;

        if !pending.code.matches(&supplied) {
            return Err(AuthError::InvalidOtp);
        }
        if now >= pending.expires_at {
            return Err(AuthError::OtpExpired);
        }
        Ok(())
    }

    /// Mark the email as verified and consume the pending code
    pub fn mark_verified(&mut self, now: DateTime<Utc>) {
        self.is_verified = true;
        self.pending_otp = None;
        self.updated_at = now;
    }

    /// The leader's department, if this user is a leader
    pub fn leader_department(&self) -> Option<Department> {
        match self.role {
            Role::Leader => self.departments.single(),
            Role::Worker => None,
        }
    }

    /// Where the frontend should send this user after sign-in
    pub fn landing_path(&self) -> String {
        match self.leader_department() {
            Some(department) => department.leader_landing_path(),
            None => WORKER_LANDING_PATH.to_string(),
        }
    }
}
