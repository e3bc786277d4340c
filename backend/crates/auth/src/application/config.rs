//! Application Configuration
//!
//! Configuration for the Auth application layer.

use chrono::Duration;
use platform::cookie::CookieConfig;
use platform::rate_limit::Cooldown;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session token lifetime (7 days)
    pub session_ttl: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Lifetime of an issued OTP (10 minutes)
    pub otp_ttl: Duration,
    /// Minimum spacing between two OTP sends (60 seconds)
    pub otp_resend_cooldown: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            session_ttl: Duration::days(platform::token::DEFAULT_SESSION_TTL_DAYS),
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            password_pepper: None,
            otp_ttl: Duration::minutes(10),
            otp_resend_cooldown: Duration::seconds(60),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Default::default()
        }
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn otp_cooldown(&self) -> Cooldown {
        Cooldown::new(self.otp_resend_cooldown)
    }

    /// Cookie settings for the session cookie
    pub fn session_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.session_ttl.num_seconds().max(0) as u64),
        }
    }
}
