//! One-Time Passcode
//!
//! Six ASCII digits, uniformly sampled from 100000..=999999 so the code
//! never starts with a zero.

use std::fmt;

use platform::crypto::constant_time_eq;
use rand::Rng;

pub const OTP_LENGTH: usize = 6;

#[derive(Clone, PartialEq, Eq)]
pub struct OtpCode(String);

impl OtpCode {
    /// Draw a fresh code from the thread-local CSPRNG
    pub fn generate() -> Self {
        let value: u32 = rand::rng().random_range(100_000..=999_999);
        Self(value.to_string())
    }

    /// Accept a user-supplied code if it is exactly six ASCII digits
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() == OTP_LENGTH && raw.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(raw.to_string()))
        } else {
            None
        }
    }

    /// Create from database value
    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact match, compared in constant time
    pub fn matches(&self, other: &OtpCode) -> bool {
        constant_time_eq(self.0.as_bytes(), other.0.as_bytes())
    }
}

impl fmt::Debug for OtpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OtpCode").field(&"[REDACTED]").finish()
    }
}
