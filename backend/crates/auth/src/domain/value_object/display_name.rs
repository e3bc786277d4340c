//! Display Name Value Object
//!
//! Free-form personal name shown on dashboards and in mail greetings.
//! NFKC normalised and trimmed; internal whitespace runs collapse to one space.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const DISPLAY_NAME_MAX_LENGTH: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();

        if normalized.chars().any(char::is_control) {
            return Err(AppError::bad_request("Name contains invalid characters"));
        }

        let collapsed = normalized.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return Err(AppError::bad_request("Name is required"));
        }
        if collapsed.chars().count() > DISPLAY_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Name must be at most {} characters",
                DISPLAY_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(collapsed))
    }

    pub fn required(raw: Option<String>) -> AppResult<Self> {
        match raw {
            Some(raw) => Self::new(raw),
            None => Err(AppError::bad_request("Name is required")),
        }
    }

    pub fn from_db(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
