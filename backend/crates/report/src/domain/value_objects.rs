//! Domain Value Objects
//!
//! Answer set and rating of a worker report.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ReportError, ReportResult};

/// Answer to one of the five yes/no questions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum YesNo {
    Yes,
    No,
}

impl YesNo {
    /// Parse an answer for question `label`, case-insensitively
    pub fn parse(label: &str, raw: Option<&str>) -> ReportResult<Self> {
        let raw = raw.map(str::trim).filter(|s| !s.is_empty()).ok_or_else(|| {
            ReportError::Validation(format!("Answer to {label} is required"))
        })?;

        match raw.to_ascii_lowercase().as_str() {
            "yes" => Ok(YesNo::Yes),
            "no" => Ok(YesNo::No),
            _ => Err(ReportError::Validation(format!(
                "Answer to {label} must be Yes or No"
            ))),
        }
    }

    pub fn from_bool(yes: bool) -> Self {
        if yes { YesNo::Yes } else { YesNo::No }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, YesNo::Yes)
    }
}

impl fmt::Display for YesNo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            YesNo::Yes => "Yes",
            YesNo::No => "No",
        })
    }
}

/// Fixed answer set: five yes/no answers and four free-text answers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportResponses {
    pub answers: [YesNo; 5],
    pub texts: [String; 4],
}

/// Upper bound for a single free-text answer, in characters
pub const MAX_TEXT_LEN: usize = 5_000;

impl ReportResponses {
    pub fn new(answers: [YesNo; 5], texts: [String; 4]) -> ReportResult<Self> {
        if let Some(i) = texts.iter().position(|t| t.chars().count() > MAX_TEXT_LEN) {
            return Err(ReportError::Validation(format!(
                "text{} must be at most {MAX_TEXT_LEN} characters",
                i + 1
            )));
        }
        Ok(Self { answers, texts })
    }
}

/// Leader rating, 1 to 5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Parse a rating given as text (`"4"`); fractions and out-of-range values fail
    pub fn parse(raw: &str) -> ReportResult<Self> {
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| {
                ReportError::Validation("Rating must be a whole number from 1 to 5".to_string())
            })
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

/// Parse a report date given as `YYYY-MM-DD` or an RFC 3339 timestamp
pub fn parse_report_date(raw: Option<&str>) -> ReportResult<NaiveDate> {
    let raw = raw
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ReportError::Validation("Report date is required".to_string()))?;

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map_err(|_| ReportError::Validation("Report date must be a valid date".to_string()))
}
