//! User Role
//!
//! The two roles of the portal. Carried inside session tokens, so it lives
//! in the kernel where both the auth and report crates can read it.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::app_error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Submits weekly reports for one or more departments
    Worker,
    /// Reviews and rates the reports of exactly one department
    Leader,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::Worker => "worker",
            Role::Leader => "leader",
        }
    }

    #[inline]
    pub const fn is_leader(&self) -> bool {
        matches!(self, Role::Leader)
    }

    #[inline]
    pub const fn is_worker(&self) -> bool {
        matches!(self, Role::Worker)
    }

    /// Root path of the area this role may browse
    #[inline]
    pub const fn area_path(&self) -> &'static str {
        match self {
            Role::Worker => "/workers",
            Role::Leader => "/leaders",
        }
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "worker" => Ok(Role::Worker),
            "leader" => Ok(Role::Leader),
            _ => Err(AppError::bad_request("Role must be either worker or leader")),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_from_str() {
        assert_eq!("worker".parse::<Role>().unwrap(), Role::Worker);
        assert_eq!(" Leader ".parse::<Role>().unwrap(), Role::Leader);
        assert_eq!("admin".parse::<Role>().unwrap_err().status_code(), 400);
    }

    #[test]
    fn test_role_display_and_serde() {
        assert_eq!(Role::Worker.to_string(), "worker");
        assert_eq!(serde_json::to_string(&Role::Leader).unwrap(), "\"leader\"");
        let role: Role = serde_json::from_str("\"worker\"").unwrap();
        assert_eq!(role, Role::Worker);
    }

    #[test]
    fn test_area_paths() {
        assert_eq!(Role::Worker.area_path(), "/workers");
        assert_eq!(Role::Leader.area_path(), "/leaders");
        assert!(Role::Leader.is_leader());
        assert!(!Role::Leader.is_worker());
    }
}
