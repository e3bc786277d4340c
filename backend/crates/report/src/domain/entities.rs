//! Domain Entities
//!
//! Core business entities for the report domain.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::department::Department;
use kernel::id::{ReportId, UserId};
use kernel::role::Role;

use crate::domain::value_objects::{Rating, ReportResponses};

/// A worker's weekly report
///
/// Content fields are written once at submission. `rating` and
/// `leader_comment` change only through [`WorkerReport::rate`].
#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub report_id: ReportId,
    pub user_id: UserId,
    pub department: Department,
    pub report_date: NaiveDate,
    pub responses: ReportResponses,
    pub rating: Option<Rating>,
    pub leader_comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl WorkerReport {
    /// Create an unrated report
    pub fn new(
        user_id: UserId,
        department: Department,
        report_date: NaiveDate,
        responses: ReportResponses,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            report_id: ReportId::new(),
            user_id,
            department,
            report_date,
            responses,
            rating: None,
            leader_comment: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the leader's rating and comment
    pub fn rate(&mut self, rating: Rating, comment: String, now: DateTime<Utc>) {
        self.rating = Some(rating);
        self.leader_comment = comment;
        self.updated_at = now;
    }
}

/// The user behind a session, as the report workflows see them
#[derive(Debug, Clone)]
pub struct Member {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub departments: Vec<Department>,
    pub is_verified: bool,
}

impl Member {
    /// The department a leader is responsible for
    pub fn leader_department(&self) -> Option<Department> {
        match (self.role, self.departments.as_slice()) {
            (Role::Leader, [only]) => Some(*only),
            _ => None,
        }
    }

    pub fn belongs_to(&self, department: Department) -> bool {
        self.departments.contains(&department)
    }
}

/// Submitter identity shown to leaders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct ReportWithSubmitter {
    pub report: WorkerReport,
    pub submitter: Submitter,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::YesNo;

    fn member(role: Role, departments: Vec<Department>) -> Member {
        Member {
            user_id: UserId::new(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            role,
            departments,
            is_verified: true,
        }
    }

    #[test]
    fn test_leader_department() {
        let leader = member(Role::Leader, vec![Department::Media]);
        assert_eq!(leader.leader_department(), Some(Department::Media));

        let worker = member(Role::Worker, vec![Department::Media]);
        assert_eq!(worker.leader_department(), None);

        let broken = member(Role::Leader, vec![Department::Media, Department::It]);
        assert_eq!(broken.leader_department(), None);
    }

    #[test]
    fn test_new_report_is_unrated_and_rate_overwrites() {
        let now = Utc::now();
        let responses =
            ReportResponses::new([YesNo::No; 5], Default::default()).unwrap();
        let mut report = WorkerReport::new(
            UserId::new(),
            Department::Media,
            now.date_naive(),
            responses,
            now,
        );
        assert!(report.rating.is_none());
        assert_eq!(report.leader_comment, "");

        report.rate(Rating::new(3).unwrap(), "ok".to_string(), now);
        report.rate(Rating::new(5).unwrap(), String::new(), now);
        assert_eq!(report.rating.map(|r| r.value()), Some(5));
        assert_eq!(report.leader_comment, "");
    }
}
