//! Domain Services
//!
//! Department rules for submitting and rating reports.

use kernel::department::Department;
use kernel::role::Role;

use crate::domain::entities::{Member, WorkerReport};
use crate::error::{ReportError, ReportResult};

/// Unverified accounts may not use any report workflow
pub fn ensure_verified(member: &Member) -> ReportResult<()> {
    if member.is_verified {
        Ok(())
    } else {
        Err(ReportError::forbidden("Please verify your email first"))
    }
}

/// Department a worker's report is filed under
///
/// An explicit choice must be one of the worker's memberships. Without
/// one, a worker with a single membership gets it; anyone else must
/// choose.
pub fn submission_department(
    member: &Member,
    requested: Option<&str>,
) -> ReportResult<Department> {
    ensure_verified(member)?;
    if member.role != Role::Worker {
        return Err(ReportError::forbidden("Only workers can submit reports"));
    }

    let requested = requested.map(str::trim).filter(|s| !s.is_empty());
    match (requested, member.departments.as_slice()) {
        (Some(raw), _) => {
            let department: Department = raw.parse()?;
            if member.belongs_to(department) {
                Ok(department)
            } else {
                Err(ReportError::forbidden(format!(
                    "You are not a member of {}",
                    department.display_name()
                )))
            }
        }
        (None, [only]) => Ok(*only),
        (None, _) => Err(ReportError::Validation("Department is required".to_string())),
    }
}

/// The department a leader acts for, or `Forbidden`
pub fn leader_department(member: &Member) -> ReportResult<Department> {
    ensure_verified(member)?;
    if member.role != Role::Leader {
        return Err(ReportError::forbidden("Only leaders can view reports"));
    }
    member.leader_department().ok_or_else(|| {
        ReportError::Internal(format!(
            "Leader {} does not have exactly one department",
            member.user_id
        ))
    })
}

/// A leader may rate only reports filed under their own department
pub fn ensure_can_rate(member: &Member, report: &WorkerReport) -> ReportResult<()> {
    if member.role != Role::Leader {
        return Err(ReportError::forbidden("Only leaders can rate reports"));
    }
    let department = leader_department(member)?;

    if department != report.department {
        return Err(ReportError::forbidden(
            "You can only rate reports from your own department",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ReportResponses, YesNo};
    use chrono::Utc;
    use kernel::id::UserId;

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

    fn report(department: Department) -> WorkerReport {
        let now = Utc::now();
        WorkerReport::new(
            UserId::new(),
            department,
            now.date_naive(),
            ReportResponses::new([YesNo::Yes; 5], Default::default()).unwrap(),
            now,
        )
    }

    #[test]
    fn test_single_membership_is_auto_selected() {
        let worker = member(Role::Worker, vec![Department::Media]);
        assert_eq!(submission_department(&worker, None).unwrap(), Department::Media);
        assert_eq!(submission_department(&worker, Some("  ")).unwrap(), Department::Media);
    }

    #[test]
    fn test_multiple_memberships_need_a_choice() {
        let worker = member(Role::Worker, vec![Department::Media, Department::It]);
        assert!(matches!(
            submission_department(&worker, None),
            Err(ReportError::Validation(_))
        ));
        assert_eq!(submission_department(&worker, Some("IT")).unwrap(), Department::It);
    }

    #[test]
    fn test_choice_must_be_a_membership() {
        let worker = member(Role::Worker, vec![Department::Media]);
        assert!(matches!(
            submission_department(&worker, Some("Parcel")),
            Err(ReportError::Forbidden(_))
        ));
        assert!(matches!(
            submission_department(&worker, Some("Accounting")),
            Err(ReportError::Validation(_))
        ));
    }

    #[test]
    fn test_leaders_cannot_submit() {
        let leader = member(Role::Leader, vec![Department::Media]);
        assert!(matches!(
            submission_department(&leader, None),
            Err(ReportError::Forbidden(_))
        ));
    }

    #[test]
    fn test_rating_requires_same_department_leader() {
        let media_report = report(Department::Media);

        let media_leader = member(Role::Leader, vec![Department::Media]);
        assert!(ensure_can_rate(&media_leader, &media_report).is_ok());

        let it_leader = member(Role::Leader, vec![Department::It]);
        assert!(matches!(
            ensure_can_rate(&it_leader, &media_report),
            Err(ReportError::Forbidden(_))
        ));

        let worker = member(Role::Worker, vec![Department::Media]);
        let err = ensure_can_rate(&worker, &media_report).unwrap_err();
        assert_eq!(err.to_string(), "Only leaders can rate reports");
    }

    #[test]
    fn test_unverified_accounts_are_refused() {
        let mut worker = member(Role::Worker, vec![Department::Media]);
        worker.is_verified = false;
        let err = submission_department(&worker, None).unwrap_err();
        assert_eq!(err.to_string(), "Please verify your email first");

        let mut leader = member(Role::Leader, vec![Department::Media]);
        leader.is_verified = false;
        assert!(matches!(leader_department(&leader), Err(ReportError::Forbidden(_))));
        assert!(matches!(
            ensure_can_rate(&leader, &report(Department::Media)),
            Err(ReportError::Forbidden(_))
        ));
    }
}
