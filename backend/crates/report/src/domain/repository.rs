//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::department::Department;
use kernel::id::{ReportId, UserId};

use crate::domain::entities::{Member, ReportWithSubmitter, WorkerReport};
use crate::error::ReportResult;

/// Worker report repository trait
#[trait_variant::make(ReportRepository: Send)]
pub trait LocalReportRepository {
    async fn create(&self, report: &WorkerReport) -> ReportResult<()>;

    async fn find_by_id(&self, report_id: &ReportId) -> ReportResult<Option<WorkerReport>>;

    /// Reports of one department with their submitters, newest first
    async fn list_by_department(
        &self,
        department: Department,
    ) -> ReportResult<Vec<ReportWithSubmitter>>;

    /// Persist the rating fields of an existing report
    async fn save_rating(&self, report: &WorkerReport) -> ReportResult<()>;
}

/// Read access to portal accounts
#[trait_variant::make(MemberDirectory: Send)]
pub trait LocalMemberDirectory {
    async fn find_member(&self, user_id: &UserId) -> ReportResult<Option<Member>>;
}
