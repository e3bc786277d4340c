//! List Reports Use Case
//!
//! A leader sees every report of their own department and nothing else.

use kernel::department::Department;
use std::sync::Arc;

use crate::domain::entities::{Member, ReportWithSubmitter};
use crate::domain::repository::ReportRepository;
use crate::domain::services::leader_department;
use crate::error::ReportResult;

#[derive(Debug)]
pub struct ListReportsOutput {
    pub department: Department,
    /// Newest first
    pub reports: Vec<ReportWithSubmitter>,
}

pub struct ListReportsUseCase<R>
where
    R: ReportRepository,
{
    repo: Arc<R>,
}

impl<R> ListReportsUseCase<R>
where
    R: ReportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, member: &Member) -> ReportResult<ListReportsOutput> {
        let department = leader_department(member)?;
        let reports = self.repo.list_by_department(department).await?;

        tracing::debug!(
            user_id = %member.user_id,
            department = department.slug(),
            count = reports.len(),
            "Listed reports"
        );

        Ok(ListReportsOutput {
            department,
            reports,
        })
    }
}
