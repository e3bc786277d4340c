//! Rate Report Use Case

use chrono::Utc;
use kernel::id::ReportId;
use std::sync::Arc;

use crate::domain::entities::{Member, WorkerReport};
use crate::domain::repository::ReportRepository;
use crate::domain::services::{ensure_can_rate, ensure_verified};
use crate::domain::value_objects::Rating;
use crate::error::{ReportError, ReportResult};

/// Upper bound for a leader comment, in characters
pub const MAX_COMMENT_LEN: usize = 2_000;

#[derive(Debug, Default)]
pub struct RateReportInput {
    /// Textual rating, e.g. `"4"`
    pub rating: Option<String>,
    pub leader_comment: Option<String>,
}

pub struct RateReportUseCase<R>
where
    R: ReportRepository,
{
    repo: Arc<R>,
}

impl<R> RateReportUseCase<R>
where
    R: ReportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        member: &Member,
        report_id: ReportId,
        input: RateReportInput,
    ) -> ReportResult<WorkerReport> {
        if !member.role.is_leader() {
            return Err(ReportError::forbidden("Only leaders can rate reports"));
        }
        ensure_verified(member)?;

        let rating = input
            .rating
            .ok_or_else(|| ReportError::Validation("Rating is required".to_string()))
            .and_then(|raw| Rating::parse(&raw))?;

        let comment = input
            .leader_comment
            .map(|c| c.trim().to_string())
            .unwrap_or_default();
        if comment.chars().count() > MAX_COMMENT_LEN {
            return Err(ReportError::Validation(format!(
                "Comment must be at most {MAX_COMMENT_LEN} characters"
            )));
        }

        let mut report = self
            .repo
            .find_by_id(&report_id)
            .await?
            .ok_or(ReportError::ReportNotFound)?;

        ensure_can_rate(member, &report)?;

        report.rate(rating, comment, Utc::now());
        self.repo.save_rating(&report).await?;

        tracing::info!(
            report_id = %report.report_id,
            leader_id = %member.user_id,
            rating = rating.value(),
            "Report rated"
        );

        Ok(report)
    }
}
