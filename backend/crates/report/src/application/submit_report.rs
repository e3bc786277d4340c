//! Submit Report Use Case

use chrono::Utc;
use std::sync::Arc;

use crate::domain::entities::{Member, WorkerReport};
use crate::domain::repository::ReportRepository;
use crate::domain::services::submission_department;
use crate::domain::value_objects::{ReportResponses, YesNo, parse_report_date};
use crate::error::{ReportError, ReportResult};

/// Raw answers as they arrive from the form
#[derive(Debug, Clone, Default)]
pub struct ResponsesInput {
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub q5: Option<String>,
    pub text1: Option<String>,
    pub text2: Option<String>,
    pub text3: Option<String>,
    pub text4: Option<String>,
}

impl ResponsesInput {
    fn into_responses(self) -> ReportResult<ReportResponses> {
        let answers = [
            YesNo::parse("q1", self.q1.as_deref())?,
            YesNo::parse("q2", self.q2.as_deref())?,
            YesNo::parse("q3", self.q3.as_deref())?,
            YesNo::parse("q4", self.q4.as_deref())?,
            YesNo::parse("q5", self.q5.as_deref())?,
        ];
        let texts = [self.text1, self.text2, self.text3, self.text4]
            .map(|t| t.map(|s| s.trim().to_string()).unwrap_or_default());
        ReportResponses::new(answers, texts)
    }
}

#[derive(Debug, Default)]
pub struct SubmitReportInput {
    pub department: Option<String>,
    pub report_date: Option<String>,
    pub responses: Option<ResponsesInput>,
}

pub struct SubmitReportUseCase<R>
where
    R: ReportRepository,
{
    repo: Arc<R>,
}

impl<R> SubmitReportUseCase<R>
where
    R: ReportRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        member: &Member,
        input: SubmitReportInput,
    ) -> ReportResult<WorkerReport> {
        let department = submission_department(member, input.department.as_deref())?;
        let report_date = parse_report_date(input.report_date.as_deref())?;
        let responses = input
            .responses
            .ok_or_else(|| ReportError::Validation("Responses are required".to_string()))?
            .into_responses()?;

        let report = WorkerReport::new(
            member.user_id,
            department,
            report_date,
            responses,
            Utc::now(),
        );
        self.repo.create(&report).await?;

        tracing::info!(
            report_id = %report.report_id,
            user_id = %member.user_id,
            department = department.slug(),
            "Report submitted"
        );

        Ok(report)
    }
}
