//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use kernel::id::ReportId;
use platform::cookie::extract_session_token;
use platform::mail::Mailer;
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::application::config::ReportConfig;
use crate::application::{
    LeaderReportInput, LeaderReportUseCase, ListReportsUseCase, RateReportInput,
    RateReportUseCase, ResolveMemberUseCase, SubmitReportInput, SubmitReportUseCase,
};
use crate::domain::entities::Member;
use crate::domain::repository::{MemberDirectory, ReportRepository};
use crate::error::{ReportError, ReportResult};
use crate::presentation::dto::{
    LeaderReportRequest, MessageResponse, RateReportRequest, ReportListResponse,
    ReportMessageResponse, SubmitReportRequest,
};

/// Shared state for report handlers
#[derive(Clone)]
pub struct ReportAppState<R, M>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub tokens: Arc<SessionTokens>,
    pub config: Arc<ReportConfig>,
}

impl<R, M> ReportAppState<R, M>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    /// Resolve the account behind the request's session
    async fn member(&self, headers: &HeaderMap) -> ReportResult<Member> {
        let token = extract_session_token(headers, &self.config.session_cookie_name);
        ResolveMemberUseCase::new(self.repo.clone(), self.tokens.clone())
            .execute(token.as_deref())
            .await
    }
}

/// POST /api/reports
pub async fn submit_report<R, M>(
    State(state): State<ReportAppState<R, M>>,
    headers: HeaderMap,
    Json(req): Json<SubmitReportRequest>,
) -> ReportResult<impl IntoResponse>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let member = state.member(&headers).await?;

    let input = SubmitReportInput {
        department: req.department,
        report_date: req.report_date,
        responses: req.responses.map(Into::into),
    };
    let report = SubmitReportUseCase::new(state.repo.clone())
        .execute(&member, input)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ReportMessageResponse {
            message: "Report submitted successfully".to_string(),
            report: report.into(),
        }),
    ))
}

/// GET /api/reports
pub async fn list_reports<R, M>(
    State(state): State<ReportAppState<R, M>>,
    headers: HeaderMap,
) -> ReportResult<Json<ReportListResponse>>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let member = state.member(&headers).await?;
    let output = ListReportsUseCase::new(state.repo.clone())
        .execute(&member)
        .await?;

    Ok(Json(ReportListResponse {
        department: output.department,
        reports: output.reports.into_iter().map(Into::into).collect(),
    }))
}

/// PUT /api/reports/{id}/rating
pub async fn rate_report<R, M>(
    State(state): State<ReportAppState<R, M>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<RateReportRequest>,
) -> ReportResult<Json<ReportMessageResponse>>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let member = state.member(&headers).await?;
    let report_id: ReportId = id.parse().map_err(|_| ReportError::ReportNotFound)?;

    let input = RateReportInput {
        rating: req.rating.map(|v| match v {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        }),
        leader_comment: req.leader_comment,
    };
    let report = RateReportUseCase::new(state.repo.clone())
        .execute(&member, report_id, input)
        .await?;

    Ok(Json(ReportMessageResponse {
        message: "Rating updated successfully".to_string(),
        report: report.into(),
    }))
}

/// POST /api/reports/leader
pub async fn leader_report<R, M>(
    State(state): State<ReportAppState<R, M>>,
    headers: HeaderMap,
    Json(req): Json<LeaderReportRequest>,
) -> ReportResult<impl IntoResponse>
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let member = state.member(&headers).await?;

    let input = LeaderReportInput {
        department: req.department,
        q1: req.q1,
        q2: req.q2,
        q3: req.q3,
        q4: req.q4,
        summary: req.summary,
    };
    LeaderReportUseCase::new(state.mailer.clone(), state.config.clone())
        .execute(&member, input)
        .await?;

    Ok((
        StatusCode::ACCEPTED,
        Json(MessageResponse {
            message: "Leader report sent".to_string(),
        }),
    ))
}
