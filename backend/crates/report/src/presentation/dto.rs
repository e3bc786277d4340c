//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, NaiveDate, Utc};
use kernel::department::Department;
use kernel::id::{ReportId, UserId};
use serde::{Deserialize, Serialize};

use crate::application::ResponsesInput;
use crate::domain::entities::{ReportWithSubmitter, Submitter, WorkerReport};
use crate::domain::value_objects::YesNo;

// ============================================================================
// Requests
// ============================================================================

/// Request for POST /api/reports
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReportRequest {
    pub department: Option<String>,
    pub report_date: Option<String>,
    pub responses: Option<ResponsesRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResponsesRequest {
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

impl From<ResponsesRequest> for ResponsesInput {
    fn from(r: ResponsesRequest) -> Self {
        Self {
            q1: r.q1,
            q2: r.q2,
            q3: r.q3,
            q4: r.q4,
            q5: r.q5,
            text1: r.text1,
            text2: r.text2,
            text3: r.text3,
            text4: r.text4,
        }
    }
}

/// Request for PUT /api/reports/{id}/rating
///
/// `rating` is taken as any JSON value so that `"4"` and `4` are both
/// accepted and anything else is a 400 rather than a 422.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateReportRequest {
    pub rating: Option<serde_json::Value>,
    pub leader_comment: Option<String>,
}

/// Request for POST /api/reports/leader
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderReportRequest {
    pub department: Option<String>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub summary: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ResponsesBody {
    pub q1: YesNo,
    pub q2: YesNo,
    pub q3: YesNo,
    pub q4: YesNo,
    pub q5: YesNo,
    pub text1: String,
    pub text2: String,
    pub text3: String,
    pub text4: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubmitterBody {
    pub name: String,
    pub email: String,
}

impl From<Submitter> for SubmitterBody {
    fn from(s: Submitter) -> Self {
        Self {
            name: s.name,
            email: s.email,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportBody {
    pub id: ReportId,
    pub user_id: UserId,
    pub department: Department,
    pub report_date: NaiveDate,
    pub responses: ResponsesBody,
    pub rating: Option<u8>,
    pub leader_comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submitter: Option<SubmitterBody>,
}

impl From<WorkerReport> for ReportBody {
    fn from(r: WorkerReport) -> Self {
        let [q1, q2, q3, q4, q5] = r.responses.answers;
        let [text1, text2, text3, text4] = r.responses.texts;
        Self {
            id: r.report_id,
            user_id: r.user_id,
            department: r.department,
            report_date: r.report_date,
            responses: ResponsesBody {
                q1,
                q2,
                q3,
                q4,
                q5,
                text1,
                text2,
                text3,
                text4,
            },
            rating: r.rating.map(|v| v.value()),
            leader_comment: r.leader_comment,
            created_at: r.created_at,
            updated_at: r.updated_at,
            submitter: None,
        }
    }
}

impl From<ReportWithSubmitter> for ReportBody {
    fn from(r: ReportWithSubmitter) -> Self {
        Self {
            submitter: Some(r.submitter.into()),
            ..r.report.into()
        }
    }
}

/// Response for a submitted or rated report
#[derive(Debug, Clone, Serialize)]
pub struct ReportMessageResponse {
    pub message: String,
    pub report: ReportBody,
}

/// Response for GET /api/reports
#[derive(Debug, Clone, Serialize)]
pub struct ReportListResponse {
    pub department: Department,
    pub reports: Vec<ReportBody>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
