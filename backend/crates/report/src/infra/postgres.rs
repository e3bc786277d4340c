//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::department::Department;
use kernel::id::{ReportId, UserId};
use kernel::role::Role;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Member, ReportWithSubmitter, Submitter, WorkerReport};
use crate::domain::repository::{MemberDirectory, ReportRepository};
use crate::domain::value_objects::{Rating, ReportResponses, YesNo};
use crate::error::{ReportError, ReportResult};

/// PostgreSQL-backed report repository
#[derive(Clone)]
pub struct PgReportRepository {
    pool: PgPool,
}

impl PgReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const REPORT_COLUMNS: &str = r#"
    r.report_id,
    r.user_id,
    r.department,
    r.report_date,
    r.q1, r.q2, r.q3, r.q4, r.q5,
    r.text1, r.text2, r.text3, r.text4,
    r.rating,
    r.leader_comment,
    r.created_at,
    r.updated_at
"#;

// ============================================================================
// Report Repository Implementation
// ============================================================================

impl ReportRepository for PgReportRepository {
    async fn create(&self, report: &WorkerReport) -> ReportResult<()> {
        let [q1, q2, q3, q4, q5] = report.responses.answers.map(|a| a.is_yes());
        let [text1, text2, text3, text4] = &report.responses.texts;

        sqlx::query(
            r#"
            INSERT INTO worker_reports (
                report_id,
                user_id,
                department,
                report_date,
                q1, q2, q3, q4, q5,
                text1, text2, text3, text4,
                rating,
                leader_comment,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(report.report_id.as_uuid())
        .bind(report.user_id.as_uuid())
        .bind(report.department.slug())
        .bind(report.report_date)
        .bind(q1)
        .bind(q2)
        .bind(q3)
        .bind(q4)
        .bind(q5)
        .bind(text1)
        .bind(text2)
        .bind(text3)
        .bind(text4)
        .bind(report.rating.map(|r| i16::from(r.value())))
        .bind(&report.leader_comment)
        .bind(report.created_at)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, report_id: &ReportId) -> ReportResult<Option<WorkerReport>> {
        let row = sqlx::query_as::<_, ReportRow>(&format!(
            "SELECT {REPORT_COLUMNS} FROM worker_reports r WHERE r.report_id = $1"
        ))
        .bind(report_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(ReportRow::into_report).transpose()
    }

    async fn list_by_department(
        &self,
        department: Department,
    ) -> ReportResult<Vec<ReportWithSubmitter>> {
        let rows = sqlx::query_as::<_, ReportWithSubmitterRow>(&format!(
            r#"
            SELECT {REPORT_COLUMNS},
                u.name AS submitter_name,
                u.email AS submitter_email
            FROM worker_reports r
            JOIN users u ON u.user_id = r.user_id
            WHERE r.department = $1
            ORDER BY r.created_at DESC
            "#
        ))
        .bind(department.slug())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                Ok(ReportWithSubmitter {
                    submitter: Submitter {
                        name: row.submitter_name,
                        email: row.submitter_email,
                    },
                    report: row.report.into_report()?,
                })
            })
            .collect()
    }

    async fn save_rating(&self, report: &WorkerReport) -> ReportResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE worker_reports SET
                rating = $2,
                leader_comment = $3,
                updated_at = $4
            WHERE report_id = $1
            "#,
        )
        .bind(report.report_id.as_uuid())
        .bind(report.rating.map(|r| i16::from(r.value())))
        .bind(&report.leader_comment)
        .bind(report.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ReportError::ReportNotFound);
        }

        Ok(())
    }
}

// ============================================================================
// Member Directory Implementation
// ============================================================================

impl MemberDirectory for PgReportRepository {
    async fn find_member(&self, user_id: &UserId) -> ReportResult<Option<Member>> {
        let row = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, name, email, role, departments, is_verified
            FROM users
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        row.map(MemberRow::into_member).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct ReportRow {
    report_id: Uuid,
    user_id: Uuid,
    department: String,
    report_date: NaiveDate,
    q1: bool,
    q2: bool,
    q3: bool,
    q4: bool,
    q5: bool,
    text1: String,
    text2: String,
    text3: String,
    text4: String,
    rating: Option<i16>,
    leader_comment: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl ReportRow {
    fn into_report(self) -> ReportResult<WorkerReport> {
        let department = Department::from_slug(&self.department)
            .ok_or_else(|| ReportError::Internal(format!("Invalid department: {}", self.department)))?;

        let rating = self
            .rating
            .map(|v| {
                Rating::new(i64::from(v))
                    .ok_or_else(|| ReportError::Internal(format!("Invalid rating: {}", v)))
            })
            .transpose()?;

        let answers = [self.q1, self.q2, self.q3, self.q4, self.q5].map(YesNo::from_bool);
        let responses = ReportResponses {
            answers,
            texts: [self.text1, self.text2, self.text3, self.text4],
        };

        Ok(WorkerReport {
            report_id: ReportId::from_uuid(self.report_id),
            user_id: UserId::from_uuid(self.user_id),
            department,
            report_date: self.report_date,
            responses,
            rating,
            leader_comment: self.leader_comment,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ReportWithSubmitterRow {
    #[sqlx(flatten)]
    report: ReportRow,
    submitter_name: String,
    submitter_email: String,
}

#[derive(sqlx::FromRow)]
struct MemberRow {
    user_id: Uuid,
    name: String,
    email: String,
    role: String,
    departments: Vec<String>,
    is_verified: bool,
}

impl MemberRow {
    fn into_member(self) -> ReportResult<Member> {
        let role: Role = self
            .role
            .parse()
            .map_err(|_| ReportError::Internal(format!("Invalid role: {}", self.role)))?;

        let mut departments: Vec<Department> = self
            .departments
            .iter()
            .filter_map(|slug| Department::from_slug(slug))
            .collect();
        departments.sort();
        departments.dedup();

        Ok(Member {
            user_id: UserId::from_uuid(self.user_id),
            name: self.name,
            email: self.email,
            role,
            departments,
            is_verified: self.is_verified,
        })
    }
}
