//! Leader Weekly Report Use Case
//!
//! A leader's weekly summary is mailed to a fixed inbox and not stored.

use kernel::department::Department;
use platform::mail::{Mailer, OutgoingEmail, escape_html};
use std::sync::Arc;

use crate::application::config::ReportConfig;
use crate::domain::entities::Member;
use crate::domain::services::leader_department;
use crate::error::{ReportError, ReportResult};

const NO_SUMMARY: &str = "No additional summary provided.";

#[derive(Debug, Default)]
pub struct LeaderReportInput {
    /// Optional; must match the leader's own department when given
    pub department: Option<String>,
    pub q1: Option<String>,
    pub q2: Option<String>,
    pub q3: Option<String>,
    pub q4: Option<String>,
    pub summary: Option<String>,
}

pub struct LeaderReportUseCase<M>
where
    M: Mailer,
{
    mailer: Arc<M>,
    config: Arc<ReportConfig>,
}

impl<M> LeaderReportUseCase<M>
where
    M: Mailer,
{
    pub fn new(mailer: Arc<M>, config: Arc<ReportConfig>) -> Self {
        Self { mailer, config }
    }

    pub async fn execute(&self, member: &Member, input: LeaderReportInput) -> ReportResult<()> {
        let department = leader_department(member)?;

        if let Some(raw) = input.department.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            let requested: Department = raw.parse()?;
            if requested != department {
                return Err(ReportError::forbidden(
                    "You can only report for your own department",
                ));
            }
        }

        let answers = [input.q1, input.q2, input.q3, input.q4]
            .map(|a| a.map(|s| s.trim().to_string()).unwrap_or_default());
        if answers.iter().any(String::is_empty) {
            return Err(ReportError::Validation("All fields are required".to_string()));
        }
        let summary = input
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        let recipient = self
            .config
            .leader_report_recipient
            .clone()
            .ok_or(ReportError::RecipientNotConfigured)?;

        let email = leader_report_email(recipient, member, department, &answers, summary.as_deref());
        self.mailer.send(email).await?;

        tracing::info!(
            user_id = %member.user_id,
            department = department.slug(),
            "Leader report sent"
        );
        Ok(())
    }
}

fn leader_report_email(
    to: String,
    member: &Member,
    department: Department,
    answers: &[String; 4],
    summary: Option<&str>,
) -> OutgoingEmail {
    let summary = summary.unwrap_or(NO_SUMMARY);

    let mut text = format!(
        "Leader Weekly Report\n\nName: {}\nDepartment: {}\n\n",
        member.name,
        department.display_name()
    );
    for (i, answer) in answers.iter().enumerate() {
        text.push_str(&format!("Q{}: {}\n", i + 1, answer));
    }
    text.push_str(&format!("\nSummary:\n{summary}\n"));

    let mut html = format!(
        "<h2>Leader Weekly Report</h2>\n<p><b>Name:</b> {}</p>\n<p><b>Department:</b> {}</p>\n<hr />\n",
        escape_html(&member.name),
        department.display_name()
    );
    for (i, answer) in answers.iter().enumerate() {
        html.push_str(&format!("<p><b>Q{}:</b> {}</p>\n", i + 1, escape_html(answer)));
    }
    html.push_str(&format!(
        "<hr />\n<p><b>Summary:</b></p>\n<p>{}</p>\n",
        escape_html(summary)
    ));

    OutgoingEmail {
        to,
        subject: format!("New Leader Report - {}", department.display_name()),
        text,
        html,
    }
}
