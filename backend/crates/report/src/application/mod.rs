//! Application Layer - Use cases

pub mod check_session;
pub mod config;
pub mod leader_report;
pub mod list_reports;
pub mod rate_report;
pub mod submit_report;

pub use check_session::ResolveMemberUseCase;
pub use config::ReportConfig;
pub use leader_report::{LeaderReportInput, LeaderReportUseCase};
pub use list_reports::{ListReportsOutput, ListReportsUseCase};
pub use rate_report::{RateReportInput, RateReportUseCase};
pub use submit_report::{ResponsesInput, SubmitReportInput, SubmitReportUseCase};
