//! Report Router

use axum::{
    Router,
    routing::{get, post, put},
};
use platform::mail::{MailTransport, Mailer};
use platform::token::SessionTokens;
use std::sync::Arc;

use crate::application::config::ReportConfig;
use crate::domain::repository::{MemberDirectory, ReportRepository};
use crate::infra::postgres::PgReportRepository;
use crate::presentation::handlers::{self, ReportAppState};

/// Create the report router with PostgreSQL repository
pub fn report_router(
    repo: PgReportRepository,
    mailer: MailTransport,
    tokens: Arc<SessionTokens>,
    config: ReportConfig,
) -> Router {
    report_router_generic(repo, mailer, tokens, config)
}

/// Create a generic report router for any repository and mailer
pub fn report_router_generic<R, M>(
    repo: R,
    mailer: M,
    tokens: Arc<SessionTokens>,
    config: ReportConfig,
) -> Router
where
    R: ReportRepository + MemberDirectory + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let state = ReportAppState {
        repo: Arc::new(repo),
        mailer: Arc::new(mailer),
        tokens,
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_reports::<R, M>).post(handlers::submit_report::<R, M>),
        )
        .route("/{id}/rating", put(handlers::rate_report::<R, M>))
        .route("/leader", post(handlers::leader_report::<R, M>))
        .with_state(state)
}
