//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod health;

use auth::{AuthConfig, GateState, PgAuthRepository, access_gate, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use platform::mail::MailTransport;
use platform::token::SessionTokens;
use report::{PgReportRepository, ReportConfig, report_router};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "api=info,auth=info,report=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&settings.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Auth configuration
    let auth_config = AuthConfig {
        cookie_secure: settings.cookie_secure,
        password_pepper: settings.password_pepper.clone(),
        ..AuthConfig::default()
    };

    // One signing key for every crate that reads the session
    let tokens = Arc::new(SessionTokens::new(
        &settings.session_secret,
        auth_config.session_ttl,
    )?);

    let mailer = MailTransport::from_config(settings.mail.as_ref())?;
    tracing::info!(transport = mailer.name(), "Mail transport ready");

    let mut report_config = ReportConfig::default();
    if let Some(recipient) = settings.leader_report_recipient.clone() {
        report_config = report_config.with_leader_report_recipient(recipient);
    } else {
        tracing::warn!("LEADER_REPORT_RECIPIENT is not set, leader reports are disabled");
    }

    // CORS configuration
    let allowed_origins: Vec<http::HeaderValue> = settings
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    // Static pages, guarded by the access gate
    let gate = GateState::new(tokens.clone(), auth_config.session_cookie_name.as_str());
    let frontend = Router::new()
        .fallback_service(
            ServeDir::new(&settings.frontend_dir).append_index_html_on_directories(true),
        )
        .layer(middleware::from_fn_with_state(gate, access_gate));

    // Build router
    let app = Router::new()
        .nest(
            "/api/auth",
            auth_router(
                PgAuthRepository::new(pool.clone()),
                mailer.clone(),
                tokens.clone(),
                auth_config,
            ),
        )
        .nest(
            "/api/reports",
            report_router(
                PgReportRepository::new(pool.clone()),
                mailer,
                tokens,
                report_config,
            ),
        )
        .route("/api/health", get(health::health).with_state(pool))
        .merge(frontend)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    tracing::info!("Listening on {}", settings.bind_addr);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
