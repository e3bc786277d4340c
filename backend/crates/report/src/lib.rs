//! Worker Report Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers
//!
//! ## Access Model
//! - Every endpoint needs a session token (cookie or bearer)
//! - Workers submit reports only for departments they belong to
//! - A leader lists and rates only their own department's reports
//! - Ratings are whole numbers from 1 to 5

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::ReportConfig;
pub use error::{ReportError, ReportResult};
pub use infra::memory::InMemoryReportRepository;
pub use infra::postgres::PgReportRepository;
pub use presentation::router::{report_router, report_router_generic};
