//! Presentation Layer - HTTP handlers, DTOs, router

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ReportAppState;
pub use router::{report_router, report_router_generic};
