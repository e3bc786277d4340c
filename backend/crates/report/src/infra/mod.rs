//! Infrastructure Layer

pub mod memory;
pub mod postgres;

pub use memory::InMemoryReportRepository;
pub use postgres::PgReportRepository;
