//! Domain Layer - Business logic and entities
//!
//! This layer contains:
//! - Domain entities (WorkerReport, Member)
//! - Domain value objects (YesNo, ReportResponses, Rating)
//! - Domain services (department rules)
//! - Repository traits (interfaces)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
