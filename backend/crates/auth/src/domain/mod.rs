//! Domain Layer
//!
//! Contains entities, value objects, repository traits and the access gate.

pub mod entity;
pub mod repository;
pub mod services;
pub mod value_object;

// Re-exports
pub use entity::user::{PendingOtp, User};
pub use repository::UserRepository;
pub use services::{GateDecision, TokenState};
