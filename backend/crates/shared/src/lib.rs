//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the vocabulary that the auth and report domains
//! must agree on:
//! - Common error types and result aliases
//! - Typed ids for users and reports
//! - The user role and the closed department enumeration
//!
//! Only things with a single meaning across every crate belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod department;
pub mod id;
pub mod role;
