//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (random bytes, Base64, constant-time compare)
//! - Password hashing (Argon2id) and the portal password policy
//! - Cookie and bearer-token handling
//! - Stateless HMAC session tokens
//! - Cooldown rate limiting
//! - Outbound mail (SMTP or log transport)

pub mod cookie;
pub mod crypto;
pub mod mail;
pub mod password;
pub mod rate_limit;
pub mod token;
