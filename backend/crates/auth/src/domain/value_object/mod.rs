//! Value Object Module

pub mod department_set;
pub mod display_name;
pub mod email;
pub mod otp_code;
pub mod user_password;
