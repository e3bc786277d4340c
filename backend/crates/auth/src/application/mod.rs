//! Application Layer
//!
//! Use cases and application services.

pub mod check_session;
pub mod config;
pub mod notifications;
pub mod profile;
pub mod resend_otp;
pub mod sign_in;
pub mod sign_up;
pub mod verify_otp;

// Re-exports
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use profile::UserProfile;
pub use resend_otp::{ResendOtpInput, ResendOtpOutcome, ResendOtpUseCase};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use verify_otp::{VerifyOtpInput, VerifyOtpOutput, VerifyOtpUseCase};
