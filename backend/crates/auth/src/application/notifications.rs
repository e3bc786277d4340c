//! Verification Mail
//!
//! Message bodies for the OTP emails sent at signup and on resend.

use chrono::Duration;
use platform::mail::{OutgoingEmail, escape_html};

use crate::domain::entity::user::{PendingOtp, User};

/// Which step of the flow issued the code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtpMailKind {
    Signup,
    Resend,
}

pub fn otp_email(user: &User, otp: &PendingOtp, ttl: Duration, kind: OtpMailKind) -> OutgoingEmail {
    let code = otp.code.as_str();
    let minutes = ttl.num_minutes();
    let name = escape_html(user.name.as_str());

    let subject = match kind {
        OtpMailKind::Signup => "Your EMGS OTP Verification",
        OtpMailKind::Resend => "Your new EMGS OTP",
    };

    let text = format!(
        "Hello {},\n\nYour one-time password (OTP) is: {}\nThis code will expire in {} minutes.\n\nIf you didn't request this, please ignore this email.\n\nThe EMGS Team",
        user.name, code, minutes
    );

    let html = format!(
        r#"<div style="font-family: Arial, sans-serif; padding: 20px; background-color: #fafafa; border-radius: 10px; color: #333;">
  <h2 style="color: #d32f2f;">EMGS Email Verification</h2>
  <p>Hello <b>{name}</b>,</p>
  <p>Your one-time password (OTP) is:</p>
  <div style="font-size: 24px; font-weight: bold; color: #000; margin: 10px 0;">{code}</div>
  <p>This code will expire in <b>{minutes} minutes</b>.</p>
  <p>If you didn't request this, please ignore this email.</p>
  <p>The EMGS Team</p>
</div>"#
    );

    OutgoingEmail {
        to: user.email.as_str().to_string(),
        subject: subject.to_string(),
        text,
        html,
    }
}
