//! Application Configuration
//!
//! Configuration for the report application layer.

/// Report application configuration
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Cookie carrying the session token
    pub session_cookie_name: String,
    /// Inbox for leader weekly reports; the feature is off when `None`
    pub leader_report_recipient: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "token".to_string(),
            leader_report_recipient: None,
        }
    }
}

impl ReportConfig {
    pub fn with_leader_report_recipient(mut self, recipient: impl Into<String>) -> Self {
        self.leader_report_recipient = Some(recipient.into());
        self
    }
}
