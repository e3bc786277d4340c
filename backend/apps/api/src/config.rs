//! Server Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use anyhow::{Context, bail};
use platform::crypto::from_base64;
use platform::mail::MailConfig;
use platform::token::MIN_SECRET_LEN;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";
const DEFAULT_FRONTEND_DIR: &str = "frontend";
const DEFAULT_SMTP_PORT: u16 = 465;

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    /// HMAC key for session tokens
    pub session_secret: Vec<u8>,
    pub password_pepper: Option<Vec<u8>>,
    pub cookie_secure: bool,
    pub bind_addr: SocketAddr,
    pub frontend_origins: Vec<String>,
    pub frontend_dir: PathBuf,
    /// `None` logs mail instead of sending it
    pub mail: Option<MailConfig>,
    pub leader_report_recipient: Option<String>,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL must be set")?;

        let secret_b64 = get("SESSION_SECRET").context("SESSION_SECRET must be set")?;
        let session_secret =
            from_base64(&secret_b64).context("SESSION_SECRET must be base64")?;
        if session_secret.len() < MIN_SECRET_LEN {
            bail!("SESSION_SECRET must decode to at least {MIN_SECRET_LEN} bytes");
        }

        let password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => parse_bool("COOKIE_SECURE", &v)?,
            None => !cfg!(debug_assertions),
        };

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let frontend_dir = PathBuf::from(
            get("FRONTEND_DIR").unwrap_or_else(|| DEFAULT_FRONTEND_DIR.to_string()),
        );

        let mail = match get("SMTP_HOST") {
            Some(host) => {
                let username = get("SMTP_USER");
                let port = match get("SMTP_PORT") {
                    Some(p) => p.parse().context("SMTP_PORT must be a port number")?,
                    None => DEFAULT_SMTP_PORT,
                };
                let secure = match get("SMTP_SECURE") {
                    Some(v) => parse_bool("SMTP_SECURE", &v)?,
                    None => true,
                };
                let from = get("MAIL_FROM").unwrap_or_else(|| {
                    format!(
                        "\"EMGS Reports\" <{}>",
                        username.as_deref().unwrap_or("no-reply@localhost")
                    )
                });
                Some(MailConfig {
                    host,
                    port,
                    secure,
                    username,
                    password: get("SMTP_PASS"),
                    from,
                })
            }
            None => None,
        };

        Ok(Self {
            database_url,
            session_secret,
            password_pepper,
            cookie_secure,
            bind_addr,
            frontend_origins,
            frontend_dir,
            mail,
            leader_report_recipient: get("LEADER_REPORT_RECIPIENT"),
        })
    }
}

fn parse_bool(key: &str, raw: &str) -> anyhow::Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => bail!("{key} must be true or false"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::crypto::to_base64;
    use std::collections::HashMap;

    fn settings(pairs: &[(&str, &str)]) -> anyhow::Result<Settings> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    fn secret() -> String {
        to_base64(&[7u8; 32])
    }

    #[test]
    fn test_minimal_settings_use_defaults() {
        let s = settings(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", &secret())])
            .unwrap();

        assert_eq!(s.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(s.frontend_origins, vec![DEFAULT_FRONTEND_ORIGINS.to_string()]);
        assert_eq!(s.frontend_dir, PathBuf::from("frontend"));
        assert!(s.mail.is_none());
        assert!(s.leader_report_recipient.is_none());
        assert_eq!(s.session_secret.len(), 32);
    }

    #[test]
    fn test_session_secret_is_required_and_long_enough() {
        assert!(settings(&[("DATABASE_URL", "postgres://db")]).is_err());

        let short = to_base64(&[1u8; 16]);
        let err = settings(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", &short)])
            .unwrap_err();
        assert!(err.to_string().contains("at least 32 bytes"));

        assert!(
            settings(&[("DATABASE_URL", "postgres://db"), ("SESSION_SECRET", "%%%")]).is_err()
        );
    }

    #[test]
    fn test_smtp_settings() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://db"),
            ("SESSION_SECRET", &secret()),
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_PORT", "587"),
            ("SMTP_SECURE", "false"),
            ("SMTP_USER", "reports@example.com"),
            ("SMTP_PASS", "hunter2"),
        ])
        .unwrap();

        let mail = s.mail.unwrap();
        assert_eq!(mail.host, "smtp.example.com");
        assert_eq!(mail.port, 587);
        assert!(!mail.secure);
        assert_eq!(mail.from, "\"EMGS Reports\" <reports@example.com>");
    }

    #[test]
    fn test_origins_and_flags() {
        let s = settings(&[
            ("DATABASE_URL", "postgres://db"),
            ("SESSION_SECRET", &secret()),
            ("FRONTEND_ORIGINS", "https://a.example, https://b.example ,"),
            ("COOKIE_SECURE", "TRUE"),
        ])
        .unwrap();

        assert_eq!(s.frontend_origins, vec!["https://a.example", "https://b.example"]);
        assert!(s.cookie_secure);

        assert!(
            settings(&[
                ("DATABASE_URL", "postgres://db"),
                ("SESSION_SECRET", &secret()),
                ("COOKIE_SECURE", "sometimes"),
            ])
            .is_err()
        );
    }
}
