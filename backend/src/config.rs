//! Server configuration loaded from the environment (and `.env`, see `main`).
//!
//! | Variable                  | Default          |
//! |---------------------------|------------------|
//! | `TOPSIS_HOST`             | `127.0.0.1`      |
//! | `TOPSIS_PORT`             | `5000`           |
//! | `TOPSIS_UPLOAD_DIR`       | `uploads`        |
//! | `TOPSIS_OUTPUT_DIR`       | `outputs`        |
//! | `TOPSIS_OPEN_BROWSER`     | `false`          |
//! | `TOPSIS_MAX_UPLOAD_BYTES` | `10485760`       |
//! | `SMTP_HOST`               | unset            |
//! | `SMTP_PORT`               | `587`            |
//! | `SMTP_FROM`               | `noreply@topsis.local` |
//! | `SMTP_USER`               | unset            |
//! | `SMTP_PASSWORD`           | unset            |
//! | `MAIL_OUTBOX_DIR`         | unset            |

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024; // 10 MB
const DEFAULT_SMTP_PORT: u16 = 587;
const DEFAULT_FROM_ADDRESS: &str = "noreply@topsis.local";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Where uploaded matrices are stored, named by content hash.
    pub upload_dir: PathBuf,
    /// Where result files are written before being mailed.
    pub output_dir: PathBuf,
    /// Open the served page in the default browser after start-up.
    pub open_browser: bool,
    pub max_upload_bytes: usize,
    pub mail: MailConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MailConfig {
    /// RFC 5322 "From" address of result mails.
    pub from_address: String,
    /// SMTP relay; takes precedence over the outbox.
    pub smtp: Option<SmtpConfig>,
    /// Directory receiving `.eml` files when no SMTP relay is configured.
    pub outbox_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Unparsable values fall
    /// back to their default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let smtp = lookup("SMTP_HOST")
            .filter(|h| !h.trim().is_empty())
            .map(|host| SmtpConfig {
                host,
                port: parsed(&lookup, "SMTP_PORT", DEFAULT_SMTP_PORT),
                user: lookup("SMTP_USER"),
                password: lookup("SMTP_PASSWORD"),
            });

        Self {
            host: lookup("TOPSIS_HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed(&lookup, "TOPSIS_PORT", DEFAULT_PORT),
            upload_dir: lookup("TOPSIS_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            output_dir: lookup("TOPSIS_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("outputs")),
            open_browser: parsed(&lookup, "TOPSIS_OPEN_BROWSER", false),
            max_upload_bytes: parsed(&lookup, "TOPSIS_MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES),
            mail: MailConfig {
                from_address: lookup("SMTP_FROM")
                    .unwrap_or_else(|| DEFAULT_FROM_ADDRESS.to_string()),
                smtp,
                outbox_dir: lookup("MAIL_OUTBOX_DIR").map(PathBuf::from),
            },
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_match_local_development() {
        let config = config(&[]);
        assert_eq!(config.url(), "http://127.0.0.1:5000");
        assert_eq!(config.upload_dir, PathBuf::from("uploads"));
        assert_eq!(config.output_dir, PathBuf::from("outputs"));
        assert!(!config.open_browser);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.mail.smtp, None);
        assert_eq!(config.mail.outbox_dir, None);
    }

    #[test]
    fn smtp_is_configured_by_host() {
        let config = config(&[
            ("SMTP_HOST", "smtp.example.com"),
            ("SMTP_USER", "bot"),
            ("SMTP_PASSWORD", "secret"),
        ]);
        assert_eq!(
            config.mail.smtp,
            Some(SmtpConfig {
                host: "smtp.example.com".to_string(),
                port: 587,
                user: Some("bot".to_string()),
                password: Some("secret".to_string()),
            })
        );
    }

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        let config = config(&[("TOPSIS_PORT", "http"), ("TOPSIS_OPEN_BROWSER", "true")]);
        assert_eq!(config.port, 5000);
        assert!(config.open_browser);
    }
}
