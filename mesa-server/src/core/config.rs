//! Server configuration

use chrono_tz::Tz;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Server configuration, loaded once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP port
    pub http_port: u16,
    /// Working directory: database and log files live under here
    pub work_dir: String,
    /// Business timezone for schedule and advance-time checks
    pub timezone: Tz,
    /// Environment: development | staging | production
    pub environment: String,
    /// Resend API key; delivery is disabled when unset
    pub resend_api_key: Option<String>,
    /// Sender address for outbound notifications
    pub email_from: String,
    /// Master switch for email delivery
    pub email_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|_| format!("Invalid TIMEZONE: {name}"))?,
            Err(_) => chrono_tz::Europe::Madrid,
        };

        let email_enabled = std::env::var("EMAIL_ENABLED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(true);

        Ok(Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            timezone,
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            resend_api_key: std::env::var("RESEND_API_KEY").ok().filter(|s| !s.is_empty()),
            email_from: std::env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "reservas@mesa.example".into()),
            email_enabled,
        })
    }

    /// Path of the SQLite database file
    pub fn database_path(&self) -> String {
        format!("{}/mesa.db", self.work_dir)
    }
}
