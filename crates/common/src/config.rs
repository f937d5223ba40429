use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_TIME_SECS: u64 = 600;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// What to do with the cursor after a failed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorPolicy {
    /// Jump the cursor to "now", skipping updates made during the outage.
    #[default]
    Reset,
    /// Keep the last successfully reported cursor and re-read the window.
    Keep,
}

impl std::str::FromStr for CursorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reset" => Ok(CursorPolicy::Reset),
            "keep" => Ok(CursorPolicy::Keep),
            other => Err(format!("expected `reset` or `keep`, got `{other}`")),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct AppConfig {
    /// Homework API token, sent as `Authorization: OAuth <token>`
    pub practicum_token: String,

    /// Telegram bot token
    pub telegram_token: String,

    /// Chat that receives every notification
    pub chat_id: String,

    /// Homework status endpoint
    pub endpoint: String,

    /// Telegram Bot API base URL
    pub telegram_api_url: String,

    /// Pause between two poll cycles (default: 600s)
    pub retry_time: Duration,

    /// Timeout applied to every outgoing HTTP request (default: 30s)
    pub request_timeout: Duration,

    pub cursor_policy: CursorPolicy,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api_url", &self.telegram_api_url)
            .field("retry_time", &self.retry_time)
            .field("request_timeout", &self.request_timeout)
            .field("cursor_policy", &self.cursor_policy)
            .finish()
    }
}

impl AppConfig {
    /// Load configuration from `.env` (if any) and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Required credentials are checked in a fixed order and the first one
    /// that is absent or blank is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::MissingVariable(name))
        };

        let practicum_token = required("TOKEN_PRACTICUM")?;
        let telegram_token = required("TOKEN_TELEGRAM")?;
        let chat_id = required("MY_CHAT_ID")?;

        let secs = |name: &'static str, default: u64| -> Result<Duration, ConfigError> {
            match lookup(name) {
                None => Ok(Duration::from_secs(default)),
                Some(raw) => match raw.trim().parse::<u64>() {
                    Ok(0) => Err(ConfigError::InvalidValue {
                        name,
                        value: raw,
                        reason: "must be greater than zero".to_string(),
                    }),
                    Ok(n) => Ok(Duration::from_secs(n)),
                    Err(e) => Err(ConfigError::InvalidValue {
                        name,
                        value: raw,
                        reason: e.to_string(),
                    }),
                },
            }
        };

        let cursor_policy = match lookup("CURSOR_ON_ERROR") {
            None => CursorPolicy::default(),
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|reason| ConfigError::InvalidValue {
                    name: "CURSOR_ON_ERROR",
                    value: raw,
                    reason,
                })?,
        };

        Ok(Self {
            practicum_token,
            telegram_token,
            chat_id,
            endpoint: lookup("PRACTICUM_ENDPOINT").unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            telegram_api_url: lookup("TELEGRAM_API_URL")
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            retry_time: secs("RETRY_TIME_SECS", DEFAULT_RETRY_TIME_SECS)?,
            request_timeout: secs("REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS)?,
            cursor_policy,
        })
    }
}
