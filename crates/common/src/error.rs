use reqwest::StatusCode;
use thiserror::Error;

/// Why the homework API could not be used.
#[derive(Debug, Error)]
pub enum ServerCause {
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error("{}", .0.as_u16())]
    Status(StatusCode),
}

/// Runtime failures of a single poll cycle.
///
/// The `Display` text of each variant is exactly the message relayed to the
/// chat recipient, so two failures with equal text are treated as duplicates.
#[derive(Debug, Error)]
pub enum PollError {
    #[error("Сбой в работе программы: Эндпоинт {endpoint} недоступен. Код ответа API: {cause}.")]
    Server {
        endpoint: String,
        #[source]
        cause: ServerCause,
    },

    #[error("Сбой в работе программы: Ответ API не содержит ключ \"{0}\".")]
    KeysAnswer(&'static str),

    #[error(
        "Сбой в работе программы: В ответе API обнаружен недокументированный статус домашней работы \"{0}\"."
    )]
    StatusHomework(String),

    #[error("Сбой в работе программы: {0}.")]
    Unknown(String),
}

impl PollError {
    /// Stable label used as the `kind` field in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Server { .. } => "server",
            PollError::KeysAnswer(_) => "keys_answer",
            PollError::StatusHomework(_) => "status_homework",
            PollError::Unknown(_) => "unknown",
        }
    }
}

/// Startup-only configuration defects. Always fatal.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Отсутствует обязательная переменная окружения \"{0}\". Программа принудительно остановлена.")]
    MissingVariable(&'static str),

    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: String,
    },
}
