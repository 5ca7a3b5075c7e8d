use thiserror::Error;
use serde::Serialize;

/// Shown in place of a translation when the endpoint answered without a usable payload.
pub const ERR_TRANSLATION_MARKER: &str = "Ошибка перевода";

/// Shown in place of a translation when the endpoint could not be reached.
pub const ERR_CONNECTION_MARKER: &str = "Ошибка подключения к API";

#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    #[error("I/O Error: {0}")]
    Io(String),

    /// Connection failure, timeout or non-2xx status
    #[error("Network Error: {0}")]
    Network(String),

    /// 2xx response whose body has no usable `translatedText`
    #[error("Malformed Response: {0}")]
    MalformedResponse(String),

    #[error("Validation Error: {0}")]
    Validation(String),

    #[error("Clipboard Error: {0}")]
    Clipboard(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("System Error: {0}")]
    System(String),
}

impl AppError {
    /// Fixed string the session displays in place of a failed translation.
    pub fn display_marker(&self) -> &'static str {
        match self {
            AppError::Network(_) => ERR_CONNECTION_MARKER,
            _ => ERR_TRANSLATION_MARKER,
        }
    }
}

// Implement conversion from standard errors
impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("Serialization error: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_maps_to_connection_marker() {
        let err = AppError::Network("connection refused".to_string());
        assert_eq!(err.display_marker(), "Ошибка подключения к API");
    }

    #[test]
    fn test_malformed_maps_to_translation_marker() {
        let err = AppError::MalformedResponse("missing translatedText".to_string());
        assert_eq!(err.display_marker(), "Ошибка перевода");
    }

    #[test]
    fn test_serializes_tagged() {
        let err = AppError::Clipboard("no display".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "Clipboard");
        assert_eq!(json["message"], "no display");
    }
}
