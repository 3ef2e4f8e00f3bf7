use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Upstream fetch failed: {message}")]
    UpstreamFetch { message: String },

    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Persistence(#[from] std::io::Error),

    #[error("Malformed row at line {line}: expected {expected} fields, got {actual}")]
    MalformedRow {
        line: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

impl EtlError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        EtlError::InvalidInput {
            message: message.into(),
        }
    }

    pub fn upstream(message: impl Into<String>) -> Self {
        EtlError::UpstreamFetch {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
