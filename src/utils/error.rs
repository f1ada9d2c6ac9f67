use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetboxError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    HttpStatusError { status: u16, body: String },

    #[error("Invalid resource identifier: {0}")]
    InvalidIdError(#[from] std::num::ParseIntError),

    #[error("Unable to convert ID into int64")]
    IdConversionError { id: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error in '{field}': {message}")]
    ValidationError { field: String, message: String },
}

/// 錯誤分類，CLI 依此決定退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Identifier,
    Validation,
    Configuration,
    Data,
}

impl NetboxError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NetboxError::ApiError(_) => ErrorCategory::Network,
            NetboxError::HttpStatusError { .. } => ErrorCategory::Remote,
            NetboxError::InvalidIdError(_) | NetboxError::IdConversionError { .. } => {
                ErrorCategory::Identifier
            }
            NetboxError::ValidationError { .. } => ErrorCategory::Validation,
            NetboxError::ConfigError { .. }
            | NetboxError::ConfigValidationError { .. }
            | NetboxError::InvalidConfigValueError { .. }
            | NetboxError::MissingConfigError { .. } => ErrorCategory::Configuration,
            NetboxError::IoError(_)
            | NetboxError::SerializationError(_)
            | NetboxError::TomlError(_) => ErrorCategory::Data,
        }
    }

    /// 給操作人員看的訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            NetboxError::ApiError(e) if e.is_connect() => {
                "Could not connect to NetBox, check the URL and network".to_string()
            }
            NetboxError::ApiError(e) if e.is_timeout() => "NetBox request timed out".to_string(),
            NetboxError::HttpStatusError { status: 401, .. }
            | NetboxError::HttpStatusError { status: 403, .. } => {
                "NetBox rejected the API token".to_string()
            }
            NetboxError::HttpStatusError { status, body } => {
                format!("NetBox rejected the request ({}): {}", status, body)
            }
            NetboxError::IdConversionError { id } => {
                format!("Unable to convert ID '{}' into int64", id)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, NetboxError>;
