use thiserror::Error;

#[derive(Error, Debug)]
pub enum EtlError {
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ('{value}'): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Transport error: {0}")]
    TransportError(#[source] reqwest::Error),

    #[error("Remote service returned {status}: {body}")]
    RemoteServiceError { status: u16, body: String },

    #[error("Schema error: required field '{field}' is missing or has the wrong type")]
    SchemaError { field: String },

    #[error("Persistence error: {message}")]
    PersistenceError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Transport,
    RemoteService,
    Schema,
    Persistence,
    Internal,
}

impl EtlError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            EtlError::ConfigError { .. }
            | EtlError::MissingConfigError { .. }
            | EtlError::InvalidConfigValueError { .. } => ErrorCategory::Config,
            EtlError::TransportError(_) => ErrorCategory::Transport,
            EtlError::RemoteServiceError { .. } => ErrorCategory::RemoteService,
            EtlError::SchemaError { .. } => ErrorCategory::Schema,
            EtlError::PersistenceError { .. } => ErrorCategory::Persistence,
            EtlError::IoError(_) | EtlError::SerializationError(_) => ErrorCategory::Internal,
        }
    }

    /// 每種錯誤類別對應一個固定的退出碼
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Internal => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::Transport => 3,
            ErrorCategory::RemoteService => 4,
            ErrorCategory::Schema => 5,
            ErrorCategory::Persistence => 6,
        }
    }

    /// Only transient failures are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            EtlError::TransportError(_) | EtlError::PersistenceError { .. } => true,
            EtlError::RemoteServiceError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Config => {
                "Check the environment variables, .env file or --config TOML for the missing value"
            }
            ErrorCategory::Transport => "Check network connectivity to the remote API",
            ErrorCategory::RemoteService => {
                "Verify the API credential and rate limits; the response body has details"
            }
            ErrorCategory::Schema => "The API response shape changed or was partial; nothing was written",
            ErrorCategory::Persistence => {
                "Verify the store connection string and that the store is reachable"
            }
            ErrorCategory::Internal => "Re-run with --verbose for more details",
        }
    }

    pub fn persistence(err: impl std::fmt::Display) -> Self {
        EtlError::PersistenceError {
            message: err.to_string(),
        }
    }

    pub fn schema(field: impl Into<String>) -> Self {
        EtlError::SchemaError {
            field: field.into(),
        }
    }
}

impl From<sqlx::Error> for EtlError {
    fn from(err: sqlx::Error) -> Self {
        EtlError::persistence(err)
    }
}

impl From<mongodb::error::Error> for EtlError {
    fn from(err: mongodb::error::Error) -> Self {
        EtlError::persistence(err)
    }
}

pub type Result<T> = std::result::Result<T, EtlError>;
