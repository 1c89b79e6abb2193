use thiserror::Error;

#[derive(Error, Debug)]
pub enum CutlistError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Exchange decode error: {message}")]
    DecodeError { message: String },

    #[error("Target object not found: {id}")]
    TargetNotFound { id: String },

    #[error("Write-back error: {message}")]
    WriteBackError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Config,
    Exchange,
    WriteBack,
    Validation,
}

impl CutlistError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CutlistError::IoError(_) | CutlistError::SerializationError(_) => {
                ErrorSeverity::Critical
            }
            CutlistError::CsvError(_) => ErrorSeverity::High,
            CutlistError::ConfigError { .. }
            | CutlistError::InvalidConfigValueError { .. }
            | CutlistError::MissingConfigError { .. }
            | CutlistError::ValidationError { .. } => ErrorSeverity::High,
            CutlistError::DecodeError { .. } => ErrorSeverity::High,
            CutlistError::TargetNotFound { .. } | CutlistError::WriteBackError { .. } => {
                ErrorSeverity::Medium
            }
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            CutlistError::CsvError(_)
            | CutlistError::IoError(_)
            | CutlistError::SerializationError(_) => ErrorCategory::Io,
            CutlistError::ConfigError { .. }
            | CutlistError::InvalidConfigValueError { .. }
            | CutlistError::MissingConfigError { .. } => ErrorCategory::Config,
            CutlistError::DecodeError { .. } => ErrorCategory::Exchange,
            CutlistError::TargetNotFound { .. } | CutlistError::WriteBackError { .. } => {
                ErrorCategory::WriteBack
            }
            CutlistError::ValidationError { .. } => ErrorCategory::Validation,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CutlistError::CsvError(_) => "Failed to read or write the settings file".to_string(),
            CutlistError::IoError(e) => format!("File access failed: {}", e),
            CutlistError::SerializationError(_) => {
                "The model document is not valid JSON".to_string()
            }
            CutlistError::ConfigError { message } => format!("Configuration problem: {}", message),
            CutlistError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            CutlistError::MissingConfigError { field } => {
                format!("Setting '{}' is required but missing", field)
            }
            CutlistError::DecodeError { message } => {
                format!("Request payload could not be decoded: {}", message)
            }
            CutlistError::TargetNotFound { id } => {
                format!("No object with ID '{}' exists in the model", id)
            }
            CutlistError::WriteBackError { message } => {
                format!("Writing results to the model failed: {}", message)
            }
            CutlistError::ValidationError { message } => message.clone(),
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            CutlistError::CsvError(_) => {
                "Check the settings file for malformed rows or regenerate it with 'settings init'"
                    .to_string()
            }
            CutlistError::IoError(_) => {
                "Check that the path exists and is readable/writable".to_string()
            }
            CutlistError::SerializationError(_) => {
                "Validate the model document with a JSON linter".to_string()
            }
            CutlistError::ConfigError { .. }
            | CutlistError::InvalidConfigValueError { .. }
            | CutlistError::MissingConfigError { .. } => {
                "Fix the setting in the settings file or rerun 'settings init' for defaults"
                    .to_string()
            }
            CutlistError::DecodeError { .. } => {
                "Check the request payload against the exchange format".to_string()
            }
            CutlistError::TargetNotFound { .. } => {
                "Place the target object in the model or update the target IDs in settings"
                    .to_string()
            }
            CutlistError::WriteBackError { .. } => {
                "Check that the target objects carry Text_3..Text_18 fields".to_string()
            }
            CutlistError::ValidationError { .. } => "Correct the reported field".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CutlistError>;
