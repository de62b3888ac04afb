use thiserror::Error;

#[derive(Error, Debug)]
pub enum EcoError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("Unknown species: {name}")]
    UnknownSpecies { name: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
    Processing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl EcoError {
    pub fn processing(message: impl Into<String>) -> Self {
        Self::ProcessingError {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::IoError(_) => ErrorCategory::Io,
            Self::CsvError(_) | Self::SerializationError(_) => ErrorCategory::Data,
            Self::ConfigValidationError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownSpecies { .. } => ErrorCategory::Input,
            Self::ProcessingError { .. } => ErrorCategory::Processing,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Io | ErrorCategory::Processing => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CsvError(_) => {
                "Check that the species catalog has the header name,calories_provided,calories_needed,depth_range,temperature_range,food_sources"
            }
            Self::IoError(_) => "Check that the file exists and that the process can read and write it",
            Self::SerializationError(_) => "Check that the request file is valid JSON",
            Self::ConfigValidationError { .. } => {
                "Review the scenario file against the documented sections"
            }
            Self::InvalidConfigValueError { .. } => "Correct the highlighted value and retry",
            Self::MissingConfigError { .. } => "Add the missing field to the configuration",
            Self::UnknownSpecies { .. } => "Use --list to see the species available in the catalog",
            Self::ProcessingError { .. } => "Re-run with --verbose and report the log output",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::CsvError(_) => "The species catalog could not be read".to_string(),
            Self::IoError(e) => format!("File access failed: {}", e),
            Self::SerializationError(_) => "The request could not be parsed".to_string(),
            Self::UnknownSpecies { name } => format!("'{}' is not in the species catalog", name),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EcoError>;
