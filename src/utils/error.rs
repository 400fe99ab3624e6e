use thiserror::Error;

#[derive(Error, Debug)]
pub enum HerdError {
    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDateError { value: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl HerdError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HerdError::IoError(_) => ErrorCategory::Io,
            HerdError::CsvError(_)
            | HerdError::SerializationError(_)
            | HerdError::ProcessingError { .. } => ErrorCategory::Data,
            HerdError::ConfigValidationError { .. }
            | HerdError::MissingConfigError { .. }
            | HerdError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HerdError::InvalidDateError { .. } => ErrorCategory::Input,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            HerdError::IoError(_) => {
                "Check that the input file exists and the output directory is writable".to_string()
            }
            HerdError::CsvError(_) => {
                "Check the CSV header: animal_id,species,mating_date,outcome".to_string()
            }
            HerdError::SerializationError(_) => "Report data could not be serialized".to_string(),
            HerdError::ConfigValidationError { field, .. }
            | HerdError::MissingConfigError { field }
            | HerdError::InvalidConfigValueError { field, .. } => {
                format!("Fix the '{}' entry in the configuration file", field)
            }
            HerdError::InvalidDateError { .. } => {
                "Use ISO calendar dates such as 2025-01-31".to_string()
            }
            HerdError::ProcessingError { .. } => {
                "Re-run with --verbose to see which record failed".to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Io => format!("Could not read or write a file: {}", self),
            ErrorCategory::Data => format!("The herd data could not be processed: {}", self),
            ErrorCategory::Configuration => format!("The configuration is invalid: {}", self),
            ErrorCategory::Input => format!("The input is invalid: {}", self),
        }
    }

    /// 依嚴重程度對應程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, HerdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_date_message() {
        let err = HerdError::InvalidDateError {
            value: "2025-13-01".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid date '2025-13-01': expected YYYY-MM-DD");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_config_errors_are_high_severity() {
        let err = HerdError::MissingConfigError {
            field: "report.input_path".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.recovery_suggestion().contains("report.input_path"));
        assert!(err.user_friendly_message().starts_with("The configuration is invalid"));
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: HerdError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "matings.csv").into();
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert_eq!(err.exit_code(), 3);
    }
}
