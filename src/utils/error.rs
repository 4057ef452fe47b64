use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteMetricsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("{field} cannot be empty")]
    EmptyInputError { field: String },

    #[error("'{value}' is not a valid website for {field}")]
    InvalidDomainError { field: String, value: String },

    #[error("Storage error for key '{key}': {message}")]
    StorageError { key: String, message: String },

    #[error("Invalid date '{value}', expected YYYY-MM-DD")]
    DateError { value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Storage,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl SiteMetricsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmptyInputError { .. } | Self::InvalidDomainError { .. } | Self::DateError { .. } => {
                ErrorCategory::Input
            }
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
            Self::IoError(_) | Self::StorageError { .. } => ErrorCategory::Storage,
            Self::SerializationError(_) | Self::CsvError(_) | Self::ZipError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage => ErrorSeverity::Critical,
            ErrorCategory::Data => ErrorSeverity::Medium,
        }
    }

    /// Short message suitable for showing to the person at the terminal.
    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::EmptyInputError { .. } => "Please enter a website URL".to_string(),
            Self::InvalidDomainError { .. } => "Please enter a valid website URL".to_string(),
            Self::DateError { value } => format!("'{}' is not a valid date", value),
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                format!("Configuration problem: {}", self)
            }
            Self::IoError(_) | Self::StorageError { .. } => {
                format!("Could not access local storage: {}", self)
            }
            Self::SerializationError(_) | Self::CsvError(_) | Self::ZipError(_) => {
                format!("Could not write report data: {}", self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::EmptyInputError { .. } => "Pass a website such as example.com",
            Self::InvalidDomainError { .. } => {
                "Use a domain with a dot in it, e.g. example.com or https://www.example.com/page"
            }
            Self::DateError { .. } => "Use the ISO calendar format, e.g. 2024-03-01",
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                "Check the configuration file and command line flags"
            }
            Self::IoError(_) | Self::StorageError { .. } => {
                "Check that the data directory exists and is writable"
            }
            Self::SerializationError(_) => {
                "The stored data may be corrupted; remove the bookmarks file to reset it"
            }
            Self::CsvError(_) | Self::ZipError(_) => "Check free disk space in the output directory",
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteMetricsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = SiteMetricsError::InvalidDomainError {
            field: "website".to_string(),
            value: "localhost".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.user_friendly_message(), "Please enter a valid website URL");
    }

    #[test]
    fn test_io_errors_are_critical() {
        let err: SiteMetricsError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.category(), ErrorCategory::Storage);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
