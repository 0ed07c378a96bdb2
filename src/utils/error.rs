use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarketError {
    #[error("Invalid listing id '{token}': {reason}")]
    ParseError { token: String, reason: String },

    #[error("Format error in search '{expression}': expected 'id1,id2+price', 'id1,id2+condition', 'id1,id2+' or 'home'")]
    FormatError { expression: String },

    #[error("Unknown shape '{shape}'")]
    UnknownShape { shape: String },

    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    #[error("Listing {listing_id} references missing {entity} {key}")]
    DanglingReference {
        listing_id: i64,
        entity: &'static str,
        key: String,
    },

    #[error("An error occurred while inserting: {message}")]
    PersistenceError { message: String },

    #[error("{registry} registry unavailable: {message}")]
    RegistryUnavailable {
        registry: &'static str,
        message: String,
    },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Lookup,
    Storage,
    Upstream,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl MarketError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MarketError::ParseError { .. }
            | MarketError::FormatError { .. }
            | MarketError::UnknownShape { .. } => ErrorCategory::Input,
            MarketError::NotFound { .. } | MarketError::DanglingReference { .. } => {
                ErrorCategory::Lookup
            }
            MarketError::PersistenceError { .. } => ErrorCategory::Storage,
            MarketError::RegistryUnavailable { .. } | MarketError::HttpError(_) => {
                ErrorCategory::Upstream
            }
            MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. }
            | MarketError::MissingConfigError { .. } => ErrorCategory::Configuration,
            MarketError::CsvError(_)
            | MarketError::IoError(_)
            | MarketError::SerializationError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Lookup => ErrorSeverity::Low,
            ErrorCategory::Upstream => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::Storage | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 給使用者的修復建議
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MarketError::ParseError { .. } => "Listing ids must be integers separated by commas",
            MarketError::FormatError { .. } => {
                "Use 'home' or 'id1,id2+price', 'id1,id2+condition', 'id1,id2+'"
            }
            MarketError::UnknownShape { .. } => {
                "Use bare, bare_seller, with_user, with_book or with_both"
            }
            MarketError::NotFound { .. } => "Check that the id exists before retrying",
            MarketError::DanglingReference { .. } => {
                "Re-register the referenced book or user, or delete the listing"
            }
            MarketError::PersistenceError { .. } => "Check the listing store and try again",
            MarketError::RegistryUnavailable { .. } | MarketError::HttpError(_) => {
                "Check that the registry endpoints are reachable"
            }
            MarketError::CsvError(_) => "Check the seed file headers and delimiters",
            MarketError::IoError(_) => "Check file paths and permissions",
            MarketError::SerializationError(_) => "Check that the payload is valid JSON",
            MarketError::ConfigValidationError { .. }
            | MarketError::InvalidConfigValueError { .. }
            | MarketError::MissingConfigError { .. } => "Fix the configuration file and retry",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Input => format!("Invalid request: {}", self),
            ErrorCategory::Lookup => self.to_string(),
            ErrorCategory::Storage => format!("Server error: {}", self),
            ErrorCategory::Upstream => format!("Upstream service problem: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, MarketError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_high_severity() {
        let err = MarketError::FormatError {
            expression: "1,2".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.user_friendly_message().starts_with("Invalid request"));
    }

    #[test]
    fn test_persistence_is_distinct_from_lookup() {
        let storage = MarketError::PersistenceError {
            message: "disk full".to_string(),
        };
        let lookup = MarketError::NotFound {
            entity: "Listing",
            key: "7".to_string(),
        };
        assert_ne!(storage.category(), lookup.category());
        assert!(storage.severity() > lookup.severity());
        assert_eq!(lookup.to_string(), "Listing 7 not found");
    }
}
