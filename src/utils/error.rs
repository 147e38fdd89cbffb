use thiserror::Error;

#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("Subscriber not found: {surname} {given_name}")]
    NotFound { surname: String, given_name: String },

    #[error("Telephone directory is empty")]
    EmptyDirectory,

    #[error("Phone number {phone_number} not found for {surname} {given_name}")]
    ValueNotFound {
        surname: String,
        given_name: String,
        phone_number: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Malformed record on line {line}: {reason}")]
    ParseError { line: usize, reason: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Lookup misses; the directory is untouched.
    Low,
    /// Bad input from the user or the backing file.
    Medium,
    /// The store or configuration cannot be used.
    High,
}

impl DirectoryError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::EmptyDirectory | Self::ValueNotFound { .. } => {
                ErrorSeverity::Low
            }
            Self::ParseError { .. } | Self::ValidationError { .. } => ErrorSeverity::Medium,
            Self::SerializationError(_) => ErrorSeverity::Medium,
            Self::IoError(_) | Self::ConfigError { .. } => ErrorSeverity::High,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::NotFound { .. } => "Subscriber not found.".to_string(),
            Self::EmptyDirectory => "Telephone directory is empty.".to_string(),
            Self::ValueNotFound { .. } => "Phone number not found for the user.".to_string(),
            Self::IoError(e) => format!("Could not access the directory file: {}", e),
            Self::SerializationError(e) => format!("Could not render the listing: {}", e),
            Self::ParseError { line, .. } => {
                format!("Line {} of the directory file could not be read.", line)
            }
            Self::ConfigError { message } => format!("Configuration problem: {}", message),
            Self::ValidationError { field, reason, .. } => format!("Invalid {}: {}", field, reason),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "Check the spelling; surname and name are case-sensitive.",
            Self::EmptyDirectory => "Add a subscriber first.",
            Self::ValueNotFound { .. } => "Use 'show' to list the subscriber's numbers.",
            Self::IoError(_) => "Check that the directory file path exists and is writable.",
            Self::SerializationError(_) => "Try the plain listing without --json.",
            Self::ParseError { .. } => {
                "Each line needs a surname, a name and phone numbers separated by spaces."
            }
            Self::ConfigError { .. } => "Fix the TOML configuration file.",
            Self::ValidationError { .. } => "Re-enter the value.",
        }
    }
}

pub type Result<T> = std::result::Result<T, DirectoryError>;
