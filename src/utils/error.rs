use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Data request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Failed to load college data from {location}: {reason}")]
    LoadError { location: String, reason: String },

    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    DataSource,
    UserInput,
    Lookup,
    Configuration,
    Output,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl FinderError {
    pub fn load(location: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::LoadError {
            location: location.into(),
            reason: reason.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::HttpError(_) | Self::SerializationError(_) | Self::LoadError { .. } => {
                ErrorCategory::DataSource
            }
            Self::IoError(_) | Self::CsvError(_) => ErrorCategory::Output,
            Self::NotFound { .. } => ErrorCategory::Lookup,
            Self::InvalidInput { .. } => ErrorCategory::UserInput,
            Self::ConfigError { .. } | Self::InvalidConfigValueError { .. } => {
                ErrorCategory::Configuration
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::DataSource => ErrorSeverity::Critical,
            ErrorCategory::Output => ErrorSeverity::High,
            ErrorCategory::Lookup => ErrorSeverity::High,
            ErrorCategory::UserInput | ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    /// Process exit code for the CLI.
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::HttpError(e) => format!("Error: could not fetch college data ({})", e),
            Self::SerializationError(e) => format!("Error: college data is not valid JSON ({})", e),
            Self::LoadError { reason, .. } => format!("Error: {}", reason),
            Self::NotFound { message } | Self::InvalidInput { message } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::DataSource => {
                "Check that --data points to a readable college_data.json file or a reachable URL"
            }
            ErrorCategory::UserInput => "Enter a positive whole-number rank and pick a category",
            ErrorCategory::Lookup => {
                "Run `college-finder institutes` to list the available college codes"
            }
            ErrorCategory::Configuration => "Fix the configuration file or command-line flags",
            ErrorCategory::Output => "Check that stdout is writable",
        }
    }
}

pub type Result<T> = std::result::Result<T, FinderError>;
