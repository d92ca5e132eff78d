use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Invalid input for '{field}' ({value}): {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing pricing constant '{key}': {reason}")]
    ConfigurationMissing { key: String, reason: String },

    #[error("Invalid configuration value for '{field}' ({value}): {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
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

impl QuoteError {
    pub fn invalid_input(field: &str, value: impl ToString, reason: impl Into<String>) -> Self {
        QuoteError::InvalidInput {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            QuoteError::InvalidInput { .. } => ErrorCategory::Input,
            QuoteError::ConfigurationMissing { .. }
            | QuoteError::InvalidConfigValue { .. }
            | QuoteError::ConfigParse { .. } => ErrorCategory::Configuration,
            QuoteError::IoError(_)
            | QuoteError::CsvError(_)
            | QuoteError::SerializationError(_) => ErrorCategory::System,
        }
    }

    /// Rejected input is recoverable by the user; anything that stops the
    /// engine from being built is not.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            QuoteError::InvalidInput { .. } => {
                format!("Invalid dimensions: {}", self)
            }
            QuoteError::ConfigurationMissing { key, .. } => {
                format!("Pricing configuration is incomplete: '{}' is missing", key)
            }
            QuoteError::InvalidConfigValue { field, reason, .. } => {
                format!("Pricing configuration value '{}' is invalid: {}", field, reason)
            }
            QuoteError::ConfigParse { .. } => {
                "Pricing configuration file could not be parsed".to_string()
            }
            QuoteError::IoError(e) => format!("File access failed: {}", e),
            QuoteError::CsvError(e) => format!("Batch file could not be processed: {}", e),
            QuoteError::SerializationError(e) => format!("Output could not be written: {}", e),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => {
                "Enter dimensions greater than 0 and a fin density of at least the minimum FPI"
            }
            QuoteError::ConfigurationMissing { .. } => {
                "Add the missing key to the pricing file, or run `coil-quote config` to see a complete example"
            }
            QuoteError::InvalidConfigValue { .. } => {
                "Correct the value in the pricing file; rates and costs must be non-negative numbers"
            }
            QuoteError::ConfigParse { .. } => {
                "Check the TOML syntax and that every ${VAR} reference is set in the environment"
            }
            QuoteError::IoError(_) => "Check that the path exists and is readable",
            QuoteError::CsvError(_) => {
                "Check the CSV header: reference,length_m,height_m,depth_m,fpi,include_primer,is_field_work"
            }
            QuoteError::SerializationError(_) => "Retry with --format text",
        }
    }
}

pub type Result<T> = std::result::Result<T, QuoteError>;
