use thiserror::Error;

/// Rejection produced by a delayed square when the input is negative.
///
/// The message is fixed and surfaced to the caller verbatim.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Error: Negative number not allowed")]
pub struct NegativeInputError;

#[derive(Error, Debug)]
pub enum SquareError {
    #[error(transparent)]
    NegativeInput(#[from] NegativeInputError),

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

    #[error("Task error: {message}")]
    TaskError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Runtime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl SquareError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            SquareError::NegativeInput(_) => ErrorCategory::Input,
            SquareError::ConfigValidationError { .. }
            | SquareError::InvalidConfigValueError { .. }
            | SquareError::MissingConfigError { .. } => ErrorCategory::Configuration,
            SquareError::IoError(_) | SquareError::SerializationError(_) => ErrorCategory::Io,
            SquareError::TaskError { .. } => ErrorCategory::Runtime,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::High,
            ErrorCategory::Runtime => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            SquareError::NegativeInput(e) => e.to_string(),
            SquareError::IoError(e) => format!("Could not read or write a file: {}", e),
            SquareError::SerializationError(e) => format!("Could not encode the report: {}", e),
            SquareError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            SquareError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("'{}' is not a valid value for '{}' ({})", value, field, reason),
            SquareError::MissingConfigError { field } => {
                format!("'{}' must be provided", field)
            }
            SquareError::TaskError { message } => format!("A computation task failed: {}", message),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => "Pass a number greater than or equal to zero",
            ErrorCategory::Configuration => "Check the command line flags and the TOML batch file",
            ErrorCategory::Io => "Check that the output directory exists and is writable",
            ErrorCategory::Runtime => "Re-run the batch; if it keeps failing, run with --verbose",
        }
    }
}

impl ErrorSeverity {
    /// Process exit code for the binary. 2 is shared with rejected inputs.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, SquareError>;
