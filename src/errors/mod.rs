use std::time::Duration;
use thiserror::Error;
use crate::enums::operation::Operation;

#[derive(Debug, Clone, Error)]
pub enum ReverseEngineerError {
    // Configuration errors
    #[error("Configuration Error: {message}")]
    ConfigurationError {
        message: String,
        field: Option<String>,
        suggestion: Option<String>,
    },
    #[error("Configuration file error at '{path}': {reason}")]
    ConfigurationFileError {
        path: String,
        reason: String,
    },

    // Prompt rendering
    #[error("Missing parameter '{field}' for {operation}")]
    MissingParameter {
        operation: Operation,
        field: &'static str,
    },

    // Source resolution
    #[error("Failed to read source '{locator}': {reason}")]
    SourceReadError {
        locator: String,
        reason: String,
    },
    #[error("Failed to fetch source '{locator}': {reason}")]
    SourceFetchError {
        locator: String,
        status_code: Option<u16>,
        reason: String,
    },

    // Request gating
    #[error("Rate limit exceeded, retry after {:.2}s", .retry_after.as_secs_f64())]
    RateLimited {
        retry_after: Duration,
    },

    // Model invocation
    #[error("Model '{model}' ({provider}) failed: {reason}")]
    ModelInvocationError {
        model: String,
        provider: String,
        reason: String,
    },

    // Result persistence
    #[error("Failed to write output '{path}': {reason}")]
    OutputError {
        path: String,
        reason: String,
    },

    // User input errors
    #[error("Invalid input '{input}': {reason}")]
    UserInputError {
        input: String,
        reason: String,
    },

    #[error("Command cancelled")]
    Cancelled,
}

impl ReverseEngineerError {
    pub fn config_error(message: &str, field: Option<&str>, suggestion: Option<&str>) -> Self {
        Self::ConfigurationError {
            message: message.to_string(),
            field: field.map(ToString::to_string),
            suggestion: suggestion.map(ToString::to_string),
        }
    }

    pub fn config_file_error(path: &str, reason: &str) -> Self {
        Self::ConfigurationFileError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn read_error(locator: &str, reason: &str) -> Self {
        Self::SourceReadError {
            locator: locator.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn fetch_error(locator: &str, status_code: Option<u16>, reason: &str) -> Self {
        Self::SourceFetchError {
            locator: locator.to_string(),
            status_code,
            reason: reason.to_string(),
        }
    }

    pub fn output_error(path: &str, reason: &str) -> Self {
        Self::OutputError {
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn input_error(input: &str, reason: &str) -> Self {
        Self::UserInputError {
            input: input.to_string(),
            reason: reason.to_string(),
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. }
                | Self::SourceFetchError { .. }
                | Self::ModelInvocationError { .. }
                | Self::UserInputError { .. }
                | Self::Cancelled
        )
    }

    pub const fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ConfigurationFileError { .. } | Self::OutputError { .. } => ErrorSeverity::High,
            Self::ConfigurationError { .. }
            | Self::SourceReadError { .. }
            | Self::SourceFetchError { .. }
            | Self::ModelInvocationError { .. } => ErrorSeverity::Medium,
            Self::MissingParameter { .. }
            | Self::RateLimited { .. }
            | Self::UserInputError { .. }
            | Self::Cancelled => ErrorSeverity::Low,
        }
    }

    /// Process exit code for non-interactive runs.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::ConfigurationError { .. }
            | Self::ConfigurationFileError { .. }
            | Self::MissingParameter { .. }
            | Self::UserInputError { .. } => 2,
            Self::SourceReadError { .. } | Self::SourceFetchError { .. } => 3,
            Self::RateLimited { .. } => 4,
            Self::ModelInvocationError { .. } => 5,
            Self::OutputError { .. } => 6,
            Self::Cancelled => 130,
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::ConfigurationError { message, field, suggestion } => {
                let mut msg = format!("Configuration Error: {message}");
                if let Some(field) = field {
                    msg.push_str(&format!(" (field: {field})"));
                }
                if let Some(suggestion) = suggestion {
                    msg.push_str(&format!("\n💡 Suggestion: {suggestion}"));
                }
                msg
            }
            Self::ConfigurationFileError { .. } => {
                format!("{self}\n💡 Check the file path, permissions and syntax, or run 'reverse-engineer init --write-sample'")
            }
            Self::MissingParameter { operation, field } => {
                let flag = match *field {
                    "target_language" => "--to-language",
                    _ => "--language",
                };
                format!("{self}\n💡 Pass {flag} when running '{operation}'")
            }
            Self::SourceReadError { .. } => format!("{self}\n💡 Check that the file exists and is readable text"),
            Self::SourceFetchError { status_code, .. } => {
                let mut msg = self.to_string();
                if let Some(code) = status_code {
                    msg.push_str(&format!(" (Status: {code})"));
                }
                msg.push_str("\n💡 Check the URL and your internet connection");
                msg
            }
            Self::RateLimited { retry_after } => {
                format!(
                    "Rate limit exceeded. Please wait {:.2} seconds before trying again.\n💡 Pass --wait-on-rate-limit to wait automatically",
                    retry_after.as_secs_f64()
                )
            }
            Self::ModelInvocationError { .. } => format!("{self}\n💡 Check your API key, quota and model name"),
            Self::OutputError { .. } => format!("{self}\n💡 Check the output path and permissions"),
            Self::UserInputError { .. } => format!("{self}\n💡 Type '--help' for the command syntax"),
            Self::Cancelled => "Command cancelled by user".to_string(),
        }
    }

    pub fn technical_details(&self) -> String {
        format!("{self:?}")
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
}

impl ErrorSeverity {
    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Low => "🟢",
            Self::Medium => "🟡",
            Self::High => "🟠",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// Result type alias for reverse-engineer operations
pub type ReverseEngineerResult<T> = Result<T, ReverseEngineerError>;

/// Error handler for consistent error processing
pub struct ErrorHandler;

impl ErrorHandler {
    /// Log technical details and print the user-facing message to stderr.
    pub fn handle_error(error: &ReverseEngineerError) {
        let severity = error.severity();
        log::debug!("[{}] {}", severity.name(), error.technical_details());
        eprintln!("{} {}", severity.emoji(), error.user_message());

        if error.is_recoverable() {
            eprintln!("🔄 This error is recoverable - you can retry the operation");
        }
    }

    /// Inline rendering for interactive sessions.
    pub fn inline_message(error: &ReverseEngineerError) -> String {
        format!("❌ {}", error.user_message())
    }
}
