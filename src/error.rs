use miette::Diagnostic;
use thiserror::Error;

/// Result type for IR operations
pub type Result<T> = std::result::Result<T, Error>;

/// Custom error types for the variable identity core
///
/// The only failing operation in this crate is a global-only accessor applied
/// to a non-global variable. That is a contract violation at the call site,
/// not a recoverable runtime condition: do not catch it and retry.
#[derive(Error, Debug, Diagnostic, Clone)]
pub enum Error {
    #[error("Invalid usage: {message}")]
    #[diagnostic(code(ir_vars::invalid_usage))]
    InvalidUsage { message: String },
}

impl Error {
    /// Create an invalid-usage error
    pub fn invalid_usage(message: impl Into<String>) -> Self {
        Error::InvalidUsage {
            message: message.into(),
        }
    }
}
