//! Error types for Horizon Tabs core systems.

/// The main error type for core operations.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A global tracing subscriber could not be installed.
    #[error("Failed to initialize logging: {message}")]
    Logging { message: String },
}

impl CoreError {
    /// Create a logging error.
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

/// A specialized Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
