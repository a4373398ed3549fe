//! Error types for the tab bar engine.

use std::path::PathBuf;

use horizon_tabs_core::CoreError;

/// Result type alias for tab bar operations.
pub type Result<T> = std::result::Result<T, TabsError>;

/// Structural and I/O errors.
///
/// Configuration problems that the engine can recover from are reported as
/// [`ConfigWarning`](horizon_tabs_style::validate::ConfigWarning)s instead.
#[derive(Debug, thiserror::Error)]
pub enum TabsError {
    /// A tab bar was composed inside a tab of another tab bar.
    #[error(
        "Native tab bars cannot be nested: a tab bar was composed inside the '{parent_route}' tab of another tab bar"
    )]
    NestedTabBar { parent_route: String },

    /// No declared tab is visible, so nothing can be focused.
    #[error("No visible tab to focus")]
    NoVisibleTab,

    /// Two triggers declare the same route.
    #[error("Route '{route}' is declared by more than one trigger")]
    DuplicateRoute { route: String },

    /// A settings file could not be read or written.
    #[error("Settings I/O failed for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A settings document could not be parsed or serialized.
    #[error("Invalid {format} settings: {message}")]
    Settings {
        format: &'static str,
        message: String,
    },

    /// Host props could not be encoded for the bridge.
    #[error("Failed to encode host props: {0}")]
    Encode(#[from] serde_json::Error),

    /// Core system error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl TabsError {
    /// Create a nesting error.
    pub fn nested(parent_route: impl Into<String>) -> Self {
        Self::NestedTabBar {
            parent_route: parent_route.into(),
        }
    }

    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a settings format error.
    pub fn settings(format: &'static str, message: impl ToString) -> Self {
        Self::Settings {
            format,
            message: message.to_string(),
        }
    }

    /// Whether this error is a composition problem rather than an I/O failure.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::NestedTabBar { .. } | Self::NoVisibleTab | Self::DuplicateRoute { .. }
        )
    }
}
