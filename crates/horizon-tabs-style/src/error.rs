//! Error types for option resolution and icon lookups.

/// Result type alias for style operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving tab options or icons.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// An icon family has no glyph with the requested name.
    #[error("Icon '{name}' not found in family '{family}'")]
    IconNotFound { family: String, name: String },

    /// An icon family failed to produce an image.
    #[error("Failed to load icon '{name}' from family '{family}': {message}")]
    IconLookup {
        family: String,
        name: String,
        message: String,
    },

    /// Invalid property value.
    #[error("Invalid value for property '{property}': {message}")]
    InvalidValue { property: String, message: String },
}

impl Error {
    /// Create an icon-not-found error.
    pub fn icon_not_found(family: impl Into<String>, name: impl Into<String>) -> Self {
        Self::IconNotFound {
            family: family.into(),
            name: name.into(),
        }
    }

    /// Create an icon lookup error.
    pub fn icon_lookup(
        family: impl Into<String>,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::IconLookup {
            family: family.into(),
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a value error.
    pub fn invalid_value(property: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            property: property.into(),
            message: message.into(),
        }
    }
}
