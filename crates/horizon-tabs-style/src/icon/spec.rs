//! Declared icon inputs.

use std::fmt;
use std::sync::Arc;

use crate::error::Result;
use crate::types::ImageSource;

/// A value supplied either once or split per focus state.
#[derive(Debug, Clone, PartialEq)]
pub enum Variants<T> {
    /// One value. Fills the default slot only.
    Single(T),
    /// Separate values per state; either side may be absent.
    Split {
        default: Option<T>,
        selected: Option<T>,
    },
}

impl<T> Variants<T> {
    pub fn split(default: impl Into<T>, selected: impl Into<T>) -> Self {
        Self::Split {
            default: Some(default.into()),
            selected: Some(selected.into()),
        }
    }

    pub fn selected_only(selected: impl Into<T>) -> Self {
        Self::Split {
            default: None,
            selected: Some(selected.into()),
        }
    }

    /// The `(default, selected)` slot values.
    pub fn slots(&self) -> (Option<&T>, Option<&T>) {
        match self {
            Self::Single(value) => (Some(value), None),
            Self::Split { default, selected } => (default.as_ref(), selected.as_ref()),
        }
    }
}

impl<T> From<T> for Variants<T> {
    fn from(value: T) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for Variants<String> {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<ImageSource> for Variants<ImageInput> {
    fn from(value: ImageSource) -> Self {
        Self::Single(ImageInput::Source(value))
    }
}

impl From<VectorIcon> for Variants<ImageInput> {
    fn from(value: VectorIcon) -> Self {
        Self::Single(ImageInput::Vector(value))
    }
}

/// A source of named icon images that must be loaded before use.
///
/// Implementations are called off the render path, from a deferred turn.
pub trait IconFamily: Send + Sync {
    /// Stable identifier used for caching.
    fn id(&self) -> &str;

    /// Produce an image for `name`.
    fn image_source(&self, name: &str) -> Result<ImageSource>;
}

impl fmt::Debug for dyn IconFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IconFamily").field(&self.id()).finish()
    }
}

/// A named glyph from an [`IconFamily`].
#[derive(Clone, Debug)]
pub struct VectorIcon {
    pub family: Arc<dyn IconFamily>,
    pub name: String,
}

impl VectorIcon {
    pub fn new(family: Arc<dyn IconFamily>, name: impl Into<String>) -> Self {
        Self {
            family,
            name: name.into(),
        }
    }
}

/// An image input: ready to use, or loaded asynchronously.
#[derive(Clone, Debug)]
pub enum ImageInput {
    Source(ImageSource),
    Vector(VectorIcon),
}

impl From<ImageSource> for ImageInput {
    fn from(value: ImageSource) -> Self {
        Self::Source(value)
    }
}

impl From<VectorIcon> for ImageInput {
    fn from(value: VectorIcon) -> Self {
        Self::Vector(value)
    }
}

/// Every representation an icon child may declare.
///
/// Only one representation ends up on the tab; see
/// [`resolve_icon`](super::resolve_icon) for the selection rules.
#[derive(Clone, Debug, Default)]
pub struct IconSpec {
    /// Platform symbol name (iOS).
    pub symbol: Option<Variants<String>>,
    /// Bundled drawable name (Android).
    pub resource: Option<Variants<String>>,
    /// Glyph name in the backend's built-in icon family.
    pub family: Option<Variants<String>>,
    /// Raw or vector image.
    pub image: Option<Variants<ImageInput>>,
}

impl IconSpec {
    pub fn symbol(value: impl Into<Variants<String>>) -> Self {
        Self {
            symbol: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn resource(value: impl Into<Variants<String>>) -> Self {
        Self {
            resource: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn family(value: impl Into<Variants<String>>) -> Self {
        Self {
            family: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn image(value: impl Into<Variants<ImageInput>>) -> Self {
        Self {
            image: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn with_symbol(mut self, value: impl Into<Variants<String>>) -> Self {
        self.symbol = Some(value.into());
        self
    }

    pub fn with_resource(mut self, value: impl Into<Variants<String>>) -> Self {
        self.resource = Some(value.into());
        self
    }

    pub fn with_family(mut self, value: impl Into<Variants<String>>) -> Self {
        self.family = Some(value.into());
        self
    }

    pub fn with_image(mut self, value: impl Into<Variants<ImageInput>>) -> Self {
        self.image = Some(value.into());
        self
    }
}
