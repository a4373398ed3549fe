//! Value types shared by option resolution and host assembly.
//!
//! # Example
//!
//! ```
//! use horizon_tabs_style::prelude::*;
//!
//! let base = LabelStyle::default().with_font_size(12.0).with_color("gray");
//! let selected = LabelStyle::default().with_color("black");
//!
//! let merged = selected.cascaded_over(&base);
//! assert_eq!(merged.font_size, Some(12.0));
//! assert_eq!(merged.color.as_ref().map(Color::as_str), Some("black"));
//! ```

mod options;

pub use options::{RepeatedTabSelection, ResolvedTabOptions, SpecialEffects, TabOptions};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A color as understood by the native host (`"red"`, `"#ff0000"`, `"rgba(...)"`).
///
/// The value is opaque to the engine and passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(String);

impl Color {
    /// Create a color from any non-blank literal.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_value("color", "empty color literal"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Text style for a tab label.
///
/// Every field is optional; an unset field means the host default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
}

impl LabelStyle {
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = Some(size);
        self
    }

    pub fn with_font_weight(mut self, weight: impl Into<String>) -> Self {
        self.font_weight = Some(weight.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Overlay the fields set on `self` onto `base`.
    pub fn cascaded_over(&self, base: &LabelStyle) -> LabelStyle {
        LabelStyle {
            font_family: self.font_family.clone().or_else(|| base.font_family.clone()),
            font_size: self.font_size.or(base.font_size),
            font_weight: self.font_weight.clone().or_else(|| base.font_weight.clone()),
            font_style: self.font_style.clone().or_else(|| base.font_style.clone()),
            color: self.color.clone().or_else(|| base.color.clone()),
        }
    }
}

/// A value declared once for the default state and once for the selected state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerState<T> {
    #[serde(default)]
    pub default: Option<T>,
    #[serde(default)]
    pub selected: Option<T>,
}

impl<T> Default for PerState<T> {
    fn default() -> Self {
        Self {
            default: None,
            selected: None,
        }
    }
}

impl<T> PerState<T> {
    pub fn new(default: Option<T>, selected: Option<T>) -> Self {
        Self { default, selected }
    }

    /// Only the default state is set.
    pub fn default_only(value: T) -> Self {
        Self::new(Some(value), None)
    }

    /// Only the selected state is set.
    pub fn selected_only(value: T) -> Self {
        Self::new(None, Some(value))
    }
}

/// A raw image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub uri: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f32>,
}

impl ImageSource {
    pub fn uri(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            width: None,
            height: None,
            scale: None,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// One concrete icon representation handed to the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TabIcon {
    /// A platform symbol (SF Symbols on iOS).
    Symbol { name: String },
    /// A bundled resource drawable (Android).
    Resource { name: String },
    /// A raw image.
    Image { source: ImageSource },
}

impl TabIcon {
    pub fn symbol(name: impl Into<String>) -> Self {
        Self::Symbol { name: name.into() }
    }

    pub fn resource(name: impl Into<String>) -> Self {
        Self::Resource { name: name.into() }
    }

    pub fn image(source: ImageSource) -> Self {
        Self::Image { source }
    }
}
