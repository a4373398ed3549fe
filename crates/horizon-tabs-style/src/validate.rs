//! Validation of enumerated container and tab properties.
//!
//! Literals are matched case-sensitively and never coerced to a near match.
//! An unsupported literal produces a [`ConfigWarning`] and the property is
//! treated as unset.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use horizon_tabs_core::logging::targets;

/// An enumeration whose values arrive as raw string literals.
pub trait ValidatedEnum: Sized + Copy + 'static {
    /// Property name used in warnings.
    const PROPERTY: &'static str;
    /// Supported literals, in declaration order.
    const LITERALS: &'static [&'static str];

    /// Parse an exact literal.
    fn from_literal(value: &str) -> Option<Self>;

    /// The literal this value was parsed from.
    fn as_str(self) -> &'static str;

    /// Parse `value`, producing a warning for unsupported literals.
    fn validate(value: &str) -> Result<Self, ConfigWarning> {
        Self::from_literal(value).ok_or_else(|| ConfigWarning::unsupported::<Self>(value))
    }
}

macro_rules! validated_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $property:literal {
            $($(#[$vmeta:meta])* $variant:ident => $literal:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl ValidatedEnum for $name {
            const PROPERTY: &'static str = $property;
            const LITERALS: &'static [&'static str] = &[$($literal),+];

            fn from_literal(value: &str) -> Option<Self> {
                match value {
                    $($literal => Some(Self::$variant),)+
                    _ => None,
                }
            }

            fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $literal,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = String::deserialize(deserializer)?;
                Self::validate(&raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

validated_enum! {
    /// Background blur material of the tab bar.
    BlurEffect, "blurEffect" {
        None => "none",
        SystemDefault => "systemDefault",
        ExtraLight => "extraLight",
        Light => "light",
        Dark => "dark",
        Regular => "regular",
        Prominent => "prominent",
        SystemUltraThinMaterial => "systemUltraThinMaterial",
        SystemThinMaterial => "systemThinMaterial",
        SystemMaterial => "systemMaterial",
        SystemThickMaterial => "systemThickMaterial",
        SystemChromeMaterial => "systemChromeMaterial",
        SystemUltraThinMaterialLight => "systemUltraThinMaterialLight",
        SystemThinMaterialLight => "systemThinMaterialLight",
        SystemMaterialLight => "systemMaterialLight",
        SystemThickMaterialLight => "systemThickMaterialLight",
        SystemChromeMaterialLight => "systemChromeMaterialLight",
        SystemUltraThinMaterialDark => "systemUltraThinMaterialDark",
        SystemThinMaterialDark => "systemThinMaterialDark",
        SystemMaterialDark => "systemMaterialDark",
        SystemThickMaterialDark => "systemThickMaterialDark",
        SystemChromeMaterialDark => "systemChromeMaterialDark",
    }
}

validated_enum! {
    /// When tab labels are shown.
    LabelVisibilityMode, "labelVisibilityMode" {
        Auto => "auto",
        Selected => "selected",
        Labeled => "labeled",
        Unlabeled => "unlabeled",
    }
}

validated_enum! {
    /// How the tab bar minimizes while content scrolls.
    MinimizeBehavior, "minimizeBehavior" {
        Automatic => "automatic",
        Never => "never",
        OnScrollDown => "onScrollDown",
        OnScrollUp => "onScrollUp",
    }
}

validated_enum! {
    /// System role of a tab, which fixes its icon and title on iOS.
    TabRole, "role" {
        Bookmarks => "bookmarks",
        Contacts => "contacts",
        Downloads => "downloads",
        Favorites => "favorites",
        Featured => "featured",
        History => "history",
        More => "more",
        MostRecent => "mostRecent",
        MostViewed => "mostViewed",
        Recents => "recents",
        Search => "search",
        TopRated => "topRated",
    }
}

/// A non-fatal configuration problem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigWarning {
    /// Property the bad value was supplied for.
    pub property: &'static str,
    /// The value as supplied.
    pub value: String,
    /// Literals that would have been accepted.
    pub supported: &'static [&'static str],
}

impl ConfigWarning {
    /// Warning for a literal `T` does not support.
    pub fn unsupported<T: ValidatedEnum>(value: &str) -> Self {
        Self {
            property: T::PROPERTY,
            value: value.to_string(),
            supported: T::LITERALS,
        }
    }

    /// Warning for an arbitrary property with a free-form list of accepted values.
    pub fn other(property: &'static str, value: impl Into<String>, supported: &'static [&'static str]) -> Self {
        Self {
            property,
            value: value.into(),
            supported,
        }
    }
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported {}: {}. Supported values are: ", self.property, self.value)?;
        for (i, literal) in self.supported.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "\"{literal}\"")?;
        }
        Ok(())
    }
}

/// Collected configuration warnings.
///
/// Each distinct warning is logged exactly once, however many render passes
/// re-validate the same value.
#[derive(Debug, Default)]
pub struct ConfigWarnings {
    seen: HashSet<ConfigWarning>,
    list: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate an optional raw literal, recording a warning when unsupported.
    pub fn check<T: ValidatedEnum>(&mut self, raw: Option<&str>) -> Option<T> {
        match T::validate(raw?) {
            Ok(value) => Some(value),
            Err(warning) => {
                self.record(warning);
                None
            }
        }
    }

    /// Record a warning. Returns `true` if it had not been seen before.
    pub fn record(&mut self, warning: ConfigWarning) -> bool {
        if !self.seen.insert(warning.clone()) {
            return false;
        }
        tracing::warn!(target: targets::CONFIG, "{}", warning);
        self.list.push(warning);
        true
    }

    /// All distinct warnings in the order they were first seen.
    pub fn as_slice(&self) -> &[ConfigWarning] {
        &self.list
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}
