//! Tab option resolution for Horizon Tabs.
//!
//! This crate turns declarative tab configuration into flat option records:
//!
//! - **Elements**: label, badge and icon children as plain configuration values
//! - **Cascading**: defaults, container inheritance, declared children and
//!   override records merged key by key
//! - **Icons**: backend-aware icon selection and asynchronous glyph loading
//! - **Validation**: enumerated properties checked against their literals
//!
//! # Example
//!
//! ```
//! use horizon_tabs_style::prelude::*;
//!
//! let container = ContainerStyle::default()
//!     .with_icon_color(PerState::selected_only(Color::from("red")));
//! let resolver = OptionResolver::new(container, PlatformCapabilities::ios());
//!
//! let children = [
//!     TriggerChild::from(LabelElement::new("Inbox")),
//!     TriggerChild::from(BadgeElement::new("3")),
//! ];
//! let sources = OptionSources {
//!     static_children: &children,
//!     ..OptionSources::new("inbox")
//! };
//!
//! let options = resolver.resolve(&sources, &ResolvedImages::default());
//! assert_eq!(options.title, "Inbox");
//! assert_eq!(options.badge_value.as_deref(), Some("3"));
//! assert_eq!(options.selected_icon_color, Some(Color::from("red")));
//! ```

pub mod element;
pub mod icon;
pub mod resolve;
pub mod types;
pub mod validate;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::element::{BadgeElement, IconElement, LabelElement, TriggerChild};
    pub use crate::icon::{
        IconFamily, IconLoader, IconSpec, ImageInput, PlatformCapabilities, ResolvedImages, Variants,
        VectorIcon,
    };
    pub use crate::resolve::{ContainerStyle, OptionResolver, OptionSources};
    pub use crate::types::{
        Color, ImageSource, LabelStyle, PerState, RepeatedTabSelection, ResolvedTabOptions,
        SpecialEffects, TabIcon, TabOptions,
    };
    pub use crate::validate::{
        BlurEffect, ConfigWarning, ConfigWarnings, LabelVisibilityMode, MinimizeBehavior, TabRole,
        ValidatedEnum,
    };
}
