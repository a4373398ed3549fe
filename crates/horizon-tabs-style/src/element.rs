//! Declarative trigger children.
//!
//! Label, badge and icon children never render anything; they are plain
//! configuration values read by the option resolver.

use horizon_tabs_core::logging::targets;

use crate::icon::IconSpec;
use crate::types::{Color, LabelStyle, TabOptions};

/// Text and style of a tab's label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabelElement {
    pub text: Option<String>,
    pub hidden: bool,
    pub style: Option<LabelStyle>,
    pub selected_style: Option<LabelStyle>,
}

impl LabelElement {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn hidden() -> Self {
        Self {
            hidden: true,
            ..Self::default()
        }
    }

    pub fn with_style(mut self, style: LabelStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn with_selected_style(mut self, style: LabelStyle) -> Self {
        self.selected_style = Some(style);
        self
    }
}

/// A badge shown on a tab item.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BadgeElement {
    pub value: Option<String>,
    pub hidden: bool,
    pub background_color: Option<Color>,
    pub selected_background_color: Option<Color>,
    pub text_color: Option<Color>,
}

impl BadgeElement {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// A badge with no text, shown as a dot.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn with_selected_background_color(mut self, color: impl Into<Color>) -> Self {
        self.selected_background_color = Some(color.into());
        self
    }

    pub fn with_text_color(mut self, color: impl Into<Color>) -> Self {
        self.text_color = Some(color.into());
        self
    }
}

/// An icon with optional tint colors.
#[derive(Debug, Clone, Default)]
pub struct IconElement {
    pub spec: IconSpec,
    pub color: Option<Color>,
    pub selected_color: Option<Color>,
}

impl IconElement {
    pub fn new(spec: IconSpec) -> Self {
        Self {
            spec,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_selected_color(mut self, color: impl Into<Color>) -> Self {
        self.selected_color = Some(color.into());
        self
    }
}

/// One declared child of a trigger.
#[derive(Debug, Clone)]
pub enum TriggerChild {
    Label(LabelElement),
    Badge(BadgeElement),
    Icon(IconElement),
    /// A child kind this version does not understand. Ignored.
    Unknown { kind: String },
}

impl From<LabelElement> for TriggerChild {
    fn from(value: LabelElement) -> Self {
        Self::Label(value)
    }
}

impl From<BadgeElement> for TriggerChild {
    fn from(value: BadgeElement) -> Self {
        Self::Badge(value)
    }
}

impl From<IconElement> for TriggerChild {
    fn from(value: IconElement) -> Self {
        Self::Icon(value)
    }
}

/// The effective child of each kind after traversal.
#[derive(Debug, Clone, Default)]
pub struct ElementSet {
    pub label: Option<LabelElement>,
    pub badge: Option<BadgeElement>,
    pub icon: Option<IconElement>,
}

impl ElementSet {
    /// Walk declared children in order; the last element of each kind wins.
    pub fn collect(children: &[TriggerChild]) -> Self {
        let mut set = Self::default();
        for child in children {
            match child {
                TriggerChild::Label(label) => set.label = Some(label.clone()),
                TriggerChild::Badge(badge) => set.badge = Some(badge.clone()),
                TriggerChild::Icon(icon) => set.icon = Some(icon.clone()),
                TriggerChild::Unknown { kind } => {
                    tracing::trace!(target: targets::RESOLVE, kind = %kind, "ignoring unknown child kind");
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.badge.is_none() && self.icon.is_none()
    }

    /// Write the label and badge keys into `options`.
    ///
    /// Icons need backend capabilities and are applied by the resolver.
    pub fn apply_text_keys(&self, options: &mut TabOptions) {
        if let Some(label) = &self.label {
            if label.hidden {
                options.title = Some(String::new());
            } else if let Some(text) = label.text.as_ref().filter(|t| !t.is_empty()) {
                options.title = Some(text.clone());
            }
            options.label_style = label.style.clone();
            options.selected_label_style = label.selected_style.clone();
        }

        if let Some(badge) = &self.badge {
            if !badge.hidden {
                options.badge_value = Some(match badge.value.as_deref() {
                    None | Some("") => " ".to_string(),
                    Some(value) => value.to_string(),
                });
            }
            options.badge_background_color = badge.background_color.clone();
            options.selected_badge_background_color = badge.selected_background_color.clone();
            options.badge_text_color = badge.text_color.clone();
        }
    }
}
