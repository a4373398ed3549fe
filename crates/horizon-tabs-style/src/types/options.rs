//! Partial and resolved per-tab option records.

use serde::{Deserialize, Serialize};

use super::{Color, LabelStyle, TabIcon};
use crate::validate::{BlurEffect, TabRole};

/// What the host does when the already focused tab is pressed again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepeatedTabSelection {
    pub pop_to_root: bool,
    pub scroll_to_top: bool,
}

/// Host-performed special effects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecialEffects {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repeated_tab_selection: Option<RepeatedTabSelection>,
}

/// One layer of tab options.
///
/// Every key is optional. When layers are cascaded, a key set on a higher
/// layer replaces that key only; unset keys fall through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TabOptions {
    pub title: Option<String>,
    pub icon: Option<TabIcon>,
    pub selected_icon: Option<TabIcon>,
    pub icon_color: Option<Color>,
    pub selected_icon_color: Option<Color>,
    pub label_style: Option<LabelStyle>,
    pub selected_label_style: Option<LabelStyle>,
    pub badge_value: Option<String>,
    pub badge_background_color: Option<Color>,
    pub selected_badge_background_color: Option<Color>,
    pub badge_text_color: Option<Color>,
    pub hidden: Option<bool>,
    pub role: Option<TabRole>,
    pub disable_transparent_on_scroll_edge: Option<bool>,
    pub blur_effect: Option<BlurEffect>,
    pub background_color: Option<Color>,
    pub shadow_color: Option<Color>,
    pub indicator_color: Option<Color>,
    pub disable_automatic_content_insets: Option<bool>,
    pub special_effects: Option<SpecialEffects>,
}

impl TabOptions {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_icon(mut self, icon: TabIcon) -> Self {
        self.icon = Some(icon);
        self
    }

    pub fn with_selected_icon(mut self, icon: TabIcon) -> Self {
        self.selected_icon = Some(icon);
        self
    }

    pub fn with_badge_value(mut self, value: impl Into<String>) -> Self {
        self.badge_value = Some(value.into());
        self
    }
}

/// The authoritative option record for one tab.
///
/// `title`, `hidden` and `special_effects` always carry a value; every other
/// key is `None` when the host default applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedTabOptions {
    pub title: String,
    pub icon: Option<TabIcon>,
    pub selected_icon: Option<TabIcon>,
    pub icon_color: Option<Color>,
    pub selected_icon_color: Option<Color>,
    pub label_style: Option<LabelStyle>,
    pub selected_label_style: Option<LabelStyle>,
    pub badge_value: Option<String>,
    pub badge_background_color: Option<Color>,
    pub selected_badge_background_color: Option<Color>,
    pub badge_text_color: Option<Color>,
    pub hidden: bool,
    pub role: Option<TabRole>,
    pub disable_transparent_on_scroll_edge: Option<bool>,
    pub blur_effect: Option<BlurEffect>,
    pub background_color: Option<Color>,
    pub shadow_color: Option<Color>,
    pub indicator_color: Option<Color>,
    pub disable_automatic_content_insets: Option<bool>,
    pub special_effects: SpecialEffects,
}

impl ResolvedTabOptions {
    /// Close a cascaded layer stack into a resolved record.
    ///
    /// `title` falls back to the route name when no layer supplied one.
    pub fn from_cascaded(route_name: &str, options: TabOptions) -> Self {
        Self {
            title: options.title.unwrap_or_else(|| route_name.to_string()),
            icon: options.icon,
            selected_icon: options.selected_icon,
            icon_color: options.icon_color,
            selected_icon_color: options.selected_icon_color,
            label_style: options.label_style,
            selected_label_style: options.selected_label_style,
            badge_value: options.badge_value,
            badge_background_color: options.badge_background_color,
            selected_badge_background_color: options.selected_badge_background_color,
            badge_text_color: options.badge_text_color,
            hidden: options.hidden.unwrap_or(false),
            role: options.role,
            disable_transparent_on_scroll_edge: options.disable_transparent_on_scroll_edge,
            blur_effect: options.blur_effect,
            background_color: options.background_color,
            shadow_color: options.shadow_color,
            indicator_color: options.indicator_color,
            disable_automatic_content_insets: options.disable_automatic_content_insets,
            special_effects: options.special_effects.unwrap_or_default(),
        }
    }
}
