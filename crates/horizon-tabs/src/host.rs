//! Assembly of the flat records handed to the native host.
//!
//! The host understands nothing but per-tab descriptors and a handful of
//! bar-wide values. Each descriptor carries two appearances: the standard
//! one and the one used while content is scrolled to the bar's edge.

use serde::Serialize;

use horizon_tabs_style::types::{Color, LabelStyle, ResolvedTabOptions, SpecialEffects, TabIcon};
use horizon_tabs_style::validate::{BlurEffect, LabelVisibilityMode, MinimizeBehavior, TabRole};

use crate::error::Result;

const TRANSPARENT: &str = "transparent";

/// Styling of a tab item in one state.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAppearance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_color: Option<Color>,
    pub title: LabelStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_text_color: Option<Color>,
}

/// Bar appearance for one tab.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blur_effect: Option<BlurEffect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadow_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indicator_color: Option<Color>,
    pub normal: ItemAppearance,
    pub selected: ItemAppearance,
}

impl Appearance {
    /// The standard appearance of a resolved tab.
    ///
    /// The selected item state is the selected style cascaded over the
    /// default style.
    pub fn standard(options: &ResolvedTabOptions) -> Self {
        let normal_title = options.label_style.clone().unwrap_or_default();
        let selected_title = match &options.selected_label_style {
            Some(selected) => selected.cascaded_over(&normal_title),
            None => normal_title.clone(),
        };

        Self {
            background_color: options.background_color.clone(),
            blur_effect: options.blur_effect,
            shadow_color: options.shadow_color.clone(),
            indicator_color: options.indicator_color.clone(),
            normal: ItemAppearance {
                icon_color: options.icon_color.clone(),
                title: normal_title,
                badge_background_color: options.badge_background_color.clone(),
                badge_text_color: options.badge_text_color.clone(),
            },
            selected: ItemAppearance {
                icon_color: options.selected_icon_color.clone().or_else(|| options.icon_color.clone()),
                title: selected_title,
                badge_background_color: options
                    .selected_badge_background_color
                    .clone()
                    .or_else(|| options.badge_background_color.clone()),
                badge_text_color: options.badge_text_color.clone(),
            },
        }
    }

    /// The appearance used at the scroll edge.
    ///
    /// Transparent unless the tab opted out, in which case it equals the
    /// standard appearance.
    pub fn scroll_edge(options: &ResolvedTabOptions, standard: &Appearance) -> Self {
        if options.disable_transparent_on_scroll_edge == Some(true) {
            return standard.clone();
        }
        Self {
            background_color: Some(Color::from(TRANSPARENT)),
            blur_effect: Some(BlurEffect::None),
            shadow_color: Some(Color::from(TRANSPARENT)),
            ..standard.clone()
        }
    }
}

/// Everything the host needs to render one tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabDescriptor {
    pub tab_key: String,
    pub is_focused: bool,
    pub hidden: bool,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<TabIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_icon: Option<TabIcon>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge_value: Option<String>,
    pub special_effects: SpecialEffects,
    pub standard_appearance: Appearance,
    pub scroll_edge_appearance: Appearance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<TabRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_automatic_content_insets: Option<bool>,
}

impl TabDescriptor {
    /// Build the descriptor of one tab from its resolved options.
    pub fn assemble(tab_key: impl Into<String>, is_focused: bool, options: &ResolvedTabOptions) -> Self {
        let standard_appearance = Appearance::standard(options);
        let scroll_edge_appearance = Appearance::scroll_edge(options, &standard_appearance);
        Self {
            tab_key: tab_key.into(),
            is_focused,
            hidden: options.hidden,
            title: options.title.clone(),
            icon: options.icon.clone(),
            selected_icon: options.selected_icon.clone(),
            badge_value: options.badge_value.clone(),
            special_effects: options.special_effects,
            standard_appearance,
            scroll_edge_appearance,
            role: options.role,
            disable_automatic_content_insets: options.disable_automatic_content_insets,
        }
    }
}

/// The complete input of the native host for one render pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostProps {
    pub tabs: Vec<TabDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_visibility_mode: Option<LabelVisibilityMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimize_behavior: Option<MinimizeBehavior>,
}

impl HostProps {
    /// The descriptor of the focused tab.
    pub fn focused(&self) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|tab| tab.is_focused)
    }

    pub fn tab(&self, tab_key: &str) -> Option<&TabDescriptor> {
        self.tabs.iter().find(|tab| tab.tab_key == tab_key)
    }

    /// Encode for transport over a JSON bridge.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolved() -> ResolvedTabOptions {
        ResolvedTabOptions {
            title: "Home".to_string(),
            icon_color: Some(Color::from("gray")),
            selected_icon_color: Some(Color::from("red")),
            label_style: Some(LabelStyle::default().with_font_size(11.0).with_color("gray")),
            selected_label_style: Some(LabelStyle::default().with_color("black")),
            background_color: Some(Color::from("white")),
            badge_background_color: Some(Color::from("orange")),
            ..ResolvedTabOptions::default()
        }
    }

    #[test]
    fn test_selected_state_cascades_over_default() {
        let appearance = Appearance::standard(&resolved());

        assert_eq!(appearance.normal.icon_color, Some(Color::from("gray")));
        assert_eq!(appearance.selected.icon_color, Some(Color::from("red")));
        assert_eq!(appearance.selected.title.font_size, Some(11.0));
        assert_eq!(appearance.selected.title.color, Some(Color::from("black")));
        assert_eq!(appearance.selected.badge_background_color, Some(Color::from("orange")));
    }

    #[test]
    fn test_scroll_edge_is_transparent_by_default() {
        let options = resolved();
        let descriptor = TabDescriptor::assemble("index-0-abc", true, &options);

        let edge = &descriptor.scroll_edge_appearance;
        assert_eq!(edge.background_color, Some(Color::from(TRANSPARENT)));
        assert_eq!(edge.blur_effect, Some(BlurEffect::None));
        assert_eq!(edge.selected, descriptor.standard_appearance.selected);
    }

    #[test]
    fn test_scroll_edge_opt_out() {
        let options = ResolvedTabOptions {
            disable_transparent_on_scroll_edge: Some(true),
            ..resolved()
        };
        let descriptor = TabDescriptor::assemble("index-0-abc", false, &options);
        assert_eq!(descriptor.scroll_edge_appearance, descriptor.standard_appearance);
    }

    #[test]
    fn test_descriptor_wire_shape() {
        let props = HostProps {
            tabs: vec![TabDescriptor::assemble("index-0-abc", true, &resolved())],
            label_visibility_mode: Some(LabelVisibilityMode::Labeled),
            minimize_behavior: None,
        };

        let json: serde_json::Value = serde_json::from_str(&props.to_json().unwrap()).unwrap();
        let tab = &json["tabs"][0];
        assert_eq!(tab["tabKey"], "index-0-abc");
        assert_eq!(tab["isFocused"], true);
        assert_eq!(tab["title"], "Home");
        assert!(tab.get("badgeValue").is_none());
        assert_eq!(tab["standardAppearance"]["selected"]["iconColor"], "red");
        assert_eq!(json["labelVisibilityMode"], "labeled");
        assert!(json.get("minimizeBehavior").is_none());
    }

    #[test]
    fn test_focused_lookup() {
        let props = HostProps {
            tabs: vec![
                TabDescriptor::assemble("a", false, &resolved()),
                TabDescriptor::assemble("b", true, &resolved()),
            ],
            ..HostProps::default()
        };
        assert_eq!(props.focused().map(|t| t.tab_key.as_str()), Some("b"));
        assert!(props.tab("c").is_none());
    }
}
