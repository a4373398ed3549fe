//! Container-level style inherited by every tab.

use crate::types::{Color, LabelStyle, PerState, TabOptions};
use crate::validate::{BlurEffect, LabelVisibilityMode, MinimizeBehavior};

/// Style declared once on the tab bar container.
///
/// Per-tab keys flow into every tab that does not set them itself. The
/// label visibility mode and minimize behavior apply to the bar as a whole
/// and are read by the host assembler instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContainerStyle {
    pub icon_color: PerState<Color>,
    pub label_style: PerState<LabelStyle>,
    pub background_color: Option<Color>,
    pub badge_background_color: Option<Color>,
    pub badge_text_color: Option<Color>,
    pub shadow_color: Option<Color>,
    pub indicator_color: Option<Color>,
    pub blur_effect: Option<BlurEffect>,
    pub disable_transparent_on_scroll_edge: Option<bool>,
    pub label_visibility_mode: Option<LabelVisibilityMode>,
    pub minimize_behavior: Option<MinimizeBehavior>,
}

impl ContainerStyle {
    pub fn with_icon_color(mut self, icon_color: PerState<Color>) -> Self {
        self.icon_color = icon_color;
        self
    }

    pub fn with_label_style(mut self, label_style: PerState<LabelStyle>) -> Self {
        self.label_style = label_style;
        self
    }

    pub fn with_background_color(mut self, color: impl Into<Color>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// The option layer every tab inherits.
    pub fn inherited_layer(&self) -> TabOptions {
        TabOptions {
            icon_color: self.icon_color.default.clone(),
            selected_icon_color: self.icon_color.selected.clone(),
            label_style: self.label_style.default.clone(),
            selected_label_style: self.label_style.selected.clone(),
            background_color: self.background_color.clone(),
            badge_background_color: self.badge_background_color.clone(),
            badge_text_color: self.badge_text_color.clone(),
            shadow_color: self.shadow_color.clone(),
            indicator_color: self.indicator_color.clone(),
            blur_effect: self.blur_effect,
            disable_transparent_on_scroll_edge: self.disable_transparent_on_scroll_edge,
            ..TabOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inherited_layer_splits_states() {
        let container = ContainerStyle::default()
            .with_icon_color(PerState::new(Some(Color::from("gray")), Some(Color::from("red"))))
            .with_label_style(PerState::selected_only(LabelStyle::default().with_font_size(12.0)));

        let layer = container.inherited_layer();
        assert_eq!(layer.icon_color, Some(Color::from("gray")));
        assert_eq!(layer.selected_icon_color, Some(Color::from("red")));
        assert_eq!(layer.label_style, None);
        assert_eq!(layer.selected_label_style.and_then(|s| s.font_size), Some(12.0));
        assert!(layer.title.is_none());
    }
}
