//! Option layer cascading.

use crate::types::TabOptions;

/// Cascade source options onto target.
///
/// Only keys set in `source` are copied; everything else in `target` is left
/// as it was. Later layers override earlier ones key by key.
pub fn cascade_options(target: &mut TabOptions, source: &TabOptions) {
    macro_rules! cascade_if_set {
        ($($key:ident),+ $(,)?) => {
            $(
                if source.$key.is_some() {
                    target.$key = source.$key.clone();
                }
            )+
        };
    }

    cascade_if_set!(
        // Text
        title,
        label_style,
        selected_label_style,
        // Icon
        icon,
        selected_icon,
        icon_color,
        selected_icon_color,
        // Badge
        badge_value,
        badge_background_color,
        selected_badge_background_color,
        badge_text_color,
        // Bar
        hidden,
        role,
        disable_transparent_on_scroll_edge,
        blur_effect,
        background_color,
        shadow_color,
        indicator_color,
        disable_automatic_content_insets,
        special_effects,
    );
}
