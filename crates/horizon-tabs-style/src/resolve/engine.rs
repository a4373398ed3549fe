//! The option resolution engine.

use horizon_tabs_core::logging::targets;

use crate::element::{ElementSet, TriggerChild};
use crate::icon::{PendingLookup, PlatformCapabilities, ResolvedImages, resolve_icon};
use crate::resolve::cascade::cascade_options;
use crate::resolve::inheritance::ContainerStyle;
use crate::types::{RepeatedTabSelection, ResolvedTabOptions, SpecialEffects, TabOptions};
use crate::validate::TabRole;

/// Option layers, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OptionLayer {
    /// Route name title, special effects, hidden flag.
    Defaults,
    /// Container-level inherited style.
    Container,
    /// Children declared with the layout.
    Declared,
    /// Children redeclared by a mounted screen.
    Redeclared,
    /// Flat override record declared with the layout.
    Explicit,
    /// Flat override record supplied by a mounted screen.
    Override,
}

impl OptionLayer {
    /// Every layer in cascade order.
    pub const ALL: [OptionLayer; 6] = [
        OptionLayer::Defaults,
        OptionLayer::Container,
        OptionLayer::Declared,
        OptionLayer::Redeclared,
        OptionLayer::Explicit,
        OptionLayer::Override,
    ];
}

/// Everything declared for one tab.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptionSources<'a> {
    pub route_name: &'a str,
    pub hidden: bool,
    pub disable_pop_to_top: bool,
    pub disable_scroll_to_top: bool,
    pub role: Option<TabRole>,
    pub static_children: &'a [TriggerChild],
    pub redeclared_children: Option<&'a [TriggerChild]>,
    pub explicit_options: Option<&'a TabOptions>,
    pub override_options: Option<&'a TabOptions>,
}

impl<'a> OptionSources<'a> {
    pub fn new(route_name: &'a str) -> Self {
        Self {
            route_name,
            ..Self::default()
        }
    }
}

/// Output of one resolution pass for one tab.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub options: ResolvedTabOptions,
    /// Vector glyphs that were not loaded yet.
    pub pending: Vec<PendingLookup>,
}

/// Resolves per-tab options against one container.
///
/// Resolution is pure: the same sources and images always produce equal
/// options.
///
/// # Example
///
/// ```
/// use horizon_tabs_style::prelude::*;
///
/// let resolver = OptionResolver::new(ContainerStyle::default(), PlatformCapabilities::ios());
/// let children = [TriggerChild::from(LabelElement::new("Home"))];
///
/// let sources = OptionSources {
///     static_children: &children,
///     ..OptionSources::new("index")
/// };
/// let options = resolver.resolve(&sources, &ResolvedImages::default());
/// assert_eq!(options.title, "Home");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionResolver {
    container: ContainerStyle,
    capabilities: PlatformCapabilities,
}

impl OptionResolver {
    pub fn new(container: ContainerStyle, capabilities: PlatformCapabilities) -> Self {
        Self {
            container,
            capabilities,
        }
    }

    pub fn container(&self) -> &ContainerStyle {
        &self.container
    }

    pub fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    /// Resolve the options of one tab.
    pub fn resolve(&self, sources: &OptionSources<'_>, images: &ResolvedImages) -> ResolvedTabOptions {
        self.resolve_pass(sources, images).options
    }

    /// Resolve the options of one tab, reporting glyphs still loading.
    pub fn resolve_pass(&self, sources: &OptionSources<'_>, images: &ResolvedImages) -> Resolution {
        let mut pending = Vec::new();
        let mut cascaded = TabOptions::default();

        for layer in OptionLayer::ALL {
            let Some(LayerOptions { options, owns_icon_slots }) = self.layer(layer, sources, images, &mut pending) else {
                continue;
            };
            tracing::trace!(target: targets::RESOLVE, route = sources.route_name, ?layer, "cascading layer");
            cascade_options(&mut cascaded, &options);
            if owns_icon_slots {
                cascaded.icon = options.icon;
                cascaded.selected_icon = options.selected_icon;
            }
        }

        Resolution {
            options: ResolvedTabOptions::from_cascaded(sources.route_name, cascaded),
            pending,
        }
    }

    fn layer(
        &self,
        layer: OptionLayer,
        sources: &OptionSources<'_>,
        images: &ResolvedImages,
        pending: &mut Vec<PendingLookup>,
    ) -> Option<LayerOptions> {
        match layer {
            OptionLayer::Defaults => Some(Self::defaults(sources).into()),
            OptionLayer::Container => Some(self.container.inherited_layer().into()),
            OptionLayer::Declared => Some(self.element_layer(sources.static_children, images, pending)),
            OptionLayer::Redeclared => sources
                .redeclared_children
                .map(|children| self.element_layer(children, images, pending)),
            OptionLayer::Explicit => sources.explicit_options.cloned().map(Into::into),
            OptionLayer::Override => sources.override_options.cloned().map(Into::into),
        }
    }

    fn defaults(sources: &OptionSources<'_>) -> TabOptions {
        TabOptions {
            title: Some(sources.route_name.to_string()),
            hidden: Some(sources.hidden),
            role: sources.role,
            special_effects: Some(SpecialEffects {
                repeated_tab_selection: Some(RepeatedTabSelection {
                    pop_to_root: !sources.disable_pop_to_top,
                    scroll_to_top: !sources.disable_scroll_to_top,
                }),
            }),
            ..TabOptions::default()
        }
    }

    /// Turn a list of declared children into one option layer.
    ///
    /// An icon element owns both icon slots: an unset selected variant
    /// clears one inherited from a lower children layer.
    fn element_layer(
        &self,
        children: &[TriggerChild],
        images: &ResolvedImages,
        pending: &mut Vec<PendingLookup>,
    ) -> LayerOptions {
        let elements = ElementSet::collect(children);
        let mut options = TabOptions::default();
        elements.apply_text_keys(&mut options);

        let owns_icon_slots = elements.icon.is_some();
        if let Some(icon) = &elements.icon {
            let resolution = resolve_icon(&icon.spec, &self.capabilities, images);
            options.icon = resolution.icon;
            options.selected_icon = resolution.selected_icon;
            options.icon_color = icon.color.clone();
            options.selected_icon_color = icon.selected_color.clone();
            pending.extend(resolution.pending);
        }

        LayerOptions {
            options,
            owns_icon_slots,
        }
    }
}

/// One layer ready to cascade.
struct LayerOptions {
    options: TabOptions,
    /// `icon` and `selected_icon` replace the cascaded pair even when unset.
    owns_icon_slots: bool,
}

impl From<TabOptions> for LayerOptions {
    fn from(options: TabOptions) -> Self {
        Self {
            options,
            owns_icon_slots: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{BadgeElement, IconElement, LabelElement};
    use crate::icon::{IconSpec, Variants};
    use crate::types::{Color, PerState, TabIcon};

    fn resolver() -> OptionResolver {
        OptionResolver::new(ContainerStyle::default(), PlatformCapabilities::ios())
    }

    fn resolve(sources: &OptionSources<'_>) -> ResolvedTabOptions {
        resolver().resolve(sources, &ResolvedImages::default())
    }

    #[test]
    fn test_bare_trigger_resolves_to_defaults() {
        let options = resolve(&OptionSources::new("index"));
        assert_eq!(options.title, "index");
        assert!(!options.hidden);
        assert_eq!(
            options.special_effects.repeated_tab_selection,
            Some(RepeatedTabSelection {
                pop_to_root: true,
                scroll_to_top: true,
            })
        );
        assert_eq!(options.icon, None);
        assert_eq!(options.badge_value, None);
    }

    #[test]
    fn test_disabled_special_effects() {
        let sources = OptionSources {
            disable_pop_to_top: true,
            ..OptionSources::new("index")
        };
        let effects = resolve(&sources).special_effects.repeated_tab_selection;
        assert_eq!(
            effects,
            Some(RepeatedTabSelection {
                pop_to_root: false,
                scroll_to_top: true,
            })
        );
    }

    #[test]
    fn test_resolution_is_pure() {
        let children = [
            TriggerChild::from(LabelElement::new("Home")),
            BadgeElement::new("2").into(),
            IconElement::new(IconSpec::symbol("house")).into(),
        ];
        let sources = OptionSources {
            static_children: &children,
            ..OptionSources::new("index")
        };
        assert_eq!(resolve(&sources), resolve(&sources));
    }

    #[test]
    fn test_container_selected_icon_color_inherited_unless_overridden() {
        let container = ContainerStyle::default()
            .with_icon_color(PerState::selected_only(Color::from("red")));
        let resolver = OptionResolver::new(container, PlatformCapabilities::ios());
        let images = ResolvedImages::default();

        let blue = [TriggerChild::from(
            IconElement::new(IconSpec::symbol("house")).with_selected_color("blue"),
        )];
        let overriding = OptionSources {
            static_children: &blue,
            ..OptionSources::new("index")
        };
        let plain = OptionSources::new("second");

        assert_eq!(
            resolver.resolve(&overriding, &images).selected_icon_color,
            Some(Color::from("blue"))
        );
        assert_eq!(
            resolver.resolve(&plain, &images).selected_icon_color,
            Some(Color::from("red"))
        );
    }

    #[test]
    fn test_title_only_override_keeps_icon_and_badge() {
        let children = [
            TriggerChild::from(BadgeElement::new("3")),
            IconElement::new(IconSpec::symbol("0.circle")).into(),
        ];
        let explicit = TabOptions::default().with_title("Custom");
        let sources = OptionSources {
            static_children: &children,
            explicit_options: Some(&explicit),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.title, "Custom");
        assert_eq!(options.badge_value.as_deref(), Some("3"));
        assert_eq!(options.icon, Some(TabIcon::symbol("0.circle")));
    }

    #[test]
    fn test_layout_override_beats_screen_children() {
        let layout_children: [TriggerChild; 0] = [];
        let screen_children = [
            TriggerChild::from(LabelElement::new("Updated Title")),
            BadgeElement::new("5").into(),
            IconElement::new(IconSpec::symbol("homepod.2.fill")).into(),
        ];
        let explicit = TabOptions::default().with_title("Initial Title");
        let sources = OptionSources {
            static_children: &layout_children,
            redeclared_children: Some(&screen_children),
            explicit_options: Some(&explicit),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.title, "Initial Title");
        assert_eq!(options.badge_value.as_deref(), Some("5"));
        assert_eq!(options.icon, Some(TabIcon::symbol("homepod.2.fill")));
    }

    #[test]
    fn test_screen_override_beats_layout_children() {
        let layout_children = [
            TriggerChild::from(LabelElement::new("Initial Title")),
            BadgeElement::new("3").into(),
            IconElement::new(IconSpec::symbol("0.circle")).into(),
        ];
        let screen = TabOptions::default()
            .with_title("Updated Title")
            .with_badge_value("5")
            .with_icon(TabIcon::symbol("homepod.2.fill"));
        let sources = OptionSources {
            static_children: &layout_children,
            override_options: Some(&screen),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.title, "Updated Title");
        assert_eq!(options.badge_value.as_deref(), Some("5"));
        assert_eq!(options.icon, Some(TabIcon::symbol("homepod.2.fill")));
    }

    #[test]
    fn test_partial_redeclaration_keeps_other_kinds() {
        let layout_children = [
            TriggerChild::from(LabelElement::new("Layout")),
            BadgeElement::new("3").into(),
            IconElement::new(IconSpec::symbol("0.circle")).into(),
        ];
        let screen_children = [TriggerChild::from(LabelElement::new("Screen"))];
        let sources = OptionSources {
            static_children: &layout_children,
            redeclared_children: Some(&screen_children),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.title, "Screen");
        assert_eq!(options.badge_value.as_deref(), Some("3"));
        assert_eq!(options.icon, Some(TabIcon::symbol("0.circle")));
    }

    #[test]
    fn test_hidden_label_gives_empty_title_not_route_name() {
        let children = [TriggerChild::from(LabelElement::hidden())];
        let sources = OptionSources {
            static_children: &children,
            ..OptionSources::new("index")
        };
        assert_eq!(resolve(&sources).title, "");
    }

    #[test]
    fn test_vector_icon_reports_pending_lookup() {
        use crate::icon::{IconFamily, VectorIcon};
        use crate::types::ImageSource;
        use std::sync::Arc;

        struct Glyphs;
        impl IconFamily for Glyphs {
            fn id(&self) -> &str {
                "glyphs"
            }
            fn image_source(&self, name: &str) -> crate::Result<ImageSource> {
                Ok(ImageSource::uri(name))
            }
        }

        let children = [TriggerChild::from(IconElement::new(IconSpec::image(VectorIcon::new(
            Arc::new(Glyphs),
            "a",
        ))))];
        let sources = OptionSources {
            static_children: &children,
            ..OptionSources::new("index")
        };

        let pass = resolver().resolve_pass(&sources, &ResolvedImages::default());
        assert_eq!(pass.options.icon, None);
        assert_eq!(pass.pending.len(), 1);

    }
    #[test]
    fn test_redeclared_icon_replaces_both_slots() {
        let layout_children = [TriggerChild::from(IconElement::new(IconSpec::symbol(Variants::<String>::split(
            "house",
            "house.fill",
        ))))];
        let screen_children = [TriggerChild::from(IconElement::new(IconSpec::symbol("star")))];
        let sources = OptionSources {
            static_children: &layout_children,
            redeclared_children: Some(&screen_children),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.icon, Some(TabIcon::symbol("star")));
        assert_eq!(options.selected_icon, None);
    }

    #[test]
    fn test_override_icon_keeps_selected_variant() {
        let children = [TriggerChild::from(IconElement::new(IconSpec::symbol(Variants::<String>::split(
            "house",
            "house.fill",
        ))))];
        let explicit = TabOptions::default().with_icon(TabIcon::symbol("star"));
        let sources = OptionSources {
            static_children: &children,
            explicit_options: Some(&explicit),
            ..OptionSources::new("index")
        };

        let options = resolve(&sources);
        assert_eq!(options.icon, Some(TabIcon::symbol("star")));
        assert_eq!(options.selected_icon, Some(TabIcon::symbol("house.fill")));
    }
}
