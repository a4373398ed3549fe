//! Icon selection per rendering backend.

use std::sync::Arc;

use horizon_tabs_core::logging::targets;

use super::loader::{LookupKey, ResolvedImages};
use super::spec::{IconFamily, IconSpec, ImageInput, Variants};
use crate::types::TabIcon;

/// Which icon representations the active rendering backend understands.
///
/// A raw image is always accepted.
#[derive(Debug, Clone, Default)]
pub struct PlatformCapabilities {
    /// Platform symbols (SF Symbols).
    pub symbols: bool,
    /// Bundled resource drawables.
    pub resources: bool,
    /// Named glyphs from the backend's built-in family.
    pub families: bool,
    /// Family that `IconSpec::family` names are looked up in.
    pub platform_family: Option<Arc<dyn IconFamily>>,
}

impl PlatformCapabilities {
    /// The iOS backend: symbols only.
    pub fn ios() -> Self {
        Self {
            symbols: true,
            ..Self::default()
        }
    }

    /// The Android backend: resources and family glyphs.
    pub fn android() -> Self {
        Self {
            resources: true,
            families: true,
            ..Self::default()
        }
    }

    /// Register the family that family-name icons resolve through.
    pub fn with_platform_family(mut self, family: Arc<dyn IconFamily>) -> Self {
        self.platform_family = Some(family);
        self
    }
}

/// One of the two icon slots of a tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconSlot {
    Default,
    Selected,
}

/// A vector glyph that has not been loaded yet.
#[derive(Debug, Clone)]
pub struct PendingLookup {
    pub slot: IconSlot,
    pub family: Arc<dyn IconFamily>,
    pub name: String,
}

impl PendingLookup {
    pub fn key(&self) -> LookupKey {
        LookupKey::new(self.family.id(), &self.name)
    }
}

/// The icon pair chosen for one tab.
#[derive(Debug, Clone, Default)]
pub struct IconResolution {
    pub icon: Option<TabIcon>,
    pub selected_icon: Option<TabIcon>,
    /// Glyphs the slots are waiting on.
    pub pending: Vec<PendingLookup>,
}

impl IconResolution {
    fn set(&mut self, slot: IconSlot, icon: TabIcon) {
        match slot {
            IconSlot::Default => self.icon = Some(icon),
            IconSlot::Selected => self.selected_icon = Some(icon),
        }
    }

    fn fill<T>(&mut self, variants: &Variants<T>, mut convert: impl FnMut(&mut Self, IconSlot, &T)) {
        let (default, selected) = variants.slots();
        if let Some(value) = default {
            convert(self, IconSlot::Default, value);
        }
        if let Some(value) = selected {
            convert(self, IconSlot::Selected, value);
        }
    }

    fn glyph(&mut self, slot: IconSlot, family: &Arc<dyn IconFamily>, name: &str, images: &ResolvedImages) {
        match images.get(&LookupKey::new(family.id(), name)) {
            Some(source) => self.set(slot, TabIcon::image(source.clone())),
            None => self.pending.push(PendingLookup {
                slot,
                family: family.clone(),
                name: name.to_string(),
            }),
        }
    }
}

/// Choose the icon for each slot of a tab.
///
/// Among the representations the backend accepts, the first supplied one in
/// the order symbol, resource, family, image wins and fills both slots from
/// its own variants. A plain value fills only the default slot; a
/// selected-only split leaves the default slot unset.
///
/// Vector glyphs found in `images` become image icons. Missing ones leave
/// their slot unset and are reported in [`IconResolution::pending`].
///
/// # Example
///
/// ```
/// use horizon_tabs_style::icon::{IconSpec, PlatformCapabilities, ResolvedImages, resolve_icon};
/// use horizon_tabs_style::types::TabIcon;
///
/// let spec = IconSpec::symbol("house").with_resource("ic_home");
///
/// let ios = resolve_icon(&spec, &PlatformCapabilities::ios(), &ResolvedImages::default());
/// assert_eq!(ios.icon, Some(TabIcon::symbol("house")));
///
/// let android = resolve_icon(&spec, &PlatformCapabilities::android(), &ResolvedImages::default());
/// assert_eq!(android.icon, Some(TabIcon::resource("ic_home")));
/// ```
pub fn resolve_icon(
    spec: &IconSpec,
    capabilities: &PlatformCapabilities,
    images: &ResolvedImages,
) -> IconResolution {
    let mut resolution = IconResolution::default();

    if capabilities.symbols
        && let Some(symbol) = &spec.symbol
    {
        resolution.fill(symbol, |r, slot, name| r.set(slot, TabIcon::symbol(name.as_str())));
        return resolution;
    }

    if capabilities.resources
        && let Some(resource) = &spec.resource
    {
        resolution.fill(resource, |r, slot, name| r.set(slot, TabIcon::resource(name.as_str())));
        return resolution;
    }

    if capabilities.families
        && let Some(family_names) = &spec.family
    {
        match &capabilities.platform_family {
            Some(family) => {
                resolution.fill(family_names, |r, slot, name| r.glyph(slot, family, name, images));
                return resolution;
            }
            None => {
                tracing::trace!(target: targets::ICON, "no platform family registered, skipping family icon");
            }
        }
    }

    if let Some(image) = &spec.image {
        resolution.fill(image, |r, slot, input| match input {
            ImageInput::Source(source) => r.set(slot, TabIcon::image(source.clone())),
            ImageInput::Vector(vector) => r.glyph(slot, &vector.family, &vector.name, images),
        });
    }

    resolution
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::icon::VectorIcon;
    use crate::types::ImageSource;

    struct Letters;

    impl IconFamily for Letters {
        fn id(&self) -> &str {
            "letters"
        }

        fn image_source(&self, name: &str) -> Result<ImageSource> {
            Ok(ImageSource::uri(name))
        }
    }

    fn none() -> ResolvedImages {
        ResolvedImages::default()
    }

    #[test]
    fn test_plain_symbol_fills_default_only() {
        let r = resolve_icon(&IconSpec::symbol("0.circle"), &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, Some(TabIcon::symbol("0.circle")));
        assert_eq!(r.selected_icon, None);
    }

    #[test]
    fn test_split_symbol_fills_both() {
        let spec = IconSpec::symbol(Variants::<String>::split("0.circle", "0.circle.fill"));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, Some(TabIcon::symbol("0.circle")));
        assert_eq!(r.selected_icon, Some(TabIcon::symbol("0.circle.fill")));
    }

    #[test]
    fn test_selected_only_leaves_default_unset() {
        let spec = IconSpec::symbol(Variants::<String>::selected_only("0.circle.fill"));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, None);
        assert_eq!(r.selected_icon, Some(TabIcon::symbol("0.circle.fill")));
    }

    #[test]
    fn test_unsupported_representation_dropped() {
        let spec = IconSpec::resource("ic_home");
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, None);

        let spec = IconSpec::symbol("house");
        let r = resolve_icon(&spec, &PlatformCapabilities::android(), &none());
        assert_eq!(r.icon, None);
    }

    #[test]
    fn test_symbol_beats_image() {
        let spec = IconSpec::symbol("house").with_image(ImageSource::uri("home.png"));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, Some(TabIcon::symbol("house")));
        assert!(r.pending.is_empty());
    }

    #[test]
    fn test_symbol_beats_vector_image() {
        let family: Arc<dyn IconFamily> = Arc::new(Letters);
        let spec = IconSpec::symbol("house").with_image(VectorIcon::new(family, "a"));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, Some(TabIcon::symbol("house")));
        assert!(r.pending.is_empty());
    }

    #[test]
    fn test_image_used_when_nothing_else_accepted() {
        let spec = IconSpec::resource("ic_home").with_image(ImageSource::uri("xxx").with_scale(2.0));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, Some(TabIcon::image(ImageSource::uri("xxx").with_scale(2.0))));
    }

    #[test]
    fn test_resource_beats_family_on_android() {
        let caps = PlatformCapabilities::android().with_platform_family(Arc::new(Letters));
        let spec = IconSpec::family("home").with_resource("ic_home");
        let r = resolve_icon(&spec, &caps, &none());
        assert_eq!(r.icon, Some(TabIcon::resource("ic_home")));
        assert!(r.pending.is_empty());
    }

    #[test]
    fn test_family_glyph_pending_until_resolved() {
        let caps = PlatformCapabilities::android().with_platform_family(Arc::new(Letters));
        let spec = IconSpec::family("home");

        let first = resolve_icon(&spec, &caps, &none());
        assert_eq!(first.icon, None);
        assert_eq!(first.pending.len(), 1);
        assert_eq!(first.pending[0].key(), LookupKey::new("letters", "home"));

        let mut images = ResolvedImages::default();
        images.insert(LookupKey::new("letters", "home"), ImageSource::uri("home"));
        let second = resolve_icon(&spec, &caps, &images);
        assert_eq!(second.icon, Some(TabIcon::image(ImageSource::uri("home"))));
        assert!(second.pending.is_empty());
    }

    #[test]
    fn test_vector_default_with_plain_selected() {
        let family: Arc<dyn IconFamily> = Arc::new(Letters);
        let spec = IconSpec::image(Variants::<ImageInput>::split(
            VectorIcon::new(family, "a"),
            ImageSource::uri("yyy"),
        ));
        let r = resolve_icon(&spec, &PlatformCapabilities::ios(), &none());
        assert_eq!(r.icon, None);
        assert_eq!(r.selected_icon, Some(TabIcon::image(ImageSource::uri("yyy"))));
        assert_eq!(r.pending.len(), 1);
        assert_eq!(r.pending[0].slot, IconSlot::Default);
    }
}
