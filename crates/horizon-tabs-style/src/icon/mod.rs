//! Icon selection and asynchronous glyph loading.
//!
//! An icon child may declare several representations at once. The
//! [`resolve_icon`] function keeps the one the rendering backend prefers;
//! glyphs that need loading are handed to an [`IconLoader`] and show up on a
//! later render pass.

mod loader;
mod resolver;
mod spec;

pub use loader::{IconLoader, LookupKey, LookupOutcome, ResolvedImages};
pub use resolver::{IconResolution, IconSlot, PendingLookup, PlatformCapabilities, resolve_icon};
pub use spec::{IconFamily, IconSpec, ImageInput, Variants, VectorIcon};
