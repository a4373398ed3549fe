//! Option resolution engine.

mod cascade;
mod engine;
mod inheritance;

pub use cascade::cascade_options;
pub use engine::{OptionLayer, OptionResolver, OptionSources, Resolution};
pub use inheritance::ContainerStyle;
