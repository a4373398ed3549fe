//! Horizon Tabs - declarative native tab bars.
//!
//! This is the umbrella crate. It ties option resolution from
//! `horizon-tabs-style` to a tab bar controller that decides when the native
//! host must be rebuilt and keeps focus in sync with the routing layer.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tabs::prelude::*;
//!
//! let navigator: Arc<dyn Navigator> = Arc::new(|_: NavigationAction| {});
//! let mut tabs = NativeTabs::new(&TabBarScope::root(), TabBarProps::default(), navigator)?;
//! tabs.set_triggers(vec![TriggerNode::new("index"), TriggerNode::new("second")]);
//!
//! let pass = tabs.render(&NavigationState::new("second"))?;
//! let focused = pass.props.focused().map(|t| t.title.clone());
//! assert_eq!(focused.as_deref(), Some("second"));
//! # Ok::<(), horizon_tabs::TabsError>(())
//! ```

pub use horizon_tabs_core::*;

/// Option types, cascading and icon resolution.
pub mod style {
    pub use horizon_tabs_style::*;
}

pub mod dispatch;
pub mod focus;
pub mod host;
pub mod identity;
pub mod navigation;
pub mod prelude;
pub mod settings;
pub mod tab_bar;
pub mod trigger;

mod error;

pub use error::{Result, TabsError};

static_assertions::assert_impl_all!(tab_bar::NativeTabs: Send);
static_assertions::assert_impl_all!(dispatch::EventDispatcher: Send, Sync);
