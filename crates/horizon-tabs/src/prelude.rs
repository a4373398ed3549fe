//! Prelude module for Horizon Tabs.
//!
//! ```ignore
//! use horizon_tabs::prelude::*;
//! ```

// ============================================================================
// Core
// ============================================================================

pub use horizon_tabs_core::{ConnectionType, SharedTaskQueue, Signal};

// ============================================================================
// Declarations and Style
// ============================================================================

pub use horizon_tabs_style::prelude::*;

pub use crate::trigger::{DynamicOverride, TabBarScope, TriggerNode};

// ============================================================================
// Controller
// ============================================================================

pub use crate::dispatch::{ListenerMap, ListenerSource, TAB_PRESS, TabEvent};
pub use crate::focus::{FocusPhase, FocusState, PressOutcome};
pub use crate::host::{Appearance, HostProps, ItemAppearance, TabDescriptor};
pub use crate::navigation::{NavigationAction, NavigationState, Navigator};
pub use crate::settings::TabsSettings;
pub use crate::tab_bar::{NativeFocusChange, NativeTabs, RenderPass, TabBarProps, TurnReport};
pub use crate::{Result, TabsError};
