//! Declarative trigger nodes, one per tab.
//!
//! # Example
//!
//! ```
//! use horizon_tabs::prelude::*;
//!
//! let trigger = TriggerNode::new("inbox")
//!     .with_child(LabelElement::new("Inbox"))
//!     .with_child(BadgeElement::new("3"))
//!     .with_child(IconElement::new(IconSpec::symbol("tray")))
//!     .disable_pop_to_top();
//!
//! assert_eq!(trigger.route_name, "inbox");
//! assert_eq!(trigger.children.len(), 3);
//! ```

use horizon_tabs_style::element::TriggerChild;
use horizon_tabs_style::resolve::OptionSources;
use horizon_tabs_style::types::TabOptions;
use horizon_tabs_style::validate::TabRole;

use crate::dispatch::ListenerSource;
use crate::error::{Result, TabsError};
use crate::identity::CompositionEntry;

/// Configuration a mounted screen supplies for its own tab.
#[derive(Debug, Clone)]
pub enum DynamicOverride {
    /// The screen redeclares the trigger's children.
    Children(Vec<TriggerChild>),
    /// The screen supplies a flat override record.
    Options(TabOptions),
}

/// Declaration of one tab.
///
/// Trigger nodes are inputs only. Every render pass reads them again and
/// produces fresh resolved options; nothing is written back.
#[derive(Debug, Clone)]
pub struct TriggerNode {
    pub route_name: String,
    pub hidden: bool,
    pub disable_pop_to_top: bool,
    pub disable_scroll_to_top: bool,
    /// Raw role literal, validated on every pass.
    pub role: Option<String>,
    pub listeners: Option<ListenerSource>,
    /// Children declared with the layout.
    pub children: Vec<TriggerChild>,
    /// Flat override record declared with the layout.
    pub explicit_options: Option<TabOptions>,
    pub dynamic_override: Option<DynamicOverride>,
}

impl TriggerNode {
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
            hidden: false,
            disable_pop_to_top: false,
            disable_scroll_to_top: false,
            role: None,
            listeners: None,
            children: Vec::new(),
            explicit_options: None,
            dynamic_override: None,
        }
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn disable_pop_to_top(mut self) -> Self {
        self.disable_pop_to_top = true;
        self
    }

    pub fn disable_scroll_to_top(mut self) -> Self {
        self.disable_scroll_to_top = true;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_listeners(mut self, listeners: ListenerSource) -> Self {
        self.listeners = Some(listeners);
        self
    }

    pub fn with_child(mut self, child: impl Into<TriggerChild>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = TriggerChild>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn with_options(mut self, options: TabOptions) -> Self {
        self.explicit_options = Some(options);
        self
    }

    pub fn composition_entry(&self) -> CompositionEntry {
        CompositionEntry::new(self.route_name.clone(), self.hidden)
    }

    /// Borrow everything the option resolver reads.
    pub fn sources(&self, role: Option<TabRole>) -> OptionSources<'_> {
        let (redeclared_children, override_options) = match &self.dynamic_override {
            Some(DynamicOverride::Children(children)) => (Some(children.as_slice()), None),
            Some(DynamicOverride::Options(options)) => (None, Some(options)),
            None => (None, None),
        };
        OptionSources {
            route_name: &self.route_name,
            hidden: self.hidden,
            disable_pop_to_top: self.disable_pop_to_top,
            disable_scroll_to_top: self.disable_scroll_to_top,
            role,
            static_children: &self.children,
            redeclared_children,
            explicit_options: self.explicit_options.as_ref(),
            override_options,
        }
    }
}

/// Where in the composed tree a tab bar is being created.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabBarScope {
    enclosing_tab: Option<String>,
}

impl TabBarScope {
    /// Outside of any native tab.
    pub fn root() -> Self {
        Self::default()
    }

    /// The scope of content rendered inside the tab for `route_name`.
    pub fn inside_tab(route_name: impl Into<String>) -> Self {
        Self {
            enclosing_tab: Some(route_name.into()),
        }
    }

    pub fn enclosing_tab(&self) -> Option<&str> {
        self.enclosing_tab.as_deref()
    }

    /// Fail if a tab bar may not be created here.
    pub fn check_can_host_tab_bar(&self) -> Result<()> {
        match &self.enclosing_tab {
            Some(route) => {
                tracing::error!(target: horizon_tabs_core::logging::targets::CORE, route = %route, "nested native tab bar");
                Err(TabsError::nested(route.clone()))
            }
            None => Ok(()),
        }
    }
}
