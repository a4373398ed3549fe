//! The tab bar controller.
//!
//! [`NativeTabs`] owns one tab bar instance. The application feeds it
//! trigger declarations and navigation state and calls [`NativeTabs::render`]
//! to obtain the host props. The host reports presses through
//! [`NativeTabs::on_native_focus_change`]; presses and vector icon lookups
//! are resolved on the next [`NativeTabs::run_turn`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tabs::prelude::*;
//!
//! let navigator: Arc<dyn Navigator> = Arc::new(|action: NavigationAction| {
//!     println!("navigate to {}", action.route_name);
//! });
//! let mut tabs = NativeTabs::new(&TabBarScope::root(), TabBarProps::default(), navigator)?;
//! tabs.set_triggers(vec![
//!     TriggerNode::new("index").with_child(LabelElement::new("Home")),
//!     TriggerNode::new("second"),
//! ]);
//!
//! let pass = tabs.render(&NavigationState::new("index"))?;
//! assert_eq!(pass.props.tabs.len(), 2);
//! assert_eq!(pass.props.focused().map(|t| t.title.as_str()), Some("Home"));
//! # Ok::<(), horizon_tabs::TabsError>(())
//! ```

use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use horizon_tabs_core::logging::{PassSpan, span_names, targets};
use horizon_tabs_core::{SharedTaskQueue, Signal};
use horizon_tabs_style::icon::{IconLoader, PlatformCapabilities};
use horizon_tabs_style::resolve::{ContainerStyle, OptionResolver};
use horizon_tabs_style::types::{Color, LabelStyle, PerState};
use horizon_tabs_style::validate::{
    BlurEffect, ConfigWarning, ConfigWarnings, LabelVisibilityMode, MinimizeBehavior, TabRole,
};

use crate::dispatch::{EventDispatcher, ListenerSource, TAB_PRESS};
use crate::error::{Result, TabsError};
use crate::focus::{FocusState, FocusSynchronizer, PressOutcome};
use crate::host::{HostProps, TabDescriptor};
use crate::identity::{CompositionEntry, IdentityManager};
use crate::navigation::{NavigationAction, NavigationState, Navigator};
use crate::trigger::{DynamicOverride, TabBarScope, TriggerNode};

/// Container-level props of a tab bar.
///
/// Enumerated values are raw literals; they are validated when the props
/// are applied.
#[derive(Debug, Clone)]
pub struct TabBarProps {
    pub icon_color: PerState<Color>,
    pub label_style: PerState<LabelStyle>,
    pub background_color: Option<Color>,
    pub badge_background_color: Option<Color>,
    pub badge_text_color: Option<Color>,
    pub shadow_color: Option<Color>,
    pub indicator_color: Option<Color>,
    pub blur_effect: Option<String>,
    pub label_visibility_mode: Option<String>,
    pub minimize_behavior: Option<String>,
    pub disable_transparent_on_scroll_edge: Option<bool>,
    pub capabilities: PlatformCapabilities,
    /// Listeners that receive the events of every tab.
    pub screen_listeners: Option<ListenerSource>,
}

impl Default for TabBarProps {
    fn default() -> Self {
        Self {
            icon_color: PerState::default(),
            label_style: PerState::default(),
            background_color: None,
            badge_background_color: None,
            badge_text_color: None,
            shadow_color: None,
            indicator_color: None,
            blur_effect: None,
            label_visibility_mode: None,
            minimize_behavior: None,
            disable_transparent_on_scroll_edge: None,
            capabilities: PlatformCapabilities::ios(),
            screen_listeners: None,
        }
    }
}

impl TabBarProps {
    pub fn with_icon_color(mut self, icon_color: PerState<Color>) -> Self {
        self.icon_color = icon_color;
        self
    }

    pub fn with_label_style(mut self, label_style: PerState<LabelStyle>) -> Self {
        self.label_style = label_style;
        self
    }

    pub fn with_blur_effect(mut self, literal: impl Into<String>) -> Self {
        self.blur_effect = Some(literal.into());
        self
    }

    pub fn with_label_visibility_mode(mut self, literal: impl Into<String>) -> Self {
        self.label_visibility_mode = Some(literal.into());
        self
    }

    pub fn with_minimize_behavior(mut self, literal: impl Into<String>) -> Self {
        self.minimize_behavior = Some(literal.into());
        self
    }

    pub fn with_capabilities(mut self, capabilities: PlatformCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_screen_listeners(mut self, listeners: ListenerSource) -> Self {
        self.screen_listeners = Some(listeners);
        self
    }

    /// Validate the enumerated props into a container style.
    pub fn container_style(&self, warnings: &mut ConfigWarnings) -> ContainerStyle {
        ContainerStyle {
            icon_color: self.icon_color.clone(),
            label_style: self.label_style.clone(),
            background_color: self.background_color.clone(),
            badge_background_color: self.badge_background_color.clone(),
            badge_text_color: self.badge_text_color.clone(),
            shadow_color: self.shadow_color.clone(),
            indicator_color: self.indicator_color.clone(),
            blur_effect: warnings.check::<BlurEffect>(self.blur_effect.as_deref()),
            disable_transparent_on_scroll_edge: self.disable_transparent_on_scroll_edge,
            label_visibility_mode: warnings.check::<LabelVisibilityMode>(self.label_visibility_mode.as_deref()),
            minimize_behavior: warnings.check::<MinimizeBehavior>(self.minimize_behavior.as_deref()),
        }
    }
}

/// A focus change reported by the native host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeFocusChange {
    pub tab_key: String,
    /// The host already performed the repeated-selection effect.
    pub repeated_selection_handled_by_special_effect: bool,
}

impl NativeFocusChange {
    pub fn new(tab_key: impl Into<String>, handled: bool) -> Self {
        Self {
            tab_key: tab_key.into(),
            repeated_selection_handled_by_special_effect: handled,
        }
    }
}

/// Output of [`NativeTabs::render`].
#[derive(Debug, Clone)]
pub struct RenderPass {
    pub props: HostProps,
    /// Every tab key changed; the host must be rebuilt.
    pub remount: bool,
    pub generation: u64,
    /// Vector glyphs the pass is still waiting on.
    pub pending_lookups: usize,
}

/// Output of [`NativeTabs::run_turn`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnReport {
    pub tasks: usize,
    /// Glyphs loaded for tabs that still exist.
    pub icons_loaded: usize,
    /// Another render pass would produce different props.
    pub rerender: bool,
}

/// State shared with the deferred press task.
struct PressContext {
    focus: Mutex<FocusSynchronizer>,
    dispatcher: EventDispatcher,
    navigator: Arc<dyn Navigator>,
    tab_pressed: Arc<Signal<String>>,
    scheduled: AtomicBool,
}

impl PressContext {
    /// Resolve the pending press, if any.
    fn flush(&self) {
        self.scheduled.store(false, Ordering::Release);
        let Some(press) = self.focus.lock().take_pending() else {
            return;
        };

        let payload = serde_json::json!({ "target": press.tab_key });
        self.dispatcher.dispatch(TAB_PRESS, &press.route_name, payload);
        if press.navigate {
            tracing::debug!(target: targets::FOCUS, route = %press.route_name, "navigating after press");
            self.navigator.navigate(NavigationAction::navigate(&press.route_name));
        }
        self.tab_pressed.emit(press.route_name);
    }
}

/// One native tab bar instance.
pub struct NativeTabs {
    triggers: Vec<TriggerNode>,
    resolver: OptionResolver,
    identities: IdentityManager,
    icons: IconLoader,
    warnings: ConfigWarnings,
    queue: Arc<SharedTaskQueue>,
    press: Arc<PressContext>,
    focus_changed: Arc<Signal<String>>,
    remounted: Arc<Signal<u64>>,
}

impl NativeTabs {
    /// Create a tab bar with its own task queue.
    ///
    /// Fails if `scope` is inside a tab of another tab bar.
    pub fn new(scope: &TabBarScope, props: TabBarProps, navigator: Arc<dyn Navigator>) -> Result<Self> {
        Self::with_queue(scope, props, navigator, Arc::new(SharedTaskQueue::new()))
    }

    /// Create a tab bar posting deferred work to `queue`.
    pub fn with_queue(
        scope: &TabBarScope,
        props: TabBarProps,
        navigator: Arc<dyn Navigator>,
        queue: Arc<SharedTaskQueue>,
    ) -> Result<Self> {
        scope.check_can_host_tab_bar()?;

        let mut warnings = ConfigWarnings::new();
        let resolver = OptionResolver::new(props.container_style(&mut warnings), props.capabilities.clone());

        let dispatcher = EventDispatcher::new();
        dispatcher.set_container_listeners(props.screen_listeners);

        let press = Arc::new(PressContext {
            focus: Mutex::new(FocusSynchronizer::new()),
            dispatcher,
            navigator,
            tab_pressed: Arc::new(Signal::with_queue(queue.clone())),
            scheduled: AtomicBool::new(false),
        });

        Ok(Self {
            triggers: Vec::new(),
            resolver,
            identities: IdentityManager::new(),
            icons: IconLoader::new(queue.clone()),
            warnings,
            press,
            focus_changed: Arc::new(Signal::with_queue(queue.clone())),
            remounted: Arc::new(Signal::with_queue(queue.clone())),
            queue,
        })
    }

    /// Use deterministic key suffixes. Only meaningful before the first render.
    pub fn with_identity_seed(mut self, seed: u64) -> Self {
        self.identities = IdentityManager::with_seed(seed);
        self
    }

    /// The scope for content rendered inside the tab for `route_name`.
    pub fn scope_for(&self, route_name: &str) -> TabBarScope {
        TabBarScope::inside_tab(route_name)
    }

    /// Replace the container props.
    pub fn set_props(&mut self, props: TabBarProps) {
        let container = props.container_style(&mut self.warnings);
        self.resolver = OptionResolver::new(container, props.capabilities);
        self.press.dispatcher.set_container_listeners(props.screen_listeners);
    }

    /// Replace the declared triggers.
    ///
    /// Dynamic overrides supplied by mounted screens carry over to the
    /// trigger of the same route unless the new trigger declares its own.
    pub fn set_triggers(&mut self, mut triggers: Vec<TriggerNode>) {
        for trigger in &mut triggers {
            if trigger.dynamic_override.is_none()
                && let Some(previous) = self.triggers.iter_mut().find(|t| t.route_name == trigger.route_name)
            {
                trigger.dynamic_override = previous.dynamic_override.take();
            }
        }
        self.triggers = triggers;
    }

    /// Set or clear the configuration a mounted screen supplies for its tab.
    ///
    /// Returns `false` if no trigger declares `route_name`.
    pub fn set_dynamic_override(&mut self, route_name: &str, dynamic_override: Option<DynamicOverride>) -> bool {
        match self.triggers.iter_mut().find(|t| t.route_name == route_name) {
            Some(trigger) => {
                trigger.dynamic_override = dynamic_override;
                true
            }
            None => {
                tracing::trace!(target: targets::RESOLVE, route = route_name, "override for undeclared route ignored");
                false
            }
        }
    }

    pub fn triggers(&self) -> &[TriggerNode] {
        &self.triggers
    }

    /// Run a render pass against the current navigation state.
    pub fn render(&mut self, state: &NavigationState) -> Result<RenderPass> {
        let _span = PassSpan::new(span_names::RENDER_PASS);
        self.check_unique_routes()?;

        let composition: Vec<CompositionEntry> = self.triggers.iter().map(TriggerNode::composition_entry).collect();
        let update = self.identities.compute_identities(&composition);
        if update.remount {
            self.remounted.emit(update.generation);
        }

        let (focus_changed, focused) = {
            let mut focus = self.press.focus.lock();
            focus.reconcile_pending(&composition, &update.keys);
            let changed = focus.sync_from_navigation(state, &composition).inspect_err(|err| {
                tracing::error!(target: targets::FOCUS, error = %err, "cannot focus a tab");
            })?;
            (changed, focus.focused_route().map(str::to_string))
        };
        if focus_changed && let Some(route) = &focused {
            self.focus_changed.emit(route.clone());
        }

        self.press.dispatcher.replace_tab_listeners(
            self.triggers
                .iter()
                .map(|t| (t.route_name.as_str(), t.listeners.as_ref())),
        );

        let images = self.icons.snapshot();
        let mut tabs = Vec::with_capacity(self.triggers.len());
        let mut pending_lookups = 0;
        for trigger in &self.triggers {
            let role = self.warnings.check::<TabRole>(trigger.role.as_deref());
            let resolution = self.resolver.resolve_pass(&trigger.sources(role), &images);
            for lookup in &resolution.pending {
                self.icons.request(lookup, &trigger.route_name);
                // Failed lookups are cached and never retried.
                if self.icons.is_pending(&lookup.key()) {
                    pending_lookups += 1;
                }
            }

            let Some(key) = update.keys.get(&trigger.route_name) else {
                continue;
            };
            let is_focused = focused.as_deref() == Some(trigger.route_name.as_str());
            tabs.push(TabDescriptor::assemble(key.clone(), is_focused, &resolution.options));
        }

        let container = self.resolver.container();
        Ok(RenderPass {
            props: HostProps {
                tabs,
                label_visibility_mode: container.label_visibility_mode,
                minimize_behavior: container.minimize_behavior,
            },
            remount: update.remount,
            generation: update.generation,
            pending_lookups,
        })
    }

    fn check_unique_routes(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for trigger in &self.triggers {
            if !seen.insert(trigger.route_name.as_str()) {
                tracing::error!(target: targets::IDENTITY, route = %trigger.route_name, "duplicate route");
                return Err(TabsError::DuplicateRoute {
                    route: trigger.route_name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Handle a press reported by the host.
    ///
    /// Focus moves immediately. Listener dispatch and navigation run on the
    /// next turn. Unknown keys and hidden tabs are ignored.
    pub fn on_native_focus_change(&self, change: NativeFocusChange) -> PressOutcome {
        let Some(route) = self.identities.route_for_key(&change.tab_key) else {
            tracing::trace!(target: targets::FOCUS, key = %change.tab_key, "press for unknown key ignored");
            return PressOutcome::Ignored;
        };
        if self.triggers.iter().any(|t| t.route_name == route && t.hidden) {
            tracing::trace!(target: targets::FOCUS, route, "press for hidden tab ignored");
            return PressOutcome::Ignored;
        }

        let outcome = self.press.focus.lock().on_native_press(
            route,
            &change.tab_key,
            change.repeated_selection_handled_by_special_effect,
        );
        if outcome == (PressOutcome::Queued { focus_changed: true }) {
            self.focus_changed.emit(route.to_string());
        }

        if !self.press.scheduled.swap(true, Ordering::AcqRel) {
            let press = Arc::clone(&self.press);
            self.queue.post("tab-press", move || press.flush());
        }
        outcome
    }

    /// Run one deferred turn and fold in finished icon lookups.
    pub fn run_turn(&mut self) -> TurnReport {
        let _span = PassSpan::new(span_names::TURN);
        let tasks = self.queue.run_turn();

        let mut icons_loaded = 0;
        for outcome in self.icons.drain() {
            let live = outcome
                .routes
                .iter()
                .any(|route| self.triggers.iter().any(|t| &t.route_name == route));
            if !live {
                tracing::trace!(
                    target: targets::ICON,
                    family = %outcome.key.family,
                    name = %outcome.key.name,
                    "discarding icon result for removed tab"
                );
                continue;
            }
            if outcome.found {
                icons_loaded += 1;
            }
        }

        TurnReport {
            tasks,
            icons_loaded,
            rerender: icons_loaded > 0,
        }
    }

    /// Whether deferred work is waiting for a turn.
    pub fn has_pending_work(&self) -> bool {
        self.queue.has_pending() || self.icons.pending_count() > 0
    }

    pub fn focused_route(&self) -> Option<String> {
        self.press.focus.lock().focused_route().map(str::to_string)
    }

    pub fn focus_state(&self) -> FocusState {
        self.press.focus.lock().state()
    }

    pub fn key_for(&self, route_name: &str) -> Option<&str> {
        self.identities.key_for(route_name)
    }

    /// `None` before the first render.
    pub fn generation(&self) -> Option<u64> {
        self.identities.generation()
    }

    /// Distinct configuration warnings seen so far.
    pub fn warnings(&self) -> &[ConfigWarning] {
        self.warnings.as_slice()
    }

    pub fn queue(&self) -> &Arc<SharedTaskQueue> {
        &self.queue
    }

    /// Emitted with the route after a press was dispatched.
    pub fn tab_pressed(&self) -> &Arc<Signal<String>> {
        &self.press.tab_pressed
    }

    /// Emitted with the route whenever focus moves.
    pub fn focus_changed(&self) -> &Arc<Signal<String>> {
        &self.focus_changed
    }

    /// Emitted with the new generation when the host must be rebuilt.
    pub fn remounted(&self) -> &Arc<Signal<u64>> {
        &self.remounted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_tabs_style::element::{BadgeElement, LabelElement};

    fn navigator() -> (Arc<Mutex<Vec<String>>>, Arc<dyn Navigator>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = log.clone();
        let navigator: Arc<dyn Navigator> = Arc::new(move |action: NavigationAction| {
            sink.lock().push(action.route_name);
        });
        (log, navigator)
    }

    fn two_tabs() -> (NativeTabs, Arc<Mutex<Vec<String>>>) {
        let (log, nav) = navigator();
        let mut tabs = NativeTabs::new(&TabBarScope::root(), TabBarProps::default(), nav)
            .unwrap()
            .with_identity_seed(3);
        tabs.set_triggers(vec![TriggerNode::new("index"), TriggerNode::new("second")]);
        tabs.render(&NavigationState::new("index")).unwrap();
        (tabs, log)
    }

    #[test]
    fn test_nested_tab_bar_fails() {
        let (tabs, _) = two_tabs();
        let (_, nav) = navigator();
        let nested = NativeTabs::new(&tabs.scope_for("index"), TabBarProps::default(), nav);
        assert!(matches!(nested, Err(TabsError::NestedTabBar { .. })));
    }

    #[test]
    fn test_invalid_enum_props_warn_once() {
        let (_, nav) = navigator();
        let props = TabBarProps::default().with_minimize_behavior("sometimes");
        let mut tabs = NativeTabs::new(&TabBarScope::root(), props.clone(), nav).unwrap();
        tabs.set_props(props);

        assert_eq!(tabs.warnings().len(), 1);
        assert!(tabs.warnings()[0].to_string().starts_with("Unsupported minimizeBehavior: sometimes."));
    }

    #[test]
    fn test_invalid_role_is_unset() {
        let (mut tabs, _) = two_tabs();
        tabs.set_triggers(vec![TriggerNode::new("index").with_role("Search"), TriggerNode::new("second")]);
        let pass = tabs.render(&NavigationState::new("index")).unwrap();
        tabs.render(&NavigationState::new("index")).unwrap();

        assert!(pass.props.tabs[0].role.is_none());
        assert_eq!(tabs.warnings().len(), 1);
    }

    #[test]
    fn test_duplicate_route_is_error() {
        let (mut tabs, _) = two_tabs();
        tabs.set_triggers(vec![TriggerNode::new("index"), TriggerNode::new("index")]);
        let err = tabs.render(&NavigationState::new("index")).unwrap_err();
        assert!(matches!(err, TabsError::DuplicateRoute { ref route } if route == "index"));
    }

    #[test]
    fn test_dynamic_override_survives_set_triggers() {
        let (mut tabs, _) = two_tabs();
        assert!(tabs.set_dynamic_override(
            "second",
            Some(DynamicOverride::Children(vec![BadgeElement::new("9").into()]))
        ));
        assert!(!tabs.set_dynamic_override("missing", None));

        tabs.set_triggers(vec![
            TriggerNode::new("index"),
            TriggerNode::new("second").with_child(LabelElement::new("Second")),
        ]);
        let pass = tabs.render(&NavigationState::new("index")).unwrap();
        assert_eq!(pass.props.tabs[1].title, "Second");
        assert_eq!(pass.props.tabs[1].badge_value.as_deref(), Some("9"));
    }

    #[test]
    fn test_unknown_key_ignored() {
        let (tabs, _) = two_tabs();
        let outcome = tabs.on_native_focus_change(NativeFocusChange::new("nope-0-x", false));
        assert_eq!(outcome, PressOutcome::Ignored);
        assert!(!tabs.queue().has_pending());
    }

    #[test]
    fn test_press_burst_schedules_one_flush() {
        let (mut tabs, log) = two_tabs();
        let second = tabs.key_for("second").unwrap().to_string();
        let index = tabs.key_for("index").unwrap().to_string();

        tabs.on_native_focus_change(NativeFocusChange::new(&second, false));
        tabs.on_native_focus_change(NativeFocusChange::new(&index, false));
        assert_eq!(tabs.queue().pending_count(), 1);

        let report = tabs.run_turn();
        assert_eq!(report.tasks, 1);
        assert_eq!(*log.lock(), vec!["index"]);
    }
}
