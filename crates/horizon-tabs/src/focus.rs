//! Focus synchronization between navigation state and native presses.
//!
//! Focus flows both ways. The routing layer reports the current route and
//! the synchronizer maps it to a visible tab. The native host reports
//! presses, which the synchronizer turns into a pending press that is
//! resolved on the next scheduling turn: listeners are dispatched and,
//! when needed, a navigation action is issued.
//!
//! # States
//!
//! ```text
//! Idle --press--> Pressed --take_pending--> Idle
//!                   |  ^
//!                   +--+ further presses collapse into one
//! ```

use std::collections::HashMap;

use horizon_tabs_core::logging::targets;

use crate::error::{Result, TabsError};
use crate::identity::CompositionEntry;
use crate::navigation::NavigationState;

/// Whether a press is waiting for the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPhase {
    Idle,
    Pressed,
}

/// A press waiting to be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingPress {
    pub route_name: String,
    pub tab_key: String,
    /// A navigation action must be issued.
    pub navigate: bool,
}

/// Snapshot of the focus state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusState {
    pub focused_route: Option<String>,
    pub pending_press: Option<PendingPress>,
}

/// What a native press did to the focus state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PressOutcome {
    /// The press was recorded for the next turn.
    Queued { focus_changed: bool },
    /// The press was dropped.
    Ignored,
}

/// Tracks the focused tab and pending presses of one tab bar.
#[derive(Debug, Default)]
pub struct FocusSynchronizer {
    focused: Option<String>,
    pending: Option<PendingPress>,
}

impl FocusSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focused_route(&self) -> Option<&str> {
        self.focused.as_deref()
    }

    pub fn phase(&self) -> FocusPhase {
        if self.pending.is_some() {
            FocusPhase::Pressed
        } else {
            FocusPhase::Idle
        }
    }

    pub fn state(&self) -> FocusState {
        FocusState {
            focused_route: self.focused.clone(),
            pending_press: self.pending.clone(),
        }
    }

    /// The tab navigation state maps to.
    ///
    /// The tab whose route is current, or the first visible tab if that
    /// route is hidden or not declared.
    pub fn initial_focus<'a>(state: &NavigationState, tabs: &'a [CompositionEntry]) -> Result<&'a str> {
        let mut visible = tabs.iter().filter(|tab| !tab.hidden);
        if let Some(tab) = visible.clone().find(|tab| tab.route_name == state.route_name) {
            return Ok(&tab.route_name);
        }
        visible
            .next()
            .map(|tab| tab.route_name.as_str())
            .ok_or(TabsError::NoVisibleTab)
    }

    /// Re-map focus after the routing layer reported new state.
    ///
    /// While a press is pending the optimistic focus from the press is kept;
    /// the navigation it triggers has not happened yet. Returns `true` when
    /// the focused route changed.
    pub fn sync_from_navigation(&mut self, state: &NavigationState, tabs: &[CompositionEntry]) -> Result<bool> {
        let target = Self::initial_focus(state, tabs)?;

        if self.pending.is_some() {
            let still_visible = self
                .focused
                .as_deref()
                .is_some_and(|focused| tabs.iter().any(|t| t.route_name == focused && !t.hidden));
            if still_visible {
                tracing::trace!(target: targets::FOCUS, "press pending, keeping optimistic focus");
                return Ok(false);
            }
        }

        if self.focused.as_deref() == Some(target) {
            return Ok(false);
        }
        tracing::debug!(target: targets::FOCUS, from = ?self.focused, to = target, "focus synced from navigation");
        self.focused = Some(target.to_string());
        Ok(true)
    }

    /// Record a native press on `route_name`.
    ///
    /// Pressing the focused tab only requires navigation when the host did
    /// not handle the repeated selection itself. Pressing another tab moves
    /// focus and always requires navigation. Presses within one turn
    /// collapse into one for the last route; a navigation requirement from
    /// earlier presses of that same route is kept.
    pub fn on_native_press(&mut self, route_name: &str, tab_key: &str, repeated_selection_handled: bool) -> PressOutcome {
        let already_focused = self.focused.as_deref() == Some(route_name);
        let navigate = !already_focused || !repeated_selection_handled;

        if !already_focused {
            tracing::debug!(target: targets::FOCUS, from = ?self.focused, to = route_name, "focus moved by press");
            self.focused = Some(route_name.to_string());
        }

        let navigate = match &self.pending {
            Some(previous) if previous.route_name == route_name => previous.navigate || navigate,
            _ => navigate,
        };
        self.pending = Some(PendingPress {
            route_name: route_name.to_string(),
            tab_key: tab_key.to_string(),
            navigate,
        });

        PressOutcome::Queued {
            focus_changed: !already_focused,
        }
    }

    /// Resolve the pending press, returning to `Idle`.
    pub fn take_pending(&mut self) -> Option<PendingPress> {
        self.pending.take()
    }

    /// Bring a pending press in line with a new composition.
    ///
    /// A press on a tab that was removed or hidden is dropped. A press on a
    /// surviving tab takes that tab's current key, so a remount in between
    /// does not leave it naming a key the host no longer has.
    pub fn reconcile_pending(&mut self, tabs: &[CompositionEntry], keys: &HashMap<String, String>) {
        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        let visible = tabs.iter().any(|t| t.route_name == pending.route_name && !t.hidden);
        match keys.get(&pending.route_name) {
            Some(key) if visible => {
                if *key != pending.tab_key {
                    tracing::trace!(target: targets::FOCUS, route = %pending.route_name, key = %key, "pending press rekeyed");
                    pending.tab_key.clone_from(key);
                }
            }
            _ => {
                tracing::debug!(
                    target: targets::FOCUS,
                    route = %pending.route_name,
                    "dropping press for removed or hidden tab"
                );
                self.pending = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tabs(entries: &[(&str, bool)]) -> Vec<CompositionEntry> {
        entries
            .iter()
            .map(|(route, hidden)| CompositionEntry::new(*route, *hidden))
            .collect()
    }

    fn synced(route: &str, layout: &[(&str, bool)]) -> FocusSynchronizer {
        let mut focus = FocusSynchronizer::new();
        focus
            .sync_from_navigation(&NavigationState::new(route), &tabs(layout))
            .unwrap();
        focus
    }

    #[test]
    fn test_initial_focus_matches_route() {
        let focus = synced("second", &[("index", false), ("second", false)]);
        assert_eq!(focus.focused_route(), Some("second"));
        assert_eq!(focus.phase(), FocusPhase::Idle);
    }

    #[test]
    fn test_hidden_route_falls_back_to_first_visible() {
        let focus = synced("index", &[("index", true), ("second", false), ("third", false)]);
        assert_eq!(focus.focused_route(), Some("second"));
    }

    #[test]
    fn test_no_visible_tab_is_error() {
        let mut focus = FocusSynchronizer::new();
        let err = focus
            .sync_from_navigation(&NavigationState::new("index"), &tabs(&[("index", true)]))
            .unwrap_err();
        assert!(matches!(err, TabsError::NoVisibleTab));
    }

    #[test]
    fn test_press_on_focused_tab_handled_natively() {
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        let outcome = focus.on_native_press("index", "index-0-k", true);
        assert_eq!(outcome, PressOutcome::Queued { focus_changed: false });
        assert_eq!(focus.phase(), FocusPhase::Pressed);

        let press = focus.take_pending().unwrap();
        assert!(!press.navigate);
        assert_eq!(focus.phase(), FocusPhase::Idle);
    }

    #[test]
    fn test_press_on_focused_tab_not_handled_navigates() {
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        focus.on_native_press("index", "index-0-k", false);
        assert!(focus.take_pending().unwrap().navigate);
    }

    #[test]
    fn test_press_on_other_tab_moves_focus() {
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        let outcome = focus.on_native_press("second", "second-0-k", true);
        assert_eq!(outcome, PressOutcome::Queued { focus_changed: true });
        assert_eq!(focus.focused_route(), Some("second"));

        let press = focus.take_pending().unwrap();
        assert_eq!(press.route_name, "second");
        assert!(press.navigate);
    }

    #[test]
    fn test_burst_collapses_to_last_route() {
        let mut focus = synced("index", &[("index", false), ("second", false), ("third", false)]);
        focus.on_native_press("second", "second-0-k", false);
        focus.on_native_press("third", "third-0-k", false);

        let press = focus.take_pending().unwrap();
        assert_eq!(press.route_name, "third");
        assert!(focus.take_pending().is_none());
    }

    #[test]
    fn test_burst_keeps_navigation_requirement() {
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        focus.on_native_press("second", "second-0-k", true);
        // Second press lands on the now-focused tab and is handled natively.
        focus.on_native_press("second", "second-0-k", true);

        assert!(focus.take_pending().unwrap().navigate);
    }

    #[test]
    fn test_stale_navigation_does_not_undo_pending_press() {
        let layout = [("index", false), ("second", false)];
        let mut focus = synced("index", &layout);
        focus.on_native_press("second", "second-0-k", false);

        let changed = focus
            .sync_from_navigation(&NavigationState::new("index"), &tabs(&layout))
            .unwrap();
        assert!(!changed);
        assert_eq!(focus.focused_route(), Some("second"));
    }

    #[test]
    fn test_reconcile_drops_press_on_hidden_tab() {
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        focus.on_native_press("second", "second-0-k", false);

        let layout = tabs(&[("index", false), ("second", true)]);
        let keys = HashMap::from([
            ("index".to_string(), "index-1-k".to_string()),
            ("second".to_string(), "second-1-k".to_string()),
        ]);
        focus.reconcile_pending(&layout, &keys);
        assert_eq!(focus.phase(), FocusPhase::Idle);

        let changed = focus
            .sync_from_navigation(&NavigationState::new("index"), &layout)
            .unwrap();
        assert!(changed);
        assert_eq!(focus.focused_route(), Some("index"));
    }

    #[test]
    fn test_reconcile_rekeys_press_after_remount() {
        let layout = tabs(&[("index", false), ("second", false)]);
        let mut focus = synced("index", &[("index", false), ("second", false)]);
        focus.on_native_press("second", "second-0-k", false);

        let keys = HashMap::from([
            ("index".to_string(), "index-1-k".to_string()),
            ("second".to_string(), "second-1-k".to_string()),
        ]);
        focus.reconcile_pending(&layout, &keys);

        let press = focus.take_pending().unwrap();
        assert_eq!(press.tab_key, "second-1-k");
        assert!(press.navigate);
    }
}
