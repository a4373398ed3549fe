//! Listener dispatch for tab events.
//!
//! Two kinds of listeners receive tab events: container listeners, which see
//! the events of every tab, and per-tab listeners, which only see the events
//! of their own tab. Either can be a fixed map or a function of the route
//! that builds the map when an event is dispatched.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use horizon_tabs::dispatch::{EventDispatcher, ListenerSource, TAB_PRESS};
//!
//! let presses = Arc::new(AtomicUsize::new(0));
//! let counter = presses.clone();
//!
//! let dispatcher = EventDispatcher::new();
//! dispatcher.set_tab_listeners(
//!     "index",
//!     ListenerSource::single(TAB_PRESS, move |_| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     }),
//! );
//!
//! assert_eq!(dispatcher.dispatch(TAB_PRESS, "index", serde_json::Value::Null), 1);
//! assert_eq!(dispatcher.dispatch(TAB_PRESS, "second", serde_json::Value::Null), 0);
//! assert_eq!(presses.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use horizon_tabs_core::logging::targets;
use parking_lot::RwLock;

/// Event fired when a tab item is pressed.
pub const TAB_PRESS: &str = "tabPress";

/// An event delivered to listeners.
#[derive(Debug, Clone, PartialEq)]
pub struct TabEvent {
    pub name: String,
    pub route_name: String,
    pub payload: serde_json::Value,
}

/// A listener callback.
pub type Listener = Arc<dyn Fn(&TabEvent) + Send + Sync>;

/// Listeners keyed by event name.
pub type ListenerMap = HashMap<String, Listener>;

type ListenerFactory = Arc<dyn Fn(&str) -> ListenerMap + Send + Sync>;

/// Where a set of listeners comes from.
#[derive(Clone)]
pub enum ListenerSource {
    /// A fixed map.
    Static(ListenerMap),
    /// A map built from the route when an event is dispatched.
    Dynamic(ListenerFactory),
}

impl ListenerSource {
    /// A static source with one listener.
    pub fn single<F>(event_name: &str, listener: F) -> Self
    where
        F: Fn(&TabEvent) + Send + Sync + 'static,
    {
        let mut map = ListenerMap::new();
        map.insert(event_name.to_string(), Arc::new(listener) as Listener);
        Self::Static(map)
    }

    /// A source evaluated per route.
    pub fn dynamic<F>(factory: F) -> Self
    where
        F: Fn(&str) -> ListenerMap + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(factory))
    }

    /// The listener registered for `event_name`, evaluated for `route_name`.
    fn lookup(&self, event_name: &str, route_name: &str) -> Option<Listener> {
        match self {
            Self::Static(map) => map.get(event_name).cloned(),
            Self::Dynamic(factory) => factory(route_name).remove(event_name),
        }
    }
}

impl fmt::Debug for ListenerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(map) => {
                let mut names: Vec<&String> = map.keys().collect();
                names.sort();
                f.debug_tuple("Static").field(&names).finish()
            }
            Self::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

/// Container and per-tab listener sources.
#[derive(Debug, Clone, Default)]
pub struct ListenerRegistry {
    container: Option<ListenerSource>,
    tabs: HashMap<String, ListenerSource>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_container(&mut self, source: Option<ListenerSource>) {
        self.container = source;
    }

    pub fn set_tab(&mut self, route_name: impl Into<String>, source: Option<ListenerSource>) {
        let route_name = route_name.into();
        match source {
            Some(source) => {
                self.tabs.insert(route_name, source);
            }
            None => {
                self.tabs.remove(&route_name);
            }
        }
    }

    /// Drop per-tab sources whose route is not in `routes`.
    pub fn retain_tabs<'a>(&mut self, routes: impl IntoIterator<Item = &'a str>) {
        let keep: Vec<&str> = routes.into_iter().collect();
        self.tabs.retain(|route, _| keep.contains(&route.as_str()));
    }

    /// Listeners that should receive `event_name` for `route_name`.
    fn collect(&self, event_name: &str, route_name: &str) -> Vec<Listener> {
        let container = self
            .container
            .as_ref()
            .and_then(|source| source.lookup(event_name, route_name));
        let tab = self
            .tabs
            .get(route_name)
            .and_then(|source| source.lookup(event_name, route_name));
        container.into_iter().chain(tab).collect()
    }
}

/// Fans tab events out to registered listeners.
#[derive(Debug, Default)]
pub struct EventDispatcher {
    registry: RwLock<ListenerRegistry>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_container_listeners(&self, source: Option<ListenerSource>) {
        self.registry.write().set_container(source);
    }

    pub fn set_tab_listeners(&self, route_name: &str, source: ListenerSource) {
        self.registry.write().set_tab(route_name, Some(source));
    }

    /// Replace every per-tab source at once.
    pub fn replace_tab_listeners<'a>(
        &self,
        sources: impl IntoIterator<Item = (&'a str, Option<&'a ListenerSource>)>,
    ) {
        let mut registry = self.registry.write();
        let mut routes = Vec::new();
        for (route, source) in sources {
            registry.set_tab(route, source.cloned());
            routes.push(route);
        }
        registry.retain_tabs(routes);
    }

    /// Deliver an event to the container listener and the listener of
    /// `route_name` only.
    ///
    /// Listeners run with the registry unlocked. Returns the number of
    /// listeners invoked; zero is not an error.
    pub fn dispatch(&self, event_name: &str, route_name: &str, payload: serde_json::Value) -> usize {
        let listeners = self.registry.read().collect(event_name, route_name);
        if listeners.is_empty() {
            tracing::trace!(target: targets::DISPATCH, event = event_name, route = route_name, "no listeners");
            return 0;
        }

        let event = TabEvent {
            name: event_name.to_string(),
            route_name: route_name.to_string(),
            payload,
        };
        for listener in &listeners {
            listener(&event);
        }
        tracing::trace!(
            target: targets::DISPATCH,
            event = event_name,
            route = route_name,
            invoked = listeners.len(),
            "dispatched"
        );
        listeners.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> ListenerSource) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_clone = log.clone();
        let make = move |tag: &str| {
            let log = log_clone.clone();
            let tag = tag.to_string();
            ListenerSource::single(TAB_PRESS, move |event| {
                log.lock().push(format!("{tag}:{}", event.route_name));
            })
        };
        (log, make)
    }

    #[test]
    fn test_container_and_tab_listeners_both_fire() {
        let (log, make) = recorder();
        let dispatcher = EventDispatcher::new();
        dispatcher.set_container_listeners(Some(make("container")));
        dispatcher.set_tab_listeners("index", make("index"));
        dispatcher.set_tab_listeners("second", make("second"));

        assert_eq!(dispatcher.dispatch(TAB_PRESS, "second", serde_json::Value::Null), 2);

        let mut entries = log.lock().clone();
        entries.sort();
        assert_eq!(entries, vec!["container:second", "second:second"]);
    }

    #[test]
    fn test_unmatched_event_is_noop() {
        let (log, make) = recorder();
        let dispatcher = EventDispatcher::new();
        dispatcher.set_tab_listeners("index", make("index"));

        assert_eq!(dispatcher.dispatch("focus", "index", serde_json::Value::Null), 0);
        assert_eq!(dispatcher.dispatch(TAB_PRESS, "unknown", serde_json::Value::Null), 0);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_dynamic_container_listeners_see_route() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = seen.clone();
        let dispatcher = EventDispatcher::new();
        dispatcher.set_container_listeners(Some(ListenerSource::dynamic(move |route| {
            seen_clone.lock().push(route.to_string());
            ListenerMap::new()
        })));

        dispatcher.dispatch(TAB_PRESS, "second", serde_json::Value::Null);
        dispatcher.dispatch(TAB_PRESS, "index", serde_json::Value::Null);
        assert_eq!(*seen.lock(), vec!["second", "index"]);
    }

    #[test]
    fn test_replace_tab_listeners_drops_removed_routes() {
        let (log, make) = recorder();
        let dispatcher = EventDispatcher::new();
        dispatcher.set_tab_listeners("old", make("old"));

        let index = make("index");
        dispatcher.replace_tab_listeners([("index", Some(&index))]);

        assert_eq!(dispatcher.dispatch(TAB_PRESS, "old", serde_json::Value::Null), 0);
        assert_eq!(dispatcher.dispatch(TAB_PRESS, "index", serde_json::Value::Null), 1);
        assert_eq!(*log.lock(), vec!["index:index"]);
    }
}
