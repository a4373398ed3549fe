//! Boundary to the routing layer.
//!
//! The routing stack is external. It tells the tab bar which route is
//! current through [`NavigationState`] and receives [`NavigationAction`]s
//! through a [`Navigator`].

/// The routing layer's view of where the user is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationState {
    pub route_name: String,
}

impl NavigationState {
    pub fn new(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
        }
    }
}

/// A request to show a tab's route.
///
/// Targeting the route that is already shown is valid; hosts without native
/// repeated-selection handling rely on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAction {
    pub route_name: String,
}

impl NavigationAction {
    pub fn navigate(route_name: impl Into<String>) -> Self {
        Self {
            route_name: route_name.into(),
        }
    }
}

/// Receives navigation actions issued by the tab bar.
pub trait Navigator: Send + Sync {
    fn navigate(&self, action: NavigationAction);
}

impl<F> Navigator for F
where
    F: Fn(NavigationAction) + Send + Sync,
{
    fn navigate(&self, action: NavigationAction) {
        self(action)
    }
}
