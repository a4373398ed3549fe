//! Signal/slot system for Horizon Tabs.
//!
//! Signals notify observers (slots) when tab bar state changes: a tab was
//! pressed, focus moved, the host was rebuilt. Slots are closures connected
//! to a signal and invoked on every emission.
//!
//! # Connection Types
//!
//! - **Direct**: the slot runs inside `emit`.
//! - **Deferred**: the slot is posted to the signal's [`SharedTaskQueue`] and
//!   runs on the next turn. A signal without a queue runs deferred slots
//!   immediately and logs a warning.
//!
//! # Example
//!
//! ```
//! use horizon_tabs_core::Signal;
//!
//! let tab_pressed = Signal::<String>::new();
//!
//! let conn_id = tab_pressed.connect(|route| {
//!     println!("pressed: {}", route);
//! });
//!
//! tab_pressed.emit("index".to_string());
//! tab_pressed.disconnect(conn_id);
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::task::SharedTaskQueue;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

/// Specifies how a connected slot is invoked when the signal is emitted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConnectionType {
    /// Invoke the slot immediately inside `emit`.
    #[default]
    Direct,

    /// Post the slot invocation to the signal's task queue.
    ///
    /// The slot runs when the owner of the queue runs its next turn.
    Deferred,
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// Internal storage for a single connection.
struct Connection<Args> {
    slot: Slot<Args>,
    connection_type: ConnectionType,
}

/// A type-safe signal that can have multiple connected slots.
///
/// `Args` is the argument type passed to connected slots. Use `()` for
/// signals with no arguments.
pub struct Signal<Args> {
    /// All active connections.
    connections: Mutex<SlotMap<ConnectionId, Connection<Args>>>,
    /// Queue receiving deferred invocations.
    queue: Option<Arc<SharedTaskQueue>>,
}

impl<Args: Clone + Send + Sync + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Clone + Send + Sync + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            queue: None,
        }
    }

    /// Create a signal whose deferred connections post to `queue`.
    pub fn with_queue(queue: Arc<SharedTaskQueue>) -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            queue: Some(queue),
        }
    }

    /// Connect a slot (closure) to this signal with [`ConnectionType::Direct`].
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connect_with_type(slot, ConnectionType::Direct)
    }

    /// Connect a slot with a specific connection type.
    pub fn connect_with_type<F>(&self, slot: F, connection_type: ConnectionType) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        let connection = Connection {
            slot: Arc::new(slot),
            connection_type,
        };
        self.connections.lock().insert(connection)
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Slots are collected first and invoked with the connection lock
    /// released, so a slot may connect or disconnect on this same signal.
    #[tracing::instrument(skip_all, target = "horizon_tabs_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<(Slot<Args>, ConnectionType)> = self
            .connections
            .lock()
            .values()
            .map(|conn| (conn.slot.clone(), conn.connection_type))
            .collect();
        tracing::trace!(target: "horizon_tabs_core::signal", connection_count = slots.len(), "emitting signal");

        for (slot, connection_type) in slots {
            match connection_type {
                ConnectionType::Direct => slot(&args),
                ConnectionType::Deferred => self.defer(slot, args.clone()),
            }
        }
    }

    fn defer(&self, slot: Slot<Args>, args: Args) {
        match &self.queue {
            Some(queue) => {
                queue.post("signal", move || slot(&args));
            }
            None => {
                tracing::warn!(
                    target: "horizon_tabs_core::signal",
                    "No task queue attached for deferred slot, executing immediately"
                );
                slot(&args);
            }
        }
    }
}
