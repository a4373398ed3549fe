//! Core systems for Horizon Tabs.
//!
//! This crate provides the foundational pieces the tab bar engine is built on:
//!
//! - **Signal/Slot System**: type-safe notification of tab presses, focus
//!   changes and host rebuilds
//! - **Task Queue**: deferred turns; work posted now runs on the next turn
//! - **Logging**: subsystem targets, pass spans and subscriber setup
//!
//! # Deferred Signal Example
//!
//! ```
//! use std::sync::Arc;
//! use horizon_tabs_core::{ConnectionType, SharedTaskQueue, Signal};
//!
//! let queue = Arc::new(SharedTaskQueue::new());
//! let focus_changed = Signal::<String>::with_queue(queue.clone());
//!
//! focus_changed.connect_with_type(
//!     |route| println!("focused {}", route),
//!     ConnectionType::Deferred,
//! );
//!
//! focus_changed.emit("second".to_string());
//! // Nothing printed yet; the slot runs on the next turn.
//! queue.run_turn();
//! ```

mod error;
pub mod logging;
pub mod signal;
mod task;

pub use error::{CoreError, Result};
pub use logging::{PassSpan, init_logging};
pub use signal::{ConnectionId, ConnectionType, Signal};
pub use task::{SharedTaskQueue, TaskId, TaskQueue};

static_assertions::assert_impl_all!(SharedTaskQueue: Send, Sync);
static_assertions::assert_impl_all!(Signal<String>: Send, Sync);
