//! Logging facilities for Horizon Tabs.
//!
//! Everything in the workspace logs through the `tracing` crate. Each
//! subsystem uses one of the [`targets`] so output can be filtered per
//! concern:
//!
//! ```ignore
//! use horizon_tabs_core::logging::init_logging;
//!
//! fn main() {
//!     init_logging(Some("horizon_tabs::focus=debug,horizon_tabs::icon=trace"))
//!         .expect("no subscriber installed yet");
//! }
//! ```
//!
//! Level policy: structural errors at `error`, configuration warnings at
//! `warn`, remounts and focus switches at `debug`, silent fallbacks at
//! `trace`.

use tracing_subscriber::EnvFilter;

use crate::error::{CoreError, Result};

/// Span names used for render passes and scheduling turns.
pub mod span_names {
    /// A full render pass over the tab set.
    pub const RENDER_PASS: &str = "horizon_tabs::render_pass";
    /// One deferred scheduling turn.
    pub const TURN: &str = "horizon_tabs::turn";
}

/// Target names for log filtering.
pub mod targets {
    /// Core systems target.
    pub const CORE: &str = "horizon_tabs_core";
    /// Option resolution.
    pub const RESOLVE: &str = "horizon_tabs::resolve";
    /// Tab identity and remount decisions.
    pub const IDENTITY: &str = "horizon_tabs::identity";
    /// Focus synchronization.
    pub const FOCUS: &str = "horizon_tabs::focus";
    /// Listener dispatch.
    pub const DISPATCH: &str = "horizon_tabs::dispatch";
    /// Icon selection and vector icon lookups.
    pub const ICON: &str = "horizon_tabs::icon";
    /// Settings loading and enum validation.
    pub const CONFIG: &str = "horizon_tabs::config";
    /// Deferred task queue.
    pub const TASK: &str = "horizon_tabs::task";
}

/// Filter used when neither a directive nor `RUST_LOG` is supplied.
const DEFAULT_DIRECTIVE: &str = "horizon_tabs=info,horizon_tabs_core=warn";

/// Install a global `fmt` subscriber.
///
/// `directive` takes precedence; otherwise `RUST_LOG` is honored, and
/// failing both a quiet default is used. Fails if a global subscriber is
/// already set or the directive does not parse.
pub fn init_logging(directive: Option<&str>) -> Result<()> {
    let filter = match directive {
        Some(directive) => EnvFilter::try_new(directive)
            .map_err(|e| CoreError::logging(format!("invalid filter '{directive}': {e}")))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .map_err(|e| CoreError::logging(e.to_string()))
}

/// A span guard for measuring a render pass or turn.
///
/// The span stays entered until the guard is dropped.
///
/// # Example
///
/// ```
/// use horizon_tabs_core::logging::{PassSpan, span_names};
///
/// {
///     let _span = PassSpan::new(span_names::RENDER_PASS);
///     // resolution work
/// }
/// ```
pub struct PassSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PassSpan {
    /// Create and enter a new pass span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_tabs::perf", "pass", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_span() {
        let _span = PassSpan::new("test_operation");
    }

    #[test]
    fn test_invalid_directive_rejected() {
        let err = init_logging(Some("horizon_tabs=notalevel")).unwrap_err();
        assert!(matches!(err, CoreError::Logging { .. }));
    }
}
