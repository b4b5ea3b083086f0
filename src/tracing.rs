//! Tracing setup and state diffing for diagnostics
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=penmate::update=debug` - module-level filtering
//! - `RUST_LOG=penmate::orchestrator=info,penmate::overlay=trace`
//!
//! # Log Files
//!
//! Logs are written to `~/.config/penmate/logs/penmate.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::dom::Dom;
use crate::overlay::WidgetKind;
use crate::session::Session;

/// Initialize tracing subscriber with console and file logging
///
/// Console output respects RUST_LOG and defaults to `warn`.
/// File logging writes to `~/.config/penmate/logs/penmate.log` with daily rotation.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    // File layer - always debug level for troubleshooting
    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "penmate.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    // A second init (tests, embedding hosts) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

/// Lightweight snapshot of session state for diffing around an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub current: Option<u64>,
    pub surfaces: usize,
    pub widgets: Vec<WidgetKind>,
    pub snapshot_pending: bool,
    pub in_flight: usize,
}

impl SessionSnapshot {
    pub fn from_session<D: Dom>(session: &Session<D>) -> Self {
        Self {
            current: session.current_surface_id().map(|id| id.0),
            surfaces: session.registry.len(),
            widgets: session.layer.widgets().map(|w| w.kind).collect(),
            snapshot_pending: session.snapshot.is_pending(),
            in_flight: session.pending_requests().count(),
        }
    }

    /// Describe what changed between two snapshots
    pub fn diff(&self, other: &SessionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.current != other.current {
            changes.push(format!("current: {:?} → {:?}", self.current, other.current));
        }
        if self.surfaces != other.surfaces {
            changes.push(format!("surfaces: {} → {}", self.surfaces, other.surfaces));
        }
        for kind in WidgetKind::ALL {
            match (self.widgets.contains(&kind), other.widgets.contains(&kind)) {
                (false, true) => changes.push(format!("+{}", kind.class())),
                (true, false) => changes.push(format!("-{}", kind.class())),
                _ => {}
            }
        }
        if self.snapshot_pending != other.snapshot_pending {
            changes.push(format!(
                "snapshot: {}",
                if other.snapshot_pending { "saved" } else { "cleared" }
            ));
        }
        if self.in_flight != other.in_flight {
            changes.push(format!("in flight: {} → {}", self.in_flight, other.in_flight));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join(", "))
        }
    }
}
