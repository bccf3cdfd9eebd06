//! Tracing initialization and subscriber setup.
//!
//! This module configures the tracing subscriber, routing `tracing` macros
//! either to stderr or to a rotating JSON-lines trace file.

use super::file_writer::FileWriter;
use crate::Config;
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes the global tracing subscriber.
///
/// # Parameters
///
/// * `config` - Configuration carrying `trace_level` and `trace_file`
///
/// # Trace Level Resolution
///
/// Level is determined by:
/// 1. `RUST_LOG` environment variable
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # Output
///
/// With `trace_file` set, events are written as JSON lines through a
/// [`FileWriter`] (10 MB rotation, 3 backups). Otherwise a compact human
/// readable format goes to stderr.
///
/// # Initialization Behavior
///
/// - Creates the trace file's directory if it doesn't exist
/// - Silently falls back to stderr if directory creation fails (observability is optional)
/// - Idempotent: Safe to call multiple times (only first call takes effect)
///
/// # Example
///
/// ```rust
/// use picklist::observability::init_tracing;
/// use picklist::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let writer = config.trace_file.as_ref().and_then(|path| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).ok()?;
        }
        Some(Arc::new(FileWriter::new(path.clone())))
    });

    let result = match writer {
        Some(writer) => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer))
            .try_init(),
        None => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };

    if result.is_ok() {
        tracing::debug!(level, "tracing initialized");
    }
}
