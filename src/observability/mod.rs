//! Structured logging with optional file-based trace export.
//!
//! Engine operations emit `tracing` spans and events; this module installs the
//! subscriber that collects them.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer (JSON) → FileWriter → rotating trace file
//!                                   └──── (no trace_file) ───→ stderr
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: JSON lines written to `Config::trace_file`
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Tracing initialization and subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::{FileWriter, MAX_BACKUP_FILES, MAX_FILE_SIZE_BYTES};
pub use init::init_tracing;
