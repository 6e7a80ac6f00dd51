//! File-based structured logging.
//!
//! Every layer of the crate emits `tracing` events and spans (scheduling,
//! settlements, storage reads and writes). This module wires them to a log file
//! when the host asks for it.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → tracing-subscriber (EnvFilter + fmt layer) → RotatingFileWriter → log file
//! ```
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Unset: no subscriber is installed
//!
//! The log file defaults to `<data dir>/hooklab.log`, rotates at 10 MB and
//! keeps 3 backups.
//!
//! # Usage
//!
//! ```rust
//! use hooklab::observability::init_tracing;
//! use hooklab::Config;
//!
//! let config = Config::default();
//! assert!(init_tracing(&config).is_none()); // tracing is opt-in
//! ```
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file sink implementing `MakeWriter`

mod file_writer;
mod init;

pub use file_writer::RotatingFileWriter;
pub use init::init_tracing;
