//! Infrastructure layer for filesystem and environment interactions.
//!
//! Resolves where durable data and log files live on the host.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
