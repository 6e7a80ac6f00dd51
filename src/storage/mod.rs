//! Durable key-value storage for persisted cells.
//!
//! This module provides the storage abstraction behind
//! [`PersistedCell`](crate::hooks::PersistedCell). Backends store opaque
//! serialized text by string key; JSON encoding happens in the cell.
//!
//! # Modules
//!
//! - `backend`: [`StorageBackend`] trait and the shared handle type
//! - `memory`: In-process map backend
//! - `json`: JSON file backend with atomic writes

pub mod backend;
pub mod json;
pub mod memory;

pub use backend::{share, SharedStorage, StorageBackend};
pub use json::JsonFileStorage;
pub use memory::MemoryStorage;
