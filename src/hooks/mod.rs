//! Reusable state primitives.
//!
//! Each primitive is a plain Rust value owned by its caller. Anything that
//! needs the outside world (a clock, durable storage) receives it as an
//! injected capability, so every primitive can be driven deterministically
//! in tests.
//!
//! # Modules
//!
//! - [`debounce`]: Values that settle after a quiet period ([`Debounced`])
//! - [`persisted`]: State mirrored to a storage backend ([`PersistedCell`])
//! - [`reducer`]: Pure reducers and the [`Store`] that applies them
//! - [`listener`]: Named events with swappable handlers ([`EventTarget`])
//! - [`toggle`]: Boolean on/off state ([`Toggle`])
//! - [`context`]: [`HookContext`], the configured factory for the above

pub mod context;
pub mod debounce;
pub mod listener;
pub mod persisted;
pub mod reducer;
pub mod toggle;

pub use context::HookContext;
pub use debounce::Debounced;
pub use listener::{EventTarget, Listener};
pub use persisted::PersistedCell;
pub use reducer::{Reducer, Store};
pub use toggle::Toggle;
