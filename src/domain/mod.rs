//! Domain layer for hooklab.
//!
//! This module contains the error vocabulary shared by every layer and the
//! to-do list model, the canonical consumer of the reducer primitives.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`todo`]: To-do list state, actions and reducer

pub mod error;
pub mod todo;

pub use error::{HookError, Result};
pub use todo::{Filter, Todo, TodoAction, TodoReducer, TodoState, TodoStats};
