//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! other layers can stay focused on orchestration and event plumbing.

pub mod errors;
pub mod presenter;

pub use errors::{Result, RuntimeError};
pub use presenter::Presenter;
