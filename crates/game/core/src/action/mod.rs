//! Reversible out-of-combat actions.
//!
//! Each action is an [`ActionTransition`] driven through pre-validation,
//! application and post-validation by the [`ActionManager`], which owns the
//! checkpoint history used for undo.
mod checkpoint;
mod error;
mod kind;
mod kinds;
mod manager;
mod transition;

pub use checkpoint::ActionCheckpoint;
pub use error::{ActionError, UndoError};
pub use kind::ActionKind;
pub use kinds::{Explore, MoveHero, PlayCard, TakeMana};
pub use manager::{ActionManager, ActionResult};
pub use transition::{ActionTransition, TransitionPhase, TransitionPhaseError};
