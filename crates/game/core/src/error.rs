//! Common error infrastructure for hexbound-core.
//!
//! Domain-specific errors (`CombatError`, `ActionError`, `UndoError`,
//! `StatusError`) live next to the component that returns them. Every one of
//! them is a plain value: a rejected operation returns an error and leaves the
//! hero, the resource pool and the combat untouched.

/// Severity level of an error, used for categorization and recovery strategies.
///
/// - **Recoverable**: the player may retry once the situation changes
///   (e.g. after gaining movement points)
/// - **Validation**: the request itself is invalid for the current state
///   (wrong combat phase, unknown enemy)
/// - **Internal**: an invariant failed; indicates a bug
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    Recoverable,
    Validation,
    Internal,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Returns true if this error is potentially recoverable.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all hexbound-core errors.
///
/// # Implementation Guidelines
///
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on recoverability, not impact
/// - `error_code` must be a stable upper-snake identifier; the presentation
///   layer keys its messages on it
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
