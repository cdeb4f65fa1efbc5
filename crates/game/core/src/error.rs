//! Common error infrastructure for siege-core.
//!
//! Domain errors (`GridError`, `EncounterError`) live next to the code that
//! raises them. This module provides the shared classification so the runtime
//! can decide whether to skip a monster, log loudly, or abort.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Temporary condition; the same request may succeed on a later tick.
    ///
    /// Examples: monster still busy, monster already dead.
    Recoverable,

    /// Invalid input that should not be retried unchanged.
    ///
    /// Examples: unknown monster id, spawning onto an occupied cell.
    Validation,

    /// Broken invariant that indicates a bug.
    ///
    /// Examples: monster placed outside the grid, occupancy desync.
    Internal,

    /// State can no longer be trusted.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable)
    }

    /// Returns true if this error indicates an internal bug.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Common trait for all siege-core errors.
pub trait GameError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Stable identifier for the error variant, used in logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
