//! Domain-level error type used across the session engine.
//!
//! These errors are never fatal: the phase controller maps every variant to
//! a user-facing clarifying message and leaves the session untouched.

use thiserror::Error;

/// Validation kinds raised by session mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationKind {
    /// A name already registered (case- and diacritic-insensitive).
    DuplicateName,
    /// Attempt to start the game below the configured minimum player count.
    InsufficientPlayers,
    /// A vote targeting a name that is not on the roster.
    UnknownVoteTarget,
    /// A clue shorter than the configured minimum length.
    ClueTooShort,
    /// An operation invoked while the session is in the wrong phase.
    PhaseMismatch,
    /// Configuration that cannot support a game (e.g. empty topic pool).
    InvalidConfig,
    Other(String),
}

/// Central domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Input/user validation or business rule violation.
    #[error("validation error {kind:?}: {detail}")]
    Validation { kind: ValidationKind, detail: String },
}

impl DomainError {
    pub fn validation(kind: ValidationKind, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind,
            detail: detail.into(),
        }
    }

    pub fn validation_other(code: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            kind: ValidationKind::Other(code.into()),
            detail: detail.into(),
        }
    }

    /// The validation kind, for callers that branch on the failure class.
    pub fn kind(&self) -> &ValidationKind {
        match self {
            DomainError::Validation { kind, .. } => kind,
        }
    }
}
