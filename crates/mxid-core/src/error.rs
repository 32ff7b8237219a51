//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types used throughout the identifier stack. All errors
//! use `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - [`ValidationError`] is the common base for every way a supplied
//!   identifier can be rejected: wrong length, broken grammar, or a check
//!   digit that does not match. Each variant names the identifier format.
//! - [`GenerationError`] covers bad generator input. It is raised before any
//!   part of an identifier is computed.
//! - [`MxidError`] wraps both for callers that drive validation and
//!   generation through one code path.

use thiserror::Error;

use crate::format::{IdentifierKind, SubCheck};

/// Top-level error type for the identifier stack.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MxidError {
    /// A supplied identifier was rejected.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Generator input was rejected.
    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),
}

/// Rejection of a supplied identifier string.
///
/// Identical input always fails identically; nothing here is retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The identifier does not have one of the format's fixed lengths.
    #[error("{kind} must be {expected} characters long, got {actual}")]
    Length {
        /// Format being validated.
        kind: IdentifierKind,
        /// Human-readable accepted length(s), e.g. `"12 or 13"`.
        expected: &'static str,
        /// Number of characters supplied.
        actual: usize,
    },

    /// A segment of the identifier violates the format grammar.
    #[error("{kind} failed the {check} check at position {position}: {detail}")]
    Structure {
        /// Format being validated.
        kind: IdentifierKind,
        /// Which sub-check rejected the input.
        check: SubCheck,
        /// Zero-based character position where the violation starts.
        position: usize,
        /// Description of the violation.
        detail: String,
    },

    /// The trailing check character does not match the recomputed one.
    #[error("{kind} check digit mismatch: expected {expected:?}, found {found:?}")]
    CheckDigit {
        /// Format being validated.
        kind: IdentifierKind,
        /// Check character recomputed from the prefix.
        expected: char,
        /// Check character present in the input.
        found: char,
    },
}

impl ValidationError {
    /// Format the error refers to.
    pub fn kind(&self) -> IdentifierKind {
        match self {
            Self::Length { kind, .. }
            | Self::Structure { kind, .. }
            | Self::CheckDigit { kind, .. } => *kind,
        }
    }

    /// Sub-check that produced the error.
    pub fn sub_check(&self) -> SubCheck {
        match self {
            Self::Length { .. } => SubCheck::Length,
            Self::Structure { check, .. } => *check,
            Self::CheckDigit { .. } => SubCheck::Checksum,
        }
    }
}

/// Rejection of generator input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A required field is absent or blank.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    /// The date value could not be read as a calendar date.
    #[error("invalid date for {field}: {value:?}")]
    InvalidDate {
        /// Name of the offending field.
        field: &'static str,
        /// Raw value supplied.
        value: String,
    },

    /// The sex code is not one of `H` or `M`.
    #[error("invalid sex code {0:?}; expected \"H\" or \"M\"")]
    InvalidSex(String),

    /// The name has no letters left after normalization, e.g. it consisted
    /// solely of excluded words.
    #[error("{0} is empty after normalization")]
    EmptyName(&'static str),

    /// A numeric component has the wrong width or contains non-digits.
    #[error("invalid {field}: expected {expected} digits, got {value:?}")]
    InvalidComponent {
        /// Name of the offending component.
        field: &'static str,
        /// Required number of digits.
        expected: usize,
        /// Raw value supplied.
        value: String,
    },
}

/// An identifier kind name that is not one of `RFC`, `CURP`, `CLABE`, `NSS`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown identifier kind: {0:?}")]
pub struct UnknownKindError(pub String);
