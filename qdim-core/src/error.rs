//! Error types for qdim-core.

use thiserror::Error;

/// Result type for qdim-core operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when defining units or operating on quantities.
///
/// The variants fall into three families:
///
/// * configuration errors raised at unit-definition time
///   ([`Error::InvalidUnitSpec`], [`Error::InvalidDerivation`],
///   [`Error::DuplicateKind`], [`Error::DuplicateUnit`]) — these indicate a
///   broken unit table and are effectively fatal at startup;
/// * dimension errors raised at the call site of an unsafe operation
///   ([`Error::DimensionMismatch`], [`Error::RoleMismatch`],
///   [`Error::MalformedSignature`]) — the
///   caller can recover by choosing another unit or kind;
/// * registry misses ([`Error::UnknownUnit`], [`Error::UnknownKind`]) —
///   typically surfaced to an end user as "unrecognized unit".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A unit specification was missing a required field or carried an
    /// unusable conversion factor.
    #[error("invalid unit spec: {0}")]
    InvalidUnitSpec(String),

    /// A unit derivation started from a base the composition rules do not
    /// support (e.g. deriving an offset unit from a non-identity scale).
    #[error("invalid derivation base: {0}")]
    InvalidDerivation(String),

    /// A kind with the same tag or dimension vector is already registered.
    #[error("duplicate kind: {0}")]
    DuplicateKind(String),

    /// A unit with the same abbreviation is already registered on the kind.
    #[error("duplicate unit '{abbrev}' on kind '{kind}'")]
    DuplicateUnit {
        /// Tag of the kind the unit was added to.
        kind: String,
        /// Conflicting abbreviation.
        abbrev: String,
    },

    /// Two dimension vectors that had to be equal were not.
    ///
    /// Both textual signatures are carried for diagnostics.
    #[error("dimension mismatch: expected '{expected}', found '{found}'")]
    DimensionMismatch {
        /// Signature the operation required.
        expected: String,
        /// Signature actually present.
        found: String,
    },

    /// A quantity constructor or cast was given a kind of the wrong abs/rel
    /// role (e.g. an absolute reading built on a difference kind).
    #[error("kind '{kind}' is {found}, operation requires {expected}")]
    RoleMismatch {
        /// Tag of the offending kind.
        kind: String,
        /// Role the operation required ("absolute" or "relative").
        expected: &'static str,
        /// Role the kind actually has.
        found: &'static str,
    },

    /// An SI signature string did not match the accepted grammar.
    #[error("malformed SI signature '{input}': {reason}")]
    MalformedSignature {
        /// The rejected input.
        input: String,
        /// What the parser objected to.
        reason: String,
    },

    /// No unit with the given abbreviation is registered for the kind.
    #[error("unit not found: no '{abbrev}' registered for kind '{kind}'")]
    UnknownUnit {
        /// Tag of the kind that was searched.
        kind: String,
        /// Abbreviation that missed.
        abbrev: String,
    },

    /// No kind with the given tag is registered.
    #[error("unknown kind: '{0}'")]
    UnknownKind(String),

    /// Two containers that had to share a shape did not.
    #[error("shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch {
        /// Shape the operation required.
        expected: String,
        /// Shape actually present.
        found: String,
    },
}
