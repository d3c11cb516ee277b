//! Error taxonomy (§7).
//!
//! `PatternUnsatisfiable` and a freed facade/store being reused are not errors in this
//! crate: they are absorbed locally (empty match, `false` contains, zero count, lazy
//! rebuild) and never surface as an `Err`. `InputShapeMismatch` has no runtime variant
//! here either — `add_all`'s contract is enforced at compile time by its `IntoIterator`
//! bound, following the rest of this crate's preference for pushing shape checks into the
//! type system rather than a `Result`.

use oxiri::IriParseError;
use std::error::Error;

/// Failures a [`crate::factory::TermFactory`] can surface while producing a term.
#[derive(Debug, thiserror::Error)]
pub enum TermFactoryError {
    #[error(transparent)]
    InvalidIri(#[from] IriParseError),
    #[error(transparent)]
    InvalidLanguageTag(#[from] oxilangtag::LanguageTagParseError),
    /// A term was well-formed but not a valid fit for the quad position it was assembled
    /// into (e.g. a literal where a subject or graph name is required).
    #[error("{0}")]
    InvalidTermPosition(&'static str),
}

/// A decoded identifier was not present in the interner that is supposed to own it.
///
/// Should not occur on well-formed input; structural invariants are checked with
/// `debug_assert!` during development, and this error is the release-mode fallback so a
/// corrupted state surfaces as a `Result` rather than a panic.
#[derive(Debug, Clone, Copy, Eq, PartialEq, thiserror::Error)]
#[error("identifier {0} is not known to this interner")]
pub struct StaleIdentifierError(pub u32);

/// An error encountered while consuming an input stream of quads (§4.5, §6).
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// A quad in the stream could not be built, e.g. an invalid IRI.
    #[error("malformed quad in input stream: {0}")]
    MalformedQuad(#[source] TermFactoryError),
    /// Any other failure originating from the stream source itself.
    #[error(transparent)]
    Other(#[from] Box<dyn Error + Send + Sync + 'static>),
}

impl From<TermFactoryError> for StreamError {
    fn from(error: TermFactoryError) -> Self {
        Self::MalformedQuad(error)
    }
}
