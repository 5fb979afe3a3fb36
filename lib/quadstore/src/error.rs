//! Error types for the parts of this crate that can actually fail: parsing
//! textual RDF and resolving base IRIs. The core `Model`/`Index`/`Planner`
//! machinery has no fallible operations beyond the in-band `bool` returns of
//! `add`/`remove`.

use std::io;

/// An error encountered while parsing a line-oriented RDF document.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
    #[error("line {line}: invalid IRI: {0}", line = .1)]
    Iri(#[source] oxiri::IriParseError, usize),
    #[error("line {line}: invalid language tag: {0}", line = .1)]
    LanguageTag(#[source] quadstore_model::LanguageTagParseError, usize),
    #[error("line {line}: invalid blank node identifier: {0}", line = .1)]
    BlankNodeId(#[source] quadstore_model::BlankNodeIdParseError, usize),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// An error constructing the base IRI a reader resolves relative references
/// against.
#[derive(Debug, thiserror::Error)]
#[error("invalid base IRI: {0}")]
pub struct BaseIriError(#[from] pub(crate) oxiri::IriParseError);
