//! An in-memory, multi-index RDF quad store.
//!
//! [`Model`] coordinates a configurable subset of [`Order`](quadstore_model::Order)
//! permutations over a shared [`World`](quadstore_model::World) of interned
//! terms; [`Model::find`] plans the cheapest available index for a
//! [`Pattern`](quadstore_model::Pattern) and streams matches through a
//! [`QuadIter`]. The `io` module adds a thin N-Quads/N-Triples reader and
//! writer on top, for callers that want to get quads in and out of a
//! `Model` without building their own term parser.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod index;
mod iter;
pub mod io;
mod model;
mod planner;

pub mod error;

pub use crate::iter::QuadIter;
pub use crate::model::{IndexSet, Model};
pub use quadstore_model::{
    key_of, pattern_key_of, unpermute, BlankNodeIdParseError, IriParseError,
    LanguageTagParseError, Node, NodeKind, Order, Pattern, Position, Quad, Signature, World,
};
