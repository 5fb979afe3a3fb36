//! Core RDF term and quad data model: an interning [`World`], the tagged
//! [`Node`] value it mints, and the [`Quad`]/[`Pattern`] types and
//! [`Order`] permutations the storage engine indexes by.
#![deny(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unused_qualifications
)]

mod error;
mod escape;
mod node;
mod quad;
mod world;

pub use crate::error::{validate_blank_node_identifier, BlankNodeIdParseError};
pub use crate::node::{Node, NodeKind};
pub use crate::quad::{key_of, pattern_key_of, unpermute, Order, Pattern, Position, Quad, Signature};
pub use crate::world::World;
pub use oxilangtag::LanguageTagParseError;
pub use oxiri::IriParseError;

/// `#[doc(hidden)]`, semver-exempt store plumbing for tracking a node's
/// object-position occupancy. Exported only so `quadstore`'s `Model` can
/// reach it; not re-exported from `quadstore`'s own public API.
#[doc(hidden)]
pub use crate::node::ObjectPositionRefs;
