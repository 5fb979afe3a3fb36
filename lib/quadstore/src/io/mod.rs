//! A minimal reader/writer for the two line-oriented RDF textual syntaxes,
//! N-Quads and N-Triples. Richer syntaxes (Turtle, TriG, RDF/XML, JSON-LD)
//! are external-collaborator territory this crate does not re-derive; see
//! the teacher's `oxttl`/`oxrdfio` crates for those.

mod format;
mod reader;
mod writer;

pub use crate::io::format::RdfFormat;
pub use crate::io::reader::{parse_term, QuadReader, QuadReaderIter};
pub use crate::io::writer::QuadWriter;
