//! A minimal N-Quads/N-Triples writer.

use crate::io::format::RdfFormat;
use quadstore_model::Quad;
use std::io::{self, Write};

/// Serializes quads to a [`Write`] sink as N-Quads or N-Triples.
///
/// For [`RdfFormat::NTriples`] the graph position is dropped rather than
/// rejected — callers writing a default-graph-only subset typically get
/// there by iterating a graph-collapsing pattern (see
/// [`Model::find`](crate::Model::find)) and this writer just renders
/// whatever graph-less `(S, P, O)` it is handed.
pub struct QuadWriter<W> {
    writer: W,
    format: RdfFormat,
}

impl<W: Write> QuadWriter<W> {
    pub fn new(writer: W, format: RdfFormat) -> Self {
        Self { writer, format }
    }

    pub fn write_quad(&mut self, quad: &Quad) -> io::Result<()> {
        match self.format {
            RdfFormat::NQuads => writeln!(self.writer, "{quad}"),
            RdfFormat::NTriples => writeln!(
                self.writer,
                "{} {} {} .",
                quad.subject, quad.predicate, quad.object
            ),
        }
    }

    pub fn write_all(&mut self, quads: impl IntoIterator<Item = Quad>) -> io::Result<()> {
        for quad in quads {
            self.write_quad(&quad)?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
