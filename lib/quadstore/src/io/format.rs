/// A supported line-oriented RDF textual syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RdfFormat {
    /// One quad per line: `subject predicate object [graph] .`
    NQuads,
    /// One triple per line, always in the default graph: `subject predicate object .`
    NTriples,
}

impl RdfFormat {
    /// Guesses a format from a file extension (`.nq`/`.nt`), case-insensitively.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "nq" => Some(Self::NQuads),
            "nt" => Some(Self::NTriples),
            _ => None,
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::NQuads => "nq",
            Self::NTriples => "nt",
        }
    }
}
