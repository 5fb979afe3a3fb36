use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "quadstore")]
/// Quadstore command line toolkit: load and query in-memory RDF quad stores.
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load file(s) into a fresh in-memory store and report the quad count.
    ///
    /// The store is not persisted: this command is a validator and counter,
    /// useful for checking a dataset is well-formed before querying it.
    Load {
        /// File(s) to load.
        ///
        /// If no file is given, stdin is used and --format must be set.
        #[arg(short, long, num_args = 0.., value_hint = ValueHint::FilePath)]
        file: Vec<PathBuf>,
        /// The format of the file(s) to load: "nq"/"n-quads" or "nt"/"n-triples".
        ///
        /// By default, the format is guessed from the loaded file extension.
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// Base IRI relative references in the file(s) are resolved against.
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// Keep loading past a malformed line instead of stopping at the first one.
        #[arg(long)]
        lenient: bool,
    },
    /// Load file(s), match quads against a pattern, and print the results.
    Query {
        /// File(s) to load before querying.
        ///
        /// If no file is given, stdin is used and --format must be set.
        #[arg(short, long, num_args = 0.., value_hint = ValueHint::FilePath)]
        file: Vec<PathBuf>,
        /// The format of the file(s) to load: "nq"/"n-quads" or "nt"/"n-triples".
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// Base IRI relative references in the file(s) are resolved against.
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// Keep loading past a malformed line instead of stopping at the first one.
        #[arg(long)]
        lenient: bool,
        /// Bound subject term: an IRIREF (`<...>`), a blank node (`_:x`), or a quoted literal.
        #[arg(short, long)]
        subject: Option<String>,
        /// Bound predicate term.
        #[arg(short, long)]
        predicate: Option<String>,
        /// Bound object term.
        #[arg(short, long)]
        object: Option<String>,
        /// Bound graph term. Unset means "any graph or the default graph".
        #[arg(short, long)]
        graph: Option<String>,
        /// The format to print matches in: "nq"/"n-quads" or "nt"/"n-triples".
        #[arg(long, default_value = "nq")]
        out_format: String,
    },
}
