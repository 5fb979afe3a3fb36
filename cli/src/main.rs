#![allow(clippy::print_stdout, clippy::print_stderr)]
use anyhow::{bail, Context};
use clap::Parser;
use quadstore::io::{parse_term, QuadReader, QuadWriter, RdfFormat};
use quadstore::{IndexSet, Model, Pattern, World};
use std::fs::File;
use std::io::{stdin, stdout, BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Args, Command};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Args::parse().command {
        Command::Load {
            file,
            format,
            base,
            lenient,
        } => load(&file, format.as_deref(), base.as_deref(), lenient),
        Command::Query {
            file,
            format,
            base,
            lenient,
            subject,
            predicate,
            object,
            graph,
            out_format,
        } => query(
            &file,
            format.as_deref(),
            base.as_deref(),
            lenient,
            subject.as_deref(),
            predicate.as_deref(),
            object.as_deref(),
            graph.as_deref(),
            &out_format,
        ),
    }
}

fn rdf_format_from_name(name: &str) -> anyhow::Result<RdfFormat> {
    match name.to_ascii_lowercase().as_str() {
        "nq" | "n-quads" | "application/n-quads" => Ok(RdfFormat::NQuads),
        "nt" | "n-triples" | "application/n-triples" => Ok(RdfFormat::NTriples),
        _ => bail!("The file format '{name}' is unknown"),
    }
}

/// Resolves the input format from an explicit `--format` flag, falling back
/// to guessing it from the first input file's extension.
fn resolve_format(format: Option<&str>, files: &[PathBuf]) -> anyhow::Result<RdfFormat> {
    if let Some(name) = format {
        return rdf_format_from_name(name);
    }
    let file = files
        .first()
        .context("The --format option must be set when loading from stdin")?;
    let extension = file
        .extension()
        .and_then(|e| e.to_str())
        .with_context(|| format!("The file {} has no extension to guess a format from", file.display()))?;
    RdfFormat::from_extension(extension)
        .with_context(|| format!("The file extension '{extension}' is unknown; set --format explicitly"))
}

fn open_reader(file: &Path) -> anyhow::Result<BufReader<File>> {
    Ok(BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    ))
}

/// Reads every quad off `reader`, minting terms through `world` and adding
/// them to `model`. Returns `(quads added, duplicates skipped)`.
fn load_reader(
    world: &World,
    model: &mut Model,
    source_name: &str,
    reader: impl BufRead,
    format: RdfFormat,
    base: Option<&str>,
    lenient: bool,
) -> anyhow::Result<(usize, usize)> {
    let mut builder = QuadReader::new(format);
    if let Some(base) = base {
        builder = builder
            .with_base_iri(base)
            .with_context(|| format!("Invalid base IRI {base}"))?;
    }
    if lenient {
        builder = builder.lenient();
    }

    let mut loaded = 0usize;
    let mut duplicates = 0usize;
    for quad in builder.read(world.clone(), reader) {
        match quad {
            Ok(quad) => {
                if model.add(quad) {
                    loaded += 1;
                } else {
                    duplicates += 1;
                }
            }
            Err(e) => {
                if lenient {
                    tracing::warn!(source = source_name, error = %e, "skipping malformed line");
                } else {
                    bail!("{source_name}: {e}");
                }
            }
        }
    }
    tracing::debug!(source = source_name, loaded, duplicates, "loaded file");
    Ok((loaded, duplicates))
}

fn load_into(
    world: &World,
    model: &mut Model,
    files: &[PathBuf],
    format: RdfFormat,
    base: Option<&str>,
    lenient: bool,
) -> anyhow::Result<(usize, usize)> {
    let mut loaded = 0;
    let mut duplicates = 0;
    if files.is_empty() {
        let (l, d) = load_reader(world, model, "<stdin>", stdin().lock(), format, base, lenient)?;
        loaded += l;
        duplicates += d;
    } else {
        for file in files {
            let reader = open_reader(file)?;
            let (l, d) = load_reader(world, model, &file.display().to_string(), reader, format, base, lenient)?;
            loaded += l;
            duplicates += d;
        }
    }
    tracing::info!(loaded, duplicates, "load complete");
    Ok((loaded, duplicates))
}

fn load(file: &[PathBuf], format: Option<&str>, base: Option<&str>, lenient: bool) -> anyhow::Result<()> {
    let format = resolve_format(format, file)?;
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::SPO);
    let (loaded, duplicates) = load_into(&world, &mut model, file, format, base, lenient)?;
    println!("{loaded} quads loaded ({duplicates} duplicate lines skipped)");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn query(
    file: &[PathBuf],
    format: Option<&str>,
    base: Option<&str>,
    lenient: bool,
    subject: Option<&str>,
    predicate: Option<&str>,
    object: Option<&str>,
    graph: Option<&str>,
    out_format: &str,
) -> anyhow::Result<()> {
    let format = resolve_format(format, file)?;
    let out_format = rdf_format_from_name(out_format)?;
    let world = World::new();
    let mut model = Model::new(world.clone(), IndexSet::ALL);
    load_into(&world, &mut model, file, format, base, lenient)?;

    let mut pattern = Pattern::any();
    if let Some(term) = subject {
        pattern = pattern.with_subject(
            parse_term(&world, term, base).with_context(|| format!("Invalid --subject term {term}"))?,
        );
    }
    if let Some(term) = predicate {
        pattern = pattern.with_predicate(
            parse_term(&world, term, base).with_context(|| format!("Invalid --predicate term {term}"))?,
        );
    }
    if let Some(term) = object {
        pattern = pattern
            .with_object(parse_term(&world, term, base).with_context(|| format!("Invalid --object term {term}"))?);
    }
    if let Some(term) = graph {
        pattern =
            pattern.with_graph(parse_term(&world, term, base).with_context(|| format!("Invalid --graph term {term}"))?);
    }

    let stdout = stdout();
    let mut writer = QuadWriter::new(BufWriter::new(stdout.lock()), out_format);
    let mut count = 0usize;
    for quad in model.find(&pattern) {
        writer.write_quad(&quad)?;
        count += 1;
    }
    tracing::info!(matches = count, "query finished");
    Ok(())
}
