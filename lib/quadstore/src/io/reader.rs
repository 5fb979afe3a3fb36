//! A strict, line-oriented N-Quads/N-Triples reader.
//!
//! Grammar coverage is intentionally the W3C N-Triples/N-Quads core:
//! `IRIREF`, `BLANK_NODE_LABEL`, `STRING_LITERAL_QUOTE` with an optional
//! `LANGTAG` or `^^IRIREF`, one statement per line, terminated by `.`.
//! Comments and multi-line literals (Turtle/TriG territory) are out of
//! scope.

use crate::error::{BaseIriError, ParseError};
use crate::io::format::RdfFormat;
use oxilangtag::LanguageTag;
use oxiri::Iri;
use quadstore_model::{validate_blank_node_identifier, Node, Quad, World};
use std::io::BufRead;
use std::str::CharIndices;

/// Builds a [`QuadReaderIter`] over a [`BufRead`] source.
#[derive(Clone)]
#[must_use]
pub struct QuadReader {
    format: RdfFormat,
    base: Option<Iri<String>>,
    lenient: bool,
}

impl QuadReader {
    pub fn new(format: RdfFormat) -> Self {
        Self {
            format,
            base: None,
            lenient: false,
        }
    }

    /// Sets the base IRI relative references in the input are resolved
    /// against. Without one, a relative IRI reference is a parse error.
    pub fn with_base_iri(mut self, base: &str) -> Result<Self, BaseIriError> {
        self.base = Some(Iri::parse(base.to_owned())?);
        Ok(self)
    }

    /// Best-effort mode: a malformed line is reported through the iterator
    /// but does not stop subsequent lines from being parsed. Off by
    /// default, in which case the iterator yields the first error and then
    /// ends.
    pub fn lenient(mut self) -> Self {
        self.lenient = true;
        self
    }

    /// Parses quads from `source`, minting terms through `world`.
    pub fn read<R: BufRead>(self, world: World, source: R) -> QuadReaderIter<R> {
        QuadReaderIter {
            world,
            format: self.format,
            base: self.base,
            lenient: self.lenient,
            source,
            line_no: 0,
            done: false,
        }
    }
}

/// An iterator over `Result<Quad, ParseError>`, one statement per input
/// line. Stops (returns `None` forever after) on the first error unless
/// built with [`QuadReader::lenient`].
pub struct QuadReaderIter<R> {
    world: World,
    format: RdfFormat,
    base: Option<Iri<String>>,
    lenient: bool,
    source: R,
    line_no: usize,
    done: bool,
}

impl<R: BufRead> Iterator for QuadReaderIter<R> {
    type Item = Result<Quad, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let mut line = String::new();
            match self.source.read_line(&mut line) {
                Ok(0) => {
                    self.done = true;
                    return None;
                }
                Ok(_) => {}
                Err(e) => {
                    self.done = true;
                    return Some(Err(ParseError::Io(e)));
                }
            }
            self.line_no += 1;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return match parse_line(&self.world, self.format, self.base.as_ref(), trimmed, self.line_no) {
                Ok(quad) => Some(Ok(quad)),
                Err(e) => {
                    if !self.lenient {
                        self.done = true;
                    }
                    Some(Err(e))
                }
            };
        }
    }
}

fn syntax(line_no: usize, message: impl Into<String>) -> ParseError {
    ParseError::Syntax {
        line: line_no,
        message: message.into(),
    }
}

fn parse_line(
    world: &World,
    format: RdfFormat,
    base: Option<&Iri<String>>,
    line: &str,
    line_no: usize,
) -> Result<Quad, ParseError> {
    let mut cursor = Cursor { rest: line };

    let subject = cursor.parse_term(world, base, line_no)?;
    if subject.is_literal() {
        return Err(syntax(line_no, "subject cannot be a literal"));
    }
    cursor.skip_ws();

    let predicate = cursor.parse_term(world, base, line_no)?;
    if !predicate.is_iri() {
        return Err(syntax(line_no, "predicate must be an IRI"));
    }
    cursor.skip_ws();

    let object = cursor.parse_term(world, base, line_no)?;
    cursor.skip_ws();

    let graph = if format == RdfFormat::NQuads && cursor.rest.as_bytes().first() != Some(&b'.') {
        let graph = cursor.parse_term(world, base, line_no)?;
        if graph.is_literal() {
            return Err(syntax(line_no, "graph name cannot be a literal"));
        }
        cursor.skip_ws();
        Some(graph)
    } else {
        None
    };

    cursor.expect_byte(b'.', line_no, "'.' statement terminator")?;
    cursor.skip_ws();
    if !cursor.rest.is_empty() {
        return Err(syntax(line_no, "unexpected trailing content after '.'"));
    }

    Ok(Quad::new(subject, predicate, object, graph))
}

/// Parses a single RDF term (`IRIREF`, blank node label, or literal) on its
/// own, with no surrounding statement — for callers (the CLI's
/// `--subject`/`--predicate`/`--object`/`--graph` flags) that build a
/// [`Pattern`](quadstore_model::Pattern) from individually supplied
/// arguments rather than a parsed file.
pub fn parse_term(world: &World, term: &str, base: Option<&str>) -> Result<Node, ParseError> {
    let base = base
        .map(|b| Iri::parse(b.to_owned()))
        .transpose()
        .map_err(|e| ParseError::Iri(e, 0))?;
    let mut cursor = Cursor { rest: term.trim() };
    let node = cursor.parse_term(world, base.as_ref(), 0)?;
    cursor.skip_ws();
    if !cursor.rest.is_empty() {
        return Err(syntax(0, "unexpected trailing content after term"));
    }
    Ok(node)
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn skip_ws(&mut self) {
        self.rest = self.rest.trim_start_matches([' ', '\t']);
    }

    fn expect_byte(&mut self, b: u8, line_no: usize, what: &str) -> Result<(), ParseError> {
        if self.rest.as_bytes().first() == Some(&b) {
            self.rest = &self.rest[1..];
            Ok(())
        } else {
            Err(syntax(line_no, format!("expected {what}")))
        }
    }

    /// Parses an `IRIREF`: `<...>` with `\uXXXX`/`\UXXXXXXXX` escapes,
    /// resolved against `base` if relative.
    fn parse_iriref(
        &mut self,
        world: &World,
        base: Option<&Iri<String>>,
        line_no: usize,
    ) -> Result<Node, ParseError> {
        self.expect_byte(b'<', line_no, "'<'")?;
        let end = self
            .rest
            .find('>')
            .ok_or_else(|| syntax(line_no, "unterminated IRIREF"))?;
        let raw = &self.rest[..end];
        self.rest = &self.rest[end + 1..];
        let unescaped = unescape_iri(raw, line_no)?;
        let resolved = match base {
            Some(base) => base
                .resolve(&unescaped)
                .map_err(|e| ParseError::Iri(e, line_no))?
                .into_inner(),
            None => {
                Iri::parse(unescaped.clone()).map_err(|e| ParseError::Iri(e, line_no))?;
                unescaped
            }
        };
        Ok(world.new_iri(resolved))
    }

    /// Parses a `BLANK_NODE_LABEL`: `_:XXX` up to the next delimiter.
    fn parse_blank(&mut self, world: &World, line_no: usize) -> Result<Node, ParseError> {
        self.expect_byte(b'_', line_no, "'_'")?;
        self.expect_byte(b':', line_no, "':'")?;
        let end = self.rest.find([' ', '\t', '.']).unwrap_or(self.rest.len());
        let label = &self.rest[..end];
        validate_blank_node_identifier(label).map_err(|e| ParseError::BlankNodeId(e, line_no))?;
        self.rest = &self.rest[end..];
        Ok(world.new_blank(label))
    }

    /// Parses a `STRING_LITERAL_QUOTE`, then an optional `LANGTAG` or
    /// `^^IRIREF`.
    fn parse_literal(
        &mut self,
        world: &World,
        base: Option<&Iri<String>>,
        line_no: usize,
    ) -> Result<Node, ParseError> {
        self.expect_byte(b'"', line_no, "'\"'")?;
        let mut value = String::new();
        let mut chars = self.rest.char_indices();
        let mut consumed = None;
        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    consumed = Some(i + 1);
                    break;
                }
                '\\' => {
                    let (_, escape) = chars
                        .next()
                        .ok_or_else(|| syntax(line_no, "dangling escape in string literal"))?;
                    value.push(unescape_char(escape, &mut chars, line_no)?);
                }
                c => value.push(c),
            }
        }
        let consumed = consumed.ok_or_else(|| syntax(line_no, "unterminated string literal"))?;
        self.rest = &self.rest[consumed..];

        if let Some(stripped) = self.rest.strip_prefix('@') {
            let end = stripped
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
                .unwrap_or(stripped.len());
            let tag = &stripped[..end];
            if tag.is_empty() {
                return Err(syntax(line_no, "empty language tag"));
            }
            self.rest = &stripped[end..];
            let tag = LanguageTag::parse(tag.to_ascii_lowercase())
                .map_err(|e| ParseError::LanguageTag(e, line_no))?
                .into_inner();
            return Ok(world.new_literal(value, None, Some(&tag)));
        }
        if let Some(stripped) = self.rest.strip_prefix("^^") {
            self.rest = stripped;
            let datatype = self.parse_iriref(world, base, line_no)?;
            return Ok(world.new_literal(value, Some(datatype), None));
        }
        Ok(world.new_literal(value, None, None))
    }

    fn parse_term(
        &mut self,
        world: &World,
        base: Option<&Iri<String>>,
        line_no: usize,
    ) -> Result<Node, ParseError> {
        self.skip_ws();
        match self.rest.as_bytes().first() {
            Some(b'<') => self.parse_iriref(world, base, line_no),
            Some(b'_') => self.parse_blank(world, line_no),
            Some(b'"') => self.parse_literal(world, base, line_no),
            _ => Err(syntax(line_no, "expected a term (IRIREF, blank node, or literal)")),
        }
    }
}

/// Unescapes the `\uXXXX`/`\UXXXXXXXX` sequences an `IRIREF` permits.
fn unescape_iri(raw: &str, line_no: usize) -> Result<String, ParseError> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.char_indices();
    while let Some((_, c)) = chars.next() {
        if c == '\\' {
            let (_, escape) = chars
                .next()
                .ok_or_else(|| syntax(line_no, "dangling escape in IRIREF"))?;
            match escape {
                'u' => out.push(decode_hex_char(&mut chars, 4, line_no)?),
                'U' => out.push(decode_hex_char(&mut chars, 8, line_no)?),
                _ => return Err(syntax(line_no, "IRIREF only allows \\u/\\U escapes")),
            }
        } else {
            out.push(c);
        }
    }
    Ok(out)
}

/// Unescapes the single character or `\u`/`\U` sequence following a
/// backslash inside a `STRING_LITERAL_QUOTE`.
fn unescape_char(escape: char, chars: &mut CharIndices<'_>, line_no: usize) -> Result<char, ParseError> {
    match escape {
        't' => Ok('\t'),
        'b' => Ok('\u{8}'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\u{c}'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        'u' => decode_hex_char(chars, 4, line_no),
        'U' => decode_hex_char(chars, 8, line_no),
        _ => Err(syntax(line_no, "unknown escape sequence")),
    }
}

fn decode_hex_char(chars: &mut CharIndices<'_>, digits: usize, line_no: usize) -> Result<char, ParseError> {
    let mut code_point = 0u32;
    for _ in 0..digits {
        let (_, digit) = chars
            .next()
            .ok_or_else(|| syntax(line_no, "truncated unicode escape"))?;
        let value = digit
            .to_digit(16)
            .ok_or_else(|| syntax(line_no, "invalid hex digit in unicode escape"))?;
        code_point = code_point * 16 + value;
    }
    char::from_u32(code_point).ok_or_else(|| syntax(line_no, "unicode escape is not a valid code point"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::format::RdfFormat;

    fn read_all(format: RdfFormat, world: &World, input: &str) -> Vec<Result<Quad, ParseError>> {
        QuadReader::new(format).read(world.clone(), input.as_bytes()).collect()
    }

    #[test]
    fn parses_a_simple_triple_as_default_graph_quad() {
        let world = World::new();
        let quads = read_all(
            RdfFormat::NTriples,
            &world,
            "<http://a> <http://b> <http://c> .\n",
        );
        assert_eq!(quads.len(), 1);
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.subject.as_str(), "http://a");
        assert!(quad.graph.is_none());
    }

    #[test]
    fn parses_quads_with_explicit_graph() {
        let world = World::new();
        let quads = read_all(
            RdfFormat::NQuads,
            &world,
            "<http://a> <http://b> <http://c> <http://g> .\n",
        );
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.graph.unwrap().as_str(), "http://g");
    }

    #[test]
    fn parses_literal_with_language_tag() {
        let world = World::new();
        let quads = read_all(RdfFormat::NTriples, &world, "<http://a> <http://b> \"hi\"@en .\n");
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.object.as_str(), "hi");
        assert_eq!(quad.object.language(), Some("en"));
    }

    #[test]
    fn parses_literal_with_datatype_and_escapes() {
        let world = World::new();
        let quads = read_all(
            RdfFormat::NTriples,
            &world,
            r#"<http://a> <http://b> "line\nbreak"^^<http://www.w3.org/2001/XMLSchema#string> .
"#,
        );
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.object.as_str(), "line\nbreak");
        assert_eq!(
            quad.object.datatype().unwrap().as_str(),
            "http://www.w3.org/2001/XMLSchema#string"
        );
    }

    #[test]
    fn rejects_literal_subject() {
        let world = World::new();
        let quads = read_all(RdfFormat::NTriples, &world, "\"lit\" <http://b> <http://c> .\n");
        assert!(matches!(quads.into_iter().next(), Some(Err(ParseError::Syntax { .. }))));
    }

    #[test]
    fn resolves_relative_iris_against_a_base() {
        let world = World::new();
        let reader = QuadReader::new(RdfFormat::NTriples)
            .with_base_iri("http://example.com/")
            .unwrap();
        let quads: Vec<_> = reader
            .read(world.clone(), "<a> <b> <c> .\n".as_bytes())
            .collect();
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.subject.as_str(), "http://example.com/a");
    }

    #[test]
    fn blank_nodes_round_trip_through_the_same_world() {
        let world = World::new();
        let quads: Vec<_> = read_all(RdfFormat::NTriples, &world, "_:x <http://b> _:x .\n");
        let quad = quads.into_iter().next().unwrap().unwrap();
        assert_eq!(quad.subject, quad.object);
    }
}
