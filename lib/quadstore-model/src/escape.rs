//! N-Triples/N-Quads string escaping, shared by [`Display`](std::fmt::Display)
//! impls and the textual writer.

use std::fmt::{self, Write};

pub fn write_quoted(value: &str, f: &mut impl Write) -> fmt::Result {
    f.write_char('"')?;
    for c in value.chars() {
        match c {
            '\u{08}' => f.write_str("\\b"),
            '\t' => f.write_str("\\t"),
            '\n' => f.write_str("\\n"),
            '\u{0c}' => f.write_str("\\f"),
            '\r' => f.write_str("\\r"),
            '"' => f.write_str("\\\""),
            '\\' => f.write_str("\\\\"),
            '\0'..='\u{1f}' | '\u{7f}' => write!(f, "\\u{:04X}", u32::from(c)),
            c => f.write_char(c),
        }?;
    }
    f.write_char('"')
}
