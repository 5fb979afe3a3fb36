/// An error raised while validating a blank node identifier.
#[derive(Debug, thiserror::Error)]
#[error("the blank node identifier is invalid")]
pub struct BlankNodeIdParseError;

/// Validates a blank node identifier's syntax (the part after `_:`), per
/// the N-Triples/N-Quads `BLANK_NODE_LABEL` grammar production: starts with
/// a name-start character, continues with name characters and interior
/// `.`s, never ends in `.`.
pub fn validate_blank_node_identifier(id: &str) -> Result<(), BlankNodeIdParseError> {
    let mut chars = id.chars();
    let front = chars.next().ok_or(BlankNodeIdParseError)?;
    match front {
        '0'..='9' | '_' | ':' | 'A'..='Z' | 'a'..='z' => (),
        _ => return Err(BlankNodeIdParseError),
    }
    for c in chars {
        match c {
            '.' | '-' | '0'..='9' | '_' | ':' | 'A'..='Z' | 'a'..='z' => (),
            _ => return Err(BlankNodeIdParseError),
        }
    }
    if id.ends_with('.') {
        Err(BlankNodeIdParseError)
    } else {
        Ok(())
    }
}
