//! Per-triple rules: vertex notation and edge order syntax.

use crate::graph::{Edge, Vertex};
use crate::validation::error::ValidationError;

/// Checks one `(from, to, order)` triple and builds the corresponding edge.
pub(crate) fn parse_triple(from: &str, to: &str, order: &str) -> Result<Edge, ValidationError> {
    let (Some(from_v), Some(to_v)) = (Vertex::parse(from), Vertex::parse(to)) else {
        return Err(ValidationError::VertexFormat {
            from: from.to_string(),
            to: to.to_string(),
        });
    };
    let order = parse_order(order)?;
    Ok(Edge::new(from_v, to_v, order))
}

/// Parses a positive base-10 order label.
///
/// Only plain ASCII digit strings are numbers. A signed value is reported as out of
/// range when it is not positive (`-1`, `+0`) and as malformed otherwise (`+3`).
pub(crate) fn parse_order(token: &str) -> Result<u32, ValidationError> {
    let (sign, digits) = match token.as_bytes().first() {
        Some(b'-') | Some(b'+') => (Some(token.as_bytes()[0]), &token[1..]),
        _ => (None, token),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::OrderFormat { token: token.to_string() });
    }

    let is_zero = digits.bytes().all(|b| b == b'0');
    match sign {
        Some(b'-') => Err(ValidationError::OrderRange { token: token.to_string() }),
        Some(_) if is_zero => Err(ValidationError::OrderRange { token: token.to_string() }),
        Some(_) => Err(ValidationError::OrderFormat { token: token.to_string() }),
        None if is_zero => Err(ValidationError::OrderRange { token: token.to_string() }),
        None => digits
            .parse::<u32>()
            .map_err(|_| ValidationError::OrderRange { token: token.to_string() }),
    }
}
