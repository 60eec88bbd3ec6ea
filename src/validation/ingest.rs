//! Turns the raw graph line into the flat token stream consumed by the validator.

/// Returns the first line of a file body. Only the first line carries the graph.
pub fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("")
}

/// Splits a graph line into trimmed tokens.
///
/// Parenthesis characters may appear anywhere in the line and are dropped before
/// splitting on commas, so `(v1, v2, 1), (v2, v3, 1)` and `v1,v2,1,v2,v3,1` yield
/// the same tokens. A blank line yields a single empty token.
pub fn tokenize(line: &str) -> Vec<String> {
    let cleaned: String = line.trim().chars().filter(|c| *c != '(' && *c != ')').collect();
    cleaned.split(',').map(|t| t.trim().to_string()).collect()
}
