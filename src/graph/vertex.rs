//! Defines the `Vertex` identifier used throughout the graph.

use serde::Serialize;
use std::fmt;

/// A validated vertex name: the letter `v` followed by one or more ASCII digits.
///
/// Vertices compare by their string value, so `v10` sorts before `v2`. This is the
/// ordering used for the vertex list and for the order in which roots are emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Vertex(String);

impl Vertex {
    /// Returns the vertex if `token` matches `v<digits>`, otherwise `None`.
    pub fn parse(token: &str) -> Option<Self> {
        if Self::is_valid(token) {
            Some(Self(token.to_string()))
        } else {
            None
        }
    }

    /// Checks the `v<digits>` pattern without allocating.
    pub fn is_valid(token: &str) -> bool {
        match token.strip_prefix('v') {
            Some(digits) => !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()),
            None => false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Vertex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Vertex {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
