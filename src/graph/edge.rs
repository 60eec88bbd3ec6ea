//! Defines the `Edge` type, representing a dependency between two vertices.

use super::vertex::Vertex;
use serde::Serialize;
use std::fmt;

/// An ordered dependency triple.
///
/// `from` contributes as the `order`-th argument of `to`. Example: the edges
/// `(v2, v3, 1)` and `(v1, v3, 2)` describe the expression `v3(v2, v1)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    pub from: Vertex,
    pub to: Vertex,
    /// 1-based argument position, always positive once validated.
    pub order: u32,
}

impl Edge {
    pub fn new(from: Vertex, to: Vertex, order: u32) -> Self {
        Self { from, to, order }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.from, self.to, self.order)
    }
}
