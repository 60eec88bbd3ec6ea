//! dag.rs
//! The validated graph: a sorted vertex list plus the edge list in parse order.

use super::edge::Edge;
use super::vertex::Vertex;
use serde::Serialize;

/// An immutable, validated dependency graph.
///
/// Instances are produced by `validation::Validator`; the fields are private so the
/// incoming-order invariant established there cannot be broken afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Graph {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
}

impl Graph {
    /// Builds a graph from already-checked parts. Vertices are sorted and deduplicated.
    pub(crate) fn from_parts(mut vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        vertices.sort();
        vertices.dedup();
        Self { vertices, edges }
    }

    /// Vertices in lexicographic order.
    pub fn vertices(&self) -> &[Vertex] { &self.vertices }

    /// Edges in the order they were read.
    pub fn edges(&self) -> &[Edge] { &self.edges }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }
    pub fn edge_count(&self) -> usize { self.edges.len() }
    pub fn is_empty(&self) -> bool { self.vertices.is_empty() }

    /// Edges sorted by `(to, order)`. The sort is stable, so edges sharing both keys
    /// keep their parse order.
    pub fn edges_by_target(&self) -> Vec<&Edge> {
        let mut sorted: Vec<&Edge> = self.edges.iter().collect();
        sorted.sort_by(|a, b| a.to.cmp(&b.to).then(a.order.cmp(&b.order)));
        sorted
    }

    /// The `order` labels of edges arriving at `vertex`, in parse order.
    pub fn incoming(&self, vertex: &Vertex) -> Vec<u32> {
        self.edges
            .iter()
            .filter(|e| &e.to == vertex)
            .map(|e| e.order)
            .collect()
    }
}
