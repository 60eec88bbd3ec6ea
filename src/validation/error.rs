//! Defines the error types for the validation module.
use crate::graph::Vertex;
use thiserror::Error;

/// A structural problem found while turning the token stream into a graph.
///
/// Validation is fail-fast: the first problem found is returned and no partial
/// graph is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Invalid data format: {count} tokens is not a multiple of 3")]
    Format { count: usize },

    #[error("Invalid vertex notation: {from}, {to}")]
    VertexFormat { from: String, to: String },

    #[error("'{token}' is not a number")]
    OrderFormat { token: String },

    #[error("Edge order must be a positive integer: {token}")]
    OrderRange { token: String },

    #[error("Edge listed twice: ({from}, {to}, {order})")]
    DuplicateEdge { from: Vertex, to: Vertex, order: u32 },

    /// Two different sources claim the same argument slot of one vertex.
    #[error("Vertex {vertex} has two edges with order {order}: from {first} and from {second}")]
    DuplicateOrder { vertex: Vertex, order: u32, first: Vertex, second: Vertex },

    #[error("Incoming edge order broken for vertex {vertex}: {orders:?}")]
    OrderGap { vertex: Vertex, orders: Vec<u32> },
}
