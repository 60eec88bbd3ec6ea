//! Defines the core data structures for the dependency graph.
pub mod dag;
pub mod edge;
pub mod vertex;

// Re-export key types for convenient access
pub use dag::Graph;
pub use edge::Edge;
pub use vertex::Vertex;
