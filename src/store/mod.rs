//! Dense storage for a validated graph.
mod registry;
mod types;

pub use registry::{Children, Registry};
pub use types::{Argument, NodeId};
