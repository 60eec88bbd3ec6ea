// Crate root: validates edge-list graphs, renders every root as a prefix
// expression, and evaluates those expressions through an operation table.

// --- Module Definition ---
pub mod analysis;
pub mod compute;
pub mod config;
pub mod display;
pub mod error;
pub mod graph;
pub mod pipeline;
mod proptests;
pub mod sink;
pub mod store;
pub mod validation;

pub use config::{ConfigError, DuplicateOrderPolicy, PipelineConfig};
pub use error::PipelineError;
pub use graph::{Edge, Graph, Vertex};
pub use pipeline::{FileReport, Pipeline, RootOutcome, SourceFile};
pub use sink::{ErrorRecord, ErrorSink, LogFileSink, MemorySink, TracingSink};
