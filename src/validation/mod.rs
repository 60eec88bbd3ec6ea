//! Ingestion and structural validation of the flat triple stream.
//!
//! This module provides the `Validator`, which stands between raw input and every
//! later stage: nothing downstream ever sees a graph that breaks the vertex
//! notation, edge uniqueness, or incoming-order rules.

pub use self::error::ValidationError;
pub use self::validator::Validator;

// --- MODULE DECLARATIONS ---
mod error;
pub mod ingest;
mod validator;
mod rules {
    pub mod format;
    pub mod ordering;
}
