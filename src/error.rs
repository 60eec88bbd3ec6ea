//! The file-scoped error reported to an `ErrorSink`.
use crate::analysis::CycleError;
use crate::compute::EvalError;
use crate::display::EncodeError;
use crate::validation::ValidationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Cycle(#[from] CycleError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
    /// One root failed; the other roots of the file are unaffected.
    #[error("Evaluation failed for {expression}: {source}")]
    Evaluation {
        expression: String,
        #[source]
        source: EvalError,
    },
}
