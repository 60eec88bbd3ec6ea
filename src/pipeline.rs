//! Per-file processing: validate, gate on cycles, find roots, encode, evaluate.
//!
//! Every failure is file-scoped. A stage error ends processing of that file only;
//! a root that fails to evaluate does not affect the other roots of its file.

use crate::analysis::{check_acyclic, find_roots};
use crate::compute::{EvalError, Evaluation, Evaluator, OperationTable};
use crate::config::PipelineConfig;
use crate::display::prefix;
use crate::error::PipelineError;
use crate::graph::{Graph, Vertex};
use crate::sink::ErrorSink;
use crate::store::Registry;
use crate::validation::{ingest, Validator};
use rayon::prelude::*;
use serde::{Serialize, Serializer};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// One input: its identity for error reporting and its text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self { name: name.into(), text: text.into() }
    }

    /// Reads a file; its display path becomes its name.
    pub fn read(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Ok(Self::new(path.display().to_string(), fs::read_to_string(path)?))
    }
}

fn error_text<S: Serializer>(error: &EvalError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RootOutcome {
    Evaluated(Evaluation),
    Failed {
        expression: String,
        #[serde(serialize_with = "error_text")]
        error: EvalError,
    },
}

impl RootOutcome {
    pub fn render(&self) -> String {
        match self {
            RootOutcome::Evaluated(evaluation) => evaluation.render(),
            RootOutcome::Failed { expression, error } => {
                format!("Evaluation failed for {}: {}", expression, error)
            }
        }
    }
}

/// Everything produced for one successfully processed file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileReport {
    pub file: String,
    pub graph: Graph,
    pub roots: Vec<Vertex>,
    /// One prefix expression per root, in root order.
    pub expressions: Vec<String>,
    /// One outcome per root; empty when no operation table was supplied.
    pub outcomes: Vec<RootOutcome>,
}

impl FileReport {
    /// Newline-separated prefix expressions.
    pub fn prefix_output(&self) -> String {
        prefix::render(&self.expressions)
    }

    pub fn evaluation_lines(&self) -> Vec<String> {
        self.outcomes.iter().map(RootOutcome::render).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

pub struct Pipeline<'a, S: ErrorSink + ?Sized> {
    validator: Validator,
    parallel: bool,
    max_expression_len: Option<usize>,
    table: Option<&'a OperationTable>,
    sink: &'a S,
}

impl<'a, S: ErrorSink + ?Sized> Pipeline<'a, S> {
    pub fn new(config: &PipelineConfig, sink: &'a S) -> Self {
        Self {
            validator: Validator::new(config.duplicate_orders),
            parallel: config.parallel,
            max_expression_len: config.max_expression_len,
            table: None,
            sink,
        }
    }

    /// Enables the evaluation stage.
    pub fn with_table(mut self, table: &'a OperationTable) -> Self {
        self.table = Some(table);
        self
    }

    /// Processes one file. Returns `None` if a stage failed; the failure has been
    /// recorded to the sink.
    pub fn process(&self, source: &SourceFile) -> Option<FileReport> {
        match self.try_process(source) {
            Ok(report) => Some(report),
            Err(e) => {
                debug!(file = %source.name, error = %e, "file rejected");
                self.sink.record(&source.name, &e);
                None
            }
        }
    }

    fn try_process(&self, source: &SourceFile) -> Result<FileReport, PipelineError> {
        let tokens = ingest::tokenize(ingest::first_line(&source.text));
        debug!(file = %source.name, tokens = tokens.len(), "tokenized");

        let graph = self.validator.validate(&tokens)?;
        let registry = Registry::from_graph(&graph);
        check_acyclic(&registry)?;

        let roots = find_roots(&registry);
        let expressions = match self.max_expression_len {
            Some(limit) => prefix::encode_roots_bounded(&registry, &roots, limit)?,
            None => prefix::encode_roots(&registry, &roots),
        };
        debug!(file = %source.name, roots = roots.len(), "encoded");

        let outcomes = match self.table {
            Some(table) => self.evaluate_roots(&source.name, table, &expressions),
            None => Vec::new(),
        };

        info!(
            file = %source.name,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            roots = roots.len(),
            "file processed"
        );

        Ok(FileReport {
            file: source.name.clone(),
            roots: roots.iter().map(|id| registry.name(*id).clone()).collect(),
            graph,
            expressions,
            outcomes,
        })
    }

    fn evaluate_roots(&self, file: &str, table: &OperationTable, expressions: &[String]) -> Vec<RootOutcome> {
        let evaluator = Evaluator::new(table);
        expressions
            .iter()
            .map(|expression| match evaluator.evaluate_str(expression) {
                Ok(evaluation) => RootOutcome::Evaluated(evaluation),
                Err(error) => {
                    warn!(file, %expression, %error, "root evaluation failed");
                    self.sink.record(
                        file,
                        &PipelineError::Evaluation { expression: expression.clone(), source: error.clone() },
                    );
                    RootOutcome::Failed { expression: expression.clone(), error }
                }
            })
            .collect()
    }

    /// Processes files in order, one at a time.
    pub fn run_batch(&self, sources: &[SourceFile]) -> Vec<FileReport> {
        sources.iter().filter_map(|source| self.process(source)).collect()
    }

    /// Processes files on the rayon pool. Reports keep input order; sink records
    /// arrive in completion order.
    pub fn run_batch_parallel(&self, sources: &[SourceFile]) -> Vec<FileReport> {
        sources.par_iter().filter_map(|source| self.process(source)).collect()
    }

    /// Runs the batch in the mode chosen by the configuration.
    pub fn run(&self, sources: &[SourceFile]) -> Vec<FileReport> {
        if self.parallel {
            self.run_batch_parallel(sources)
        } else {
            self.run_batch(sources)
        }
    }
}
