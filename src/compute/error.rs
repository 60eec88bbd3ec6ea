use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// How an identifier's table entry disagrees with its use in the expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mismatch {
    /// A constant written as `name(...)`.
    ConstantCalled,
    /// An operator written without an argument list.
    OperatorBare,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::ConstantCalled => f.write_str("is a constant but is called with arguments"),
            Mismatch::OperatorBare => f.write_str("is an operation but is used without arguments"),
        }
    }
}

/// Failure while parsing or evaluating one prefix expression.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    #[error("Invalid expression '{expr}': {reason}")]
    Syntax { expr: String, reason: String },

    #[error("Unknown vertex {name} in expression")]
    UnknownVertex { name: String },

    #[error("Unknown operation '{symbol}' at {name}")]
    UnknownOperator { name: String, symbol: String },

    #[error("Operation '{symbol}' at {name} takes {expected} argument(s), got {actual}")]
    Arity { name: String, symbol: String, expected: usize, actual: usize },

    #[error("{name} {kind}")]
    TypeMismatch { name: String, kind: Mismatch },
}

/// Failure while loading an operation table.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to read operation table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Line {line}: expected 'identifier:value', got '{text}'")]
    MalformedLine { line: usize, text: String },
    #[error("Line {line}: identifier and value must not be empty")]
    EmptyField { line: usize },
    #[error("Line {line}: identifier '{key}' is already defined")]
    DuplicateKey { key: String, line: usize },
}
