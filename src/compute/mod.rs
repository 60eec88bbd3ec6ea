//! Expression substitution and evaluation against an operation table.
pub mod engine;
pub mod error;
pub mod expr;
pub mod table;

pub use engine::{format_number, Evaluation, Evaluator};
pub use error::{EvalError, Mismatch, TableError};
pub use expr::{ExprId, ExprNode, ExprTree};
pub use table::{OperationTable, OperationValue, Symbol};
