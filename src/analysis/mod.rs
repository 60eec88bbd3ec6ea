//! Structural analysis of a validated graph: cycle gate and root discovery.
pub mod roots;
pub mod topology;

pub use roots::find_roots;
pub use topology::{check_acyclic, find_cycle, CycleError};
