use crate::graph::Vertex;
use crate::store::{NodeId, Registry};
use thiserror::Error;

/// A rendered expression would exceed the configured output limit.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Expression for root {root} exceeds {limit} bytes")]
pub struct EncodeError {
    pub root: Vertex,
    pub limit: usize,
}

enum Step {
    Enter(NodeId),
    Text(&'static str),
}

/// Renders `root` as a prefix expression: `v` for a leaf, `v(a, b, ...)` otherwise.
///
/// Arguments appear in ascending order; ties (only possible under
/// `DuplicateOrderPolicy::Allow`) keep edge insertion order. A vertex used by
/// several parents is rendered in full at every use.
///
/// # Complexity
/// Output size is the number of root-to-leaf paths, which can grow exponentially
/// with depth when sub-expressions are shared (a ladder of 40 levels with two
/// edges each renders 2^40 leaves). Use `encode_bounded` to cap it.
///
/// The registry must be acyclic (see `analysis::topology::check_acyclic`).
pub fn encode(registry: &Registry, root: NodeId) -> String {
    encode_within(registry, root, None).unwrap_or_default()
}

/// Like `encode`, but gives up once the output exceeds `limit` bytes.
pub fn encode_bounded(registry: &Registry, root: NodeId, limit: usize) -> Result<String, EncodeError> {
    encode_within(registry, root, Some(limit)).ok_or_else(|| EncodeError {
        root: registry.name(root).clone(),
        limit,
    })
}

fn encode_within(registry: &Registry, root: NodeId, limit: Option<usize>) -> Option<String> {
    let mut out = String::new();
    let mut stack = vec![Step::Enter(root)];

    while let Some(step) = stack.pop() {
        match step {
            Step::Text(text) => out.push_str(text),
            Step::Enter(id) => {
                out.push_str(registry.name(id).as_str());
                let args = registry.get_args(id);
                if !args.is_empty() {
                    out.push('(');
                    // Pushed in reverse so the first argument is popped first.
                    stack.push(Step::Text(")"));
                    for (i, arg) in args.iter().enumerate().rev() {
                        stack.push(Step::Enter(arg.node));
                        if i > 0 {
                            stack.push(Step::Text(", "));
                        }
                    }
                }
            }
        }
        if limit.is_some_and(|max| out.len() > max) {
            return None;
        }
    }

    Some(out)
}

/// One expression per root, in root order.
pub fn encode_roots(registry: &Registry, roots: &[NodeId]) -> Vec<String> {
    roots.iter().map(|&root| encode(registry, root)).collect()
}

/// One expression per root, failing on the first that exceeds `limit` bytes.
pub fn encode_roots_bounded(
    registry: &Registry,
    roots: &[NodeId],
    limit: usize,
) -> Result<Vec<String>, EncodeError> {
    roots.iter().map(|&root| encode_bounded(registry, root, limit)).collect()
}

/// The textual prefix output of a file: one expression per line.
pub fn render(expressions: &[String]) -> String {
    expressions.join("\n")
}
