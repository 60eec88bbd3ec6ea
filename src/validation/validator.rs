//! The validator that turns a token stream into a `Graph`, applying every rule.
use super::error::ValidationError;
use super::ingest;
use super::rules::{format, ordering};
use crate::config::DuplicateOrderPolicy;
use crate::graph::Graph;
use std::collections::{BTreeSet, HashSet};
use tracing::debug;

/// The gatekeeper between raw input and the rest of the pipeline.
///
/// Tokens are consumed in triples. Per-triple rules run as each triple is read,
/// graph-wide rules run once all triples are in. The first failure is returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct Validator {
    policy: DuplicateOrderPolicy,
}

impl Validator {
    pub fn new(policy: DuplicateOrderPolicy) -> Self {
        Self { policy }
    }

    /// Tokenizes and validates a single graph line.
    pub fn validate_line(&self, line: &str) -> Result<Graph, ValidationError> {
        self.validate(&ingest::tokenize(line))
    }

    /// Validates a flat token stream.
    ///
    /// # Returns
    /// - `Ok(Graph)` with sorted vertices and edges in parse order.
    /// - `Err(ValidationError)` for the first rule violation found.
    pub fn validate<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Graph, ValidationError> {
        if tokens.len() % 3 != 0 {
            return Err(ValidationError::Format { count: tokens.len() });
        }

        let mut vertices = BTreeSet::new();
        let mut seen_edges = HashSet::with_capacity(tokens.len() / 3);
        let mut edges = Vec::with_capacity(tokens.len() / 3);
        let mut incoming = ordering::IncomingOrders::new();

        for triple in tokens.chunks_exact(3) {
            let edge = format::parse_triple(
                triple[0].as_ref().trim(),
                triple[1].as_ref().trim(),
                triple[2].as_ref().trim(),
            )?;

            if !seen_edges.insert(edge.clone()) {
                return Err(ValidationError::DuplicateEdge {
                    from: edge.from,
                    to: edge.to,
                    order: edge.order,
                });
            }

            vertices.insert(edge.from.clone());
            vertices.insert(edge.to.clone());
            incoming
                .entry(edge.to.clone())
                .or_default()
                .push((edge.order, edge.from.clone()));
            edges.push(edge);
        }

        if let Some(err) = ordering::validate_unique_orders(&incoming, self.policy) {
            return Err(err);
        }
        if let Some(err) = ordering::validate_gapless(&incoming) {
            return Err(err);
        }

        debug!(vertices = vertices.len(), edges = edges.len(), "graph validated");
        Ok(Graph::from_parts(vertices.into_iter().collect(), edges))
    }
}
