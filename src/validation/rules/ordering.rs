//! Graph-wide rules over the incoming edges of each vertex.

use crate::config::DuplicateOrderPolicy;
use crate::graph::Vertex;
use crate::validation::error::ValidationError;
use std::collections::{BTreeMap, HashMap};

/// Incoming `(order, from)` pairs grouped by target vertex, in parse order.
pub(crate) type IncomingOrders = BTreeMap<Vertex, Vec<(u32, Vertex)>>;

/// "One slot, one argument": two different sources may not share an order label on
/// the same target, since the argument order of that target would be ambiguous.
///
/// Skipped entirely under `DuplicateOrderPolicy::Allow`.
pub(crate) fn validate_unique_orders(
    incoming: &IncomingOrders,
    policy: DuplicateOrderPolicy,
) -> Option<ValidationError> {
    if policy == DuplicateOrderPolicy::Allow {
        return None;
    }
    for (vertex, edges) in incoming {
        let mut seen: HashMap<u32, &Vertex> = HashMap::with_capacity(edges.len());
        for (order, from) in edges {
            if let Some(first) = seen.insert(*order, from) {
                return Some(ValidationError::DuplicateOrder {
                    vertex: vertex.clone(),
                    order: *order,
                    first: first.clone(),
                    second: from.clone(),
                });
            }
        }
    }
    None
}

/// "No missing arguments": the distinct orders arriving at a vertex must be exactly
/// `1..=max`.
///
/// Targets are visited in sorted order so the reported vertex is deterministic.
pub(crate) fn validate_gapless(incoming: &IncomingOrders) -> Option<ValidationError> {
    for (vertex, edges) in incoming {
        let mut distinct: Vec<u32> = edges.iter().map(|(order, _)| *order).collect();
        distinct.sort_unstable();
        distinct.dedup();

        let contiguous = distinct.iter().zip(1u32..).all(|(&order, expected)| order == expected);
        if !contiguous {
            return Some(ValidationError::OrderGap {
                vertex: vertex.clone(),
                orders: edges.iter().map(|(order, _)| *order).collect(),
            });
        }
    }
    None
}
