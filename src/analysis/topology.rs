use crate::graph::Vertex;
use crate::store::{Children, NodeId, Registry};
use thiserror::Error;

/// The graph contains a directed cycle; `path` lists its vertices in edge order,
/// starting from the vertex where the cycle closes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Cycle detected in graph: {}", render_path(.path))]
pub struct CycleError {
    pub path: Vec<Vertex>,
}

fn render_path(path: &[Vertex]) -> String {
    let mut parts: Vec<&str> = path.iter().map(Vertex::as_str).collect();
    if let Some(first) = parts.first().copied() {
        parts.push(first);
    }
    parts.join(" -> ")
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    OnStack, // On the current traversal path
    Done,
}

/// Searches for a directed cycle following edges `from -> to`.
///
/// Depth-first search with an explicit stack of `(vertex, child cursor)` frames, so
/// the traversal depth is bounded by heap rather than by the thread stack. Every
/// vertex is tried as a start so disconnected components are covered. Stops at the
/// first back edge found.
pub fn find_cycle(registry: &Registry) -> Option<Vec<NodeId>> {
    let count = registry.count();
    let mut state = vec![VisitState::Unvisited; count];
    let mut stack: Vec<(NodeId, Children<'_>)> = Vec::new();

    for i in 0..count {
        if state[i] != VisitState::Unvisited {
            continue;
        }
        let start = NodeId::new(i);
        state[i] = VisitState::OnStack;
        stack.push((start, registry.children(start)));

        loop {
            let next = match stack.last_mut() {
                Some((_, children)) => children.next(),
                None => break,
            };

            let Some(child) = next else {
                // All children exhausted: leave the current path.
                if let Some((node, _)) = stack.pop() {
                    state[node.index()] = VisitState::Done;
                }
                continue;
            };

            match state[child.index()] {
                VisitState::OnStack => {
                    let pos = stack.iter().position(|(n, _)| *n == child).unwrap_or(0);
                    return Some(stack[pos..].iter().map(|(n, _)| *n).collect());
                }
                VisitState::Unvisited => {
                    state[child.index()] = VisitState::OnStack;
                    stack.push((child, registry.children(child)));
                }
                VisitState::Done => {}
            }
        }
    }

    None
}

/// Gate for the downstream stages: `Ok(())` for an acyclic graph.
pub fn check_acyclic(registry: &Registry) -> Result<(), CycleError> {
    match find_cycle(registry) {
        Some(cycle) => Err(CycleError {
            path: cycle.into_iter().map(|id| registry.name(id).clone()).collect(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;
    use petgraph::algo::is_cyclic_directed;
    use petgraph::graph::DiGraph;
    use proptest::prelude::*;

    fn registry(line: &str) -> Registry {
        Registry::from_graph(&Validator::default().validate_line(line).unwrap())
    }

    #[test]
    fn test_acyclic_tree() {
        let reg = registry("(v1, v3, 1), (v2, v3, 2), (v3, v4, 1)");
        assert!(find_cycle(&reg).is_none());
        assert!(check_acyclic(&reg).is_ok());
    }

    #[test]
    fn test_three_cycle() {
        let reg = registry("(v1, v2, 1), (v2, v3, 1), (v3, v1, 1)");
        let err = check_acyclic(&reg).unwrap_err();
        assert_eq!(err.path.len(), 3);
        assert_eq!(err.to_string(), "Cycle detected in graph: v1 -> v2 -> v3 -> v1");
    }

    #[test]
    fn test_self_loop() {
        let reg = registry("(v1, v1, 1)");
        let err = check_acyclic(&reg).unwrap_err();
        assert_eq!(err.to_string(), "Cycle detected in graph: v1 -> v1");
    }

    #[test]
    fn test_cycle_in_disconnected_component() {
        let reg = registry("(v1, v2, 1), (v7, v8, 1), (v8, v9, 1), (v9, v7, 1)");
        let path = find_cycle(&reg).unwrap();
        let names: Vec<&str> = path.iter().map(|id| reg.name(*id).as_str()).collect();
        assert_eq!(names, vec!["v7", "v8", "v9"]);
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // v1 reaches v4 along two paths; the second visit sees a finished vertex.
        let reg = registry("(v1, v2, 1), (v1, v3, 1), (v2, v4, 1), (v3, v4, 2)");
        assert!(find_cycle(&reg).is_none());
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let n = 200_000;
        let line = (1..n)
            .map(|i| format!("(v{}, v{}, 1)", i, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let reg = registry(&line);
        assert!(find_cycle(&reg).is_none());
    }

    proptest! {
        #[test]
        fn agrees_with_petgraph(raw in prop::collection::vec((0u32..8, 0u32..8), 0..20)) {
            // Give every edge a unique order per target so the graph validates.
            let mut next_order = [0u32; 8];
            let mut seen = std::collections::HashSet::new();
            let mut triples = Vec::new();
            let mut pg = DiGraph::<(), ()>::new();
            let nodes: Vec<_> = (0..8).map(|_| pg.add_node(())).collect();
            for (from, to) in raw {
                if !seen.insert((from, to)) {
                    continue;
                }
                next_order[to as usize] += 1;
                triples.push(format!("v{}, v{}, {}", from, to, next_order[to as usize]));
                pg.add_edge(nodes[from as usize], nodes[to as usize], ());
            }
            let reg = registry(&triples.join(", "));
            prop_assert_eq!(find_cycle(&reg).is_some(), is_cyclic_directed(&pg));
        }
    }
}
