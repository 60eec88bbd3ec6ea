use crate::store::{NodeId, Registry};

/// Finds the outermost expressions of the graph.
///
/// A vertex is a root when it is never the `from` side of an edge, i.e. it is not
/// an argument of any other vertex. Ids follow sorted vertex order, so the result is
/// sorted. A graph with no edges makes every vertex its own root.
pub fn find_roots(registry: &Registry) -> Vec<NodeId> {
    (0..registry.count())
        .map(NodeId::new)
        .filter(|&id| !registry.has_children(id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Validator;

    fn root_names(line: &str) -> Vec<String> {
        let reg = Registry::from_graph(&Validator::default().validate_line(line).unwrap());
        find_roots(&reg).iter().map(|id| reg.name(*id).to_string()).collect()
    }

    #[test]
    fn test_single_root() {
        assert_eq!(root_names("(v1, v3, 1), (v2, v3, 2)"), vec!["v3"]);
    }

    #[test]
    fn test_multiple_roots_sorted() {
        assert_eq!(
            root_names("(v1, v5, 1), (v2, v10, 1), (v3, v4, 1)"),
            vec!["v10", "v4", "v5"]
        );
    }

    #[test]
    fn test_shared_argument() {
        // v1 feeds two roots.
        assert_eq!(root_names("(v1, v2, 1), (v1, v3, 1)"), vec!["v2", "v3"]);
    }

    #[test]
    fn test_empty_graph() {
        assert!(find_roots(&Registry::from_graph(&crate::graph::Graph::default())).is_empty());
    }
}
