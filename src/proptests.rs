//! Property-based tests across validation, encoding, and evaluation.

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    use crate::compute::{OperationTable, OperationValue};
    use crate::config::PipelineConfig;
    use crate::pipeline::{Pipeline, RootOutcome, SourceFile};
    use crate::sink::MemorySink;
    use crate::validation::{ValidationError, Validator};

    fn edge_line(edges: &[(usize, usize, u32)]) -> String {
        edges
            .iter()
            .map(|(f, t, o)| format!("(v{}, v{}, {})", f, t, o))
            .collect::<Vec<_>>()
            .join(", ")
    }

    // Arbitrary small edge lists; most are rejected, some are accepted.
    fn any_edges() -> impl Strategy<Value = Vec<(usize, usize, u32)>> {
        proptest::collection::vec((0usize..5, 0usize..5, 1u32..4), 0..8)
    }

    // Acyclic by construction: every argument of vertex j has a smaller index.
    fn dag_args() -> impl Strategy<Value = Vec<Vec<usize>>> {
        (2usize..9).prop_flat_map(|n| {
            (1..n)
                .map(|j| proptest::collection::vec(0..j, 0..=3))
                .collect::<Vec<_>>()
        })
    }

    fn dag_line(args: &[Vec<usize>]) -> String {
        let mut edges = Vec::new();
        for (j, sources) in args.iter().enumerate() {
            for (k, from) in sources.iter().enumerate() {
                edges.push((*from, j + 1, k as u32 + 1));
            }
        }
        edge_line(&edges)
    }

    proptest! {
        #[test]
        fn accepted_graphs_are_gapless(edges in any_edges()) {
            if let Ok(graph) = Validator::default().validate_line(&edge_line(&edges)) {
                let mut incoming: BTreeMap<&str, Vec<u32>> = BTreeMap::new();
                for e in graph.edges() {
                    incoming.entry(e.to.as_str()).or_default().push(e.order);
                }
                for orders in incoming.values_mut() {
                    orders.sort_unstable();
                    orders.dedup();
                    let expected: Vec<u32> = (1..=orders.len() as u32).collect();
                    prop_assert_eq!(&*orders, &expected[..]);
                }
            }
        }

        #[test]
        fn token_count_must_be_multiple_of_three(n in 1usize..40) {
            prop_assume!(n % 3 != 0);
            let line = vec!["v1"; n].join(", ");
            prop_assert_eq!(
                Validator::default().validate_line(&line),
                Err(ValidationError::Format { count: n })
            );
        }

        #[test]
        fn encoding_is_stable_and_evaluable(args in dag_args()) {
            let line = dag_line(&args);
            prop_assume!(!line.is_empty());
            let sink = MemorySink::new();

            let table: OperationTable = (0..=args.len())
                .map(|v| {
                    let value = if v > 0 && !args[v - 1].is_empty() { "+" } else { "1" };
                    (format!("v{}", v), OperationValue::parse(value))
                })
                .collect();

            let pipeline = Pipeline::new(&PipelineConfig::default(), &sink).with_table(&table);
            let first = pipeline.process(&SourceFile::new("a", line.clone())).unwrap();
            let second = pipeline.process(&SourceFile::new("b", line)).unwrap();

            prop_assert_eq!(&first.expressions, &second.expressions);
            prop_assert!(sink.is_empty());
            for outcome in &first.outcomes {
                match outcome {
                    // Every leaf is 1, so a sum is at least 1.
                    RootOutcome::Evaluated(e) => prop_assert!(e.value >= 1.0),
                    RootOutcome::Failed { error, .. } => prop_assert!(false, "unexpected failure: {}", error),
                }
            }
        }
    }
}
