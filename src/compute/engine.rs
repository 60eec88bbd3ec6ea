use super::error::{EvalError, Mismatch};
use super::expr::{ExprId, ExprTree};
use super::table::{OperationTable, OperationValue, Symbol};
use serde::Serialize;

/// The outcome of one root expression: its text, substitution trace, and value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub expression: String,
    pub trace: String,
    pub value: f64,
}

impl Evaluation {
    /// `Result for <expr>: <trace>`. Operator traces already end in `= <value>`.
    pub fn render(&self) -> String {
        format!("Result for {}: {}", self.expression, self.trace)
    }
}

/// Formats a value the way traces show it: integral values without a fractional
/// part, everything else in shortest round-trip form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

enum Step {
    Enter(ExprId),
    Separator,
    Exit(ExprId),
}

/// Substitutes identifiers through an `OperationTable` and evaluates the result.
pub struct Evaluator<'a> {
    table: &'a OperationTable,
}

impl<'a> Evaluator<'a> {
    pub fn new(table: &'a OperationTable) -> Self {
        Self { table }
    }

    /// Parses and evaluates a prefix expression string.
    pub fn evaluate_str(&self, text: &str) -> Result<Evaluation, EvalError> {
        self.evaluate(&ExprTree::parse(text)?)
    }

    /// Evaluates a parsed expression.
    ///
    /// Post-order traversal with an explicit stack. Each node is checked against
    /// the table when entered (so an outer type error is reported before anything
    /// inside it), and its operator is applied when all its arguments are done. The
    /// trace is written to one buffer as the traversal goes: `sym(` on entry,
    /// argument traces in between, `) = result` on exit.
    pub fn evaluate(&self, tree: &ExprTree) -> Result<Evaluation, EvalError> {
        let mut trace = String::new();
        let mut values: Vec<f64> = Vec::new();
        let mut stack = vec![Step::Enter(tree.root())];

        while let Some(step) = stack.pop() {
            match step {
                Step::Separator => trace.push_str(", "),
                Step::Enter(id) => {
                    let node = tree.node(id);
                    let entry = self
                        .table
                        .get(&node.ident)
                        .ok_or_else(|| EvalError::UnknownVertex { name: node.ident.clone() })?;

                    match (entry, node.call) {
                        (OperationValue::Constant(n), false) => {
                            trace.push_str(&format_number(*n));
                            values.push(*n);
                        }
                        (OperationValue::Operator(sym), true) => {
                            trace.push_str(sym.as_str());
                            trace.push('(');
                            stack.push(Step::Exit(id));
                            for (i, arg) in node.args.iter().enumerate().rev() {
                                stack.push(Step::Enter(*arg));
                                if i > 0 {
                                    stack.push(Step::Separator);
                                }
                            }
                        }
                        (OperationValue::Constant(_), true) => {
                            return Err(EvalError::TypeMismatch {
                                name: node.ident.clone(),
                                kind: Mismatch::ConstantCalled,
                            });
                        }
                        (OperationValue::Operator(_), false) => {
                            return Err(EvalError::TypeMismatch {
                                name: node.ident.clone(),
                                kind: Mismatch::OperatorBare,
                            });
                        }
                    }
                }
                Step::Exit(id) => {
                    let node = tree.node(id);
                    let Some(OperationValue::Operator(sym)) = self.table.get(&node.ident) else {
                        // Entry already checked this node.
                        continue;
                    };
                    let start = values.len().saturating_sub(node.args.len());
                    let result = apply(&node.ident, sym, &values[start..])?;
                    values.truncate(start);
                    values.push(result);
                    trace.push_str(") = ");
                    trace.push_str(&format_number(result));
                }
            }
        }

        let value = values.pop().unwrap_or(f64::NAN);
        Ok(Evaluation { expression: tree.source().to_string(), trace, value })
    }
}

/// Combines evaluated arguments according to `sym`.
fn apply(name: &str, sym: &Symbol, args: &[f64]) -> Result<f64, EvalError> {
    let arity = |expected: usize| EvalError::Arity {
        name: name.to_string(),
        symbol: sym.to_string(),
        expected,
        actual: args.len(),
    };

    match sym {
        Symbol::Sum if args.is_empty() => Err(arity(1)),
        Symbol::Sum => Ok(args.iter().sum()),
        Symbol::Product if args.is_empty() => Err(arity(1)),
        Symbol::Product => Ok(args.iter().product()),
        Symbol::Exp if args.len() != 1 => Err(arity(1)),
        Symbol::Exp => Ok(args[0].exp()),
        Symbol::Unsupported(s) => Err(EvalError::UnknownOperator {
            name: name.to_string(),
            symbol: s.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn table(entries: &[(&str, &str)]) -> OperationTable {
        entries
            .iter()
            .map(|(k, v)| (*k, OperationValue::parse(v)))
            .collect()
    }

    fn eval(expr: &str, entries: &[(&str, &str)]) -> Result<Evaluation, EvalError> {
        Evaluator::new(&table(entries)).evaluate_str(expr)
    }

    #[test]
    fn test_sum_trace() {
        let result = eval("root(v2, v1)", &[("root", "+"), ("v1", "23"), ("v2", "13")]).unwrap();
        assert_eq!(result.value, 36.0);
        assert_eq!(result.trace, "+(13, 23) = 36");
        assert_eq!(result.render(), "Result for root(v2, v1): +(13, 23) = 36");
    }

    #[test]
    fn test_nested_trace() {
        let entries = [("v5", "*"), ("v4", "+"), ("v1", "2"), ("v2", "3"), ("v3", "4")];
        let result = eval("v5(v3, v4(v1, v2))", &entries).unwrap();
        assert_eq!(result.value, 20.0);
        assert_eq!(result.trace, "*(4, +(2, 3) = 5) = 20");
    }

    #[test]
    fn test_exp() {
        let result = eval("v2(v1)", &[("v2", "exp"), ("v1", "0")]).unwrap();
        assert_eq!(result.value, 1.0);
        assert_eq!(result.trace, "exp(0) = 1");

        let result = eval("v2(v1)", &[("v2", "exp"), ("v1", "1")]).unwrap();
        assert_eq!(result.trace, "exp(1) = 2.718281828459045");
    }

    #[test]
    fn test_bare_constant_root() {
        let result = eval("v7", &[("v7", "5")]).unwrap();
        assert_eq!(result.value, 5.0);
        assert_eq!(result.trace, "5");
    }

    #[test]
    fn test_single_argument_sum_and_product() {
        assert_eq!(eval("v2(v1)", &[("v2", "+"), ("v1", "4")]).unwrap().value, 4.0);
        assert_eq!(eval("v2(v1)", &[("v2", "*"), ("v1", "4")]).unwrap().value, 4.0);
    }

    #[test]
    fn test_exp_with_two_arguments() {
        let err = eval("v3(v1, v2)", &[("v3", "exp"), ("v1", "1"), ("v2", "2")]).unwrap_err();
        assert_eq!(
            err,
            EvalError::Arity { name: "v3".into(), symbol: "exp".into(), expected: 1, actual: 2 }
        );
    }

    #[rstest]
    #[case("v1", &[])]
    #[case("v2(v1)", &[("v2", "+")])]
    #[case("v2(v1)", &[("v1", "3")])]
    fn test_unknown_vertex(#[case] expr: &str, #[case] entries: &[(&str, &str)]) {
        assert!(matches!(eval(expr, entries), Err(EvalError::UnknownVertex { .. })));
    }

    #[test]
    fn test_unknown_operator() {
        let err = eval("v2(v1)", &[("v2", "-"), ("v1", "3")]).unwrap_err();
        assert_eq!(err.to_string(), "Unknown operation '-' at v2");
    }

    #[test]
    fn test_type_mismatch() {
        let err = eval("v2(v1)", &[("v2", "3"), ("v1", "3")]).unwrap_err();
        assert_eq!(err, EvalError::TypeMismatch { name: "v2".into(), kind: Mismatch::ConstantCalled });

        let err = eval("v2(v1)", &[("v2", "+"), ("v1", "*")]).unwrap_err();
        assert_eq!(err, EvalError::TypeMismatch { name: "v1".into(), kind: Mismatch::OperatorBare });
    }

    #[test]
    fn test_outer_error_reported_first() {
        // The root is checked before its (also broken) argument.
        let err = eval("v2(v1)", &[("v2", "7")]).unwrap_err();
        assert!(matches!(err, EvalError::TypeMismatch { .. }));
    }

    #[test]
    fn test_syntax_error_propagates() {
        assert!(matches!(eval("v2(v1", &[]), Err(EvalError::Syntax { .. })));
    }

    #[test]
    fn test_decimal_table_values_are_not_constants() {
        let err = eval("v3(v1, v2)", &[("v3", "+"), ("v1", "0.5"), ("v2", "1")]).unwrap_err();
        assert_eq!(err, EvalError::TypeMismatch { name: "v1".into(), kind: Mismatch::OperatorBare });

        let err = eval("v2(v1)", &[("v2", "2.5"), ("v1", "1")]).unwrap_err();
        assert_eq!(err, EvalError::UnknownOperator { name: "v2".into(), symbol: "2.5".into() });
    }

    #[rstest]
    #[case(36.0, "36")]
    #[case(-2.0, "-2")]
    #[case(0.75, "0.75")]
    #[case(1e20, "100000000000000000000")]
    #[case(f64::INFINITY, "inf")]
    fn test_format_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }

    #[test]
    fn test_deep_chain() {
        let depth = 100_000;
        let text = format!("{}v0{}", "f(".repeat(depth), ")".repeat(depth));
        let result = eval(&text, &[("f", "+"), ("v0", "1")]).unwrap();
        assert_eq!(result.value, 1.0);
        assert!(result.trace.starts_with("+(+(+("));
        assert!(result.trace.ends_with(") = 1) = 1"));
    }
}
