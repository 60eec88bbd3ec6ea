//! Prefix expression parsing into a flat arena.
//!
//! Nodes live in a single `Vec` and refer to their arguments by index, so neither
//! parsing, traversal, nor dropping a tree recurses, whatever the nesting depth.

use super::error::EvalError;
use smallvec::SmallVec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprId(u32);

impl ExprId {
    #[inline(always)]
    pub fn index(&self) -> usize { self.0 as usize }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprNode {
    pub ident: String,
    pub args: SmallVec<[ExprId; 4]>,
    /// Written as `ident(...)` rather than a bare `ident`.
    pub call: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExprTree {
    nodes: Vec<ExprNode>,
    source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Ident(&'a str),
    Open,
    Close,
    Comma,
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn lex(text: &str) -> Result<Vec<Token<'_>>, String> {
    let bytes = text.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        match b {
            b'(' => tokens.push(Token::Open),
            b')' => tokens.push(Token::Close),
            b',' => tokens.push(Token::Comma),
            _ if b.is_ascii_whitespace() => {}
            _ if is_ident_byte(b) => {
                let start = i;
                while i < bytes.len() && is_ident_byte(bytes[i]) {
                    i += 1;
                }
                tokens.push(Token::Ident(&text[start..i]));
                continue;
            }
            _ => {
                let ch = text[i..].chars().next().unwrap_or('?');
                return Err(format!("unexpected character '{}' at position {}", ch, i + 1));
            }
        }
        i += 1;
    }
    Ok(tokens)
}

impl ExprTree {
    /// Parses `ident` or `ident(expr, expr, ...)`.
    ///
    /// Commas split only the innermost open argument list. Empty input, a missing
    /// identifier, an empty argument, unbalanced parentheses, and trailing text are
    /// all `EvalError::Syntax`.
    pub fn parse(text: &str) -> Result<Self, EvalError> {
        let source = text.trim();
        let syntax = |reason: String| EvalError::Syntax { expr: source.to_string(), reason };

        let tokens = lex(source).map_err(syntax)?;
        let mut tokens = tokens.into_iter().peekable();
        let mut nodes: Vec<ExprNode> = Vec::new();
        let mut open: Vec<ExprId> = Vec::new();

        loop {
            // 1. An expression must start here.
            let ident = match tokens.next() {
                Some(Token::Ident(name)) => name,
                Some(Token::Close) | Some(Token::Comma) if !open.is_empty() => {
                    return Err(syntax("empty argument".into()));
                }
                Some(Token::Close) => return Err(syntax("unbalanced parentheses: unexpected ')'".into())),
                Some(_) => return Err(syntax("missing identifier".into())),
                None if open.is_empty() => return Err(syntax("empty expression".into())),
                None => return Err(syntax("unbalanced parentheses: missing ')'".into())),
            };

            let id = ExprId(nodes.len() as u32);
            nodes.push(ExprNode { ident: ident.to_string(), args: SmallVec::new(), call: false });
            if let Some(parent) = open.last() {
                nodes[parent.index()].args.push(id);
            }

            if tokens.peek() == Some(&Token::Open) {
                tokens.next();
                nodes[id.index()].call = true;
                open.push(id);
                continue;
            }

            // 2. The expression is complete; close as many argument lists as the
            //    input closes, until a comma asks for the next argument.
            loop {
                if open.is_empty() {
                    return match tokens.next() {
                        None => Ok(Self { nodes, source: source.to_string() }),
                        Some(Token::Close) => Err(syntax("unbalanced parentheses: unexpected ')'".into())),
                        Some(_) => Err(syntax("unexpected text after expression".into())),
                    };
                }
                match tokens.next() {
                    Some(Token::Comma) => break,
                    Some(Token::Close) => {
                        open.pop();
                    }
                    Some(_) => return Err(syntax("expected ',' or ')'".into())),
                    None => return Err(syntax("unbalanced parentheses: missing ')'".into())),
                }
            }
        }
    }

    /// The outermost node. Parsing always creates it first.
    pub fn root(&self) -> ExprId { ExprId(0) }

    pub fn node(&self, id: ExprId) -> &ExprNode { &self.nodes[id.index()] }

    pub fn len(&self) -> usize { self.nodes.len() }

    pub fn is_empty(&self) -> bool { self.nodes.is_empty() }

    /// The trimmed input text.
    pub fn source(&self) -> &str { &self.source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn idents(tree: &ExprTree, id: ExprId) -> Vec<&str> {
        tree.node(id).args.iter().map(|a| tree.node(*a).ident.as_str()).collect()
    }

    #[test]
    fn test_bare_identifier() {
        let tree = ExprTree::parse("  v1 ").unwrap();
        assert_eq!(tree.len(), 1);
        let root = tree.node(tree.root());
        assert_eq!(root.ident, "v1");
        assert!(!root.call);
        assert_eq!(tree.source(), "v1");
    }

    #[test]
    fn test_nested_arguments_split_at_top_level_only() {
        let tree = ExprTree::parse("v5(v3, v4(v1, v2), v6)").unwrap();
        assert_eq!(idents(&tree, tree.root()), vec!["v3", "v4", "v6"]);
        let v4 = tree.node(tree.root()).args[1];
        assert!(tree.node(v4).call);
        assert_eq!(idents(&tree, v4), vec!["v1", "v2"]);
    }

    #[test]
    fn test_whitespace_is_ignored() {
        let a = ExprTree::parse("v3(v1,v2(v0))").unwrap();
        let b = ExprTree::parse("v3 ( v1 , v2 ( v0 ) )").unwrap();
        assert_eq!(a.nodes, b.nodes);
    }

    #[rstest]
    #[case("", "empty expression")]
    #[case("   ", "empty expression")]
    #[case("(v1)", "missing identifier")]
    #[case("v1()", "empty argument")]
    #[case("v1(v2,)", "empty argument")]
    #[case("v1(,v2)", "empty argument")]
    #[case("v1(v2", "unbalanced parentheses: missing ')'")]
    #[case("v1(v2(v3)", "unbalanced parentheses: missing ')'")]
    #[case("v1(v2))", "unbalanced parentheses: unexpected ')'")]
    #[case("v1 v2", "unexpected text after expression")]
    #[case("v1(v2 v3)", "expected ',' or ')'")]
    #[case("v1 + v2", "unexpected character '+' at position 4")]
    fn test_syntax_errors(#[case] text: &str, #[case] reason: &str) {
        match ExprTree::parse(text) {
            Err(EvalError::Syntax { reason: got, .. }) => assert_eq!(got, reason, "input: {:?}", text),
            other => panic!("expected syntax error for {:?}, got {:?}", text, other),
        }
    }

    #[test]
    fn test_deep_nesting() {
        let depth = 100_000;
        let text = format!("{}v0{}", "f(".repeat(depth), ")".repeat(depth));
        let tree = ExprTree::parse(&text).unwrap();
        assert_eq!(tree.len(), depth + 1);
    }
}
