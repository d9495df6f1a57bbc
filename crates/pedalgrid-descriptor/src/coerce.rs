//! Literal-to-value coercion with explicit fallback semantics.

use pedalgrid_graph::Node;

/// What kind of numeric literal a node actually is. Callers branch on the
/// tag; an integer-typed port must react differently to `3` and `3.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Float(f64),
    Malformed,
}

pub fn numeric(node: &Node) -> Numeric {
    match node {
        Node::Int(i) => Numeric::Integer(*i),
        Node::Float(f) => Numeric::Float(*f),
        _ => Numeric::Malformed,
    }
}

/// First element or the given fallback.
pub fn first_or<T: Clone>(items: &[T], fallback: T) -> T {
    items.first().cloned().unwrap_or(fallback)
}

/// Integer value of the first node, or 0.
pub fn int_first_or(nodes: &[Node]) -> i64 {
    nodes.first().and_then(Node::as_int).unwrap_or(0)
}

/// Text of the first node, or the empty string.
pub fn string_first_or(nodes: &[Node]) -> String {
    nodes.first().map(Node::as_string).unwrap_or_default()
}

/// True when the token, after surrounding whitespace and one leading sign,
/// consists only of digits.
pub fn is_integer(token: &str) -> bool {
    let trimmed = token.trim();
    let digits = trimmed
        .strip_prefix(['-', '+'])
        .unwrap_or(trimmed);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}
