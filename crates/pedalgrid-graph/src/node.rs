use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Interned IRI. Cloning is cheap; equality and hashing use the full text.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Iri(Arc<str>);

impl Iri {
    pub fn new(text: impl Into<String>) -> Self {
        Iri(Arc::from(text.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem path for `file:` IRIs, `None` for everything else.
    pub fn to_path(&self) -> Option<PathBuf> {
        self.0
            .strip_prefix("file://")
            .map(PathBuf::from)
    }
}

impl fmt::Debug for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.0)
    }
}

impl fmt::Display for Iri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A triple subject: a named resource or a document-scoped blank node.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Subject {
    Iri(Iri),
    Blank(u64),
}

impl Subject {
    /// IRI text of the subject, empty for blank nodes.
    pub fn as_uri_string(&self) -> String {
        match self {
            Subject::Iri(iri) => iri.as_str().to_string(),
            Subject::Blank(_) => String::new(),
        }
    }

    pub fn to_path(&self) -> Option<PathBuf> {
        match self {
            Subject::Iri(iri) => iri.to_path(),
            Subject::Blank(_) => None,
        }
    }

    pub fn to_node(&self) -> Node {
        match self {
            Subject::Iri(iri) => Node::Iri(iri.clone()),
            Subject::Blank(id) => Node::Blank(*id),
        }
    }
}

/// A graph value. Literals keep the type they were written with, which is
/// what lets the coercion layer tell an integer literal `3` apart from the
/// float literal `3.0`.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Iri(Iri),
    Blank(u64),
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl Node {
    /// Text rendering: IRI text for references, literal text otherwise.
    pub fn as_string(&self) -> String {
        match self {
            Node::Iri(iri) => iri.as_str().to_string(),
            Node::Blank(id) => format!("_:b{id}"),
            Node::Str(s) => s.clone(),
            Node::Int(i) => i.to_string(),
            Node::Float(f) => f.to_string(),
            Node::Bool(b) => b.to_string(),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Node::Int(i) => Some(*i),
            Node::Float(f) => Some(*f as i64),
            Node::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Node::Int(i) => Some(*i as f64),
            Node::Float(f) => Some(*f),
            Node::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Node::Bool(b) => Some(*b),
            Node::Int(i) => Some(*i != 0),
            _ => None,
        }
    }

    pub fn is_integer_literal(&self) -> bool {
        matches!(self, Node::Int(_))
    }

    pub fn is_float_literal(&self) -> bool {
        matches!(self, Node::Float(_))
    }

    pub fn iri(&self) -> Option<&Iri> {
        match self {
            Node::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// Reinterpret the node as a subject so it can be queried further.
    pub fn to_subject(&self) -> Option<Subject> {
        match self {
            Node::Iri(iri) => Some(Subject::Iri(iri.clone())),
            Node::Blank(id) => Some(Subject::Blank(*id)),
            _ => None,
        }
    }

    pub fn to_path(&self) -> Option<PathBuf> {
        self.iri().and_then(Iri::to_path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn literal_kinds_are_distinguished() {
        assert!(Node::Int(3).is_integer_literal());
        assert!(!Node::Int(3).is_float_literal());
        assert!(Node::Float(3.0).is_float_literal());
        assert!(!Node::Str("3".into()).is_integer_literal());
    }

    #[test]
    fn file_iri_resolves_to_path() {
        let iri = Iri::new("file:///usr/lib/pedalgrid/bundles/amp/amp.so");
        assert_eq!(
            iri.to_path(),
            Some(PathBuf::from("/usr/lib/pedalgrid/bundles/amp/amp.so"))
        );
        assert_eq!(Iri::new("http://example.org/amp").to_path(), None);
    }

    #[test]
    fn interned_iri_equality_is_textual() {
        let a = Iri::new("http://example.org/x");
        let b = Iri::new(String::from("http://example.org/x"));
        assert_eq!(a, b);
        assert_eq!(a.clone(), a);
    }
}
