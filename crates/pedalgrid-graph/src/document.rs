//! JSON graph-document parsing.
//!
//! A document lists resources keyed by IRI (or `_:` blank label) with typed
//! property values. References expand as: absolute IRI, blank node, declared
//! or well-known prefix, or bundle-relative `file:` IRI, in that order.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::GraphError;
use crate::node::{Iri, Node, Subject};
use crate::snapshot::GraphSnapshot;
use crate::vocab::well_known_prefixes;

#[derive(Debug, Deserialize)]
struct RawDocument {
    #[serde(default)]
    prefixes: BTreeMap<String, String>,
    #[serde(default)]
    resources: Vec<RawResource>,
}

#[derive(Debug, Deserialize)]
struct RawResource {
    id: String,
    #[serde(default)]
    properties: BTreeMap<String, Vec<Value>>,
}

enum Reference {
    Iri(Iri),
    Blank(String),
}

struct DocumentScope<'a> {
    prefixes: BTreeMap<String, String>,
    bundle: &'a Path,
    path: &'a Path,
}

impl DocumentScope<'_> {
    fn expand(&self, reference: &str) -> Result<Reference, GraphError> {
        if reference.contains("://") {
            return Ok(Reference::Iri(Iri::new(reference)));
        }
        if let Some(label) = reference.strip_prefix("_:") {
            return Ok(Reference::Blank(label.to_string()));
        }
        if let Some((prefix, rest)) = reference.split_once(':') {
            if let Some(base) = self.prefixes.get(prefix) {
                return Ok(Reference::Iri(Iri::new(format!("{base}{rest}"))));
            }
            // a scheme-looking prefix (mailto:, urn:) is taken verbatim
            if !prefix.is_empty() && prefix.chars().all(|c| c.is_ascii_alphabetic()) {
                return Ok(Reference::Iri(Iri::new(reference)));
            }
            return Err(GraphError::BadValue {
                path: self.path.to_path_buf(),
                detail: format!("unresolvable reference '{reference}'"),
            });
        }
        // bare names resolve against the bundle directory
        Ok(Reference::Iri(Iri::new(format!(
            "file://{}/{}",
            self.bundle.display(),
            reference
        ))))
    }

    fn predicate(&self, key: &str) -> Result<Iri, GraphError> {
        match self.expand(key)? {
            Reference::Iri(iri) => Ok(iri),
            Reference::Blank(_) => Err(GraphError::BadValue {
                path: self.path.to_path_buf(),
                detail: format!("predicate '{key}' cannot be a blank node"),
            }),
        }
    }
}

/// Blank labels are scoped to the document that declares them.
struct BlankScope(HashMap<String, u64>);

impl BlankScope {
    fn id(&mut self, snapshot: &mut GraphSnapshot, label: &str) -> u64 {
        if let Some(id) = self.0.get(label) {
            return *id;
        }
        let id = snapshot.fresh_blank();
        self.0.insert(label.to_string(), id);
        id
    }
}

fn value_to_node(
    scope: &DocumentScope<'_>,
    blanks: &mut BlankScope,
    snapshot: &mut GraphSnapshot,
    value: &Value,
) -> Result<Node, GraphError> {
    match value {
        Value::String(s) => Ok(Node::Str(s.clone())),
        Value::Bool(b) => Ok(Node::Bool(*b)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Node::Int(i))
            } else {
                Ok(Node::Float(n.as_f64().unwrap_or(0.0)))
            }
        }
        Value::Object(map) => {
            if let Some(Value::String(reference)) = map.get("uri") {
                return match scope.expand(reference)? {
                    Reference::Iri(iri) => Ok(Node::Iri(iri)),
                    Reference::Blank(label) => Ok(Node::Blank(blanks.id(snapshot, &label))),
                };
            }
            if let Some(n) = map.get("int").and_then(Value::as_i64) {
                return Ok(Node::Int(n));
            }
            if let Some(f) = map.get("float").and_then(Value::as_f64) {
                return Ok(Node::Float(f));
            }
            Err(GraphError::BadValue {
                path: scope.path.to_path_buf(),
                detail: format!("unrecognized value object: {value}"),
            })
        }
        other => Err(GraphError::BadValue {
            path: scope.path.to_path_buf(),
            detail: format!("unrecognized value: {other}"),
        }),
    }
}

/// Parses one `*.graph.json` document and inserts its triples.
pub(crate) fn load_into(
    snapshot: &mut GraphSnapshot,
    path: &Path,
    bundle: &Path,
) -> Result<(), GraphError> {
    let raw = fs::read_to_string(path)?;
    let document: RawDocument =
        serde_json::from_str(&raw).map_err(|source| GraphError::Document {
            path: path.to_path_buf(),
            source,
        })?;

    let mut prefixes = well_known_prefixes();
    prefixes.extend(document.prefixes.clone());
    let scope = DocumentScope {
        prefixes,
        bundle,
        path,
    };
    let mut blanks = BlankScope(HashMap::new());

    for resource in &document.resources {
        let subject = match scope.expand(&resource.id)? {
            Reference::Iri(iri) => Subject::Iri(iri),
            Reference::Blank(label) => Subject::Blank(blanks.id(snapshot, &label)),
        };
        snapshot.record_origin(&subject, path, bundle);
        for (key, values) in &resource.properties {
            let predicate = scope.predicate(key)?;
            for value in values {
                let node = value_to_node(&scope, &mut blanks, snapshot, value)?;
                snapshot.insert(subject.clone(), predicate.clone(), node);
            }
        }
    }
    log::debug!(
        "loaded {} resources from {}",
        document.resources.len(),
        path.display()
    );
    Ok(())
}
