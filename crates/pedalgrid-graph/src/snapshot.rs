use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document;
use crate::error::GraphError;
use crate::node::{Iri, Node, Subject};
use crate::vocab::vocab;

/// File name suffix of graph documents inside a bundle.
pub const DOCUMENT_SUFFIX: &str = ".graph.json";

#[derive(Debug, Clone)]
struct Triple {
    subject: Subject,
    predicate: Iri,
    object: Node,
}

/// A fully-loaded, read-only view of one or more bundles.
///
/// Triples keep declaration order; `find` returns values in the order the
/// documents declared them, which is what gives ports their indices.
/// Extraction never mutates a snapshot, so one snapshot can back any number
/// of descriptor extractions.
#[derive(Debug, Default)]
pub struct GraphSnapshot {
    triples: Vec<Triple>,
    by_subject: HashMap<Subject, Vec<usize>>,
    subject_docs: HashMap<Subject, Vec<PathBuf>>,
    subject_bundle: HashMap<Subject, PathBuf>,
    bundle_docs: HashMap<PathBuf, Vec<PathBuf>>,
    plugins: Vec<Subject>,
    next_blank: u64,
}

impl GraphSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads every graph document in `path`. The directory must exist; an
    /// empty bundle loads nothing. Returns the canonical bundle directory.
    pub fn load_bundle(&mut self, path: &Path) -> Result<PathBuf, GraphError> {
        let bundle = fs::canonicalize(path)
            .map_err(|_| GraphError::BundleNotFound(path.to_path_buf()))?;
        if !bundle.is_dir() {
            return Err(GraphError::BundleNotFound(path.to_path_buf()));
        }
        let mut documents = Vec::new();
        for entry in fs::read_dir(&bundle)? {
            let entry = entry?;
            let doc = entry.path();
            let is_document = doc.is_file()
                && doc
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.ends_with(DOCUMENT_SUFFIX));
            if is_document {
                documents.push(doc);
            }
        }
        documents.sort();
        for doc in &documents {
            document::load_into(self, doc, &bundle)?;
        }
        log::debug!(
            "bundle {} provided {} documents",
            bundle.display(),
            documents.len()
        );
        self.bundle_docs.insert(bundle.clone(), documents);
        Ok(bundle)
    }

    /// Appends one triple. Loading order is preserved.
    pub fn insert(&mut self, subject: Subject, predicate: Iri, object: Node) {
        if predicate == vocab().rdf.type_ {
            if let Node::Iri(iri) = &object {
                if *iri == vocab().lv2.plugin && !self.plugins.contains(&subject) {
                    self.plugins.push(subject.clone());
                }
            }
        }
        let index = self.triples.len();
        self.by_subject
            .entry(subject.clone())
            .or_default()
            .push(index);
        self.triples.push(Triple {
            subject,
            predicate,
            object,
        });
    }

    /// Remembers which document (and bundle) declared `subject`.
    pub fn record_origin(&mut self, subject: &Subject, document: &Path, bundle: &Path) {
        let docs = self.subject_docs.entry(subject.clone()).or_default();
        if !docs.iter().any(|d| d == document) {
            docs.push(document.to_path_buf());
        }
        self.subject_bundle
            .entry(subject.clone())
            .or_insert_with(|| bundle.to_path_buf());
    }

    pub fn fresh_blank(&mut self) -> u64 {
        self.next_blank += 1;
        self.next_blank
    }

    /// First value of `predicate` on `subject`, if any.
    pub fn get(&self, subject: &Subject, predicate: &Iri) -> Option<Node> {
        self.find(subject, predicate).into_iter().next()
    }

    /// All values of `predicate` on `subject` in declaration order.
    pub fn find(&self, subject: &Subject, predicate: &Iri) -> Vec<Node> {
        let Some(indices) = self.by_subject.get(subject) else {
            return Vec::new();
        };
        indices
            .iter()
            .filter(|&&i| self.triples[i].predicate == *predicate)
            .map(|&i| self.triples[i].object.clone())
            .collect()
    }

    /// `find` with every value rendered to text.
    pub fn strings(&self, subject: &Subject, predicate: &Iri) -> Vec<String> {
        self.find(subject, predicate)
            .iter()
            .map(Node::as_string)
            .collect()
    }

    /// Subjects carrying `predicate` with exactly `object`, in declaration
    /// order, deduplicated.
    pub fn subjects_with(&self, predicate: &Iri, object: &Node) -> Vec<Subject> {
        let mut subjects = Vec::new();
        for triple in &self.triples {
            if triple.predicate == *predicate
                && triple.object == *object
                && !subjects.contains(&triple.subject)
            {
                subjects.push(triple.subject.clone());
            }
        }
        subjects
    }

    /// Every subject typed as a plugin, in discovery order.
    pub fn plugins(&self) -> &[Subject] {
        &self.plugins
    }

    /// Documents that mention `subject`, in loading order.
    pub fn documents_of(&self, subject: &Subject) -> &[PathBuf] {
        self.subject_docs
            .get(subject)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Bundle directory of the first document declaring `subject`.
    pub fn bundle_of(&self, subject: &Subject) -> Option<&Path> {
        self.subject_bundle.get(subject).map(PathBuf::as_path)
    }

    /// Number of graph documents a loaded bundle contributed.
    pub fn documents_in_bundle(&self, bundle: &Path) -> usize {
        self.bundle_docs.get(bundle).map_or(0, Vec::len)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;

    fn write_document(bundle: &Path, name: &str, body: &str) {
        fs::create_dir_all(bundle).unwrap();
        fs::write(bundle.join(name), body).unwrap();
    }

    #[test]
    fn missing_bundle_is_an_error() {
        let mut snapshot = GraphSnapshot::new();
        let err = snapshot
            .load_bundle(Path::new("/nonexistent/bundle"))
            .unwrap_err();
        assert!(matches!(err, GraphError::BundleNotFound(_)));
    }

    #[test]
    fn load_bundle_discovers_plugins_and_preserves_order() {
        let dir = tempdir().unwrap();
        let bundle = dir.path().join("amp");
        write_document(
            &bundle,
            "amp.graph.json",
            r#"{
                "resources": [
                    {
                        "id": "http://example.org/amp",
                        "properties": {
                            "rdf:type": [{"uri": "lv2:Plugin"}],
                            "doap:name": ["Amp"],
                            "lv2:port": [{"uri": "_:p0"}, {"uri": "_:p1"}]
                        }
                    },
                    {"id": "_:p0", "properties": {"lv2:symbol": ["in"]}},
                    {"id": "_:p1", "properties": {"lv2:symbol": ["out"]}}
                ]
            }"#,
        );
        let mut snapshot = GraphSnapshot::new();
        let loaded = snapshot.load_bundle(&bundle).unwrap();
        assert_eq!(snapshot.documents_in_bundle(&loaded), 1);
        assert_eq!(snapshot.plugins().len(), 1);
        let plugin = snapshot.plugins()[0].clone();
        assert_eq!(plugin.as_uri_string(), "http://example.org/amp");
        assert_eq!(snapshot.bundle_of(&plugin), Some(loaded.as_path()));

        let ports = snapshot.find(&plugin, &vocab().lv2.port);
        assert_eq!(ports.len(), 2);
        let symbols: Vec<String> = ports
            .iter()
            .map(|p| {
                let subject = p.to_subject().unwrap();
                snapshot
                    .get(&subject, &vocab().lv2.symbol)
                    .unwrap()
                    .as_string()
            })
            .collect();
        assert_eq!(symbols, vec!["in".to_string(), "out".to_string()]);
    }

    #[test]
    fn bare_references_resolve_against_the_bundle() {
        let dir = tempdir().unwrap();
        let bundle = dir.path().join("board");
        write_document(
            &bundle,
            "board.graph.json",
            r#"{
                "resources": [
                    {
                        "id": "http://example.org/board",
                        "properties": {"lv2:port": [{"uri": "gain/out"}]}
                    }
                ]
            }"#,
        );
        let mut snapshot = GraphSnapshot::new();
        let loaded = snapshot.load_bundle(&bundle).unwrap();
        let board = Subject::Iri(Iri::new("http://example.org/board"));
        let port = snapshot.get(&board, &vocab().lv2.port).unwrap();
        assert_eq!(
            port.as_string(),
            format!("file://{}/gain/out", loaded.display())
        );
    }

    #[test]
    fn typed_literals_keep_their_kind() {
        let dir = tempdir().unwrap();
        let bundle = dir.path().join("lit");
        write_document(
            &bundle,
            "lit.graph.json",
            r#"{
                "resources": [
                    {
                        "id": "http://example.org/x",
                        "properties": {
                            "lv2:minimum": [{"float": 0.0}],
                            "lv2:maximum": [10],
                            "lv2:default": [2.5]
                        }
                    }
                ]
            }"#,
        );
        let mut snapshot = GraphSnapshot::new();
        snapshot.load_bundle(&bundle).unwrap();
        let subject = Subject::Iri(Iri::new("http://example.org/x"));
        assert!(snapshot
            .get(&subject, &vocab().lv2.minimum)
            .unwrap()
            .is_float_literal());
        assert!(snapshot
            .get(&subject, &vocab().lv2.maximum)
            .unwrap()
            .is_integer_literal());
        assert!(snapshot
            .get(&subject, &vocab().lv2.default)
            .unwrap()
            .is_float_literal());
    }

    #[test]
    fn subjects_with_matches_objects() {
        let mut snapshot = GraphSnapshot::new();
        let plugin = Subject::Iri(Iri::new("http://example.org/amp"));
        let preset = Subject::Iri(Iri::new("http://example.org/amp#clean"));
        snapshot.insert(
            preset.clone(),
            vocab().lv2.applies_to.clone(),
            plugin.to_node(),
        );
        assert_eq!(
            snapshot.subjects_with(&vocab().lv2.applies_to, &plugin.to_node()),
            vec![preset]
        );
    }
}
