//! In-memory triple collection backing the ontology queries.
//!
//! Statements are kept in parse order so that every enumeration performed on
//! top of the store is deterministic for a given document.

use std::collections::HashSet;
use std::sync::OnceLock;

use oxrdf::{Term, Triple};
use oxttl::TurtleParser;
use regex::Regex;
use thiserror::Error;

use super::value_objects::Iri;

/// A term as it appears in a stored statement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Node {
    Iri(String),
    Blank(String),
    Literal(String),
}

impl Node {
    #[must_use]
    pub fn iri(value: impl Into<String>) -> Self {
        Self::Iri(value.into())
    }

    /// Lexical value: the IRI, the blank node identifier or the literal text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Iri(value) | Self::Blank(value) | Self::Literal(value) => value,
        }
    }

    /// Returns the IRI when the node is a named node.
    #[must_use]
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Self::Iri(value) => Some(value),
            Self::Blank(_) | Self::Literal(_) => None,
        }
    }

    /// Resources are named or blank nodes, i.e. anything but a literal.
    #[must_use]
    pub fn as_resource(&self) -> Option<&str> {
        match self {
            Self::Iri(value) | Self::Blank(value) => Some(value),
            Self::Literal(_) => None,
        }
    }

    fn matches(&self, pattern: Option<&str>) -> bool {
        pattern.map_or(true, |expected| self.as_resource() == Some(expected))
    }
}

impl From<Term> for Node {
    fn from(term: Term) -> Self {
        match term {
            Term::NamedNode(node) => Self::Iri(node.into_string()),
            Term::BlankNode(node) => Self::Blank(node.into_string()),
            Term::Literal(literal) => Self::Literal(literal.value().to_owned()),
            #[allow(unreachable_patterns)]
            other => Self::Literal(other.to_string()),
        }
    }
}

/// A single subject–predicate–object fact.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Statement {
    pub subject: Node,
    pub predicate: String,
    pub object: Node,
}

impl Statement {
    #[must_use]
    pub fn new(subject: Node, predicate: impl Into<String>, object: Node) -> Self {
        Self {
            subject,
            predicate: predicate.into(),
            object,
        }
    }

    /// Whether the named entity appears as subject or object.
    #[must_use]
    pub fn touches(&self, entity: &str) -> bool {
        self.subject.as_resource() == Some(entity) || self.object.as_resource() == Some(entity)
    }
}

impl From<Triple> for Statement {
    fn from(triple: Triple) -> Self {
        Self {
            subject: Node::from(Term::from(triple.subject)),
            predicate: triple.predicate.into_string(),
            object: Node::from(triple.object),
        }
    }
}

/// Errors raised while loading statements into the store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The document could not be read as Turtle.
    #[error("invalid Turtle document: {message}")]
    Syntax { message: String },
    /// The parser refused the base IRI.
    #[error("invalid base IRI `{base}`: {message}")]
    InvalidBase { base: String, message: String },
}

/// Insertion ordered, duplicate free statement collection.
#[derive(Clone, Debug, Default)]
pub struct TripleStore {
    statements: Vec<Statement>,
    index: HashSet<Statement>,
}

impl TripleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a Turtle document, resolving relative IRIs against `base`.
    pub fn parse_turtle(text: &str, base: &Iri) -> Result<Self, StoreError> {
        let parser = TurtleParser::new()
            .with_base_iri(base.as_str())
            .map_err(|err| StoreError::InvalidBase {
                base: base.to_string(),
                message: err.to_string(),
            })?;

        let mut store = Self::new();
        for triple in parser.for_slice(text.as_bytes()) {
            let triple = triple.map_err(|err| StoreError::Syntax {
                message: err.to_string(),
            })?;
            store.insert(Statement::from(triple));
        }
        tracing::debug!(statements = store.len(), base = %base, "turtle_document_loaded");
        Ok(store)
    }

    /// Adds a statement, returning `false` when it was already present.
    pub fn insert(&mut self, statement: Statement) -> bool {
        if self.index.insert(statement.clone()) {
            self.statements.push(statement);
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Statement> {
        self.statements.iter()
    }

    /// Statements matching the pattern; `None` acts as a wildcard.
    ///
    /// Subject and object patterns only ever match resources, never literals.
    pub fn matching<'a, 'b>(
        &'a self,
        subject: Option<&'b str>,
        predicate: Option<&'b str>,
        object: Option<&'b str>,
    ) -> impl Iterator<Item = &'a Statement> + 'b
    where
        'a: 'b,
    {
        self.statements.iter().filter(move |statement| {
            statement.subject.matches(subject)
                && predicate.map_or(true, |expected| statement.predicate == expected)
                && statement.object.matches(object)
        })
    }

    #[must_use]
    pub fn holds(&self, subject: &str, predicate: &str, object: &str) -> bool {
        self.matching(Some(subject), Some(predicate), Some(object))
            .next()
            .is_some()
    }

    /// Object of the first statement matching `subject predicate ?`.
    #[must_use]
    pub fn first_object(&self, subject: &str, predicate: &str) -> Option<&Node> {
        self.matching(Some(subject), Some(predicate), None)
            .next()
            .map(|statement| &statement.object)
    }

    /// Drops every statement mentioning one of `entities` as subject or object.
    pub fn remove_touching(&mut self, entities: &HashSet<String>) -> usize {
        let before = self.statements.len();
        let index = &mut self.index;
        self.statements.retain(|statement| {
            let doomed = statement
                .subject
                .as_resource()
                .is_some_and(|subject| entities.contains(subject))
                || statement
                    .object
                    .as_resource()
                    .is_some_and(|object| entities.contains(object));
            if doomed {
                index.remove(statement);
            }
            !doomed
        });
        before - self.statements.len()
    }
}

impl FromIterator<Statement> for TripleStore {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        let mut store = Self::new();
        store.extend(iter);
        store
    }
}

impl Extend<Statement> for TripleStore {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        for statement in iter {
            self.insert(statement);
        }
    }
}

fn root_iri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        #[allow(clippy::unwrap_used)]
        Regex::new(r"(?m)^ *<([^>]+)>").unwrap()
    })
}

/// Finds the ontology IRI: the first absolute `<IRI>` opening a line.
#[must_use]
pub fn detect_root_iri(text: &str) -> Option<Iri> {
    root_iri_pattern()
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .find_map(|candidate| Iri::new(candidate.as_str()).ok())
}
