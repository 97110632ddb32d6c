use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use oxrdf::NamedNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Value object ensuring that supplied text represents a valid absolute IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Iri {
    value: String,
}

impl Iri {
    /// Validates and constructs a new [`Iri`] value object.
    ///
    /// The constructor rejects relative or malformed identifiers, the same
    /// way the Turtle parser does for named nodes.
    pub fn new(value: impl Into<String>) -> Result<Self, IriError> {
        let value = value.into();
        NamedNode::new(value.as_str()).map_err(|_| IriError::Invalid {
            value: value.clone(),
        })?;
        Ok(Self { value })
    }

    /// Returns the underlying textual representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Expresses `other` as a reference relative to this IRI.
    ///
    /// Same-host paths are kept root-relative (`/other`, not `other`).
    /// Identical IRIs yield an empty reference and IRIs on another host come
    /// back unchanged.
    #[must_use]
    pub fn relative_reference(&self, other: &str) -> String {
        relative_reference(&self.value, other)
    }

    /// Label shown for `other` when this IRI is the ontology root.
    #[must_use]
    pub fn label_for(&self, other: &str) -> String {
        let reference = self.relative_reference(other);
        match reference.strip_prefix(&['#', '/'][..]) {
            Some(local) => local.to_owned(),
            None => reference,
        }
    }
}

impl Display for Iri {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for Iri {
    type Err = IriError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for Iri {
    type Error = IriError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Iri> for String {
    fn from(iri: Iri) -> Self {
        iri.value
    }
}

/// Errors produced when validating an [`Iri`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum IriError {
    /// The provided text could not be parsed as an IRI.
    #[error("invalid IRI: {value}")]
    Invalid { value: String },
}

/// Fragment after the last `#`, or the empty string when there is none.
#[must_use]
pub fn short_name(iri: &str) -> &str {
    iri.rsplit_once('#')
        .map_or("", |(_, fragment)| fragment.trim_end_matches('>'))
}

/// Prefix holding the scheme and authority, e.g. `http://example.org`.
fn origin(iri: &str) -> Option<&str> {
    let scheme_end = iri.find("://")? + 3;
    let path_start = iri[scheme_end..]
        .find('/')
        .map_or(iri.len(), |offset| scheme_end + offset);
    Some(&iri[..path_start])
}

/// Computes the shortest reference that resolves to `target` against `base`.
fn relative_reference(base: &str, target: &str) -> String {
    if base.is_empty() {
        return target.to_owned();
    }
    if base == target {
        return String::new();
    }

    if let Some(rest) = target.strip_prefix(base) {
        if rest.starts_with('#') || base.ends_with(&['#', '/'][..]) {
            return rest.to_owned();
        }
    }

    match (origin(base), origin(target)) {
        (Some(left), Some(right)) if left == right && target.len() > right.len() => {
            target[right.len()..].to_owned()
        }
        _ => target.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::{short_name, Iri};

    fn iri(text: &str) -> Iri {
        Iri::new(text).expect("valid IRI")
    }

    #[test]
    fn accepts_valid_iri() {
        let iri = Iri::new("https://example.org/resource").expect("valid IRI");
        assert_eq!(iri.as_str(), "https://example.org/resource");
    }

    #[test]
    fn rejects_invalid_iri() {
        let err = Iri::new("not an iri").expect_err("invalid IRI");
        assert!(matches!(err, super::IriError::Invalid { value } if value == "not an iri"));
    }

    #[test]
    fn fragment_references_become_labels() {
        let root = iri("http://example.org/onto");
        assert_eq!(root.relative_reference("http://example.org/onto#Pizza"), "#Pizza");
        assert_eq!(root.label_for("http://example.org/onto#Pizza"), "Pizza");
    }

    #[test]
    fn sibling_paths_stay_root_relative() {
        let root = iri("http://example.org/onto");
        assert_eq!(root.relative_reference("http://example.org/other"), "/other");
        assert_eq!(root.label_for("http://example.org/other"), "other");
        let nested = iri("http://example.org/a/b/onto");
        assert_eq!(
            nested.relative_reference("http://example.org/a/c/Thing"),
            "/a/c/Thing"
        );
    }

    #[test]
    fn namespace_style_roots_strip_the_namespace() {
        let root = iri("http://example.org/onto#");
        assert_eq!(root.label_for("http://example.org/onto#Pizza"), "Pizza");
        let slash = iri("http://example.org/onto/");
        assert_eq!(slash.label_for("http://example.org/onto/Pizza"), "Pizza");
    }

    #[test]
    fn foreign_namespaces_stay_absolute() {
        let root = iri("http://example.org/onto");
        assert_eq!(
            root.label_for("http://www.w3.org/2002/07/owl#Thing"),
            "http://www.w3.org/2002/07/owl#Thing"
        );
    }

    #[test]
    fn identical_iri_has_empty_reference() {
        let root = iri("http://example.org/onto");
        assert_eq!(root.relative_reference("http://example.org/onto"), "");
    }

    #[test]
    fn short_name_takes_fragment() {
        assert_eq!(short_name("http://example.org/onto#Pizza"), "Pizza");
        assert_eq!(short_name("http://example.org/onto/Pizza"), "");
    }

    #[test]
    fn deserializes_from_plain_string() {
        let parsed: Iri =
            serde_json::from_str("\"http://example.org/onto#A\"").expect("valid json IRI");
        assert_eq!(parsed, iri("http://example.org/onto#A"));
        assert!(serde_json::from_str::<Iri>("\"relative\"").is_err());
    }
}
