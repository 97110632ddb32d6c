//! VOWL JSON layout of an [`OntologyGraph`].
//!
//! Ids are rendered as strings and optional attributes are omitted rather
//! than serialized as `null`, which is what VOWL renderers expect.

use serde::Serialize;

use super::domain::{ElementId, Label, OntologyGraph, RelationEdge, ResourceNode};
use crate::ontology::vocab::rdfs;

const COMMENT: &str = "Created with rdf2vowl";

/// Serializable VOWL document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VowlDocument {
    #[serde(rename = "_comment")]
    pub comment: String,
    pub header: Header,
    pub namespace: Vec<String>,
    pub metrics: Metrics,
    pub class: Vec<TypedId>,
    pub class_attribute: Vec<ClassAttribute>,
    pub property: Vec<TypedId>,
    pub property_attribute: Vec<PropertyAttribute>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub base_iris: Vec<String>,
    pub iri: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub class_count: usize,
    pub object_property_count: usize,
    /// Datatype properties are not converted.
    pub datatype_property_count: usize,
    pub individual_count: usize,
}

/// Compact `(id, type)` entry of the `class` and `property` tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedId {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Language-tagged label: `{"IRI-based": ...}` or `{"undefined": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LabelValue {
    #[serde(rename = "IRI-based")]
    IriBased(String),
    #[serde(rename = "undefined")]
    Undefined(String),
}

impl From<&Label> for LabelValue {
    fn from(label: &Label) -> Self {
        match label {
            Label::IriBased(text) => Self::IriBased(text.clone()),
            Label::Undefined(text) => Self::Undefined(text.clone()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassAttribute {
    pub id: String,
    pub iri: String,
    pub label: LabelValue,
    /// Always 0; membership is carried by `rdfs:type` edges.
    pub instances: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub super_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sub_classes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub equivalent: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAttribute {
    pub id: String,
    pub domain: String,
    pub range: String,
    pub attributes: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_iri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<LabelValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inverse: Option<String>,
}

fn ids(values: &[ElementId]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

fn class_attribute(node: &ResourceNode) -> ClassAttribute {
    let class_only = |values: &[ElementId]| {
        if node.kind.is_class() {
            ids(values)
        } else {
            Vec::new()
        }
    };
    ClassAttribute {
        id: node.id.to_string(),
        iri: node.iri.clone(),
        label: LabelValue::from(&node.label),
        instances: 0,
        super_classes: class_only(&node.super_ids),
        sub_classes: class_only(&node.sub_ids),
        equivalent: class_only(&node.equivalent_ids),
    }
}

fn property_attribute(
    edge: &RelationEdge,
    domain: ElementId,
    range: ElementId,
    base_iri: &str,
) -> PropertyAttribute {
    PropertyAttribute {
        id: edge.id.to_string(),
        domain: domain.to_string(),
        range: range.to_string(),
        attributes: edge
            .attributes
            .iter()
            .map(|attribute| attribute.as_str().to_owned())
            .collect(),
        iri: edge.iri.clone(),
        base_iri: edge.iri.as_ref().map(|_| base_iri.to_owned()),
        label: edge.label.as_ref().map(LabelValue::from),
        inverse: edge.inverse.map(|id| id.to_string()),
    }
}

impl From<&OntologyGraph> for VowlDocument {
    fn from(graph: &OntologyGraph) -> Self {
        let root = graph.root_iri.as_str();
        let metrics = graph.metrics();

        let mut property = Vec::new();
        let mut property_attributes = Vec::new();
        for edge in &graph.edges {
            let Some((domain, range)) = edge.endpoints() else {
                continue;
            };
            property.push(TypedId {
                id: edge.id.to_string(),
                kind: edge.kind.vowl_type().to_owned(),
            });
            property_attributes.push(property_attribute(edge, domain, range, root));
        }

        Self {
            comment: COMMENT.to_owned(),
            header: Header {
                base_iris: vec![rdfs::NAMESPACE.to_owned(), root.to_owned()],
                iri: root.to_owned(),
            },
            namespace: Vec::new(),
            metrics: Metrics {
                class_count: metrics.class_count,
                object_property_count: metrics.object_property_count,
                datatype_property_count: 0,
                individual_count: metrics.individual_count,
            },
            class: graph
                .nodes
                .iter()
                .map(|node| TypedId {
                    id: node.id.to_string(),
                    kind: node.kind.vowl_type().to_owned(),
                })
                .collect(),
            class_attribute: graph.nodes.iter().map(class_attribute).collect(),
            property,
            property_attribute: property_attributes,
        }
    }
}

impl VowlDocument {
    /// Renders the document as JSON text.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::graph::domain::{EdgeAttribute, EdgeKind, NodeKind};
    use crate::ontology::Iri;

    fn node(id: ElementId, iri: &str, kind: NodeKind, label: Label) -> ResourceNode {
        ResourceNode {
            id,
            iri: iri.to_owned(),
            kind,
            label,
            super_ids: Vec::new(),
            sub_ids: Vec::new(),
            equivalent_ids: Vec::new(),
            member_iris: Vec::new(),
        }
    }

    #[test]
    fn unresolved_edges_are_counted_but_not_emitted() {
        let mut individual = node(
            1,
            "http://example.org/onto#i",
            NodeKind::Individual,
            Label::IriBased("i".to_owned()),
        );
        individual.super_ids = vec![0];
        let mut thing = node(
            0,
            "http://www.w3.org/2002/07/owl#Thing",
            NodeKind::SyntheticRoot,
            Label::Undefined("Thing".to_owned()),
        );
        thing.member_iris = vec!["http://example.org/onto#i".to_owned()];
        let graph = OntologyGraph {
            root_iri: Iri::new("http://example.org/onto").expect("root"),
            nodes: vec![thing, individual],
            edges: vec![
                RelationEdge {
                    id: 2,
                    iri: None,
                    kind: EdgeKind::TypeMembership,
                    domain: Some(1),
                    range: Some(0),
                    attributes: vec![EdgeAttribute::Anonymous, EdgeAttribute::Object],
                    label: None,
                    inverse: None,
                },
                RelationEdge {
                    id: 3,
                    iri: None,
                    kind: EdgeKind::Inheritance,
                    domain: None,
                    range: Some(0),
                    attributes: vec![EdgeAttribute::Anonymous, EdgeAttribute::Object],
                    label: None,
                    inverse: None,
                },
            ],
            individual_count: 1,
        };

        let value = serde_json::to_value(VowlDocument::from(&graph)).expect("json");

        assert_eq!(value["metrics"]["objectPropertyCount"], json!(2));
        assert_eq!(value["metrics"]["datatypePropertyCount"], json!(0));
        assert_eq!(value["property"], json!([{ "id": "2", "type": "rdfs:type" }]));
        assert_eq!(
            value["propertyAttribute"],
            json!([{
                "id": "2",
                "domain": "1",
                "range": "0",
                "attributes": ["anonymous", "object"]
            }])
        );
        // Members are reported through edges, never through `instances`.
        assert_eq!(
            value["classAttribute"][0],
            json!({
                "id": "0",
                "iri": "http://www.w3.org/2002/07/owl#Thing",
                "label": { "undefined": "Thing" },
                "instances": 0
            })
        );
        // Hierarchy lists are only rendered for classes.
        assert!(value["classAttribute"][1].get("superClasses").is_none());
        assert_eq!(value["class"][1]["type"], json!("owl:namedIndividual"));
        assert_eq!(
            value["header"]["baseIris"],
            json!([
                "http://www.w3.org/2000/01/rdf-schema",
                "http://example.org/onto"
            ])
        );
    }
}
