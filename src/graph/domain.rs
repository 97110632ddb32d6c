use crate::ontology::Iri;

/// Identifier shared by nodes and edges of one [`OntologyGraph`].
pub type ElementId = usize;

/// The complete graph produced from one ontology.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyGraph {
    pub root_iri: Iri,
    pub nodes: Vec<ResourceNode>,
    pub edges: Vec<RelationEdge>,
    /// Number of named individuals found in the ontology.
    pub individual_count: usize,
}

impl OntologyGraph {
    /// Looks a node up by IRI and kind.
    #[must_use]
    pub fn node_by_iri(&self, iri: &str, kind: NodeKind) -> Option<&ResourceNode> {
        self.nodes
            .iter()
            .find(|node| node.kind == kind && node.iri == iri)
    }

    /// Edges whose domain and range both point at a node.
    pub fn resolved_edges(&self) -> impl Iterator<Item = &RelationEdge> {
        self.edges.iter().filter(|edge| edge.endpoints().is_some())
    }

    #[must_use]
    pub fn metrics(&self) -> GraphMetrics {
        GraphMetrics {
            class_count: self.nodes.len(),
            object_property_count: self.edges.len(),
            individual_count: self.individual_count,
        }
    }
}

/// Counters reported alongside the graph.
///
/// `object_property_count` includes edges whose endpoints never resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphMetrics {
    pub class_count: usize,
    pub object_property_count: usize,
    pub individual_count: usize,
}

/// Categorises a [`ResourceNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Class,
    Individual,
    /// `owl:Thing`, always present.
    SyntheticRoot,
}

impl NodeKind {
    /// VOWL type string.
    #[must_use]
    pub fn vowl_type(self) -> &'static str {
        match self {
            Self::Class | Self::SyntheticRoot => "owl:Class",
            Self::Individual => "owl:namedIndividual",
        }
    }

    #[must_use]
    pub fn is_class(self) -> bool {
        matches!(self, Self::Class | Self::SyntheticRoot)
    }
}

/// Display label of an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Label {
    /// Derived from the IRI relative to the ontology root.
    IriBased(String),
    /// Label with no language information; used for the synthetic root.
    Undefined(String),
}

/// A class or an individual.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceNode {
    pub id: ElementId,
    pub iri: String,
    pub kind: NodeKind,
    pub label: Label,
    pub super_ids: Vec<ElementId>,
    pub sub_ids: Vec<ElementId>,
    pub equivalent_ids: Vec<ElementId>,
    /// Individuals typed to this class.
    pub member_iris: Vec<String>,
}

/// Describes the semantics of a [`RelationEdge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeKind {
    ObjectProperty,
    Inheritance,
    TypeMembership,
}

impl EdgeKind {
    /// VOWL type string.
    #[must_use]
    pub fn vowl_type(self) -> &'static str {
        match self {
            Self::ObjectProperty => "owl:objectProperty",
            Self::Inheritance => "rdfs:SubClassOf",
            Self::TypeMembership => "rdfs:type",
        }
    }
}

/// Tags attached to an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EdgeAttribute {
    Anonymous,
    Object,
    Transitive,
    Symmetric,
}

impl EdgeAttribute {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anonymous => "anonymous",
            Self::Object => "object",
            Self::Transitive => "transitive",
            Self::Symmetric => "symmetric",
        }
    }
}

/// An object property, an assertion between individuals, or a synthesized
/// inheritance/membership relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationEdge {
    pub id: ElementId,
    /// Absent for synthesized edges.
    pub iri: Option<String>,
    pub kind: EdgeKind,
    pub domain: Option<ElementId>,
    pub range: Option<ElementId>,
    pub attributes: Vec<EdgeAttribute>,
    pub label: Option<Label>,
    pub inverse: Option<ElementId>,
}

impl RelationEdge {
    /// Domain and range, if both resolved.
    #[must_use]
    pub fn endpoints(&self) -> Option<(ElementId, ElementId)> {
        self.domain.zip(self.range)
    }
}
