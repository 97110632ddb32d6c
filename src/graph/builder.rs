//! Assembles an [`OntologyGraph`] from ontology queries.
//!
//! Assembly is a single forward pass. Every stage receives the
//! [`BuildContext`] produced by the previous one and hands it on, so the id
//! counter and the IRI lookup tables are owned by exactly one conversion.
//!
//! Ids are handed out in a fixed order: object properties, then classes
//! (`owl:Thing` first), then individuals, then synthesized edges.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::domain::{
    EdgeAttribute, EdgeKind, ElementId, Label, NodeKind, OntologyGraph, RelationEdge,
    ResourceNode,
};
use crate::ontology::{vocab::owl, Iri, OntologyQuery, PropertyEdge};

const ROOT_LABEL: &str = "Thing";

/// Property assertion between two resources, tagged with its property.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Assertion {
    property: String,
    edge: PropertyEdge,
}

/// Parent/child pair found while walking the class hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Inheritance {
    parent: String,
    child: String,
}

impl Inheritance {
    /// Direction-free key: `(A, B)` and `(B, A)` collide.
    fn key(&self) -> (&str, &str) {
        let (parent, child) = (self.parent.as_str(), self.child.as_str());
        if parent <= child {
            (parent, child)
        } else {
            (child, parent)
        }
    }
}

/// Id counter, lookup tables and the growing node/edge arena of one assembly.
#[derive(Debug, Default)]
pub struct BuildContext {
    next_id: ElementId,
    properties: HashMap<String, ElementId>,
    classes: HashMap<String, ElementId>,
    individuals: HashMap<String, ElementId>,
    nodes: Vec<ResourceNode>,
    edges: Vec<RelationEdge>,
}

impl BuildContext {
    fn allocate(&mut self) -> ElementId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn class_id(&self, iri: &str) -> Option<ElementId> {
        self.classes.get(iri).copied()
    }

    fn individual_id(&self, iri: &str) -> Option<ElementId> {
        self.individuals.get(iri).copied()
    }

    fn push_edge(&mut self, edge: EdgeDraft) -> ElementId {
        let id = self.allocate();
        self.edges.push(RelationEdge {
            id,
            iri: edge.iri,
            kind: edge.kind,
            domain: edge.domain,
            range: edge.range,
            attributes: edge.attributes,
            label: edge.label,
            inverse: None,
        });
        id
    }

    fn finish(self, root_iri: Iri, individual_count: usize) -> OntologyGraph {
        for edge in self.edges.iter().filter(|edge| edge.endpoints().is_none()) {
            info!(
                id = edge.id,
                kind = edge.kind.vowl_type(),
                iri = edge.iri.as_deref().unwrap_or_default(),
                "dropping edge with unresolved endpoint"
            );
        }

        let graph = OntologyGraph {
            root_iri,
            nodes: self.nodes,
            edges: self.edges,
            individual_count,
        };
        info!(
            nodes = graph.nodes.len(),
            edges = graph.edges.len(),
            resolved_edges = graph.resolved_edges().count(),
            "ontology graph assembled"
        );
        graph
    }
}

/// Edge fields known before an id is assigned.
struct EdgeDraft {
    kind: EdgeKind,
    iri: Option<String>,
    label: Option<Label>,
    attributes: Vec<EdgeAttribute>,
    domain: Option<ElementId>,
    range: Option<ElementId>,
}

impl EdgeDraft {
    fn anonymous(kind: EdgeKind, domain: Option<ElementId>, range: Option<ElementId>) -> Self {
        Self {
            kind,
            iri: None,
            label: None,
            attributes: vec![EdgeAttribute::Anonymous, EdgeAttribute::Object],
            domain,
            range,
        }
    }
}

/// Builds an [`OntologyGraph`] by querying an [`OntologyQuery`] implementation.
pub struct GraphBuilder<'a, Q>
where
    Q: OntologyQuery + ?Sized,
{
    query: &'a Q,
    root: &'a Iri,
    semantic_attributes: bool,
    equivalent_members: bool,
}

impl<'a, Q> GraphBuilder<'a, Q>
where
    Q: OntologyQuery + ?Sized,
{
    /// Creates a builder labelling every element relative to `root`.
    pub fn new(query: &'a Q, root: &'a Iri) -> Self {
        Self {
            query,
            root,
            semantic_attributes: false,
            equivalent_members: false,
        }
    }

    /// Tags transitive/symmetric properties and resolves inverse and
    /// equivalent-class references.
    #[must_use]
    pub fn with_semantic_attributes(mut self, enabled: bool) -> Self {
        self.semantic_attributes = enabled;
        self
    }

    /// Derives class membership from equivalence-aware member discovery
    /// instead of direct `rdf:type` statements.
    #[must_use]
    pub fn with_equivalent_members(mut self, enabled: bool) -> Self {
        self.equivalent_members = enabled;
        self
    }

    /// Materialises the graph by querying the ontology.
    pub fn build(&self) -> OntologyGraph {
        let properties = self.query.list_object_properties();
        let classes = self.class_iris();
        let individuals = self.query.list_individuals();
        let assertions = self.collect_assertions(&properties);

        let context = BuildContext::default();
        let context = self.declare_properties(context, &properties);
        let context = self.declare_classes(context, &classes, &individuals);
        let context = self.declare_individuals(context, &individuals);
        let (context, hierarchy) = self.resolve_hierarchy(context);
        let context = self.resolve_property_endpoints(context);
        let context = Self::synthesize_inheritance(context, &hierarchy);
        let context = Self::synthesize_memberships(context);
        let context = self.synthesize_assertions(context, &assertions);

        context.finish(self.root.clone(), individuals.len())
    }

    fn class_iris(&self) -> Vec<String> {
        let mut classes = vec![owl::THING.to_owned()];
        classes.extend(
            self.query
                .list_classes()
                .into_iter()
                .filter(|class| class != owl::THING),
        );
        classes
    }

    fn collect_assertions(&self, properties: &[String]) -> Vec<Assertion> {
        properties
            .iter()
            .flat_map(|property| {
                self.query
                    .instance_property_edges(property)
                    .into_iter()
                    .map(move |edge| Assertion {
                        property: property.clone(),
                        edge,
                    })
            })
            .collect()
    }

    fn label(&self, iri: &str) -> Label {
        Label::IriBased(self.root.label_for(iri))
    }

    fn declare_properties(&self, mut context: BuildContext, properties: &[String]) -> BuildContext {
        for property in properties {
            let id = context.push_edge(EdgeDraft {
                kind: EdgeKind::ObjectProperty,
                iri: Some(property.clone()),
                label: Some(self.label(property)),
                attributes: vec![EdgeAttribute::Object],
                domain: None,
                range: None,
            });
            context.properties.insert(property.clone(), id);
        }
        context
    }

    fn members(&self, class: &str, individuals: &HashSet<&str>) -> Vec<String> {
        if !self.equivalent_members {
            return self.query.individuals_of_class(class);
        }
        self.query
            .find_members(class, true)
            .into_iter()
            .map(|member| member.individual)
            .filter(|individual| individuals.contains(individual.as_str()))
            .collect()
    }

    fn declare_classes(
        &self,
        mut context: BuildContext,
        classes: &[String],
        individuals: &[String],
    ) -> BuildContext {
        let declared: HashSet<&str> = individuals.iter().map(String::as_str).collect();
        for class in classes {
            let id = context.allocate();
            let (kind, label) = if class == owl::THING {
                (
                    NodeKind::SyntheticRoot,
                    Label::Undefined(ROOT_LABEL.to_owned()),
                )
            } else {
                (NodeKind::Class, self.label(class))
            };
            context.nodes.push(ResourceNode {
                id,
                iri: class.clone(),
                kind,
                label,
                super_ids: Vec::new(),
                sub_ids: Vec::new(),
                equivalent_ids: Vec::new(),
                member_iris: self.members(class, &declared),
            });
            context.classes.insert(class.clone(), id);
        }
        context
    }

    fn declare_individuals(
        &self,
        mut context: BuildContext,
        individuals: &[String],
    ) -> BuildContext {
        for individual in individuals {
            let id = context.allocate();
            context.nodes.push(ResourceNode {
                id,
                iri: individual.clone(),
                kind: NodeKind::Individual,
                label: self.label(individual),
                super_ids: Vec::new(),
                sub_ids: Vec::new(),
                equivalent_ids: Vec::new(),
                member_iris: Vec::new(),
            });
            context.individuals.insert(individual.clone(), id);
        }
        context
    }

    /// Resolves sub/super-class references to ids and records every
    /// parent/child pair, forward (sub-classes) before backward (super-classes).
    fn resolve_hierarchy(&self, mut context: BuildContext) -> (BuildContext, Vec<Inheritance>) {
        let mut hierarchy = Vec::new();
        for index in 0..context.nodes.len() {
            if !context.nodes[index].kind.is_class() {
                continue;
            }
            let iri = context.nodes[index].iri.clone();
            let subs = self.query.sub_classes_of(&iri);
            let supers = self.query.super_classes_of(&iri);

            let sub_ids = subs.iter().filter_map(|sub| context.class_id(sub)).collect();
            let super_ids = supers
                .iter()
                .filter_map(|parent| context.class_id(parent))
                .collect();
            let equivalent_ids = if self.semantic_attributes {
                self.query
                    .equivalent_classes_of(&iri)
                    .iter()
                    .filter_map(|equivalent| context.class_id(equivalent))
                    .collect()
            } else {
                Vec::new()
            };

            let node = &mut context.nodes[index];
            node.sub_ids = sub_ids;
            node.super_ids = super_ids;
            node.equivalent_ids = equivalent_ids;

            hierarchy.extend(subs.into_iter().map(|child| Inheritance {
                parent: iri.clone(),
                child,
            }));
            hierarchy.extend(supers.into_iter().map(|parent| Inheritance {
                parent,
                child: iri.clone(),
            }));
        }
        (context, hierarchy)
    }

    /// Missing domains and ranges fall back to `owl:Thing` before lookup.
    fn resolve_property_endpoints(&self, mut context: BuildContext) -> BuildContext {
        for edge in &mut context.edges {
            let Some(property) = edge.iri.as_deref() else {
                continue;
            };
            let domain = self
                .query
                .domain_of(property)
                .unwrap_or_else(|| owl::THING.to_owned());
            let range = self
                .query
                .range_of(property)
                .unwrap_or_else(|| owl::THING.to_owned());
            edge.domain = context.classes.get(&domain).copied();
            edge.range = context.classes.get(&range).copied();

            if self.semantic_attributes {
                if self.query.is_transitive(property) {
                    edge.attributes.push(EdgeAttribute::Transitive);
                }
                if self.query.is_symmetric(property) {
                    edge.attributes.push(EdgeAttribute::Symmetric);
                }
                edge.inverse = self
                    .query
                    .inverse_relations_of(property)
                    .iter()
                    .filter(|inverse| inverse.as_str() != property)
                    .find_map(|inverse| context.properties.get(inverse).copied());
            }
        }
        context
    }

    fn synthesize_inheritance(mut context: BuildContext, hierarchy: &[Inheritance]) -> BuildContext {
        let mut seen = HashSet::new();
        for pair in hierarchy {
            if !seen.insert(pair.key()) {
                debug!(
                    parent = %pair.parent,
                    child = %pair.child,
                    "skipping duplicate inheritance edge"
                );
                continue;
            }
            let domain = context.class_id(&pair.child);
            let range = context.class_id(&pair.parent);
            context.push_edge(EdgeDraft::anonymous(EdgeKind::Inheritance, domain, range));
        }
        context
    }

    fn synthesize_memberships(mut context: BuildContext) -> BuildContext {
        let individuals = &context.individuals;
        let memberships: Vec<(Option<ElementId>, ElementId)> = context
            .nodes
            .iter()
            .filter(|node| node.kind.is_class())
            .flat_map(|node| {
                node.member_iris
                    .iter()
                    .map(move |member| (individuals.get(member).copied(), node.id))
            })
            .collect();

        for (individual, class) in memberships {
            context.push_edge(EdgeDraft::anonymous(
                EdgeKind::TypeMembership,
                individual,
                Some(class),
            ));
        }
        context
    }

    fn synthesize_assertions(
        &self,
        mut context: BuildContext,
        assertions: &[Assertion],
    ) -> BuildContext {
        for assertion in assertions {
            let domain = context.individual_id(&assertion.edge.subject);
            let range = context.individual_id(&assertion.edge.object);
            context.push_edge(EdgeDraft {
                kind: EdgeKind::ObjectProperty,
                iri: Some(assertion.property.clone()),
                label: Some(self.label(&assertion.property)),
                attributes: vec![EdgeAttribute::Object],
                domain,
                range,
            });
        }
        context
    }
}
