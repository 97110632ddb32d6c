use super::store::Statement;
use super::value_objects::Iri;
use super::vocab::{owl, rdf, rdfs};

/// Which way a relation is followed while computing a closure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// From subject to object, e.g. towards super-classes for `rdfs:subClassOf`.
    Forward,
    /// From object to subject, e.g. towards sub-classes for `rdfs:subClassOf`.
    Reverse,
}

/// Subject/object pair of a property assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyEdge {
    pub subject: String,
    pub object: String,
}

/// Member of a class together with the statement that made it one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Member {
    pub individual: String,
    pub statement: Statement,
    pub short_name: String,
}

/// Assertion implied by an inverse or symmetric property.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InverseAssertion {
    pub subject: String,
    pub relation: String,
    pub target: String,
}

/// Human readable annotations of an entity.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Annotations {
    pub name: String,
    pub short_name: String,
    pub label: Option<String>,
    pub comment: Option<String>,
    pub see_also: Option<String>,
}

/// Outcome of pruning excluded classes from a store.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExclusionReport {
    /// Classes, sub-classes and members that were pruned.
    pub entities: usize,
    /// Statements removed from the store.
    pub statements: usize,
}

/// Typed read access to an ontology held in a triple store.
///
/// Lookups for IRIs the store has never seen return empty results rather
/// than errors. Every enumeration follows the store's discovery order.
pub trait OntologyQuery {
    /// Whether the exact statement is present.
    fn holds(&self, subject: &str, predicate: &str, object: &str) -> bool;

    /// Named classes, i.e. subjects typed `owl:Class`.
    fn list_classes(&self) -> Vec<String>;

    /// Named object properties, i.e. subjects typed `owl:ObjectProperty`.
    fn list_object_properties(&self) -> Vec<String>;

    /// Named individuals, i.e. subjects typed `owl:NamedIndividual`.
    fn list_individuals(&self) -> Vec<String>;

    /// First `rdfs:domain` of the property.
    fn domain_of(&self, property: &str) -> Option<String>;

    /// First `rdfs:range` of the property.
    fn range_of(&self, property: &str) -> Option<String>;

    /// Direct sub-classes (`? rdfs:subClassOf class`).
    fn sub_classes_of(&self, class: &str) -> Vec<String>;

    /// Direct super-classes (`class rdfs:subClassOf ?`).
    fn super_classes_of(&self, class: &str) -> Vec<String>;

    /// Individuals typed to the class that are also `owl:NamedIndividual`.
    fn individuals_of_class(&self, class: &str) -> Vec<String>;

    /// Every `subject property object` assertion of the property.
    fn instance_property_edges(&self, property: &str) -> Vec<PropertyEdge>;

    /// Properties declared `owl:inverseOf` the given one, in either direction.
    /// A symmetric property is listed as its own inverse.
    fn inverse_relations_of(&self, property: &str) -> Vec<String>;

    /// Lazily walks `relation` from `start`; the start itself is yielded first
    /// and every resource is yielded once even when the relation is cyclic.
    fn transitive_closure<'a>(
        &'a self,
        start: &str,
        relation: &str,
        direction: Direction,
    ) -> Box<dyn Iterator<Item = String> + 'a>;

    /// Classes linked through `owl:equivalentClass` in either direction.
    fn equivalent_classes_of(&self, class: &str) -> Vec<String>;

    /// Members of the class and of its transitive sub-classes, including
    /// resources implied by the domain and range of properties.
    fn find_members(&self, class: &str, include_equivalent: bool) -> Vec<Member>;

    /// Removes every statement mentioning an excluded class, one of its
    /// sub-classes or one of its members.
    fn apply_exclusion(&mut self, excluded: &[Iri]) -> ExclusionReport;

    /// Triples implied by inverse properties for statements targeting
    /// `individual`.
    fn inverse_property_assertions(&self, individual: &str) -> Vec<InverseAssertion>;

    /// `rdfs:label`, `rdfs:comment` and `rdfs:seeAlso` of the entity.
    fn annotations(&self, entity: &str) -> Annotations;

    fn is_class(&self, iri: &str) -> bool {
        self.holds(iri, rdf::TYPE, owl::CLASS)
    }

    fn is_individual(&self, iri: &str) -> bool {
        self.holds(iri, rdf::TYPE, owl::NAMED_INDIVIDUAL)
    }

    fn is_transitive(&self, property: &str) -> bool {
        self.holds(property, rdf::TYPE, owl::TRANSITIVE_PROPERTY)
    }

    fn is_symmetric(&self, property: &str) -> bool {
        self.holds(property, rdf::TYPE, owl::SYMMETRIC_PROPERTY)
    }

    /// Transitive sub-classes, without the class itself.
    fn all_sub_classes(&self, class: &str) -> Vec<String> {
        self.transitive_closure(class, rdfs::SUB_CLASS_OF, Direction::Reverse)
            .filter(|candidate| candidate != class)
            .collect()
    }
}
