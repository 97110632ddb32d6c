//! [`OntologyQuery`] implementation on top of the in-memory [`TripleStore`].

use std::collections::{HashSet, VecDeque};

use tracing::warn;

use super::{
    repositories::{
        Annotations, Direction, ExclusionReport, InverseAssertion, Member, OntologyQuery,
        PropertyEdge,
    },
    store::{Node, Statement, TripleStore},
    value_objects::{short_name, Iri},
    vocab::{owl, rdf, rdfs},
};

/// Breadth-first walk over one relation of a [`TripleStore`].
pub struct Closure<'a> {
    store: &'a TripleStore,
    relation: String,
    direction: Direction,
    visited: HashSet<String>,
    queue: VecDeque<String>,
}

impl<'a> Closure<'a> {
    #[must_use]
    pub fn new(store: &'a TripleStore, start: &str, relation: &str, direction: Direction) -> Self {
        Self {
            store,
            relation: relation.to_owned(),
            direction,
            visited: HashSet::from([start.to_owned()]),
            queue: VecDeque::from([start.to_owned()]),
        }
    }

    fn neighbours(&self, current: &str) -> Vec<String> {
        let relation = Some(self.relation.as_str());
        match self.direction {
            Direction::Forward => self
                .store
                .matching(Some(current), relation, None)
                .filter_map(|statement| statement.object.as_resource())
                .map(str::to_owned)
                .collect(),
            Direction::Reverse => self
                .store
                .matching(None, relation, Some(current))
                .filter_map(|statement| statement.subject.as_resource())
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl Iterator for Closure<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.queue.pop_front()?;
        for next in self.neighbours(&current) {
            if self.visited.insert(next.clone()) {
                self.queue.push_back(next);
            }
        }
        Some(current)
    }
}

impl TripleStore {
    fn typed_as(&self, class: &str) -> Vec<String> {
        self.matching(None, Some(rdf::TYPE), Some(class))
            .filter_map(|statement| statement.subject.as_iri())
            .map(str::to_owned)
            .collect()
    }

    fn subjects_of(&self, predicate: &str, object: &str) -> Vec<String> {
        self.matching(None, Some(predicate), Some(object))
            .filter_map(|statement| statement.subject.as_resource())
            .map(str::to_owned)
            .collect()
    }

    fn objects_of(&self, subject: &str, predicate: &str) -> Vec<String> {
        self.matching(Some(subject), Some(predicate), None)
            .filter_map(|statement| statement.object.as_resource())
            .map(str::to_owned)
            .collect()
    }

    fn first_resource(&self, subject: &str, predicate: &str) -> Option<String> {
        self.first_object(subject, predicate)
            .and_then(Node::as_resource)
            .map(str::to_owned)
    }

    fn first_value(&self, subject: &str, predicate: &str) -> Option<String> {
        self.first_object(subject, predicate)
            .map(|node| node.value().to_owned())
    }

    /// Members of `class` alone, in discovery order, first statement wins.
    fn members_of(&self, class: &str, members: &mut Vec<Member>, seen: &mut HashSet<String>) {
        let mut record = |node: &Node, statement: &Statement| {
            if let Some(individual) = node.as_resource() {
                if seen.insert(individual.to_owned()) {
                    members.push(Member {
                        individual: individual.to_owned(),
                        statement: statement.clone(),
                        short_name: short_name(individual).to_owned(),
                    });
                }
            }
        };

        for target in self.transitive_closure(class, rdfs::SUB_CLASS_OF, Direction::Reverse) {
            for statement in self.matching(None, Some(rdf::TYPE), Some(&target)) {
                record(&statement.subject, statement);
            }
            for property in self.subjects_of(rdfs::DOMAIN, &target) {
                for statement in self.matching(None, Some(&property), None) {
                    record(&statement.subject, statement);
                }
            }
            for property in self.subjects_of(rdfs::RANGE, &target) {
                for statement in self.matching(None, Some(&property), None) {
                    record(&statement.object, statement);
                }
            }
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: String) {
    if !values.contains(&value) {
        values.push(value);
    }
}

impl OntologyQuery for TripleStore {
    fn holds(&self, subject: &str, predicate: &str, object: &str) -> bool {
        TripleStore::holds(self, subject, predicate, object)
    }

    fn list_classes(&self) -> Vec<String> {
        self.typed_as(owl::CLASS)
    }

    fn list_object_properties(&self) -> Vec<String> {
        self.typed_as(owl::OBJECT_PROPERTY)
    }

    fn list_individuals(&self) -> Vec<String> {
        self.typed_as(owl::NAMED_INDIVIDUAL)
    }

    fn domain_of(&self, property: &str) -> Option<String> {
        self.first_resource(property, rdfs::DOMAIN)
    }

    fn range_of(&self, property: &str) -> Option<String> {
        self.first_resource(property, rdfs::RANGE)
    }

    fn sub_classes_of(&self, class: &str) -> Vec<String> {
        self.subjects_of(rdfs::SUB_CLASS_OF, class)
    }

    fn super_classes_of(&self, class: &str) -> Vec<String> {
        self.objects_of(class, rdfs::SUB_CLASS_OF)
    }

    fn individuals_of_class(&self, class: &str) -> Vec<String> {
        self.typed_as(class)
            .into_iter()
            .filter(|individual| self.is_individual(individual))
            .collect()
    }

    fn instance_property_edges(&self, property: &str) -> Vec<PropertyEdge> {
        self.matching(None, Some(property), None)
            .map(|statement| PropertyEdge {
                subject: statement.subject.value().to_owned(),
                object: statement.object.value().to_owned(),
            })
            .collect()
    }

    fn inverse_relations_of(&self, property: &str) -> Vec<String> {
        let mut inverses = Vec::new();
        for inverse in self
            .objects_of(property, owl::INVERSE_OF)
            .into_iter()
            .chain(self.subjects_of(owl::INVERSE_OF, property))
        {
            push_unique(&mut inverses, inverse);
        }
        if self.is_symmetric(property) {
            push_unique(&mut inverses, property.to_owned());
        }
        inverses
    }

    fn transitive_closure<'a>(
        &'a self,
        start: &str,
        relation: &str,
        direction: Direction,
    ) -> Box<dyn Iterator<Item = String> + 'a> {
        Box::new(Closure::new(self, start, relation, direction))
    }

    fn equivalent_classes_of(&self, class: &str) -> Vec<String> {
        let mut equivalents = Vec::new();
        for candidate in self
            .subjects_of(owl::EQUIVALENT_CLASS, class)
            .into_iter()
            .chain(self.objects_of(class, owl::EQUIVALENT_CLASS))
        {
            if candidate != class {
                push_unique(&mut equivalents, candidate);
            }
        }
        equivalents
    }

    fn find_members(&self, class: &str, include_equivalent: bool) -> Vec<Member> {
        let mut classes = vec![class.to_owned()];
        if include_equivalent {
            for equivalent in self.equivalent_classes_of(class) {
                push_unique(&mut classes, equivalent);
            }
        }

        let mut members = Vec::new();
        let mut seen = HashSet::new();
        for target in &classes {
            self.members_of(target, &mut members, &mut seen);
        }
        members
    }

    fn apply_exclusion(&mut self, excluded: &[Iri]) -> ExclusionReport {
        let mut entities = HashSet::new();
        for class in excluded {
            let class = class.as_str();
            if self.matching(Some(class), None, None).next().is_none()
                && self.matching(None, None, Some(class)).next().is_none()
            {
                warn!(class, "excluded_class_not_in_ontology");
            }
            entities.extend(
                self.find_members(class, false)
                    .into_iter()
                    .map(|member| member.individual),
            );
            entities.extend(self.transitive_closure(class, rdfs::SUB_CLASS_OF, Direction::Reverse));
        }

        let statements = self.remove_touching(&entities);
        ExclusionReport {
            entities: entities.len(),
            statements,
        }
    }

    fn inverse_property_assertions(&self, individual: &str) -> Vec<InverseAssertion> {
        let mut assertions = Vec::new();
        for property in self.list_object_properties() {
            let inverses = self.inverse_relations_of(&property);
            if inverses.is_empty() {
                continue;
            }
            for source in self.subjects_of(&property, individual) {
                for relation in &inverses {
                    assertions.push(InverseAssertion {
                        subject: individual.to_owned(),
                        relation: relation.clone(),
                        target: source.clone(),
                    });
                }
            }
        }
        assertions
    }

    fn annotations(&self, entity: &str) -> Annotations {
        Annotations {
            name: entity.to_owned(),
            short_name: short_name(entity).to_owned(),
            label: self.first_value(entity, rdfs::LABEL),
            comment: self.first_value(entity, rdfs::COMMENT),
            see_also: self.first_value(entity, rdfs::SEE_ALSO),
        }
    }
}
