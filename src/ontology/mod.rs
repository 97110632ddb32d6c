//! Read access to RDF/OWL ontologies.
//!
//! A Turtle document is parsed into an in-memory [`TripleStore`]; the
//! [`OntologyQuery`] contract exposes the typed lookups the graph assembler
//! relies on, so any store able to answer them can feed the conversion.

pub mod repositories;
pub mod service;
pub mod store;
pub mod value_objects;
pub mod vocab;

pub use repositories::{
    Annotations, Direction, ExclusionReport, InverseAssertion, Member, OntologyQuery,
    PropertyEdge,
};
pub use service::Closure;
pub use store::{detect_root_iri, Node, Statement, StoreError, TripleStore};
pub use value_objects::{short_name, Iri, IriError};
