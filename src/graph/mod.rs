//! Graph assembly and VOWL serialization.

pub mod builder;
pub mod domain;
pub mod schema;

pub use builder::{BuildContext, GraphBuilder};
pub use domain::{
    EdgeAttribute, EdgeKind, ElementId, GraphMetrics, Label, NodeKind, OntologyGraph,
    RelationEdge, ResourceNode,
};
pub use schema::{
    ClassAttribute, Header, LabelValue, Metrics, PropertyAttribute, TypedId, VowlDocument,
};
