//! End to end conversion: Turtle text in, VOWL document out.

use tracing::info;

use crate::{
    config::ConversionOptions,
    graph::{GraphBuilder, OntologyGraph, VowlDocument},
    ontology::{detect_root_iri, Iri, OntologyQuery, TripleStore},
    Error, Result,
};

/// Converts a Turtle document into its VOWL representation.
///
/// # Errors
///
/// Fails with [`Error::RootIriMissing`] when no root IRI can be found and
/// with [`Error::Parse`] when the document is not valid Turtle.
pub fn convert(text: &str, options: &ConversionOptions) -> Result<VowlDocument> {
    let graph = build_graph(text, options)?;
    Ok(VowlDocument::from(&graph))
}

/// Parses `text` and assembles the intermediate graph.
///
/// # Errors
///
/// See [`convert`].
pub fn build_graph(text: &str, options: &ConversionOptions) -> Result<OntologyGraph> {
    let root = detect_root_iri(text).ok_or(Error::RootIriMissing)?;
    let mut store = TripleStore::parse_turtle(text, &root)?;
    Ok(assemble(&mut store, &root, options))
}

/// Applies the exclusions to `query` and builds the graph from what remains.
pub fn assemble<Q>(query: &mut Q, root: &Iri, options: &ConversionOptions) -> OntologyGraph
where
    Q: OntologyQuery + ?Sized,
{
    if !options.exclude_classes.is_empty() {
        let report = query.apply_exclusion(&options.exclude_classes);
        info!(
            excluded = options.exclude_classes.len(),
            entities = report.entities,
            statements = report.statements,
            "exclusion_applied"
        );
    }

    let graph = GraphBuilder::new(&*query, root)
        .with_semantic_attributes(options.semantic_attributes)
        .with_equivalent_members(options.include_equivalent_members)
        .build();

    info!(
        root = %root,
        nodes = graph.nodes.len(),
        edges = graph.edges.len(),
        "conversion_finished"
    );
    graph
}
