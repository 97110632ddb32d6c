//! Converts RDF/OWL ontologies written in Turtle into the VOWL JSON graph
//! format consumed by ontology visualizers.
//!
//! ```
//! use rdf2vowl::{convert, ConversionOptions};
//!
//! let document = convert(
//!     "<http://example.org/onto#Pizza> a <http://www.w3.org/2002/07/owl#Class> .\n",
//!     &ConversionOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(document.class.len(), 2);
//! ```

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod convert;
mod errors;
pub mod graph;
pub mod logger;
pub mod ontology;

pub use config::{Config, ConversionOptions};
pub use convert::{assemble, build_graph, convert};
pub use errors::{Error, Result};
pub use graph::{OntologyGraph, VowlDocument};
