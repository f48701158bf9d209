//! ifcOWL to Linked Building Data conversion
//!
//! Converts a building model in ifcOWL (the RDF rendering of IFC) into the
//! LBD vocabularies:
//!
//! - a BOT topology graph of sites, buildings, storeys, spaces and elements,
//! - a product graph classifying the elements (`beo:Wall`, `furn:Chair`, ...),
//! - a PROPS property graph carrying property sets and attributes.
//!
//! The class correspondence comes from the `rdfs:seeAlso` cross references
//! of the LBD product ontologies, loaded through [`OntologySources`].
//!
//! # Example
//!
//! ```
//! use lbd_convert::{Converter, ConverterOptions, Outcome};
//!
//! let ttl = r#"
//!     @prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
//!     @prefix inst: <http://example.org/model#> .
//!     inst:IfcBuilding_1 a ifc:IfcBuilding .
//! "#;
//!
//! let conversion = Converter::new(ConverterOptions::default()).convert_str(ttl);
//! assert_eq!(conversion.report.stats.buildings, 1);
//! assert_ne!(conversion.report.outcome, Outcome::Failed);
//! ```

pub mod attributes;
pub mod context;
pub mod converter;
pub mod error;
pub mod geo;
pub mod guid;
pub mod identity;
pub mod ontology;
pub mod options;
pub mod pset;
pub mod report;
pub mod schema;
pub mod source;
pub mod status;
pub mod type_mapper;
pub mod walker;

pub use context::OutputGraphs;
pub use converter::{Conversion, Converter};
pub use error::{ConvertError, Result};
pub use identity::{IdentifierSource, RandomIdentifiers, SequentialIdentifiers, UriFormatter};
pub use ontology::{load_turtle_file, OntologySources};
pub use options::{ConverterOptions, PropsLevel, DEFAULT_URI_BASE};
pub use report::{ConversionReport, ConversionStats, Diagnostic, DiagnosticKind, Outcome};
pub use schema::{IfcSchema, IfcVocabulary};
pub use status::{StatusEvent, StatusLevel};
pub use type_mapper::TypeMapper;
