//! RDF datatype representation
//!
//! Datatypes are always explicit - there is no "untyped" literal.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Common XSD and RDF datatype IRIs (re-exported from the vocab crate)
pub mod iri {
    pub use lbd_vocab::rdf::LANG_STRING as RDF_LANG_STRING;
    pub use lbd_vocab::xsd::{
        BOOLEAN as XSD_BOOLEAN, DATE_TIME as XSD_DATE_TIME, DECIMAL as XSD_DECIMAL,
        DOUBLE as XSD_DOUBLE, FLOAT as XSD_FLOAT, INTEGER as XSD_INTEGER, LONG as XSD_LONG,
        STRING as XSD_STRING,
    };
}

/// RDF literal datatype, always an expanded IRI.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Datatype(Arc<str>);

impl Datatype {
    /// Create a datatype from an expanded IRI
    pub fn from_iri(iri: impl AsRef<str>) -> Self {
        Datatype(Arc::from(iri.as_ref()))
    }

    /// xsd:string - default for plain string literals
    pub fn xsd_string() -> Self {
        Self::from_iri(iri::XSD_STRING)
    }

    pub fn xsd_boolean() -> Self {
        Self::from_iri(iri::XSD_BOOLEAN)
    }

    pub fn xsd_integer() -> Self {
        Self::from_iri(iri::XSD_INTEGER)
    }

    pub fn xsd_decimal() -> Self {
        Self::from_iri(iri::XSD_DECIMAL)
    }

    pub fn xsd_double() -> Self {
        Self::from_iri(iri::XSD_DOUBLE)
    }

    pub fn xsd_date_time() -> Self {
        Self::from_iri(iri::XSD_DATE_TIME)
    }

    /// rdf:langString - for language-tagged literals
    pub fn rdf_lang_string() -> Self {
        Self::from_iri(iri::RDF_LANG_STRING)
    }

    /// Get the IRI of this datatype
    pub fn as_iri(&self) -> &str {
        &self.0
    }

    pub fn is_xsd_string(&self) -> bool {
        self.as_iri() == iri::XSD_STRING
    }

    /// Check if this is a numeric XSD type the converter treats as a number
    pub fn is_numeric(&self) -> bool {
        matches!(
            self.as_iri(),
            iri::XSD_INTEGER | iri::XSD_LONG | iri::XSD_DOUBLE | iri::XSD_DECIMAL | iri::XSD_FLOAT
        )
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_iri())
    }
}
