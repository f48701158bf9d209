//! ifcOWL schema editions and their vocabulary
//!
//! The edition is detected from the prefixes the input declares. Class and
//! property IRIs are resolved against the detected namespace; the few
//! relationship attributes that were renamed between IFC2x3 and IFC4 are
//! selected per edition.

use std::fmt;
use std::str::FromStr;

use lbd_graph_ir::path::Step;
use lbd_graph_ir::Graph;
use lbd_vocab::{express, ifc};

use crate::error::{ConvertError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IfcSchema {
    Ifc2x3Tc1,
    Ifc4Add1,
    Ifc4Add2,
    Ifc4,
}

impl IfcSchema {
    /// Edition name, also the stem of the edition's ontology file
    pub fn name(self) -> &'static str {
        match self {
            IfcSchema::Ifc2x3Tc1 => "IFC2X3_TC1",
            IfcSchema::Ifc4Add1 => "IFC4_ADD1",
            IfcSchema::Ifc4Add2 => "IFC4_ADD2",
            IfcSchema::Ifc4 => "IFC4",
        }
    }

    pub fn is_ifc2x3(self) -> bool {
        self == IfcSchema::Ifc2x3Tc1
    }

    /// Edition of an ifcOWL namespace IRI, if it names one
    pub fn from_namespace(namespace: &str) -> Option<IfcSchema> {
        let ns = namespace.to_lowercase();
        if ns.contains("ifc2x3") {
            Some(IfcSchema::Ifc2x3Tc1)
        } else if ns.contains("ifc4") {
            if ns.contains("add2") {
                Some(IfcSchema::Ifc4Add2)
            } else if ns.contains("add1") {
                Some(IfcSchema::Ifc4Add1)
            } else {
                Some(IfcSchema::Ifc4)
            }
        } else {
            None
        }
    }
}

impl fmt::Display for IfcSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for IfcSchema {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "IFC2X3_TC1" | "IFC2X3" => Ok(IfcSchema::Ifc2x3Tc1),
            "IFC4_ADD1" => Ok(IfcSchema::Ifc4Add1),
            "IFC4_ADD2" => Ok(IfcSchema::Ifc4Add2),
            "IFC4" => Ok(IfcSchema::Ifc4),
            other => Err(format!("unknown IFC schema edition {other}")),
        }
    }
}

/// The ifcOWL vocabulary of one input
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfcVocabulary {
    pub schema: IfcSchema,
    /// Namespace IRI, always ending in `#` or `/`
    pub namespace: String,
}

impl IfcVocabulary {
    pub fn new(schema: IfcSchema, namespace: impl Into<String>) -> Self {
        let mut namespace = namespace.into();
        if !namespace.ends_with('#') && !namespace.ends_with('/') {
            namespace.push('#');
        }
        Self { schema, namespace }
    }

    /// Detect the edition from the declared prefixes.
    ///
    /// An `ifcowl` prefix decides on its own; otherwise the first declared
    /// namespace that names an edition is used.
    pub fn detect(graph: &Graph) -> Result<IfcVocabulary> {
        if let Some(ns) = graph.namespace("ifcowl") {
            if let Some(schema) = IfcSchema::from_namespace(ns) {
                return Ok(IfcVocabulary::new(schema, ns));
            }
        }
        graph
            .prefixes
            .values()
            .find_map(|ns| IfcSchema::from_namespace(ns).map(|schema| IfcVocabulary::new(schema, ns.as_str())))
            .ok_or_else(|| ConvertError::UnsupportedSchema {
                namespaces: graph.prefixes.values().cloned().collect(),
            })
    }

    /// IRI of an ifcOWL class or property
    pub fn iri(&self, local: &str) -> String {
        format!("{}{local}", self.namespace)
    }

    fn forward(&self, local: &str) -> Step {
        Step::forward(self.iri(local))
    }

    fn inverse(&self, local: &str) -> Step {
        Step::inverse(self.iri(local))
    }

    fn relating_object(&self) -> &'static str {
        if self.schema.is_ifc2x3() {
            "relatingObject_IfcRelDecomposes"
        } else {
            "relatingObject_IfcRelAggregates"
        }
    }

    fn related_objects(&self) -> &'static str {
        if self.schema.is_ifc2x3() {
            "relatedObjects_IfcRelDecomposes"
        } else {
            "relatedObjects_IfcRelAggregates"
        }
    }

    fn defines_related_objects(&self) -> &'static str {
        if self.schema.is_ifc2x3() {
            "relatedObjects_IfcRelDefines"
        } else {
            "relatedObjects_IfcRelDefinesByProperties"
        }
    }

    /// entity → objects it aggregates (site → buildings, building → storeys,
    /// storey → spaces, element → parts)
    pub fn aggregated_path(&self) -> Vec<Step> {
        vec![
            self.inverse(self.relating_object()),
            self.forward(self.related_objects()),
        ]
    }

    /// spatial structure → elements contained in it
    pub fn contained_path(&self) -> Vec<Step> {
        vec![
            self.inverse(ifc::RELATING_STRUCTURE),
            self.forward(ifc::RELATED_ELEMENTS),
        ]
    }

    /// space → elements bounding it
    pub fn adjacent_path(&self) -> Vec<Step> {
        vec![
            self.inverse(ifc::RELATING_SPACE),
            self.forward(ifc::RELATED_BUILDING_ELEMENT),
        ]
    }

    /// element → elements filling its openings
    pub fn hosted_path(&self) -> Vec<Step> {
        vec![
            self.inverse(ifc::RELATING_BUILDING_ELEMENT_VOIDS),
            self.forward(ifc::RELATED_OPENING_ELEMENT),
            self.inverse(ifc::RELATING_OPENING_ELEMENT),
            self.forward(ifc::RELATED_BUILDING_ELEMENT_FILLS),
        ]
    }

    /// object → property sets defining it
    pub fn property_sets_path(&self) -> Vec<Step> {
        vec![
            self.inverse(self.defines_related_objects()),
            self.forward(ifc::RELATING_PROPERTY_DEFINITION),
        ]
    }

    /// property set → its properties
    pub fn property_members_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::HAS_PROPERTIES)]
    }

    /// site → latitude list head
    pub fn latitude_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::REF_LATITUDE)]
    }

    /// site → longitude list head
    pub fn longitude_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::REF_LONGITUDE)]
    }

    /// root entity → compact GUID literal
    pub fn guid_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::GLOBAL_ID), Step::forward(express::HAS_STRING)]
    }

    /// root entity → name literal
    pub fn root_name_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::NAME_ROOT), Step::forward(express::HAS_STRING)]
    }

    /// property → name literal
    pub fn property_name_path(&self) -> Vec<Step> {
        vec![self.forward(ifc::NAME_PROPERTY), Step::forward(express::HAS_STRING)]
    }

    /// single-value property → nominal value literal, one path per wrapper
    /// kind in lookup order (string, double, integer, boolean, logical)
    pub fn nominal_value_paths(&self) -> [Vec<Step>; 5] {
        [
            express::HAS_STRING,
            express::HAS_DOUBLE,
            express::HAS_INTEGER,
            express::HAS_BOOLEAN,
            express::HAS_LOGICAL,
        ]
        .map(|wrapper| vec![self.forward(ifc::NOMINAL_VALUE), Step::forward(wrapper)])
    }
}
