//! RDF vocabulary constants for ifcOWL to Linked Building Data conversion
//!
//! Constants are organized by vocabulary:
//! - `rdf`, `rdfs`, `xsd`, `owl` - W3C core vocabularies
//! - `bot` - Building Topology Ontology (https://w3id.org/bot#)
//! - `props`, `opm`, `prov`, `schema` - property modelling vocabularies
//! - `geo` - GeoSPARQL
//! - `express`, `list` - the EXPRESS wrappers used by ifcOWL
//! - `ifc` - ifcOWL local names shared by every supported schema edition
//!
//! Every `*::NS` constant is the namespace IRI; every other constant is a
//! fully expanded IRI unless the module says otherwise.

/// RDF vocabulary constants
pub mod rdf {
    pub const NS: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";

    /// rdf:type IRI
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

    /// rdf:langString IRI
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

    /// rdf:first IRI (RDF list head)
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";

    /// rdf:rest IRI (RDF list tail)
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";

    /// rdf:nil IRI (RDF list terminator)
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

/// RDFS vocabulary constants
pub mod rdfs {
    pub const NS: &str = "http://www.w3.org/2000/01/rdf-schema#";

    /// rdfs:subClassOf IRI
    pub const SUB_CLASS_OF: &str = "http://www.w3.org/2000/01/rdf-schema#subClassOf";

    /// rdfs:label IRI
    pub const LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";

    /// rdfs:seeAlso IRI, the cross-reference annotation used by the LBD
    /// product ontologies to point at ifcOWL classes
    pub const SEE_ALSO: &str = "http://www.w3.org/2000/01/rdf-schema#seeAlso";
}

/// XSD vocabulary constants
pub mod xsd {
    pub const NS: &str = "http://www.w3.org/2001/XMLSchema#";

    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const LONG: &str = "http://www.w3.org/2001/XMLSchema#long";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const FLOAT: &str = "http://www.w3.org/2001/XMLSchema#float";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// OWL vocabulary constants
pub mod owl {
    pub const NS: &str = "http://www.w3.org/2002/07/owl#";

    /// owl:Class IRI
    pub const CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
}

/// Building Topology Ontology
pub mod bot {
    pub const NS: &str = "https://w3id.org/bot#";

    pub const SITE: &str = "https://w3id.org/bot#Site";
    pub const BUILDING: &str = "https://w3id.org/bot#Building";
    pub const STOREY: &str = "https://w3id.org/bot#Storey";
    pub const SPACE: &str = "https://w3id.org/bot#Space";
    pub const ELEMENT: &str = "https://w3id.org/bot#Element";

    pub const HAS_BUILDING: &str = "https://w3id.org/bot#hasBuilding";
    pub const HAS_STOREY: &str = "https://w3id.org/bot#hasStorey";
    pub const HAS_SPACE: &str = "https://w3id.org/bot#hasSpace";
    pub const CONTAINS_ELEMENT: &str = "https://w3id.org/bot#containsElement";
    pub const ADJACENT_ELEMENT: &str = "https://w3id.org/bot#adjacentElement";
    pub const HAS_SUB_ELEMENT: &str = "https://w3id.org/bot#hasSubElement";
}

/// Building element ontology
pub mod beo {
    pub const NS: &str = "https://pi.pauwel.be/voc/buildingelement#";
}

/// PRODUCT ontology namespace
pub mod product {
    pub const NS: &str = "https://w3id.org/product#";
}

/// PROPS vocabulary; property predicates are minted below this namespace
pub mod props {
    pub const NS: &str = "https://w3id.org/props#";
}

/// Ontology for Property Management
pub mod opm {
    pub const NS: &str = "https://w3id.org/opm#";

    pub const HAS_PROPERTY_STATE: &str = "https://w3id.org/opm#hasPropertyState";
    pub const CURRENT_PROPERTY_STATE: &str = "https://w3id.org/opm#CurrentPropertyState";
}

/// W3C PROV-O
pub mod prov {
    pub const NS: &str = "http://www.w3.org/ns/prov#";

    pub const GENERATED_AT_TIME: &str = "http://www.w3.org/ns/prov#generatedAtTime";
}

/// schema.org
pub mod schema {
    pub const NS: &str = "http://schema.org/";

    pub const VALUE: &str = "http://schema.org/value";
}

/// GeoSPARQL
pub mod geo {
    pub const NS: &str = "http://www.opengis.net/ont/geosparql#";

    pub const FEATURE: &str = "http://www.opengis.net/ont/geosparql#Feature";
    pub const HAS_GEOMETRY: &str = "http://www.opengis.net/ont/geosparql#hasGeometry";
    pub const AS_WKT: &str = "http://www.opengis.net/ont/geosparql#asWKT";
    pub const WKT_LITERAL: &str = "http://www.opengis.net/ont/geosparql#wktLiteral";

    /// Prefix of the point geometry node minted for each site
    pub const POINT_URN_PREFIX: &str = "urn:bot:geom:pt:";
}

/// EXPRESS value wrappers (ifcOWL literal boxing)
pub mod express {
    pub const NS: &str = "https://w3id.org/express#";

    pub const HAS_STRING: &str = "https://w3id.org/express#hasString";
    pub const HAS_DOUBLE: &str = "https://w3id.org/express#hasDouble";
    pub const HAS_INTEGER: &str = "https://w3id.org/express#hasInteger";
    pub const HAS_BOOLEAN: &str = "https://w3id.org/express#hasBoolean";
    pub const HAS_LOGICAL: &str = "https://w3id.org/express#hasLogical";
}

/// EXPRESS list encoding used by ifcOWL aggregates
pub mod list {
    pub const NS: &str = "https://w3id.org/list#";

    pub const HAS_CONTENTS: &str = "https://w3id.org/list#hasContents";
    pub const HAS_NEXT: &str = "https://w3id.org/list#hasNext";
}

/// buildingSMART property set definitions (as published in `psetdef.ttl`)
pub mod psd {
    pub const NS: &str = "http://www.buildingsmart-tech.org/xml/psd/PSD_IFC4.xsd#";

    pub const PROPERTY_SET_DEF: &str =
        "http://www.buildingsmart-tech.org/xml/psd/PSD_IFC4.xsd#PropertySetDef";
    pub const NAME: &str = "http://www.buildingsmart-tech.org/xml/psd/PSD_IFC4.xsd#name";
    pub const PROPERTY_DEF: &str =
        "http://www.buildingsmart-tech.org/xml/psd/PSD_IFC4.xsd#propertyDef";
}

/// ifcOWL local names shared by the supported schema editions.
///
/// These are *local names*; resolve them against the namespace of the
/// detected schema edition.
pub mod ifc {
    pub const SITE: &str = "IfcSite";
    pub const BUILDING: &str = "IfcBuilding";
    pub const BUILDING_STOREY: &str = "IfcBuildingStorey";
    pub const SPACE: &str = "IfcSpace";
    pub const PROPERTY_SET: &str = "IfcPropertySet";
    pub const LABEL: &str = "IfcLabel";
    pub const IDENTIFIER: &str = "IfcIdentifier";
    pub const PROPERTY_SINGLE_VALUE: &str = "IfcPropertySingleValue";

    pub const GLOBAL_ID: &str = "globalId_IfcRoot";
    pub const NAME_ROOT: &str = "name_IfcRoot";
    pub const NAME_PROPERTY: &str = "name_IfcProperty";
    pub const HAS_PROPERTIES: &str = "hasProperties_IfcPropertySet";
    pub const NOMINAL_VALUE: &str = "nominalValue_IfcPropertySingleValue";
    pub const REF_LATITUDE: &str = "refLatitude_IfcSite";
    pub const REF_LONGITUDE: &str = "refLongitude_IfcSite";

    pub const RELATING_PROPERTY_DEFINITION: &str =
        "relatingPropertyDefinition_IfcRelDefinesByProperties";
    pub const RELATING_STRUCTURE: &str = "relatingStructure_IfcRelContainedInSpatialStructure";
    pub const RELATED_ELEMENTS: &str = "relatedElements_IfcRelContainedInSpatialStructure";
    pub const RELATING_SPACE: &str = "relatingSpace_IfcRelSpaceBoundary";
    pub const RELATED_BUILDING_ELEMENT: &str = "relatedBuildingElement_IfcRelSpaceBoundary";
    pub const RELATING_BUILDING_ELEMENT_VOIDS: &str = "relatingBuildingElement_IfcRelVoidsElement";
    pub const RELATED_OPENING_ELEMENT: &str = "relatedOpeningElement_IfcRelVoidsElement";
    pub const RELATING_OPENING_ELEMENT: &str = "relatingOpeningElement_IfcRelFillsElement";
    pub const RELATED_BUILDING_ELEMENT_FILLS: &str = "relatedBuildingElement_IfcRelFillsElement";

    /// Predicates carrying a predefined type enumeration start with this
    pub const PREDEFINED_TYPE_PREFIX: &str = "predefinedType_";

    /// Predicates carrying a tag; renamed to [`BATID`] on output
    pub const TAG_PREFIX: &str = "tag_";
    pub const BATID: &str = "batid";
}

/// Return the local name of an IRI: the part after the last `#`, or after
/// the last `/` when there is no `#`.
pub fn local_name(iri: &str) -> &str {
    match iri.rfind('#') {
        Some(pos) => &iri[pos + 1..],
        None => match iri.rfind('/') {
            Some(pos) => &iri[pos + 1..],
            None => iri,
        },
    }
}
