//! Shared fixtures for lbd-convert integration tests.

#![allow(dead_code)]

use lbd_convert::{Converter, ConverterOptions};
use lbd_graph_ir::{Graph, Term, Triple};

pub const IFC: &str = "https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#";
pub const INST: &str = "http://example.org/model#";
pub const BEO: &str = "https://pi.pauwel.be/voc/buildingelement#";
pub const BOT: &str = "https://w3id.org/bot#";
pub const PROPS: &str = "https://w3id.org/props#";
pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const SITE_GUID: &str = "7b7032cc-b822-417b-9aea-6429f95d6512";
pub const BUILDING_GUID: &str = "00000000-0000-0000-0000-000000000001";
pub const STOREY_GUID: &str = "141fa1d3-5c47-4b1b-868a-1279e647dd57";
pub const SPACE_GUID: &str = "00000000-0000-0000-0000-000000000003";
pub const WALL_GUID: &str = "9808fd7f-dc48-478e-9217-628e833d5611";
pub const DOOR_GUID: &str = "00000000-0000-0000-0000-000000000002";
pub const WALL2_GUID: &str = "00000000-0000-0000-0000-000000000004";

/// One site, building, storey and space; two walls sharing a property set,
/// a door hosted in the first wall, an unmapped flow terminal and an
/// ambiguously mapped covering.
pub const MODEL: &str = r#"
@prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
@prefix express: <https://w3id.org/express#> .
@prefix list: <https://w3id.org/list#> .
@prefix inst: <http://example.org/model#> .

inst:IfcSite_1 a ifc:IfcSite ;
    ifc:globalId_IfcRoot [ a ifc:IfcGloballyUniqueId ; express:hasString "1xS3BCk291UvhgP2dvNMKI" ] ;
    ifc:name_IfcRoot [ a ifc:IfcLabel ; express:hasString "Default Site" ] ;
    ifc:refLatitude_IfcSite inst:lat_0 ;
    ifc:refLongitude_IfcSite inst:lon_0 .
inst:lat_0 list:hasContents [ express:hasInteger 50 ] ; list:hasNext inst:lat_1 .
inst:lat_1 list:hasContents [ express:hasInteger 30 ] ; list:hasNext inst:lat_2 .
inst:lat_2 list:hasContents [ express:hasInteger 0 ] .
inst:lon_0 list:hasContents [ express:hasInteger 4 ] ; list:hasNext inst:lon_1 .
inst:lon_1 list:hasContents [ express:hasInteger 15 ] ; list:hasNext inst:lon_2 .
inst:lon_2 list:hasContents [ express:hasInteger 0 ] .

inst:IfcBuilding_2 a ifc:IfcBuilding ;
    ifc:globalId_IfcRoot [ express:hasString "0000000000000000000001" ] .
inst:IfcBuildingStorey_4 a ifc:IfcBuildingStorey ;
    ifc:globalId_IfcRoot [ express:hasString "0K7w7JN4TB6uQA4ddcHzrN" ] ;
    ifc:name_IfcRoot [ a ifc:IfcLabel ; express:hasString "Level 1" ] .
inst:IfcSpace_6 a ifc:IfcSpace ;
    ifc:globalId_IfcRoot [ express:hasString "0000000000000000000003" ] .

inst:IfcRelAggregates_10 ifc:relatingObject_IfcRelAggregates inst:IfcSite_1 ;
    ifc:relatedObjects_IfcRelAggregates inst:IfcBuilding_2 .
inst:IfcRelAggregates_11 ifc:relatingObject_IfcRelAggregates inst:IfcBuilding_2 ;
    ifc:relatedObjects_IfcRelAggregates inst:IfcBuildingStorey_4 .
inst:IfcRelAggregates_12 ifc:relatingObject_IfcRelAggregates inst:IfcBuildingStorey_4 ;
    ifc:relatedObjects_IfcRelAggregates inst:IfcSpace_6 .

inst:IfcWall_20 a ifc:IfcWall ;
    ifc:globalId_IfcRoot [ express:hasString "2O2Fr$t4X7Zf8NOew3FLOH" ] ;
    ifc:name_IfcRoot [ a ifc:IfcLabel ; express:hasString "Basic Wall" ] ;
    ifc:tag_IfcElement [ a ifc:IfcIdentifier ; express:hasString "312" ] ;
    ifc:predefinedType_IfcWall ifc:SOLIDWALL .
inst:IfcWall_21 a ifc:IfcWall ;
    ifc:globalId_IfcRoot [ express:hasString "0000000000000000000004" ] ;
    ifc:predefinedType_IfcWall ifc:NOTDEFINED .
inst:IfcDoor_22 a ifc:IfcDoor ;
    ifc:globalId_IfcRoot [ express:hasString "0000000000000000000002" ] .
inst:IfcOpeningElement_23 a ifc:IfcOpeningElement .
inst:IfcFlowTerminal_24 a ifc:IfcFlowTerminal .
inst:IfcCovering_25 a ifc:IfcCovering .

inst:IfcRelContainedInSpatialStructure_30
    ifc:relatingStructure_IfcRelContainedInSpatialStructure inst:IfcBuildingStorey_4 ;
    ifc:relatedElements_IfcRelContainedInSpatialStructure
        inst:IfcWall_20, inst:IfcWall_21, inst:IfcFlowTerminal_24, inst:IfcCovering_25, inst:IfcSpace_6 .
inst:IfcRelSpaceBoundary_31 ifc:relatingSpace_IfcRelSpaceBoundary inst:IfcSpace_6 ;
    ifc:relatedBuildingElement_IfcRelSpaceBoundary inst:IfcWall_20 .
inst:IfcRelVoidsElement_32 ifc:relatingBuildingElement_IfcRelVoidsElement inst:IfcWall_20 ;
    ifc:relatedOpeningElement_IfcRelVoidsElement inst:IfcOpeningElement_23 .
inst:IfcRelFillsElement_33 ifc:relatingOpeningElement_IfcRelFillsElement inst:IfcOpeningElement_23 ;
    ifc:relatedBuildingElement_IfcRelFillsElement inst:IfcDoor_22 .

inst:IfcPropertySet_40 a ifc:IfcPropertySet ;
    ifc:name_IfcRoot [ a ifc:IfcLabel ; express:hasString "Pset_WallCommon" ] ;
    ifc:hasProperties_IfcPropertySet inst:IfcPropertySingleValue_41, inst:IfcPropertySingleValue_42,
        inst:IfcPropertyEnumeratedValue_43, inst:IfcPropertySingleValue_44 .
inst:IfcPropertySingleValue_41 a ifc:IfcPropertySingleValue ;
    ifc:name_IfcProperty [ a ifc:IfcIdentifier ; express:hasString "FireRating" ] ;
    ifc:nominalValue_IfcPropertySingleValue [ a ifc:IfcLabel ; express:hasString "A1" ] .
inst:IfcPropertySingleValue_42 a ifc:IfcPropertySingleValue ;
    ifc:name_IfcProperty [ a ifc:IfcIdentifier ; express:hasString "IsExternal" ] ;
    ifc:nominalValue_IfcPropertySingleValue [ a ifc:IfcBoolean ; express:hasBoolean true ] .
inst:IfcPropertyEnumeratedValue_43 a ifc:IfcPropertyEnumeratedValue ;
    ifc:name_IfcProperty [ a ifc:IfcIdentifier ; express:hasString "Status" ] ;
    ifc:enumerationValues_IfcPropertyEnumeratedValue inst:IfcLabel_List_45 .
inst:IfcPropertySingleValue_44 a ifc:IfcPropertySingleValue ;
    ifc:name_IfcProperty [ a ifc:IfcIdentifier ; express:hasString "Reference" ] ;
    ifc:nominalValue_IfcPropertySingleValue [ a ifc:IfcIdentifier ; express:hasString "Reference" ] .
inst:IfcRelDefinesByProperties_46
    ifc:relatedObjects_IfcRelDefinesByProperties inst:IfcWall_20, inst:IfcWall_21 ;
    ifc:relatingPropertyDefinition_IfcRelDefinesByProperties inst:IfcPropertySet_40 .
"#;

/// Product ontology cross references for [`MODEL`]
pub const ONTOLOGY: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
@prefix beo: <https://pi.pauwel.be/voc/buildingelement#> .
@prefix furn: <https://w3id.org/furn#> .
@prefix psd: <http://www.buildingsmart-tech.org/xml/psd/PSD_IFC4.xsd#> .

beo:Wall rdfs:seeAlso ifc:IfcWall .
beo:Door rdfs:seeAlso ifc:IfcDoor .
beo:Covering rdfs:seeAlso ifc:IfcCovering .
furn:Covering rdfs:seeAlso ifc:IfcCovering .
ifc:IfcWallStandardCase rdfs:subClassOf ifc:IfcWall .

psd:Pset_WallCommon a psd:PropertySetDef ;
    psd:name "Pset_WallCommon" ;
    psd:propertyDef psd:Pset_WallCommon_FireRating .
psd:Pset_WallCommon_FireRating psd:name "FireRating" .
"#;

pub fn ontology() -> Graph {
    lbd_graph_turtle::parse_graph(ONTOLOGY).expect("ontology fixture parses")
}

pub fn converter(options: ConverterOptions) -> Converter {
    Converter::new(options).with_ontology(ontology())
}

/// Output resource of a source entity
pub fn inst(local: &str) -> Term {
    Term::iri(format!("{INST}{local}"))
}

pub fn iri(iri: &str) -> Term {
    Term::iri(iri)
}

pub fn bot(local: &str) -> Term {
    Term::iri(format!("{BOT}{local}"))
}

pub fn props(local: &str) -> Term {
    Term::iri(format!("{PROPS}{local}"))
}

pub fn has(graph: &Graph, s: &Term, p: &Term, o: &Term) -> bool {
    graph.contains(&Triple::new(s.clone(), p.clone(), o.clone()))
}

pub fn count(graph: &Graph, s: &Term, p: &Term) -> usize {
    graph
        .iter()
        .filter(|t| &t.s == s && &t.p == p)
        .count()
}
