mod support;

use std::fs;
use std::sync::Arc;
use std::thread;

use chrono::{TimeZone, Utc};
use lbd_convert::{
    ConvertError, Converter, ConverterOptions, DiagnosticKind, OntologySources, Outcome, PropsLevel,
    SequentialIdentifiers,
};
use lbd_graph_ir::Term;
use pretty_assertions::assert_eq;
use support::*;
use tempfile::TempDir;

const PREFIXES: &str = r#"
@prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
@prefix express: <https://w3id.org/express#> .
@prefix inst: <http://example.org/model#> .
"#;

fn model(body: &str) -> String {
    format!("{PREFIXES}\n{body}")
}

#[test]
fn parse_error_and_unsupported_schema_are_distinct() {
    let converter = converter(ConverterOptions::default());

    let conversion = converter.convert_str("@prefix ifc: <http://ifcowl.openbimstandards.org/IFC4#> . ifc:a ifc:b");
    assert_eq!(conversion.report.outcome, Outcome::Failed);
    assert!(matches!(conversion.report.failure(), Some(ConvertError::Parse(_))));
    assert!(conversion.graph.is_empty());

    let conversion = converter.convert_str(
        "@prefix ex: <http://example.org/vocab#> . ex:wall a ex:Wall .",
    );
    assert_eq!(conversion.report.outcome, Outcome::Failed);
    assert!(matches!(
        conversion.report.failure(),
        Some(ConvertError::UnsupportedSchema { .. })
    ));
    assert!(conversion.graph.is_empty());
    assert!(conversion.graphs.topology.is_empty());

    let dir = TempDir::new().unwrap();
    let conversion = converter.convert_file(dir.path().join("missing.ttl"));
    assert!(matches!(conversion.report.failure(), Some(ConvertError::Io { .. })));
}

#[test]
fn aggregation_cycle_terminates() {
    let input = model(
        r#"
        inst:IfcBuilding_1 a ifc:IfcBuilding .
        inst:IfcBuildingStorey_2 a ifc:IfcBuildingStorey .
        inst:IfcWall_3 a ifc:IfcWall .
        inst:IfcWall_4 a ifc:IfcWall .
        inst:rel_5 ifc:relatingObject_IfcRelAggregates inst:IfcBuilding_1 ;
            ifc:relatedObjects_IfcRelAggregates inst:IfcBuildingStorey_2 .
        inst:rel_6 ifc:relatingStructure_IfcRelContainedInSpatialStructure inst:IfcBuildingStorey_2 ;
            ifc:relatedElements_IfcRelContainedInSpatialStructure inst:IfcWall_3 .
        inst:rel_7 ifc:relatingObject_IfcRelAggregates inst:IfcWall_3 ;
            ifc:relatedObjects_IfcRelAggregates inst:IfcWall_4 .
        inst:rel_8 ifc:relatingObject_IfcRelAggregates inst:IfcWall_4 ;
            ifc:relatedObjects_IfcRelAggregates inst:IfcWall_3 .
        "#,
    );
    let conversion = converter(ConverterOptions::default().with_geolocation(false)).convert_str(&input);
    let topology = &conversion.graphs.topology;

    let wall3 = inst("wall_Wall_3");
    let wall4 = inst("wall_Wall_4");
    assert!(has(topology, &wall3, &bot("hasSubElement"), &wall4));
    assert!(!has(topology, &wall4, &bot("hasSubElement"), &wall3));
    assert_eq!(
        conversion.report.diagnostics_of(DiagnosticKind::CycleDetected).count(),
        1
    );
    // no site: buildings are walked directly; a cycle alone does not degrade
    assert_eq!(conversion.report.stats.buildings, 1);
    assert_eq!(conversion.report.outcome, Outcome::Success);
}

#[test]
fn malformed_hierarchy_drops_the_branch() {
    let input = model(
        r#"
        inst:IfcBuilding_1 a ifc:IfcBuilding .
        inst:IfcWall_2 a ifc:IfcWall .
        inst:rel_3 ifc:relatingObject_IfcRelAggregates inst:IfcBuilding_1 ;
            ifc:relatedObjects_IfcRelAggregates inst:IfcWall_2 .
        "#,
    );
    let conversion = converter(ConverterOptions::default().with_geolocation(false)).convert_str(&input);

    let malformed: Vec<_> = conversion
        .report
        .diagnostics_of(DiagnosticKind::MalformedHierarchy)
        .collect();
    assert_eq!(malformed.len(), 1);
    assert!(malformed[0].message.contains("expected IfcBuildingStorey, found IfcWall"));
    assert_eq!(conversion.report.stats.storeys, 0);
    assert_eq!(conversion.report.outcome, Outcome::Partial);
}

#[test]
fn entities_without_guid_use_their_local_name() {
    let input = model(
        r#"
        inst:IfcBuilding_1 a ifc:IfcBuilding ;
            ifc:globalId_IfcRoot [ express:hasString "not-a-guid" ] .
        "#,
    );
    let conversion = converter(ConverterOptions::default().with_geolocation(false)).convert_str(&input);
    assert!(has(
        &conversion.graph,
        &inst("building_Building_1"),
        &iri(RDF_TYPE),
        &bot("Building")
    ));
    assert!(conversion.report.has(DiagnosticKind::MissingIdentifier));
    assert_eq!(conversion.report.outcome, Outcome::Success);
}

#[test]
fn level_two_with_sequential_identifiers() {
    let input = model(
        r#"
        inst:IfcBuilding_1 a ifc:IfcBuilding ;
            ifc:name_IfcRoot [ a ifc:IfcLabel ; express:hasString "Main" ] .
        "#,
    );
    let converter = converter(
        ConverterOptions::default()
            .with_props_level(PropsLevel::L2)
            .with_geolocation(false),
    )
    .with_identifier_source(SequentialIdentifiers::new());
    let conversion = converter.convert_str(&input);
    let property = &conversion.graphs.property;

    let building = inst("building_Building_1");
    let node = inst("nameIfcRoot_attribute_00000000-0000-0000-0000-000000000001");
    assert!(has(property, &building, &props("nameIfcRoot_attribute"), &node));
    assert!(has(
        property,
        &node,
        &iri("http://schema.org/value"),
        &Term::string("Main")
    ));
    assert_eq!(property.namespace("opm"), Some("https://w3id.org/opm#"));
}

#[test]
fn level_three_is_stamped_with_the_conversion_time() {
    let timestamp = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
    let converter = converter(ConverterOptions::default().with_props_level(PropsLevel::L3))
        .with_timestamp(timestamp);
    let conversion = converter.convert_str(MODEL);
    let property = &conversion.graphs.property;

    let wall = inst(&format!("wall_{WALL_GUID}"));
    let node = inst(&format!("fireRating_property_{WALL_GUID}"));
    let state = inst(&format!(
        "state_fireRating_property_{WALL_GUID}_{}",
        timestamp.timestamp_millis()
    ));
    assert!(has(property, &wall, &props("fireRating_property"), &node));
    assert!(has(
        property,
        &node,
        &iri("https://w3id.org/opm#hasPropertyState"),
        &state
    ));
    assert!(has(
        property,
        &state,
        &iri("http://schema.org/value"),
        &Term::string("A1")
    ));
    let generated = property
        .object(&state, "http://www.w3.org/ns/prov#generatedAtTime")
        .and_then(Term::lexical);
    assert_eq!(generated.as_deref(), Some("2024-01-02T03:04:05.000Z"));
}

#[test]
fn blank_property_nodes() {
    let converter = converter(
        ConverterOptions::default()
            .with_props_level(PropsLevel::L2)
            .with_blank_nodes(true),
    );
    let conversion = converter.convert_str(MODEL);
    let wall = inst(&format!("wall_{WALL_GUID}"));
    let node = conversion
        .graphs
        .property
        .object(&wall, &format!("{PROPS}fireRating_property"))
        .cloned()
        .unwrap();
    assert!(node.is_blank());
}

#[test]
fn ifc2x3_relationship_names() {
    let input = r#"
        @prefix ifc: <http://ifcowl.openbimstandards.org/IFC2X3_TC1#> .
        @prefix express: <https://w3id.org/express#> .
        @prefix inst: <http://example.org/model#> .

        inst:IfcBuilding_1 a ifc:IfcBuilding .
        inst:IfcBuildingStorey_2 a ifc:IfcBuildingStorey .
        inst:rel_3 ifc:relatingObject_IfcRelDecomposes inst:IfcBuilding_1 ;
            ifc:relatedObjects_IfcRelDecomposes inst:IfcBuildingStorey_2 .
        inst:IfcPropertySet_4 a ifc:IfcPropertySet ;
            ifc:hasProperties_IfcPropertySet inst:IfcPropertySingleValue_5 .
        inst:IfcPropertySingleValue_5 ifc:name_IfcProperty [ express:hasString "Elevation" ] ;
            ifc:nominalValue_IfcPropertySingleValue [ express:hasDouble "-1.#IND"^^<http://www.w3.org/2001/XMLSchema#double> ] .
        inst:rel_6 ifc:relatedObjects_IfcRelDefines inst:IfcBuildingStorey_2 ;
            ifc:relatingPropertyDefinition_IfcRelDefinesByProperties inst:IfcPropertySet_4 .
    "#;
    let conversion = Converter::new(ConverterOptions::default().with_geolocation(false)).convert_str(input);
    assert_eq!(conversion.report.schema.as_deref(), Some("IFC2X3_TC1"));

    let storey = inst("storey_BuildingStorey_2");
    assert!(has(
        &conversion.graph,
        &inst("building_Building_1"),
        &bot("hasStorey"),
        &storey
    ));
    let elevation = conversion
        .graphs
        .property
        .object(&storey, &format!("{PROPS}elevation_property_simple"))
        .and_then(|t| t.as_literal().and_then(|(v, _, _)| v.as_double()));
    assert!(elevation.is_some_and(f64::is_nan));
}

#[test]
fn input_namespace_warnings() {
    let input = r#"
        @prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
        @prefix bot: <https://w3id.org/bot#> .
        <http://example.org/b1> a ifc:IfcBuilding .
    "#;
    let conversion = Converter::new(ConverterOptions::default().with_geolocation(false)).convert_str(input);
    assert!(conversion.report.has(DiagnosticKind::MissingInstNamespace));
    assert!(conversion.report.has(DiagnosticKind::AlreadyLbd));
    assert_eq!(conversion.report.outcome, Outcome::Success);
    // default base when the input has no inst prefix
    assert!(has(
        &conversion.graph,
        &iri("https://dot.dc.rwth-aachen.de/IFCtoLBDset#building_b1"),
        &iri(RDF_TYPE),
        &bot("Building")
    ));
}

#[test]
fn ontologies_from_a_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("beo_ontology.ttl"),
        r#"
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix beo: <https://pi.pauwel.be/voc/buildingelement#> .
        beo:Wall rdfs:seeAlso <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#IfcWall> .
        "#,
    )
    .unwrap();
    // the edition's schema ontology supplies the subclass axiom
    fs::write(
        dir.path().join("IFC4_ADD1.ttl"),
        r#"
        @prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
        @prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
        ifc:IfcWallStandardCase rdfs:subClassOf ifc:IfcWall .
        "#,
    )
    .unwrap();

    let input = model(
        r#"
        inst:IfcBuildingStorey_1 a ifc:IfcBuildingStorey .
        inst:IfcBuilding_2 a ifc:IfcBuilding .
        inst:rel_3 ifc:relatingObject_IfcRelAggregates inst:IfcBuilding_2 ;
            ifc:relatedObjects_IfcRelAggregates inst:IfcBuildingStorey_1 .
        inst:IfcWallStandardCase_4 a ifc:IfcWallStandardCase .
        inst:rel_5 ifc:relatingStructure_IfcRelContainedInSpatialStructure inst:IfcBuildingStorey_1 ;
            ifc:relatedElements_IfcRelContainedInSpatialStructure inst:IfcWallStandardCase_4 .
        "#,
    );
    let converter = Converter::new(ConverterOptions::default().with_geolocation(false))
        .with_ontologies(OntologySources::in_dir(dir.path()));
    let conversion = converter.convert_str(&input);

    assert!(has(
        &conversion.graph,
        &inst("wall_WallStandardCase_4"),
        &iri(RDF_TYPE),
        &iri(&format!("{BEO}Wall"))
    ));
    // prod.ttl and the other defaults are missing
    assert!(conversion.report.has(DiagnosticKind::OntologyLoad));
    assert_eq!(conversion.report.outcome, Outcome::Success);
}

#[test]
fn reused_converter_gives_identical_output() {
    let timestamp = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
    let converter = Arc::new(
        converter(ConverterOptions::default().with_props_level(PropsLevel::L3))
            .with_timestamp(timestamp)
            .with_identifier_source(SequentialIdentifiers::new()),
    );

    let first = converter.convert_str(MODEL).to_turtle();
    let second = converter.convert_str(MODEL).to_turtle();
    assert_eq!(first, second);

    let handles: Vec<_> = (0..2)
        .map(|_| {
            let converter = Arc::clone(&converter);
            thread::spawn(move || converter.convert_str(MODEL).to_turtle())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), first);
    }
}
