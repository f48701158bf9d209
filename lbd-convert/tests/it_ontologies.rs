//! The starter ontology set shipped in `ontologies/`

mod support;

use std::path::PathBuf;

use lbd_convert::pset::PropertyDefinitions;
use lbd_convert::{Converter, ConverterOptions, DiagnosticKind, IfcSchema, OntologySources, Outcome, TypeMapper};
use pretty_assertions::assert_eq;
use support::*;

fn shipped() -> OntologySources {
    OntologySources::in_dir(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../ontologies"))
}

#[test]
fn every_shipped_file_loads() {
    let loaded = shipped().load(IfcSchema::Ifc4Add2);
    assert!(loaded.diagnostics.is_empty(), "{:?}", loaded.diagnostics);
    // five fixed files and four property set files
    assert_eq!(loaded.files_loaded, 9);
    assert!(loaded.schema.is_none());
}

#[test]
fn shipped_mapping_is_unambiguous() {
    let loaded = shipped().load(IfcSchema::Ifc4Add2);
    let types = TypeMapper::build(&loaded.ontology, "https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD2/OWL#");

    assert!(types.ambiguous_classes().is_empty());
    assert_eq!(types.resolve("IfcWall"), Some(format!("{BEO}Wall").as_str()));
    assert_eq!(
        types.resolve("IfcFlowTerminal"),
        Some("https://pi.pauwel.be/voc/distributionelement#FlowTerminal")
    );
    assert_eq!(types.resolve("IfcSpace"), None);

    let definitions = PropertyDefinitions::from_ontology(&loaded.ontology);
    assert!(definitions.get("Pset_WallCommon", "FireRating").is_some());
    assert!(definitions.get("Pset_ManufacturerTypeInformation", "Manufacturer").is_some());
}

#[test]
fn model_converts_with_the_shipped_set() {
    let conversion = Converter::new(ConverterOptions::default())
        .with_ontologies(shipped())
        .convert_str(MODEL);
    let report = &conversion.report;

    assert_eq!(report.outcome, Outcome::Success, "{:?}", report.diagnostics);
    assert!(!report.has(DiagnosticKind::OntologyLoad));
    // walls, door, flow terminal and covering
    assert_eq!(report.stats.elements, 5);
    assert!(has(
        &conversion.graph,
        &inst("flowterminal_FlowTerminal_24"),
        &iri(RDF_TYPE),
        &iri("https://pi.pauwel.be/voc/distributionelement#FlowTerminal")
    ));
}
