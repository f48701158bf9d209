use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const MODEL: &str = r#"
@prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
@prefix express: <https://w3id.org/express#> .
@prefix inst: <http://example.org/model#> .

inst:IfcBuilding_2 a ifc:IfcBuilding ;
    ifc:globalId_IfcRoot [ express:hasString "0000000000000000000001" ] .
inst:IfcBuildingStorey_4 a ifc:IfcBuildingStorey ;
    ifc:globalId_IfcRoot [ express:hasString "0K7w7JN4TB6uQA4ddcHzrN" ] .
inst:IfcWall_20 a ifc:IfcWall ;
    ifc:globalId_IfcRoot [ express:hasString "2O2Fr$t4X7Zf8NOew3FLOH" ] .

inst:IfcRelAggregates_11 ifc:relatingObject_IfcRelAggregates inst:IfcBuilding_2 ;
    ifc:relatedObjects_IfcRelAggregates inst:IfcBuildingStorey_4 .
inst:IfcRelContainedInSpatialStructure_30
    ifc:relatingStructure_IfcRelContainedInSpatialStructure inst:IfcBuildingStorey_4 ;
    ifc:relatedElements_IfcRelContainedInSpatialStructure inst:IfcWall_20 .
"#;

const BEO: &str = r#"
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix ifc: <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
@prefix beo: <https://pi.pauwel.be/voc/buildingelement#> .

beo:Wall rdfs:seeAlso ifc:IfcWall .
"#;

const WALL: &str = "wall_9808fd7f-dc48-478e-9217-628e833d5611";

/// Temp directory holding `model.ttl` and an `ontologies/` directory,
/// used as the working directory of the command.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("model.ttl"), MODEL).unwrap();
    fs::create_dir(tmp.path().join("ontologies")).unwrap();
    fs::write(tmp.path().join("ontologies/beo_ontology.ttl"), BEO).unwrap();
    tmp
}

fn ifc2lbd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ifc2lbd");
    cmd.current_dir(work_dir.path());
    cmd.env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Flags
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("ifc2lbd")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ifc2lbd"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("ifc2lbd")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Linked Building Data"))
        .stdout(predicate::str::contains("convert"))
        .stdout(predicate::str::contains("schema"));
}

#[test]
fn verbose_quiet_conflict() {
    cargo_bin_cmd!("ifc2lbd")
        .args(["--verbose", "--quiet", "schema", "model.ttl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn level_out_of_range_is_a_usage_error() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["convert", "model.ttl", "--level", "4"])
        .assert()
        .code(2);
}

// ============================================================================
// convert
// ============================================================================

#[test]
fn convert_to_stdout() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["convert", "model.ttl", "--no-geolocation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@prefix bot: <https://w3id.org/bot#> ."))
        .stdout(predicate::str::contains("bot:Storey"))
        .stdout(predicate::str::contains(WALL))
        .stdout(predicate::str::contains("beo:Wall"))
        .stderr(predicate::str::contains("1 buildings, 1 storeys"));
}

#[test]
fn convert_without_elements() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["-q", "convert", "model.ttl", "--no-elements", "--no-geolocation"])
        .assert()
        .success()
        .stdout(predicate::str::contains("bot:Element"))
        .stdout(predicate::str::contains("beo:Wall").not())
        .stderr(predicate::str::is_empty());
}

#[test]
fn convert_to_file() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["convert", "model.ttl", "-o", "lbd.ttl", "--uri-base", "http://example.org/lbd"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let turtle = fs::read_to_string(tmp.path().join("lbd.ttl")).unwrap();
    assert!(turtle.contains("http://example.org/lbd#"));
    assert!(turtle.contains(WALL));
}

#[test]
fn convert_split() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["convert", "model.ttl", "--split", "--no-geolocation"])
        .assert()
        .success()
        .stderr(predicate::str::contains("model_topology.ttl"));

    let topology = fs::read_to_string(tmp.path().join("model_topology.ttl")).unwrap();
    let elements = fs::read_to_string(tmp.path().join("model_elements.ttl")).unwrap();
    assert!(topology.contains("bot:containsElement"));
    assert!(!topology.contains("beo:Wall"));
    assert!(elements.contains("beo:Wall"));
    assert!(tmp.path().join("model_properties.ttl").is_file());
}

#[test]
fn convert_report_json() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["-q", "convert", "model.ttl", "--report-json", "-o", "lbd.ttl"])
        .assert()
        .success()
        .stderr(predicate::str::contains("\"outcome\": \"partial\""))
        .stderr(predicate::str::contains("geolocation_unavailable"));
}

#[test]
fn convert_with_config_file() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("ifc2lbd.toml"),
        "[converter]\nbuilding_elements = false\ngeolocation = false\n",
    )
    .unwrap();
    ifc2lbd(&tmp)
        .args(["--config", "ifc2lbd.toml", "convert", "model.ttl"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beo:Wall").not());
}

#[test]
fn invalid_config_file() {
    let tmp = workspace();
    fs::write(tmp.path().join("ifc2lbd.toml"), "[converter]\nlevel = 2\n").unwrap();
    ifc2lbd(&tmp)
        .args(["--config", "ifc2lbd.toml", "convert", "model.ttl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn missing_input_fails() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["convert", "nope.ttl"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("input file not found"));
}

#[test]
fn unsupported_schema_fails() {
    let tmp = workspace();
    fs::write(
        tmp.path().join("other.ttl"),
        "@prefix ex: <http://example.org/> .\nex:a ex:b ex:c .\n",
    )
    .unwrap();
    ifc2lbd(&tmp)
        .args(["convert", "other.ttl"])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("unsupported schema"));
}

// ============================================================================
// schema
// ============================================================================

#[test]
fn schema_prints_the_edition() {
    let tmp = workspace();
    ifc2lbd(&tmp)
        .args(["schema", "model.ttl"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("IFC4_ADD1\t"));
}
