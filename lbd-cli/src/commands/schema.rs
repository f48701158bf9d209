use std::path::Path;

use lbd_convert::{load_turtle_file, IfcVocabulary};

use crate::error::CliResult;

/// Print the detected edition and its namespace
pub fn run(input: &Path) -> CliResult<()> {
    let graph = load_turtle_file(input)?;
    let vocab = IfcVocabulary::detect(&graph)?;
    println!("{}\t{}", vocab.schema.name(), vocab.namespace);
    Ok(())
}
