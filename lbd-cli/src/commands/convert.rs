use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use colored::Colorize;
use lbd_convert::status::drain;
use lbd_convert::{Conversion, Converter, Outcome, StatusLevel};
use lbd_graph_format::{write_turtle, TurtleFormatConfig};
use lbd_graph_ir::Graph;

use crate::cli::ConvertArgs;
use crate::config::Config;
use crate::error::{CliError, CliResult};

pub fn run(args: &ConvertArgs, config: Config, quiet: bool) -> CliResult<()> {
    let config = config.apply(args)?;
    if !args.input.is_file() {
        return Err(CliError::Input(format!(
            "input file not found: {}",
            args.input.display()
        )));
    }

    let converter = Converter::new(config.converter).with_ontologies(config.ontologies);
    let mut status = converter.subscribe();
    let conversion = converter.convert_file(&args.input);

    for event in drain(&mut status) {
        match event.level {
            StatusLevel::Error => tracing::error!("{}", event.message),
            StatusLevel::Info => tracing::info!("{}", event.message),
        }
    }

    if args.report_json {
        eprintln!("{}", serde_json::to_string_pretty(&conversion.report)?);
    }

    if let Some(error) = &conversion.report.error {
        return Err(CliError::Convert(error.clone()));
    }

    if args.split {
        let paths = split_paths(&args.input, args.output.as_deref());
        write_split(&conversion, &paths)?;
        if !quiet {
            for path in &paths {
                eprintln!("{} {}", "wrote".green(), path.display());
            }
        }
    } else {
        match &args.output {
            Some(path) => write_graph(&conversion.graph, path)?,
            None => write_turtle(
                &conversion.graph,
                &TurtleFormatConfig::default(),
                &mut io::stdout().lock(),
            )?,
        }
    }

    if !quiet {
        print_summary(&conversion);
    }
    Ok(())
}

/// `<stem>_topology.ttl`, `<stem>_elements.ttl` and `<stem>_properties.ttl`
/// next to `output`, or next to `input` without one
pub fn split_paths(input: &Path, output: Option<&Path>) -> [PathBuf; 3] {
    let base = output.unwrap_or(input);
    let dir = base.parent().map(Path::to_path_buf).unwrap_or_default();
    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "model".to_string());
    ["topology", "elements", "properties"].map(|part| dir.join(format!("{stem}_{part}.ttl")))
}

fn write_split(conversion: &Conversion, paths: &[PathBuf; 3]) -> CliResult<()> {
    let graphs = &conversion.graphs;
    write_graph(&graphs.topology, &paths[0])?;
    write_graph(&graphs.product, &paths[1])?;
    write_graph(&graphs.property, &paths[2])
}

fn write_graph(graph: &Graph, path: &Path) -> CliResult<()> {
    let mut file = fs::File::create(path)
        .map_err(|e| CliError::Input(format!("cannot write {}: {e}", path.display())))?;
    write_turtle(graph, &TurtleFormatConfig::default(), &mut file)?;
    tracing::debug!(path = %path.display(), triples = graph.len(), "graph written");
    Ok(())
}

fn print_summary(conversion: &Conversion) {
    let report = &conversion.report;
    for diagnostic in &report.diagnostics {
        eprintln!("{} {diagnostic}", "warning:".yellow().bold());
    }
    let outcome = match report.outcome {
        Outcome::Success => "success".green(),
        Outcome::Partial => "partial".yellow(),
        Outcome::Failed => "failed".red(),
    };
    let stats = report.stats;
    eprintln!(
        "{outcome}: {} triples ({} buildings, {} storeys, {} spaces, {} elements)",
        stats.triples, stats.buildings, stats.storeys, stats.spaces, stats.elements
    );
}
