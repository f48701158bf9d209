use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ifc2lbd", about = "Convert ifcOWL building models to Linked Building Data", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output (also respects NO_COLOR env var)
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert an ifcOWL Turtle file to LBD
    Convert(ConvertArgs),

    /// Print the IFC edition of an ifcOWL Turtle file
    Schema {
        /// ifcOWL Turtle file
        input: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ConvertArgs {
    /// ifcOWL Turtle file
    pub input: PathBuf,

    /// Output file (stdout when omitted)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,

    /// Namespace for the generated resources
    #[arg(long)]
    pub uri_base: Option<String>,

    /// Property detail level (1, 2 or 3)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=3))]
    pub level: Option<u8>,

    /// Use blank nodes for property and state nodes
    #[arg(long)]
    pub blank_nodes: bool,

    /// Leave element classes out of the output
    #[arg(long)]
    pub no_elements: bool,

    /// Leave property sets and attributes out of the output
    #[arg(long)]
    pub no_properties: bool,

    /// Skip site geolocation
    #[arg(long)]
    pub no_geolocation: bool,

    /// Write the topology, element and property graphs to separate files
    #[arg(long)]
    pub split: bool,

    /// Directory holding the LBD ontologies and property set definitions
    #[arg(long)]
    pub ontologies: Option<PathBuf>,

    /// Print the conversion report as JSON on stderr
    #[arg(long)]
    pub report_json: bool,
}
