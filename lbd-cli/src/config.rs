//! Config file
//!
//! ```toml
//! [converter]
//! uri_base = "http://example.org/building#"
//! props_level = 2
//!
//! [ontologies]
//! dir = "ontologies"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use lbd_convert::{ConverterOptions, OntologySources, PropsLevel};
use serde::Deserialize;

use crate::cli::ConvertArgs;
use crate::error::{CliError, CliResult};

/// Ontology directory picked up from the working directory when nothing
/// else names one
pub const DEFAULT_ONTOLOGY_DIR: &str = "ontologies";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub converter: ConverterOptions,
    pub ontologies: OntologySources,
}

/// Read the config file; no path gives the defaults
pub fn load(path: Option<&Path>) -> CliResult<Config> {
    let Some(path) = path else {
        return Ok(Config::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("cannot read {}: {e}", path.display())))?;
    let config: Config = toml::from_str(&text)?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

impl Config {
    /// Apply command line flags on top of the file settings
    pub fn apply(mut self, args: &ConvertArgs) -> CliResult<Self> {
        let opts = &mut self.converter;
        if let Some(base) = &args.uri_base {
            opts.uri_base = Some(base.clone());
        }
        if let Some(level) = args.level {
            opts.props_level = PropsLevel::try_from(level).map_err(CliError::Usage)?;
        }
        opts.blank_nodes |= args.blank_nodes;
        if args.no_elements {
            opts.building_elements = false;
        }
        if args.no_properties {
            opts.building_properties = false;
        }
        if args.no_geolocation {
            opts.geolocation = false;
        }

        if let Some(dir) = &args.ontologies {
            if !dir.is_dir() {
                return Err(CliError::Usage(format!(
                    "ontology directory not found: {}",
                    dir.display()
                )));
            }
            self.ontologies.dir = Some(dir.clone());
        } else if self.ontologies.dir.is_none() {
            let fallback = PathBuf::from(DEFAULT_ONTOLOGY_DIR);
            if fallback.is_dir() {
                self.ontologies.dir = Some(fallback);
            }
        }
        Ok(self)
    }
}
