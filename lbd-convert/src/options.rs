//! Converter configuration

use serde::{Deserialize, Serialize};

/// URI base used when neither the caller nor the input supplies one
pub const DEFAULT_URI_BASE: &str = "https://dot.dc.rwth-aachen.de/IFCtoLBDset#";

/// Detail level of the emitted property structures
///
/// - `L1`: a direct literal per property (`props:<name>_property_simple`)
/// - `L2`: an intermediate property node carrying `schema:value`
/// - `L3`: a property node with an OPM property state stamped with
///   `prov:generatedAtTime`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum PropsLevel {
    #[default]
    L1,
    L2,
    L3,
}

impl PropsLevel {
    pub fn as_u8(self) -> u8 {
        match self {
            PropsLevel::L1 => 1,
            PropsLevel::L2 => 2,
            PropsLevel::L3 => 3,
        }
    }
}

impl TryFrom<u8> for PropsLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(PropsLevel::L1),
            2 => Ok(PropsLevel::L2),
            3 => Ok(PropsLevel::L3),
            other => Err(format!("property level must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<PropsLevel> for u8 {
    fn from(level: PropsLevel) -> u8 {
        level.as_u8()
    }
}

impl std::fmt::Display for PropsLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// Options of one converter
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterOptions {
    /// Namespace for minted resources; see [`ConverterOptions::resolve_uri_base`]
    pub uri_base: Option<String>,
    pub props_level: PropsLevel,
    /// Use blank nodes for L2/L3 property and state nodes
    pub blank_nodes: bool,
    /// Merge the product graph (element classes) into the output
    pub building_elements: bool,
    /// Collect property sets and merge the property graph into the output
    pub building_properties: bool,
    pub geolocation: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            uri_base: None,
            props_level: PropsLevel::L1,
            blank_nodes: false,
            building_elements: true,
            building_properties: true,
            geolocation: true,
        }
    }
}

impl ConverterOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_uri_base(mut self, uri_base: impl Into<String>) -> Self {
        self.uri_base = Some(uri_base.into());
        self
    }

    pub fn with_props_level(mut self, level: PropsLevel) -> Self {
        self.props_level = level;
        self
    }

    pub fn with_blank_nodes(mut self, enabled: bool) -> Self {
        self.blank_nodes = enabled;
        self
    }

    pub fn with_building_elements(mut self, enabled: bool) -> Self {
        self.building_elements = enabled;
        self
    }

    pub fn with_building_properties(mut self, enabled: bool) -> Self {
        self.building_properties = enabled;
        self
    }

    pub fn with_geolocation(mut self, enabled: bool) -> Self {
        self.geolocation = enabled;
        self
    }

    /// The URI base for a conversion: the configured base, else the input's
    /// `inst` namespace, else [`DEFAULT_URI_BASE`]. A base that does not end
    /// in `#` or `/` gets `#` appended.
    pub fn resolve_uri_base(&self, inst_namespace: Option<&str>) -> String {
        let base = self
            .uri_base
            .as_deref()
            .or(inst_namespace)
            .unwrap_or(DEFAULT_URI_BASE);
        normalize_uri_base(base)
    }
}

pub fn normalize_uri_base(base: &str) -> String {
    if base.ends_with('#') || base.ends_with('/') {
        base.to_string()
    } else {
        format!("{base}#")
    }
}
