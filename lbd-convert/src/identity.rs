//! Output resource identity
//!
//! Minted URIs are derived from the URI base, the target type name and the
//! entity's decoded GUID. Entities without a GUID fall back to their local
//! name. Where no identifier can be derived at all, a fresh one comes from an
//! [`IdentifierSource`].

use std::sync::atomic::{AtomicU64, Ordering};

use lbd_graph_ir::Term;
use lbd_vocab::ifc;

/// Supplier of fresh identifiers in canonical GUID form
pub trait IdentifierSource: Send + Sync {
    fn fresh_id(&self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdentifiers;

impl IdentifierSource for RandomIdentifiers {
    fn fresh_id(&self) -> String {
        uuid::Uuid::new_v4().to_string()
    }
}

/// Counter-based identifiers (`00000000-0000-0000-0000-000000000001`, ...)
/// for reproducible output
#[derive(Debug, Default)]
pub struct SequentialIdentifiers {
    next: AtomicU64,
}

impl SequentialIdentifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rewind so a new conversion sees the same sequence again
    pub fn reset(&self) {
        self.next.store(0, Ordering::SeqCst);
    }
}

impl IdentifierSource for SequentialIdentifiers {
    fn fresh_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::SeqCst) + 1;
        uuid::Uuid::from_u128(n as u128).to_string()
    }
}

/// Mints output URIs below a URI base
#[derive(Clone, Debug)]
pub struct UriFormatter {
    uri_base: String,
}

impl UriFormatter {
    pub fn new(uri_base: impl Into<String>) -> Self {
        Self {
            uri_base: uri_base.into(),
        }
    }

    pub fn uri_base(&self) -> &str {
        &self.uri_base
    }

    /// URI for `entity` typed `type_name` (e.g. `"Storey"`, `"Wall"`).
    ///
    /// `decoded_guid` is the entity's canonical GUID when it has a decodable
    /// one.
    pub fn format(&self, entity: &Term, type_name: &str, decoded_guid: Option<&str>) -> Term {
        let type_slug = type_name.to_lowercase();
        if let Some(guid) = decoded_guid {
            return Term::iri(format!("{}{type_slug}_{guid}", self.uri_base));
        }

        let local = entity_slug(entity);
        if local.starts_with(ifc::PROPERTY_SINGLE_VALUE) {
            let suffix = match local.rfind('_') {
                Some(pos) if pos > 0 => &local[pos + 1..],
                _ => local.as_str(),
            };
            return Term::iri(format!("{}propertySingleValue_{suffix}", self.uri_base));
        }

        let stripped = match local.get(..3) {
            Some(head) if head.eq_ignore_ascii_case("ifc") => &local[3..],
            _ => local.as_str(),
        };
        Term::iri(format!("{}{type_slug}_{stripped}", self.uri_base))
    }

    /// Any IRI below the URI base
    pub fn mint(&self, local: &str) -> Term {
        Term::iri(format!("{}{local}", self.uri_base))
    }
}

/// Local name of an IRI, or the label of a blank node
fn entity_slug(entity: &Term) -> String {
    match entity {
        Term::BlankNode(id) => id.as_str().to_string(),
        other => other.local_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BASE: &str = "http://example.org/lbd#";
    const INST: &str = "http://example.org/model#";

    #[test]
    fn test_guid_uri() {
        let f = UriFormatter::new(BASE);
        let wall = Term::iri(format!("{INST}IfcWall_12"));
        assert_eq!(
            f.format(&wall, "Wall", Some("9808fd7f-dc48-478e-9217-628e833d5611")),
            Term::iri("http://example.org/lbd#wall_9808fd7f-dc48-478e-9217-628e833d5611")
        );
    }

    #[test]
    fn test_local_name_fallbacks() {
        let f = UriFormatter::new(BASE);
        assert_eq!(
            f.format(&Term::iri(format!("{INST}IfcPropertySingleValue_381")), "Wall", None),
            Term::iri("http://example.org/lbd#propertySingleValue_381")
        );
        assert_eq!(
            f.format(&Term::iri(format!("{INST}IFCBuildingStorey_7")), "Storey", None),
            Term::iri("http://example.org/lbd#storey_BuildingStorey_7")
        );
        assert_eq!(
            f.format(&Term::iri(format!("{INST}storey7")), "Storey", None),
            Term::iri("http://example.org/lbd#storey_storey7")
        );
    }

    #[test]
    fn test_sequential_identifiers() {
        let ids = SequentialIdentifiers::new();
        assert_eq!(ids.fresh_id(), "00000000-0000-0000-0000-000000000001");
        assert_eq!(ids.fresh_id(), "00000000-0000-0000-0000-000000000002");
        ids.reset();
        assert_eq!(ids.fresh_id(), "00000000-0000-0000-0000-000000000001");
    }

    #[test]
    fn test_random_identifiers_are_canonical() {
        let id = RandomIdentifiers.fresh_id();
        assert_eq!(id.len(), 36);
        assert!(crate::guid::compress(&id).is_ok());
    }
}
