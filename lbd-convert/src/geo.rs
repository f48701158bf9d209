//! Site geolocation
//!
//! The reference latitude and longitude of a site are compound plane angles
//! (degrees, minutes, seconds and optionally millionths of a second) stored
//! as EXPRESS lists. They are turned into a GeoSPARQL WKT point attached to
//! every site. The whole pass is atomic: either every site gets its point or
//! nothing is written.

use lbd_graph_ir::path::path_query;
use lbd_graph_ir::{Datatype, Graph, Term, Triple};
use lbd_vocab::{express, geo, ifc, list, rdf};

use crate::context::{describe, ConversionContext};
use crate::pset::insert;
use crate::source::{GuidLookup, SourceModel};

/// Longest list walked; a compound angle has at most four components
const MAX_COMPONENTS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeoError {
    #[error("no site in the model")]
    NoSite,

    #[error("no site has both a reference latitude and longitude")]
    NoReference,

    #[error("compound angle of {subject} has {found} components, need at least 3")]
    MalformedAngle { subject: String, found: usize },

    #[error("site {0} has no decodable GUID")]
    MissingGuid(String),
}

/// Decimal degrees of a compound plane angle
pub fn compound_to_degrees(components: &[i64]) -> Option<f64> {
    match components {
        [d, m, s] => Some(*d as f64 + *m as f64 / 60.0 + *s as f64 / 3600.0),
        [d, m, s, micro] => Some(
            *d as f64 + *m as f64 / 60.0 + *s as f64 / 3600.0 + *micro as f64 / 3_600_000_000.0,
        ),
        _ => None,
    }
}

pub fn wkt_point(longitude: f64, latitude: f64) -> String {
    format!("POINT ({longitude} {latitude})")
}

/// Integers of an EXPRESS list starting at `head`
fn list_integers(graph: &Graph, head: &Term) -> Vec<i64> {
    let mut out = Vec::new();
    let mut node = Some(head.clone());
    while let Some(current) = node.take() {
        if out.len() == MAX_COMPONENTS {
            break;
        }
        let value = graph
            .object(&current, list::HAS_CONTENTS)
            .and_then(|contents| graph.object(contents, express::HAS_INTEGER))
            .and_then(|v| v.as_literal().and_then(|(lit, _, _)| lit.as_integer()));
        match value {
            Some(v) => out.push(v),
            None => break,
        }
        node = graph.object(&current, list::HAS_NEXT).cloned();
    }
    out
}

fn angle(source: &SourceModel<'_>, site: &Term, path: &[lbd_graph_ir::path::Step]) -> Option<Result<f64, GeoError>> {
    let head = path_query(source.graph(), site, path).into_iter().next()?;
    let components = list_integers(source.graph(), &head);
    Some(compound_to_degrees(&components).ok_or_else(|| GeoError::MalformedAngle {
        subject: describe(site),
        found: components.len(),
    }))
}

/// WKT point of the first site that has both reference coordinates
pub fn site_point(source: &SourceModel<'_>, sites: &[Term]) -> Result<String, GeoError> {
    if sites.is_empty() {
        return Err(GeoError::NoSite);
    }
    let latitude_path = source.vocab().latitude_path();
    let longitude_path = source.vocab().longitude_path();
    for site in sites {
        let (Some(lat), Some(lon)) = (
            angle(source, site, &latitude_path),
            angle(source, site, &longitude_path),
        ) else {
            continue;
        };
        return Ok(wkt_point(lon?, lat?));
    }
    Err(GeoError::NoReference)
}

/// Compute the geolocation triples for every site
pub fn geolocation_triples(ctx: &ConversionContext<'_>) -> Result<Vec<Triple>, GeoError> {
    let sites = ctx.source.instances(ifc::SITE);
    let wkt = site_point(&ctx.source, &sites)?;

    let mut triples = Vec::new();
    for site in &sites {
        let guid = match ctx.source.guid(site) {
            GuidLookup::Decoded(guid) => guid,
            GuidLookup::Invalid(_) | GuidLookup::Absent => {
                return Err(GeoError::MissingGuid(describe(site)))
            }
        };
        let resource = ctx.uris.format(site, "Site", Some(&guid));
        let point = Term::iri(format!("{}{guid}", geo::POINT_URN_PREFIX));
        triples.push(Triple::new(
            resource.clone(),
            Term::iri(rdf::TYPE),
            Term::iri(geo::FEATURE),
        ));
        triples.push(Triple::new(resource, Term::iri(geo::HAS_GEOMETRY), point.clone()));
        triples.push(Triple::new(
            point,
            Term::iri(geo::AS_WKT),
            Term::typed(&wkt, Datatype::from_iri(geo::WKT_LITERAL)),
        ));
    }
    Ok(triples)
}

/// Add the geolocation to the topology graph; nothing is written on error
pub fn enrich(ctx: &mut ConversionContext<'_>) -> Result<(), GeoError> {
    let triples = geolocation_triples(ctx)?;
    for t in triples {
        insert(&mut ctx.graphs.topology, t.s, t.p, t.o);
    }
    Ok(())
}
