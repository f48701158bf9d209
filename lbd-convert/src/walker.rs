//! Spatial hierarchy traversal
//!
//! Sites, buildings, storeys and spaces are walked depth-first along the
//! aggregation and containment relationships of the source and re-emitted
//! as BOT zones. Elements hanging off storeys and spaces are connected with
//! their element class, then followed into hosted and aggregated parts.

use std::collections::HashSet;

use lbd_graph_ir::Term;
use lbd_vocab::{bot, ifc, local_name, rdf};

use crate::context::{describe, ConversionContext};
use crate::pset::insert;
use crate::report::{Diagnostic, DiagnosticKind};

pub struct HierarchyWalker<'a, 'c> {
    ctx: &'a mut ConversionContext<'c>,
    elements: HashSet<Term>,
}

impl<'a, 'c> HierarchyWalker<'a, 'c> {
    pub fn new(ctx: &'a mut ConversionContext<'c>) -> Self {
        Self {
            ctx,
            elements: HashSet::new(),
        }
    }

    /// Walk every site; a model without sites is walked from its buildings
    pub fn walk(mut self) {
        let sites = self.ctx.source.instances(ifc::SITE);
        if sites.is_empty() {
            tracing::debug!("no IfcSite, walking from buildings");
            for building in self.ctx.source.instances(ifc::BUILDING) {
                self.building(None, &building);
            }
        } else {
            for site in &sites {
                self.site(site);
            }
        }
        self.ctx.stats.elements = self.elements.len();
    }

    fn topology(&mut self, s: &Term, p: &str, o: Term) {
        insert(&mut self.ctx.graphs.topology, s.clone(), Term::iri(p), o);
    }

    /// Emit the zone resource with its class, attributes and property sets
    fn zone(&mut self, entity: &Term, type_name: &str, class: &str) -> Term {
        let (uri, guid) = self.ctx.resource(entity, type_name);
        self.topology(&uri, rdf::TYPE, Term::iri(class));
        self.ctx.copy_attributes(entity, &uri, guid.as_deref());
        self.ctx.connect_property_sets(entity, &uri, guid.as_deref());
        uri
    }

    /// `entity` must be declared `expected`; otherwise the branch is dropped
    fn expect_type(&mut self, entity: &Term, expected: &str) -> bool {
        if self.ctx.source.is_a(entity, expected) {
            return true;
        }
        let found = self.ctx.source.type_local_name(entity);
        self.ctx.diagnose(
            Diagnostic::new(
                DiagnosticKind::MalformedHierarchy,
                format!(
                    "expected {expected}, found {}",
                    if found.is_empty() { "untyped entity" } else { found }
                ),
            )
            .with_subject(describe(entity)),
        );
        false
    }

    fn site(&mut self, site: &Term) {
        let uri = self.zone(site, "Site", bot::SITE);
        self.ctx.stats.sites += 1;
        for building in self.ctx.source.aggregated(site) {
            self.building(Some(&uri), &building);
        }
    }

    fn building(&mut self, site: Option<&Term>, building: &Term) {
        if !self.expect_type(building, ifc::BUILDING) {
            return;
        }
        let uri = self.zone(building, "Building", bot::BUILDING);
        self.ctx.stats.buildings += 1;
        if let Some(site) = site {
            self.topology(site, bot::HAS_BUILDING, uri.clone());
        }
        for storey in self.ctx.source.aggregated(building) {
            self.storey(&uri, &storey);
        }
    }

    fn storey(&mut self, building: &Term, storey: &Term) {
        self.ctx
            .status
            .info(format!("Storey: {}", local_name(&describe(storey))));
        if !self.expect_type(storey, ifc::BUILDING_STOREY) {
            return;
        }
        let uri = self.zone(storey, "Storey", bot::STOREY);
        self.ctx.stats.storeys += 1;
        self.topology(building, bot::HAS_STOREY, uri.clone());

        for element in self.ctx.source.contained(storey) {
            if self.ctx.source.is_a(&element, ifc::SPACE) {
                continue;
            }
            self.element(&uri, bot::CONTAINS_ELEMENT, &element, &mut Vec::new());
        }
        for space in self.ctx.source.aggregated(storey) {
            self.space(&uri, &space);
        }
    }

    fn space(&mut self, storey: &Term, space: &Term) {
        if !self.expect_type(space, ifc::SPACE) {
            return;
        }
        let uri = self.zone(space, "Space", bot::SPACE);
        self.ctx.stats.spaces += 1;
        self.topology(storey, bot::HAS_SPACE, uri.clone());

        for element in self.ctx.source.contained(space) {
            self.element(&uri, bot::CONTAINS_ELEMENT, &element, &mut Vec::new());
        }
        for element in self.ctx.source.adjacent(space) {
            self.element(&uri, bot::ADJACENT_ELEMENT, &element, &mut Vec::new());
        }
    }

    /// Connect `element` to `parent` with `link`, then its hosted and
    /// aggregated parts with `bot:hasSubElement`.
    ///
    /// `chain` holds the source elements above this one; an element already
    /// on it is not entered again.
    fn element(&mut self, parent: &Term, link: &str, element: &Term, chain: &mut Vec<Term>) {
        if chain.contains(element) {
            self.ctx.diagnose(
                Diagnostic::new(DiagnosticKind::CycleDetected, "element contains itself")
                    .with_subject(describe(element)),
            );
            return;
        }
        let Some(target) = self.ctx.resolve_type(element) else {
            return;
        };

        let (uri, guid) = self.ctx.resource(element, local_name(&target));
        let product = &mut self.ctx.graphs.product;
        insert(product, uri.clone(), Term::iri(rdf::TYPE), Term::iri(&target));
        if let Some(tag) = self.ctx.source.predefined_type(element) {
            insert(
                product,
                uri.clone(),
                Term::iri(rdf::TYPE),
                Term::iri(format!("{target}-{tag}")),
            );
        }
        self.topology(&uri, rdf::TYPE, Term::iri(bot::ELEMENT));
        self.topology(parent, link, uri.clone());
        self.elements.insert(uri.clone());

        self.ctx.connect_property_sets(element, &uri, guid.as_deref());
        self.ctx.copy_attributes(element, &uri, guid.as_deref());

        chain.push(element.clone());
        let parts = self.ctx.source.hosted(element);
        let parts = parts.into_iter().chain(self.ctx.source.aggregated(element));
        for part in parts {
            self.element(&uri, bot::HAS_SUB_ELEMENT, &part, chain);
        }
        chain.pop();
    }
}
