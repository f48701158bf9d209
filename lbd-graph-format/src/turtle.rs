//! Turtle graph formatter
//!
//! Writes `@prefix` declarations followed by one block per subject:
//!
//! ```text
//! inst:wall_9808fd7f-dc48-478e-9217-628e833d5611
//!     a bot:Element ;
//!     props:fireRating_property_simple "A1" .
//! ```

use crate::policy::{BlankNodePolicy, PrefixPolicy};
use lbd_graph_ir::datatype::iri as dt_iri;
use lbd_graph_ir::{BlankId, Datatype, Graph, LiteralValue, Term, Triple};
use lbd_vocab::rdf;
use std::collections::{BTreeSet, HashMap};
use std::fmt::Write as _;
use std::io;

/// Configuration for Turtle formatting
#[derive(Clone, Debug)]
pub struct TurtleFormatConfig {
    pub prefix_policy: PrefixPolicy,
    pub blank_node_policy: BlankNodePolicy,

    /// Sort and dedupe triples before writing (default `true`)
    ///
    /// When false, subjects appear in first-use order and duplicates are kept.
    pub canonical: bool,

    /// Indentation of predicate lines
    pub indent: usize,
}

impl Default for TurtleFormatConfig {
    fn default() -> Self {
        Self {
            prefix_policy: PrefixPolicy::default(),
            blank_node_policy: BlankNodePolicy::default(),
            canonical: true,
            indent: 4,
        }
    }
}

impl TurtleFormatConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix_policy(mut self, policy: PrefixPolicy) -> Self {
        self.prefix_policy = policy;
        self
    }

    pub fn with_blank_node_policy(mut self, policy: BlankNodePolicy) -> Self {
        self.blank_node_policy = policy;
        self
    }

    pub fn with_canonical(mut self, canonical: bool) -> Self {
        self.canonical = canonical;
        self
    }

    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }
}

/// Format a graph as a Turtle document.
pub fn format_turtle(graph: &Graph, config: &TurtleFormatConfig) -> String {
    let mut triples: Vec<&Triple> = graph.iter().collect();
    if config.canonical {
        triples.sort();
        triples.dedup();
    }

    let mut writer = TurtleWriter::new(graph, config);
    let body = writer.body(&triples);

    let mut out = String::new();
    if let Some(base) = &graph.base {
        let _ = writeln!(out, "@base <{}> .", escape_iri(base));
    }
    let mut wrote_prefix = false;
    for (prefix, namespace) in &writer.prefixes {
        if config.prefix_policy == PrefixPolicy::UsedOnly && !writer.used.contains(prefix) {
            continue;
        }
        let _ = writeln!(out, "@prefix {prefix}: <{}> .", escape_iri(namespace));
        wrote_prefix = true;
    }
    if (wrote_prefix || graph.base.is_some()) && !body.is_empty() {
        out.push('\n');
    }
    out.push_str(&body);
    out
}

/// Write a graph as Turtle to `out`.
pub fn write_turtle<W: io::Write>(
    graph: &Graph,
    config: &TurtleFormatConfig,
    out: &mut W,
) -> io::Result<()> {
    out.write_all(format_turtle(graph, config).as_bytes())?;
    out.flush()
}

struct TurtleWriter<'a> {
    config: &'a TurtleFormatConfig,
    /// (prefix, namespace), longest namespace first for compaction
    by_length: Vec<(&'a str, &'a str)>,
    /// Declaration order (alphabetical)
    prefixes: Vec<(&'a str, &'a str)>,
    used: BTreeSet<&'a str>,
    blank_names: HashMap<BlankId, String>,
}

impl<'a> TurtleWriter<'a> {
    fn new(graph: &'a Graph, config: &'a TurtleFormatConfig) -> Self {
        let prefixes: Vec<(&str, &str)> = if config.prefix_policy == PrefixPolicy::None {
            Vec::new()
        } else {
            graph
                .prefixes
                .iter()
                .map(|(p, ns)| (p.as_str(), ns.as_str()))
                .collect()
        };
        let mut by_length = prefixes.clone();
        by_length.sort_by(|a, b| b.1.len().cmp(&a.1.len()).then(a.0.cmp(b.0)));

        Self {
            config,
            by_length,
            prefixes,
            used: BTreeSet::new(),
            blank_names: HashMap::new(),
        }
    }

    fn body(&mut self, triples: &[&Triple]) -> String {
        let mut out = String::new();
        for (subject, group) in group_by_subject(triples) {
            if !out.is_empty() {
                out.push('\n');
            }
            let subject_text = self.term(subject);
            let predicates = order_predicates(&group);

            if predicates.len() == 1 && predicates[0].1.len() == 1 {
                let (p, objects) = &predicates[0];
                let p = self.predicate(p);
                let o = self.term(objects[0]);
                let _ = writeln!(out, "{subject_text} {p} {o} .");
                continue;
            }

            let _ = writeln!(out, "{subject_text}");
            let indent = " ".repeat(self.config.indent);
            for (i, (p, objects)) in predicates.iter().enumerate() {
                let p = self.predicate(p);
                let objects: Vec<String> = objects.iter().map(|o| self.term(o)).collect();
                let terminator = if i + 1 == predicates.len() { " ." } else { " ;" };
                let _ = writeln!(out, "{indent}{p} {}{terminator}", objects.join(" , "));
            }
        }
        out
    }

    fn predicate(&mut self, predicate: &Term) -> String {
        if predicate.as_iri() == Some(rdf::TYPE) {
            return "a".to_string();
        }
        self.term(predicate)
    }

    fn term(&mut self, term: &Term) -> String {
        match term {
            Term::Iri(iri) => self.iri(iri),
            Term::BlankNode(id) => self.blank(id),
            Term::Literal {
                value,
                datatype,
                language,
            } => self.literal(value, datatype, language.as_deref()),
        }
    }

    fn iri(&mut self, iri: &str) -> String {
        for &(prefix, namespace) in &self.by_length {
            if let Some(local) = iri.strip_prefix(namespace) {
                if is_valid_local(local) {
                    self.used.insert(prefix);
                    return format!("{prefix}:{local}");
                }
            }
        }
        format!("<{}>", escape_iri(iri))
    }

    fn blank(&mut self, id: &BlankId) -> String {
        match self.config.blank_node_policy {
            BlankNodePolicy::Preserve => format!("_:{}", sanitize_blank_label(id.as_str())),
            BlankNodePolicy::Deterministic => {
                let next = self.blank_names.len();
                let name = self
                    .blank_names
                    .entry(id.clone())
                    .or_insert_with(|| format!("b{next}"));
                format!("_:{name}")
            }
        }
    }

    fn literal(&mut self, value: &LiteralValue, datatype: &Datatype, language: Option<&str>) -> String {
        let quoted = format!("\"{}\"", escape_string(&value.lexical()));
        if let Some(lang) = language {
            return format!("{quoted}@{lang}");
        }
        match (value, datatype.as_iri()) {
            (_, dt_iri::XSD_STRING) => quoted,
            (LiteralValue::Integer(n), dt_iri::XSD_INTEGER) => n.to_string(),
            (LiteralValue::Boolean(b), dt_iri::XSD_BOOLEAN) => b.to_string(),
            (_, dt) => {
                let dt = self.iri(dt);
                format!("{quoted}^^{dt}")
            }
        }
    }
}

/// Group triples by subject, keeping the order in which subjects first appear
fn group_by_subject<'t>(triples: &[&'t Triple]) -> Vec<(&'t Term, Vec<&'t Triple>)> {
    let mut positions: HashMap<&Term, usize> = HashMap::new();
    let mut groups: Vec<(&Term, Vec<&Triple>)> = Vec::new();
    for &triple in triples {
        match positions.get(&triple.s) {
            Some(&i) => groups[i].1.push(triple),
            None => {
                positions.insert(&triple.s, groups.len());
                groups.push((&triple.s, vec![triple]));
            }
        }
    }
    groups
}

/// Objects grouped per predicate; `rdf:type` first, then first-use order
fn order_predicates<'t>(group: &[&'t Triple]) -> Vec<(&'t Term, Vec<&'t Term>)> {
    let mut predicates: Vec<(&Term, Vec<&Term>)> = Vec::new();
    for triple in group {
        match predicates.iter_mut().find(|(p, _)| *p == &triple.p) {
            Some((_, objects)) => objects.push(&triple.o),
            None => predicates.push((&triple.p, vec![&triple.o])),
        }
    }
    // stable: keeps the relative order of the other predicates
    predicates.sort_by_key(|(p, _)| p.as_iri() != Some(rdf::TYPE));
    predicates
}

/// Conservative `PN_LOCAL` check: ASCII name characters, no leading or
/// trailing dot
fn is_valid_local(local: &str) -> bool {
    if local.starts_with(['.', '-']) || local.ends_with('.') {
        return false;
    }
    local
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
}

fn sanitize_blank_label(label: &str) -> String {
    label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

fn escape_iri(iri: &str) -> String {
    let mut out = String::with_capacity(iri.len());
    for c in iri.chars() {
        match c {
            '\x00'..='\x20' | '<' | '>' | '"' | '{' | '}' | '|' | '^' | '`' | '\\' => {
                let _ = write!(out, "\\u{:04X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}
