//! Recursive-descent Turtle parser that emits to a [`GraphSink`].

use std::collections::HashMap;

use lbd_graph_ir::{Datatype, GraphSink, LiteralValue, TermId};
use lbd_vocab::rdf;

use crate::error::{Result, TurtleError};
use crate::lex::{tokenize, Token, TokenKind};

/// Parse a Turtle document into `sink`.
pub fn parse<S: GraphSink>(input: &str, sink: &mut S) -> Result<()> {
    Parser::new(input, sink)?.parse()
}

/// Turtle parser state.
pub struct Parser<'a, S> {
    tokens: Vec<Token>,
    pos: usize,
    sink: &'a mut S,
    prefixes: HashMap<String, String>,
    base: Option<String>,
}

impl<'a, S: GraphSink> Parser<'a, S> {
    pub fn new(input: &str, sink: &'a mut S) -> Result<Self> {
        Ok(Self {
            tokens: tokenize(input)?,
            pos: 0,
            sink,
            prefixes: HashMap::new(),
            base: None,
        })
    }

    pub fn parse(mut self) -> Result<()> {
        while !matches!(self.current().kind, TokenKind::Eof) {
            self.parse_statement()?;
        }
        Ok(())
    }

    fn current(&self) -> &Token {
        // the token stream always ends with Eof and `advance` never moves past it
        &self.tokens[self.pos]
    }

    fn advance(&mut self) -> TokenKind {
        let kind = self.tokens[self.pos].kind.clone();
        if !matches!(kind, TokenKind::Eof) {
            self.pos += 1;
        }
        kind
    }

    fn error(&self, expected: &str) -> TurtleError {
        let token = self.current();
        TurtleError::parse(token.start, format!("expected {expected}, found {}", token.kind))
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<()> {
        if self.current().kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(self.error(expected))
        }
    }

    fn parse_statement(&mut self) -> Result<()> {
        match self.current().kind {
            TokenKind::KwPrefix | TokenKind::KwSparqlPrefix => self.parse_prefix_directive(),
            TokenKind::KwBase | TokenKind::KwSparqlBase => self.parse_base_directive(),
            _ => {
                let subject = self.parse_subject()?;
                self.parse_predicate_object_list(subject)?;
                self.expect(TokenKind::Dot, "'.' after triples")
            }
        }
    }

    fn parse_prefix_directive(&mut self) -> Result<()> {
        let sparql_style = self.advance() == TokenKind::KwSparqlPrefix;

        let prefix = match self.advance() {
            TokenKind::PrefixedName { prefix, local } if local.is_empty() => prefix.to_string(),
            _ => return Err(self.previous_error("prefix name")),
        };
        let namespace = match self.advance() {
            TokenKind::Iri(iri) => self.resolve_iri(&iri)?,
            _ => return Err(self.previous_error("namespace IRI")),
        };

        self.sink.on_prefix(&prefix, &namespace);
        self.prefixes.insert(prefix, namespace);

        if !sparql_style {
            self.expect(TokenKind::Dot, "'.' after @prefix")?;
        }
        Ok(())
    }

    fn parse_base_directive(&mut self) -> Result<()> {
        let sparql_style = self.advance() == TokenKind::KwSparqlBase;

        let base = match self.advance() {
            TokenKind::Iri(iri) => self.resolve_iri(&iri)?,
            _ => return Err(self.previous_error("base IRI")),
        };
        self.sink.on_base(&base);
        self.base = Some(base);

        if !sparql_style {
            self.expect(TokenKind::Dot, "'.' after @base")?;
        }
        Ok(())
    }

    /// Error pointing at the token just consumed
    fn previous_error(&self, expected: &str) -> TurtleError {
        let token = &self.tokens[self.pos.saturating_sub(1)];
        TurtleError::parse(token.start, format!("expected {expected}, found {}", token.kind))
    }

    /// IRI or prefixed name at the current position, consumed on success
    fn try_iri(&mut self) -> Result<Option<String>> {
        let iri = match &self.current().kind {
            TokenKind::Iri(iri) => self.resolve_iri(iri)?,
            TokenKind::PrefixedName { prefix, local } => self.expand_prefixed_name(prefix, local)?,
            _ => return Ok(None),
        };
        self.advance();
        Ok(Some(iri))
    }

    fn parse_subject(&mut self) -> Result<TermId> {
        if let Some(iri) = self.try_iri()? {
            return Ok(self.sink.term_iri(&iri));
        }
        self.parse_node().transpose().unwrap_or_else(|| Err(self.error("subject")))
    }

    /// Blank nodes and collections, shared by subject and object position
    fn parse_node(&mut self) -> Result<Option<TermId>> {
        let id = match self.current().kind.clone() {
            TokenKind::BlankNodeLabel(label) => {
                self.advance();
                self.sink.term_blank(Some(&label))
            }
            TokenKind::Anon => {
                self.advance();
                self.sink.term_blank(None)
            }
            TokenKind::Nil => {
                self.advance();
                self.sink.term_iri(rdf::NIL)
            }
            TokenKind::LBracket => self.parse_blank_node_property_list()?,
            TokenKind::LParen => self.parse_collection()?,
            _ => return Ok(None),
        };
        Ok(Some(id))
    }

    fn parse_predicate_object_list(&mut self, subject: TermId) -> Result<()> {
        loop {
            let predicate = self.parse_predicate()?;
            loop {
                let object = self.parse_object()?;
                self.sink.emit_triple(subject, predicate, object);
                if self.current().kind != TokenKind::Comma {
                    break;
                }
                self.advance();
            }

            if self.current().kind != TokenKind::Semicolon {
                return Ok(());
            }
            while self.current().kind == TokenKind::Semicolon {
                self.advance();
            }
            if matches!(
                self.current().kind,
                TokenKind::Dot | TokenKind::RBracket | TokenKind::Eof
            ) {
                return Ok(());
            }
        }
    }

    fn parse_predicate(&mut self) -> Result<TermId> {
        if self.current().kind == TokenKind::KwA {
            self.advance();
            return Ok(self.sink.term_iri(rdf::TYPE));
        }
        match self.try_iri()? {
            Some(iri) => Ok(self.sink.term_iri(&iri)),
            None => Err(self.error("predicate")),
        }
    }

    fn parse_object(&mut self) -> Result<TermId> {
        if let Some(iri) = self.try_iri()? {
            return Ok(self.sink.term_iri(&iri));
        }
        if let Some(node) = self.parse_node()? {
            return Ok(node);
        }

        let literal = match self.current().kind.clone() {
            TokenKind::String(value) => {
                self.advance();
                return self.parse_string_suffix(&value);
            }
            TokenKind::Integer(n) => self
                .sink
                .term_literal_value(LiteralValue::Integer(n), Datatype::xsd_integer()),
            TokenKind::Decimal(s) => self.sink.term_literal(&s, Datatype::xsd_decimal(), None),
            TokenKind::Double(s) => match s.parse::<f64>() {
                Ok(d) => self
                    .sink
                    .term_literal_value(LiteralValue::Double(d), Datatype::xsd_double()),
                Err(_) => self.sink.term_literal(&s, Datatype::xsd_double(), None),
            },
            TokenKind::Boolean(b) => self
                .sink
                .term_literal_value(LiteralValue::Boolean(b), Datatype::xsd_boolean()),
            _ => return Err(self.error("object")),
        };
        self.advance();
        Ok(literal)
    }

    /// Language tag or datatype after a string literal
    fn parse_string_suffix(&mut self, value: &str) -> Result<TermId> {
        match self.current().kind.clone() {
            TokenKind::LangTag(lang) => {
                self.advance();
                Ok(self
                    .sink
                    .term_literal(value, Datatype::rdf_lang_string(), Some(&lang)))
            }
            TokenKind::DoubleCaret => {
                self.advance();
                let datatype = self.try_iri()?.ok_or_else(|| self.error("datatype IRI"))?;
                Ok(self
                    .sink
                    .term_literal(value, Datatype::from_iri(datatype), None))
            }
            _ => Ok(self.sink.term_literal(value, Datatype::xsd_string(), None)),
        }
    }

    /// `[ predicate object ; ... ]`
    fn parse_blank_node_property_list(&mut self) -> Result<TermId> {
        self.expect(TokenKind::LBracket, "'['")?;
        let node = self.sink.term_blank(None);
        if self.current().kind != TokenKind::RBracket {
            self.parse_predicate_object_list(node)?;
        }
        self.expect(TokenKind::RBracket, "']'")?;
        Ok(node)
    }

    /// `( item1 item2 ... )` as an rdf:first / rdf:rest chain
    fn parse_collection(&mut self) -> Result<TermId> {
        self.expect(TokenKind::LParen, "'('")?;
        if self.current().kind == TokenKind::RParen {
            self.advance();
            return Ok(self.sink.term_iri(rdf::NIL));
        }

        let first = self.sink.term_iri(rdf::FIRST);
        let rest = self.sink.term_iri(rdf::REST);
        let head = self.sink.term_blank(None);
        let mut cell = head;

        loop {
            let item = self.parse_object()?;
            self.sink.emit_triple(cell, first, item);
            if self.current().kind == TokenKind::RParen {
                let nil = self.sink.term_iri(rdf::NIL);
                self.sink.emit_triple(cell, rest, nil);
                break;
            }
            let next = self.sink.term_blank(None);
            self.sink.emit_triple(cell, rest, next);
            cell = next;
        }

        self.expect(TokenKind::RParen, "')'")?;
        Ok(head)
    }

    fn expand_prefixed_name(&self, prefix: &str, local: &str) -> Result<String> {
        self.prefixes
            .get(prefix)
            .map(|ns| format!("{ns}{local}"))
            .ok_or_else(|| TurtleError::UndefinedPrefix(prefix.to_string()))
    }

    /// Resolve a possibly relative IRI against the current base.
    ///
    /// Covers the reference forms that occur in building data exports:
    /// absolute IRIs, fragments, absolute paths, and relative paths.
    fn resolve_iri(&self, reference: &str) -> Result<String> {
        if has_scheme(reference) {
            return Ok(reference.to_string());
        }
        let base = self.base.as_deref().ok_or_else(|| {
            TurtleError::IriResolution(format!("relative IRI '{reference}' without base"))
        })?;

        let without_fragment = base.split('#').next().unwrap_or(base);
        let resolved = if reference.is_empty() {
            base.to_string()
        } else if reference.starts_with('#') {
            format!("{without_fragment}{reference}")
        } else if let Some(path) = reference.strip_prefix('/') {
            let authority_end = without_fragment
                .find("://")
                .and_then(|i| without_fragment[i + 3..].find('/').map(|j| i + 3 + j))
                .unwrap_or(without_fragment.len());
            format!("{}/{}", &without_fragment[..authority_end], path)
        } else {
            let dir_end = without_fragment.rfind('/').map_or(0, |i| i + 1);
            format!("{}{}", &without_fragment[..dir_end], reference)
        };
        Ok(resolved)
    }
}

fn has_scheme(reference: &str) -> bool {
    match reference.split_once(':') {
        Some((scheme, _)) => {
            scheme.starts_with(|c: char| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lbd_graph_ir::{Graph, GraphCollectorSink, Term};
    use pretty_assertions::assert_eq;

    fn parse_graph(input: &str) -> Graph {
        let mut sink = GraphCollectorSink::new();
        parse(input, &mut sink).unwrap();
        sink.finish()
    }

    const IFC: &str = "https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#";

    #[test]
    fn test_ifcowl_fragment() {
        let graph = parse_graph(
            r#"
            @prefix ifc:  <https://standards.buildingsmart.org/IFC/DEV/IFC4/ADD1/OWL#> .
            @prefix inst: <http://linkedbuildingdata.net/ifc/resources/model#> .
            @prefix express: <https://w3id.org/express#> .
            @prefix xsd: <http://www.w3.org/2001/XMLSchema#> .

            inst:IfcWall_12 a ifc:IfcWall ;
                ifc:globalId_IfcRoot inst:IfcGloballyUniqueId_13 .
            inst:IfcGloballyUniqueId_13 a ifc:IfcGloballyUniqueId ;
                express:hasString "2O2Fr$t4X7Zf8NOew3FLOH" .
            inst:IfcReal_14 express:hasDouble "-1.#IND"^^xsd:double .
            "#,
        );

        assert_eq!(graph.len(), 5);
        assert_eq!(
            graph.namespace("inst"),
            Some("http://linkedbuildingdata.net/ifc/resources/model#")
        );

        let wall = Term::iri("http://linkedbuildingdata.net/ifc/resources/model#IfcWall_12");
        assert_eq!(graph.type_of(&wall), Some(&Term::iri(format!("{IFC}IfcWall"))));

        let real = Term::iri("http://linkedbuildingdata.net/ifc/resources/model#IfcReal_14");
        let value = graph.object(&real, "https://w3id.org/express#hasDouble").unwrap();
        assert_eq!(value.lexical().as_deref(), Some("-1.#IND"));
    }

    #[test]
    fn test_literals() {
        let graph = parse_graph(
            r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:int 5 ; ex:dec 2.5 ; ex:dbl 1.0e3 ; ex:bool true ;
                 ex:lang "muur"@nl ; ex:plain "A1" .
            "#,
        );
        let s = Term::iri("http://example.org/s");
        let get = |p: &str| graph.object(&s, &format!("http://example.org/{p}")).cloned();

        assert_eq!(get("int"), Some(Term::integer(5)));
        assert_eq!(get("dec"), Some(Term::typed("2.5", Datatype::xsd_decimal())));
        assert_eq!(get("dbl"), Some(Term::double(1000.0)));
        assert_eq!(get("bool"), Some(Term::boolean(true)));
        assert_eq!(get("lang"), Some(Term::lang_string("muur", "nl")));
        assert_eq!(get("plain"), Some(Term::string("A1")));
    }

    #[test]
    fn test_object_lists_and_blank_nodes() {
        let graph = parse_graph(
            r#"
            @prefix ex: <http://example.org/> .
            ex:a ex:p ex:b, ex:c ;
                 ex:q [ ex:r "x" ] ;
                 .
            _:n ex:p ex:a .
            "#,
        );
        assert_eq!(graph.len(), 5);
        let a = Term::iri("http://example.org/a");
        assert_eq!(graph.objects(&a, "http://example.org/p").len(), 2);
    }

    #[test]
    fn test_collection() {
        let graph = parse_graph(
            r#"
            @prefix ex: <http://example.org/> .
            ex:s ex:list ( 1 2 ) .
            "#,
        );
        // ex:list + 2 × (rdf:first, rdf:rest)
        assert_eq!(graph.len(), 5);
    }

    #[test]
    fn test_base_resolution() {
        let graph = parse_graph(
            r#"
            @base <http://example.org/dir/file#frag> .
            <#a> <p> </root> .
            "#,
        );
        let t = &graph.triples()[0];
        assert_eq!(t.s.as_iri(), Some("http://example.org/dir/file#a"));
        assert_eq!(t.p.as_iri(), Some("http://example.org/dir/p"));
        assert_eq!(t.o.as_iri(), Some("http://example.org/root"));
    }

    #[test]
    fn test_sparql_style_prefix() {
        let graph = parse_graph(
            "PREFIX ex: <http://example.org/>\nex:s ex:p ex:o .",
        );
        assert_eq!(graph.len(), 1);
    }

    #[test]
    fn test_undefined_prefix() {
        let mut sink = GraphCollectorSink::new();
        let err = parse("nope:s nope:p nope:o .", &mut sink).unwrap_err();
        assert!(matches!(err, TurtleError::UndefinedPrefix(p) if p == "nope"));
    }

    #[test]
    fn test_missing_dot_is_parse_error() {
        let mut sink = GraphCollectorSink::new();
        let err = parse(
            "@prefix ex: <http://example.org/> .\nex:s ex:p ex:o",
            &mut sink,
        )
        .unwrap_err();
        assert!(matches!(err, TurtleError::Parse { .. }));
        assert!(err.to_string().contains("expected '.' after triples"));
    }
}
