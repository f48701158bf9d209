//! Turtle token types.

use std::fmt;
use std::sync::Arc;

/// A token with its source span (byte offsets).
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self { kind, start, end }
    }
}

/// Token kinds for Turtle.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    /// `<http://example.org/>`, unescaped content
    Iri(Arc<str>),
    /// `prefix:local`; `local` is empty for a bare `prefix:`
    PrefixedName { prefix: Arc<str>, local: Arc<str> },
    /// `_:label`
    BlankNodeLabel(Arc<str>),
    /// `[]`
    Anon,
    /// `()`
    Nil,

    /// String literal, unescaped
    String(Arc<str>),
    Integer(i64),
    /// Decimal and double literals keep their lexical form
    Decimal(Arc<str>),
    Double(Arc<str>),
    Boolean(bool),
    /// `@en`, stored without the `@`
    LangTag(Arc<str>),

    /// `@prefix`
    KwPrefix,
    /// `@base`
    KwBase,
    /// `PREFIX`
    KwSparqlPrefix,
    /// `BASE`
    KwSparqlBase,
    /// `a`
    KwA,

    Dot,
    Comma,
    Semicolon,
    /// `^^`
    DoubleCaret,
    LBracket,
    RBracket,
    LParen,
    RParen,

    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Iri(s) => write!(f, "<{}>", s),
            TokenKind::PrefixedName { prefix, local } => write!(f, "{}:{}", prefix, local),
            TokenKind::BlankNodeLabel(s) => write!(f, "_:{}", s),
            TokenKind::Anon => f.write_str("[]"),
            TokenKind::Nil => f.write_str("()"),
            TokenKind::String(s) => write!(f, "\"{}\"", s),
            TokenKind::Integer(n) => write!(f, "{}", n),
            TokenKind::Decimal(s) | TokenKind::Double(s) => f.write_str(s),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::LangTag(s) => write!(f, "@{}", s),
            TokenKind::KwPrefix => f.write_str("@prefix"),
            TokenKind::KwBase => f.write_str("@base"),
            TokenKind::KwSparqlPrefix => f.write_str("PREFIX"),
            TokenKind::KwSparqlBase => f.write_str("BASE"),
            TokenKind::KwA => f.write_str("a"),
            TokenKind::Dot => f.write_str("."),
            TokenKind::Comma => f.write_str(","),
            TokenKind::Semicolon => f.write_str(";"),
            TokenKind::DoubleCaret => f.write_str("^^"),
            TokenKind::LBracket => f.write_str("["),
            TokenKind::RBracket => f.write_str("]"),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::Eof => f.write_str("end of input"),
        }
    }
}
