//! Turtle lexer built on winnow.
//!
//! Produces the whole token stream up front and fails on the first lexical
//! error with a line/column pointer into the source.

use std::sync::Arc;

use winnow::ascii::digit1;
use winnow::combinator::{alt, delimited, opt};
use winnow::error::{ContextError, ErrMode};
use winnow::stream::{AsChar, Location, Stream};
use winnow::token::{any, one_of, take, take_till, take_while};
use winnow::{LocatingSlice, ModalResult, Parser};

use super::chars::*;
use super::token::{Token, TokenKind};
use crate::error::{Result, TurtleError};

/// Input type for the lexer - tracks position for spans.
pub type Input<'a> = LocatingSlice<&'a str>;

/// Characters that may follow `\` inside a local name
const LOCAL_ESCAPES: &str = "_~.-!$&'()*+,;=/?#@%";

/// Tokenize a Turtle document.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut input = LocatingSlice::new(source);

    loop {
        skip_ws_and_comments(&mut input);

        let start = input.current_token_start();
        if input.is_empty() {
            tokens.push(Token::new(TokenKind::Eof, start, start));
            return Ok(tokens);
        }

        match next_token(&mut input) {
            Ok(kind) => tokens.push(Token::new(kind, start, input.current_token_start())),
            Err(_) => return Err(lex_error(source, start)),
        }
    }
}

fn backtrack() -> ErrMode<ContextError> {
    ErrMode::Backtrack(ContextError::new())
}

/// Remaining, unconsumed input
fn rest<'i>(input: &Input<'i>) -> &'i str {
    **input
}

fn lex_error(source: &str, position: usize) -> TurtleError {
    let before = &source[..position];
    let line = before.matches('\n').count() + 1;
    let col = before.len() - before.rfind('\n').map_or(0, |i| i + 1) + 1;
    let line_content = source.lines().nth(line - 1).unwrap_or("");
    let bad = source[position..].chars().next().unwrap_or('?');

    let what = match bad {
        '"' | '\'' => "unterminated string literal".to_string(),
        '<' => "invalid or unterminated IRI".to_string(),
        c => format!("unexpected character '{}'", c.escape_default()),
    };
    let message = format!(
        "{what} at line {line}, column {col}\n  |\n{line} | {line_content}\n  | {}^",
        " ".repeat(col - 1)
    );
    TurtleError::lexer(position, message)
}

fn skip_ws_and_comments(input: &mut Input<'_>) {
    loop {
        let _: ModalResult<&str> = take_while(0.., is_ws).parse_next(input);
        if !input.starts_with('#') {
            break;
        }
        let _: ModalResult<&str> = take_till(0.., ['\n', '\r']).parse_next(input);
    }
}

fn next_token(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        "^^".value(TokenKind::DoubleCaret),
        parse_iri_ref,
        parse_blank_node_label,
        ('[', take_while(0.., is_ws), ']').value(TokenKind::Anon),
        ('(', take_while(0.., is_ws), ')').value(TokenKind::Nil),
        parse_at_word,
        parse_string_literal,
        parse_number,
        parse_name,
        parse_punctuation,
    ))
    .parse_next(input)
}

// =============================================================================
// IRIs
// =============================================================================

fn parse_iri_ref(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    delimited('<', parse_iri_content, '>')
        .map(|s| TokenKind::Iri(Arc::from(s)))
        .parse_next(input)
}

fn parse_iri_content(input: &mut Input<'_>) -> ModalResult<String> {
    let mut result = String::new();
    loop {
        let chunk: &str = take_while(0.., is_iri_char).parse_next(input)?;
        result.push_str(chunk);
        if !input.starts_with('\\') {
            return Ok(result);
        }
        '\\'.parse_next(input)?;
        let marker = one_of(['u', 'U']).parse_next(input)?;
        result.push(parse_hex_char(input, marker)?);
    }
}

/// `\uXXXX` / `\UXXXXXXXX` after the marker has been consumed
fn parse_hex_char(input: &mut Input<'_>, marker: char) -> ModalResult<char> {
    let digits = if marker == 'u' { 4 } else { 8 };
    let hex: &str = take_while(digits, AsChar::is_hex_digit).parse_next(input)?;
    u32::from_str_radix(hex, 16)
        .ok()
        .and_then(char::from_u32)
        .ok_or_else(backtrack)
}

// =============================================================================
// Directives and language tags
// =============================================================================

fn parse_at_word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    '@'.parse_next(input)?;
    let word: &str =
        take_while(1.., |c: char| c.is_ascii_alphanumeric() || c == '-').parse_next(input)?;
    Ok(match word {
        "prefix" => TokenKind::KwPrefix,
        "base" => TokenKind::KwBase,
        _ => TokenKind::LangTag(Arc::from(word)),
    })
}

// =============================================================================
// Names: prefixed names and bare keywords
// =============================================================================

fn parse_name(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let start = input.checkpoint();
    let prefix = opt(parse_pn_prefix).parse_next(input)?.unwrap_or("");

    if opt(':').parse_next(input)?.is_some() {
        let local = opt(parse_pn_local).parse_next(input)?.unwrap_or_default();
        return Ok(TokenKind::PrefixedName {
            prefix: Arc::from(prefix),
            local: Arc::from(local),
        });
    }

    let keyword = match prefix {
        "a" => Some(TokenKind::KwA),
        "true" => Some(TokenKind::Boolean(true)),
        "false" => Some(TokenKind::Boolean(false)),
        p if p.eq_ignore_ascii_case("prefix") => Some(TokenKind::KwSparqlPrefix),
        p if p.eq_ignore_ascii_case("base") => Some(TokenKind::KwSparqlBase),
        _ => None,
    };
    keyword.ok_or_else(|| {
        input.reset(&start);
        backtrack()
    })
}

/// `PN_PREFIX`: a letter, then name characters with inner (never trailing) dots
fn parse_pn_prefix<'i>(input: &mut Input<'i>) -> ModalResult<&'i str> {
    let s = rest(input);
    let first = s
        .chars()
        .next()
        .filter(|c| is_pn_chars_base(*c))
        .ok_or_else(backtrack)?;
    let tail = &s[first.len_utf8()..];
    let mut len = first.len_utf8()
        + tail
            .find(|c: char| !(is_pn_chars(c) || c == '.'))
            .unwrap_or(tail.len());
    while s[..len].ends_with('.') {
        len -= 1;
    }
    take(len).parse_next(input)
}

/// `PN_LOCAL` with percent-encoding and backslash escapes
fn parse_pn_local(input: &mut Input<'_>) -> ModalResult<String> {
    let s = rest(input);
    let mut out = String::new();
    let mut consumed = 0;
    let mut pending_dots = 0;
    let mut chars = s.char_indices();

    while let Some((i, c)) = chars.next() {
        let first = consumed == 0 && pending_dots == 0;
        let piece = match c {
            '%' => {
                let hex = s
                    .get(i + 1..i + 3)
                    .filter(|h| h.chars().all(|h| h.is_ascii_hexdigit()))
                    .ok_or_else(backtrack)?;
                chars.nth(1);
                format!("%{hex}")
            }
            '\\' => {
                let escaped = s[i + 1..]
                    .chars()
                    .next()
                    .filter(|e| LOCAL_ESCAPES.contains(*e))
                    .ok_or_else(backtrack)?;
                chars.next();
                escaped.to_string()
            }
            '.' if !first => {
                pending_dots += 1;
                continue;
            }
            c if first && is_pn_local_start(c) => c.to_string(),
            c if !first && (is_pn_chars(c) || c == ':') => c.to_string(),
            _ => break,
        };
        out.extend(std::iter::repeat('.').take(pending_dots));
        pending_dots = 0;
        out.push_str(&piece);
        consumed = chars.offset();
    }

    if consumed == 0 {
        return Err(backtrack());
    }
    take(consumed).parse_next(input)?;
    Ok(out)
}

// =============================================================================
// Blank nodes
// =============================================================================

fn parse_blank_node_label(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    "_:".parse_next(input)?;
    let s = rest(input);
    let first = s
        .chars()
        .next()
        .filter(|c| is_pn_chars_u(*c) || c.is_ascii_digit())
        .ok_or_else(backtrack)?;
    let tail = &s[first.len_utf8()..];
    let mut len = first.len_utf8()
        + tail
            .find(|c: char| !(is_pn_chars(c) || c == '.'))
            .unwrap_or(tail.len());
    while s[..len].ends_with('.') {
        len -= 1;
    }
    let label: &str = take(len).parse_next(input)?;
    Ok(TokenKind::BlankNodeLabel(Arc::from(label)))
}

// =============================================================================
// String literals
// =============================================================================

/// Short (`"..."`, `'...'`) and long (`"""..."""`, `'''...'''`) strings
fn parse_string_literal(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let quote = one_of(['"', '\'']).parse_next(input)?;
    let triple: String = std::iter::repeat(quote).take(3).collect();
    let long = input.starts_with(&triple[1..]);
    if long {
        take(2usize).parse_next(input)?;
    }

    let mut value = String::new();
    loop {
        let chunk: &str = take_while(0.., |c: char| {
            c != quote && c != '\\' && (long || (c != '\n' && c != '\r'))
        })
        .parse_next(input)?;
        value.push_str(chunk);

        if input.starts_with('\\') {
            '\\'.parse_next(input)?;
            value.push(parse_escape_char(input)?);
        } else if long && input.starts_with(quote) && !input.starts_with(triple.as_str()) {
            value.push(any.parse_next(input)?);
        } else {
            break;
        }
    }

    let closing = if long { triple.as_str() } else { &triple[..1] };
    if !input.starts_with(closing) {
        return Err(backtrack());
    }
    take(closing.len()).parse_next(input)?;
    Ok(TokenKind::String(Arc::from(value)))
}

fn parse_escape_char(input: &mut Input<'_>) -> ModalResult<char> {
    match any.parse_next(input)? {
        't' => Ok('\t'),
        'b' => Ok('\x08'),
        'n' => Ok('\n'),
        'r' => Ok('\r'),
        'f' => Ok('\x0C'),
        '"' => Ok('"'),
        '\'' => Ok('\''),
        '\\' => Ok('\\'),
        marker @ ('u' | 'U') => parse_hex_char(input, marker),
        _ => Err(backtrack()),
    }
}

// =============================================================================
// Numbers
// =============================================================================

fn parse_number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    let text: &str = (
        opt(one_of(['+', '-'])),
        alt(((digit1, opt(('.', digit1))).void(), ('.', digit1).void())),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digit1)),
    )
        .take()
        .parse_next(input)?;

    if text.contains(['e', 'E']) {
        Ok(TokenKind::Double(Arc::from(text)))
    } else if text.contains('.') {
        Ok(TokenKind::Decimal(Arc::from(text)))
    } else {
        Ok(text
            .parse::<i64>()
            .map(TokenKind::Integer)
            .unwrap_or_else(|_| TokenKind::Decimal(Arc::from(text))))
    }
}

// =============================================================================
// Punctuation
// =============================================================================

fn parse_punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    any.verify_map(|c| match c {
        '.' => Some(TokenKind::Dot),
        ',' => Some(TokenKind::Comma),
        ';' => Some(TokenKind::Semicolon),
        '[' => Some(TokenKind::LBracket),
        ']' => Some(TokenKind::RBracket),
        '(' => Some(TokenKind::LParen),
        ')' => Some(TokenKind::RParen),
        _ => None,
    })
    .parse_next(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tok(input: &str) -> Vec<TokenKind> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .filter(|k| !matches!(k, TokenKind::Eof))
            .collect()
    }

    fn pname(prefix: &str, local: &str) -> TokenKind {
        TokenKind::PrefixedName {
            prefix: Arc::from(prefix),
            local: Arc::from(local),
        }
    }

    #[test]
    fn test_iri() {
        assert_eq!(
            tok("<http://example.org/>"),
            vec![TokenKind::Iri(Arc::from("http://example.org/"))]
        );
        assert_eq!(tok("<>"), vec![TokenKind::Iri(Arc::from(""))]);
        assert_eq!(
            tok("<http://ex.org/\\u00E9>"),
            vec![TokenKind::Iri(Arc::from("http://ex.org/é"))]
        );
    }

    #[test]
    fn test_prefixed_names() {
        assert_eq!(tok("inst:IfcWall_12"), vec![pname("inst", "IfcWall_12")]);
        assert_eq!(tok("ifc:"), vec![pname("ifc", "")]);
        assert_eq!(tok(":name"), vec![pname("", "name")]);
        assert_eq!(tok("ex:a.b"), vec![pname("ex", "a.b")]);
        assert_eq!(tok("ex:a."), vec![pname("ex", "a"), TokenKind::Dot]);
        assert_eq!(tok("ex:x%20y"), vec![pname("ex", "x%20y")]);
    }

    #[test]
    fn test_blank_nodes() {
        assert_eq!(
            tok("_:b1"),
            vec![TokenKind::BlankNodeLabel(Arc::from("b1"))]
        );
        assert_eq!(tok("[ ]"), vec![TokenKind::Anon]);
        assert_eq!(tok("( )"), vec![TokenKind::Nil]);
    }

    #[test]
    fn test_keywords() {
        assert_eq!(tok("a"), vec![TokenKind::KwA]);
        assert_eq!(tok("true"), vec![TokenKind::Boolean(true)]);
        assert_eq!(tok("false"), vec![TokenKind::Boolean(false)]);
        assert_eq!(tok("@prefix"), vec![TokenKind::KwPrefix]);
        assert_eq!(tok("@base"), vec![TokenKind::KwBase]);
        assert_eq!(tok("PREFIX"), vec![TokenKind::KwSparqlPrefix]);
        assert_eq!(tok("@en-GB"), vec![TokenKind::LangTag(Arc::from("en-GB"))]);
    }

    #[test]
    fn test_strings() {
        assert_eq!(tok("\"A1\""), vec![TokenKind::String(Arc::from("A1"))]);
        assert_eq!(tok("'A1'"), vec![TokenKind::String(Arc::from("A1"))]);
        assert_eq!(
            tok("\"line\\nbreak\""),
            vec![TokenKind::String(Arc::from("line\nbreak"))]
        );
        assert_eq!(
            tok("\"\"\"two\n\"quoted\" lines\"\"\""),
            vec![TokenKind::String(Arc::from("two\n\"quoted\" lines"))]
        );
        assert_eq!(tok("\"\""), vec![TokenKind::String(Arc::from(""))]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(tok("42"), vec![TokenKind::Integer(42)]);
        assert_eq!(tok("-7"), vec![TokenKind::Integer(-7)]);
        assert_eq!(tok("3.14"), vec![TokenKind::Decimal(Arc::from("3.14"))]);
        assert_eq!(tok("1e10"), vec![TokenKind::Double(Arc::from("1e10"))]);
        assert_eq!(tok("1 ."), vec![TokenKind::Integer(1), TokenKind::Dot]);
    }

    #[test]
    fn test_typed_literal_sequence() {
        assert_eq!(
            tok("\"-1.#IND\"^^xsd:double"),
            vec![
                TokenKind::String(Arc::from("-1.#IND")),
                TokenKind::DoubleCaret,
                pname("xsd", "double"),
            ]
        );
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            tok("ex:name # trailing comment\nex:value"),
            vec![pname("ex", "name"), pname("ex", "value")]
        );
    }

    #[test]
    fn test_error_with_line_info() {
        let err = tokenize("ex:name \"ok\" .\nex:other $ .").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unexpected character '$'"));
        assert!(msg.contains("line 2"));
    }

    #[test]
    fn test_error_unterminated_string() {
        let err = tokenize("ex:name \"unterminated").unwrap_err();
        assert!(err.to_string().contains("unterminated string literal"));
    }
}
