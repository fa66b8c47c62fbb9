//! WIT lexer - tokenizes WIT source text
//!
//! Keywords are lexed as plain identifiers and recognised by the parser, so
//! `%`-escaped identifiers can reuse keyword spellings.

use logos::Logos;
use std::ops::Range;

/// Token type for WIT source text
#[derive(Logos, Debug, PartialEq, Eq, Clone, Default)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum Token {
    // Comments (captured, filtered out by `tokenize` except doc comments)
    #[regex(r"///[^\n]*", priority = 4, allow_greedy = true, callback = |lex| lex.slice()[3..].trim().to_string())]
    #[regex(r"/\*\*([^*/]|\*+[^*/])([^*]|\*+[^*/])*\*+/", priority = 5, allow_greedy = true, callback = |lex| block_doc(lex.slice()))]
    DocComment(String),
    #[regex(r"//[^\n]*", priority = 3, allow_greedy = true)]
    LineComment,
    #[regex(r"/\*([^*]|\*+[^*/])*\*+/", priority = 3, allow_greedy = true)]
    BlockComment,

    // Identifiers
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*(-[a-zA-Z0-9]+)*", callback = |lex| lex.slice().to_string())]
    Id(String),
    #[regex(r"%[a-zA-Z][a-zA-Z0-9]*(-[a-zA-Z0-9]+)*", callback = |lex| lex.slice()[1..].to_string())]
    ExplicitId(String),

    // Literals
    #[regex(r"[0-9]+\.[0-9]+\.[0-9]+(-[0-9A-Za-z.\-]+)?(\+[0-9A-Za-z.\-]+)?", callback = |lex| lex.slice().to_string())]
    Version(String),
    #[regex(r"[0-9]+", callback = |lex| lex.slice().to_string())]
    Integer(String),

    // Punctuation
    #[token("->")]
    Arrow,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,
    #[token(";")]
    Semicolon,
    #[token(".")]
    Period,
    #[token("=")]
    Equals,
    #[token("/")]
    Slash,
    #[token("@")]
    At,
    #[token("*")]
    Star,
    #[token("_")]
    Underscore,

    /// Error token for unrecognized input
    #[default]
    Error,
}

impl Token {
    /// Human readable form used in error messages.
    pub fn describe(&self) -> String {
        match self {
            Token::DocComment(_) => "doc comment".to_string(),
            Token::LineComment | Token::BlockComment => "comment".to_string(),
            Token::Id(id) => format!("`{id}`"),
            Token::ExplicitId(id) => format!("`%{id}`"),
            Token::Version(v) => format!("version `{v}`"),
            Token::Integer(i) => format!("integer `{i}`"),
            Token::Arrow => "`->`".to_string(),
            Token::LBrace => "`{`".to_string(),
            Token::RBrace => "`}`".to_string(),
            Token::LParen => "`(`".to_string(),
            Token::RParen => "`)`".to_string(),
            Token::Lt => "`<`".to_string(),
            Token::Gt => "`>`".to_string(),
            Token::Comma => "`,`".to_string(),
            Token::Colon => "`:`".to_string(),
            Token::Semicolon => "`;`".to_string(),
            Token::Period => "`.`".to_string(),
            Token::Equals => "`=`".to_string(),
            Token::Slash => "`/`".to_string(),
            Token::At => "`@`".to_string(),
            Token::Star => "`*`".to_string(),
            Token::Underscore => "`_`".to_string(),
            Token::Error => "invalid character".to_string(),
        }
    }
}

/// Text of a `/** ... */` comment, one line per source line with any
/// leading `*` gutter removed.
fn block_doc(comment: &str) -> String {
    let body = comment
        .strip_prefix("/**")
        .and_then(|rest| rest.strip_suffix("*/"))
        .unwrap_or_default();
    let lines: Vec<&str> = body
        .lines()
        .map(|line| {
            let line = line.trim();
            line.strip_prefix('*').map(str::trim).unwrap_or(line)
        })
        .collect();
    let start = lines.iter().position(|line| !line.is_empty()).unwrap_or(lines.len());
    let end = lines.iter().rposition(|line| !line.is_empty()).map_or(start, |end| end + 1);
    lines[start..end].join("\n")
}

/// Span type for tracking source positions
pub type Span = Range<usize>;

/// Token with span information
pub type SpannedToken = (Token, Span);

/// Tokenize WIT source, dropping whitespace and non-doc comments.
pub fn tokenize(source: &str) -> Vec<SpannedToken> {
    Token::lexer(source)
        .spanned()
        .map(|(tok, span)| (tok.unwrap_or(Token::Error), span))
        .filter(|(tok, _)| !matches!(tok, Token::LineComment | Token::BlockComment))
        .collect()
}
