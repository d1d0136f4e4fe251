//! Lexer for generated template source.
//!
//! Produces span-based tokens without storing text; text is sliced from the
//! source only when the parser needs it.
//!
//! Consecutive unrecognized characters coalesce into one `UnexpectedFragment`
//! token, so malformed input yields a single precise error span.

use std::ops::Range;

use logos::Logos;

/// Token kinds of the expression language.
///
/// `UnexpectedFragment` has no pattern; it is only synthesized by [`lex`].
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(skip r"[ \t\r\n\f]+")]
pub enum TokenKind {
    #[token("(")]
    ParenOpen,

    #[token(")")]
    ParenClose,

    #[token("[")]
    BracketOpen,

    #[token("]")]
    BracketClose,

    #[token("{")]
    BraceOpen,

    #[token("}")]
    BraceClose,

    #[token(",")]
    Comma,

    #[token(";")]
    Semicolon,

    #[token(":")]
    Colon,

    #[token("?")]
    Question,

    #[token(".")]
    Dot,

    #[token("===")]
    StrictEq,

    #[token("!==")]
    StrictNotEq,

    #[token("==")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<=")]
    LtEq,

    #[token(">=")]
    GtEq,

    #[token("<")]
    Lt,

    #[token(">")]
    Gt,

    #[token("&&")]
    AndAnd,

    #[token("||")]
    OrOr,

    #[token("!")]
    Bang,

    #[token("=")]
    Assign,

    #[token("+")]
    Plus,

    #[token("-")]
    Minus,

    #[token("*")]
    Star,

    #[token("/")]
    Slash,

    #[token("%")]
    Percent,

    #[token("return")]
    KwReturn,

    #[token("function")]
    KwFunction,

    #[token("typeof")]
    KwTypeof,

    #[token("true")]
    KwTrue,

    #[token("false")]
    KwFalse,

    #[token("null")]
    KwNull,

    #[token("undefined")]
    KwUndefined,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"([0-9]+(\.[0-9]*)?|\.[0-9]+)([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r"'([^'\\\n]|\\.)*'")]
    String,

    UnexpectedFragment,
}

impl TokenKind {
    /// Keywords double as property names after `.` and as object keys.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::KwReturn
                | TokenKind::KwFunction
                | TokenKind::KwTypeof
                | TokenKind::KwTrue
                | TokenKind::KwFalse
                | TokenKind::KwNull
                | TokenKind::KwUndefined
        )
    }
}

/// Zero-copy token: kind plus byte span into the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Range<usize>) -> Self {
        Self { kind, span }
    }
}

/// Tokenize `source`, shifting every span by `offset`.
///
/// The offset lets callers lex a suffix of a larger text and still report
/// positions relative to the whole.
pub fn lex(source: &str, offset: usize) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);
    let mut error: Option<Range<usize>> = None;
    let shift = |r: Range<usize>| (r.start + offset)..(r.end + offset);

    loop {
        match lexer.next() {
            Some(Ok(kind)) => {
                if let Some(span) = error.take() {
                    tokens.push(Token::new(TokenKind::UnexpectedFragment, shift(span)));
                }
                tokens.push(Token::new(kind, shift(lexer.span())));
            }
            Some(Err(())) => {
                let span = lexer.span();
                error = Some(match error.take() {
                    Some(open) => open.start..span.end,
                    None => span,
                });
            }
            None => {
                if let Some(span) = error.take() {
                    tokens.push(Token::new(TokenKind::UnexpectedFragment, shift(span)));
                }
                break;
            }
        }
    }

    tokens
}
