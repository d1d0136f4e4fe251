//! Recursive-descent parser for generated template bodies.
//!
//! One function per precedence level, lowest first. Every recursive cycle
//! passes through `unary`, `conditional` or an assignment value; those steps
//! count against [`ParseLimits`] and grow the stack when it runs low.

use std::sync::Arc;

use jadevdom_core::{DEFAULT_NESTING_LIMIT, ITERATION_HELPER_SOURCE};

use super::ast::{BinaryOp, Expr, FunctionExpr, LogicalOp, Program, UnaryOp};
use super::error::MaterializeError;
use super::lexer::{Token, TokenKind, lex};
use super::stack;

type ParseResult<T> = Result<T, MaterializeError>;

/// Upper bound on the expression nesting one document node adds to generated code.
const EXPRESSION_LEVELS_PER_NODE: u32 = 4;

/// Limits applied while parsing.
#[derive(Clone, Copy, Debug)]
pub struct ParseLimits {
    /// Maximum expression nesting depth (default: 2,048).
    ///
    /// The default admits any body the compiler emits at its own default limit.
    pub(crate) recursion_limit: u32,
}

impl Default for ParseLimits {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_NESTING_LIMIT * EXPRESSION_LEVELS_PER_NODE,
        }
    }
}

impl ParseLimits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recursion_limit(mut self, limit: u32) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn get_recursion_limit(&self) -> u32 {
        self.recursion_limit
    }
}

/// Parse a complete body: optional helper prelude, `return <expr>`, optional `;`.
pub fn parse_program(source: &str, limits: ParseLimits) -> ParseResult<Program> {
    let (uses_iteration_helper, offset) = match source.strip_prefix(ITERATION_HELPER_SOURCE) {
        Some(_) => (true, ITERATION_HELPER_SOURCE.len()),
        None => (false, 0),
    };

    let mut parser = Parser::new(source, lex(&source[offset..], offset), limits);
    parser.expect(TokenKind::KwReturn, "`return`")?;
    let body = parser.expression()?;
    parser.eat(TokenKind::Semicolon);
    parser.expect_eof()?;

    Ok(Program {
        uses_iteration_helper,
        body,
    })
}

/// Parse a standalone expression (no `return`).
pub fn parse_expression(source: &str, limits: ParseLimits) -> ParseResult<Expr> {
    let mut parser = Parser::new(source, lex(source, 0), limits);
    let expr = parser.expression()?;
    parser.expect_eof()?;
    Ok(expr)
}

struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    depth: u32,
    limits: ParseLimits,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, tokens: Vec<Token>, limits: ParseLimits) -> Self {
        Self {
            source,
            tokens,
            pos: 0,
            depth: 0,
            limits,
        }
    }

    fn current(&self) -> Option<TokenKind> {
        self.tokens.get(self.pos).map(|t| t.kind)
    }

    fn currently_is(&self, kind: TokenKind) -> bool {
        self.current() == Some(kind)
    }

    fn current_span(&self) -> std::ops::Range<usize> {
        self.tokens
            .get(self.pos)
            .map_or(self.source.len()..self.source.len(), |t| t.span.clone())
    }

    fn text(&self, token: &Token) -> &'src str {
        let source: &'src str = self.source;
        &source[token.span.clone()]
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.currently_is(kind) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> ParseResult<Token> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == kind => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(what)),
        }
    }

    fn expect_eof(&self) -> ParseResult<()> {
        match self.tokens.get(self.pos) {
            None => Ok(()),
            Some(_) => Err(self.unexpected("end of input")),
        }
    }

    fn unexpected(&self, expected: &str) -> MaterializeError {
        let span = self.current_span();
        let message = match self.tokens.get(self.pos) {
            None => format!("expected {expected}, found end of input"),
            Some(token) if token.kind == TokenKind::UnexpectedFragment => {
                format!("unexpected characters `{}`", self.text(token))
            }
            Some(token) => format!("expected {expected}, found `{}`", self.text(token)),
        };
        MaterializeError::malformed(message, span)
    }

    /// Run one nested step, counted against the recursion limit.
    fn nested<R>(&mut self, step: impl FnOnce(&mut Self) -> ParseResult<R>) -> ParseResult<R> {
        if self.depth >= self.limits.recursion_limit {
            return Err(MaterializeError::RecursionLimitExceeded);
        }
        self.depth += 1;
        let result = stack::grow(|| step(self));
        self.depth -= 1;
        result
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        let first = self.assignment()?;
        let expr = if self.currently_is(TokenKind::Comma) {
            let mut items = vec![first];
            while self.eat(TokenKind::Comma) {
                items.push(self.assignment()?);
            }
            Expr::Sequence(items)
        } else {
            first
        };
        Ok(expr)
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let is_target = self.currently_is(TokenKind::Ident)
            && self.tokens.get(self.pos + 1).map(|t| t.kind) == Some(TokenKind::Assign);
        if !is_target {
            return self.conditional();
        }

        let Some(name) = self.bump() else {
            return Err(self.unexpected("identifier"));
        };
        let name = self.text(&name).to_owned();
        self.pos += 1;

        let value = self.nested(Self::assignment)?;
        Ok(Expr::Assign {
            name,
            value: Box::new(value),
        })
    }

    fn conditional(&mut self) -> ParseResult<Expr> {
        let test = self.logical_or()?;
        if !self.eat(TokenKind::Question) {
            return Ok(test);
        }

        let (consequent, alternate) = self.nested(|p| {
            let consequent = p.assignment()?;
            p.expect(TokenKind::Colon, "`:`")?;
            let alternate = p.assignment()?;
            Ok((consequent, alternate))
        })?;

        Ok(Expr::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn logical_or(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.logical_and()?;
        while self.eat(TokenKind::OrOr) {
            let rhs = self.logical_and()?;
            lhs = Expr::Logical {
                op: LogicalOp::Or,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn logical_and(&mut self) -> ParseResult<Expr> {
        let mut lhs = self.equality()?;
        while self.eat(TokenKind::AndAnd) {
            let rhs = self.equality()?;
            lhs = Expr::Logical {
                op: LogicalOp::And,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    /// Left-associative binary level: `next (op next)*`.
    fn binary_level(
        &mut self,
        ops: fn(TokenKind) -> Option<BinaryOp>,
        next: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut lhs = next(self)?;
        while let Some(op) = self.current().and_then(ops) {
            self.pos += 1;
            let rhs = next(self)?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
        Ok(lhs)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            |kind| match kind {
                TokenKind::StrictEq => Some(BinaryOp::StrictEq),
                TokenKind::StrictNotEq => Some(BinaryOp::StrictNotEq),
                TokenKind::Eq => Some(BinaryOp::Eq),
                TokenKind::NotEq => Some(BinaryOp::NotEq),
                _ => None,
            },
            Self::relational,
        )
    }

    fn relational(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            |kind| match kind {
                TokenKind::Lt => Some(BinaryOp::Lt),
                TokenKind::LtEq => Some(BinaryOp::LtEq),
                TokenKind::Gt => Some(BinaryOp::Gt),
                TokenKind::GtEq => Some(BinaryOp::GtEq),
                _ => None,
            },
            Self::additive,
        )
    }

    fn additive(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            |kind| match kind {
                TokenKind::Plus => Some(BinaryOp::Add),
                TokenKind::Minus => Some(BinaryOp::Sub),
                _ => None,
            },
            Self::multiplicative,
        )
    }

    fn multiplicative(&mut self) -> ParseResult<Expr> {
        self.binary_level(
            |kind| match kind {
                TokenKind::Star => Some(BinaryOp::Mul),
                TokenKind::Slash => Some(BinaryOp::Div),
                TokenKind::Percent => Some(BinaryOp::Rem),
                _ => None,
            },
            Self::unary,
        )
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.current() {
            Some(TokenKind::Bang) => UnaryOp::Not,
            Some(TokenKind::Minus) => UnaryOp::Neg,
            Some(TokenKind::Plus) => UnaryOp::Plus,
            Some(TokenKind::KwTypeof) => UnaryOp::Typeof,
            _ => return self.nested(Self::postfix),
        };
        self.pos += 1;

        let operand = self.nested(Self::unary)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
        })
    }

    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.current() {
                Some(TokenKind::Dot) => {
                    self.pos += 1;
                    let property = self.property_name()?;
                    expr = Expr::Member {
                        object: Box::new(expr),
                        property,
                    };
                }
                Some(TokenKind::BracketOpen) => {
                    self.pos += 1;
                    let index = self.expression()?;
                    self.expect(TokenKind::BracketClose, "`]`")?;
                    expr = Expr::Index {
                        object: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                Some(TokenKind::ParenOpen) => {
                    self.pos += 1;
                    let args = self.arguments()?;
                    expr = Expr::Call {
                        callee: Box::new(expr),
                        args,
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    fn property_name(&mut self) -> ParseResult<String> {
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == TokenKind::Ident || token.kind.is_keyword() => {
                let name = self.text(token).to_owned();
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected("property name")),
        }
    }

    /// Call arguments after `(`, through the closing `)`.
    fn arguments(&mut self) -> ParseResult<Vec<Expr>> {
        let mut args = Vec::new();
        if self.eat(TokenKind::ParenClose) {
            return Ok(args);
        }
        loop {
            args.push(self.assignment()?);
            if self.eat(TokenKind::ParenClose) {
                return Ok(args);
            }
            self.expect(TokenKind::Comma, "`,` or `)`")?;
        }
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.unexpected("expression"));
        };

        let expr = match token.kind {
            TokenKind::Number => {
                self.pos += 1;
                Expr::Number(self.number(&token)?)
            }
            TokenKind::String => {
                self.pos += 1;
                Expr::String(unescape(self.text(&token), token.span.clone())?)
            }
            TokenKind::KwTrue => {
                self.pos += 1;
                Expr::Bool(true)
            }
            TokenKind::KwFalse => {
                self.pos += 1;
                Expr::Bool(false)
            }
            TokenKind::KwNull => {
                self.pos += 1;
                Expr::Null
            }
            TokenKind::KwUndefined => {
                self.pos += 1;
                Expr::Undefined
            }
            TokenKind::Ident => {
                self.pos += 1;
                Expr::Ident(self.text(&token).to_owned())
            }
            TokenKind::ParenOpen => {
                self.pos += 1;
                let inner = self.expression()?;
                self.expect(TokenKind::ParenClose, "`)`")?;
                inner
            }
            TokenKind::BracketOpen => {
                self.pos += 1;
                self.array()?
            }
            TokenKind::BraceOpen => {
                self.pos += 1;
                self.object()?
            }
            TokenKind::KwFunction => {
                self.pos += 1;
                self.function()?
            }
            _ => return Err(self.unexpected("expression")),
        };
        Ok(expr)
    }

    fn number(&self, token: &Token) -> ParseResult<f64> {
        self.text(token)
            .parse::<f64>()
            .map_err(|_| MaterializeError::malformed("invalid number literal", token.span.clone()))
    }

    /// Array literal after `[`; a trailing comma is allowed.
    fn array(&mut self) -> ParseResult<Expr> {
        let mut items = Vec::new();
        while !self.eat(TokenKind::BracketClose) {
            items.push(self.assignment()?);
            if !self.currently_is(TokenKind::BracketClose) {
                self.expect(TokenKind::Comma, "`,` or `]`")?;
            }
        }
        Ok(Expr::Array(items))
    }

    /// Object literal after `{`; a trailing comma is allowed.
    fn object(&mut self) -> ParseResult<Expr> {
        let mut props = Vec::new();
        while !self.eat(TokenKind::BraceClose) {
            let key = self.object_key()?;
            self.expect(TokenKind::Colon, "`:`")?;
            let value = self.assignment()?;
            props.push((key, value));
            if !self.currently_is(TokenKind::BraceClose) {
                self.expect(TokenKind::Comma, "`,` or `}`")?;
            }
        }
        Ok(Expr::Object(props))
    }

    fn object_key(&mut self) -> ParseResult<String> {
        let Some(token) = self.tokens.get(self.pos).cloned() else {
            return Err(self.unexpected("property name"));
        };
        let key = match token.kind {
            TokenKind::String => unescape(self.text(&token), token.span.clone())?,
            TokenKind::Number => super::value::number_to_string(self.number(&token)?),
            kind if kind == TokenKind::Ident || kind.is_keyword() => self.text(&token).to_owned(),
            _ => return Err(self.unexpected("property name")),
        };
        self.pos += 1;
        Ok(key)
    }

    /// Function expression after `function`.
    fn function(&mut self) -> ParseResult<Expr> {
        let name = match self.tokens.get(self.pos) {
            Some(token) if token.kind == TokenKind::Ident => {
                let name = self.text(token).to_owned();
                self.pos += 1;
                Some(name)
            }
            _ => None,
        };

        self.expect(TokenKind::ParenOpen, "`(`")?;
        let mut params = Vec::new();
        if !self.eat(TokenKind::ParenClose) {
            loop {
                let param = self.expect(TokenKind::Ident, "parameter name")?;
                params.push(self.text(&param).to_owned());
                if self.eat(TokenKind::ParenClose) {
                    break;
                }
                self.expect(TokenKind::Comma, "`,` or `)`")?;
            }
        }

        self.expect(TokenKind::BraceOpen, "`{`")?;
        self.expect(TokenKind::KwReturn, "`return`")?;
        let body = self.expression()?;
        self.eat(TokenKind::Semicolon);
        self.expect(TokenKind::BraceClose, "`}`")?;

        Ok(Expr::Function(Arc::new(FunctionExpr { name, params, body })))
    }
}

/// Decode a quoted string literal, quotes included in `raw`.
fn unescape(raw: &str, span: std::ops::Range<usize>) -> ParseResult<String> {
    let inner = &raw[1..raw.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(escape) = chars.next() else {
            return Err(MaterializeError::malformed("unterminated escape", span));
        };
        match escape {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            '0' => out.push('\0'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                let decoded = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32);
                let Some(decoded) = decoded else {
                    return Err(MaterializeError::malformed(
                        format!("invalid unicode escape `\\u{hex}`"),
                        span,
                    ));
                };
                out.push(decoded);
            }
            // `\\`, `\'`, `\"`, `\/` and any other escaped character stand for themselves.
            other => out.push(other),
        }
    }

    Ok(out)
}
