//! Expression tree of a materialized body.

use std::sync::Arc;

/// A parsed program: `[helper] return <body>;`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// The body starts with the iteration helper declaration.
    pub uses_iteration_helper: bool,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Ident(String),
    Array(Vec<Expr>),
    /// Object literal; keys are already normalized to strings.
    Object(Vec<(String, Expr)>),
    Function(Arc<FunctionExpr>),
    Member {
        object: Box<Expr>,
        property: String,
    },
    Index {
        object: Box<Expr>,
        index: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        args: Vec<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Logical {
        op: LogicalOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Conditional {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    Assign {
        name: String,
        value: Box<Expr>,
    },
    /// Comma operator; evaluates to the last element.
    Sequence(Vec<Expr>),
}

/// `function [name](params) { return body; }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionExpr {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Expr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Plus,
    Typeof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    NotEq,
    StrictEq,
    StrictNotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalOp {
    And,
    Or,
}

impl Expr {
    /// Short description used in runtime error messages.
    pub fn describe(&self) -> String {
        match self {
            Expr::Ident(name) => name.clone(),
            Expr::Member { object, property } => format!("{}.{property}", object.describe()),
            Expr::Index { object, .. } => format!("{}[...]", object.describe()),
            Expr::Call { callee, .. } => format!("{}(...)", callee.describe()),
            Expr::Undefined => "undefined".to_owned(),
            Expr::Null => "null".to_owned(),
            _ => "expression".to_owned(),
        }
    }
}
