//! Syntax tree nodes and their canonical rendering.
//!
//! Every expression renders fully parenthesized, so that parsing the rendered text yields an
//! expression that evaluates to the same value.

use crate::lexer::TokenKind;
use std::fmt;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    /// `!`
    Not,
    /// `+`
    Plus,
    /// `-`
    Minus,
}

impl PrefixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Bang => Some(PrefixOp::Not),
            TokenKind::Plus => Some(PrefixOp::Plus),
            TokenKind::Minus => Some(PrefixOp::Minus),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostfixOp {
    /// `!`
    Factorial,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
    Eq,
    NotEq,
    Less,
    LessEq,
    Greater,
    GreaterEq,
    And,
    Or,
}

impl InfixOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => InfixOp::Add,
            TokenKind::Minus => InfixOp::Sub,
            TokenKind::Asterisk => InfixOp::Mul,
            TokenKind::Slash => InfixOp::Div,
            TokenKind::Percent => InfixOp::Rem,
            TokenKind::Caret => InfixOp::Pow,
            TokenKind::EqualsEquals => InfixOp::Eq,
            TokenKind::NotEquals => InfixOp::NotEq,
            TokenKind::LessThan => InfixOp::Less,
            TokenKind::LessThanEquals => InfixOp::LessEq,
            TokenKind::GreaterThan => InfixOp::Greater,
            TokenKind::GreaterThanEquals => InfixOp::GreaterEq,
            TokenKind::And => InfixOp::And,
            TokenKind::Or => InfixOp::Or,
            _ => return None,
        };
        Some(op)
    }
}

impl fmt::Display for PrefixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PrefixOp::Not => "!",
            PrefixOp::Plus => "+",
            PrefixOp::Minus => "-",
        })
    }
}

impl fmt::Display for PostfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostfixOp::Factorial => f.write_str("!"),
        }
    }
}

impl fmt::Display for InfixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            InfixOp::Add => "+",
            InfixOp::Sub => "-",
            InfixOp::Mul => "*",
            InfixOp::Div => "/",
            InfixOp::Rem => "%",
            InfixOp::Pow => "^",
            InfixOp::Eq => "==",
            InfixOp::NotEq => "!=",
            InfixOp::Less => "<",
            InfixOp::LessEq => "<=",
            InfixOp::Greater => ">",
            InfixOp::GreaterEq => ">=",
            InfixOp::And => "and",
            InfixOp::Or => "or",
        })
    }
}

/// A function literal with a brace-delimited body (e.g. `(a, b) => { return a + b }`).
#[derive(Debug, Clone, PartialEq)]
pub struct NormalFunctionLiteral {
    pub params: Vec<String>,
    pub body: Block,
}

/// A function literal with a single expression as its body (e.g. `(a, b) => a + b`).
#[derive(Debug, Clone, PartialEq)]
pub struct ConciseFunctionLiteral {
    pub params: Vec<String>,
    pub body: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    NumberLit(f64),
    BoolLit(bool),
    /// An identifier (e.g. `foo`). Builtin constants (`pi`, `e`) are identifiers too.
    Identifier(String),
    /// A prefix expression (e.g. `-a`).
    Prefix { op: PrefixOp, arg: Box<Expr> },
    /// A postfix expression (e.g. `a!`).
    Postfix { op: PostfixOp, arg: Box<Expr> },
    /// A binary expression (e.g. `1+1`).
    Binary {
        lhs: Box<Expr>,
        op: InfixOp,
        rhs: Box<Expr>,
    },
    If {
        condition: Box<Expr>,
        consequence: Block,
        alternative: Option<Block>,
    },
    NormalFn(Rc<NormalFunctionLiteral>),
    ConciseFn(Rc<ConciseFunctionLiteral>),
    /// A call expression (e.g. `foo(1, bar)`). Only identifiers can be called.
    FnCall { ident: String, args: Vec<Expr> },
    /// Placeholder left behind by a syntax error.
    Error,
}

/// A brace-delimited list of statements.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `ident = initializer`
    LetDeclaration { ident: String, initializer: Expr },
    ReturnStmt(Expr),
    ExprStmt(Expr),
}

/// The root of the syntax tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[String]) -> fmt::Result {
    write!(f, "({})", params.join(", "))
}

fn write_stmts(f: &mut fmt::Formatter<'_>, stmts: &[Stmt]) -> fmt::Result {
    for (i, stmt) in stmts.iter().enumerate() {
        if i > 0 {
            f.write_str("; ")?;
        }
        write!(f, "{}", stmt)?;
    }
    Ok(())
}

/// Writes an expression that is followed by an operator. The body of a concise function extends as
/// far to the right as possible, so it must be closed off before the operator.
fn write_operand(f: &mut fmt::Formatter<'_>, expr: &Expr) -> fmt::Result {
    match expr {
        Expr::ConciseFn(_) => write!(f, "({})", expr),
        _ => write!(f, "{}", expr),
    }
}

impl fmt::Display for NormalFunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_params(f, &self.params)?;
        write!(f, " => {}", self.body)
    }
}

impl fmt::Display for ConciseFunctionLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_params(f, &self.params)?;
        write!(f, " => {}", self.body)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::NumberLit(val) => write!(f, "{}", val),
            Expr::BoolLit(val) => write!(f, "{}", val),
            Expr::Identifier(ident) => f.write_str(ident),
            Expr::Prefix { op, arg } => write!(f, "({}{})", op, arg),
            Expr::Postfix { op, arg } => {
                f.write_str("(")?;
                write_operand(f, arg)?;
                write!(f, "{})", op)
            }
            Expr::Binary { lhs, op, rhs } => {
                f.write_str("(")?;
                write_operand(f, lhs)?;
                write!(f, " {} {})", op, rhs)
            }
            Expr::If {
                condition,
                consequence,
                alternative,
            } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, " else {}", alternative)?;
                }
                Ok(())
            }
            Expr::NormalFn(func) => write!(f, "{}", func),
            Expr::ConciseFn(func) => write!(f, "{}", func),
            Expr::FnCall { ident, args } => {
                write!(f, "{}(", ident)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Error => f.write_str("<error>"),
        }
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.stmts.is_empty() {
            return f.write_str("{ }");
        }
        f.write_str("{ ")?;
        write_stmts(f, &self.stmts)?;
        f.write_str(" }")
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stmt::LetDeclaration { ident, initializer } => write!(f, "{} = {}", ident, initializer),
            Stmt::ReturnStmt(expr) => write!(f, "return {}", expr),
            Stmt::ExprStmt(expr) => write!(f, "{}", expr),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_stmts(f, &self.stmts)
    }
}
