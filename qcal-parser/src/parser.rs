use crate::ast::{Block, ConciseFunctionLiteral, Expr, NormalFunctionLiteral, Program, Stmt};
use crate::lexer::{Lexer, Token, TokenKind};
use qcal_source::{Source, SyntaxError, SyntaxErrors};
use std::collections::VecDeque;
use std::mem;
use std::ops::Range;
use std::rc::Rc;

mod expr;
mod stmt;

/// The maximum number of tokens the parser can look past the current token.
const MAX_LOOKAHEAD: usize = 3;

pub struct Parser<'a> {
    /// Cached token for peeking.
    current_token: Token<'a>,
    /// Tokens after `current_token` that have already been lexed.
    lookahead: VecDeque<Token<'a>>,
    lexer: Lexer<'a>,
    /// Accumulated errors.
    errors: SyntaxErrors,
    /// Number of tokens eaten so far. Used to make sure statement loops always make progress.
    consumed: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: impl Into<Source<'a>>) -> Self {
        let source = source.into();
        let mut lexer = Lexer::new(source.content);
        Self {
            current_token: lexer.next_token(),
            lookahead: VecDeque::with_capacity(MAX_LOOKAHEAD),
            lexer,
            errors: SyntaxErrors::new(),
            consumed: 0,
        }
    }

    /// Errors accumulated so far.
    pub fn errors(&self) -> &SyntaxErrors {
        &self.errors
    }
}

impl<'a> Parser<'a> {
    /// Parses the whole input. Parsing does not stop at the first error: the returned
    /// [`SyntaxErrors`] contains every error found, and the [`Program`] is a best-effort tree
    /// with [`Expr::Error`] placeholders where errors occurred.
    pub fn parse_program(mut self) -> (Program, SyntaxErrors) {
        let mut stmts = Vec::new();

        while self.current_token.kind != TokenKind::Eof {
            if self.eat(TokenKind::Semi) {
                continue; // empty statement
            }
            if let Some(stmt) = self.parse_stmt_in_list() {
                stmts.push(stmt);
            }
        }

        (Program { stmts }, self.errors)
    }
}

/// Parses `source` into a [`Program`] along with all the syntax errors found.
pub fn parse(source: &str) -> (Program, SyntaxErrors) {
    Parser::new(source).parse_program()
}

/// Parse utilities
impl<'a> Parser<'a> {
    /// Advances to the next token and returns the token that was eaten.
    fn next(&mut self) -> Token<'a> {
        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => self.lexer.next_token(),
        };
        self.consumed += 1;
        mem::replace(&mut self.current_token, token)
    }

    /// Returns the kind of the `n`th token after the current token (`n` starts at 1).
    fn peek(&mut self, n: usize) -> TokenKind {
        debug_assert!(n >= 1 && n <= MAX_LOOKAHEAD);
        while self.lookahead.len() < n {
            let token = self.lexer.next_token();
            self.lookahead.push_back(token);
        }
        self.lookahead[n - 1].kind
    }

    /// Predicate that tests whether the current token has the same kind and eats it if yes as a side effect.
    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_token.kind == kind {
            self.next(); // eat token
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind) -> bool {
        if self.eat(kind) {
            true
        } else {
            self.error(format!(
                "expected next token to be \"{}\", got \"{}\" instead",
                kind, self.current_token.kind
            ));
            false
        }
    }

    /// Eats an identifier and returns its name.
    fn expect_ident(&mut self) -> Option<String> {
        if self.current_token.kind == TokenKind::Identifier {
            Some(self.next().literal.to_string())
        } else {
            self.expect(TokenKind::Identifier);
            None
        }
    }

    /// Reports an error at the current token.
    fn error(&mut self, message: impl ToString) {
        let span = self.current_token.span.clone();
        self.error_at(message, span);
    }

    /// Reports an error at `span`. Only the first error reported at a given position is kept,
    /// since anything after it is usually a consequence of the first one.
    fn error_at(&mut self, message: impl ToString, span: Range<usize>) {
        if let Some(last) = self.errors.last() {
            if last.span().start == span.start {
                return;
            }
        }
        self.errors.add_error(SyntaxError::new(message, span));
    }
}
