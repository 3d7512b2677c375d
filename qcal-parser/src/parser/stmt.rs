use super::*;

impl<'a> Parser<'a> {
    /// Parses a statement.
    pub fn parse_stmt(&mut self) -> Stmt {
        let kind = self.current_token.kind;
        match kind {
            // assigning to a constant is rejected when evaluating, not when parsing
            TokenKind::Identifier | TokenKind::Constant if self.peek(1) == TokenKind::Equals => {
                self.parse_let_declaration()
            }
            TokenKind::Return => self.parse_return_stmt(),
            _ => Stmt::ExprStmt(self.parse_expr()),
        }
    }

    /// Parses a statement inside a statement list, along with its optional trailing `;`.
    /// Returns `None` if no token could be consumed (the offending token is skipped).
    pub(super) fn parse_stmt_in_list(&mut self) -> Option<Stmt> {
        let consumed = self.consumed;
        let stmt = self.parse_stmt();
        self.eat(TokenKind::Semi);

        if self.consumed == consumed {
            // the error has already been reported, skip the token to avoid looping forever
            self.next();
            None
        } else {
            Some(stmt)
        }
    }

    /// Parses a brace-delimited list of statements.
    pub fn parse_block(&mut self) -> Block {
        if !self.expect(TokenKind::OpenBrace) {
            return Block::default();
        }

        let mut stmts = Vec::new();
        loop {
            match self.current_token.kind {
                TokenKind::CloseBrace => {
                    self.next();
                    break;
                }
                TokenKind::Eof => {
                    self.expect(TokenKind::CloseBrace);
                    break;
                }
                TokenKind::Semi => {
                    self.next();
                }
                _ => {
                    if let Some(stmt) = self.parse_stmt_in_list() {
                        stmts.push(stmt);
                    }
                }
            }
        }

        Block { stmts }
    }

    fn parse_let_declaration(&mut self) -> Stmt {
        let ident = self.next().literal.to_string();
        self.expect(TokenKind::Equals);
        let initializer = self.parse_expr();
        Stmt::LetDeclaration { ident, initializer }
    }

    fn parse_return_stmt(&mut self) -> Stmt {
        self.expect(TokenKind::Return);
        let expr = self.parse_expr();
        Stmt::ReturnStmt(expr)
    }
}
