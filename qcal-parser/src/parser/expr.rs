use super::*;
use crate::ast::{InfixOp, PostfixOp, PrefixOp};
use crate::lexer::PREFIX_BP;

impl<'a> Parser<'a> {
    /* Expressions */
    /// Parses any expression.
    /// This is equivalent to calling [`Self::parse_expr_bp`] with `min_bp = 0`.
    pub fn parse_expr(&mut self) -> Expr {
        self.parse_expr_bp(0) // 0 to accept any expression
    }

    /// Parses a primary (atom) expression.
    fn parse_primary_expr(&mut self) -> Expr {
        let kind = self.current_token.kind;

        // NOTE: prefix operators are handled here
        if let Some(op) = PrefixOp::from_token(kind) {
            self.next();
            let arg = self.parse_expr_bp(PREFIX_BP);
            return Expr::Prefix {
                op,
                arg: Box::new(arg),
            };
        }

        match kind {
            TokenKind::Number => self.parse_number_lit(),
            TokenKind::True | TokenKind::False => {
                self.next();
                Expr::BoolLit(kind == TokenKind::True)
            }
            TokenKind::Identifier | TokenKind::Constant => {
                Expr::Identifier(self.next().literal.to_string())
            }
            TokenKind::If => self.parse_if_expr(),
            TokenKind::OpenParen => self.parse_grouped_expr_or_fn(),
            TokenKind::Illegal => {
                self.error(format!(
                    "illegal character \"{}\"",
                    self.current_token.literal
                ));
                self.next();
                Expr::Error
            }
            _ => {
                self.error(format!("no prefix parse function for \"{}\" found", kind));
                // leave delimiters alone so that the enclosing construct can resynchronize on them
                if !matches!(
                    kind,
                    TokenKind::Eof | TokenKind::Semi | TokenKind::CloseParen | TokenKind::CloseBrace
                ) {
                    self.next();
                }
                Expr::Error
            }
        }
    }

    /// Parses an expression with the specified `min_bp`.
    /// To parse any expression use, [`Self::parse_expr`].
    fn parse_expr_bp(&mut self, min_bp: u8) -> Expr {
        let mut lhs = self.parse_primary_expr();

        loop {
            let kind = self.current_token.kind;

            if let Some(l_bp) = kind.postfix_bp() {
                if l_bp < min_bp {
                    break;
                }
                lhs = self.parse_postfix_expr(lhs);
                continue;
            }

            let (op, (l_bp, r_bp)) = match (InfixOp::from_token(kind), kind.infix_bp()) {
                (Some(op), Some(bp)) => (op, bp),
                _ => break, // not a valid binop, stop parsing
            };
            if l_bp < min_bp {
                break; // less than the min_bp, stop parsing
            }

            // self.current_token is a valid binop
            self.next();

            let rhs = self.parse_expr_bp(r_bp);

            lhs = Expr::Binary {
                lhs: Box::new(lhs),
                op,
                rhs: Box::new(rhs),
            }
        }

        lhs
    }

    /// Parses whatever follows `lhs` when the current token is `!`, `(` or `=>`.
    fn parse_postfix_expr(&mut self, lhs: Expr) -> Expr {
        match self.current_token.kind {
            TokenKind::Bang => {
                self.next();
                Expr::Postfix {
                    op: PostfixOp::Factorial,
                    arg: Box::new(lhs),
                }
            }
            TokenKind::OpenParen => self.parse_call_expr(lhs),
            TokenKind::Arrow => self.parse_arrow_fn(lhs),
            _ => lhs,
        }
    }

    /* Expressions.Literals */
    fn parse_number_lit(&mut self) -> Expr {
        let token = self.next();
        match token.literal.parse() {
            Ok(val) => Expr::NumberLit(val),
            Err(_) => {
                self.error_at(
                    format!("could not parse \"{}\" as number", token.literal),
                    token.span,
                );
                Expr::Error
            }
        }
    }

    /* Expressions.If */
    /// Parses an if expression. The condition may or may not be parenthesized, the bodies must be
    /// blocks.
    fn parse_if_expr(&mut self) -> Expr {
        self.expect(TokenKind::If);
        let condition = self.parse_expr();
        let consequence = self.parse_block();
        let alternative = if self.eat(TokenKind::Else) {
            Some(self.parse_block())
        } else {
            None
        };

        Expr::If {
            condition: Box::new(condition),
            consequence,
            alternative,
        }
    }

    /* Expressions.Functions */
    /// Decides whether the `(` at the current token opens a parameter list or a grouped expression.
    /// This is where the 3 tokens of lookahead are needed.
    fn parse_grouped_expr_or_fn(&mut self) -> Expr {
        let is_fn = match self.peek(1) {
            // `() =>`
            TokenKind::CloseParen => self.peek(2) == TokenKind::Arrow,
            TokenKind::Identifier => match self.peek(2) {
                // `(a, ...`
                TokenKind::Comma => true,
                // `(a) =>`
                TokenKind::CloseParen => self.peek(3) == TokenKind::Arrow,
                _ => false,
            },
            _ => false,
        };

        if is_fn {
            let params = self.parse_params();
            return self.parse_fn_body(params);
        }

        self.expect(TokenKind::OpenParen);
        let expr = self.parse_expr();
        self.expect(TokenKind::CloseParen);
        expr
    }

    /// Parses a parenthesized, comma separated list of parameter names.
    fn parse_params(&mut self) -> Vec<String> {
        self.expect(TokenKind::OpenParen);

        let mut params = Vec::new();
        if !self.eat(TokenKind::CloseParen) {
            loop {
                match self.expect_ident() {
                    Some(param) => params.push(param),
                    None => break,
                }

                if self.eat(TokenKind::CloseParen) {
                    break;
                } else if !self.expect(TokenKind::Comma) {
                    break;
                }
            }
        }

        params
    }

    /// Parses `=> body`. A body starting with `{` is a block, anything else is a single expression
    /// that extends as far to the right as possible.
    fn parse_fn_body(&mut self, params: Vec<String>) -> Expr {
        self.expect(TokenKind::Arrow);

        if self.current_token.kind == TokenKind::OpenBrace {
            let body = self.parse_block();
            Expr::NormalFn(Rc::new(NormalFunctionLiteral { params, body }))
        } else {
            let body = self.parse_expr();
            Expr::ConciseFn(Rc::new(ConciseFunctionLiteral { params, body }))
        }
    }

    /// Parses `ident => body`. `(ident) => body` also ends up here, as a grouped identifier.
    fn parse_arrow_fn(&mut self, lhs: Expr) -> Expr {
        match lhs {
            Expr::Identifier(param) if TokenKind::is_constant(&param) => {
                self.error(format!(
                    "invalid function parameter {}: builtin constants cannot be parameters",
                    param
                ));
                self.parse_fn_body(Vec::new());
                Expr::Error
            }
            Expr::Identifier(param) => self.parse_fn_body(vec![param]),
            lhs => {
                self.error(format!(
                    "invalid function parameter {}: parameters must be identifiers",
                    lhs
                ));
                self.parse_fn_body(Vec::new());
                Expr::Error
            }
        }
    }

    /* Expressions.Call */
    /// Parses the argument list of a call expression.
    fn parse_call_expr(&mut self, callee: Expr) -> Expr {
        let span = self.current_token.span.clone();
        self.expect(TokenKind::OpenParen);

        let mut args = Vec::new();
        if !self.eat(TokenKind::CloseParen) {
            loop {
                args.push(self.parse_expr());

                if self.eat(TokenKind::CloseParen) {
                    break;
                } else if !self.expect(TokenKind::Comma) {
                    break;
                }
            }
        }

        match callee {
            Expr::Identifier(ident) => Expr::FnCall { ident, args },
            callee => {
                self.error_at(
                    format!("cannot call {}: callee must be an identifier", callee),
                    span,
                );
                Expr::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::{assert_debug_snapshot, assert_snapshot};

    fn ast(source: &str) -> Expr {
        let mut parser = Parser::new(source);
        let ast = parser.parse_expr();
        assert!(parser.errors().is_empty(), "{}", parser.errors());
        ast
    }

    fn expr(source: &str) -> String {
        ast(source).to_string()
    }

    #[test]
    fn test_literal() {
        assert_eq!(ast("true"), Expr::BoolLit(true));
        assert_eq!(ast("false"), Expr::BoolLit(false));
        assert_eq!(ast("1"), Expr::NumberLit(1.0));
        assert_eq!(ast("5."), Expr::NumberLit(5.0));
        assert_eq!(ast(".5"), Expr::NumberLit(0.5));
        assert_eq!(ast("2.5"), Expr::NumberLit(2.5));
    }

    #[test]
    fn test_binary_expr() {
        assert_debug_snapshot!(ast("1 + 1"), @r###"
        Binary {
            lhs: NumberLit(
                1.0,
            ),
            op: Add,
            rhs: NumberLit(
                1.0,
            ),
        }
        "###);
        assert_snapshot!(expr("1 == 2 - 1"), @"(1 == (2 - 1))");
        assert_snapshot!(expr("2 * 2 * 2"), @"((2 * 2) * 2)");
        assert_snapshot!(expr("a - b - c"), @"((a - b) - c)");
        assert_snapshot!(expr("a + b * c"), @"(a + (b * c))");
        assert_snapshot!(expr("a % b / c"), @"((a % b) / c)");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_snapshot!(expr("a ^ b ^ c"), @"(a ^ (b ^ c))");
        assert_snapshot!(expr("a * b ^ c"), @"(a * (b ^ c))");
        assert_snapshot!(expr("-a ^ 2"), @"(-(a ^ 2))");
        assert_snapshot!(expr("2 ^ -1"), @"(2 ^ (-1))");
    }

    #[test]
    fn test_prefix_and_postfix() {
        assert_snapshot!(expr("-a!"), @"(-(a!))");
        assert_snapshot!(expr("a!^2"), @"((a!) ^ 2)");
        assert_snapshot!(expr("a^2!"), @"(a ^ (2!))");
        assert_snapshot!(expr("!-a"), @"(!(-a))");
        assert_snapshot!(expr("+a * b"), @"((+a) * b)");
        assert_snapshot!(expr("5!!"), @"((5!)!)");
    }

    #[test]
    fn test_logical_and_comparison() {
        assert_snapshot!(expr("a or b and c"), @"(a or (b and c))");
        assert_snapshot!(expr("a < b == b >= c"), @"((a < b) == (b >= c))");
        assert_snapshot!(expr("a + 1 <= b * 2"), @"((a + 1) <= (b * 2))");
        assert_snapshot!(expr("!true != false"), @"((!true) != false)");
    }

    #[test]
    fn test_grouped_expr() {
        assert_snapshot!(expr("(a + b) * c"), @"((a + b) * c)");
        assert_snapshot!(expr("(a)"), @"a");
        assert_snapshot!(expr("2^0+3*5/(2+4-1)"), @"((2 ^ 0) + ((3 * 5) / ((2 + 4) - 1)))");
    }

    #[test]
    fn test_identifier_and_constants() {
        assert_eq!(ast("foo"), Expr::Identifier("foo".to_string()));
        assert_snapshot!(expr("2 * pi * e"), @"((2 * pi) * e)");
    }

    #[test]
    fn test_fn_call() {
        assert_snapshot!(expr("foo()"), @"foo()");
        assert_snapshot!(expr("foo(1, bar)"), @"foo(1, bar)");
        assert_snapshot!(expr("foo(1, bar, baz())"), @"foo(1, bar, baz())");
        assert_snapshot!(expr("-f(x)!"), @"(-(f(x)!))");
        assert_snapshot!(expr("map(x => x + 1, 2)"), @"map((x) => (x + 1), 2)");
    }

    #[test]
    fn test_fn_literal() {
        assert_snapshot!(expr("() => 1"), @"() => 1");
        assert_snapshot!(expr("(a) => a"), @"(a) => a");
        assert_snapshot!(expr("(a, b) => a + b"), @"(a, b) => (a + b)");
        assert_snapshot!(expr("x => x ^ 2"), @"(x) => (x ^ 2)");
        assert_snapshot!(expr("a => b => a * b"), @"(a) => (b) => (a * b)");
        assert_snapshot!(expr("(a, b) => { c = a + b; return c }"), @"(a, b) => { c = (a + b); return c }");
        assert_snapshot!(expr("1 + x => x"), @"(1 + (x) => x)");
    }

    #[test]
    fn test_if_expr() {
        assert_snapshot!(expr("if x < y { x } else { y }"), @"if (x < y) { x } else { y }");
        assert_snapshot!(expr("if (x < y) { x }"), @"if (x < y) { x }");
        assert_snapshot!(expr("if (x) { 1 }"), @"if x { 1 }");
    }

    #[test]
    fn test_invalid_fn_param() {
        let mut parser = Parser::new("1 => 2");
        assert_eq!(parser.parse_expr(), Expr::Error);
        assert_eq!(
            parser.errors().messages(),
            vec!["invalid function parameter 1: parameters must be identifiers"]
        );

        for source in &["e => e + 1", "(pi) => pi"] {
            let mut parser = Parser::new(*source);
            assert_eq!(parser.parse_expr(), Expr::Error);
            assert_eq!(parser.errors().len(), 1);
            assert!(parser.errors().messages()[0].ends_with("builtin constants cannot be parameters"));
        }

        let mut parser = Parser::new("(e, x) => 1");
        parser.parse_expr();
        assert!(!parser.errors().is_empty());

        let mut parser = Parser::new("(a, 1) => a");
        parser.parse_expr();
        assert_eq!(
            parser.errors().messages()[0],
            "expected next token to be \"IDENT\", got \"NUMBER\" instead"
        );
    }
}
