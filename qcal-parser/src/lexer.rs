use logos::Logos;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Logos, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // literals
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    #[regex(r"\.[0-9]+")]
    Number,
    /// Builtin constants. These are lexed separately so that the parser can reject them where a
    /// user identifier is required (e.g. function parameters).
    #[token("e")]
    #[token("pi")]
    Constant,

    // identifiers
    #[regex("[a-zA-Z_]+")]
    Identifier,

    // prefix / postfix operators
    #[token("!")]
    Bang,

    // binary operators
    // - arithmetics
    #[token("+")]
    Plus,
    #[token("-")]
    Minus, // NOTE: can also be unary
    #[token("*")]
    Asterisk,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("^")]
    Caret,
    // - assignment
    #[token("=")]
    Equals,
    // - equality
    #[token("==")]
    EqualsEquals,
    #[token("!=")]
    NotEquals,
    // - ordering
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEquals,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEquals,
    // - logical
    #[token("and")]
    And,
    #[token("or")]
    Or,

    // functions
    #[token("=>")]
    Arrow,

    // punctuation
    #[token("(")]
    OpenParen,
    #[token(")")]
    CloseParen,
    #[token("{")]
    OpenBrace,
    #[token("}")]
    CloseBrace,
    #[token(",")]
    Comma,
    #[token(";")]
    Semi,

    // keywords
    #[token("true")]
    True,
    #[token("false")]
    False,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("return")]
    Return,

    // misc
    #[regex(r"[ \t\n\r]+", logos::skip)]
    #[error]
    Illegal,

    /// Only generated by [`Lexer::next_token`] once the input is exhausted.
    Eof,
}

/// Binding power for prefix operators. Anything binding tighter (`^`, postfix `!`, calls) is part
/// of the operand.
pub const PREFIX_BP: u8 = 14;

impl TokenKind {
    /// Returns `true` if `ident` lexes as a single builtin constant token.
    pub fn is_constant(ident: &str) -> bool {
        let mut lexer = TokenKind::lexer(ident);
        lexer.next() == Some(TokenKind::Constant) && lexer.next().is_none()
    }

    /// Returns the infix binding power or `None` if invalid infix token.
    /// Binding power `0` and `1` is reserved for accepting any expression.
    /// Left associative operators have `l_bp < r_bp`, right associative operators (only `^`) have
    /// `l_bp > r_bp`.
    pub fn infix_bp(&self) -> Option<(u8, u8)> {
        match self {
            /* Logical */
            TokenKind::Or => Some((2, 3)),
            TokenKind::And => Some((4, 5)),
            /* Equality */
            TokenKind::EqualsEquals | TokenKind::NotEquals => Some((6, 7)),
            /* Comparison */
            TokenKind::GreaterThan
            | TokenKind::GreaterThanEquals
            | TokenKind::LessThan
            | TokenKind::LessThanEquals => Some((8, 9)),
            /* Additive */
            TokenKind::Plus | TokenKind::Minus => Some((10, 11)),
            /* Multiplicative */
            TokenKind::Asterisk | TokenKind::Slash | TokenKind::Percent => Some((12, 13)),
            /* Power */
            TokenKind::Caret => Some((16, 15)),
            _ => None,
        }
    }

    /// Returns the left binding power of postfix-like tokens.
    /// `=>` is included here since its left hand side is a single identifier. The body is then
    /// parsed with the lowest binding power.
    pub fn postfix_bp(&self) -> Option<u8> {
        match self {
            TokenKind::Bang => Some(17),
            TokenKind::OpenParen => Some(19),
            TokenKind::Arrow => Some(21),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Number => "NUMBER",
            TokenKind::Constant => "CONSTANT",
            TokenKind::Identifier => "IDENT",
            TokenKind::Bang => "!",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Asterisk => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Caret => "^",
            TokenKind::Equals => "=",
            TokenKind::EqualsEquals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::GreaterThan => ">",
            TokenKind::GreaterThanEquals => ">=",
            TokenKind::LessThan => "<",
            TokenKind::LessThanEquals => "<=",
            TokenKind::And => "and",
            TokenKind::Or => "or",
            TokenKind::Arrow => "=>",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::OpenBrace => "{",
            TokenKind::CloseBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semi => ";",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Return => "return",
            TokenKind::Illegal => "ILLEGAL",
            TokenKind::Eof => "EOF",
        };
        f.write_str(s)
    }
}

/// A single token along with the text it was lexed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub literal: &'a str,
    pub span: Range<usize>,
}

/// Pulls [`Token`]s out of the source one at a time.
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
    len: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(source),
            len: source.len(),
        }
    }

    /// Returns the next token. Once the input is exhausted, this keeps returning
    /// [`TokenKind::Eof`].
    pub fn next_token(&mut self) -> Token<'a> {
        match self.inner.next() {
            Some(kind) => Token {
                kind,
                literal: self.inner.slice(),
                span: self.inner.span(),
            },
            None => Token {
                kind: TokenKind::Eof,
                literal: "",
                span: self.len..self.len,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(source: &str) -> Vec<(TokenKind, &str)> {
        let mut lexer = Lexer::new(source);
        let mut tokens = Vec::new();
        loop {
            let token = lexer.next_token();
            if token.kind == TokenKind::Eof {
                break;
            }
            tokens.push((token.kind, token.literal));
        }
        tokens
    }

    #[test]
    fn test_is_constant() {
        assert!(TokenKind::is_constant("e"));
        assert!(TokenKind::is_constant("pi"));
        assert!(!TokenKind::is_constant("pie"));
        assert!(!TokenKind::is_constant("x"));
        assert!(!TokenKind::is_constant("e e"));
    }

    #[test]
    fn test_numbers() {
        use TokenKind::*;
        assert_eq!(
            lex("123 123. .20 123.20"),
            vec![
                (Number, "123"),
                (Number, "123."),
                (Number, ".20"),
                (Number, "123.20")
            ]
        );
        assert_eq!(lex("y = .;"), vec![(Identifier, "y"), (Equals, "="), (Illegal, "."), (Semi, ";")]);
    }

    #[test]
    fn test_operators() {
        use TokenKind::*;
        assert_eq!(
            lex("x = y + y - x * y / x ^ y % y"),
            vec![
                (Identifier, "x"),
                (Equals, "="),
                (Identifier, "y"),
                (Plus, "+"),
                (Identifier, "y"),
                (Minus, "-"),
                (Identifier, "x"),
                (Asterisk, "*"),
                (Identifier, "y"),
                (Slash, "/"),
                (Identifier, "x"),
                (Caret, "^"),
                (Identifier, "y"),
                (Percent, "%"),
                (Identifier, "y"),
            ]
        );
        assert_eq!(
            lex("== != <= >= => < > = !"),
            vec![
                (EqualsEquals, "=="),
                (NotEquals, "!="),
                (LessThanEquals, "<="),
                (GreaterThanEquals, ">="),
                (Arrow, "=>"),
                (LessThan, "<"),
                (GreaterThan, ">"),
                (Equals, "="),
                (Bang, "!"),
            ]
        );
    }

    #[test]
    fn test_function_and_constants() {
        use TokenKind::*;
        assert_eq!(
            lex("f = (a, b) => a + b;\nf(e, pi)"),
            vec![
                (Identifier, "f"),
                (Equals, "="),
                (OpenParen, "("),
                (Identifier, "a"),
                (Comma, ","),
                (Identifier, "b"),
                (CloseParen, ")"),
                (Arrow, "=>"),
                (Identifier, "a"),
                (Plus, "+"),
                (Identifier, "b"),
                (Semi, ";"),
                (Identifier, "f"),
                (OpenParen, "("),
                (Constant, "e"),
                (Comma, ","),
                (Constant, "pi"),
                (CloseParen, ")"),
            ]
        );
    }

    #[test]
    fn test_keywords() {
        use TokenKind::*;
        assert_eq!(
            lex("if else true false and or return elsewhere pie"),
            vec![
                (If, "if"),
                (Else, "else"),
                (True, "true"),
                (False, "false"),
                (And, "and"),
                (Or, "or"),
                (Return, "return"),
                (Identifier, "elsewhere"),
                (Identifier, "pie"),
            ]
        );
    }

    #[test]
    fn test_illegal_and_eof() {
        let mut lexer = Lexer::new("1 # 2");
        assert_eq!(lexer.next_token().kind, TokenKind::Number);
        let illegal = lexer.next_token();
        assert_eq!(illegal.kind, TokenKind::Illegal);
        assert_eq!(illegal.literal, "#");
        assert_eq!(lexer.next_token().kind, TokenKind::Number);
        for _ in 0..3 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }
}
