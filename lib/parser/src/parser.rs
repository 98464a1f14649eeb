mod expr;
mod printer;

use std::{iter::Peekable, vec};

use cursor::Line;
use diagnostics::{Diagnostic, Diagnostics, Location};
use log::trace;
use scanner::{Token, TokenData, TokenType};

pub use expr::{Expr, Visitor};
pub use printer::AstPrinter;
pub use scanner::Literal;

use TokenType::*;

pub type Result<T> = std::result::Result<T, ParseError>;

/// How many unary operators, groupings and binary operators may enclose a
/// single operand. Bounds both the recursion while parsing and the height of
/// the resulting tree.
pub const MAX_DEPTH: usize = 255;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    #[error("Expect ')' after expression.")]
    ExpectedRightParen,
    #[error("Unexpected '{lexeme}' at line {line}, expect an expression.")]
    ExpectedExpression { lexeme: String, line: Line },
    #[error("Expression nested too deeply.")]
    TooDeeplyNested,
}

impl ParseErrorType {
    fn at(self, token: &Token) -> ParseError {
        let location = match token.ty() {
            Eof => Location::End,
            _ => Location::Lexeme(token.lexeme().to_string()),
        };
        ParseError { error: self, line: token.line(), location }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error{location}: {error}")]
pub struct ParseError {
    pub error: ParseErrorType,
    pub line: Line,
    pub location: Location,
}

impl ParseError {
    fn expected_expression(token: &Token) -> Self {
        // The message already names the lexeme, so there's no location suffix
        Self {
            error: ParseErrorType::ExpectedExpression {
                lexeme: token.lexeme().to_string(),
                line: token.line(),
            },
            line: token.line(),
            location: Location::Line,
        }
    }
}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Diagnostic::new(e.line, e.location, e.error)
    }
}

/// Parses a single expression out of `tokens`.
///
/// Returns `None` if there is a syntax error, in which case that (single)
/// error has been reported to `diagnostics`.
pub fn parse<'a>(tokens: Vec<Token<'a>>, diagnostics: &mut Diagnostics) -> Option<Expr<'a>> {
    Parser::new(tokens).parse(diagnostics)
}

/// Scans and parses `source`. Parsing still runs if scanning reported errors,
/// using whatever tokens the scanner could make sense of.
pub fn parse_source<'a>(source: &'a str, diagnostics: &mut Diagnostics) -> Option<Expr<'a>> {
    let tokens = scanner::scan(source, diagnostics);
    parse(tokens, diagnostics)
}

#[derive(Debug)]
pub struct Parser<'a> {
    tokens: Peekable<vec::IntoIter<Token<'a>>>,
    // Stands in for a missing trailing Eof so lookahead never runs dry
    eof: Token<'a>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token<'a>>) -> Self {
        let eof = Token::eof(tokens.last().map_or(Line(1), Token::line));
        Self { tokens: tokens.into_iter().peekable(), eof, depth: 0 }
    }

    pub fn parse(mut self, diagnostics: &mut Diagnostics) -> Option<Expr<'a>> {
        match self.expression() {
            Ok(expr) => {
                trace!("Parsed {}", expr);
                Some(expr)
            }
            Err(e) => {
                trace!("Hit error: {:?}, giving up", e);
                diagnostics.report(e);
                None
            }
        }
    }

    fn expression(&mut self) -> Result<Expr<'a>> {
        self.equality()
    }

    fn equality(&mut self) -> Result<Expr<'a>> {
        let depth = self.depth;
        let mut expr = self.comparison()?;

        while let Some(operator) = self.advance_if(&[BangEqual, EqualEqual]) {
            self.nest(&operator)?;
            let right = self.comparison()?;
            expr = Expr::binary(expr, operator, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn comparison(&mut self) -> Result<Expr<'a>> {
        let depth = self.depth;
        let mut expr = self.term()?;

        while let Some(operator) = self.advance_if(&[Greater, GreaterEqual, Less, LessEqual]) {
            self.nest(&operator)?;
            let right = self.term()?;
            expr = Expr::binary(expr, operator, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn term(&mut self) -> Result<Expr<'a>> {
        let depth = self.depth;
        let mut expr = self.factor()?;

        while let Some(operator) = self.advance_if(&[Plus, Minus]) {
            self.nest(&operator)?;
            let right = self.factor()?;
            expr = Expr::binary(expr, operator, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn factor(&mut self) -> Result<Expr<'a>> {
        let depth = self.depth;
        let mut expr = self.unary()?;

        while let Some(operator) = self.advance_if(&[Star, Slash]) {
            self.nest(&operator)?;
            let right = self.unary()?;
            expr = Expr::binary(expr, operator, right);
        }
        self.depth = depth;
        Ok(expr)
    }

    fn unary(&mut self) -> Result<Expr<'a>> {
        if let Some(operator) = self.advance_if(&[Bang, Minus]) {
            self.nest(&operator)?;
            let right = self.unary()?;
            self.depth -= 1;
            return Ok(Expr::unary(operator, right));
        }
        self.primary()
    }

    fn primary(&mut self) -> Result<Expr<'a>> {
        let token = self.peek().clone();
        trace!("Parsing primary: {:?}", token);

        let value = match *token.data() {
            TokenData::False => Literal::Boolean(false),
            TokenData::True => Literal::Boolean(true),
            TokenData::Nil => Literal::Nil,
            TokenData::Number(n) => Literal::Number(n),
            TokenData::Str(s) => Literal::Str(s),
            TokenData::LeftParen => {
                self.tokens.next();
                self.nest(&token)?;
                let expr = self.expression()?;
                self.consume(RightParen, ParseErrorType::ExpectedRightParen)?;
                self.depth -= 1;
                return Ok(Expr::grouping(expr));
            }
            _ => return Err(ParseError::expected_expression(&token)),
        };

        self.tokens.next();
        Ok(Expr::Literal(value))
    }

    /// Enters one more level of nesting, caused by `token`.
    fn nest(&mut self, token: &Token) -> Result<()> {
        if self.depth == MAX_DEPTH {
            return Err(ParseErrorType::TooDeeplyNested.at(token));
        }
        self.depth += 1;
        Ok(())
    }

    fn consume(&mut self, ty: TokenType, error: ParseErrorType) -> Result<Token<'a>> {
        match self.advance_if(&[ty]) {
            Some(token) => Ok(token),
            None => Err(error.at(self.peek())),
        }
    }
}

// Helpers
impl<'a> Parser<'a> {
    fn peek(&mut self) -> &Token<'a> {
        self.tokens.peek().unwrap_or(&self.eof)
    }

    /// Consumes the next token if it has one of the given types. `Eof` is
    /// never passed here, so it is never consumed.
    fn advance_if(&mut self, types: &[TokenType]) -> Option<Token<'a>> {
        self.tokens.next_if(|token| types.contains(&token.ty()))
    }
}
