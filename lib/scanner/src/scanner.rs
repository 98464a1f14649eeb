use cursor::{Cursor, Line};
use diagnostics::{Diagnostic, Diagnostics, Location};
use log::trace;

pub mod token;
pub use token::{Literal, Token, TokenData, TokenType};
use TokenData::*;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ScanErrorType {
    #[error("Unexpected character.")]
    UnexpectedCharacter(char),
    #[error("Unterminated string.")]
    UnterminatedString,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("[line {line}] Error: {error}")]
pub struct ScanError {
    pub error: ScanErrorType,
    pub line: Line,
}

impl From<ScanError> for Diagnostic {
    fn from(e: ScanError) -> Self {
        Diagnostic::new(e.line, Location::Line, e.error)
    }
}

/// Scans `source` in one pass.
///
/// Lexical errors don't stop the scan: each one is reported to `diagnostics`
/// and the offending lexeme is skipped, so the returned tokens are a best
/// effort. The last token is always [`TokenData::Eof`].
pub fn scan<'a>(source: &'a str, diagnostics: &mut Diagnostics) -> Vec<Token<'a>> {
    TokenStream::new(source)
        .filter_map(|result| match result {
            Ok(token) => Some(token),
            Err(e) => {
                diagnostics.report(e);
                None
            }
        })
        .collect()
}

/// Lazily scans tokens out of a source string.
///
/// Yields the `Eof` token exactly once, after which it is exhausted.
#[derive(Debug, Clone)]
pub struct TokenStream<'a> {
    cursor: Cursor<'a>,
    done: bool,
}

impl<'a> TokenStream<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { cursor: Cursor::new(source), done: false }
    }

    fn make_token(&self, data: TokenData<'a>, start: &Cursor<'a>) -> Token<'a> {
        let token = Token::new(data, start.slice_until(&self.cursor), start.line());
        trace!("Scanned {:?} {:?} on line {}", token.ty(), token.lexeme(), token.line());
        token
    }

    fn error(&self, error: ScanErrorType) -> ScanError {
        ScanError { error, line: self.cursor.line() }
    }

    fn string(&mut self, start: &Cursor<'a>) -> Result<TokenData<'a>, ScanError> {
        self.cursor.advance_while(|c| c != '"');

        if !self.cursor.next_if_eq('"') {
            return Err(self.error(ScanErrorType::UnterminatedString));
        }

        let lexeme = start.slice_until(&self.cursor);
        Ok(Str(&lexeme[1..lexeme.len() - 1]))
    }

    fn number(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(|c| c.is_ascii_digit());

        // A '.' only belongs to the number if a digit follows it
        if self.cursor.peek() == Some('.')
            && self.cursor.peek_next().is_some_and(|c| c.is_ascii_digit())
        {
            self.cursor.next();
            self.cursor.advance_while(|c| c.is_ascii_digit());
        }

        // Digits with an optional fraction always parse
        Number(start.slice_until(&self.cursor).parse().unwrap_or_default())
    }

    fn identifier(&mut self, start: &Cursor<'a>) -> TokenData<'a> {
        self.cursor.advance_while(is_alphanumeric);
        TokenData::keyword(start.slice_until(&self.cursor)).unwrap_or(Identifier)
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = Result<Token<'a>, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        loop {
            let start = self.cursor.clone();
            let Some(c) = self.cursor.next() else {
                self.done = true;
                return Some(Ok(self.make_token(Eof, &start)));
            };

            let data = match c {
                '(' => LeftParen,
                ')' => RightParen,
                '{' => LeftBrace,
                '}' => RightBrace,
                ',' => Comma,
                '.' => Dot,
                '-' => Minus,
                '+' => Plus,
                ';' => Semicolon,
                '*' => Star,

                '!' => if self.cursor.next_if_eq('=') { BangEqual } else { Bang },
                '=' => if self.cursor.next_if_eq('=') { EqualEqual } else { Equal },
                '<' => if self.cursor.next_if_eq('=') { LessEqual } else { Less },
                '>' => if self.cursor.next_if_eq('=') { GreaterEqual } else { Greater },

                '/' => {
                    if self.cursor.next_if_eq('/') {
                        // Comment, the '\n' is left for the line count
                        self.cursor.advance_while(|c| c != '\n');
                        continue;
                    }
                    Slash
                }

                // The cursor counts lines itself
                ' ' | '\r' | '\t' | '\n' => continue,

                '"' => match self.string(&start) {
                    Ok(data) => data,
                    Err(e) => return Some(Err(e)),
                },

                d if d.is_ascii_digit() => self.number(&start),

                c if is_alpha(c) => self.identifier(&start),

                c => return Some(Err(self.error(ScanErrorType::UnexpectedCharacter(c)))),
            };

            return Some(Ok(self.make_token(data, &start)));
        }
    }
}

impl std::iter::FusedIterator for TokenStream<'_> {}
