//! Turning normalized text into [`Token`]s.

use std::ops::Range;
use thiserror::Error;

/// Split some normalized text into its [`Token`]s.
///
/// Whitespace is skipped. Every letter is a variable on its own, so a run of
/// two or more letters (e.g. `xy`) is rejected instead of being read as an
/// implicit product.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let tokens = Tokens::new(src).collect::<Result<Vec<_>, _>>()?;
    tracing::trace!(count = tokens.len(), "Tokenized {:?}", src);
    Ok(tokens)
}

/// Make sure every `(` has a matching `)` and vice versa.
pub fn check_brackets(tokens: &[Token<'_>]) -> Result<(), ParseError> {
    let mut open = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::OpenParen => open.push(token.span.start),
            TokenKind::CloseParen => {
                if open.pop().is_none() {
                    return Err(ParseError::UnbalancedParenthesis {
                        character: ')',
                        index: token.span.start,
                    });
                }
            },
            _ => {},
        }
    }

    match open.pop() {
        Some(index) => Err(ParseError::UnbalancedParenthesis {
            character: '(',
            index,
        }),
        None => Ok(()),
    }
}

/// Possible errors that may occur while tokenizing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("invalid character '{character}' at position {index}")]
    InvalidCharacter { character: char, index: usize },
    #[error(
        "\"{text}\" at position {index} is not a variable, only single \
         letters are supported"
    )]
    MultiLetterIdentifier { text: String, index: usize },
    #[error("unbalanced '{character}' at position {index}")]
    UnbalancedParenthesis { character: char, index: usize },
    #[error("\"{text}\" at position {index} is not a valid number")]
    InvalidNumber { text: String, index: usize },
}

/// A single lexical unit, borrowing its text from the source string.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Range<usize>,
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    fn from_text(
        original_source: &'a str,
        span: Range<usize>,
        kind: TokenKind,
    ) -> Self {
        Token {
            text: &original_source[span.clone()],
            span,
            kind,
        }
    }
}

/// The kinds of token that can appear in an expression.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum TokenKind {
    Variable,
    Number,
    OpenParen,
    CloseParen,
    Plus,
    Minus,
    Times,
    Divide,
}

#[derive(Debug, Clone, PartialEq)]
struct Tokens<'a> {
    src: &'a str,
    cursor: usize,
}

impl<'a> Tokens<'a> {
    fn new(src: &'a str) -> Self { Tokens { src, cursor: 0 } }

    fn rest(&self) -> &'a str { &self.src[self.cursor..] }

    fn peek(&self) -> Option<char> { self.rest().chars().next() }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.cursor += c.len_utf8();
        Some(c)
    }

    fn chomp(&mut self, kind: TokenKind) -> Option<Result<Token<'a>, ParseError>> {
        let start = self.cursor;
        self.advance()?;
        let end = self.cursor;

        Some(Ok(Token::from_text(self.src, start..end, kind)))
    }

    fn take_while<P>(&mut self, mut predicate: P) -> Range<usize>
    where
        P: FnMut(char) -> bool,
    {
        let start = self.cursor;

        while let Some(c) = self.peek() {
            if !predicate(c) {
                break;
            }

            self.advance();
        }

        start..self.cursor
    }

    fn chomp_number(&mut self) -> Token<'a> {
        let start = self.cursor;
        self.take_while(|c| c.is_ascii_digit());

        if self.peek() == Some('.') {
            // skip past the decimal, trailing digits are optional
            self.advance();
            self.take_while(|c| c.is_ascii_digit());
        }

        Token::from_text(self.src, start..self.cursor, TokenKind::Number)
    }

    fn chomp_variable(&mut self) -> Result<Token<'a>, ParseError> {
        let span = self.take_while(|c| c.is_ascii_lowercase());

        if span.len() > 1 {
            return Err(ParseError::MultiLetterIdentifier {
                text: self.src[span.clone()].to_string(),
                index: span.start,
            });
        }

        Ok(Token::from_text(self.src, span, TokenKind::Variable))
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Result<Token<'a>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            return match self.peek()? {
                space if space.is_whitespace() => {
                    self.advance();
                    continue;
                },
                '(' => self.chomp(TokenKind::OpenParen),
                ')' => self.chomp(TokenKind::CloseParen),
                '+' => self.chomp(TokenKind::Plus),
                '-' => self.chomp(TokenKind::Minus),
                '*' => self.chomp(TokenKind::Times),
                '/' => self.chomp(TokenKind::Divide),
                'a'..='z' => Some(self.chomp_variable()),
                '0'..='9' => Some(Ok(self.chomp_number())),
                other => {
                    let index = self.cursor;
                    // don't yield the same error forever
                    self.cursor = self.src.len();
                    Some(Err(ParseError::InvalidCharacter {
                        character: other,
                        index,
                    }))
                },
            };
        }
    }
}
