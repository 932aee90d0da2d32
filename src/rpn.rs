//! Converting infix [`Token`]s to postfix using the shunting-yard algorithm.

use crate::{
    parse::{self, ParseError, Token, TokenKind},
    term::Symbol,
};
use std::fmt::{self, Display, Formatter};

/// Tokenize some normalized text and convert it to postfix.
pub fn parse(src: &str) -> Result<Vec<Postfix>, ParseError> {
    let tokens = parse::tokenize(src)?;
    to_postfix(&tokens)
}

/// Convert a sequence of infix tokens into postfix (Reverse Polish) order.
///
/// Brackets are checked up front. Doubled operators and adjacent operands
/// are passed through untouched, they show up as a structural error when the
/// postfix is evaluated.
pub fn to_postfix(tokens: &[Token<'_>]) -> Result<Vec<Postfix>, ParseError> {
    parse::check_brackets(tokens)?;

    let mut yard = Yard::default();
    // a "-" seen here is negation, not subtraction
    let mut expecting_operand = true;

    for token in tokens {
        match token.kind {
            TokenKind::Number => {
                let value = token.text.parse().map_err(|_| {
                    ParseError::InvalidNumber {
                        text: token.text.to_string(),
                        index: token.span.start,
                    }
                })?;
                yard.output.push(Postfix::Number(value));
                expecting_operand = false;
            },
            TokenKind::Variable => {
                yard.output.push(Postfix::Variable(Symbol::named(token.text)));
                expecting_operand = false;
            },
            TokenKind::OpenParen => {
                yard.stack.push(StackItem::OpenParen);
                expecting_operand = true;
            },
            TokenKind::CloseParen => {
                yard.close_paren();
                expecting_operand = false;
            },
            TokenKind::Minus if expecting_operand => {
                yard.stack.push(StackItem::Operator(Operator::Negate));
            },
            kind => {
                let op = BinaryOperation::from_token(kind);
                yard.push_operator(Operator::Binary(op));
                expecting_operand = true;
            },
        }
    }

    Ok(yard.finish())
}

/// One item of a postfix expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Postfix {
    Number(f64),
    Variable(Symbol),
    Operator(Operator),
}

impl Display for Postfix {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Postfix::Number(value) => write!(f, "{}", value),
            Postfix::Variable(symbol) => write!(f, "{}", symbol),
            Postfix::Operator(op) => write!(f, "{}", op),
        }
    }
}

/// An operation that can be applied to two arguments.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum BinaryOperation {
    Plus,
    Minus,
    Times,
    Divide,
}

impl BinaryOperation {
    fn from_token(kind: TokenKind) -> Self {
        match kind {
            TokenKind::Plus => BinaryOperation::Plus,
            TokenKind::Minus => BinaryOperation::Minus,
            TokenKind::Times => BinaryOperation::Times,
            TokenKind::Divide => BinaryOperation::Divide,
            other => unreachable!("{:?} is not a binary op", other),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Operator {
    Binary(BinaryOperation),
    /// Unary minus.
    Negate,
}

impl Operator {
    /// Higher binds tighter. Operators of equal precedence are evaluated left
    /// to right.
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Binary(BinaryOperation::Plus)
            | Operator::Binary(BinaryOperation::Minus) => 1,
            Operator::Binary(BinaryOperation::Times)
            | Operator::Binary(BinaryOperation::Divide) => 2,
            Operator::Negate => 3,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Operator::Binary(BinaryOperation::Plus) => "+",
            Operator::Binary(BinaryOperation::Minus) => "-",
            Operator::Binary(BinaryOperation::Times) => "*",
            Operator::Binary(BinaryOperation::Divide) => "/",
            Operator::Negate => "neg",
        };
        write!(f, "{}", symbol)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum StackItem {
    Operator(Operator),
    OpenParen,
}

#[derive(Debug, Default)]
struct Yard {
    output: Vec<Postfix>,
    stack: Vec<StackItem>,
}

impl Yard {
    fn pop_operator_at_least(&mut self, precedence: u8) -> Option<Operator> {
        match self.stack.last() {
            Some(StackItem::Operator(op)) if op.precedence() >= precedence => {
                let op = *op;
                self.stack.pop();
                Some(op)
            },
            _ => None,
        }
    }

    fn push_operator(&mut self, op: Operator) {
        while let Some(higher) = self.pop_operator_at_least(op.precedence()) {
            self.output.push(Postfix::Operator(higher));
        }
        self.stack.push(StackItem::Operator(op));
    }

    fn close_paren(&mut self) {
        while let Some(item) = self.stack.pop() {
            match item {
                StackItem::OpenParen => return,
                StackItem::Operator(op) => {
                    self.output.push(Postfix::Operator(op))
                },
            }
        }
    }

    fn finish(mut self) -> Vec<Postfix> {
        while let Some(item) = self.stack.pop() {
            if let StackItem::Operator(op) = item {
                self.output.push(Postfix::Operator(op));
            }
        }

        tracing::trace!(
            "Postfix: {}",
            self.output
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        );
        self.output
    }
}
