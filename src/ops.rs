//! Evaluating postfix expressions.

use crate::{
    rpn::{BinaryOperation, Operator, Postfix},
    term::{LinearTerm, Symbol},
};
use thiserror::Error;

/// A value the postfix evaluator can push onto its stack.
///
/// [`LinearTerm`] tracks the unknown symbolically, while `f64` is the plain
/// arithmetic fast path that refuses to see a variable at all.
pub trait Operand: Sized {
    fn number(value: f64) -> Self;

    fn variable(symbol: &Symbol) -> Result<Self, EvaluationError>;

    fn apply(
        self,
        op: BinaryOperation,
        rhs: Self,
    ) -> Result<Self, EvaluationError>;

    fn negate(self) -> Self;
}

impl Operand for f64 {
    fn number(value: f64) -> Self { value }

    fn variable(symbol: &Symbol) -> Result<Self, EvaluationError> {
        Err(EvaluationError::UnexpectedVariable {
            symbol: symbol.clone(),
        })
    }

    fn apply(
        self,
        op: BinaryOperation,
        rhs: Self,
    ) -> Result<Self, EvaluationError> {
        match op {
            BinaryOperation::Plus => Ok(self + rhs),
            BinaryOperation::Minus => Ok(self - rhs),
            BinaryOperation::Times => Ok(self * rhs),
            BinaryOperation::Divide if rhs == 0.0 => {
                Err(EvaluationError::DivisionByZero)
            },
            BinaryOperation::Divide => Ok(self / rhs),
        }
    }

    fn negate(self) -> Self { -self }
}

impl Operand for LinearTerm {
    fn number(value: f64) -> Self { LinearTerm::constant(value) }

    fn variable(symbol: &Symbol) -> Result<Self, EvaluationError> {
        Ok(LinearTerm::variable(symbol.clone()))
    }

    fn apply(
        self,
        op: BinaryOperation,
        rhs: Self,
    ) -> Result<Self, EvaluationError> {
        match op {
            BinaryOperation::Plus => self.checked_add(rhs),
            BinaryOperation::Minus => self.checked_sub(rhs),
            BinaryOperation::Times => self.checked_mul(rhs),
            BinaryOperation::Divide => self.checked_div(rhs),
        }
    }

    fn negate(self) -> Self { -self }
}

/// Things that can go wrong while evaluating a postfix expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvaluationError {
    #[error("the '{operator}' operator is missing an operand")]
    MissingOperand { operator: Operator },
    #[error("the expression left {values} values behind instead of 1")]
    LeftoverValues { values: usize },
    #[error("cannot divide by an expression containing a variable")]
    NonLinearDivision,
    #[error("cannot multiply two expressions containing a variable")]
    NonLinearProduct,
    #[error("only one variable is supported, found both {first} and {second}")]
    MultipleVariables { first: Symbol, second: Symbol },
    #[error("division by zero")]
    DivisionByZero,
    #[error("unexpected variable, {symbol}, in a plain arithmetic expression")]
    UnexpectedVariable { symbol: Symbol },
}

/// Evaluate a postfix expression from left to right.
pub fn evaluate<V>(postfix: &[Postfix]) -> Result<V, EvaluationError>
where
    V: Operand,
{
    let mut stack: Vec<V> = Vec::new();

    for item in postfix {
        match item {
            Postfix::Number(value) => stack.push(V::number(*value)),
            Postfix::Variable(symbol) => stack.push(V::variable(symbol)?),
            Postfix::Operator(op) => {
                let missing = EvaluationError::MissingOperand { operator: *op };

                match *op {
                    Operator::Negate => {
                        let operand = stack.pop().ok_or(missing)?;
                        stack.push(operand.negate());
                    },
                    Operator::Binary(binary) => {
                        // the right operand is on top
                        let right =
                            stack.pop().ok_or_else(|| missing.clone())?;
                        let left = stack.pop().ok_or(missing)?;
                        stack.push(left.apply(binary, right)?);
                    },
                }
            },
        }
    }

    match stack.len() {
        1 => Ok(stack.remove(0)),
        values => Err(EvaluationError::LeftoverValues { values }),
    }
}
