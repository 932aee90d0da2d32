use crate::{
    ops::{self, EvaluationError},
    parse::ParseError,
    rpn,
    term::{self, LinearTerm, Number, Symbol},
    Equation,
};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Solve a linear equation for its unknown.
///
/// Both sides are folded into a single [`LinearTerm`], `a*x + b`, by
/// evaluating `(unknown side) - (other side)`. The equation then holds when
/// `a*x + b = 0`, so `x = -b/a`.
pub fn solve(equation: &Equation) -> Result<Solution, SolveError> {
    let rearranged = equation.rearranged()?;
    let postfix = rpn::parse(&rearranged)?;
    let term: LinearTerm = ops::evaluate(&postfix)?;
    tracing::trace!(%rearranged, %term, "Collected like terms");

    isolate(term)
}

fn isolate(term: LinearTerm) -> Result<Solution, SolveError> {
    let symbol = term.symbol.clone().ok_or(SolveError::NoUnknown)?;

    if term.has_negligible_coefficient() {
        let degeneracy = if term::is_negligible(term.constant, 0.0) {
            Degeneracy::InfinitelyMany
        } else {
            Degeneracy::NoSolution
        };
        return Err(SolveError::Degenerate(degeneracy));
    }

    Ok(Solution {
        symbol,
        value: -term.constant / term.coefficient,
    })
}

/// The value which makes an [`Equation`] hold.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    pub symbol: Symbol,
    pub value: f64,
}

impl Display for Solution {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.symbol, Number(self.value))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvaluationError),
    #[error("the equation has no unique solution, {0}")]
    Degenerate(Degeneracy),
    #[error("the equation doesn't contain an unknown")]
    NoUnknown,
    #[error("expected an equation containing '='")]
    NotAnEquation,
}

/// Why an equation whose unknown cancels out can't be solved.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Degeneracy {
    NoSolution,
    InfinitelyMany,
}

impl Display for Degeneracy {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Degeneracy::NoSolution => write!(f, "it is never true"),
            Degeneracy::InfinitelyMany => write!(f, "it is always true"),
        }
    }
}
