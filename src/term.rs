use crate::ops::EvaluationError;
use euclid::approxeq::ApproxEq;
use smol_str::SmolStr;
use std::{
    fmt::{self, Display, Formatter},
    ops::{Add, Neg, Sub},
};

/// The name of the unknown in an expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(SmolStr);

impl Symbol {
    pub fn named<S: Into<SmolStr>>(name: S) -> Self { Symbol(name.into()) }

    pub fn name(&self) -> &str { &self.0 }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An affine value, `coefficient*symbol + constant`.
///
/// A plain number is a term with no symbol and a coefficient of zero. Once a
/// variable has been seen the symbol sticks, even if its coefficient later
/// cancels out, so that mixing two different variables is always caught.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearTerm {
    pub symbol: Option<Symbol>,
    pub coefficient: f64,
    pub constant: f64,
}

impl LinearTerm {
    pub fn constant(value: f64) -> Self {
        LinearTerm {
            symbol: None,
            coefficient: 0.0,
            constant: value,
        }
    }

    pub fn variable(symbol: Symbol) -> Self {
        LinearTerm {
            symbol: Some(symbol),
            coefficient: 1.0,
            constant: 0.0,
        }
    }

    /// Does this term's value depend on the unknown?
    pub fn is_constant(&self) -> bool { self.coefficient == 0.0 }

    /// Is the coefficient nothing but rounding residue? `0.1*x + 0.2*x -
    /// 0.3*x` leaves about `5e-17`, which is noise next to the constant.
    pub fn has_negligible_coefficient(&self) -> bool {
        is_negligible(self.coefficient, self.constant)
    }

    /// Multiply two terms, failing if the result would be quadratic.
    pub fn checked_mul(
        self,
        rhs: LinearTerm,
    ) -> Result<LinearTerm, EvaluationError> {
        if !self.is_constant() && !rhs.is_constant() {
            return Err(EvaluationError::NonLinearProduct);
        }

        let symbol = merge_symbols(self.symbol, rhs.symbol)?;

        Ok(LinearTerm {
            symbol,
            coefficient: self.coefficient * rhs.constant
                + rhs.coefficient * self.constant,
            constant: self.constant * rhs.constant,
        })
    }

    /// Divide by a term, which must not depend on the unknown.
    pub fn checked_div(
        self,
        rhs: LinearTerm,
    ) -> Result<LinearTerm, EvaluationError> {
        if !rhs.is_constant() {
            return Err(EvaluationError::NonLinearDivision);
        }
        if rhs.constant == 0.0 {
            return Err(EvaluationError::DivisionByZero);
        }

        let symbol = merge_symbols(self.symbol, rhs.symbol)?;

        Ok(LinearTerm {
            symbol,
            coefficient: self.coefficient / rhs.constant,
            constant: self.constant / rhs.constant,
        })
    }

    fn checked_sum(
        self,
        rhs: LinearTerm,
        sign: f64,
    ) -> Result<LinearTerm, EvaluationError> {
        Ok(LinearTerm {
            symbol: merge_symbols(self.symbol, rhs.symbol)?,
            coefficient: self.coefficient + sign * rhs.coefficient,
            constant: self.constant + sign * rhs.constant,
        })
    }

    pub fn checked_add(
        self,
        rhs: LinearTerm,
    ) -> Result<LinearTerm, EvaluationError> {
        self.checked_sum(rhs, 1.0)
    }

    pub fn checked_sub(
        self,
        rhs: LinearTerm,
    ) -> Result<LinearTerm, EvaluationError> {
        self.checked_sum(rhs, -1.0)
    }
}

const RELATIVE_EPSILON: f64 = 1e-12;

/// Is `value` zero once rounding residue is allowed for? The tolerance grows
/// with `scale` so small but real values aren't swallowed.
pub(crate) fn is_negligible(value: f64, scale: f64) -> bool {
    let epsilon = RELATIVE_EPSILON * scale.abs().max(1.0);
    value.approx_eq_eps(&0.0, &epsilon)
}

fn merge_symbols(
    left: Option<Symbol>,
    right: Option<Symbol>,
) -> Result<Option<Symbol>, EvaluationError> {
    match (left, right) {
        (Some(l), Some(r)) if l != r => {
            Err(EvaluationError::MultipleVariables {
                first: l,
                second: r,
            })
        },
        (Some(l), _) => Ok(Some(l)),
        (None, r) => Ok(r),
    }
}

// Addition and subtraction only fail when two different symbols meet, so
// operator overloads are handy for terms that share a symbol.

impl Add for LinearTerm {
    type Output = Result<LinearTerm, EvaluationError>;

    fn add(self, rhs: LinearTerm) -> Self::Output { self.checked_add(rhs) }
}

impl Sub for LinearTerm {
    type Output = Result<LinearTerm, EvaluationError>;

    fn sub(self, rhs: LinearTerm) -> Self::Output { self.checked_sub(rhs) }
}

impl Neg for LinearTerm {
    type Output = LinearTerm;

    fn neg(self) -> LinearTerm {
        LinearTerm {
            symbol: self.symbol,
            coefficient: -self.coefficient,
            constant: -self.constant,
        }
    }
}

impl Display for LinearTerm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.symbol {
            Some(symbol) => write!(
                f,
                "{}{} + {}",
                Number(self.coefficient),
                symbol,
                Number(self.constant)
            ),
            None => write!(f, "{}", Number(self.constant)),
        }
    }
}

/// Prints an `f64` the way a person would write it (`2` rather than `2.0`,
/// and never `-0`).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Number(pub f64);

impl Display for Number {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.0 == 0.0 {
            write!(f, "0")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
