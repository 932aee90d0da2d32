//! A calculator for spoken arithmetic and single-variable linear equations.
//!
//! Text flows through a fixed pipeline: [`parse::tokenize()`] splits it into
//! tokens, [`rpn::to_postfix()`] reorders them using the shunting-yard
//! algorithm, and [`ops::evaluate()`] folds the postfix expression into a
//! [`LinearTerm`] (or a plain `f64`). Equations are rearranged to
//! `(unknown side) - (other side)` and solved by [`solve::solve()`].
//!
//! ```rust
//! assert_eq!(spoken_calc::calculate("2 + 3 * 4"), "14");
//! assert_eq!(spoken_calc::calculate("calculate x + 3 = 5"), "x = 2");
//! ```

#[cfg(test)]
#[macro_use]
extern crate pretty_assertions;

pub mod calculator;
mod equations;
pub mod ops;
pub mod parse;
pub mod rpn;
pub mod solve;
pub mod spoken;
mod term;

pub use calculator::{calculate, evaluate, CalcError, Outcome};
pub use equations::Equation;
pub use ops::EvaluationError;
pub use parse::ParseError;
pub use solve::{Solution, SolveError};
pub use term::{LinearTerm, Number, Symbol};
