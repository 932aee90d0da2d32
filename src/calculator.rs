//! The calculator's front door.
//!
//! [`calculate()`] takes one normalized utterance and always produces a line
//! of text to show the user, while [`evaluate()`] gives back a typed
//! [`Outcome`] or [`CalcError`].

use crate::{
    ops::{self, EvaluationError},
    parse::ParseError,
    rpn,
    solve::{Solution, SolveError},
    term::{LinearTerm, Number},
    Equation,
};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Everything up to and including this word is dropped from the input.
pub const COMMAND_WORD: &str = "calculate";

/// Prefix shown in front of every error message.
pub const ERROR_PREFIX: &str = "Error in calculation: ";

/// Evaluate an utterance and render the result (or error) as text.
pub fn calculate(input: &str) -> String {
    match evaluate(input) {
        Ok(outcome) => outcome.to_string(),
        Err(e) => {
            tracing::warn!(%input, error = %e, "Calculation failed");
            format!("{}{}", ERROR_PREFIX, e)
        },
    }
}

/// Evaluate an utterance.
///
/// Input containing `=` is solved as an equation, input containing a letter
/// is simplified symbolically, and anything else is plain arithmetic.
pub fn evaluate(input: &str) -> Result<Outcome, CalcError> {
    let expression: String =
        strip_command(input).split_whitespace().collect();
    let mode = Mode::detect(&expression);
    tracing::debug!(%input, %expression, ?mode, "Evaluating");

    let outcome = match mode {
        Mode::Equation => {
            let equation: Equation = expression.parse()?;
            Outcome::Solved(equation.solve()?)
        },
        Mode::Symbolic => {
            let term: LinearTerm = ops::evaluate(&rpn::parse(&expression)?)?;
            Outcome::Expression(term)
        },
        Mode::Arithmetic => {
            let value: f64 = ops::evaluate(&rpn::parse(&expression)?)?;
            Outcome::Number(value)
        },
    };

    tracing::debug!(%outcome, "Evaluated");
    Ok(outcome)
}

/// Matches [`COMMAND_WORD`] as a whole word, so "recalculate" is left alone.
static COMMAND: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(&format!(r"\b{}\b", COMMAND_WORD))
        .map_err(|e| tracing::error!(error = %e, "Bad command pattern"))
        .ok()
});

/// Drop everything up to and including the first [`COMMAND_WORD`].
pub fn strip_command(input: &str) -> &str {
    match Option::as_ref(&COMMAND).and_then(|command| command.find(input)) {
        Some(found) => input[found.end()..].trim(),
        None => input.trim(),
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Mode {
    Equation,
    Symbolic,
    Arithmetic,
}

impl Mode {
    fn detect(expression: &str) -> Self {
        if expression.contains('=') {
            Mode::Equation
        } else if expression.chars().any(|c| c.is_ascii_lowercase()) {
            Mode::Symbolic
        } else {
            Mode::Arithmetic
        }
    }
}

/// A successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Number(f64),
    Expression(LinearTerm),
    Solved(Solution),
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Number(value) => write!(f, "{}", Number(*value)),
            // the unknown cancelled out, so it's really just a number
            Outcome::Expression(term) if term.has_negligible_coefficient() => {
                write!(f, "{}", Number(term.constant))
            },
            Outcome::Expression(term) => write!(f, "Result: {}", term),
            Outcome::Solved(solution) => write!(f, "{}", solution),
        }
    }
}

/// Anything that can go wrong while calculating.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvaluationError),
    #[error(transparent)]
    Solve(#[from] SolveError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solve::Degeneracy;

    #[test]
    fn known_calculations() {
        let inputs = vec![
            ("2+3", "5"),
            ("2 + 3", "5"),
            ("2+3*4", "14"),
            ("(2+3)*4", "20"),
            ("10-3-2", "5"),
            ("7/2", "3.5"),
            ("-5+3", "-2"),
            ("x+3", "Result: 1x + 3"),
            ("2*x+5-x", "Result: 1x + 5"),
            ("x/5", "Result: 0.2x + 0"),
            ("x-4", "Result: 1x + -4"),
            ("y*3", "Result: 3y + 0"),
            ("x-x+2", "2"),
            ("0.0000005*x", "Result: 0.0000005x + 0"),
            ("0.1*x+0.2*x-0.3*x+1", "1"),
            ("x+3=5", "x = 2"),
            ("2*x=10", "x = 5"),
            ("10=2*x", "x = 5"),
            ("x + 3 = 5", "x = 2"),
        ];

        for (src, should_be) in inputs {
            let got = calculate(src);

            assert_eq!(got, should_be, "{}", src);
        }
    }

    #[test]
    fn command_word_is_stripped() {
        let inputs = vec![
            ("calculate 2+3", "5"),
            ("please calculate 2 + 3", "5"),
            ("calculate x+3=5", "x = 2"),
            ("  calculate   4*2  ", "8"),
        ];

        for (src, should_be) in inputs {
            let got = calculate(src);

            assert_eq!(got, should_be, "{}", src);
        }
    }

    #[test]
    fn only_the_first_command_word_is_stripped() {
        assert_eq!(strip_command("calculate 1 calculate 2"), "1 calculate 2");
        assert_eq!(strip_command(" 1+1 "), "1+1");
    }

    #[test]
    fn command_word_must_be_a_whole_word() {
        assert_eq!(strip_command("recalculate 2+3"), "recalculate 2+3");
        assert_eq!(strip_command("calculated 1 calculate 2"), "2");
        assert_eq!(
            calculate("recalculate 2+3"),
            "Error in calculation: \"recalculate\" at position 0 is not a \
             variable, only single letters are supported"
        );
    }

    #[test]
    fn errors_are_rendered_with_a_prefix() {
        let inputs = vec![
            (
                "5/x",
                "Error in calculation: cannot divide by an expression \
                 containing a variable",
            ),
            ("1/0", "Error in calculation: division by zero"),
            (
                "x=x",
                "Error in calculation: the equation has no unique solution, \
                 it is always true",
            ),
            (
                "2^3",
                "Error in calculation: invalid character '^' at position 1",
            ),
            ("(1+2", "Error in calculation: unbalanced '(' at position 0"),
            (
                "x)*(2=4",
                "Error in calculation: unbalanced ')' at position 1",
            ),
            ("x+(1=2)", "Error in calculation: unbalanced '(' at position 2"),
        ];

        for (src, should_be) in inputs {
            let got = calculate(src);

            assert_eq!(got, should_be, "{}", src);
        }
    }

    #[test]
    fn errors_keep_their_kind() {
        assert_eq!(
            evaluate("5/x"),
            Err(CalcError::Eval(EvaluationError::NonLinearDivision))
        );
        assert_eq!(
            evaluate("x=x"),
            Err(CalcError::Solve(SolveError::Degenerate(
                Degeneracy::InfinitelyMany
            )))
        );
        assert_eq!(
            evaluate("2=2"),
            Err(CalcError::Solve(SolveError::NoUnknown))
        );
        assert!(matches!(
            evaluate("x*y"),
            Err(CalcError::Eval(EvaluationError::MultipleVariables { .. }))
        ));
        assert!(matches!(
            evaluate("xy+1"),
            Err(CalcError::Parse(ParseError::MultiLetterIdentifier { .. }))
        ));
        assert!(matches!(evaluate(""), Err(CalcError::Eval(_))));
    }

    #[test]
    fn x_over_five_has_a_fifth_as_its_coefficient() {
        match evaluate("x/5").unwrap() {
            Outcome::Expression(term) => {
                approx::assert_relative_eq!(term.coefficient, 0.2);
                approx::assert_relative_eq!(term.constant, 0.0);
            },
            other => panic!("Expected an expression, found {:?}", other),
        }
    }

    #[test]
    fn arithmetic_agrees_with_the_symbolic_evaluator() {
        let inputs = vec!["2+3*4", "(1.5+2.5)/4-7", "-(3-10)*2", "9/3/3"];

        for src in inputs {
            let fast: f64 = ops::evaluate(&rpn::parse(src).unwrap()).unwrap();
            let term: LinearTerm =
                ops::evaluate(&rpn::parse(src).unwrap()).unwrap();

            assert_eq!(fast, term.constant, "{}", src);
            assert_eq!(evaluate(src), Ok(Outcome::Number(fast)));
        }
    }

    #[test]
    fn the_calculator_is_stateless() {
        let first = calculate("x+3=5");
        let _ = calculate("5/x");
        let _ = calculate("y=1");
        let second = calculate("x+3=5");

        assert_eq!(first, second);
    }
}
