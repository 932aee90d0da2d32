use crate::{
    parse,
    solve::{self, Solution, SolveError},
};
use std::str::FromStr;

/// Two expressions that should be equal.
#[derive(Debug, Clone, PartialEq)]
pub struct Equation {
    pub left: String,
    pub right: String,
}

impl Equation {
    pub fn new<L, R>(left: L, right: R) -> Self
    where
        L: AsRef<str>,
        R: AsRef<str>,
    {
        Equation {
            left: left.as_ref().trim().to_string(),
            right: right.as_ref().trim().to_string(),
        }
    }

    /// Split the equation into the side containing the unknown and the other
    /// side. The left side wins when both contain a letter.
    pub fn sides(&self) -> Option<(&str, &str)> {
        if contains_letter(&self.left) {
            Some((&self.left, &self.right))
        } else if contains_letter(&self.right) {
            Some((&self.right, &self.left))
        } else {
            None
        }
    }

    /// Move everything onto the side with the unknown, giving a single
    /// expression which is zero when the equation holds.
    ///
    /// Each side has its brackets checked on its own, otherwise the wrapping
    /// parentheses could close a stray bracket from one side.
    pub fn rearranged(&self) -> Result<String, SolveError> {
        let (unknown, other) = self.sides().ok_or(SolveError::NoUnknown)?;

        for side in &[unknown, other] {
            parse::check_brackets(&parse::tokenize(side)?)?;
        }

        Ok(format!("({}) - ({})", unknown, other))
    }

    pub fn solve(&self) -> Result<Solution, SolveError> { solve::solve(self) }
}

fn contains_letter(s: &str) -> bool { s.chars().any(|c| c.is_ascii_lowercase()) }

impl FromStr for Equation {
    type Err = SolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.find('=') {
            Some(index) => {
                let (left, right) = s.split_at(index);
                let right = &right[1..];
                Ok(Equation::new(left, right))
            },
            None => Err(SolveError::NotAnEquation),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::ParseError;

    #[test]
    fn split_on_the_first_equals() {
        let got: Equation = " x + 3 = 5 ".parse().unwrap();

        assert_eq!(got, Equation::new("x + 3", "5"));
    }

    #[test]
    fn only_the_first_equals_is_used() {
        let got: Equation = "x=1=2".parse().unwrap();

        assert_eq!(got.left, "x");
        assert_eq!(got.right, "1=2");
    }

    #[test]
    fn text_without_equals_is_not_an_equation() {
        let got = "x+1".parse::<Equation>();

        assert_eq!(got, Err(SolveError::NotAnEquation));
    }

    #[test]
    fn pick_the_side_with_the_unknown() {
        let inputs = vec![
            ("x+3=5", "(x+3) - (5)"),
            ("5=x+3", "(x+3) - (5)"),
            ("2*x=x+1", "(2*x) - (x+1)"),
        ];

        for (src, should_be) in inputs {
            let equation: Equation = src.parse().unwrap();

            let got = equation.rearranged().unwrap();

            assert_eq!(got, should_be);
        }
    }

    #[test]
    fn brackets_must_balance_on_each_side() {
        let inputs = vec![
            ("x)*(2=4", ')', 1),
            ("x+(1=2)", '(', 2),
            ("(x=(2)", '(', 0),
        ];

        for (src, character, index) in inputs {
            let equation: Equation = src.parse().unwrap();

            let got = equation.rearranged();

            assert_eq!(
                got,
                Err(SolveError::Parse(ParseError::UnbalancedParenthesis {
                    character,
                    index
                })),
                "{}",
                src
            );
        }
    }

    #[test]
    fn equations_need_an_unknown() {
        let equation: Equation = "2=2".parse().unwrap();

        assert_eq!(equation.sides(), None);
        assert_eq!(equation.rearranged(), Err(SolveError::NoUnknown));
    }
}
