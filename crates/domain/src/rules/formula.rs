//! Three-token formula grammar: `<left> <op> <right>`.
//!
//! The formula is trimmed and split on single spaces that sit outside
//! parentheses, so `trait_meta('Class', 'base_hp') + stat('level')` is three
//! tokens. Exactly three tokens are accepted; there is no precedence,
//! chaining or grouping.

use std::fmt;
use std::str::FromStr;

use super::{Operand, RuleError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
}

impl Operator {
    pub fn parse(token: &str) -> Result<Self, RuleError> {
        match token {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            other => Err(RuleError::UnsupportedOperator(other.to_string())),
        }
    }

    /// Saturates at the `i64` bounds instead of overflowing.
    pub fn apply(self, left: i64, right: i64) -> i64 {
        match self {
            Self::Add => left.saturating_add(right),
            Self::Subtract => left.saturating_sub(right),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A parsed formula. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formula {
    source: String,
    left: Operand,
    operator: Operator,
    right: Operand,
}

impl Formula {
    /// Parse a formula string.
    ///
    /// Errors are reported in evaluation order: token count first, then the
    /// left operand, the right operand, and finally the operator.
    pub fn parse(source: &str) -> Result<Self, RuleError> {
        let tokens = tokenize(source);
        let [left, operator, right] = tokens.as_slice() else {
            return Err(RuleError::UnsupportedFormula(source.to_string()));
        };

        let left = Operand::parse(left)?;
        let right = Operand::parse(right)?;
        let operator = Operator::parse(operator)?;

        Ok(Self {
            source: source.to_string(),
            left,
            operator,
            right,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn left(&self) -> &Operand {
        &self.left
    }

    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }
}

impl FromStr for Formula {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// Split on single spaces at parenthesis depth zero.
///
/// Consecutive spaces produce empty tokens, which then fail the token count.
fn tokenize(source: &str) -> Vec<&str> {
    let source = source.trim();
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in source.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ' ' if depth == 0 => {
                tokens.push(&source[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    tokens.push(&source[start..]);
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::FunctionCall;

    #[test]
    fn tokenizes_calls_with_spaces_inside_arguments() {
        assert_eq!(
            tokenize("trait_meta('Class', 'base_hp') + stat('level')"),
            vec!["trait_meta('Class', 'base_hp')", "+", "stat('level')"]
        );
        assert_eq!(tokenize("  1 - 2 "), vec!["1", "-", "2"]);
        assert_eq!(tokenize("1  + 2"), vec!["1", "", "+", "2"]);
    }

    #[test]
    fn parses_binary_formula() {
        let formula = Formula::parse("stat(level) + 5").unwrap();

        assert_eq!(
            formula.left(),
            &Operand::Call(FunctionCall::Stat {
                name: "level".to_string()
            })
        );
        assert_eq!(formula.operator(), Operator::Add);
        assert_eq!(formula.right(), &Operand::Literal(5));
        assert_eq!(formula.source(), "stat(level) + 5");
        assert_eq!(formula.to_string(), "stat('level') + 5");
    }

    #[test]
    fn requires_exactly_three_tokens() {
        for source in ["x y z w", "5", "1 +", "1 + 2 + 3", "1  + 2", "", "stat(level + 1"] {
            assert!(
                matches!(Formula::parse(source), Err(RuleError::UnsupportedFormula(_))),
                "expected unsupported formula for {source:?}"
            );
        }
    }

    #[test]
    fn rejects_operators_other_than_plus_and_minus() {
        assert_eq!(
            Formula::parse("2 * 3"),
            Err(RuleError::UnsupportedOperator("*".to_string()))
        );
    }

    #[test]
    fn operand_errors_win_over_operator_errors() {
        assert_eq!(
            Formula::parse("dice(2) * 3"),
            Err(RuleError::UnknownFunction("dice".to_string()))
        );
        assert!(matches!(
            Formula::parse("1 * level"),
            Err(RuleError::MalformedOperand(_))
        ));
    }

    #[test]
    fn operator_application_saturates() {
        assert_eq!(Operator::Add.apply(2, 3), 5);
        assert_eq!(Operator::Subtract.apply(2, 3), -1);
        assert_eq!(Operator::Add.apply(i64::MAX, 1), i64::MAX);
        assert_eq!(Operator::Subtract.apply(i64::MIN, 1), i64::MIN);
    }
}
