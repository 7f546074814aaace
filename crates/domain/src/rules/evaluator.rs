//! Formula evaluation.

use super::{Formula, RuleError, ValueResolver};
use crate::value_objects::CharacterContext;

/// Evaluates formulas for one character.
///
/// Owns the pass-scoped [`ValueResolver`] (and its lookup cache); create one
/// evaluator per recompute pass and drop it afterwards.
#[derive(Debug)]
pub struct RuleEvaluator<'a> {
    resolver: ValueResolver<'a>,
}

impl<'a> RuleEvaluator<'a> {
    pub fn new(context: &'a CharacterContext) -> Self {
        Self {
            resolver: ValueResolver::new(context),
        }
    }

    /// Parse and evaluate a formula string.
    ///
    /// Example: `"trait_meta('Class', 'base_hp') + stat('level')"`
    pub fn evaluate(&mut self, source: &str) -> Result<i64, RuleError> {
        let formula = Formula::parse(source)?;
        Ok(self.evaluate_formula(&formula))
    }

    /// Evaluate an already-parsed formula. Lookups cannot fail.
    pub fn evaluate_formula(&mut self, formula: &Formula) -> i64 {
        let left = self.resolver.resolve(formula.left());
        let right = self.resolver.resolve(formula.right());
        formula.operator().apply(left, right)
    }

    pub fn lookups(&self) -> usize {
        self.resolver.lookups()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CharacterTrait;
    use crate::value_objects::CharacterStats;
    use crate::{CharacterId, GameSystemId};
    use serde_json::json;

    fn stats_context(pairs: &[(&str, i64)]) -> CharacterContext {
        let stats = pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        CharacterContext::from_stats(CharacterId::new(), stats)
    }

    #[test]
    fn literal_arithmetic_is_exact() {
        let context = stats_context(&[]);
        let mut evaluator = RuleEvaluator::new(&context);

        for (a, b) in [(0, 0), (3, 4), (-5, 2), (12, -12), (-7, -9), (1_000_000, 1)] {
            assert_eq!(evaluator.evaluate(&format!("{a} + {b}")), Ok(a + b));
            assert_eq!(evaluator.evaluate(&format!("{a} - {b}")), Ok(a - b));
        }
    }

    #[test]
    fn class_hp_plus_level() {
        let class = CharacterTrait::new(GameSystemId::new(), "Class", "Warrior")
            .unwrap()
            .with_metadata(json!({"base_hp": 6}));
        let context = stats_context(&[("level", 2)]).with_trait(class);
        let mut evaluator = RuleEvaluator::new(&context);

        assert_eq!(
            evaluator.evaluate("trait_meta('Class', 'base_hp') + stat('level')"),
            Ok(8)
        );
    }

    #[test]
    fn lookup_misses_degrade_to_zero() {
        let context = stats_context(&[]);
        let mut evaluator = RuleEvaluator::new(&context);

        assert_eq!(
            evaluator.evaluate("trait_meta(Class, base_hp) + equipment_meta(armor, thresholds.major)"),
            Ok(0)
        );
        assert_eq!(evaluator.evaluate("stat(level) - 1"), Ok(-1));
    }

    #[test]
    fn errors_propagate_unchanged() {
        let context = stats_context(&[("level", 1)]);
        let mut evaluator = RuleEvaluator::new(&context);

        assert!(matches!(
            evaluator.evaluate("x y z w"),
            Err(RuleError::UnsupportedFormula(_))
        ));
        assert!(matches!(
            evaluator.evaluate("stat(level) / 2"),
            Err(RuleError::UnsupportedOperator(_))
        ));
        assert!(matches!(
            evaluator.evaluate("level + 2"),
            Err(RuleError::MalformedOperand(_))
        ));
        assert!(matches!(
            evaluator.evaluate("proficiency(level) + 2"),
            Err(RuleError::UnknownFunction(_))
        ));
    }
}
