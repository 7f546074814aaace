//! One recompute pass over a character's computed stats.

use serde::{Deserialize, Serialize};

use super::{Formula, RuleError, RuleEvaluator};
use crate::value_objects::{CharacterContext, CharacterStats, ComputedStatsSchema};

/// A formula that could not be evaluated during a pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormulaFailure {
    pub stat: String,
    pub formula: String,
    pub error: String,
}

impl FormulaFailure {
    fn new(stat: &str, formula: &str, error: &RuleError) -> Self {
        Self {
            stat: stat.to_string(),
            formula: formula.to_string(),
            error: error.to_string(),
        }
    }
}

/// Result of [`recompute_stats`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecomputeOutcome {
    /// Working copy: the input stats with every successful result merged in.
    pub stats: CharacterStats,
    /// Stats written this pass, in schema order.
    pub computed: Vec<String>,
    pub failures: Vec<FormulaFailure>,
}

impl RecomputeOutcome {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Evaluate every formula in `schema` against `context`.
///
/// Formulas read the stats as they were when the pass started, so the result
/// does not depend on schema order and a second pass over unchanged inputs
/// yields the same mapping. A failing formula is recorded and skipped; entries
/// without a formula are ignored.
pub fn recompute_stats(context: &CharacterContext, schema: &ComputedStatsSchema) -> RecomputeOutcome {
    let mut stats = context.stats().clone();
    let mut computed = Vec::new();
    let mut failures = Vec::new();

    let mut evaluator = RuleEvaluator::new(context);
    for rule in schema.iter() {
        let Some(source) = rule.formula() else {
            continue;
        };
        match evaluator.evaluate(source) {
            Ok(value) => {
                stats.set(rule.stat(), value);
                computed.push(rule.stat().to_string());
            }
            Err(error) => failures.push(FormulaFailure::new(rule.stat(), source, &error)),
        }
    }

    RecomputeOutcome {
        stats,
        computed,
        failures,
    }
}

/// Parse-only validation of a computed-stats schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaReport {
    pub valid: Vec<String>,
    /// Entries declared without a formula.
    pub skipped: Vec<String>,
    pub invalid: Vec<FormulaFailure>,
}

impl SchemaReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Check that every formula in `schema` parses, without evaluating any.
pub fn check_schema(schema: &ComputedStatsSchema) -> SchemaReport {
    let mut report = SchemaReport::default();
    for rule in schema.iter() {
        match rule.formula() {
            None => report.skipped.push(rule.stat().to_string()),
            Some(source) => match Formula::parse(source) {
                Ok(_) => report.valid.push(rule.stat().to_string()),
                Err(error) => report
                    .invalid
                    .push(FormulaFailure::new(rule.stat(), source, &error)),
            },
        }
    }
    report
}
