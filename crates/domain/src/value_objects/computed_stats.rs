//! Computed-stats schema read from a game system's metadata.
//!
//! The schema lives at `character_sheet_schema.computed_stats` inside the
//! game system metadata:
//!
//! ```json
//! { "character_sheet_schema": { "computed_stats": {
//!     "hp": { "formula": "trait_meta('Class', 'base_hp') + stat('level')" }
//! } } }
//! ```
//!
//! A missing level anywhere in that path means "no computed stats", never an
//! error. Entries keep the order they have in the document.

use serde_json::{Map, Value};

pub const SHEET_SCHEMA_KEY: &str = "character_sheet_schema";
pub const COMPUTED_STATS_KEY: &str = "computed_stats";
pub const FORMULA_KEY: &str = "formula";

/// One declared derived stat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedStatRule {
    stat: String,
    formula: Option<String>,
}

impl ComputedStatRule {
    pub fn new(stat: impl Into<String>, formula: impl Into<String>) -> Self {
        Self {
            stat: stat.into(),
            formula: Some(formula.into()),
        }
    }

    /// A declared stat with no formula; the recompute pass skips it.
    pub fn without_formula(stat: impl Into<String>) -> Self {
        Self {
            stat: stat.into(),
            formula: None,
        }
    }

    pub fn stat(&self) -> &str {
        &self.stat
    }

    /// The formula, if one is defined. Empty strings count as undefined.
    pub fn formula(&self) -> Option<&str> {
        self.formula.as_deref().filter(|f| !f.is_empty())
    }
}

/// Ordered mapping of derived-stat name to formula for one game system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComputedStatsSchema {
    rules: Vec<ComputedStatRule>,
}

impl ComputedStatsSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the schema out of a game system metadata blob.
    pub fn from_system_metadata(metadata: &Value) -> Self {
        metadata
            .get(SHEET_SCHEMA_KEY)
            .and_then(|schema| schema.get(COMPUTED_STATS_KEY))
            .and_then(Value::as_object)
            .map(Self::from_table)
            .unwrap_or_default()
    }

    fn from_table(table: &Map<String, Value>) -> Self {
        let rules = table
            .iter()
            .map(|(stat, rule)| {
                // Non-object rules and non-string formulas are treated as undefined
                match rule.get(FORMULA_KEY).and_then(Value::as_str) {
                    Some(formula) => ComputedStatRule::new(stat.clone(), formula),
                    None => ComputedStatRule::without_formula(stat.clone()),
                }
            })
            .collect();
        Self { rules }
    }

    /// Builder: append a rule, replacing an existing rule for the same stat in place.
    pub fn with_rule(mut self, stat: impl Into<String>, formula: impl Into<String>) -> Self {
        let rule = ComputedStatRule::new(stat, formula);
        match self.rules.iter_mut().find(|r| r.stat == rule.stat) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// The `computed_stats` table as JSON, in declaration order.
    pub fn to_json(&self) -> Value {
        let table: Map<String, Value> = self
            .rules
            .iter()
            .map(|rule| {
                let mut entry = Map::new();
                if let Some(formula) = &rule.formula {
                    entry.insert(FORMULA_KEY.to_string(), Value::String(formula.clone()));
                }
                (rule.stat.clone(), Value::Object(entry))
            })
            .collect();
        Value::Object(table)
    }

    pub fn rules(&self) -> &[ComputedStatRule] {
        &self.rules
    }

    pub fn iter(&self) -> impl Iterator<Item = &ComputedStatRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
