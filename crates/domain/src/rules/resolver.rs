//! Operand value resolution against one character.

use serde_json::Value;

use super::{FunctionCall, LookupCache, Operand, RuleError};
use crate::value_objects::{coerce_integer, CharacterContext};

/// Resolves operands to integers for one character during one pass.
///
/// Every lookup miss (absent stat, no trait in the category, nothing equipped
/// at the location, missing metadata key, non-integer value) resolves to `0`.
#[derive(Debug)]
pub struct ValueResolver<'a> {
    cache: LookupCache<'a>,
}

impl<'a> ValueResolver<'a> {
    pub fn new(context: &'a CharacterContext) -> Self {
        Self {
            cache: LookupCache::new(context),
        }
    }

    /// Parse and resolve a single operand token.
    pub fn resolve_token(&mut self, token: &str) -> Result<i64, RuleError> {
        let operand = Operand::parse(token)?;
        Ok(self.resolve(&operand))
    }

    /// Resolve an already-parsed operand. Never fails.
    pub fn resolve(&mut self, operand: &Operand) -> i64 {
        match operand {
            Operand::Literal(value) => *value,
            Operand::Call(FunctionCall::Stat { name }) => self.stat(name),
            Operand::Call(FunctionCall::TraitMeta { category, path }) => {
                self.trait_meta(category, path)
            }
            Operand::Call(FunctionCall::EquipmentMeta { location, path }) => {
                self.equipment_meta(location, path)
            }
        }
    }

    pub fn stat(&mut self, name: &str) -> i64 {
        self.cache.context().stats().integer(name)
    }

    pub fn trait_meta(&mut self, category: &str, path: &str) -> i64 {
        self.cache
            .trait_in_category(category)
            .and_then(|t| walk_path(&t.metadata, path))
            .unwrap_or(0)
    }

    pub fn equipment_meta(&mut self, location: &str, path: &str) -> i64 {
        self.cache
            .equipment_at(location)
            .and_then(|item| walk_path(&item.template.metadata, path))
            .unwrap_or(0)
    }

    /// Underlying trait/equipment lookups performed (cache misses).
    pub fn lookups(&self) -> usize {
        self.cache.lookups()
    }
}

/// Follow a dot-separated key path through nested JSON objects.
fn walk_path(metadata: &Value, path: &str) -> Option<i64> {
    path.split('.')
        .try_fold(metadata, |value, key| value.as_object()?.get(key))
        .and_then(coerce_integer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CharacterTrait, EquipmentTemplate, EquippedItem};
    use crate::value_objects::CharacterStats;
    use crate::{CharacterId, GameSystemId};
    use serde_json::json;

    fn context() -> CharacterContext {
        let system_id = GameSystemId::new();
        let character_id = CharacterId::new();
        let stats: CharacterStats = [("level".to_string(), 3)].into_iter().collect();

        let class = CharacterTrait::new(system_id, "Class", "Guardian")
            .unwrap()
            .with_metadata(json!({
                "base_hp": 6,
                "base_thresholds": {"major": "7", "severe": 14},
                "domains": ["blade", "valor"]
            }));
        let armor = EquipmentTemplate::new(system_id, "Chainmail Armor")
            .unwrap()
            .with_metadata(json!({"base_score": 4, "thresholds": {"major": 7, "severe": 15}}));
        let item = EquippedItem::new(character_id, armor, "armor").unwrap();

        CharacterContext::from_stats(character_id, stats)
            .with_trait(class)
            .with_equipment(item)
    }

    #[test]
    fn stat_reads_value_or_zero() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        assert_eq!(resolver.resolve_token("stat(level)"), Ok(3));
        assert_eq!(resolver.resolve_token("stat('agility')"), Ok(0));
    }

    #[test]
    fn trait_meta_walks_nested_paths() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        assert_eq!(resolver.trait_meta("class", "base_hp"), 6);
        assert_eq!(resolver.trait_meta("CLASS", "base_thresholds.major"), 7);
        assert_eq!(resolver.trait_meta("Class", "base_thresholds.severe"), 14);
    }

    #[test]
    fn trait_meta_misses_resolve_to_zero() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        assert_eq!(resolver.trait_meta("Ancestry", "base_hp"), 0);
        assert_eq!(resolver.trait_meta("Class", "missing"), 0);
        assert_eq!(resolver.trait_meta("Class", "base_hp.deeper"), 0);
        assert_eq!(resolver.trait_meta("Class", "base_thresholds"), 0);
        assert_eq!(resolver.trait_meta("Class", "domains.0"), 0);
        assert_eq!(resolver.trait_meta("Class", ""), 0);
    }

    #[test]
    fn equipment_meta_reads_template_metadata() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        assert_eq!(resolver.equipment_meta("armor", "thresholds.major"), 7);
        assert_eq!(resolver.equipment_meta("armor", "base_score"), 4);
        assert_eq!(resolver.equipment_meta("primary_weapon", "damage"), 0);
    }

    #[test]
    fn malformed_tokens_are_errors() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        assert!(matches!(
            resolver.resolve_token("level"),
            Err(RuleError::MalformedOperand(_))
        ));
        assert!(matches!(
            resolver.resolve_token("max(1,2)"),
            Err(RuleError::UnknownFunction(_))
        ));
    }

    #[test]
    fn lookups_are_memoized_within_the_resolver() {
        let context = context();
        let mut resolver = ValueResolver::new(&context);

        resolver.trait_meta("Class", "base_hp");
        resolver.trait_meta("class", "base_thresholds.major");
        resolver.equipment_meta("armor", "base_score");
        resolver.equipment_meta("armor", "thresholds.severe");

        assert_eq!(resolver.lookups(), 2);
    }
}
