//! CharacterContext - the read-only subject of one rule evaluation pass.
//!
//! Bundles a character's stats with its assigned traits and equipped items,
//! already loaded from the record store. Nothing in here performs I/O.

use crate::entities::{CharacterSheet, CharacterTrait, EquippedItem};
use crate::value_objects::CharacterStats;
use crate::CharacterId;

#[derive(Debug, Clone, PartialEq)]
pub struct CharacterContext {
    character_id: CharacterId,
    stats: CharacterStats,
    traits: Vec<CharacterTrait>,
    equipment: Vec<EquippedItem>,
}

impl CharacterContext {
    pub fn new(
        sheet: &CharacterSheet,
        traits: Vec<CharacterTrait>,
        equipment: Vec<EquippedItem>,
    ) -> Self {
        Self {
            character_id: sheet.id,
            stats: sheet.stats.clone(),
            traits,
            equipment,
        }
    }

    /// Context with stats only (no traits or equipment).
    pub fn from_stats(character_id: CharacterId, stats: CharacterStats) -> Self {
        Self {
            character_id,
            stats,
            traits: Vec::new(),
            equipment: Vec::new(),
        }
    }

    /// Same traits and equipment, different stats.
    pub fn with_stats(mut self, stats: CharacterStats) -> Self {
        self.stats = stats;
        self
    }

    pub fn with_trait(mut self, character_trait: CharacterTrait) -> Self {
        self.traits.push(character_trait);
        self
    }

    pub fn with_equipment(mut self, item: EquippedItem) -> Self {
        self.equipment.push(item);
        self
    }

    pub fn character_id(&self) -> CharacterId {
        self.character_id
    }

    pub fn stats(&self) -> &CharacterStats {
        &self.stats
    }

    pub fn traits(&self) -> &[CharacterTrait] {
        &self.traits
    }

    pub fn equipment(&self) -> &[EquippedItem] {
        &self.equipment
    }

    /// The assigned trait in `category` (case-insensitive).
    ///
    /// When several traits share a category, the one with the lowest id wins.
    pub fn trait_in_category(&self, category: &str) -> Option<&CharacterTrait> {
        self.traits
            .iter()
            .filter(|t| t.in_category(category))
            .min_by_key(|t| t.id)
    }

    /// The equipped item at `location` (exact match).
    ///
    /// When several items occupy the location, the one with the lowest id wins.
    pub fn equipment_at(&self, location: &str) -> Option<&EquippedItem> {
        self.equipment
            .iter()
            .filter(|item| item.location == location)
            .min_by_key(|item| item.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::EquipmentTemplate;
    use crate::{EquipmentId, GameSystemId, TraitId};
    use uuid::Uuid;

    #[test]
    fn trait_lookup_breaks_ties_by_lowest_id() {
        let system_id = GameSystemId::new();
        let mut first = CharacterTrait::new(system_id, "Class", "Bard").unwrap();
        first.id = TraitId::from_uuid(Uuid::from_u128(9));
        let mut second = CharacterTrait::new(system_id, "class", "Seraph").unwrap();
        second.id = TraitId::from_uuid(Uuid::from_u128(3));

        let context = CharacterContext::from_stats(CharacterId::new(), CharacterStats::new())
            .with_trait(first)
            .with_trait(second);

        assert_eq!(context.trait_in_category("CLASS").unwrap().name, "Seraph");
        assert!(context.trait_in_category("Ancestry").is_none());
    }

    #[test]
    fn equipment_lookup_is_exact_and_breaks_ties_by_lowest_id() {
        let system_id = GameSystemId::new();
        let character_id = CharacterId::new();
        let leather = EquipmentTemplate::new(system_id, "Leather Armor").unwrap();
        let plate = EquipmentTemplate::new(system_id, "Full Plate").unwrap();

        let mut a = EquippedItem::new(character_id, leather, "armor").unwrap();
        a.id = EquipmentId::from_uuid(Uuid::from_u128(20));
        let mut b = EquippedItem::new(character_id, plate, "armor").unwrap();
        b.id = EquipmentId::from_uuid(Uuid::from_u128(10));

        let context = CharacterContext::from_stats(character_id, CharacterStats::new())
            .with_equipment(a)
            .with_equipment(b);

        assert_eq!(context.equipment_at("armor").unwrap().template.name, "Full Plate");
        assert!(context.equipment_at("Armor").is_none());
    }
}
