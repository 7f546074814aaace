//! Equipment - item templates and the items a character has equipped
//!
//! A template is the item definition shared across characters (a "Chainmail
//! Armor"); an equipped item is one character's copy of it occupying a named
//! location such as "armor" or "primary_weapon".

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::{CharacterId, EquipmentId, EquipmentTemplateId, GameSystemId};

/// Item definition with system-specific metadata (damage thresholds, scores, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentTemplate {
    pub id: EquipmentTemplateId,
    pub system_id: GameSystemId,
    pub name: String,
    pub description: String,
    pub metadata: Value,
}

impl EquipmentTemplate {
    pub fn new(system_id: GameSystemId, name: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Equipment name cannot be empty"));
        }
        Ok(Self {
            id: EquipmentTemplateId::new(),
            system_id,
            name,
            description: String::new(),
            metadata: Value::Object(Map::new()),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}

/// A template equipped by one character at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub id: EquipmentId,
    pub character_id: CharacterId,
    pub template: EquipmentTemplate,
    /// Named slot, matched exactly by `equipment_meta(location, path)`
    pub location: String,
    pub quantity: u32,
    /// Per-instance data (JSON); formulas read the template's metadata instead
    pub metadata: Value,
}

impl EquippedItem {
    pub fn new(
        character_id: CharacterId,
        template: EquipmentTemplate,
        location: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(DomainError::validation("Equipment location cannot be empty"));
        }
        Ok(Self {
            id: EquipmentId::new(),
            character_id,
            template,
            location,
            quantity: 1,
            metadata: Value::Object(Map::new()),
        })
    }

    pub fn with_quantity(mut self, quantity: u32) -> Result<Self, DomainError> {
        if quantity == 0 {
            return Err(DomainError::validation("Equipment quantity must be at least 1"));
        }
        self.quantity = quantity;
        Ok(self)
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }
}
