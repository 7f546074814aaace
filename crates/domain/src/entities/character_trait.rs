//! CharacterTrait entity - class, ancestry, community, subclass and so on
//!
//! Traits are structural building blocks shared by every character of a game
//! system. Each carries a category label and system-specific metadata that
//! formulas can read through `trait_meta(category, path)`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::{GameSystemId, TraitId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterTrait {
    pub id: TraitId,
    pub system_id: GameSystemId,
    /// Category label, e.g. "Class" or "Ancestry"
    pub category: String,
    pub name: String,
    pub description: String,
    /// Parent trait for nested traits (a subclass points at its class)
    pub parent_id: Option<TraitId>,
    /// System-specific data (JSON), e.g. `{"base_hp": 6, "thresholds": {"major": 7}}`
    pub metadata: Value,
}

impl CharacterTrait {
    pub fn new(
        system_id: GameSystemId,
        category: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let category = category.into();
        let name = name.into();
        if category.trim().is_empty() {
            return Err(DomainError::validation("Trait category cannot be empty"));
        }
        if name.trim().is_empty() {
            return Err(DomainError::validation("Trait name cannot be empty"));
        }
        Ok(Self {
            id: TraitId::new(),
            system_id,
            category,
            name,
            description: String::new(),
            parent_id: None,
            metadata: Value::Object(Map::new()),
        })
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_parent(mut self, parent_id: TraitId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Case-insensitive category match.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}
