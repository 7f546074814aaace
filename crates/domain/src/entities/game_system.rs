//! GameSystem entity - a rule set such as Daggerheart or D&D 5e
//!
//! The system's `metadata` blob is the schema source for derived stats.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DomainError;
use crate::value_objects::{
    ComputedStatsSchema, COMPUTED_STATS_KEY, SHEET_SCHEMA_KEY,
};
use crate::GameSystemId;

/// A tabletop rule set that characters, traits and equipment belong to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSystem {
    pub id: GameSystemId,
    pub name: String,
    /// Rules version, e.g. "1.0"
    pub version: String,
    /// Short URL-safe name, unique per store
    pub slug: String,
    /// System-specific configuration (JSON)
    pub metadata: Value,
}

impl GameSystem {
    pub fn new(name: impl Into<String>, slug: impl Into<String>) -> Result<Self, DomainError> {
        let name = name.into();
        let slug = slug.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Game system name cannot be empty"));
        }
        if slug.trim().is_empty() {
            return Err(DomainError::validation("Game system slug cannot be empty"));
        }
        Ok(Self {
            id: GameSystemId::new(),
            name,
            version: String::new(),
            slug,
            metadata: Value::Object(Map::new()),
        })
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the `character_sheet_schema.computed_stats` table, keeping
    /// every other metadata key.
    pub fn with_computed_stats(mut self, schema: &ComputedStatsSchema) -> Self {
        if !self.metadata.is_object() {
            self.metadata = Value::Object(Map::new());
        }
        if let Value::Object(root) = &mut self.metadata {
            let sheet = root
                .entry(SHEET_SCHEMA_KEY)
                .or_insert_with(|| Value::Object(Map::new()));
            if !sheet.is_object() {
                *sheet = Value::Object(Map::new());
            }
            if let Value::Object(sheet) = sheet {
                sheet.insert(COMPUTED_STATS_KEY.to_string(), schema.to_json());
            }
        }
        self
    }

    /// Derived stats declared by this system. Read fresh on every call.
    pub fn computed_stats(&self) -> ComputedStatsSchema {
        ComputedStatsSchema::from_system_metadata(&self.metadata)
    }
}
