//! CharacterSheet entity - a player's character within one game system

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::CharacterStats;
use crate::{CharacterId, GameSystemId};

/// A character record.
///
/// Traits and equipment are related records loaded separately; the sheet
/// itself owns only the stats mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub system_id: GameSystemId,
    pub name: String,
    pub stats: CharacterStats,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CharacterSheet {
    pub fn new(
        system_id: GameSystemId,
        name: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }
        Ok(Self {
            id: CharacterId::new(),
            system_id,
            name,
            stats: CharacterStats::new(),
            created_at: now,
            updated_at: now,
        })
    }

    pub fn with_stats(mut self, stats: CharacterStats) -> Self {
        self.stats = stats;
        self
    }

    /// Replace the whole stats mapping as an edit, stamping `updated_at`.
    pub fn replace_stats(&mut self, stats: CharacterStats, now: DateTime<Utc>) {
        self.stats = stats;
        self.updated_at = now;
    }
}
