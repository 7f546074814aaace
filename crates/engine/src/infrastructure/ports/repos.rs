//! Repository port traits for the character record store.

use async_trait::async_trait;
use charsheet_domain::{
    CharacterId, CharacterSheet, CharacterStats, CharacterTrait, EquipmentId, EquipmentTemplate,
    EquipmentTemplateId, EquippedItem, GameSystem, GameSystemId, TraitId,
};

use super::error::RepoError;

// =============================================================================
// Database Ports (one per record type)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterSheet>, RepoError>;
    async fn save(&self, sheet: &CharacterSheet) -> Result<(), RepoError>;
    async fn delete(&self, id: CharacterId) -> Result<(), RepoError>;
    async fn list_ids(&self) -> Result<Vec<CharacterId>, RepoError>;

    /// Replace the whole stats mapping in one all-or-nothing write.
    ///
    /// Only the stats column is written; the rest of the record is untouched.
    /// Returns `RepoError::NotFound` if the character does not exist.
    async fn replace_stats(&self, id: CharacterId, stats: &CharacterStats) -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GameSystemRepo: Send + Sync {
    async fn get(&self, id: GameSystemId) -> Result<Option<GameSystem>, RepoError>;
    async fn save(&self, system: &GameSystem) -> Result<(), RepoError>;
    async fn list(&self) -> Result<Vec<GameSystem>, RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TraitRepo: Send + Sync {
    async fn get(&self, id: TraitId) -> Result<Option<CharacterTrait>, RepoError>;
    async fn save(&self, character_trait: &CharacterTrait) -> Result<(), RepoError>;

    // Assignments
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<CharacterTrait>, RepoError>;
    async fn assign(&self, character_id: CharacterId, trait_id: TraitId) -> Result<(), RepoError>;
    async fn unassign(&self, character_id: CharacterId, trait_id: TraitId)
        -> Result<(), RepoError>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EquipmentRepo: Send + Sync {
    // Templates
    async fn get_template(
        &self,
        id: EquipmentTemplateId,
    ) -> Result<Option<EquipmentTemplate>, RepoError>;
    async fn save_template(&self, template: &EquipmentTemplate) -> Result<(), RepoError>;

    // Equipped items
    /// Items equipped by a character, ordered by equipment id.
    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<EquippedItem>, RepoError>;
    async fn save_item(&self, item: &EquippedItem) -> Result<(), RepoError>;
    async fn remove_item(
        &self,
        character_id: CharacterId,
        id: EquipmentId,
    ) -> Result<(), RepoError>;
}
