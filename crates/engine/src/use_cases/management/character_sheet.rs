//! Character sheet management.
//!
//! Each mutating operation writes first, then recalculates computed stats and
//! returns the sheet as persisted after recalculation.

use std::sync::Arc;

use charsheet_domain::{
    CharacterId, CharacterSheet, CharacterStats, CharacterTrait, EquipmentId,
    EquipmentTemplateId, EquippedItem, GameSystemId, TraitId,
};

use crate::infrastructure::ports::{
    CharacterRepo, ClockPort, EquipmentRepo, GameSystemRepo, TraitRepo,
};
use crate::use_cases::stats::RecalculateStats;

use super::ManagementError;

/// A sheet together with everything its formulas can read.
#[derive(Debug, Clone, PartialEq)]
pub struct CharacterDetails {
    pub sheet: CharacterSheet,
    pub traits: Vec<CharacterTrait>,
    pub equipment: Vec<EquippedItem>,
}

pub struct CharacterSheetCrud {
    character: Arc<dyn CharacterRepo>,
    game_system: Arc<dyn GameSystemRepo>,
    traits: Arc<dyn TraitRepo>,
    equipment: Arc<dyn EquipmentRepo>,
    recalculate: Arc<RecalculateStats>,
    clock: Arc<dyn ClockPort>,
}

impl CharacterSheetCrud {
    pub fn new(
        character: Arc<dyn CharacterRepo>,
        game_system: Arc<dyn GameSystemRepo>,
        traits: Arc<dyn TraitRepo>,
        equipment: Arc<dyn EquipmentRepo>,
        recalculate: Arc<RecalculateStats>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            character,
            game_system,
            traits,
            equipment,
            recalculate,
            clock,
        }
    }

    pub async fn get(
        &self,
        character_id: CharacterId,
    ) -> Result<Option<CharacterDetails>, ManagementError> {
        let Some(sheet) = self.character.get(character_id).await? else {
            return Ok(None);
        };
        let traits = self.traits.list_for_character(character_id).await?;
        let equipment = self.equipment.list_for_character(character_id).await?;

        Ok(Some(CharacterDetails {
            sheet,
            traits,
            equipment,
        }))
    }

    pub async fn create(
        &self,
        system_id: GameSystemId,
        name: String,
        stats: CharacterStats,
    ) -> Result<CharacterSheet, ManagementError> {
        if self.game_system.get(system_id).await?.is_none() {
            return Err(ManagementError::not_found("GameSystem", system_id));
        }

        let sheet = CharacterSheet::new(system_id, name, self.clock.now())?.with_stats(stats);
        self.character.save(&sheet).await?;
        tracing::info!(character_id = %sheet.id, system_id = %system_id, "Created character");

        self.recalculate(sheet.id).await
    }

    /// Merge raw stat edits (e.g. a level-up) into the sheet.
    pub async fn update_stats(
        &self,
        character_id: CharacterId,
        changes: CharacterStats,
    ) -> Result<CharacterSheet, ManagementError> {
        let mut sheet = self.load(character_id).await?;

        let mut stats = sheet.stats.clone();
        stats.merge(&changes);
        sheet.replace_stats(stats, self.clock.now());
        self.character.save(&sheet).await?;

        self.recalculate(character_id).await
    }

    pub async fn assign_trait(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
    ) -> Result<CharacterSheet, ManagementError> {
        let sheet = self.load(character_id).await?;
        let character_trait = self
            .traits
            .get(trait_id)
            .await?
            .ok_or_else(|| ManagementError::not_found("CharacterTrait", trait_id))?;

        if character_trait.system_id != sheet.system_id {
            return Err(ManagementError::InvalidInput(format!(
                "Trait '{}' belongs to a different game system",
                character_trait.name
            )));
        }

        self.traits.assign(character_id, trait_id).await?;
        self.recalculate(character_id).await
    }

    pub async fn remove_trait(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
    ) -> Result<CharacterSheet, ManagementError> {
        self.traits.unassign(character_id, trait_id).await?;
        self.recalculate(character_id).await
    }

    pub async fn equip(
        &self,
        character_id: CharacterId,
        template_id: EquipmentTemplateId,
        location: String,
        quantity: u32,
    ) -> Result<(EquippedItem, CharacterSheet), ManagementError> {
        let sheet = self.load(character_id).await?;
        let template = self
            .equipment
            .get_template(template_id)
            .await?
            .ok_or_else(|| ManagementError::not_found("EquipmentTemplate", template_id))?;

        if template.system_id != sheet.system_id {
            return Err(ManagementError::InvalidInput(format!(
                "Equipment '{}' belongs to a different game system",
                template.name
            )));
        }

        let item = EquippedItem::new(character_id, template, location)?.with_quantity(quantity)?;
        self.equipment.save_item(&item).await?;

        let sheet = self.recalculate(character_id).await?;
        Ok((item, sheet))
    }

    pub async fn unequip(
        &self,
        character_id: CharacterId,
        equipment_id: EquipmentId,
    ) -> Result<CharacterSheet, ManagementError> {
        self.equipment
            .remove_item(character_id, equipment_id)
            .await?;
        self.recalculate(character_id).await
    }

    pub async fn delete(&self, character_id: CharacterId) -> Result<(), ManagementError> {
        self.character.delete(character_id).await?;
        Ok(())
    }

    async fn load(&self, character_id: CharacterId) -> Result<CharacterSheet, ManagementError> {
        self.character
            .get(character_id)
            .await?
            .ok_or_else(|| ManagementError::not_found("CharacterSheet", character_id))
    }

    async fn recalculate(&self, character_id: CharacterId) -> Result<CharacterSheet, ManagementError> {
        Ok(self.recalculate.execute(character_id).await?.sheet)
    }
}
