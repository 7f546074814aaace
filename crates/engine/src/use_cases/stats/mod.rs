//! Stat recalculation - derive computed stats and persist them.
//!
//! Called after anything that can change a formula's inputs: character
//! creation, stat edits, trait and equipment changes. Callers are expected
//! to run at most one recalculation per character at a time.

use std::sync::Arc;

use charsheet_domain::{
    recompute_stats, CharacterContext, CharacterId, CharacterSheet, FormulaFailure, GameSystemId,
};

use crate::infrastructure::ports::{
    CharacterRepo, EquipmentRepo, GameSystemRepo, RepoError, TraitRepo,
};

#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),
    #[error("Game system not found: {0}")]
    GameSystemNotFound(GameSystemId),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Result of one recalculation.
#[derive(Debug, Clone)]
pub struct StatsRecalculation {
    /// The sheet as persisted after the pass.
    pub sheet: CharacterSheet,
    pub computed: Vec<String>,
    /// Formulas that failed; their stats keep their previous values.
    pub failures: Vec<FormulaFailure>,
}

/// Outcome of recalculating many characters.
#[derive(Debug, Default)]
pub struct BatchRecalculation {
    /// Characters whose stats were recalculated, in request order.
    pub updated: Vec<StatsRecalculation>,
    pub formula_failures: usize,
    pub errors: Vec<(CharacterId, StatsError)>,
}

/// The Recalculation Service.
pub struct RecalculateStats {
    character: Arc<dyn CharacterRepo>,
    game_system: Arc<dyn GameSystemRepo>,
    traits: Arc<dyn TraitRepo>,
    equipment: Arc<dyn EquipmentRepo>,
}

impl RecalculateStats {
    pub fn new(
        character: Arc<dyn CharacterRepo>,
        game_system: Arc<dyn GameSystemRepo>,
        traits: Arc<dyn TraitRepo>,
        equipment: Arc<dyn EquipmentRepo>,
    ) -> Self {
        Self {
            character,
            game_system,
            traits,
            equipment,
        }
    }

    /// Recalculate and persist computed stats for one character.
    ///
    /// The schema is read fresh on every call. A game system without computed
    /// stats leaves the character untouched and performs no write. Only the
    /// stats mapping is written, so recalculating unchanged inputs leaves the
    /// stored record as it was. Formula failures are logged and reported but
    /// never fail the call.
    pub async fn execute(&self, character_id: CharacterId) -> Result<StatsRecalculation, StatsError> {
        let mut sheet = self
            .character
            .get(character_id)
            .await?
            .ok_or(StatsError::CharacterNotFound(character_id))?;

        let system = self
            .game_system
            .get(sheet.system_id)
            .await?
            .ok_or(StatsError::GameSystemNotFound(sheet.system_id))?;

        let schema = system.computed_stats();
        if schema.is_empty() {
            tracing::debug!(
                character_id = %character_id,
                system = %system.slug,
                "No computed stats declared, nothing to recalculate"
            );
            return Ok(StatsRecalculation {
                sheet,
                computed: Vec::new(),
                failures: Vec::new(),
            });
        }

        let traits = self.traits.list_for_character(character_id).await?;
        let equipment = self.equipment.list_for_character(character_id).await?;
        let context = CharacterContext::new(&sheet, traits, equipment);

        tracing::debug!(
            character_id = %character_id,
            formulas = schema.len(),
            "Recalculating stats"
        );
        let outcome = recompute_stats(&context, &schema);

        for failure in &outcome.failures {
            tracing::warn!(
                character_id = %character_id,
                stat = %failure.stat,
                formula = %failure.formula,
                error = %failure.error,
                "Skipping computed stat"
            );
        }

        self.character
            .replace_stats(character_id, &outcome.stats)
            .await?;
        sheet.stats = outcome.stats;

        tracing::info!(
            character_id = %character_id,
            computed = outcome.computed.len(),
            failed = outcome.failures.len(),
            "Recalculated stats"
        );

        Ok(StatsRecalculation {
            sheet,
            computed: outcome.computed,
            failures: outcome.failures,
        })
    }

    /// Recalculate several characters one after another.
    ///
    /// A character that cannot be recalculated is recorded and skipped.
    pub async fn execute_many(&self, character_ids: &[CharacterId]) -> BatchRecalculation {
        let mut batch = BatchRecalculation::default();
        for &character_id in character_ids {
            match self.execute(character_id).await {
                Ok(result) => {
                    batch.formula_failures += result.failures.len();
                    batch.updated.push(result);
                }
                Err(e) => {
                    tracing::error!(character_id = %character_id, error = %e, "Recalculation failed");
                    batch.errors.push((character_id, e));
                }
            }
        }
        batch
    }

    /// Recalculate every stored character.
    pub async fn execute_all(&self) -> Result<BatchRecalculation, StatsError> {
        let ids = self.character.list_ids().await?;
        Ok(self.execute_many(&ids).await)
    }
}
