//! Game system management.

use std::sync::Arc;

use charsheet_domain::{check_schema, GameSystem, GameSystemId, SchemaReport};

use crate::infrastructure::ports::GameSystemRepo;

use super::ManagementError;

pub struct GameSystemCrud {
    game_system: Arc<dyn GameSystemRepo>,
}

impl GameSystemCrud {
    pub fn new(game_system: Arc<dyn GameSystemRepo>) -> Self {
        Self { game_system }
    }

    pub async fn list(&self) -> Result<Vec<GameSystem>, ManagementError> {
        Ok(self.game_system.list().await?)
    }

    pub async fn get(&self, id: GameSystemId) -> Result<Option<GameSystem>, ManagementError> {
        Ok(self.game_system.get(id).await?)
    }

    /// Save a game system. Formulas that would fail are logged, not rejected;
    /// characters still get every stat that does evaluate.
    pub async fn register(&self, system: GameSystem) -> Result<GameSystem, ManagementError> {
        let report = check_schema(&system.computed_stats());
        for failure in &report.invalid {
            tracing::warn!(
                system = %system.slug,
                stat = %failure.stat,
                formula = %failure.formula,
                error = %failure.error,
                "Game system declares an invalid formula"
            );
        }

        self.game_system.save(&system).await?;
        tracing::info!(system_id = %system.id, slug = %system.slug, "Registered game system");
        Ok(system)
    }

    /// Parse every declared formula without evaluating any.
    pub async fn validate_schema(&self, id: GameSystemId) -> Result<SchemaReport, ManagementError> {
        let system = self
            .game_system
            .get(id)
            .await?
            .ok_or_else(|| ManagementError::not_found("GameSystem", id))?;

        Ok(check_schema(&system.computed_stats()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::MockGameSystemRepo;
    use serde_json::json;

    fn system() -> GameSystem {
        GameSystem::new("Daggerheart", "daggerheart")
            .unwrap()
            .with_metadata(json!({
                "character_sheet_schema": {
                    "computed_stats": {
                        "hp": {"formula": "stat(level) + 5"},
                        "armor_score": {"formula": "equipment_meta(armor, base_score) * 2"},
                        "notes": {}
                    }
                }
            }))
    }

    #[tokio::test]
    async fn validate_schema_reports_bad_formulas() {
        let system = system();
        let system_id = system.id;
        let mut repo = MockGameSystemRepo::new();
        repo.expect_get()
            .withf(move |id| *id == system_id)
            .returning(move |_| Ok(Some(system.clone())));

        let report = GameSystemCrud::new(Arc::new(repo))
            .validate_schema(system_id)
            .await
            .unwrap();

        assert!(!report.is_valid());
        assert_eq!(report.valid, vec!["hp"]);
        assert_eq!(report.skipped, vec!["notes"]);
        assert_eq!(report.invalid.len(), 1);
        assert_eq!(report.invalid[0].stat, "armor_score");
    }

    #[tokio::test]
    async fn validate_schema_for_unknown_system() {
        let mut repo = MockGameSystemRepo::new();
        repo.expect_get().returning(|_| Ok(None));

        let result = GameSystemCrud::new(Arc::new(repo))
            .validate_schema(GameSystemId::new())
            .await;

        assert!(matches!(result, Err(ManagementError::NotFound { .. })));
    }

    #[tokio::test]
    async fn register_saves_even_with_invalid_formulas() {
        let mut repo = MockGameSystemRepo::new();
        repo.expect_save().times(1).returning(|_| Ok(()));

        let system = system();
        let saved = GameSystemCrud::new(Arc::new(repo))
            .register(system.clone())
            .await
            .unwrap();

        assert_eq!(saved, system);
    }
}
