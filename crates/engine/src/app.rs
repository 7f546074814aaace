//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    clock::SystemClock,
    config::EngineConfig,
    ports::{CharacterRepo, ClockPort, EquipmentRepo, GameSystemRepo, RepoError, TraitRepo},
    sqlite::{self, SqliteRepositories},
};
use crate::use_cases;

/// Main application state.
///
/// Holds all repositories and use cases.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Container for all repository ports.
pub struct Repositories {
    pub character: Arc<dyn CharacterRepo>,
    pub game_system: Arc<dyn GameSystemRepo>,
    pub traits: Arc<dyn TraitRepo>,
    pub equipment: Arc<dyn EquipmentRepo>,
}

/// Container for all use cases.
pub struct UseCases {
    pub recalculate: Arc<use_cases::RecalculateStats>,
    pub management: use_cases::ManagementUseCases,
}

impl App {
    /// Connect to the configured database and wire everything up.
    pub async fn connect(config: &EngineConfig) -> Result<Self, RepoError> {
        tracing::info!(
            db_path = %config.db_path,
            max_connections = config.max_connections,
            "Opening character store"
        );
        let pool = sqlite::connect(&config.db_path, config.max_connections).await?;
        Ok(Self::new(
            SqliteRepositories::new(pool),
            Arc::new(SystemClock::new()),
        ))
    }

    /// Create a new App with all dependencies wired up.
    pub fn new(repos: SqliteRepositories, clock: Arc<dyn ClockPort>) -> Self {
        let repositories = Repositories {
            character: repos.character,
            game_system: repos.game_system,
            traits: repos.traits,
            equipment: repos.equipment,
        };

        let recalculate = Arc::new(use_cases::RecalculateStats::new(
            repositories.character.clone(),
            repositories.game_system.clone(),
            repositories.traits.clone(),
            repositories.equipment.clone(),
        ));

        let management = use_cases::ManagementUseCases::new(
            use_cases::management::CharacterSheetCrud::new(
                repositories.character.clone(),
                repositories.game_system.clone(),
                repositories.traits.clone(),
                repositories.equipment.clone(),
                recalculate.clone(),
                clock,
            ),
            use_cases::management::GameSystemCrud::new(repositories.game_system.clone()),
        );

        Self {
            repositories,
            use_cases: UseCases {
                recalculate,
                management,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use charsheet_domain::{
        CharacterSheet, CharacterStats, CharacterTrait, EquipmentTemplate, GameSystem,
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use tempfile::TempDir;

    async fn app(dir: &TempDir) -> App {
        let path = dir.path().join("charsheet.db");
        let pool = sqlite::connect(path.to_str().unwrap(), 1).await.unwrap();
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 10, 30, 0).unwrap();
        App::new(SqliteRepositories::new(pool), Arc::new(FixedClock(now)))
    }

    /// Daggerheart-style sheet: class sets HP and evasion, armor sets thresholds.
    #[tokio::test]
    async fn sheet_follows_trait_and_equipment_changes() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).await;
        let management = &app.use_cases.management;

        let system = management
            .game_system
            .register(
                GameSystem::new("Daggerheart", "daggerheart")
                    .unwrap()
                    .with_metadata(json!({
                        "character_sheet_schema": {
                            "computed_stats": {
                                "hp": {"formula": "trait_meta('Class', 'base_hp') + stat('level')"},
                                "evasion": {"formula": "trait_meta(class, base_evasion) + 0"},
                                "major_threshold": {"formula": "equipment_meta(armor, thresholds.major) + stat(level)"},
                                "broken": {"formula": "stat(level) * 2"}
                            }
                        }
                    })),
            )
            .await
            .unwrap();

        let class = CharacterTrait::new(system.id, "Class", "Guardian")
            .unwrap()
            .with_metadata(json!({"base_hp": 7, "base_evasion": 9}));
        app.repositories.traits.save(&class).await.unwrap();
        let armor = EquipmentTemplate::new(system.id, "Chainmail Armor")
            .unwrap()
            .with_metadata(json!({"thresholds": {"major": 7, "severe": 15}}));
        app.repositories.equipment.save_template(&armor).await.unwrap();

        // No class or armor yet: lookups degrade to zero
        let stats: CharacterStats = [("level".to_string(), 1)].into_iter().collect();
        let sheet = management
            .character_sheet
            .create(system.id, "Marlowe".to_string(), stats)
            .await
            .unwrap();
        assert_eq!(sheet.stats.integer("hp"), 1);
        assert_eq!(sheet.stats.integer("evasion"), 0);
        assert!(!sheet.stats.contains("broken"));

        let sheet = management
            .character_sheet
            .assign_trait(sheet.id, class.id)
            .await
            .unwrap();
        assert_eq!(sheet.stats.integer("hp"), 8);
        assert_eq!(sheet.stats.integer("evasion"), 9);

        let (item, sheet) = management
            .character_sheet
            .equip(sheet.id, armor.id, "armor".to_string(), 1)
            .await
            .unwrap();
        assert_eq!(sheet.stats.integer("major_threshold"), 8);

        let sheet = management
            .character_sheet
            .update_stats(sheet.id, [("level".to_string(), 2)].into_iter().collect())
            .await
            .unwrap();
        assert_eq!(sheet.stats.integer("hp"), 9);
        assert_eq!(sheet.stats.integer("major_threshold"), 9);

        let sheet = management
            .character_sheet
            .unequip(sheet.id, item.id)
            .await
            .unwrap();
        assert_eq!(sheet.stats.integer("major_threshold"), 2);

        // What was returned is what was stored
        let details = management
            .character_sheet
            .get(sheet.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(details.sheet.stats, sheet.stats);
        assert_eq!(details.traits, vec![class]);
        assert!(details.equipment.is_empty());

        // Recalculating again changes nothing, stats or otherwise
        let again = app.use_cases.recalculate.execute(sheet.id).await.unwrap();
        assert_eq!(again.sheet, details.sheet);
        assert_eq!(again.failures.len(), 1);
        let stored = app.repositories.character.get(sheet.id).await.unwrap();
        assert_eq!(stored, Some(details.sheet));
    }

    #[tokio::test]
    async fn recalculation_writes_only_stats() {
        let dir = TempDir::new().unwrap();
        let app = app(&dir).await;

        let system = app
            .use_cases
            .management
            .game_system
            .register(
                GameSystem::new("Daggerheart", "daggerheart")
                    .unwrap()
                    .with_metadata(json!({
                        "character_sheet_schema": {
                            "computed_stats": {"hp": {"formula": "stat(level) + 5"}}
                        }
                    })),
            )
            .await
            .unwrap();

        // Stored well before the app clock's "now"
        let created = Utc.with_ymd_and_hms(2024, 11, 2, 18, 0, 0).unwrap();
        let stats: CharacterStats = [("level".to_string(), 2)].into_iter().collect();
        let sheet = CharacterSheet::new(system.id, "Marlowe", created)
            .unwrap()
            .with_stats(stats);
        app.repositories.character.save(&sheet).await.unwrap();

        let first = app.use_cases.recalculate.execute(sheet.id).await.unwrap();
        assert_eq!(first.sheet.stats.integer("hp"), 7);
        assert_eq!(first.sheet.updated_at, created);

        let before = app.repositories.character.get(sheet.id).await.unwrap();
        assert_eq!(before.as_ref(), Some(&first.sheet));

        let second = app.use_cases.recalculate.execute(sheet.id).await.unwrap();
        let after = app.repositories.character.get(sheet.id).await.unwrap();
        assert_eq!(second.sheet, first.sheet);
        assert_eq!(before, after);
    }
}
