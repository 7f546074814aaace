//! Repository tests against a throwaway SQLite file.

use chrono::{TimeZone, Utc};
use charsheet_domain::{
    CharacterId, CharacterSheet, CharacterStats, CharacterTrait, EquipmentTemplate, EquippedItem,
    GameSystem,
};
use serde_json::json;
use tempfile::TempDir;

use super::{connect, SqliteRepositories};
use crate::infrastructure::ports::{
    CharacterRepo, EquipmentRepo, GameSystemRepo, RepoError, TraitRepo,
};

async fn open() -> (TempDir, SqliteRepositories) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("charsheet.db");
    let pool = connect(path.to_str().unwrap(), 2).await.unwrap();
    (dir, SqliteRepositories::new(pool))
}

async fn seed_system(repos: &SqliteRepositories) -> GameSystem {
    let system = GameSystem::new("Daggerheart", "daggerheart")
        .unwrap()
        .with_version("1.0")
        .with_metadata(json!({
            "character_sheet_schema": {
                "computed_stats": {
                    "hp": {"formula": "trait_meta('Class', 'base_hp') + stat('level')"},
                    "evasion": {"formula": "trait_meta(Class, base_evasion) + 0"}
                }
            }
        }));
    repos.game_system.save(&system).await.unwrap();
    system
}

async fn seed_character(repos: &SqliteRepositories, system: &GameSystem) -> CharacterSheet {
    let created = Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap();
    let stats: CharacterStats = [("level".to_string(), 2)].into_iter().collect();
    let sheet = CharacterSheet::new(system.id, "Marlowe", created)
        .unwrap()
        .with_stats(stats);
    repos.character.save(&sheet).await.unwrap();
    sheet
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("charsheet.db");
    let path = path.to_str().unwrap();

    connect(path, 1).await.unwrap();
    connect(path, 1).await.unwrap();
}

#[tokio::test]
async fn game_system_round_trips_with_schema_order() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;

    let loaded = repos.game_system.get(system.id).await.unwrap().unwrap();

    assert_eq!(loaded, system);
    let stats: Vec<_> = loaded
        .computed_stats()
        .iter()
        .map(|rule| rule.stat().to_string())
        .collect();
    assert_eq!(stats, vec!["hp", "evasion"]);
}

#[tokio::test]
async fn character_round_trips() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;
    let sheet = seed_character(&repos, &system).await;

    let loaded = repos.character.get(sheet.id).await.unwrap().unwrap();

    assert_eq!(loaded, sheet);
    assert_eq!(repos.character.list_ids().await.unwrap(), vec![sheet.id]);
    assert!(repos.character.get(CharacterId::new()).await.unwrap().is_none());
}

#[tokio::test]
async fn replace_stats_overwrites_only_the_stats_mapping() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;
    let sheet = seed_character(&repos, &system).await;

    let stats: CharacterStats = [("level".to_string(), 3), ("hp".to_string(), 9)]
        .into_iter()
        .collect();
    repos.character.replace_stats(sheet.id, &stats).await.unwrap();

    let loaded = repos.character.get(sheet.id).await.unwrap().unwrap();
    assert_eq!(loaded, sheet.with_stats(stats));
}

#[tokio::test]
async fn replace_stats_for_missing_character_is_not_found() {
    let (_dir, repos) = open().await;

    let result = repos
        .character
        .replace_stats(CharacterId::new(), &CharacterStats::new())
        .await;

    assert!(matches!(result, Err(RepoError::NotFound { .. })));
}

#[tokio::test]
async fn character_requires_existing_game_system() {
    let (_dir, repos) = open().await;
    let orphan = CharacterSheet::new(charsheet_domain::GameSystemId::new(), "Nobody", Utc::now())
        .unwrap();

    let result = repos.character.save(&orphan).await;

    assert!(matches!(result, Err(RepoError::ConstraintViolation(_))));
}

#[tokio::test]
async fn trait_assignments() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;
    let sheet = seed_character(&repos, &system).await;

    let class = CharacterTrait::new(system.id, "Class", "Guardian")
        .unwrap()
        .with_metadata(json!({"base_hp": 7}));
    let subclass = CharacterTrait::new(system.id, "Subclass", "Stalwart")
        .unwrap()
        .with_parent(class.id);
    repos.traits.save(&class).await.unwrap();
    repos.traits.save(&subclass).await.unwrap();

    repos.traits.assign(sheet.id, class.id).await.unwrap();
    repos.traits.assign(sheet.id, subclass.id).await.unwrap();
    // Assigning twice is harmless
    repos.traits.assign(sheet.id, class.id).await.unwrap();

    let assigned = repos.traits.list_for_character(sheet.id).await.unwrap();
    assert_eq!(assigned.len(), 2);
    assert!(assigned.contains(&class));
    assert!(assigned.contains(&subclass));

    repos.traits.unassign(sheet.id, subclass.id).await.unwrap();
    assert_eq!(
        repos.traits.list_for_character(sheet.id).await.unwrap(),
        vec![class.clone()]
    );

    let again = repos.traits.unassign(sheet.id, subclass.id).await;
    assert!(matches!(again, Err(RepoError::NotFound { .. })));
}

#[tokio::test]
async fn equipped_items_are_listed_by_id_with_their_template() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;
    let sheet = seed_character(&repos, &system).await;

    let armor = EquipmentTemplate::new(system.id, "Chainmail Armor")
        .unwrap()
        .with_metadata(json!({"thresholds": {"major": 7, "severe": 15}}));
    repos.equipment.save_template(&armor).await.unwrap();

    let first = EquippedItem::new(sheet.id, armor.clone(), "armor").unwrap();
    let second = EquippedItem::new(sheet.id, armor.clone(), "backpack")
        .unwrap()
        .with_quantity(2)
        .unwrap();
    repos.equipment.save_item(&first).await.unwrap();
    repos.equipment.save_item(&second).await.unwrap();

    let items = repos.equipment.list_for_character(sheet.id).await.unwrap();
    let mut expected = vec![first.clone(), second.clone()];
    expected.sort_by_key(|item| item.id);
    assert_eq!(items, expected);

    repos
        .equipment
        .remove_item(sheet.id, first.id)
        .await
        .unwrap();
    assert_eq!(
        repos.equipment.list_for_character(sheet.id).await.unwrap(),
        vec![second]
    );
}

#[tokio::test]
async fn deleting_a_character_drops_its_assignments() {
    let (_dir, repos) = open().await;
    let system = seed_system(&repos).await;
    let sheet = seed_character(&repos, &system).await;
    let class = CharacterTrait::new(system.id, "Class", "Seraph").unwrap();
    repos.traits.save(&class).await.unwrap();
    repos.traits.assign(sheet.id, class.id).await.unwrap();

    repos.character.delete(sheet.id).await.unwrap();

    assert!(repos.character.get(sheet.id).await.unwrap().is_none());
    assert!(repos
        .traits
        .list_for_character(sheet.id)
        .await
        .unwrap()
        .is_empty());
    assert!(repos.character.delete(sheet.id).await.unwrap_err().is_not_found());
}
