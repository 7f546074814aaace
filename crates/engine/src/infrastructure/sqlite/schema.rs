//! Table definitions, created idempotently on connect.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const TABLES: [&str; 7] = [
    r#"
    CREATE TABLE IF NOT EXISTS game_systems (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        version TEXT NOT NULL DEFAULT '',
        slug TEXT NOT NULL UNIQUE,
        metadata_json TEXT NOT NULL DEFAULT '{}'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS characters (
        id TEXT PRIMARY KEY,
        system_id TEXT NOT NULL REFERENCES game_systems(id),
        name TEXT NOT NULL,
        stats_json TEXT NOT NULL DEFAULT '{}',
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS traits (
        id TEXT PRIMARY KEY,
        system_id TEXT NOT NULL REFERENCES game_systems(id),
        category TEXT NOT NULL,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        parent_id TEXT REFERENCES traits(id),
        metadata_json TEXT NOT NULL DEFAULT '{}'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS character_traits (
        character_id TEXT NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
        trait_id TEXT NOT NULL REFERENCES traits(id),
        PRIMARY KEY (character_id, trait_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS equipment_templates (
        id TEXT PRIMARY KEY,
        system_id TEXT NOT NULL REFERENCES game_systems(id),
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        metadata_json TEXT NOT NULL DEFAULT '{}'
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS character_equipment (
        id TEXT PRIMARY KEY,
        character_id TEXT NOT NULL REFERENCES characters(id) ON DELETE CASCADE,
        template_id TEXT NOT NULL REFERENCES equipment_templates(id),
        location TEXT NOT NULL,
        quantity INTEGER NOT NULL DEFAULT 1,
        metadata_json TEXT NOT NULL DEFAULT '{}'
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS idx_character_equipment_character
        ON character_equipment (character_id, location)
    "#,
];

/// Ensure every table and index exists.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in TABLES {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("schema", e))?;
    }

    tracing::info!("SQLite schema initialized");
    Ok(())
}
