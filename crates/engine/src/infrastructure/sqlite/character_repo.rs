//! Character sheet persistence.

use async_trait::async_trait;
use charsheet_domain::{CharacterId, CharacterSheet, CharacterStats};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::helpers::{to_json_text, write_error, RowExt};
use crate::infrastructure::ports::{CharacterRepo, RepoError};

pub struct SqliteCharacterRepo {
    pool: SqlitePool,
}

impl SqliteCharacterRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CharacterRepo for SqliteCharacterRepo {
    async fn get(&self, id: CharacterId) -> Result<Option<CharacterSheet>, RepoError> {
        let row = sqlx::query(
            "SELECT id, system_id, name, stats_json, created_at, updated_at
             FROM characters WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_character", e))?;

        row.as_ref().map(row_to_sheet).transpose()
    }

    async fn save(&self, sheet: &CharacterSheet) -> Result<(), RepoError> {
        let stats_json = to_json_text(&sheet.stats.to_json())?;

        sqlx::query(
            r#"
            INSERT INTO characters (id, system_id, name, stats_json, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                system_id = excluded.system_id,
                name = excluded.name,
                stats_json = excluded.stats_json,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(sheet.id.to_string())
        .bind(sheet.system_id.to_string())
        .bind(&sheet.name)
        .bind(stats_json)
        .bind(sheet.created_at.to_rfc3339())
        .bind(sheet.updated_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("save_character", e))?;

        Ok(())
    }

    async fn delete(&self, id: CharacterId) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM characters WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("delete_character", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("CharacterSheet", id));
        }
        Ok(())
    }

    async fn list_ids(&self) -> Result<Vec<CharacterId>, RepoError> {
        let rows = sqlx::query("SELECT id FROM characters ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepoError::database("list_characters", e))?;

        rows.iter().map(|row| row.get_id("id")).collect()
    }

    async fn replace_stats(
        &self,
        id: CharacterId,
        stats: &CharacterStats,
    ) -> Result<(), RepoError> {
        let stats_json = to_json_text(&stats.to_json())?;

        // Dropping the transaction on an early return rolls it back
        let mut txn = self
            .pool
            .begin()
            .await
            .map_err(|e| RepoError::database("replace_stats", e))?;

        let result = sqlx::query("UPDATE characters SET stats_json = ? WHERE id = ?")
            .bind(stats_json)
            .bind(id.to_string())
            .execute(&mut *txn)
            .await
            .map_err(|e| RepoError::database("replace_stats", e))?;

        if result.rows_affected() != 1 {
            txn.rollback()
                .await
                .map_err(|e| RepoError::database("replace_stats", e))?;
            return Err(RepoError::not_found("CharacterSheet", id));
        }

        txn.commit()
            .await
            .map_err(|e| RepoError::database("replace_stats", e))?;

        tracing::debug!(character_id = %id, stat_count = stats.len(), "Replaced stats");
        Ok(())
    }
}

// =============================================================================
// Row conversion helpers
// =============================================================================

fn row_to_sheet(row: &SqliteRow) -> Result<CharacterSheet, RepoError> {
    Ok(CharacterSheet {
        id: row.get_id("id")?,
        system_id: row.get_id("system_id")?,
        name: row.get_string("name")?,
        stats: CharacterStats::from_json(&row.get_json("stats_json")?),
        created_at: row.get_datetime("created_at")?,
        updated_at: row.get_datetime("updated_at")?,
    })
}
