//! Trait definitions and per-character trait assignments.

use async_trait::async_trait;
use charsheet_domain::{CharacterId, CharacterTrait, TraitId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::helpers::{to_json_text, write_error, RowExt};
use crate::infrastructure::ports::{RepoError, TraitRepo};

pub struct SqliteTraitRepo {
    pool: SqlitePool,
}

impl SqliteTraitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TraitRepo for SqliteTraitRepo {
    async fn get(&self, id: TraitId) -> Result<Option<CharacterTrait>, RepoError> {
        let row = sqlx::query(
            "SELECT id, system_id, category, name, description, parent_id, metadata_json
             FROM traits WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_trait", e))?;

        row.as_ref().map(row_to_trait).transpose()
    }

    async fn save(&self, character_trait: &CharacterTrait) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO traits (id, system_id, category, name, description, parent_id, metadata_json)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                category = excluded.category,
                name = excluded.name,
                description = excluded.description,
                parent_id = excluded.parent_id,
                metadata_json = excluded.metadata_json
            "#,
        )
        .bind(character_trait.id.to_string())
        .bind(character_trait.system_id.to_string())
        .bind(&character_trait.category)
        .bind(&character_trait.name)
        .bind(&character_trait.description)
        .bind(character_trait.parent_id.map(|id| id.to_string()))
        .bind(to_json_text(&character_trait.metadata)?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("save_trait", e))?;

        Ok(())
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<CharacterTrait>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT t.id, t.system_id, t.category, t.name, t.description, t.parent_id, t.metadata_json
            FROM traits t
            JOIN character_traits ct ON ct.trait_id = t.id
            WHERE ct.character_id = ?
            ORDER BY t.id
            "#,
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_character_traits", e))?;

        rows.iter().map(row_to_trait).collect()
    }

    async fn assign(&self, character_id: CharacterId, trait_id: TraitId) -> Result<(), RepoError> {
        sqlx::query("INSERT OR IGNORE INTO character_traits (character_id, trait_id) VALUES (?, ?)")
            .bind(character_id.to_string())
            .bind(trait_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("assign_trait", e))?;
        Ok(())
    }

    async fn unassign(
        &self,
        character_id: CharacterId,
        trait_id: TraitId,
    ) -> Result<(), RepoError> {
        let result =
            sqlx::query("DELETE FROM character_traits WHERE character_id = ? AND trait_id = ?")
                .bind(character_id.to_string())
                .bind(trait_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(|e| RepoError::database("unassign_trait", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found(
                "TraitAssignment",
                format!("{character_id}/{trait_id}"),
            ));
        }
        Ok(())
    }
}

fn row_to_trait(row: &SqliteRow) -> Result<CharacterTrait, RepoError> {
    Ok(CharacterTrait {
        id: row.get_id("id")?,
        system_id: row.get_id("system_id")?,
        category: row.get_string("category")?,
        name: row.get_string("name")?,
        description: row.get_string("description")?,
        parent_id: row.get_optional_id("parent_id")?,
        metadata: row.get_json("metadata_json")?,
    })
}
