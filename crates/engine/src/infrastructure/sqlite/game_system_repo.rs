//! Game system persistence.

use async_trait::async_trait;
use charsheet_domain::{GameSystem, GameSystemId};
use sqlx::sqlite::SqliteRow;
use sqlx::SqlitePool;

use super::helpers::{to_json_text, write_error, RowExt};
use crate::infrastructure::ports::{GameSystemRepo, RepoError};

pub struct SqliteGameSystemRepo {
    pool: SqlitePool,
}

impl SqliteGameSystemRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GameSystemRepo for SqliteGameSystemRepo {
    async fn get(&self, id: GameSystemId) -> Result<Option<GameSystem>, RepoError> {
        let row = sqlx::query(
            "SELECT id, name, version, slug, metadata_json FROM game_systems WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_game_system", e))?;

        row.as_ref().map(row_to_game_system).transpose()
    }

    async fn save(&self, system: &GameSystem) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO game_systems (id, name, version, slug, metadata_json)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                version = excluded.version,
                slug = excluded.slug,
                metadata_json = excluded.metadata_json
            "#,
        )
        .bind(system.id.to_string())
        .bind(&system.name)
        .bind(&system.version)
        .bind(&system.slug)
        .bind(to_json_text(&system.metadata)?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("save_game_system", e))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<GameSystem>, RepoError> {
        let rows = sqlx::query(
            "SELECT id, name, version, slug, metadata_json FROM game_systems ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_game_systems", e))?;

        rows.iter().map(row_to_game_system).collect()
    }
}

fn row_to_game_system(row: &SqliteRow) -> Result<GameSystem, RepoError> {
    Ok(GameSystem {
        id: row.get_id("id")?,
        name: row.get_string("name")?,
        version: row.get_string("version")?,
        slug: row.get_string("slug")?,
        metadata: row.get_json("metadata_json")?,
    })
}
