//! SQLite record store.
//!
//! Every record is a row; free-form metadata and stats mappings are JSON text
//! columns.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::infrastructure::ports::RepoError;

mod helpers;
mod schema;

mod character_repo;
mod equipment_repo;
mod game_system_repo;
mod trait_repo;

#[cfg(test)]
mod integration_tests;

pub use character_repo::SqliteCharacterRepo;
pub use equipment_repo::SqliteEquipmentRepo;
pub use game_system_repo::SqliteGameSystemRepo;
pub use schema::ensure_schema;
pub use trait_repo::SqliteTraitRepo;

/// Open (creating if needed) the database at `db_path` and ensure the schema.
pub async fn connect(db_path: &str, max_connections: u32) -> Result<SqlitePool, RepoError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect(&format!("sqlite:{}?mode=rwc", db_path))
        .await
        .map_err(|e| RepoError::database("connect", e))?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Create all SQLite repositories from one connection pool.
pub struct SqliteRepositories {
    pub character: Arc<SqliteCharacterRepo>,
    pub game_system: Arc<SqliteGameSystemRepo>,
    pub traits: Arc<SqliteTraitRepo>,
    pub equipment: Arc<SqliteEquipmentRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            character: Arc::new(SqliteCharacterRepo::new(pool.clone())),
            game_system: Arc::new(SqliteGameSystemRepo::new(pool.clone())),
            traits: Arc::new(SqliteTraitRepo::new(pool.clone())),
            equipment: Arc::new(SqliteEquipmentRepo::new(pool)),
        }
    }
}
