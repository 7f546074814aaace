//! Equipment templates and equipped items.

use async_trait::async_trait;
use charsheet_domain::{
    CharacterId, EquipmentId, EquipmentTemplate, EquipmentTemplateId, EquippedItem,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::helpers::{to_json_text, write_error, RowExt};
use crate::infrastructure::ports::{EquipmentRepo, RepoError};

pub struct SqliteEquipmentRepo {
    pool: SqlitePool,
}

impl SqliteEquipmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EquipmentRepo for SqliteEquipmentRepo {
    async fn get_template(
        &self,
        id: EquipmentTemplateId,
    ) -> Result<Option<EquipmentTemplate>, RepoError> {
        let row = sqlx::query(
            "SELECT id, system_id, name, description, metadata_json
             FROM equipment_templates WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::database("get_equipment_template", e))?;

        row.as_ref().map(|row| row_to_template(row, "")).transpose()
    }

    async fn save_template(&self, template: &EquipmentTemplate) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO equipment_templates (id, system_id, name, description, metadata_json)
            VALUES (?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                description = excluded.description,
                metadata_json = excluded.metadata_json
            "#,
        )
        .bind(template.id.to_string())
        .bind(template.system_id.to_string())
        .bind(&template.name)
        .bind(&template.description)
        .bind(to_json_text(&template.metadata)?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("save_equipment_template", e))?;

        Ok(())
    }

    async fn list_for_character(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<EquippedItem>, RepoError> {
        let rows = sqlx::query(
            r#"
            SELECT e.id, e.character_id, e.location, e.quantity, e.metadata_json,
                   t.id AS template_id,
                   t.system_id AS template_system_id,
                   t.name AS template_name,
                   t.description AS template_description,
                   t.metadata_json AS template_metadata_json
            FROM character_equipment e
            JOIN equipment_templates t ON t.id = e.template_id
            WHERE e.character_id = ?
            ORDER BY e.id
            "#,
        )
        .bind(character_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepoError::database("list_character_equipment", e))?;

        rows.iter().map(row_to_item).collect()
    }

    async fn save_item(&self, item: &EquippedItem) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO character_equipment (id, character_id, template_id, location, quantity, metadata_json)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                location = excluded.location,
                quantity = excluded.quantity,
                metadata_json = excluded.metadata_json
            "#,
        )
        .bind(item.id.to_string())
        .bind(item.character_id.to_string())
        .bind(item.template.id.to_string())
        .bind(&item.location)
        .bind(i64::from(item.quantity))
        .bind(to_json_text(&item.metadata)?)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("save_equipped_item", e))?;

        Ok(())
    }

    async fn remove_item(
        &self,
        character_id: CharacterId,
        id: EquipmentId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query("DELETE FROM character_equipment WHERE id = ? AND character_id = ?")
            .bind(id.to_string())
            .bind(character_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::database("remove_equipped_item", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("EquippedItem", id));
        }
        Ok(())
    }
}

// =============================================================================
// Row conversion helpers
// =============================================================================

/// Template columns, optionally behind a `template_` alias prefix.
fn row_to_template(row: &SqliteRow, prefix: &str) -> Result<EquipmentTemplate, RepoError> {
    Ok(EquipmentTemplate {
        id: row.get_id(&format!("{prefix}id"))?,
        system_id: row.get_id(&format!("{prefix}system_id"))?,
        name: row.get_string(&format!("{prefix}name"))?,
        description: row.get_string(&format!("{prefix}description"))?,
        metadata: row.get_json(&format!("{prefix}metadata_json"))?,
    })
}

fn row_to_item(row: &SqliteRow) -> Result<EquippedItem, RepoError> {
    let quantity: i64 = row
        .try_get("quantity")
        .map_err(|e| RepoError::database("decode", e))?;
    let quantity = u32::try_from(quantity)
        .map_err(|_| RepoError::serialization(format!("quantity out of range: {quantity}")))?;

    Ok(EquippedItem {
        id: row.get_id("id")?,
        character_id: row.get_id("character_id")?,
        template: row_to_template(row, "template_")?,
        location: row.get_string("location")?,
        quantity,
        metadata: row.get_json("metadata_json")?,
    })
}
