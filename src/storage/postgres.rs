use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::{create_pool, ensure_items_table, is_valid_table_name};
use crate::error::{AppError, AppResult};
use crate::models::{ItemDocument, ItemRecord, RecordId};

use super::RecordStore;

/// Documents kept as JSONB rows in a single table.
pub struct PostgresBackend {
    pool: PgPool,
    table: String,
}

#[derive(sqlx::FromRow)]
struct DocumentRow {
    id: String,
    document: Json<ItemDocument>,
}

impl PostgresBackend {
    pub async fn connect(database_url: &str, table: &str) -> AppResult<Self> {
        let pool = create_pool(database_url).await?;
        Self::with_pool(pool, table).await
    }

    pub async fn with_pool(pool: PgPool, table: &str) -> AppResult<Self> {
        if !is_valid_table_name(table) {
            return Err(AppError::Config(format!("invalid table name: {}", table)));
        }
        ensure_items_table(&pool, table).await?;
        Ok(Self {
            pool,
            table: table.to_string(),
        })
    }
}

fn insert_sql(table: &str) -> String {
    format!("INSERT INTO {} (id, document) VALUES ($1, $2)", table)
}

fn list_sql(table: &str) -> String {
    format!(
        "SELECT id::text AS id, document FROM {} ORDER BY document->>'date' DESC, created_at ASC",
        table
    )
}

fn delete_sql(table: &str) -> String {
    format!("DELETE FROM {} WHERE id = $1", table)
}

#[tonic::async_trait]
impl RecordStore for PostgresBackend {
    async fn insert(&self, document: &ItemDocument) -> AppResult<RecordId> {
        let id = Uuid::new_v4();
        let sql = insert_sql(&self.table);
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await?;
        Ok(RecordId::new(id.to_string()))
    }

    async fn list_by_date_desc(&self) -> AppResult<Vec<ItemRecord>> {
        let sql = list_sql(&self.table);
        let rows: Vec<DocumentRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;
        Ok(rows
            .into_iter()
            .map(|row| ItemRecord::from_document(RecordId::new(row.id), row.document.0))
            .collect())
    }

    async fn delete(&self, id: &RecordId) -> AppResult<()> {
        let uuid = Uuid::parse_str(id.as_str())
            .map_err(|_| AppError::NotFound(format!("item {}", id)))?;
        let sql = delete_sql(&self.table);
        let rows_affected = sqlx::query(&sql)
            .bind(uuid)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("item {}", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn collection(&self) -> &str {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_sql_orders_newest_first() {
        assert_eq!(
            list_sql("lost_found_items"),
            "SELECT id::text AS id, document FROM lost_found_items \
             ORDER BY document->>'date' DESC, created_at ASC"
        );
    }

    #[test]
    fn test_write_sql_targets_table() {
        assert_eq!(
            insert_sql("lost_found_items"),
            "INSERT INTO lost_found_items (id, document) VALUES ($1, $2)"
        );
        assert_eq!(
            delete_sql("lost_found_items"),
            "DELETE FROM lost_found_items WHERE id = $1"
        );
    }
}
