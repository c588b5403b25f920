//! Postgres-backed inventory collection.
//!
//! One table per collection identifier:
//!
//! ```sql
//! CREATE TABLE "<collection>" (name TEXT PRIMARY KEY, quantity BIGINT NOT NULL)
//! ```
//!
//! The identifier is validated before it is spliced into SQL; all record
//! values go through bind parameters.

use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use stockroom_inventory::{InventoryItem, ItemName};

use super::{InventoryCollection, StoreError, validate_collection_id};

/// Postgres-backed collection.
///
/// `PgPool` is internally reference-counted, so clones share one pool.
#[derive(Debug, Clone)]
pub struct PostgresCollection {
    pool: PgPool,
    id: String,
    table: String,
}

impl PostgresCollection {
    pub fn new(pool: PgPool, collection: impl Into<String>) -> Result<Self, StoreError> {
        let id = collection.into();
        validate_collection_id(&id)?;
        let table = format!("\"{id}\"");
        Ok(Self { pool, id, table })
    }

    /// Open a pool against `database_url` and bind it to `collection`.
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        collection: impl Into<String>,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;
        Self::new(pool, collection)
    }

    /// Create the collection table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        let sql = format!(
            "CREATE TABLE IF NOT EXISTS {} (name TEXT PRIMARY KEY, quantity BIGINT NOT NULL)",
            self.table
        );
        sqlx::query(&sql)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        tracing::info!(collection = %self.id, "collection table ready");
        Ok(())
    }
}

fn row_to_item(row: &PgRow) -> Result<InventoryItem, StoreError> {
    let name: String = row
        .try_get("name")
        .map_err(|e| StoreError::backend("decode", e.to_string()))?;
    let quantity: i64 = row.try_get("quantity").map_err(|e| StoreError::Corrupt {
        name: name.clone(),
        message: e.to_string(),
    })?;
    let name = ItemName::parse(name.clone()).map_err(|e| StoreError::Corrupt {
        name,
        message: e.to_string(),
    })?;
    Ok(InventoryItem::new(name, quantity))
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => StoreError::backend(
            operation,
            format!("database error: {}", db_err.message()),
        ),
        sqlx::Error::PoolClosed => StoreError::backend(operation, "connection pool closed"),
        sqlx::Error::PoolTimedOut => StoreError::backend(operation, "connection pool timed out"),
        other => StoreError::backend(operation, other.to_string()),
    }
}

#[async_trait::async_trait]
impl InventoryCollection for PostgresCollection {
    fn collection_id(&self) -> &str {
        &self.id
    }

    async fn list_all(&self) -> Result<Vec<InventoryItem>, StoreError> {
        let sql = format!("SELECT name, quantity FROM {}", self.table);
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_all", e))?;
        tracing::debug!(collection = %self.id, count = rows.len(), "listed collection");
        rows.iter().map(row_to_item).collect()
    }

    async fn get(&self, name: &ItemName) -> Result<Option<InventoryItem>, StoreError> {
        let sql = format!("SELECT name, quantity FROM {} WHERE name = $1", self.table);
        let row = sqlx::query(&sql)
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get", e))?;
        row.as_ref().map(row_to_item).transpose()
    }

    async fn put(&self, item: &InventoryItem) -> Result<(), StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, quantity) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET quantity = EXCLUDED.quantity",
            self.table
        );
        sqlx::query(&sql)
            .bind(item.name.as_str())
            .bind(item.quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("put", e))?;
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE name = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn increment(&self, name: &ItemName, delta: i64) -> Result<i64, StoreError> {
        let sql = format!(
            "INSERT INTO {table} (name, quantity) VALUES ($1, $2) \
             ON CONFLICT (name) DO UPDATE SET quantity = {table}.quantity + EXCLUDED.quantity \
             RETURNING quantity",
            table = self.table
        );
        let row = sqlx::query(&sql)
            .bind(name.as_str())
            .bind(delta)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("increment", e))?;
        row.try_get("quantity").map_err(|e| StoreError::Corrupt {
            name: name.to_string(),
            message: e.to_string(),
        })
    }

    async fn replace_existing(&self, name: &ItemName, quantity: i64) -> Result<bool, StoreError> {
        let sql = format!("UPDATE {} SET quantity = $2 WHERE name = $1", self.table);
        let result = sqlx::query(&sql)
            .bind(name.as_str())
            .bind(quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("replace_existing", e))?;
        Ok(result.rows_affected() > 0)
    }
}
