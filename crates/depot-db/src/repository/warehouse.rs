//! # Warehouse Repository
//!
//! Warehouses are referenced by sections; only the operations the section
//! and seed code need are provided.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use depot_core::Warehouse;

/// Repository for warehouse database operations.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    /// Creates a new WarehouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    /// Inserts a warehouse and returns it with its generated id.
    ///
    /// ## Returns
    /// * `Err(Duplicate)` - warehouse code already exists
    pub async fn insert(&self, warehouse: &Warehouse) -> DbResult<Warehouse> {
        debug!(code = %warehouse.warehouse_code, "Inserting warehouse");

        let result = sqlx::query(
            r#"
            INSERT INTO warehouses (
                warehouse_code, address, telephone,
                minimum_capacity, minimum_temperature
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&warehouse.warehouse_code)
        .bind(&warehouse.address)
        .bind(&warehouse.telephone)
        .bind(warehouse.minimum_capacity)
        .bind(warehouse.minimum_temperature)
        .execute(&self.pool)
        .await?;

        Ok(Warehouse {
            id: result.last_insert_rowid(),
            ..warehouse.clone()
        })
    }

    /// Gets a warehouse by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Warehouse>> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT id, warehouse_code, address, telephone,
                   minimum_capacity, minimum_temperature
            FROM warehouses
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(warehouse)
    }
}
