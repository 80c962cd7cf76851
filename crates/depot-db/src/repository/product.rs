//! # Product Repository
//!
//! Product types, products and product records.
//!
//! ## Why Records?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Product "FRZ-001"                                                      │
//! │    ├── record #1  2024-01-10  purchase 450  sale 799                    │
//! │    └── record #2  2024-03-02  purchase 480  sale 849   ◄── current      │
//! │                                                                         │
//! │  Order line items reference a record id, so an order keeps pointing    │
//! │  at the price it was placed with after the product is re-priced.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use depot_core::{Product, ProductRecord, ProductType};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a product type.
    pub async fn insert_type(&self, description: &str) -> DbResult<ProductType> {
        let result = sqlx::query("INSERT INTO product_types (description) VALUES (?1)")
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(ProductType {
            id: result.last_insert_rowid(),
            description: description.to_string(),
        })
    }

    /// Inserts a product.
    ///
    /// ## Returns
    /// * `Err(Duplicate)` - product code already exists
    /// * `Err(ForeignKeyViolation)` - product type doesn't exist
    pub async fn insert(&self, product: &Product) -> DbResult<Product> {
        debug!(code = %product.product_code, "Inserting product");

        let result = sqlx::query(
            r#"
            INSERT INTO products (product_code, description, product_type_id)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&product.product_code)
        .bind(&product.description)
        .bind(product.product_type_id)
        .execute(&self.pool)
        .await?;

        Ok(Product {
            id: result.last_insert_rowid(),
            ..product.clone()
        })
    }

    /// Inserts a price record for an existing product.
    pub async fn insert_record(&self, record: &ProductRecord) -> DbResult<ProductRecord> {
        debug!(product_id = record.product_id, "Inserting product record");

        let result = sqlx::query(
            r#"
            INSERT INTO product_records (
                last_update_date, purchase_price_cents, sale_price_cents, product_id
            ) VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(record.last_update_date)
        .bind(record.purchase_price_cents)
        .bind(record.sale_price_cents)
        .bind(record.product_id)
        .execute(&self.pool)
        .await?;

        Ok(ProductRecord {
            id: result.last_insert_rowid(),
            ..record.clone()
        })
    }

    /// Gets a product record by ID.
    pub async fn get_record(&self, id: i64) -> DbResult<Option<ProductRecord>> {
        let record = sqlx::query_as::<_, ProductRecord>(
            r#"
            SELECT id, last_update_date, purchase_price_cents, sale_price_cents, product_id
            FROM product_records
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
