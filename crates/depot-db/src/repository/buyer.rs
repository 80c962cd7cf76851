//! # Buyer Repository

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use depot_core::Buyer;

/// Repository for buyer database operations.
#[derive(Debug, Clone)]
pub struct BuyerRepository {
    pool: SqlitePool,
}

impl BuyerRepository {
    /// Creates a new BuyerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BuyerRepository { pool }
    }

    /// Inserts a buyer.
    ///
    /// ## Returns
    /// * `Err(Duplicate)` - card number already registered
    pub async fn insert(&self, buyer: &Buyer) -> DbResult<Buyer> {
        debug!(card_number_id = %buyer.card_number_id, "Inserting buyer");

        let result = sqlx::query(
            r#"
            INSERT INTO buyers (card_number_id, first_name, last_name)
            VALUES (?1, ?2, ?3)
            "#,
        )
        .bind(&buyer.card_number_id)
        .bind(&buyer.first_name)
        .bind(&buyer.last_name)
        .execute(&self.pool)
        .await?;

        Ok(Buyer {
            id: result.last_insert_rowid(),
            ..buyer.clone()
        })
    }

    /// Gets a buyer by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Buyer>> {
        let buyer = sqlx::query_as::<_, Buyer>(
            "SELECT id, card_number_id, first_name, last_name FROM buyers WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(buyer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures::buyer;

    #[tokio::test]
    async fn test_insert_and_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let saved = db.buyers().insert(&buyer("CARD-1")).await.unwrap();
        let loaded = db.buyers().get_by_id(saved.id).await.unwrap();

        assert_eq!(loaded, Some(saved));
        assert_eq!(db.buyers().get_by_id(999).await.unwrap(), None);
    }
}
