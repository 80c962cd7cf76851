//! # Purchase Order Repository
//!
//! Saves an order header and its line items as one unit.
//!
//! ## Transaction Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  validate_purchase_order                                                │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  BEGIN ──► INSERT purchase_orders ──► header id                         │
//! │                 │                         │                             │
//! │                 │            for each item: INSERT order_details        │
//! │                 │                         │                             │
//! │           any failure ──► ROLLBACK        └── all ok ──► COMMIT         │
//! │                                                                         │
//! │  Either the header and every item are visible, or nothing is.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::classify;
use crate::error::DbResult;
use crate::order_writer::write_order;
use depot_core::validation::validate_purchase_order;
use depot_core::{OrderLineItem, PurchaseOrder};

/// Repository for purchase order database operations.
#[derive(Debug, Clone)]
pub struct PurchaseOrderRepository {
    pool: SqlitePool,
}

impl PurchaseOrderRepository {
    /// Creates a new PurchaseOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PurchaseOrderRepository { pool }
    }

    /// Saves `order` with all of its line items in one transaction.
    ///
    /// Returns the order with the header id, item ids and item
    /// back-references filled in.
    ///
    /// ## Returns
    /// * `Err(Validation)` - rejected before any SQL ran
    /// * `Err(Duplicate)` - order number already exists
    /// * `Err(ForeignKeyViolation)` - unknown buyer or product record
    pub async fn save(&self, order: PurchaseOrder) -> DbResult<PurchaseOrder> {
        validate_purchase_order(&order)?;

        let order_number = order.order_number.clone();
        let mut tx = self.pool.begin().await?;

        match write_order(&mut *tx, classify::sqlite(), order).await {
            Ok(saved) => {
                tx.commit().await?;
                info!(
                    id = saved.id,
                    order_number = %saved.order_number,
                    items = saved.items.len(),
                    "Purchase order saved"
                );
                Ok(saved)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(%order_number, error = %rollback_err, "Rollback failed");
                }
                Err(err.into())
            }
        }
    }

    /// Gets an order with its line items in insertion order.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<PurchaseOrder>> {
        let header = sqlx::query_as::<_, PurchaseOrder>(
            r#"
            SELECT id, order_number, order_date, tracking_code, buyer_id
            FROM purchase_orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut order) = header else {
            return Ok(None);
        };

        order.items = sqlx::query_as::<_, OrderLineItem>(
            r#"
            SELECT id, cleanliness_status, quantity, temperature,
                   product_record_id, purchase_order_id
            FROM order_details
            WHERE purchase_order_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(order))
    }

    /// Number of orders placed by a buyer.
    pub async fn count_by_buyer(&self, buyer_id: i64) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders WHERE buyer_id = ?1")
                .bind(buyer_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifiedError;
    use crate::error::DbError;
    use crate::repository::fixtures::{order, seeded};

    async fn line_item_count(db: &crate::pool::Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM order_details")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn header_count(db: &crate::pool::Database) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM purchase_orders")
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_generated_ids() {
        let (db, seed) = seeded().await;
        sqlx::query("INSERT INTO sqlite_sequence (name, seq) VALUES ('purchase_orders', 20)")
            .execute(db.pool())
            .await
            .unwrap();
        sqlx::query("INSERT INTO sqlite_sequence (name, seq) VALUES ('order_details', 30)")
            .execute(db.pool())
            .await
            .unwrap();

        let saved = db
            .purchase_orders()
            .save(order(
                "PO-1",
                seed.buyer_id,
                vec![
                    OrderLineItem::new("clean", 5, -18.0, seed.product_record_id),
                    OrderLineItem::new("clean", 3, -17.5, seed.product_record_id),
                ],
            ))
            .await
            .unwrap();

        assert_eq!(saved.id, 21);
        let ids: Vec<i64> = saved.items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![31, 32]);
        assert!(saved.items.iter().all(|item| item.purchase_order_id == 21));

        let loaded = db.purchase_orders().get_by_id(21).await.unwrap();
        assert_eq!(loaded, Some(saved));
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_header() {
        let (db, seed) = seeded().await;

        let err = db
            .purchase_orders()
            .save(order(
                "PO-1",
                seed.buyer_id,
                vec![
                    OrderLineItem::new("clean", 5, -18.0, seed.product_record_id),
                    OrderLineItem::new("clean", 3, -18.0, 999),
                ],
            ))
            .await
            .unwrap_err();

        match err.classified() {
            Some(ClassifiedError::ForeignKeyViolation { detail }) => {
                assert!(detail.contains("999"));
            }
            other => panic!("expected ForeignKeyViolation, got {other:?}"),
        }
        assert_eq!(db.purchase_orders().count_by_buyer(seed.buyer_id).await.unwrap(), 0);
        assert_eq!(line_item_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_check_violation_rolls_back_header() {
        let (db, seed) = seeded().await;

        // Quantity 0 passes no validation here; the CHECK constraint rejects it.
        let mut tx = db.pool().begin().await.unwrap();
        let err = write_order(
            &mut *tx,
            classify::sqlite(),
            order(
                "PO-1",
                seed.buyer_id,
                vec![
                    OrderLineItem::new("clean", 5, -18.0, seed.product_record_id),
                    OrderLineItem::new("clean", 0, -18.0, seed.product_record_id),
                ],
            ),
        )
        .await
        .unwrap_err();
        tx.rollback().await.unwrap();

        assert!(matches!(err, ClassifiedError::TransientDatabaseFailure(_)));
        assert_eq!(header_count(&db).await, 0);
        assert_eq!(line_item_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_non_constraint_item_failure_rolls_back_save() {
        let (db, seed) = seeded().await;
        sqlx::query(
            r#"
            CREATE TRIGGER reject_thirteen BEFORE INSERT ON order_details
            WHEN NEW.quantity = 13
            BEGIN
                SELECT RAISE(ABORT, 'quantity 13 rejected');
            END
            "#,
        )
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .purchase_orders()
            .save(order(
                "PO-1",
                seed.buyer_id,
                vec![
                    OrderLineItem::new("clean", 5, -18.0, seed.product_record_id),
                    OrderLineItem::new("clean", 13, -18.0, seed.product_record_id),
                ],
            ))
            .await
            .unwrap_err();

        assert!(matches!(
            err.classified(),
            Some(ClassifiedError::TransientDatabaseFailure(_))
        ));
        assert_eq!(header_count(&db).await, 0);
        assert_eq!(line_item_count(&db).await, 0);
    }

    #[tokio::test]
    async fn test_duplicate_order_number() {
        let (db, seed) = seeded().await;
        let repo = db.purchase_orders();
        let item = || OrderLineItem::new("clean", 1, -18.0, seed.product_record_id);

        let first = repo
            .save(order("PO-1", seed.buyer_id, vec![item()]))
            .await
            .unwrap();

        let err = repo
            .save(order("PO-1", seed.buyer_id, vec![item(), item()]))
            .await
            .unwrap_err();

        assert!(matches!(
            err.classified(),
            Some(ClassifiedError::Duplicate { .. })
        ));
        assert_eq!(repo.count_by_buyer(seed.buyer_id).await.unwrap(), 1);
        assert_eq!(line_item_count(&db).await, 1);
        assert_eq!(repo.get_by_id(first.id).await.unwrap(), Some(first));
    }

    #[tokio::test]
    async fn test_unknown_buyer() {
        let (db, seed) = seeded().await;

        let err = db
            .purchase_orders()
            .save(order(
                "PO-1",
                999,
                vec![OrderLineItem::new("clean", 1, -18.0, seed.product_record_id)],
            ))
            .await
            .unwrap_err();

        match err.classified() {
            Some(ClassifiedError::ForeignKeyViolation { detail }) => {
                assert_eq!(detail, "buyer 999 does not exist");
            }
            other => panic!("expected ForeignKeyViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_order_without_items_is_rejected() {
        let (db, seed) = seeded().await;

        let err = db
            .purchase_orders()
            .save(order("PO-1", seed.buyer_id, vec![]))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(db.purchase_orders().count_by_buyer(seed.buyer_id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_missing_order() {
        let (db, _) = seeded().await;
        assert_eq!(db.purchase_orders().get_by_id(1).await.unwrap(), None);
    }
}
