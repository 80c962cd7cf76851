//! # Order Writer
//!
//! Inserts a purchase order header and its line items in order.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          write_order                                    │
//! │                                                                         │
//! │  HeaderInsertPending                                                   │
//! │    │  insert_header ── Duplicate ──► "order number already exists"     │
//! │    │                ── FK        ──► "buyer does not exist"            │
//! │    │                ── other     ──► TransientDatabaseFailure          │
//! │    ▼                                                                    │
//! │  HeaderInsertedAwaitingID                                              │
//! │    │  no generated id ─────────────► TransientDatabaseFailure          │
//! │    ▼                                                                    │
//! │  LineItemsPending (input order, one at a time)                         │
//! │    │  item.purchase_order_id = header id                               │
//! │    │  insert_line_item ── FK ──► "product record does not exist"       │
//! │    │                   ── other ─► classified, stop at first failure   │
//! │    │  item.id = generated id                                           │
//! │    ▼                                                                    │
//! │  Complete ── order returned with every id populated                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This module never commits. The caller owns the transaction and must roll
//! it back on any error (see `PurchaseOrderRepository::save`).

use async_trait::async_trait;
use depot_core::{OrderLineItem, PurchaseOrder};
use sqlx::SqliteConnection;
use tracing::debug;

use crate::classify::{ClassifiedError, ErrorClassifier};

// =============================================================================
// Statement Seam
// =============================================================================

/// The two INSERTs an order write needs.
///
/// Each returns the generated id, or `None` if the driver did not report one.
#[async_trait]
pub trait OrderStatements: Send {
    async fn insert_header(&mut self, order: &PurchaseOrder) -> Result<Option<i64>, sqlx::Error>;

    async fn insert_line_item(&mut self, item: &OrderLineItem) -> Result<Option<i64>, sqlx::Error>;
}

fn generated_id(rowid: i64) -> Option<i64> {
    (rowid > 0).then_some(rowid)
}

/// Runs directly on a connection; pass `&mut *tx` to stay inside a transaction.
#[async_trait]
impl OrderStatements for SqliteConnection {
    async fn insert_header(&mut self, order: &PurchaseOrder) -> Result<Option<i64>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO purchase_orders (order_number, order_date, tracking_code, buyer_id)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(&order.tracking_code)
        .bind(order.buyer_id)
        .execute(&mut *self)
        .await?;

        Ok(generated_id(result.last_insert_rowid()))
    }

    async fn insert_line_item(&mut self, item: &OrderLineItem) -> Result<Option<i64>, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO order_details (
                cleanliness_status, quantity, temperature,
                product_record_id, purchase_order_id
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&item.cleanliness_status)
        .bind(item.quantity)
        .bind(item.temperature)
        .bind(item.product_record_id)
        .bind(item.purchase_order_id)
        .execute(&mut *self)
        .await?;

        Ok(generated_id(result.last_insert_rowid()))
    }
}

// =============================================================================
// Write
// =============================================================================

/// A driver that reports no generated id broke its protocol; classified
/// like any other driver failure.
fn missing_id(classifier: &dyn ErrorClassifier, what: &str) -> ClassifiedError {
    classifier.classify(sqlx::Error::Protocol(format!(
        "{what} insert reported no generated id"
    )))
}

/// Writes `order` through `statements`, stopping at the first failure.
///
/// On success the header id and every line item id (and back-reference)
/// are filled in, items kept in input order.
pub async fn write_order<S: OrderStatements + ?Sized>(
    statements: &mut S,
    classifier: &dyn ErrorClassifier,
    mut order: PurchaseOrder,
) -> Result<PurchaseOrder, ClassifiedError> {
    debug!(order_number = %order.order_number, items = order.items.len(), "Inserting order header");

    let header_id = match statements.insert_header(&order).await {
        Ok(Some(id)) => id,
        Ok(None) => return Err(missing_id(classifier, "purchase order")),
        Err(err) => {
            let err = match classifier.classify(err) {
                err @ ClassifiedError::Duplicate { .. } => err.with_detail(format!(
                    "order number '{}' already exists",
                    order.order_number
                )),
                err @ ClassifiedError::ForeignKeyViolation { .. } => {
                    err.with_detail(format!("buyer {} does not exist", order.buyer_id))
                }
                other => other,
            };
            return Err(err);
        }
    };
    order.id = header_id;

    for (position, item) in order.items.iter_mut().enumerate() {
        item.purchase_order_id = header_id;

        match statements.insert_line_item(item).await {
            Ok(Some(id)) => item.id = id,
            Ok(None) => return Err(missing_id(classifier, "order line item")),
            Err(err) => {
                debug!(position, product_record_id = item.product_record_id, "Line item insert failed");
                let err = match classifier.classify(err) {
                    err @ ClassifiedError::ForeignKeyViolation { .. } => err.with_detail(format!(
                        "product record {} does not exist",
                        item.product_record_id
                    )),
                    other => other,
                };
                return Err(err);
            }
        }
    }

    Ok(order)
}

// =============================================================================
// Unit Tests
// =============================================================================
