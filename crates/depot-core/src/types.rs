//! # Core Types
//!
//! Entity definitions for the inventory backend.
//!
//! ## Entity Relationships
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Entity Relationships                             │
//! │                                                                         │
//! │  ┌─────────────┐        ┌─────────────┐        ┌─────────────────┐     │
//! │  │  Warehouse  │ 1    * │   Section   │ *    1 │   ProductType   │     │
//! │  └─────────────┘────────└─────────────┘────────└─────────────────┘     │
//! │                                                         │ 1             │
//! │                                                         │ *             │
//! │  ┌─────────────┐        ┌───────────────┐      ┌─────────────────┐     │
//! │  │    Buyer    │        │ ProductRecord │ *  1 │     Product     │     │
//! │  └──────┬──────┘        └───────┬───────┘──────└─────────────────┘     │
//! │         │ 1                     │ 1                                     │
//! │         │ *                     │ *                                     │
//! │  ┌──────┴────────┐ 1    * ┌─────┴─────────┐                            │
//! │  │ PurchaseOrder │────────│ OrderLineItem │                            │
//! │  │   (header)    │        │ (order_details)│                           │
//! │  └───────────────┘        └───────────────┘                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has an integer `id` assigned by the store on insert.
//! Before insert the field holds `0`. Business keys (`order_number`,
//! `section_number`, `warehouse_code`, ...) are unique per table.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Warehouse
// =============================================================================

/// A physical warehouse. Sections belong to exactly one warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    pub id: i64,
    /// Unique business code, e.g. `"WH-01"`.
    pub warehouse_code: String,
    pub address: String,
    pub telephone: String,
    pub minimum_capacity: i64,
    pub minimum_temperature: f64,
}

// =============================================================================
// Product Type
// =============================================================================

/// Storage category (frozen, refrigerated, dry, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductType {
    pub id: i64,
    pub description: String,
}

// =============================================================================
// Product
// =============================================================================

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    /// Unique business code.
    pub product_code: String,
    pub description: String,
    pub product_type_id: i64,
}

// =============================================================================
// Product Record
// =============================================================================

/// A price snapshot of a product. Order line items reference records,
/// not products, so the price an order was placed at stays reachable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductRecord {
    pub id: i64,
    pub last_update_date: DateTime<Utc>,
    /// Purchase price in cents.
    pub purchase_price_cents: i64,
    /// Sale price in cents.
    pub sale_price_cents: i64,
    pub product_id: i64,
}

// =============================================================================
// Buyer
// =============================================================================

/// A buyer placing purchase orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Buyer {
    pub id: i64,
    /// Unique card number identifying the buyer.
    pub card_number_id: String,
    pub first_name: String,
    pub last_name: String,
}

// =============================================================================
// Section
// =============================================================================

/// A storage section inside a warehouse.
///
/// Sections are the patchable entity: every field except `id` can be
/// changed through a [`SectionPatch`](crate::SectionPatch).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Section {
    pub id: i64,
    /// Unique business number.
    pub section_number: i64,
    pub current_temperature: f64,
    pub minimum_temperature: f64,
    pub current_capacity: i64,
    pub minimum_capacity: i64,
    pub maximum_capacity: i64,
    pub warehouse_id: i64,
    pub product_type_id: i64,
}

// =============================================================================
// Purchase Order
// =============================================================================

/// A purchase order header together with its ordered line items.
///
/// The header and its items are written as one unit: either every row
/// exists afterwards or none does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PurchaseOrder {
    /// Assigned by the store on insert, `0` before.
    pub id: i64,
    /// Unique business key, e.g. `"PO-1"`.
    pub order_number: String,
    pub order_date: NaiveDate,
    pub tracking_code: String,
    pub buyer_id: i64,
    /// Line items in input order. Must not be empty.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    #[serde(default)]
    pub items: Vec<OrderLineItem>,
}

impl PurchaseOrder {
    /// Creates an unsaved order.
    pub fn new(
        order_number: impl Into<String>,
        order_date: NaiveDate,
        tracking_code: impl Into<String>,
        buyer_id: i64,
        items: Vec<OrderLineItem>,
    ) -> Self {
        PurchaseOrder {
            id: 0,
            order_number: order_number.into(),
            order_date,
            tracking_code: tracking_code.into(),
            buyer_id,
            items,
        }
    }

    /// Total quantity across all line items.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}

// =============================================================================
// Order Line Item
// =============================================================================

/// One line of a purchase order (stored in `order_details`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLineItem {
    /// Assigned by the store on insert, `0` before.
    pub id: i64,
    /// Free-form inspection status, e.g. `"clean"`.
    pub cleanliness_status: String,
    pub quantity: i64,
    /// Temperature reading at reception.
    pub temperature: f64,
    pub product_record_id: i64,
    /// Owning header. Only known once the header row is persisted.
    #[serde(default)]
    pub purchase_order_id: i64,
}

impl OrderLineItem {
    /// Creates an unsaved line item.
    pub fn new(
        cleanliness_status: impl Into<String>,
        quantity: i64,
        temperature: f64,
        product_record_id: i64,
    ) -> Self {
        OrderLineItem {
            id: 0,
            cleanliness_status: cleanliness_status.into(),
            quantity,
            temperature,
            product_record_id,
            purchase_order_id: 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    #[test]
    fn test_new_order_is_unsaved() {
        let order = PurchaseOrder::new(
            "PO-1",
            date(),
            "TRK-1",
            7,
            vec![OrderLineItem::new("clean", 3, 4.5, 11)],
        );

        assert_eq!(order.id, 0);
        assert_eq!(order.items[0].id, 0);
        assert_eq!(order.items[0].purchase_order_id, 0);
    }

    #[test]
    fn test_total_quantity() {
        let order = PurchaseOrder::new(
            "PO-2",
            date(),
            "TRK-2",
            7,
            vec![
                OrderLineItem::new("clean", 3, 4.5, 11),
                OrderLineItem::new("dirty", 5, 2.0, 12),
            ],
        );

        assert_eq!(order.total_quantity(), 8);
    }

    #[test]
    fn test_order_deserializes_without_ids() {
        let json = r#"{
            "id": 0,
            "order_number": "PO-3",
            "order_date": "2024-03-01",
            "tracking_code": "TRK-3",
            "buyer_id": 2,
            "items": [
                {"id": 0, "cleanliness_status": "clean", "quantity": 1,
                 "temperature": 3.0, "product_record_id": 9}
            ]
        }"#;

        let order: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_date, date());
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].purchase_order_id, 0);
    }
}
