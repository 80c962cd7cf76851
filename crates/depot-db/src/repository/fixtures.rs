//! Test rows shared by the repository tests.

use chrono::{NaiveDate, TimeZone, Utc};
use depot_core::{Buyer, OrderLineItem, Product, ProductRecord, PurchaseOrder, Section, Warehouse};

use crate::pool::{Database, DbConfig};

pub(crate) fn warehouse(code: &str) -> Warehouse {
    Warehouse {
        id: 0,
        warehouse_code: code.to_string(),
        address: "1 Dock Road".to_string(),
        telephone: "555-0100".to_string(),
        minimum_capacity: 10,
        minimum_temperature: -5.0,
    }
}

pub(crate) fn buyer(card_number_id: &str) -> Buyer {
    Buyer {
        id: 0,
        card_number_id: card_number_id.to_string(),
        first_name: "Ada".to_string(),
        last_name: "Byrne".to_string(),
    }
}

pub(crate) fn section(section_number: i64, warehouse_id: i64, product_type_id: i64) -> Section {
    Section {
        id: 0,
        section_number,
        current_temperature: -18.0,
        minimum_temperature: -22.0,
        current_capacity: 40,
        minimum_capacity: 10,
        maximum_capacity: 100,
        warehouse_id,
        product_type_id,
    }
}

pub(crate) fn order(order_number: &str, buyer_id: i64, items: Vec<OrderLineItem>) -> PurchaseOrder {
    PurchaseOrder::new(
        order_number,
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        "TRK-1",
        buyer_id,
        items,
    )
}

/// Ids of the reference rows created by [`seeded`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct Seed {
    pub warehouse_id: i64,
    pub product_type_id: i64,
    pub product_record_id: i64,
    pub buyer_id: i64,
}

/// In-memory database with one warehouse, product type, product record and buyer.
pub(crate) async fn seeded() -> (Database, Seed) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let warehouse = db.warehouses().insert(&warehouse("WH-01")).await.unwrap();
    let kind = db.products().insert_type("frozen").await.unwrap();
    let product = db
        .products()
        .insert(&Product {
            id: 0,
            product_code: "FRZ-001".to_string(),
            description: "Peas".to_string(),
            product_type_id: kind.id,
        })
        .await
        .unwrap();
    let record = db
        .products()
        .insert_record(&ProductRecord {
            id: 0,
            last_update_date: Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap(),
            purchase_price_cents: 450,
            sale_price_cents: 799,
            product_id: product.id,
        })
        .await
        .unwrap();
    let buyer = db.buyers().insert(&buyer("CARD-1")).await.unwrap();

    let seed = Seed {
        warehouse_id: warehouse.id,
        product_type_id: kind.id,
        product_record_id: record.id,
        buyer_id: buyer.id,
    };
    (db, seed)
}
