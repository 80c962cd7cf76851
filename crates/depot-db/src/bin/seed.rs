//! # Seed Data Generator
//!
//! Populates a database with a small, consistent data set for development:
//! warehouses with sections, priced products, buyers and one sample order.
//!
//! ## Usage
//! ```bash
//! # Seed ./depot.db (or DEPOT_DB_PATH)
//! cargo run -p depot-db --bin seed
//!
//! # Specify database path
//! cargo run -p depot-db --bin seed -- --db ./data/depot_dev.db
//! ```
//!
//! Running it twice is harmless: an already seeded database is left alone.

use chrono::{NaiveDate, Utc};
use std::env;
use tracing::info;
use tracing_subscriber::EnvFilter;

use depot_core::{
    Buyer, OrderLineItem, Product, ProductRecord, PurchaseOrder, Section, SectionPatch, Warehouse,
};
use depot_db::{Database, DbConfig};

/// (warehouse code, address, minimum temperature)
const WAREHOUSES: &[(&str, &str, f64)] = &[
    ("WH-NORTH", "12 Quay Street", -25.0),
    ("WH-SOUTH", "400 Harbour Road", 2.0),
];

/// (product type, [(code, description, purchase cents, sale cents)])
const CATALOG: &[(&str, &[(&str, &str, i64, i64)])] = &[
    (
        "frozen",
        &[
            ("FRZ-001", "Garden Peas 1kg", 180, 329),
            ("FRZ-002", "Vanilla Ice Cream 2L", 310, 599),
            ("FRZ-003", "Fish Fillets 500g", 420, 749),
        ],
    ),
    (
        "chilled",
        &[
            ("CHL-001", "Whole Milk 2L", 95, 189),
            ("CHL-002", "Greek Yogurt 500g", 140, 279),
        ],
    ),
];

const BUYERS: &[(&str, &str, &str)] = &[
    ("CARD-1001", "Ines", "Moreau"),
    ("CARD-1002", "Tomas", "Okafor"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();
    let mut config = DbConfig::from_env()?;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    config.database_path = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Depot Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: DEPOT_DB_PATH or ./depot.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Depot Seed Data Generator");
    println!("=========================");
    println!("Database: {}", config.database_path.display());
    println!();

    let db = Database::new(config).await?;

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("Database already has {} products, skipping seed.", existing);
        println!("Delete the database file to regenerate.");
        return Ok(());
    }

    // Warehouses
    let mut warehouse_ids = Vec::new();
    for (code, address, minimum_temperature) in WAREHOUSES {
        let warehouse = db
            .warehouses()
            .insert(&Warehouse {
                id: 0,
                warehouse_code: code.to_string(),
                address: address.to_string(),
                telephone: "555-0100".to_string(),
                minimum_capacity: 50,
                minimum_temperature: *minimum_temperature,
            })
            .await?;
        warehouse_ids.push(warehouse.id);
    }

    // Product types, products and their current price record
    let mut type_ids = Vec::new();
    let mut record_ids = Vec::new();
    for (type_name, products) in CATALOG {
        let kind = db.products().insert_type(type_name).await?;
        type_ids.push(kind.id);

        for (code, description, purchase_price_cents, sale_price_cents) in products.iter() {
            let product = db
                .products()
                .insert(&Product {
                    id: 0,
                    product_code: code.to_string(),
                    description: description.to_string(),
                    product_type_id: kind.id,
                })
                .await?;
            let record = db
                .products()
                .insert_record(&ProductRecord {
                    id: 0,
                    last_update_date: Utc::now(),
                    purchase_price_cents: *purchase_price_cents,
                    sale_price_cents: *sale_price_cents,
                    product_id: product.id,
                })
                .await?;
            record_ids.push(record.id);
        }
    }
    println!("✓ {} products priced", record_ids.len());

    // Two sections per warehouse, one per product type
    let mut section_ids = Vec::new();
    let mut section_number = 100;
    for (warehouse_id, (_, _, minimum_temperature)) in warehouse_ids.iter().zip(WAREHOUSES) {
        for type_id in &type_ids {
            section_number += 1;
            let section = db
                .sections()
                .insert(&Section {
                    id: 0,
                    section_number,
                    current_temperature: minimum_temperature + 3.0,
                    minimum_temperature: *minimum_temperature,
                    current_capacity: 0,
                    minimum_capacity: 10,
                    maximum_capacity: 500,
                    warehouse_id: *warehouse_id,
                    product_type_id: *type_id,
                })
                .await?;
            section_ids.push(section.id);
        }
    }
    println!("✓ {} sections in {} warehouses", section_ids.len(), warehouse_ids.len());

    let mut buyer_ids = Vec::new();
    for (card_number_id, first_name, last_name) in BUYERS {
        let buyer = db
            .buyers()
            .insert(&Buyer {
                id: 0,
                card_number_id: card_number_id.to_string(),
                first_name: first_name.to_string(),
                last_name: last_name.to_string(),
            })
            .await?;
        buyer_ids.push(buyer.id);
    }

    // Sample order and a section restock
    let order_date = NaiveDate::from_ymd_opt(2024, 5, 1).ok_or("invalid order date")?;
    let items = record_ids
        .iter()
        .take(3)
        .map(|record_id| OrderLineItem::new("clean", 24, -18.0, *record_id))
        .collect();
    let order = db
        .purchase_orders()
        .save(PurchaseOrder::new("PO-0001", order_date, "TRK-0001", buyer_ids[0], items))
        .await?;
    println!(
        "✓ Order {} saved with {} items ({} units)",
        order.order_number,
        order.items.len(),
        order.total_quantity()
    );

    let restocked = db
        .sections()
        .patch(
            section_ids[0],
            SectionPatch {
                current_capacity: Some(order.total_quantity()),
                ..Default::default()
            },
        )
        .await?
        .into_entity();
    info!(
        section_number = restocked.section_number,
        capacity = restocked.current_capacity,
        "Section restocked"
    );

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,depot=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .init();
}
