//! # Repository Module
//!
//! Database repository implementations for Depot.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  Service layer (external)                                              │
//! │       │                                                                 │
//! │       │  db.sections().patch(4, patch)                                 │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  SectionRepository                                                     │
//! │  ├── insert(&self, section)                                            │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── list_by_warehouse(&self, warehouse_id)                            │
//! │  └── patch(&self, id, patch) ──► PatchWorkflow                         │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • Easy to test (mock the repository)                                  │
//! │  • SQL is isolated in one place                                        │
//! │  • Can swap database implementations                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`WarehouseRepository`](warehouse::WarehouseRepository) - Warehouses
//! - [`ProductRepository`](product::ProductRepository) - Product types, products, product records
//! - [`BuyerRepository`](buyer::BuyerRepository) - Buyers
//! - [`SectionRepository`](section::SectionRepository) - Sections and sparse patches
//! - [`PurchaseOrderRepository`](purchase_order::PurchaseOrderRepository) - Transactional order writes

pub mod buyer;
pub mod product;
pub mod purchase_order;
pub mod section;
pub mod warehouse;

#[cfg(test)]
pub(crate) mod fixtures;
