//! # depot-db: Database Layer for Depot
//!
//! SQLite persistence for warehouses, sections and purchase orders, plus
//! the driver-agnostic pieces the repositories are built from.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot Data Flow                                │
//! │                                                                         │
//! │  Handler (PATCH /sections/:id, POST /purchase-orders)                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     depot-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ SectionRepo   │    │  (embedded)  │  │   │
//! │  │   │               │    │ PurchaseOrder │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └──────┬────────┘    └──────────────┘  │   │
//! │  │                               │                                │   │
//! │  │   ┌───────────────┐    ┌──────▼────────┐    ┌──────────────┐  │   │
//! │  │   │ update_builder│◄───│ patch /       │───►│  classify    │  │   │
//! │  │   │ sparse UPDATE │    │ order_writer  │    │ driver codes │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`config`] - `DEPOT_DB_*` environment loading
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`classify`] - Driver error normalization
//! - [`update_builder`] - Sparse `UPDATE` statement generation
//! - [`patch`] - Partial update with read-back
//! - [`order_writer`] - Header + line item inserts
//! - [`repository`] - Repository implementations (section, purchase order, etc.)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use depot_db::{Database, DbConfig};
//! use depot_core::SectionPatch;
//!
//! let db = Database::new(DbConfig::from_env()?).await?;
//!
//! let outcome = db
//!     .sections()
//!     .patch(7, SectionPatch { current_capacity: Some(40), ..Default::default() })
//!     .await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod classify;
pub mod config;
pub mod error;
pub mod migrations;
pub mod order_writer;
pub mod patch;
pub mod pool;
pub mod repository;
pub mod update_builder;

#[cfg(test)]
mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use classify::{ClassifiedError, CodeTableClassifier, Constraint, ErrorClassifier};
pub use config::ConfigError;
pub use error::{DbError, DbResult};
pub use migrations::MigrationStatus;
pub use order_writer::{write_order, OrderStatements};
pub use patch::{PatchOutcome, PatchStore, PatchWorkflow};
pub use pool::{Database, DbConfig};
pub use update_builder::{build_update, BuiltUpdate};

// Repository re-exports for convenience
pub use repository::buyer::BuyerRepository;
pub use repository::product::ProductRepository;
pub use repository::purchase_order::PurchaseOrderRepository;
pub use repository::section::SectionRepository;
pub use repository::warehouse::WarehouseRepository;
