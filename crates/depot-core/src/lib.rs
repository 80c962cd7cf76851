//! # depot-core: Domain Types for the Depot Inventory Backend
//!
//! Pure data definitions and rules shared by every layer. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Depot Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              HTTP handlers / services (external)                │   │
//! │  │    decode JSON ──► validate ──► call repository ──► respond     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────────┐  ┌───────────────┐          │   │
//! │  │   │   types   │  │     patch     │  │  validation   │          │   │
//! │  │   │  Section  │  │  FieldValue   │  │  order rules  │          │   │
//! │  │   │  Order    │  │  SectionPatch │  │  patch rules  │          │   │
//! │  │   └───────────┘  └───────────────┘  └───────────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    depot-db (Database Layer)                    │   │
//! │  │     error classifier, UPDATE builder, patch + order workflows   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//! ```rust
//! use depot_core::{SectionPatch, SECTION_FIELDS};
//!
//! let patch = SectionPatch {
//!     current_capacity: Some(40),
//!     ..Default::default()
//! };
//!
//! let fields = patch.into_fields();
//! assert_eq!(fields.len(), 1);
//! assert!(SECTION_FIELDS.contains(&"current_capacity"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod patch;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use patch::{FieldMap, FieldValue, SectionPatch, SECTION_FIELDS};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items accepted in a single purchase order.
///
/// ## Business Reason
/// Every item is a separate INSERT inside one transaction. An upper bound
/// keeps the write lock held by a single order short.
pub const MAX_ORDER_ITEMS: usize = 500;

/// Maximum quantity of a single line item.
pub const MAX_ITEM_QUANTITY: i64 = 100_000;
