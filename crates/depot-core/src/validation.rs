//! # Validation Module
//!
//! Business-rule checks that run before any SQL is issued.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API layer (external)                                         │
//! │  └── JSON decoding, field presence                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Orders: item count, quantities, business keys                     │
//! │  └── Section patches: capacity bounds                                  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── UNIQUE constraints      → ClassifiedError::Duplicate              │
//! │  └── Foreign key constraints → ClassifiedError::ForeignKeyViolation    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use depot_core::validation::{validate_order_number, validate_quantity};
//!
//! validate_order_number("PO-1").unwrap();
//! validate_quantity(5).unwrap();
//! ```

use crate::error::ValidationError;
use crate::patch::SectionPatch;
use crate::types::{OrderLineItem, PurchaseOrder};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

fn validate_key(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.len() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a purchase order number.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
///
/// ## Example
/// ```rust
/// use depot_core::validation::validate_order_number;
///
/// assert!(validate_order_number("PO-1").is_ok());
/// assert!(validate_order_number("  ").is_err());
/// ```
pub fn validate_order_number(order_number: &str) -> ValidationResult<()> {
    validate_key("order_number", order_number, 50)
}

/// Validates a shipment tracking code.
pub fn validate_tracking_code(tracking_code: &str) -> ValidationResult<()> {
    validate_key("tracking_code", tracking_code, 100)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// Order Validators
// =============================================================================

fn validate_line_item(item: &OrderLineItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_key("cleanliness_status", &item.cleanliness_status, 50)?;

    if item.product_record_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "product_record_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a purchase order and all its line items.
///
/// ## Rules
/// - Order number and tracking code present
/// - Buyer reference positive
/// - Between 1 and [`MAX_ORDER_ITEMS`] line items
/// - Every line item has a positive quantity and product record reference
///
/// Existence of the referenced buyer and product records is left to the
/// database's foreign keys.
pub fn validate_purchase_order(order: &PurchaseOrder) -> ValidationResult<()> {
    validate_order_number(&order.order_number)?;
    validate_tracking_code(&order.tracking_code)?;

    if order.buyer_id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "buyer_id".to_string(),
        });
    }

    if order.items.is_empty() {
        return Err(ValidationError::TooFew {
            field: "items".to_string(),
            min: 1,
        });
    }

    if order.items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::TooMany {
            field: "items".to_string(),
            max: MAX_ORDER_ITEMS,
        });
    }

    order.items.iter().try_for_each(validate_line_item)
}

// =============================================================================
// Patch Validators
// =============================================================================

/// Validates the fields present in a section patch.
///
/// Only checks what the patch itself carries. A patch that sets
/// `minimum_capacity` alone is not compared against the stored maximum.
pub fn validate_section_patch(patch: &SectionPatch) -> ValidationResult<()> {
    let capacities = [
        ("current_capacity", patch.current_capacity),
        ("minimum_capacity", patch.minimum_capacity),
        ("maximum_capacity", patch.maximum_capacity),
    ];
    for (field, value) in capacities {
        if matches!(value, Some(v) if v < 0) {
            return Err(ValidationError::OutOfRange {
                field: field.to_string(),
                min: 0,
                max: i64::MAX,
            });
        }
    }

    if let (Some(min), Some(max)) = (patch.minimum_capacity, patch.maximum_capacity) {
        if min > max {
            return Err(ValidationError::Inconsistent {
                field: "minimum_capacity".to_string(),
                reason: "exceeds maximum_capacity".to_string(),
            });
        }
    }

    let references = [
        ("section_number", patch.section_number),
        ("warehouse_id", patch.warehouse_id),
        ("product_type_id", patch.product_type_id),
    ];
    for (field, value) in references {
        if matches!(value, Some(v) if v <= 0) {
            return Err(ValidationError::MustBePositive {
                field: field.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
