//! # Sparse Patches
//!
//! A sparse patch names only the fields a caller wants to change.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     From Request to Field Map                          │
//! │                                                                         │
//! │  {"current_capacity": 40, "warehouse_id": 2}                           │
//! │       │  serde                                                          │
//! │       ▼                                                                 │
//! │  SectionPatch { current_capacity: Some(40), warehouse_id: Some(2),     │
//! │                 ..None }                                                │
//! │       │  into_fields()                                                  │
//! │       ▼                                                                 │
//! │  FieldMap { "current_capacity" → Integer(40),                           │
//! │             "warehouse_id"     → Integer(2) }                           │
//! │       │  + SECTION_FIELDS (canonical order)                             │
//! │       ▼                                                                 │
//! │  UPDATE sections SET current_capacity = ?, warehouse_id = ? ...        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A [`FieldMap`] is a `HashMap`, so its iteration order is unspecified.
//! SQL text must always be generated by walking a canonical ordering such as
//! [`SECTION_FIELDS`], never by iterating the map.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Field Values
// =============================================================================

/// A single column value carried by a sparse patch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "NULL"),
            FieldValue::Bool(v) => write!(f, "{v}"),
            FieldValue::Integer(v) => write!(f, "{v}"),
            FieldValue::Real(v) => write!(f, "{v}"),
            FieldValue::Text(v) => write!(f, "'{v}'"),
        }
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Real(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

/// Column name → new value. Absent columns are left untouched.
pub type FieldMap = HashMap<String, FieldValue>;

// =============================================================================
// Section Patch
// =============================================================================

/// Canonical column order for section patches.
///
/// Placeholders and positional arguments are generated by walking this
/// list, which keeps them in lock-step regardless of map iteration order.
pub const SECTION_FIELDS: &[&str] = &[
    "section_number",
    "current_temperature",
    "minimum_temperature",
    "current_capacity",
    "minimum_capacity",
    "maximum_capacity",
    "warehouse_id",
    "product_type_id",
];

/// Typed sparse patch for a [`Section`](crate::Section).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub section_number: Option<i64>,
    #[serde(default)]
    pub current_temperature: Option<f64>,
    #[serde(default)]
    pub minimum_temperature: Option<f64>,
    #[serde(default)]
    pub current_capacity: Option<i64>,
    #[serde(default)]
    pub minimum_capacity: Option<i64>,
    #[serde(default)]
    pub maximum_capacity: Option<i64>,
    #[serde(default)]
    pub warehouse_id: Option<i64>,
    #[serde(default)]
    pub product_type_id: Option<i64>,
}

impl SectionPatch {
    /// Converts the patch into a field map holding only the set fields.
    pub fn into_fields(self) -> FieldMap {
        let mut fields = FieldMap::new();
        let mut put = |name: &str, value: Option<FieldValue>| {
            if let Some(value) = value {
                fields.insert(name.to_string(), value);
            }
        };

        put("section_number", self.section_number.map(Into::into));
        put("current_temperature", self.current_temperature.map(Into::into));
        put("minimum_temperature", self.minimum_temperature.map(Into::into));
        put("current_capacity", self.current_capacity.map(Into::into));
        put("minimum_capacity", self.minimum_capacity.map(Into::into));
        put("maximum_capacity", self.maximum_capacity.map(Into::into));
        put("warehouse_id", self.warehouse_id.map(Into::into));
        put("product_type_id", self.product_type_id.map(Into::into));

        fields
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
