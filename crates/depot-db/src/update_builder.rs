//! # Sparse UPDATE Builder
//!
//! Generates a parameterized `UPDATE` from a sparse field map.
//!
//! ## Lock-Step Invariant
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fields (HashMap, unordered)      field_order (canonical)              │
//! │  { warehouse_id: 2,               [ section_number,                    │
//! │    current_capacity: 40,            current_temperature,               │
//! │    bogus: 1 }                       ...                                │
//! │                                     current_capacity,                  │
//! │                                     ...                                │
//! │                                     warehouse_id, ... ]                │
//! │                    │                        │                          │
//! │                    └──────────┬─────────────┘                          │
//! │                               ▼ walk field_order, keep names in fields │
//! │  sql:  UPDATE sections SET current_capacity = ?, warehouse_id = ?      │
//! │        WHERE id = ?                                                    │
//! │  args: [ 40,                  2,                 7 ]                   │
//! │          └── SET args, same order as placeholders ──┘ └ WHERE args ┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Names not in `field_order` (`bogus` above) are never emitted, so column
//! names in the SQL text always come from a fixed list.

use depot_core::{FieldMap, FieldValue};
use sqlx::query::Query;
use sqlx::sqlite::{Sqlite, SqliteArguments};

/// SQL text plus its positional arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltUpdate {
    pub sql: String,
    pub args: Vec<FieldValue>,
}

impl BuiltUpdate {
    /// Number of `?` placeholders in the SQL text.
    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }
}

/// Builds `UPDATE <table> SET a = ?, b = ? WHERE <where_clause>`.
///
/// Only names present in both `fields` and `field_order` are emitted, in
/// `field_order` sequence. `where_args` follow the SET arguments.
///
/// An empty `fields` map still produces a statement, with an empty SET list.
/// It is not executable; callers must check [`set_count`] first.
pub fn build_update(
    table: &str,
    fields: &FieldMap,
    field_order: &[&str],
    where_clause: &str,
    where_args: Vec<FieldValue>,
) -> BuiltUpdate {
    let mut assignments = Vec::with_capacity(fields.len());
    let mut args = Vec::with_capacity(fields.len() + where_args.len());

    for name in field_order {
        if let Some(value) = fields.get(*name) {
            assignments.push(format!("{name} = ?"));
            args.push(value.clone());
        }
    }
    args.extend(where_args);

    BuiltUpdate {
        sql: format!(
            "UPDATE {table} SET {} WHERE {where_clause}",
            assignments.join(", ")
        ),
        args,
    }
}

/// Number of assignments [`build_update`] would emit.
pub fn set_count(fields: &FieldMap, field_order: &[&str]) -> usize {
    field_order
        .iter()
        .filter(|name| fields.contains_key(**name))
        .count()
}

/// Builds `a IS NOT ? OR b IS NOT ?` over the emitted fields.
///
/// Appended to the WHERE clause, it makes an UPDATE whose values already
/// match the stored row report zero affected rows. SQLite otherwise counts
/// every row matched by the WHERE clause. `IS NOT` treats NULLs as equal.
pub fn changed_guard(fields: &FieldMap, field_order: &[&str]) -> (String, Vec<FieldValue>) {
    let mut terms = Vec::new();
    let mut args = Vec::new();

    for name in field_order {
        if let Some(value) = fields.get(*name) {
            terms.push(format!("{name} IS NOT ?"));
            args.push(value.clone());
        }
    }

    (terms.join(" OR "), args)
}

// =============================================================================
// Binding
// =============================================================================

/// Binds positional arguments onto a SQLite query in order.
pub fn bind_args<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    args: &[FieldValue],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for arg in args {
        query = match arg {
            FieldValue::Null => query.bind(None::<i64>),
            FieldValue::Bool(v) => query.bind(*v),
            FieldValue::Integer(v) => query.bind(*v),
            FieldValue::Real(v) => query.bind(*v),
            FieldValue::Text(v) => query.bind(v.clone()),
        };
    }
    query
}

// =============================================================================
// Unit Tests
// =============================================================================
