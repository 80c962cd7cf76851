//! # Patch Workflow
//!
//! Applies a sparse patch and reads the row back.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        PatchWorkflow::run                               │
//! │                                                                         │
//! │  Built ── build_update(table, fields, order, "id = ? AND (guard)")     │
//! │    │                                                                    │
//! │    │ (no recognized fields → Ok(0) without executing anything)          │
//! │    ▼                                                                    │
//! │  Executed ── rows or driver error ──► classifier.classify_rows          │
//! │    │                                                                    │
//! │    ├── Err(Duplicate / FK / ...) ──► returned as is                     │
//! │    ├── Err(NoRowsAffected) ──► fetch_by_id                              │
//! │    │                   ├── RowNotFound ──► Err(NotFound)                │
//! │    │                   ├── other error ──► Err(TransientDatabaseFailure)│
//! │    │                   └── Ok(entity)  ──► Ok(Unchanged(entity, signal))│
//! │    │                                                                    │
//! │    └── Ok(rows) ──► fetch_by_id ──► Ok(Updated(entity))                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The returned entity is always the re-read row, never the patch input.
//! Concurrent patches to one row are last-write-wins; no version tokens.

use async_trait::async_trait;
use depot_core::{FieldMap, FieldValue};
use tracing::debug;

use crate::classify::{ClassifiedError, ErrorClassifier};
use crate::update_builder::{build_update, changed_guard, set_count, BuiltUpdate};

// =============================================================================
// Store Seam
// =============================================================================

/// What the workflow needs from a table that supports sparse patches.
#[async_trait]
pub trait PatchStore: Send + Sync {
    /// The row type read back after the update.
    type Entity: Send;

    /// Entity name used in NotFound errors, e.g. `"Section"`.
    fn entity_name(&self) -> &'static str;

    /// Table to update.
    fn table(&self) -> &'static str;

    /// Canonical column order for SQL generation.
    fn field_order(&self) -> &'static [&'static str];

    /// Runs the UPDATE, returning the affected row count.
    async fn execute_update(&self, update: &BuiltUpdate) -> Result<u64, sqlx::Error>;

    /// Reads one row by id. A missing row is `sqlx::Error::RowNotFound`.
    async fn fetch_by_id(&self, id: i64) -> Result<Self::Entity, sqlx::Error>;
}

// =============================================================================
// Outcome
// =============================================================================

/// Successful result of a patch.
#[derive(Debug)]
pub enum PatchOutcome<T> {
    /// At least one column changed. Holds the re-read row.
    Updated(T),
    /// The row exists and already held the patched values. Carries the
    /// classifier's `NoRowsAffected` signal.
    Unchanged(T, ClassifiedError),
}

impl<T> PatchOutcome<T> {
    /// The current row.
    pub fn entity(&self) -> &T {
        match self {
            PatchOutcome::Updated(entity) | PatchOutcome::Unchanged(entity, _) => entity,
        }
    }

    /// Consumes the outcome, returning the current row.
    pub fn into_entity(self) -> T {
        match self {
            PatchOutcome::Updated(entity) | PatchOutcome::Unchanged(entity, _) => entity,
        }
    }

    /// The non-fatal signal carried by a no-op patch.
    pub fn signal(&self) -> Option<&ClassifiedError> {
        match self {
            PatchOutcome::Updated(_) => None,
            PatchOutcome::Unchanged(_, signal) => Some(signal),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, PatchOutcome::Unchanged(..))
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Build → execute → classify → read back.
pub struct PatchWorkflow<'a, S: ?Sized> {
    store: &'a S,
    classifier: &'a dyn ErrorClassifier,
}

impl<'a, S: PatchStore + ?Sized> PatchWorkflow<'a, S> {
    pub fn new(store: &'a S, classifier: &'a dyn ErrorClassifier) -> Self {
        PatchWorkflow { store, classifier }
    }

    /// Patches row `id` with `fields`.
    pub async fn run(
        &self,
        id: i64,
        fields: &FieldMap,
    ) -> Result<PatchOutcome<S::Entity>, ClassifiedError> {
        let rows = if set_count(fields, self.store.field_order()) == 0 {
            debug!(table = self.store.table(), id, "Patch has no known fields, skipping UPDATE");
            Ok(0)
        } else {
            let update = self.build(id, fields);
            debug!(sql = %update.sql, args = update.args.len(), "Executing patch");
            self.store.execute_update(&update).await
        };

        match self.classifier.classify_rows(rows) {
            Ok(_) => {
                let entity = self.fetch(id).await?;
                Ok(PatchOutcome::Updated(entity))
            }
            // Zero rows: distinguish a vanished row from a no-op.
            Err(signal @ ClassifiedError::NoRowsAffected) => {
                let entity = self.fetch(id).await?;
                debug!(table = self.store.table(), id, "Patch matched stored values");
                Ok(PatchOutcome::Unchanged(entity, signal))
            }
            Err(err) => Err(err.for_entity(self.store.entity_name(), id)),
        }
    }

    fn build(&self, id: i64, fields: &FieldMap) -> BuiltUpdate {
        let order = self.store.field_order();
        let (guard, guard_args) = changed_guard(fields, order);

        let mut where_args = Vec::with_capacity(guard_args.len() + 1);
        where_args.push(FieldValue::Integer(id));
        where_args.extend(guard_args);

        build_update(
            self.store.table(),
            fields,
            order,
            &format!("id = ? AND ({guard})"),
            where_args,
        )
    }

    async fn fetch(&self, id: i64) -> Result<S::Entity, ClassifiedError> {
        self.store
            .fetch_by_id(id)
            .await
            .map_err(|err| self.classify(err, id))
    }

    fn classify(&self, err: sqlx::Error, id: i64) -> ClassifiedError {
        self.classifier
            .classify(err)
            .for_entity(self.store.entity_name(), id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
