//! # Section Repository
//!
//! Storage sections inside a warehouse, and the partial update path.
//!
//! ## Patch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SectionPatch ──► validate ──► into_fields ──► PatchWorkflow::run      │
//! │                                                    │                    │
//! │                      UPDATE sections SET ... WHERE id = ? AND (changed) │
//! │                                                    │                    │
//! │                  rows > 0 ──► Updated(row)         │                    │
//! │                  rows = 0 ──► row exists? Unchanged(row) : NotFound     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::classify;
use crate::error::DbResult;
use crate::patch::{PatchOutcome, PatchStore, PatchWorkflow};
use crate::update_builder::{bind_args, BuiltUpdate};
use depot_core::validation::validate_section_patch;
use depot_core::{FieldMap, Section, SectionPatch, SECTION_FIELDS};

const SELECT_SECTION: &str = r#"
    SELECT id, section_number, current_temperature, minimum_temperature,
           current_capacity, minimum_capacity, maximum_capacity,
           warehouse_id, product_type_id
    FROM sections
"#;

/// Repository for section database operations.
#[derive(Debug, Clone)]
pub struct SectionRepository {
    pool: SqlitePool,
}

impl SectionRepository {
    /// Creates a new SectionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SectionRepository { pool }
    }

    /// Inserts a section.
    ///
    /// ## Returns
    /// * `Err(Duplicate)` - section number already used
    /// * `Err(ForeignKeyViolation)` - warehouse or product type doesn't exist
    pub async fn insert(&self, section: &Section) -> DbResult<Section> {
        debug!(section_number = section.section_number, "Inserting section");

        let result = sqlx::query(
            r#"
            INSERT INTO sections (
                section_number, current_temperature, minimum_temperature,
                current_capacity, minimum_capacity, maximum_capacity,
                warehouse_id, product_type_id
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(section.section_number)
        .bind(section.current_temperature)
        .bind(section.minimum_temperature)
        .bind(section.current_capacity)
        .bind(section.minimum_capacity)
        .bind(section.maximum_capacity)
        .bind(section.warehouse_id)
        .bind(section.product_type_id)
        .execute(&self.pool)
        .await?;

        Ok(Section {
            id: result.last_insert_rowid(),
            ..section.clone()
        })
    }

    /// Gets a section by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Section>> {
        let section = sqlx::query_as::<_, Section>(&format!("{SELECT_SECTION} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(section)
    }

    /// Lists sections of a warehouse ordered by section number.
    pub async fn list_by_warehouse(&self, warehouse_id: i64) -> DbResult<Vec<Section>> {
        let sections = sqlx::query_as::<_, Section>(&format!(
            "{SELECT_SECTION} WHERE warehouse_id = ?1 ORDER BY section_number"
        ))
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(sections)
    }

    /// Applies a typed patch to section `id`.
    ///
    /// Returns `Unchanged` when every supplied value already matched the
    /// stored row; callers that need the "no rows affected" signal read it
    /// from [`PatchOutcome::signal`].
    pub async fn patch(&self, id: i64, patch: SectionPatch) -> DbResult<PatchOutcome<Section>> {
        validate_section_patch(&patch)?;
        self.patch_fields(id, &patch.into_fields()).await
    }

    /// Applies an untyped field map. Keys outside the section columns are ignored.
    pub async fn patch_fields(&self, id: i64, fields: &FieldMap) -> DbResult<PatchOutcome<Section>> {
        let outcome = PatchWorkflow::new(self, classify::sqlite())
            .run(id, fields)
            .await?;

        if !outcome.is_unchanged() {
            info!(id, fields = fields.len(), "Section updated");
        }
        Ok(outcome)
    }
}

#[async_trait]
impl PatchStore for SectionRepository {
    type Entity = Section;

    fn entity_name(&self) -> &'static str {
        "Section"
    }

    fn table(&self) -> &'static str {
        "sections"
    }

    fn field_order(&self) -> &'static [&'static str] {
        SECTION_FIELDS
    }

    async fn execute_update(&self, update: &BuiltUpdate) -> Result<u64, sqlx::Error> {
        let result = bind_args(sqlx::query(&update.sql), &update.args)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn fetch_by_id(&self, id: i64) -> Result<Section, sqlx::Error> {
        let sql = format!("{SELECT_SECTION} WHERE id = ?1");
        sqlx::query_as::<_, Section>(&sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::ClassifiedError;
    use crate::error::DbError;
    use crate::repository::fixtures::{section, seeded, warehouse};
    use depot_core::{FieldValue, ValidationError};

    #[tokio::test]
    async fn test_insert_and_list() {
        let (db, seed) = seeded().await;
        let repo = db.sections();

        repo.insert(&section(2, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();
        repo.insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let numbers: Vec<i64> = repo
            .list_by_warehouse(seed.warehouse_id)
            .await
            .unwrap()
            .iter()
            .map(|s| s.section_number)
            .collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_patch_updates_and_reads_back() {
        let (db, seed) = seeded().await;
        let repo = db.sections();
        let saved = repo
            .insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let outcome = repo
            .patch(
                saved.id,
                SectionPatch {
                    current_capacity: Some(75),
                    current_temperature: Some(-20.5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(!outcome.is_unchanged());
        let updated = outcome.into_entity();
        assert_eq!(updated.current_capacity, 75);
        assert_eq!(updated.current_temperature, -20.5);
        assert_eq!(updated.maximum_capacity, saved.maximum_capacity);

        let stored = repo.get_by_id(saved.id).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_repeated_patch_is_unchanged() {
        let (db, seed) = seeded().await;
        let repo = db.sections();
        let saved = repo
            .insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let patch = SectionPatch {
            current_capacity: Some(60),
            ..Default::default()
        };
        repo.patch(saved.id, patch.clone()).await.unwrap();
        let second = repo.patch(saved.id, patch).await.unwrap();

        assert!(second.is_unchanged());
        assert!(matches!(second.signal(), Some(ClassifiedError::NoRowsAffected)));
        assert_eq!(second.entity().current_capacity, 60);
    }

    #[tokio::test]
    async fn test_patch_missing_row_is_not_found() {
        let (db, _) = seeded().await;

        let err = db
            .sections()
            .patch(
                404,
                SectionPatch {
                    current_capacity: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        match err.classified() {
            Some(ClassifiedError::NotFound { entity, id }) => {
                assert_eq!(entity, "Section");
                assert_eq!(id, "404");
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_patch_to_taken_section_number_is_duplicate() {
        let (db, seed) = seeded().await;
        let repo = db.sections();
        repo.insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();
        let second = repo
            .insert(&section(2, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let err = repo
            .patch(
                second.id,
                SectionPatch {
                    section_number: Some(1),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.classified(),
            Some(ClassifiedError::Duplicate { .. })
        ));
        let stored = repo.get_by_id(second.id).await.unwrap().unwrap();
        assert_eq!(stored.section_number, 2);
    }

    #[tokio::test]
    async fn test_patch_to_missing_warehouse_is_foreign_key_violation() {
        let (db, seed) = seeded().await;
        let saved = db
            .sections()
            .insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let err = db
            .sections()
            .patch(
                saved.id,
                SectionPatch {
                    warehouse_id: Some(999),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err.classified(),
            Some(ClassifiedError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_patch_moves_section_between_warehouses() {
        let (db, seed) = seeded().await;
        let other = db.warehouses().insert(&warehouse("WH-02")).await.unwrap();
        let saved = db
            .sections()
            .insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        db.sections()
            .patch(
                saved.id,
                SectionPatch {
                    warehouse_id: Some(other.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(db
            .sections()
            .list_by_warehouse(seed.warehouse_id)
            .await
            .unwrap()
            .is_empty());
        assert_eq!(db.sections().list_by_warehouse(other.id).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_patch_never_reaches_database() {
        let (db, _) = seeded().await;

        let err = db
            .sections()
            .patch(
                404,
                SectionPatch {
                    minimum_capacity: Some(50),
                    maximum_capacity: Some(10),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DbError::Validation(ValidationError::Inconsistent { .. })
        ));
    }

    #[tokio::test]
    async fn test_unknown_fields_are_ignored() {
        let (db, seed) = seeded().await;
        let saved = db
            .sections()
            .insert(&section(1, seed.warehouse_id, seed.product_type_id))
            .await
            .unwrap();

        let mut fields = FieldMap::new();
        fields.insert("colour".to_string(), FieldValue::from("blue"));

        let outcome = db.sections().patch_fields(saved.id, &fields).await.unwrap();
        assert!(outcome.is_unchanged());
        assert_eq!(outcome.into_entity(), saved);
    }
}
