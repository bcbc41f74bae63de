pub mod schema;

use crate::compose::ComposedReview;
use crate::session::SelectionState;
use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;

pub const DEFAULT_QUOTA_BYTES: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct DraftRecord {
    pub selections: SelectionState,
    pub images: Vec<String>,
    pub step_index: usize,
    pub catalog_fingerprint: String,
    pub saved_at: String,
}

// Two logical slots: the single in-progress draft and the saved-review
// collection. Injected as a trait so the wizard can run against a double.
pub trait Persistence {
    fn save_draft(&self, draft: &DraftRecord) -> Result<()>;
    fn load_draft(&self) -> Result<Option<DraftRecord>>;
    fn clear_draft(&self) -> Result<()>;
    fn upsert_review(&self, review: &ComposedReview) -> Result<()>;
    fn get_review(&self, id: &str) -> Result<Option<ComposedReview>>;
    fn list_reviews(&self) -> Result<Vec<ComposedReview>>;
    fn delete_review(&self, id: &str) -> Result<bool>;
    fn usage_estimate(&self) -> Result<u64>;
    fn quota(&self) -> u64;
}

pub struct ReviewStore {
    conn: Connection,
    quota_bytes: u64,
}

impl ReviewStore {
    pub fn open(path: &Path, quota_bytes: u64) -> Result<ReviewStore> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create db parent dir {}", parent.display()))?;
        }
        let conn =
            Connection::open(path).with_context(|| format!("open sqlite db {}", path.display()))?;
        schema::migrate(&conn)?;
        Ok(ReviewStore { conn, quota_bytes })
    }

    fn row_to_review(row: &rusqlite::Row<'_>) -> rusqlite::Result<(ComposedReview, String, String)> {
        Ok((
            ComposedReview {
                id: row.get(0)?,
                restaurant_name: row.get(1)?,
                body: row.get(2)?,
                selections: SelectionState::default(),
                images: Vec::new(),
                created_at: row.get(5)?,
                updated_at: row.get(6)?,
            },
            row.get(3)?,
            row.get(4)?,
        ))
    }

    fn hydrate(
        (mut review, selections_json, images_json): (ComposedReview, String, String),
    ) -> Result<ComposedReview> {
        review.selections = serde_json::from_str(&selections_json)
            .with_context(|| format!("parse selections for review {}", review.id))?;
        review.images = serde_json::from_str(&images_json)
            .with_context(|| format!("parse image list for review {}", review.id))?;
        Ok(review)
    }
}

impl Persistence for ReviewStore {
    // Last write wins on the single draft slot.
    fn save_draft(&self, draft: &DraftRecord) -> Result<()> {
        self.conn.execute(
            "INSERT INTO draft (slot, selections_json, images_json, step_index, catalog_fingerprint, saved_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(slot) DO UPDATE SET
                 selections_json = excluded.selections_json,
                 images_json = excluded.images_json,
                 step_index = excluded.step_index,
                 catalog_fingerprint = excluded.catalog_fingerprint,
                 saved_at = excluded.saved_at",
            params![
                serde_json::to_string(&draft.selections)?,
                serde_json::to_string(&draft.images)?,
                draft.step_index as i64,
                draft.catalog_fingerprint,
                draft.saved_at
            ],
        )?;
        Ok(())
    }

    fn load_draft(&self) -> Result<Option<DraftRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT selections_json, images_json, step_index, catalog_fingerprint, saved_at
                 FROM draft WHERE slot = 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, i64>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(selections_json, images_json, step_index, catalog_fingerprint, saved_at)| {
            Ok(DraftRecord {
                selections: serde_json::from_str(&selections_json)
                    .context("parse draft selections")?,
                images: serde_json::from_str(&images_json).context("parse draft image list")?,
                step_index: step_index.max(0) as usize,
                catalog_fingerprint,
                saved_at,
            })
        })
        .transpose()
    }

    fn clear_draft(&self) -> Result<()> {
        self.conn.execute("DELETE FROM draft WHERE slot = 1", [])?;
        Ok(())
    }

    fn upsert_review(&self, review: &ComposedReview) -> Result<()> {
        self.conn.execute(
            "INSERT INTO reviews (id, restaurant_name, body, selections_json, images_json, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             ON CONFLICT(id) DO UPDATE SET
                 restaurant_name = excluded.restaurant_name,
                 body = excluded.body,
                 selections_json = excluded.selections_json,
                 images_json = excluded.images_json,
                 updated_at = excluded.updated_at",
            params![
                review.id,
                review.restaurant_name,
                review.body,
                serde_json::to_string(&review.selections)?,
                serde_json::to_string(&review.images)?,
                review.created_at,
                review.updated_at
            ],
        )?;
        Ok(())
    }

    fn get_review(&self, id: &str) -> Result<Option<ComposedReview>> {
        let row = self
            .conn
            .query_row(
                "SELECT id, restaurant_name, body, selections_json, images_json, created_at, updated_at
                 FROM reviews WHERE id = ?1",
                params![id],
                ReviewStore::row_to_review,
            )
            .optional()?;
        row.map(ReviewStore::hydrate).transpose()
    }

    fn list_reviews(&self) -> Result<Vec<ComposedReview>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, restaurant_name, body, selections_json, images_json, created_at, updated_at
             FROM reviews ORDER BY created_at ASC, id ASC",
        )?;
        let rows = stmt
            .query_map([], ReviewStore::row_to_review)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(ReviewStore::hydrate).collect()
    }

    fn delete_review(&self, id: &str) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM reviews WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    fn usage_estimate(&self) -> Result<u64> {
        let page_count: u64 = self
            .conn
            .pragma_query_value(None, "page_count", |row| row.get(0))?;
        let page_size: u64 = self
            .conn
            .pragma_query_value(None, "page_size", |row| row.get(0))?;
        Ok(page_count * page_size)
    }

    fn quota(&self) -> u64 {
        self.quota_bytes
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageStatus {
    Normal,
    Warning,
    Critical,
}

// Same thresholds the storage meter uses: warn past half, alarm past 80%.
pub fn classify_usage(usage: u64, quota: u64) -> StorageStatus {
    if quota == 0 {
        return StorageStatus::Critical;
    }
    let percent = usage * 100 / quota;
    if percent > 80 {
        StorageStatus::Critical
    } else if percent > 50 {
        StorageStatus::Warning
    } else {
        StorageStatus::Normal
    }
}

pub fn draft_record(
    selections: &SelectionState,
    images: &[String],
    step_index: usize,
) -> DraftRecord {
    DraftRecord {
        selections: selections.clone(),
        images: images.to_vec(),
        step_index,
        catalog_fingerprint: crate::catalog::fingerprint(),
        saved_at: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_classification_thresholds() {
        assert_eq!(classify_usage(0, 100), StorageStatus::Normal);
        assert_eq!(classify_usage(50, 100), StorageStatus::Normal);
        assert_eq!(classify_usage(51, 100), StorageStatus::Warning);
        assert_eq!(classify_usage(80, 100), StorageStatus::Warning);
        assert_eq!(classify_usage(81, 100), StorageStatus::Critical);
        assert_eq!(classify_usage(1, 0), StorageStatus::Critical);
    }
}
