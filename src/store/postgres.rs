use async_trait::async_trait;
use sqlx::PgPool;

use super::{DocumentStore, StoreResult};
use crate::models::tracker::{Goal, LogEntry, OwnerId, TrackerKind};

#[derive(Clone)]
pub struct PgDocumentStore {
    db: PgPool,
}

impl PgDocumentStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn list_entries(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Vec<LogEntry>> {
        let entries = sqlx::query_as::<_, LogEntry>(
            r#"
            SELECT id, owner_id, value, label, day, created_at
            FROM tracker_entries
            WHERE kind = $1 AND owner_id = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(kind.as_str())
        .bind(owner)
        .fetch_all(&self.db)
        .await?;

        Ok(entries)
    }

    async fn get_goal(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Option<Goal>> {
        let goal = sqlx::query_as::<_, Goal>(
            "SELECT owner_id, threshold, updated_at FROM tracker_goals WHERE kind = $1 AND owner_id = $2",
        )
        .bind(kind.as_str())
        .bind(owner)
        .fetch_optional(&self.db)
        .await?;

        Ok(goal)
    }

    async fn insert_entry(&self, kind: TrackerKind, entry: &LogEntry) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tracker_entries (id, kind, owner_id, value, label, day, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(entry.id)
        .bind(kind.as_str())
        .bind(&entry.owner_id)
        .bind(entry.value)
        .bind(&entry.label)
        .bind(&entry.date)
        .bind(entry.created_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn upsert_goal(&self, kind: TrackerKind, goal: &Goal) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tracker_goals (kind, owner_id, threshold, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (kind, owner_id) DO UPDATE SET
                threshold = EXCLUDED.threshold,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(kind.as_str())
        .bind(&goal.owner_id)
        .bind(goal.threshold)
        .bind(goal.updated_at)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.db)
            .await?;
        Ok(())
    }
}
