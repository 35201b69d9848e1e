//! Document store backing the trackers.
//!
//! Each tracker kind owns two logical collections: an append-only log of
//! entries filterable by owner, and a goal collection holding at most one
//! document per owner (upsert by owner id).

use async_trait::async_trait;

use crate::models::tracker::{Goal, LogEntry, OwnerId, TrackerKind};

pub mod memory;
pub mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::PgDocumentStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All log entries for the owner, oldest first.
    async fn list_entries(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Vec<LogEntry>>;

    /// Point read of the owner's goal document.
    async fn get_goal(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Option<Goal>>;

    async fn insert_entry(&self, kind: TrackerKind, entry: &LogEntry) -> StoreResult<()>;

    /// Replaces any existing goal for the same owner.
    async fn upsert_goal(&self, kind: TrackerKind, goal: &Goal) -> StoreResult<()>;

    async fn ping(&self) -> StoreResult<()>;
}
