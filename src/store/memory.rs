use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::Mutex;

use super::{DocumentStore, StoreResult};
use crate::models::tracker::{Goal, LogEntry, OwnerId, TrackerKind};

type Key = (TrackerKind, OwnerId);

/// In-process store for local runs without a database.
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    entries: Arc<Mutex<HashMap<Key, Vec<LogEntry>>>>,
    goals: Arc<Mutex<HashMap<Key, Goal>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list_entries(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Vec<LogEntry>> {
        let entries = self.entries.lock().await;
        Ok(entries
            .get(&(kind, owner.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_goal(&self, kind: TrackerKind, owner: &OwnerId) -> StoreResult<Option<Goal>> {
        let goals = self.goals.lock().await;
        Ok(goals.get(&(kind, owner.clone())).cloned())
    }

    async fn insert_entry(&self, kind: TrackerKind, entry: &LogEntry) -> StoreResult<()> {
        let mut entries = self.entries.lock().await;
        entries
            .entry((kind, entry.owner_id.clone()))
            .or_default()
            .push(entry.clone());
        Ok(())
    }

    async fn upsert_goal(&self, kind: TrackerKind, goal: &Goal) -> StoreResult<()> {
        let mut goals = self.goals.lock().await;
        goals.insert((kind, goal.owner_id.clone()), goal.clone());
        Ok(())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn entry(owner: &str, value: i64) -> LogEntry {
        LogEntry {
            id: Uuid::now_v7(),
            owner_id: OwnerId::new(owner),
            value,
            label: None,
            date: "Mon Oct 19 2026".into(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_entries_are_scoped_by_owner_and_kind() {
        let store = MemoryDocumentStore::new();
        store.insert_entry(TrackerKind::Sleep, &entry("alice", 7)).await.unwrap();
        store.insert_entry(TrackerKind::Sleep, &entry("bob", 9)).await.unwrap();
        store.insert_entry(TrackerKind::Exercise, &entry("alice", 30)).await.unwrap();

        let alice = OwnerId::new("alice");
        let sleep = store.list_entries(TrackerKind::Sleep, &alice).await.unwrap();
        assert_eq!(sleep.len(), 1);
        assert_eq!(sleep[0].value, 7);
        assert!(store
            .list_entries(TrackerKind::Diet, &alice)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_goal_upsert_replaces_previous() {
        let store = MemoryDocumentStore::new();
        let owner = OwnerId::new("alice");
        for threshold in [8, 9] {
            let goal = Goal {
                owner_id: owner.clone(),
                threshold,
                updated_at: Utc::now(),
            };
            store.upsert_goal(TrackerKind::Sleep, &goal).await.unwrap();
        }

        let goal = store.get_goal(TrackerKind::Sleep, &owner).await.unwrap().unwrap();
        assert_eq!(goal.threshold, 9);
        assert!(store.get_goal(TrackerKind::Diet, &owner).await.unwrap().is_none());
    }
}
