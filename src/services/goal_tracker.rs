//! # Goal tracker
//!
//! Holds one owner's log for a tracker kind (all dates), the selected day and
//! the saved goal, and derives the daily total and goal status from them.
//!
//! Mutations are applied to memory first and then written to the store. A
//! failed write is reported as a notice on the outcome and the in-memory
//! change is kept; nothing is rolled back or retried.

use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::tracker::{Goal, GoalDirection, LogEntry, OwnerId, TrackerKind};
use crate::services::dates::{date_window, day_string, DateSource};
use crate::services::goal_status::{GoalStatus, NO_GOAL_HINT};
use crate::services::input::{guard_numeric_input, parse_non_negative, ParseError};
use crate::store::{DocumentStore, StoreError};

pub const REQUIRED_FIELDS_MESSAGE: &str = "Please fill out all required fields";
pub const DATE_OUT_OF_RANGE_MESSAGE: &str = "Date must be one of the last 7 days";

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),

    #[error("No signed-in user")]
    IdentityMissing,

    #[error("Failed to load tracker data: {0}")]
    Store(#[from] StoreError),
}

pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerState {
    NoGoalSet,
    GoalSet,
}

/// Result of a mutation. `persisted` is false when the store write failed.
#[derive(Debug, Clone, Serialize)]
pub struct Persisted<T> {
    pub item: T,
    pub persisted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<String>,
}

/// Ephemeral form text for the entry and goal forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputBuffers {
    pub label: String,
    pub value: String,
    pub goal: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub kind: TrackerKind,
    pub unit: &'static str,
    pub selected_date: String,
    pub dates: Vec<String>,
    pub entries: Vec<LogEntry>,
    pub daily_total: i64,
    pub goal: Option<i64>,
    pub state: TrackerState,
    pub goal_status: Option<GoalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

pub struct GoalTracker {
    kind: TrackerKind,
    direction: GoalDirection,
    store: Arc<dyn DocumentStore>,
    dates: Arc<dyn DateSource>,
    owner: Option<OwnerId>,
    entries: Vec<LogEntry>,
    goal: Option<Goal>,
    selected_date: String,
    buffers: InputBuffers,
}

impl GoalTracker {
    pub fn new(
        kind: TrackerKind,
        direction: GoalDirection,
        store: Arc<dyn DocumentStore>,
        dates: Arc<dyn DateSource>,
    ) -> Self {
        let selected_date = day_string(dates.today());
        Self {
            kind,
            direction,
            store,
            dates,
            owner: None,
            entries: Vec::new(),
            goal: None,
            selected_date,
            buffers: InputBuffers::default(),
        }
    }

    /// Builds a tracker and loads the owner's data in one step.
    pub async fn open(
        kind: TrackerKind,
        direction: GoalDirection,
        store: Arc<dyn DocumentStore>,
        dates: Arc<dyn DateSource>,
        owner: OwnerId,
    ) -> TrackerResult<Self> {
        let mut tracker = Self::new(kind, direction, store, dates);
        tracker.set_owner(Some(owner)).await?;
        Ok(tracker)
    }

    pub fn owner(&self) -> Option<&OwnerId> {
        self.owner.as_ref()
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn goal(&self) -> Option<&Goal> {
        self.goal.as_ref()
    }

    pub fn selected_date(&self) -> &str {
        &self.selected_date
    }

    pub fn buffers(&self) -> &InputBuffers {
        &self.buffers
    }

    pub fn state(&self) -> TrackerState {
        if self.goal.is_some() {
            TrackerState::GoalSet
        } else {
            TrackerState::NoGoalSet
        }
    }

    /// Session change callback. Reloads when the owner differs from the
    /// current one; signing out clears all owner data.
    pub async fn set_owner(&mut self, owner: Option<OwnerId>) -> TrackerResult<()> {
        if self.owner == owner {
            return Ok(());
        }

        self.entries.clear();
        self.goal = None;
        self.buffers = InputBuffers::default();
        self.owner = owner;

        if self.owner.is_some() {
            if let Err(e) = self.reload().await {
                self.owner = None;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Re-reads the log and goal for the current owner.
    pub async fn reload(&mut self) -> TrackerResult<()> {
        let owner = self.owner.clone().ok_or(TrackerError::IdentityMissing)?;

        let (entries, goal) = tokio::try_join!(
            self.store.list_entries(self.kind, &owner),
            self.store.get_goal(self.kind, &owner),
        )?;

        tracing::debug!(
            tracker = %self.kind,
            owner = %owner,
            entries = entries.len(),
            has_goal = goal.is_some(),
            "Tracker data loaded"
        );

        self.entries = entries;
        self.goal = goal;
        Ok(())
    }

    pub fn set_label_input(&mut self, text: &str) {
        self.buffers.label = text.to_string();
    }

    pub fn set_value_input(&mut self, text: &str) {
        self.buffers.value = guard_numeric_input(&self.buffers.value, text);
    }

    pub fn set_goal_input(&mut self, text: &str) {
        self.buffers.goal = guard_numeric_input(&self.buffers.goal, text);
    }

    /// Submits the entry form against the selected date.
    pub async fn submit_form(&mut self) -> TrackerResult<Persisted<LogEntry>> {
        let label = self.buffers.label.clone();
        let value = self.buffers.value.clone();
        let date = self.selected_date.clone();
        self.submit_entry(Some(label.as_str()), &value, &date).await
    }

    /// Submits the goal form.
    pub async fn submit_goal_form(&mut self) -> TrackerResult<Persisted<Goal>> {
        let raw = self.buffers.goal.clone();
        self.set_goal(&raw).await
    }

    pub async fn submit_entry(
        &mut self,
        label: Option<&str>,
        raw_value: &str,
        date: &str,
    ) -> TrackerResult<Persisted<LogEntry>> {
        let owner = self.owner.clone().ok_or(TrackerError::IdentityMissing)?;

        let label = label.map(str::trim).filter(|l| !l.is_empty());
        if self.kind.requires_label() && label.is_none() {
            return Err(TrackerError::Validation(REQUIRED_FIELDS_MESSAGE.into()));
        }
        let value = self.parse_value(raw_value)?;
        if !self.is_selectable(date) {
            return Err(TrackerError::Validation(DATE_OUT_OF_RANGE_MESSAGE.into()));
        }

        let entry = LogEntry {
            id: Uuid::now_v7(),
            owner_id: owner.clone(),
            value,
            label: if self.kind.requires_label() {
                label.map(str::to_string)
            } else {
                None
            },
            date: date.to_string(),
            created_at: Utc::now(),
        };

        self.entries.push(entry.clone());
        self.buffers.label.clear();
        self.buffers.value.clear();

        tracing::info!(
            tracker = %self.kind,
            collection = self.kind.log_collection(),
            owner = %owner,
            entry_id = %entry.id,
            value = entry.value,
            date = %entry.date,
            "Entry logged"
        );

        let write = self.store.insert_entry(self.kind, &entry).await;
        Ok(self.finish_write(entry, write, "entry"))
    }

    pub async fn set_goal(&mut self, raw_threshold: &str) -> TrackerResult<Persisted<Goal>> {
        let owner = self.owner.clone().ok_or(TrackerError::IdentityMissing)?;
        let threshold = self.parse_value(raw_threshold)?;

        let goal = Goal {
            owner_id: owner.clone(),
            threshold,
            updated_at: Utc::now(),
        };

        self.goal = Some(goal.clone());
        self.buffers.goal.clear();

        tracing::info!(
            tracker = %self.kind,
            collection = self.kind.goal_collection(),
            owner = %owner,
            threshold,
            "Goal saved"
        );

        let write = self.store.upsert_goal(self.kind, &goal).await;
        Ok(self.finish_write(goal, write, "goal"))
    }

    pub fn select_date(&mut self, date: &str) -> TrackerResult<()> {
        if !self.is_selectable(date) {
            return Err(TrackerError::Validation(DATE_OUT_OF_RANGE_MESSAGE.into()));
        }
        self.selected_date = date.to_string();
        Ok(())
    }

    pub fn date_window(&self) -> Vec<String> {
        date_window(self.dates.today())
    }

    pub fn entries_for<'a>(&'a self, date: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |e| e.date == date)
    }

    pub fn daily_total(&self, date: &str) -> i64 {
        // Stored rows may predate the input bound.
        self.entries_for(date)
            .fold(0i64, |acc, e| acc.saturating_add(e.value))
    }

    /// `None` until a goal has been saved.
    pub fn goal_status(&self, date: &str) -> Option<GoalStatus> {
        let goal = self.goal.as_ref()?;
        Some(GoalStatus::evaluate(
            self.kind,
            self.direction,
            self.daily_total(date),
            goal.threshold,
        ))
    }

    /// View of the selected date.
    pub fn snapshot(&self) -> TrackerSnapshot {
        let date = self.selected_date.as_str();
        TrackerSnapshot {
            kind: self.kind,
            unit: self.kind.unit(),
            selected_date: date.to_string(),
            dates: self.date_window(),
            entries: self.entries_for(date).cloned().collect(),
            daily_total: self.daily_total(date),
            goal: self.goal.as_ref().map(|g| g.threshold),
            state: self.state(),
            goal_status: self.goal_status(date),
            hint: self.goal.is_none().then_some(NO_GOAL_HINT),
        }
    }

    fn is_selectable(&self, date: &str) -> bool {
        self.date_window().iter().any(|d| d == date)
    }

    fn parse_value(&self, raw: &str) -> TrackerResult<i64> {
        parse_non_negative(raw).map_err(|e| match e {
            ParseError::Empty => TrackerError::Validation(REQUIRED_FIELDS_MESSAGE.into()),
            ParseError::Invalid => TrackerError::Validation(format!(
                "Please enter a valid number for {}",
                self.kind.unit()
            )),
        })
    }

    fn finish_write<T>(&self, item: T, write: Result<(), StoreError>, what: &str) -> Persisted<T> {
        match write {
            Ok(()) => Persisted {
                item,
                persisted: true,
                notice: None,
            },
            Err(e) => {
                tracing::warn!(tracker = %self.kind, error = %e, "Failed to save {}", what);
                Persisted {
                    item,
                    persisted: false,
                    notice: Some(format!("Could not save {} {}: {}", self.kind, what, e)),
                }
            }
        }
    }
}
