//! # Request/Response DTOs
//!
//! Conventions:
//! - `*Request`  → deserialized from client JSON body or query params
//! - `*Response` → serialized to client JSON
//! - Numeric form fields arrive as raw text or JSON numbers and are parsed by
//!   the tracker, so the same validation messages apply to both

use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::AppError;
use crate::models::tracker::{Goal, LogEntry, TrackerKind};
use crate::services::goal_status::GoalStatus;
use crate::services::goal_tracker::{Persisted, TrackerSnapshot};

/// JSON body extractor whose rejections use the API error envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// A form value as typed by the user, or a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Number(serde_json::Number),
    Text(String),
}

impl RawValue {
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Number(n) => n.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Text(String::new())
    }
}

// ============================================================================
// Trackers
// ============================================================================

/// GET /api/trackers/{kind}
#[derive(Debug, Deserialize)]
pub struct TrackerQuery {
    /// Day string such as "Mon Oct 19 2026". Default: today.
    pub date: Option<String>,
}

/// POST /api/trackers/{kind}/entries
#[derive(Debug, Deserialize, Validate)]
pub struct LogEntryRequest {
    /// Food or workout name. Ignored for sleep.
    #[validate(length(max = 200, message = "Label must be under 200 characters"))]
    pub label: Option<String>,

    #[serde(default)]
    pub value: RawValue,

    /// Default: the selected date (today).
    pub date: Option<String>,
}

/// PUT /api/trackers/{kind}/goal
#[derive(Debug, Deserialize)]
pub struct SetGoalRequest {
    #[serde(default)]
    pub threshold: RawValue,
}

/// Mutation result plus the refreshed view of the tracker.
#[derive(Debug, Serialize)]
pub struct MutationResponse<T: Serialize> {
    #[serde(flatten)]
    pub result: Persisted<T>,
    pub tracker: TrackerSnapshot,
}

pub type LogEntryResponse = MutationResponse<LogEntry>;
pub type SetGoalResponse = MutationResponse<Goal>;

// ============================================================================
// Overview
// ============================================================================

#[derive(Debug, Serialize)]
pub struct TrackerSummary {
    pub kind: TrackerKind,
    pub unit: &'static str,
    pub daily_total: i64,
    pub goal: Option<i64>,
    pub goal_status: Option<GoalStatus>,
}

impl From<TrackerSnapshot> for TrackerSummary {
    fn from(s: TrackerSnapshot) -> Self {
        Self {
            kind: s.kind,
            unit: s.unit,
            daily_total: s.daily_total,
            goal: s.goal,
            goal_status: s.goal_status,
        }
    }
}

/// GET /api/overview
#[derive(Debug, Serialize)]
pub struct OverviewResponse {
    pub date: String,
    pub trackers: Vec<TrackerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_value_accepts_text_and_numbers() {
        let req: LogEntryRequest =
            serde_json::from_str(r#"{"label": "Apple", "value": 100}"#).unwrap();
        assert_eq!(req.value.as_text(), "100");

        let req: LogEntryRequest = serde_json::from_str(r#"{"value": "-5"}"#).unwrap();
        assert_eq!(req.value.as_text(), "-5");

        let req: SetGoalRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.threshold.as_text(), "");
    }

    #[test]
    fn test_label_length_validated() {
        let req = LogEntryRequest {
            label: Some("x".repeat(201)),
            value: RawValue::Text("1".into()),
            date: None,
        };
        assert!(req.validate().is_err());
    }
}
