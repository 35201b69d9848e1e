use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Opaque identifier handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(transparent)]
#[sqlx(transparent)]
pub struct OwnerId(pub String);

impl OwnerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OwnerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    Diet,
    Exercise,
    Sleep,
}

impl TrackerKind {
    pub const ALL: [TrackerKind; 3] = [TrackerKind::Diet, TrackerKind::Exercise, TrackerKind::Sleep];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "diet",
            TrackerKind::Exercise => "exercise",
            TrackerKind::Sleep => "sleep",
        }
    }

    /// Unit of the logged value, used in user-facing messages.
    pub fn unit(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "calories",
            TrackerKind::Exercise => "minutes",
            TrackerKind::Sleep => "hours",
        }
    }

    /// Sleep entries carry no label; food and workouts do.
    pub fn requires_label(&self) -> bool {
        !matches!(self, TrackerKind::Sleep)
    }

    pub fn log_collection(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "dietLog",
            TrackerKind::Exercise => "exerciseLog",
            TrackerKind::Sleep => "sleepLog",
        }
    }

    pub fn goal_collection(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "dietGoals",
            TrackerKind::Exercise => "exerciseGoals",
            TrackerKind::Sleep => "sleepGoals",
        }
    }

    pub fn not_met_message(&self) -> &'static str {
        match self {
            TrackerKind::Diet => "Goal not met. Keep going!",
            TrackerKind::Exercise => "Goal not met. Keep moving!",
            TrackerKind::Sleep => "Goal not met. Try to get more rest!",
        }
    }
}

impl fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diet" => Ok(TrackerKind::Diet),
            "exercise" => Ok(TrackerKind::Exercise),
            "sleep" => Ok(TrackerKind::Sleep),
            other => Err(format!("Unknown tracker: {}", other)),
        }
    }
}

/// Which side of the threshold counts as meeting the goal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum GoalDirection {
    #[default]
    AtLeast,
    AtMost,
}

impl GoalDirection {
    pub fn is_met(&self, total: i64, threshold: i64) -> bool {
        match self {
            GoalDirection::AtLeast => total >= threshold,
            GoalDirection::AtMost => total <= threshold,
        }
    }
}

impl FromStr for GoalDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "at_least" => Ok(GoalDirection::AtLeast),
            "at_most" => Ok(GoalDirection::AtMost),
            other => Err(format!("Unknown goal direction: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct LogEntry {
    pub id: Uuid,
    pub owner_id: OwnerId,
    pub value: i64,
    pub label: Option<String>,
    #[sqlx(rename = "day")]
    pub date: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Goal {
    pub owner_id: OwnerId,
    pub threshold: i64,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_str() {
        for kind in TrackerKind::ALL {
            assert_eq!(kind.as_str().parse::<TrackerKind>().unwrap(), kind);
        }
        assert!("steps".parse::<TrackerKind>().is_err());
    }

    #[test]
    fn test_only_sleep_skips_label() {
        assert!(TrackerKind::Diet.requires_label());
        assert!(TrackerKind::Exercise.requires_label());
        assert!(!TrackerKind::Sleep.requires_label());
    }

    #[test]
    fn test_direction_boundaries() {
        assert!(GoalDirection::AtLeast.is_met(200, 200));
        assert!(!GoalDirection::AtLeast.is_met(199, 200));
        assert!(GoalDirection::AtMost.is_met(200, 200));
        assert!(!GoalDirection::AtMost.is_met(201, 200));
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!("at_most".parse::<GoalDirection>().unwrap(), GoalDirection::AtMost);
        assert_eq!(" at_least ".parse::<GoalDirection>().unwrap(), GoalDirection::AtLeast);
        assert!("lower".parse::<GoalDirection>().is_err());
    }
}
