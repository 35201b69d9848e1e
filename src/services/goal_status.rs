use serde::Serialize;

use crate::models::tracker::{GoalDirection, TrackerKind};

pub const MET_MESSAGE: &str = "Goal met!";
pub const NO_GOAL_HINT: &str = "Goal hasn't been set yet. Make one!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StatusColor {
    Green,
    Red,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GoalStatus {
    pub met: bool,
    pub message: &'static str,
    pub color: StatusColor,
}

impl GoalStatus {
    pub fn evaluate(kind: TrackerKind, direction: GoalDirection, total: i64, threshold: i64) -> Self {
        if direction.is_met(total, threshold) {
            Self {
                met: true,
                message: MET_MESSAGE,
                color: StatusColor::Green,
            }
        } else {
            Self {
                met: false,
                message: kind.not_met_message(),
                color: StatusColor::Red,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_met_is_green() {
        let status = GoalStatus::evaluate(TrackerKind::Exercise, GoalDirection::AtLeast, 30, 30);
        assert!(status.met);
        assert_eq!(status.message, MET_MESSAGE);
        assert_eq!(status.color, StatusColor::Green);
    }

    #[test]
    fn test_not_met_uses_kind_message() {
        let status = GoalStatus::evaluate(TrackerKind::Sleep, GoalDirection::AtLeast, 7, 8);
        assert!(!status.met);
        assert_eq!(status.message, "Goal not met. Try to get more rest!");
        assert_eq!(status.color, StatusColor::Red);
    }

    #[test]
    fn test_at_most_flips_outcome() {
        let over = GoalStatus::evaluate(TrackerKind::Diet, GoalDirection::AtMost, 400, 200);
        assert!(!over.met);
        let under = GoalStatus::evaluate(TrackerKind::Diet, GoalDirection::AtMost, 100, 200);
        assert!(under.met);
    }

    #[test]
    fn test_serializes_color_lowercase() {
        let status = GoalStatus::evaluate(TrackerKind::Diet, GoalDirection::AtLeast, 0, 1);
        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["color"], "red");
        assert_eq!(json["met"], false);
    }
}
