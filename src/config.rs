use std::env;

use crate::models::tracker::{GoalDirection, TrackerKind};

#[derive(Debug, Clone)]
pub struct Config {
    /// Unset means the in-memory store.
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,

    pub jwt_secret: String,

    pub diet_goal_direction: GoalDirection,
    pub exercise_goal_direction: GoalDirection,
    pub sleep_goal_direction: GoalDirection,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").ok().filter(|s| !s.is_empty()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:8081".into()),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),

            diet_goal_direction: direction_from_env("DIET_GOAL_DIRECTION"),
            exercise_goal_direction: direction_from_env("EXERCISE_GOAL_DIRECTION"),
            sleep_goal_direction: direction_from_env("SLEEP_GOAL_DIRECTION"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn goal_direction(&self, kind: TrackerKind) -> GoalDirection {
        match kind {
            TrackerKind::Diet => self.diet_goal_direction,
            TrackerKind::Exercise => self.exercise_goal_direction,
            TrackerKind::Sleep => self.sleep_goal_direction,
        }
    }
}

fn direction_from_env(key: &str) -> GoalDirection {
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|e| panic!("{} is invalid: {}", key, e)),
        Err(_) => GoalDirection::default(),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: None,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:8081".into(),
            jwt_secret: "test-secret".into(),
            diet_goal_direction: GoalDirection::AtLeast,
            exercise_goal_direction: GoalDirection::AtLeast,
            sleep_goal_direction: GoalDirection::AtLeast,
        }
    }
}
