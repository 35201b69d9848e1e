use axum::{extract::State, Extension, Json};

use crate::auth::middleware::AuthUser;
use crate::dto::{OverviewResponse, TrackerSummary};
use crate::error::AppResult;
use crate::handlers::trackers::open_tracker;
use crate::models::tracker::TrackerKind;
use crate::services::dates::day_string;
use crate::AppState;

/// Today's total and goal status for every tracker kind.
pub async fn get_overview(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<OverviewResponse>> {
    let mut trackers: Vec<TrackerSummary> = Vec::with_capacity(TrackerKind::ALL.len());
    for kind in TrackerKind::ALL {
        let tracker = open_tracker(&state, kind, &auth_user.owner_id).await?;
        trackers.push(tracker.snapshot().into());
    }

    Ok(Json(OverviewResponse {
        date: day_string(state.dates.today()),
        trackers,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::tracker::{Goal, OwnerId};
    use crate::services::dates::FixedDate;
    use crate::store::{DocumentStore, MemoryDocumentStore};
    use chrono::{NaiveDate, Utc};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_overview_covers_all_kinds() {
        let store = Arc::new(MemoryDocumentStore::new());
        let owner = OwnerId::new("alice");
        store
            .upsert_goal(
                TrackerKind::Exercise,
                &Goal {
                    owner_id: owner.clone(),
                    threshold: 30,
                    updated_at: Utc::now(),
                },
            )
            .await
            .unwrap();

        let state = AppState {
            store,
            dates: Arc::new(FixedDate(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap())),
            config: Arc::new(Config::for_tests()),
        };
        let auth_user = AuthUser {
            owner_id: owner,
            email: None,
        };

        let Json(overview) = get_overview(State(state), Extension(auth_user)).await.unwrap();
        assert_eq!(overview.date, "Mon Oct 19 2026");
        assert_eq!(overview.trackers.len(), 3);

        let exercise = overview
            .trackers
            .iter()
            .find(|t| t.kind == TrackerKind::Exercise)
            .unwrap();
        assert_eq!(exercise.goal, Some(30));
        assert!(!exercise.goal_status.as_ref().unwrap().met);

        let diet = overview.trackers.iter().find(|t| t.kind == TrackerKind::Diet).unwrap();
        assert!(diet.goal_status.is_none());
    }
}
