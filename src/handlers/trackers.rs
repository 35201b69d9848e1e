use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use validator::Validate;

use crate::auth::middleware::AuthUser;
use crate::dto::{AppJson, LogEntryRequest, LogEntryResponse, MutationResponse, SetGoalRequest, SetGoalResponse, TrackerQuery};
use crate::error::{AppError, AppResult};
use crate::models::tracker::{OwnerId, TrackerKind};
use crate::services::goal_tracker::{GoalTracker, TrackerSnapshot};
use crate::AppState;

pub(crate) fn parse_kind(raw: &str) -> AppResult<TrackerKind> {
    raw.parse::<TrackerKind>().map_err(AppError::NotFound)
}

/// Loads the owner's log and goal for one tracker kind.
pub(crate) async fn open_tracker(
    state: &AppState,
    kind: TrackerKind,
    owner: &OwnerId,
) -> AppResult<GoalTracker> {
    let tracker = GoalTracker::open(
        kind,
        state.config.goal_direction(kind),
        state.store.clone(),
        state.dates.clone(),
        owner.clone(),
    )
    .await?;
    Ok(tracker)
}

pub async fn get_tracker(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(kind): Path<String>,
    Query(query): Query<TrackerQuery>,
) -> AppResult<Json<TrackerSnapshot>> {
    let kind = parse_kind(&kind)?;
    let mut tracker = open_tracker(&state, kind, &auth_user.owner_id).await?;

    if let Some(date) = query.date.as_deref() {
        tracker.select_date(date)?;
    }

    Ok(Json(tracker.snapshot()))
}

pub async fn log_entry(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(kind): Path<String>,
    AppJson(body): AppJson<LogEntryRequest>,
) -> AppResult<Json<LogEntryResponse>> {
    let kind = parse_kind(&kind)?;
    body.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let mut tracker = open_tracker(&state, kind, &auth_user.owner_id).await?;
    if let Some(date) = body.date.as_deref() {
        tracker.select_date(date)?;
    }
    let date = tracker.selected_date().to_string();

    let result = tracker
        .submit_entry(body.label.as_deref(), &body.value.as_text(), &date)
        .await?;

    Ok(Json(MutationResponse {
        result,
        tracker: tracker.snapshot(),
    }))
}

pub async fn set_goal(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(kind): Path<String>,
    AppJson(body): AppJson<SetGoalRequest>,
) -> AppResult<Json<SetGoalResponse>> {
    let kind = parse_kind(&kind)?;
    let mut tracker = open_tracker(&state, kind, &auth_user.owner_id).await?;

    let result = tracker.set_goal(&body.threshold.as_text()).await?;

    Ok(Json(MutationResponse {
        result,
        tracker: tracker.snapshot(),
    }))
}
