//! Axum route handlers for interview generation and retrieval.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::{AppError, PipelineError};
use crate::interviews::service::{generate_interview, GenerateInterviewRequest, GenerateOutcome};
use crate::models::interview::{Interview, LatestInterviewsQuery};
use crate::state::AppState;

const MAX_FEED_LIMIT: u32 = 100;

#[derive(Debug, Deserialize)]
pub struct LatestParams {
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user_interviews: Vec<Interview>,
    pub latest_interviews: Vec<Interview>,
}

/// GET /api/generate
///
/// Liveness probe used by the voice agent before it starts a workflow.
pub async fn handle_generate_ping() -> Json<Value> {
    Json(json!({ "success": true, "data": "THANKS YOU!" }))
}

/// POST /api/generate
///
/// Called server-to-server by the voice agent once the candidate has stated
/// role, level, tech stack, focus and amount. The owner comes from `userid`.
pub async fn handle_generate(
    State(state): State<AppState>,
    payload: Result<Json<GenerateInterviewRequest>, JsonRejection>,
) -> (StatusCode, Json<GenerateOutcome>) {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            let err = PipelineError::InvalidRequest(rejection.body_text());
            return (err.status(), Json(GenerateOutcome::failed(&err)));
        }
    };

    match generate_interview(
        state.interviews.as_ref(),
        state.question_generator.as_ref(),
        request,
    )
    .await
    {
        Ok(interview) => (StatusCode::OK, Json(GenerateOutcome::created(&interview))),
        Err(err) => (err.status(), Json(GenerateOutcome::failed(&err))),
    }
}

/// GET /api/interviews/:id
pub async fn handle_get_interview(
    State(state): State<AppState>,
    _user: CurrentUser,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<Interview>, AppError> {
    let interview = state
        .interviews
        .get_by_id(interview_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Interview {interview_id} not found")))?;

    Ok(Json(interview))
}

/// GET /api/interviews
pub async fn handle_my_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Interview>>, AppError> {
    Ok(Json(state.interviews.list_by_user(&user.id).await?))
}

/// GET /api/discover?limit=N
///
/// Discovery feed: other users' finalized interviews, newest first.
pub async fn handle_latest_interviews(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Query(params): Query<LatestParams>,
) -> Result<Json<Vec<Interview>>, AppError> {
    let mut query = LatestInterviewsQuery::new(user.id);
    if let Some(limit) = params.limit {
        if !(1..=MAX_FEED_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {MAX_FEED_LIMIT}"
            )));
        }
        query = query.with_limit(limit);
    }

    Ok(Json(state.interviews.list_latest(&query).await?))
}

/// GET /api/dashboard
///
/// The caller's interviews and the discovery feed, fetched concurrently.
pub async fn handle_dashboard(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<DashboardResponse>, AppError> {
    let query = LatestInterviewsQuery::new(user.id.clone());

    let (user_interviews, latest_interviews) = tokio::try_join!(
        state.interviews.list_by_user(&user.id),
        state.interviews.list_latest(&query),
    )?;

    Ok(Json(DashboardResponse {
        user_interviews,
        latest_interviews,
    }))
}
