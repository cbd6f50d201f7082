//! Axum route handlers for interview feedback.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::feedback::service::{create_feedback, CreateFeedback, FeedbackOutcome};
use crate::models::feedback::{Feedback, TranscriptTurn};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedbackBody {
    pub transcript: Vec<TranscriptTurn>,
}

/// POST /api/interviews/:id/feedback
///
/// Scores the finished session's transcript for the current user.
/// Returns the existing feedback id if this user was already scored.
pub async fn handle_create_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(interview_id): Path<Uuid>,
    Json(body): Json<CreateFeedbackBody>,
) -> Result<(StatusCode, Json<FeedbackOutcome>), AppError> {
    if state.interviews.get_by_id(interview_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "Interview {interview_id} not found"
        )));
    }

    let result = create_feedback(
        state.feedbacks.as_ref(),
        state.feedback_generator.as_ref(),
        CreateFeedback {
            interview_id,
            user_id: user.id,
            transcript: body.transcript,
        },
    )
    .await;

    let status = match &result {
        Ok(_) => StatusCode::OK,
        Err(e) => e.status(),
    };
    Ok((status, Json(FeedbackOutcome::from(&result))))
}

/// GET /api/interviews/:id/feedback
pub async fn handle_get_feedback(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(interview_id): Path<Uuid>,
) -> Result<Json<Feedback>, AppError> {
    let feedback = state
        .feedbacks
        .find_by_interview(interview_id, &user.id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("No feedback for interview {interview_id}"))
        })?;

    Ok(Json(feedback))
}
