//! Feedback creation: format → score → persist, at most once per (interview, user).

use serde::Serialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{FailureKind, PipelineError};
use crate::feedback::generator::FeedbackGenerator;
use crate::feedback::transcript::format_transcript;
use crate::models::feedback::{Feedback, TranscriptTurn};
use crate::store::{FeedbackInsert, FeedbackStore};

#[derive(Debug, Clone)]
pub struct CreateFeedback {
    pub interview_id: Uuid,
    pub user_id: String,
    pub transcript: Vec<TranscriptTurn>,
}

/// Body returned to callers of feedback creation. `success` stays a plain
/// boolean; `error` tells generation failures apart from store failures.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<FailureKind>,
}

impl From<&Result<FeedbackInsert, PipelineError>> for FeedbackOutcome {
    fn from(result: &Result<FeedbackInsert, PipelineError>) -> Self {
        match result {
            Ok(FeedbackInsert::Created(id)) => FeedbackOutcome {
                success: true,
                message: "Feedback created successfully".to_string(),
                feedback_id: Some(*id),
                error: None,
            },
            Ok(FeedbackInsert::Existing(id)) => FeedbackOutcome {
                success: true,
                message: "Feedback already exists for this interview".to_string(),
                feedback_id: Some(*id),
                error: None,
            },
            Err(e) => FeedbackOutcome {
                success: false,
                message: "Failed to create feedback".to_string(),
                feedback_id: None,
                error: Some(e.kind()),
            },
        }
    }
}

/// Scores a transcript and stores the result.
///
/// If the pair already has feedback, its id is returned without calling the
/// model. Concurrent creators are resolved by the store's insert, so the pair
/// never ends up with two records.
pub async fn create_feedback(
    feedbacks: &dyn FeedbackStore,
    generator: &dyn FeedbackGenerator,
    request: CreateFeedback,
) -> Result<FeedbackInsert, PipelineError> {
    let CreateFeedback {
        interview_id,
        user_id,
        transcript,
    } = request;

    if let Some(existing) = feedbacks
        .find_by_interview(interview_id, &user_id)
        .await
        .map_err(PipelineError::StoreReadFailed)?
    {
        info!(
            "Feedback {} already exists for interview {} / user {}",
            existing.id, interview_id, user_id
        );
        return Ok(FeedbackInsert::Existing(existing.id));
    }

    let formatted = format_transcript(&transcript);

    let scored = generator.generate(&formatted).await.map_err(|e| {
        error!("Feedback generation failed for interview {interview_id}: {e}");
        PipelineError::GenerationFailed(e)
    })?;

    let feedback = Feedback::new(interview_id, user_id, transcript, scored);

    let inserted = feedbacks.insert(&feedback).await.map_err(|e| {
        error!("Failed to store feedback for interview {interview_id}: {e}");
        PipelineError::StoreWriteFailed(e)
    })?;

    info!(
        "Feedback {} recorded for interview {interview_id}",
        inserted.id()
    );
    Ok(inserted)
}
