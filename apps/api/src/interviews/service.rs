//! Interview Generation: validate → generate questions → persist.
//!
//! All-or-nothing: nothing is written unless the model returned exactly the
//! requested number of usable questions.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::{FailureKind, PipelineError};
use crate::interviews::covers::random_cover;
use crate::interviews::generator::{QuestionGenerator, QuestionParams};
use crate::llm_client::LlmError;
use crate::models::interview::{split_techstack, Interview};
use crate::store::InterviewStore;

pub const MAX_QUESTIONS: u32 = 20;

/// `amount` as sent by the voice agent: a JSON number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(i64),
    Text(String),
}

impl Amount {
    fn parse(&self) -> Result<u32, PipelineError> {
        let value = match self {
            Amount::Number(n) => *n,
            Amount::Text(s) => s.trim().parse::<i64>().map_err(|_| {
                PipelineError::InvalidRequest(format!("amount '{s}' is not a whole number"))
            })?,
        };
        if !(1..=i64::from(MAX_QUESTIONS)).contains(&value) {
            return Err(PipelineError::InvalidRequest(format!(
                "amount must be between 1 and {MAX_QUESTIONS}, got {value}"
            )));
        }
        Ok(value as u32)
    }
}

/// Request body of `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInterviewRequest {
    #[serde(rename = "type")]
    pub interview_type: String,
    pub role: String,
    pub level: String,
    /// Comma-delimited, e.g. `"React,TypeScript"`.
    pub techstack: String,
    pub amount: Amount,
    #[serde(rename = "userid", alias = "userId")]
    pub user_id: String,
}

impl GenerateInterviewRequest {
    fn validate(&self) -> Result<QuestionParams, PipelineError> {
        for (field, value) in [
            ("type", &self.interview_type),
            ("role", &self.role),
            ("level", &self.level),
            ("userid", &self.user_id),
        ] {
            if value.trim().is_empty() {
                return Err(PipelineError::InvalidRequest(format!(
                    "{field} cannot be empty"
                )));
            }
        }

        let techstack = split_techstack(&self.techstack);
        if techstack.is_empty() {
            return Err(PipelineError::InvalidRequest(
                "techstack must name at least one technology".to_string(),
            ));
        }

        Ok(QuestionParams {
            role: self.role.trim().to_string(),
            level: self.level.trim().to_string(),
            interview_type: self.interview_type.trim().to_string(),
            techstack,
            amount: self.amount.parse()?,
        })
    }
}

/// Body returned by `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateOutcome {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<FailureKind>,
}

impl GenerateOutcome {
    pub fn created(interview: &Interview) -> Self {
        Self {
            success: true,
            interview_id: Some(interview.id),
            error: None,
            kind: None,
        }
    }

    pub fn failed(err: &PipelineError) -> Self {
        Self {
            success: false,
            interview_id: None,
            error: Some(err.to_string()),
            kind: Some(err.kind()),
        }
    }
}

/// Generates a question set and commits a new finalized interview.
pub async fn generate_interview(
    store: &dyn InterviewStore,
    generator: &dyn QuestionGenerator,
    request: GenerateInterviewRequest,
) -> Result<Interview, PipelineError> {
    let params = request.validate()?;

    let questions = generator
        .generate(&params)
        .await
        .and_then(|questions| check_questions(questions, params.amount))
        .map_err(|e| {
            error!("Question generation failed for {}: {e}", params.role);
            PipelineError::GenerationFailed(e)
        })?;

    let interview = Interview {
        id: Uuid::new_v4(),
        user_id: request.user_id.trim().to_string(),
        role: params.role,
        level: params.level,
        interview_type: params.interview_type,
        techstack: params.techstack,
        questions,
        finalized: true,
        cover_image: random_cover(),
        created_at: Utc::now(),
    };

    store.insert(&interview).await.map_err(|e| {
        error!("Failed to store interview {}: {e}", interview.id);
        PipelineError::StoreWriteFailed(e)
    })?;

    info!(
        "Created interview {} ({} questions) for user {}",
        interview.id,
        interview.questions.len(),
        interview.user_id
    );
    Ok(interview)
}

fn check_questions(questions: Vec<String>, amount: u32) -> Result<Vec<String>, LlmError> {
    let questions: Vec<String> = questions
        .into_iter()
        .map(|q| q.trim().to_string())
        .collect();

    if questions.iter().any(String::is_empty) {
        return Err(LlmError::Schema("model returned an empty question".to_string()));
    }
    if questions.len() != amount as usize {
        return Err(LlmError::Schema(format!(
            "expected {amount} questions, got {}",
            questions.len()
        )));
    }
    Ok(questions)
}
