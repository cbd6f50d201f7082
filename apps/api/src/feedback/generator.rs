//! Structured Feedback Generator: scores a formatted transcript under a strict
//! output schema.
//!
//! `AppState` holds an `Arc<dyn FeedbackGenerator>`; the Gemini-backed
//! implementation is the production default, tests substitute stubs.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::feedback::prompts::{CATEGORY_RUBRIC, FEEDBACK_PROMPT_TEMPLATE, FEEDBACK_SYSTEM};
use crate::llm_client::prompts::JSON_ONLY_INSTRUCTION;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::feedback::{Category, ScoredFeedback};

#[async_trait]
pub trait FeedbackGenerator: Send + Sync {
    /// Returns a fully validated assessment or fails; never a partial one.
    async fn generate(&self, formatted_transcript: &str) -> Result<ScoredFeedback, LlmError>;
}

pub struct GeminiFeedbackGenerator {
    llm: LlmClient,
    schema: Value,
}

impl GeminiFeedbackGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            schema: feedback_response_schema(),
        }
    }
}

#[async_trait]
impl FeedbackGenerator for GeminiFeedbackGenerator {
    async fn generate(&self, formatted_transcript: &str) -> Result<ScoredFeedback, LlmError> {
        let prompt = build_feedback_prompt(formatted_transcript);
        let system = format!("{FEEDBACK_SYSTEM} {JSON_ONLY_INSTRUCTION}");

        let scored: ScoredFeedback = self
            .llm
            .call_structured(&prompt, &system, &self.schema)
            .await?;

        info!("Transcript scored: total {}/100", scored.total_score.value());
        for category in scored.category_scores.iter() {
            debug!("  {}: {}", category.name.as_str(), category.score.value());
        }
        Ok(scored)
    }
}

fn build_feedback_prompt(formatted_transcript: &str) -> String {
    let categories = Category::ALL
        .iter()
        .zip(CATEGORY_RUBRIC)
        .map(|(category, rubric)| format!("- {}: {}", category.as_str(), rubric))
        .collect::<Vec<_>>()
        .join("\n");

    FEEDBACK_PROMPT_TEMPLATE
        .replace("{categories}", &categories)
        .replace("{transcript}", formatted_transcript)
}

/// Gemini response schema mirroring [`ScoredFeedback`]. Category names are an
/// enum and the list is pinned to five items; order is checked on decode.
pub fn feedback_response_schema() -> Value {
    let names: Vec<&str> = Category::ALL.iter().map(Category::as_str).collect();
    let score = json!({"type": "INTEGER", "minimum": 0, "maximum": 100});

    json!({
        "type": "OBJECT",
        "properties": {
            "totalScore": score,
            "categoryScores": {
                "type": "ARRAY",
                "minItems": Category::ALL.len(),
                "maxItems": Category::ALL.len(),
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING", "enum": names},
                        "score": score,
                        "comment": {"type": "STRING"}
                    },
                    "required": ["name", "score", "comment"],
                    "propertyOrdering": ["name", "score", "comment"]
                }
            },
            "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
            "areasForImprovement": {"type": "ARRAY", "items": {"type": "STRING"}},
            "finalAssessment": {"type": "STRING"}
        },
        "required": [
            "totalScore",
            "categoryScores",
            "strengths",
            "areasForImprovement",
            "finalAssessment"
        ],
        "propertyOrdering": [
            "totalScore",
            "categoryScores",
            "strengths",
            "areasForImprovement",
            "finalAssessment"
        ]
    })
}
