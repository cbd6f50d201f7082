//! Question Generator: produces an interview question list under a strict
//! array-of-strings schema.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::interviews::prompts::{QUESTIONS_PROMPT_TEMPLATE, QUESTIONS_SYSTEM};
use crate::llm_client::prompts::{JSON_ONLY_INSTRUCTION, VOICE_SAFE_INSTRUCTION};
use crate::llm_client::{LlmClient, LlmError};

/// Validated job parameters a question set is generated for.
#[derive(Debug, Clone, PartialEq)]
pub struct QuestionParams {
    pub role: String,
    pub level: String,
    pub interview_type: String,
    pub techstack: Vec<String>,
    pub amount: u32,
}

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, params: &QuestionParams) -> Result<Vec<String>, LlmError>;
}

pub struct GeminiQuestionGenerator {
    llm: LlmClient,
}

impl GeminiQuestionGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionGenerator for GeminiQuestionGenerator {
    async fn generate(&self, params: &QuestionParams) -> Result<Vec<String>, LlmError> {
        let prompt = build_questions_prompt(params);
        let system = format!("{QUESTIONS_SYSTEM} {JSON_ONLY_INSTRUCTION}");
        let schema = questions_response_schema(params.amount);

        let questions: Vec<String> = self.llm.call_structured(&prompt, &system, &schema).await?;

        info!(
            "Generated {} questions for {} {} role",
            questions.len(),
            params.level,
            params.role
        );
        Ok(questions)
    }
}

fn build_questions_prompt(params: &QuestionParams) -> String {
    QUESTIONS_PROMPT_TEMPLATE
        .replace("{voice_instruction}", VOICE_SAFE_INSTRUCTION)
        .replace("{role}", &params.role)
        .replace("{level}", &params.level)
        .replace("{techstack}", &params.techstack.join(", "))
        .replace("{interview_type}", &params.interview_type)
        .replace("{amount}", &params.amount.to_string())
}

/// Array of exactly `amount` non-empty strings.
pub fn questions_response_schema(amount: u32) -> Value {
    json!({
        "type": "ARRAY",
        "minItems": amount,
        "maxItems": amount,
        "items": {"type": "STRING"}
    })
}
