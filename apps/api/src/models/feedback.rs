use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The five rubric dimensions every feedback is scored on, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Communication Skills")]
    CommunicationSkills,
    #[serde(rename = "Technical Knowledge")]
    TechnicalKnowledge,
    #[serde(rename = "Problem Solving")]
    ProblemSolving,
    #[serde(rename = "Cultural & Role Fit")]
    CulturalFit,
    #[serde(rename = "Confidence & Clarity")]
    ConfidenceAndClarity,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::CommunicationSkills,
        Category::TechnicalKnowledge,
        Category::ProblemSolving,
        Category::CulturalFit,
        Category::ConfidenceAndClarity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::CommunicationSkills => "Communication Skills",
            Category::TechnicalKnowledge => "Technical Knowledge",
            Category::ProblemSolving => "Problem Solving",
            Category::CulturalFit => "Cultural & Role Fit",
            Category::ConfidenceAndClarity => "Confidence & Clarity",
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ScoreError {
    #[error("score {0} is outside 0..=100")]
    OutOfRange(u32),

    #[error("expected {expected} category scores, got {actual}")]
    CategoryCount { expected: usize, actual: usize },

    #[error("category #{position} must be '{expected}', got '{actual}'")]
    CategoryOrder {
        position: usize,
        expected: &'static str,
        actual: &'static str,
    },
}

/// An integer score in 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Score(u8);

impl Score {
    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u32> for Score {
    type Error = ScoreError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        if value > 100 {
            return Err(ScoreError::OutOfRange(value));
        }
        Ok(Score(value as u8))
    }
}

impl From<Score> for u32 {
    fn from(score: Score) -> Self {
        score.0 as u32
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub name: Category,
    pub score: Score,
    pub comment: String,
}

/// Exactly one score per [`Category`], in [`Category::ALL`] order.
///
/// Any other shape is rejected while deserializing, so a value of this type
/// coming from the model or from the store always satisfies the invariant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CategoryScore>", into = "Vec<CategoryScore>")]
pub struct CategoryScores([CategoryScore; 5]);

impl CategoryScores {
    pub fn iter(&self) -> impl Iterator<Item = &CategoryScore> {
        self.0.iter()
    }
}

impl TryFrom<Vec<CategoryScore>> for CategoryScores {
    type Error = ScoreError;

    fn try_from(scores: Vec<CategoryScore>) -> Result<Self, Self::Error> {
        let actual = scores.len();
        let scores: [CategoryScore; 5] =
            scores
                .try_into()
                .map_err(|_| ScoreError::CategoryCount {
                    expected: Category::ALL.len(),
                    actual,
                })?;

        for (position, (score, expected)) in scores.iter().zip(Category::ALL).enumerate() {
            if score.name != expected {
                return Err(ScoreError::CategoryOrder {
                    position: position + 1,
                    expected: expected.as_str(),
                    actual: score.name.as_str(),
                });
            }
        }

        Ok(CategoryScores(scores))
    }
}

impl From<CategoryScores> for Vec<CategoryScore> {
    fn from(scores: CategoryScores) -> Self {
        scores.0.into()
    }
}

/// The validated assessment produced by the feedback generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredFeedback {
    pub total_score: Score,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
}

/// One speaker turn of an interview conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptTurn {
    pub role: String,
    pub content: String,
}

/// A persisted feedback record. At most one exists per `(interview_id, user_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: Uuid,
    pub interview_id: Uuid,
    pub user_id: String,
    pub transcript: Vec<TranscriptTurn>,
    pub total_score: Score,
    pub category_scores: CategoryScores,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    pub final_assessment: String,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn new(
        interview_id: Uuid,
        user_id: String,
        transcript: Vec<TranscriptTurn>,
        scored: ScoredFeedback,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            interview_id,
            user_id,
            transcript,
            total_score: scored.total_score,
            category_scores: scored.category_scores,
            strengths: scored.strengths,
            areas_for_improvement: scored.areas_for_improvement,
            final_assessment: scored.final_assessment,
            created_at: Utc::now(),
        }
    }
}
