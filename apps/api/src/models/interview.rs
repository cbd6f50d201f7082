use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A generated interview definition. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interview {
    pub id: Uuid,
    pub user_id: String,
    pub role: String,
    pub level: String,
    /// Behavioral / technical / mixed bias, as requested.
    #[serde(rename = "type")]
    pub interview_type: String,
    pub techstack: Vec<String>,
    pub questions: Vec<String>,
    pub finalized: bool,
    pub cover_image: String,
    pub created_at: DateTime<Utc>,
}

/// Splits a comma-delimited tech stack, trimming each entry and dropping blanks.
pub fn split_techstack(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Query for the discovery feed: other users' finalized interviews.
#[derive(Debug, Clone)]
pub struct LatestInterviewsQuery {
    pub user_id: String,
    pub limit: u32,
}

impl LatestInterviewsQuery {
    pub const DEFAULT_LIMIT: u32 = 20;

    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            limit: Self::DEFAULT_LIMIT,
        }
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }
}
