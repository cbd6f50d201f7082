//! Persistence boundary.
//!
//! Records are stored as schemaless JSON documents with their generated id kept
//! outside the document body. Everything read back goes through
//! [`decode_document`], so a malformed document surfaces as
//! [`StoreError::Decode`] instead of a silently wrong entity.
//!
//! Services depend on the traits only; `AppState` carries them as `Arc<dyn _>`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

use crate::models::feedback::Feedback;
use crate::models::interview::{Interview, LatestInterviewsQuery};
use crate::models::user::User;

#[cfg(test)]
pub mod memory;
pub mod postgres;

pub const INTERVIEWS: &str = "interviews";
pub const FEEDBACKS: &str = "feedbacks";
pub const USERS: &str = "users";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document {collection}/{id} does not match its schema: {source}")]
    Decode {
        collection: &'static str,
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode {collection} document: {source}")]
    Encode {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of inserting a feedback record under the one-per-pair rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackInsert {
    Created(Uuid),
    /// Another feedback already exists for the pair; carries its id.
    Existing(Uuid),
}

impl FeedbackInsert {
    pub fn id(self) -> Uuid {
        match self {
            FeedbackInsert::Created(id) | FeedbackInsert::Existing(id) => id,
        }
    }
}

#[async_trait]
pub trait InterviewStore: Send + Sync {
    async fn insert(&self, interview: &Interview) -> Result<(), StoreError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Interview>, StoreError>;

    /// All interviews owned by `user_id`, newest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError>;

    /// Finalized interviews NOT owned by `query.user_id`, newest first.
    async fn list_latest(
        &self,
        query: &LatestInterviewsQuery,
    ) -> Result<Vec<Interview>, StoreError>;
}

#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Inserts unless a feedback already exists for `(interview_id, user_id)`.
    async fn insert(&self, feedback: &Feedback) -> Result<FeedbackInsert, StoreError>;

    async fn find_by_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Returns `false` when a profile with this id already exists.
    async fn create(&self, user: &User) -> Result<bool, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError>;
}

/// Serializes an entity into its stored document, dropping the `id` field.
pub fn encode_document<T: Serialize>(
    collection: &'static str,
    entity: &T,
) -> Result<Value, StoreError> {
    let mut doc = serde_json::to_value(entity)
        .map_err(|source| StoreError::Encode { collection, source })?;
    if let Value::Object(map) = &mut doc {
        map.remove("id");
    }
    Ok(doc)
}

/// Rebuilds a typed entity from a stored document and its id.
pub fn decode_document<T: DeserializeOwned>(
    collection: &'static str,
    id: impl ToString,
    doc: Value,
) -> Result<T, StoreError> {
    let id = id.to_string();
    let doc = match doc {
        Value::Object(mut map) => {
            map.insert("id".to_string(), Value::String(id.clone()));
            Value::Object(map)
        }
        other => other,
    };
    serde_json::from_value(doc).map_err(|source| StoreError::Decode {
        collection,
        id,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::feedback::fixtures::scored_feedback;
    use serde_json::json;

    #[test]
    fn test_encode_document_strips_id() {
        let user = User {
            id: "uid-1".to_string(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
        };
        let doc = encode_document(USERS, &user).unwrap();
        assert_eq!(doc, json!({"name": "Ada", "email": "ada@example.com"}));
    }

    #[test]
    fn test_decode_document_restores_id() {
        let user: User = decode_document(
            USERS,
            "uid-1",
            json!({"name": "Ada", "email": "ada@example.com"}),
        )
        .unwrap();
        assert_eq!(user.id, "uid-1");
    }

    #[test]
    fn test_decode_document_reports_shape_mismatch() {
        let result: Result<User, _> = decode_document(USERS, "uid-2", json!({"name": 7}));
        match result {
            Err(StoreError::Decode { collection, id, .. }) => {
                assert_eq!(collection, USERS);
                assert_eq!(id, "uid-2");
            }
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_document_rejects_non_object() {
        let result: Result<User, _> = decode_document(USERS, "uid-3", json!(["not", "a", "doc"]));
        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_feedback_document_with_four_categories_fails_decode() {
        let feedback = Feedback::new(Uuid::new_v4(), "u1".to_string(), vec![], scored_feedback(60));
        let id = feedback.id;
        let mut doc = encode_document(FEEDBACKS, &feedback).unwrap();
        doc["categoryScores"].as_array_mut().unwrap().pop();

        let result: Result<Feedback, _> = decode_document(FEEDBACKS, id, doc);
        assert!(matches!(result, Err(StoreError::Decode { .. })));
    }

    #[test]
    fn test_feedback_document_round_trips_through_store_encoding() {
        let feedback = Feedback::new(Uuid::new_v4(), "u1".to_string(), vec![], scored_feedback(60));
        let doc = encode_document(FEEDBACKS, &feedback).unwrap();
        let decoded: Feedback = decode_document(FEEDBACKS, feedback.id, doc).unwrap();
        assert_eq!(decoded, feedback);
    }
}
