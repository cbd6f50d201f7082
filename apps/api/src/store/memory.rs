//! In-memory stores for tests. Documents go through the same encode/decode
//! path as the PostgreSQL store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use uuid::Uuid;

use crate::models::feedback::Feedback;
use crate::models::interview::{Interview, LatestInterviewsQuery};
use crate::models::user::User;
use crate::store::{
    decode_document, encode_document, FeedbackInsert, FeedbackStore, InterviewStore, StoreError,
    UserStore, FEEDBACKS, INTERVIEWS, USERS,
};

struct InterviewRow {
    id: Uuid,
    user_id: String,
    finalized: bool,
    created_at: DateTime<Utc>,
    doc: Value,
}

#[derive(Default)]
pub struct MemoryInterviewStore {
    rows: Mutex<Vec<InterviewRow>>,
    fail_writes: AtomicBool,
}

impl MemoryInterviewStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Overwrites a stored document in place, bypassing entity encoding.
    pub fn corrupt(&self, id: Uuid, doc: Value) {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|r| r.id == id) {
            row.doc = doc;
        }
    }

    fn select(
        &self,
        filter: impl Fn(&InterviewRow) -> bool,
        limit: Option<usize>,
    ) -> Result<Vec<Interview>, StoreError> {
        let rows = self.rows.lock().unwrap();
        let mut matching: Vec<&InterviewRow> = rows.iter().filter(|r| filter(r)).collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matching
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|r| decode_document(INTERVIEWS, r.id, r.doc.clone()))
            .collect()
    }
}

#[async_trait]
impl InterviewStore for MemoryInterviewStore {
    async fn insert(&self, interview: &Interview) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let doc = encode_document(INTERVIEWS, interview)?;
        self.rows.lock().unwrap().push(InterviewRow {
            id: interview.id,
            user_id: interview.user_id.clone(),
            finalized: interview.finalized,
            created_at: interview.created_at,
            doc,
        });
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        Ok(self.select(|r| r.id == id, Some(1))?.pop())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        self.select(|r| r.user_id == user_id, None)
    }

    async fn list_latest(
        &self,
        query: &LatestInterviewsQuery,
    ) -> Result<Vec<Interview>, StoreError> {
        self.select(
            |r| r.finalized && r.user_id != query.user_id,
            Some(query.limit as usize),
        )
    }
}

#[derive(Default)]
pub struct MemoryFeedbackStore {
    rows: Mutex<HashMap<(Uuid, String), (Uuid, Value)>>,
    fail_writes: AtomicBool,
}

impl MemoryFeedbackStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl FeedbackStore for MemoryFeedbackStore {
    async fn insert(&self, feedback: &Feedback) -> Result<FeedbackInsert, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Database(sqlx::Error::PoolTimedOut));
        }
        let doc = encode_document(FEEDBACKS, feedback)?;
        let mut rows = self.rows.lock().unwrap();
        let key = (feedback.interview_id, feedback.user_id.clone());
        if let Some((existing, _)) = rows.get(&key) {
            return Ok(FeedbackInsert::Existing(*existing));
        }
        rows.insert(key, (feedback.id, doc));
        Ok(FeedbackInsert::Created(feedback.id))
    }

    async fn find_by_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.get(&(interview_id, user_id.to_string()))
            .map(|(id, doc)| decode_document(FEEDBACKS, id, doc.clone()))
            .transpose()
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    rows: Mutex<HashMap<String, Value>>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn create(&self, user: &User) -> Result<bool, StoreError> {
        let doc = encode_document(USERS, user)?;
        let mut rows = self.rows.lock().unwrap();
        if rows.contains_key(&user.id) {
            return Ok(false);
        }
        rows.insert(user.id.clone(), doc);
        Ok(true)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let rows = self.rows.lock().unwrap();
        rows.get(id)
            .map(|doc| decode_document(USERS, id, doc.clone()))
            .transpose()
    }
}
