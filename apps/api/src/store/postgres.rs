//! PostgreSQL-backed document store.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::feedback::Feedback;
use crate::models::interview::{Interview, LatestInterviewsQuery};
use crate::models::user::User;
use crate::store::{
    decode_document, encode_document, FeedbackInsert, FeedbackStore, InterviewStore, StoreError,
    UserStore, FEEDBACKS, INTERVIEWS, USERS,
};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    doc: Value,
}

fn decode_rows<T: serde::de::DeserializeOwned>(
    collection: &'static str,
    rows: Vec<DocumentRow>,
) -> Result<Vec<T>, StoreError> {
    rows.into_iter()
        .map(|row| decode_document(collection, row.id, row.doc))
        .collect()
}

#[derive(Clone)]
pub struct PgInterviewStore {
    pool: PgPool,
}

impl PgInterviewStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InterviewStore for PgInterviewStore {
    async fn insert(&self, interview: &Interview) -> Result<(), StoreError> {
        let doc = encode_document(INTERVIEWS, interview)?;

        sqlx::query(
            r#"
            INSERT INTO interviews (id, user_id, finalized, created_at, doc)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(interview.id)
        .bind(&interview.user_id)
        .bind(interview.finalized)
        .bind(interview.created_at)
        .bind(&doc)
        .execute(&self.pool)
        .await?;

        info!(
            "Inserted interview {} for user {}",
            interview.id, interview.user_id
        );
        Ok(())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Interview>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>("SELECT id, doc FROM interviews WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| decode_document(INTERVIEWS, r.id, r.doc))
            .transpose()
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM interviews
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        decode_rows(INTERVIEWS, rows)
    }

    async fn list_latest(
        &self,
        query: &LatestInterviewsQuery,
    ) -> Result<Vec<Interview>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM interviews
            WHERE finalized = TRUE AND user_id <> $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(&query.user_id)
        .bind(i64::from(query.limit))
        .fetch_all(&self.pool)
        .await?;

        decode_rows(INTERVIEWS, rows)
    }
}

#[derive(Clone)]
pub struct PgFeedbackStore {
    pool: PgPool,
}

impl PgFeedbackStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedbackStore for PgFeedbackStore {
    async fn insert(&self, feedback: &Feedback) -> Result<FeedbackInsert, StoreError> {
        let doc = encode_document(FEEDBACKS, feedback)?;

        // The unique constraint decides the race; the loser reads the winner's id.
        let inserted: Option<Uuid> = sqlx::query_scalar(
            r#"
            INSERT INTO feedbacks (id, interview_id, user_id, created_at, doc)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (interview_id, user_id) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(feedback.id)
        .bind(feedback.interview_id)
        .bind(&feedback.user_id)
        .bind(feedback.created_at)
        .bind(&doc)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(id) = inserted {
            info!(
                "Inserted feedback {} for interview {} / user {}",
                id, feedback.interview_id, feedback.user_id
            );
            return Ok(FeedbackInsert::Created(id));
        }

        let existing: Uuid = sqlx::query_scalar(
            "SELECT id FROM feedbacks WHERE interview_id = $1 AND user_id = $2",
        )
        .bind(feedback.interview_id)
        .bind(&feedback.user_id)
        .fetch_one(&self.pool)
        .await?;

        debug!(
            "Feedback for interview {} / user {} already exists as {}",
            feedback.interview_id, feedback.user_id, existing
        );
        Ok(FeedbackInsert::Existing(existing))
    }

    async fn find_by_interview(
        &self,
        interview_id: Uuid,
        user_id: &str,
    ) -> Result<Option<Feedback>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, doc
            FROM feedbacks
            WHERE interview_id = $1 AND user_id = $2
            LIMIT 1
            "#,
        )
        .bind(interview_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| decode_document(FEEDBACKS, r.id, r.doc))
            .transpose()
    }
}

#[derive(Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create(&self, user: &User) -> Result<bool, StoreError> {
        let doc = encode_document(USERS, user)?;

        let result = sqlx::query(
            "INSERT INTO users (id, doc) VALUES ($1, $2) ON CONFLICT (id) DO NOTHING",
        )
        .bind(&user.id)
        .bind(&doc)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        let row: Option<(String, Value)> =
            sqlx::query_as("SELECT id, doc FROM users WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        row.map(|(id, doc)| decode_document(USERS, id, doc))
            .transpose()
    }
}
