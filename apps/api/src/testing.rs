//! Test doubles shared by unit and router tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::auth::{SessionError, SessionResolver};
use crate::feedback::generator::FeedbackGenerator;
use crate::interviews::generator::{QuestionGenerator, QuestionParams};
use crate::llm_client::LlmError;
use crate::models::feedback::{fixtures::scored_feedback, ScoredFeedback};
use crate::models::user::User;
use crate::state::AppState;
use crate::store::memory::{MemoryFeedbackStore, MemoryInterviewStore, MemoryUserStore};

pub struct StubFeedbackGenerator {
    total_score: Option<u32>,
    pub calls: AtomicUsize,
    last_transcript: Mutex<Option<String>>,
}

impl StubFeedbackGenerator {
    pub fn scoring(total_score: u32) -> Self {
        Self {
            total_score: Some(total_score),
            calls: AtomicUsize::new(0),
            last_transcript: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            total_score: None,
            ..Self::scoring(0)
        }
    }

    pub fn last_transcript(&self) -> Option<String> {
        self.last_transcript.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedbackGenerator for StubFeedbackGenerator {
    async fn generate(&self, formatted_transcript: &str) -> Result<ScoredFeedback, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_transcript.lock().unwrap() = Some(formatted_transcript.to_string());
        match self.total_score {
            Some(total) => Ok(scored_feedback(total)),
            None => Err(LlmError::Api {
                status: 503,
                message: "model overloaded".to_string(),
            }),
        }
    }
}

enum QuestionBehavior {
    Answer,
    Return(Vec<String>),
    Fail,
}

pub struct StubQuestionGenerator {
    behavior: QuestionBehavior,
    calls: AtomicUsize,
}

impl StubQuestionGenerator {
    /// Returns exactly the requested number of questions.
    pub fn answering() -> Self {
        Self {
            behavior: QuestionBehavior::Answer,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn returning(questions: Vec<String>) -> Self {
        Self {
            behavior: QuestionBehavior::Return(questions),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: QuestionBehavior::Fail,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl QuestionGenerator for StubQuestionGenerator {
    async fn generate(&self, params: &QuestionParams) -> Result<Vec<String>, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            QuestionBehavior::Answer => Ok((1..=params.amount)
                .map(|i| format!("Question {i} about {}", params.techstack.join(" and ")))
                .collect()),
            QuestionBehavior::Return(questions) => Ok(questions.clone()),
            QuestionBehavior::Fail => Err(LlmError::Parse(
                serde_json::from_str::<Vec<String>>("not json").unwrap_err(),
            )),
        }
    }
}

/// Maps fixed tokens to users.
#[derive(Default)]
pub struct StubSessions {
    tokens: HashMap<String, User>,
}

impl StubSessions {
    pub fn with(mut self, token: &str, user: User) -> Self {
        self.tokens.insert(token.to_string(), user);
        self
    }
}

#[async_trait]
impl SessionResolver for StubSessions {
    async fn resolve(&self, token: &str) -> Result<Option<User>, SessionError> {
        Ok(self.tokens.get(token).cloned())
    }
}

pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        name: format!("User {id}"),
        email: format!("{id}@example.com"),
    }
}

/// Handles kept by router tests to inspect state after requests.
pub struct TestHarness {
    pub state: AppState,
    pub interviews: Arc<MemoryInterviewStore>,
    pub feedbacks: Arc<MemoryFeedbackStore>,
    pub scorer: Arc<StubFeedbackGenerator>,
}

/// State with in-memory stores. Token `alice-token` → user `alice`,
/// `bob-token` → user `bob`.
pub fn harness(questions: StubQuestionGenerator, scorer: StubFeedbackGenerator) -> TestHarness {
    let interviews = Arc::new(MemoryInterviewStore::default());
    let feedbacks = Arc::new(MemoryFeedbackStore::default());
    let scorer = Arc::new(scorer);
    let sessions = StubSessions::default()
        .with("alice-token", user("alice"))
        .with("bob-token", user("bob"));

    let state = AppState {
        interviews: interviews.clone(),
        feedbacks: feedbacks.clone(),
        users: Arc::new(MemoryUserStore::default()),
        sessions: Arc::new(sessions),
        question_generator: Arc::new(questions),
        feedback_generator: scorer.clone(),
    };

    TestHarness {
        state,
        interviews,
        feedbacks,
        scorer,
    }
}
