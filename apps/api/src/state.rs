use std::sync::Arc;

use crate::auth::SessionResolver;
use crate::feedback::generator::FeedbackGenerator;
use crate::interviews::generator::QuestionGenerator;
use crate::store::{FeedbackStore, InterviewStore, UserStore};

/// Shared application state injected into all route handlers via Axum extractors.
/// Every external collaborator is a trait object so tests can swap in doubles.
#[derive(Clone)]
pub struct AppState {
    pub interviews: Arc<dyn InterviewStore>,
    pub feedbacks: Arc<dyn FeedbackStore>,
    pub users: Arc<dyn UserStore>,
    /// Resolves session tokens issued by the external identity provider.
    pub sessions: Arc<dyn SessionResolver>,
    pub question_generator: Arc<dyn QuestionGenerator>,
    pub feedback_generator: Arc<dyn FeedbackGenerator>,
}
