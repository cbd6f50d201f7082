pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::feedback::handlers as feedback;
use crate::interviews::handlers as interviews;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Voice-agent workflow
        .route(
            "/api/generate",
            get(interviews::handle_generate_ping).post(interviews::handle_generate),
        )
        // Identity
        .route("/api/auth/sign-up", post(auth::handle_sign_up))
        .route("/api/auth/me", get(auth::handle_me))
        // Interviews
        .route("/api/dashboard", get(interviews::handle_dashboard))
        .route("/api/discover", get(interviews::handle_latest_interviews))
        .route("/api/interviews", get(interviews::handle_my_interviews))
        .route("/api/interviews/:id", get(interviews::handle_get_interview))
        // Feedback
        .route(
            "/api/interviews/:id/feedback",
            get(feedback::handle_get_feedback).post(feedback::handle_create_feedback),
        )
        .with_state(state)
}
