// Feedback pipeline: transcript formatting, structured scoring, one-per-pair persistence.
// All model calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod service;
pub mod transcript;
