// Interview generation and retrieval.
// All model calls go through llm_client.

pub mod covers;
pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod service;
