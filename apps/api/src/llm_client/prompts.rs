// Shared prompt fragments.
// Each generator that needs model calls defines its own prompts.rs alongside it.

/// Appended to every system prompt: the response is schema-bound JSON.
pub const JSON_ONLY_INSTRUCTION: &str = "You MUST respond with JSON that matches the \
    provided response schema exactly. \
    Do NOT include any text outside the JSON value. \
    Do NOT use markdown code fences.";

/// Output of the interview pipeline is spoken aloud by a voice agent.
pub const VOICE_SAFE_INSTRUCTION: &str = "The text will be read aloud by a voice assistant. \
    Do NOT use slashes, asterisks, bullet markers, or any other special symbols.";
