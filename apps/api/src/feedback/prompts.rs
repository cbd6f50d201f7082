// Prompt constants for feedback scoring.

/// System prompt for transcript scoring.
pub const FEEDBACK_SYSTEM: &str = "You are a professional interviewer analyzing a mock \
    interview. Your task is to evaluate the candidate based on structured categories.";

/// Scoring prompt. Replace `{transcript}` and `{categories}` before sending.
pub const FEEDBACK_PROMPT_TEMPLATE: &str = r#"You are an AI interviewer analyzing a mock interview. Your task is to evaluate the candidate based on structured categories. Be thorough and detailed in your analysis. Don't be lenient with the candidate. If there are mistakes or areas for improvement, point them out.

Transcript:
{transcript}

Please score the candidate from 0 to 100 in the following areas, in exactly this order. Do not add categories other than the ones provided:
{categories}

Also give an overall totalScore from 0 to 100, a list of strengths, a list of areasForImprovement, and a short finalAssessment."#;

/// One rubric line per category, in schema order.
pub const CATEGORY_RUBRIC: [&str; 5] = [
    "Clarity, articulation, structured responses.",
    "Understanding of key concepts for the role.",
    "Ability to analyze problems and propose solutions.",
    "Alignment with company values and job role.",
    "Confidence in responses, engagement, and clarity.",
];
