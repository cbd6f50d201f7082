// Prompt constants for interview question generation.

/// System prompt for question generation.
pub const QUESTIONS_SYSTEM: &str = "You are an experienced technical recruiter preparing \
    questions for a spoken mock job interview.";

/// Question prompt template.
/// Replace: {role}, {level}, {techstack}, {interview_type}, {amount}, {voice_instruction}
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Prepare questions for a job interview.
The job role is {role}.
The job experience level is {level}.
The tech stack used in the job is: {techstack}.
The focus between behavioural and technical questions should lean towards: {interview_type}.
The amount of questions required is: {amount}.
Please return only the questions, without any additional text.
{voice_instruction}
Return the questions as a JSON array of exactly {amount} strings, like this:
["Question 1", "Question 2", "Question 3"]

Thank you! <3"#;
