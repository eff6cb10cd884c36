// Resume extraction prompt templates.
// The instruction, token cap and temperature are fixed; callers cannot tune them per request.

pub const MAX_TOKENS: u32 = 1000;
pub const TEMPERATURE: f32 = 0.5;

pub const RESUME_EXTRACTION_SYSTEM: &str = "\
You are a helpful assistant that extracts information from resumes for an interviewer.";

pub const RESUME_EXTRACTION_PROMPT: &str = r#"Extract the following information from the resume text below:
1. Name
2. Email
3. GitHub (if available)
4. LinkedIn (if available)
5. Education (list of degrees)
6. Professional Experience (list of roles with their descriptions and durations)
7. Projects (list of projects with names, descriptions and the technologies used)
8. Questions and Answers (list of questions an interviewer could ask about this resume, each with an answer supported by the resume)
9. Skills (list of skills)

RESUME TEXT:
{resume_text}

Return a single JSON object whose keys are exactly the field names above.
Professional Experience, Skills, Projects, and Questions and Answers MUST be arrays."#;

/// Embeds the source text verbatim into the extraction instruction.
pub fn build_extraction_prompt(resume_text: &str) -> String {
    RESUME_EXTRACTION_PROMPT.replace("{resume_text}", resume_text)
}
