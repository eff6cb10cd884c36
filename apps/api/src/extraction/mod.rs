// Resume extraction: text → generator → three-tier parse → normalized record.
// All generation goes through the injected `TextGenerator`; nothing here talks HTTP.

pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod prompts;

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::extraction::normalize::normalize;
use crate::extraction::parser::{parse_generator_output, ParseTier};
use crate::extraction::prompts::{
    build_extraction_prompt, MAX_TOKENS, RESUME_EXTRACTION_SYSTEM, TEMPERATURE,
};
use crate::llm_client::{GenerationError, GenerationRequest, TextGenerator};
use crate::models::StructuredRecord;

pub use pipeline::{PipelineError, ResumePipeline};

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The generator returned valid JSON that is not an object, so no record can be built.
    #[error("generator output parsed to a JSON {found}, expected an object")]
    NotAnObject { found: &'static str },
}

impl ExtractionError {
    pub fn is_transient(&self) -> bool {
        match self {
            ExtractionError::Generation(e) => e.is_transient(),
            ExtractionError::NotAnObject { .. } => false,
        }
    }
}

/// Turns source text into a `StructuredRecord` with a single generation call.
#[derive(Clone)]
pub struct StructuredExtractor {
    generator: Arc<dyn TextGenerator>,
}

impl StructuredExtractor {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Empty source text is not special-cased; the generator is still called.
    pub async fn extract_structured_record(
        &self,
        text: &str,
    ) -> Result<StructuredRecord, ExtractionError> {
        let prompt = build_extraction_prompt(text);
        let request = GenerationRequest {
            system: RESUME_EXTRACTION_SYSTEM,
            prompt: &prompt,
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let response = self.generator.generate(&request).await?;
        let parsed = parse_generator_output(&response);

        match parsed.tier {
            ParseTier::WholeResponse => debug!("Generator output parsed as JSON"),
            ParseTier::EmbeddedObject => {
                warn!("Generator output had text around the JSON object; used embedded span")
            }
            ParseTier::LineScan => warn!(
                "Generator output was not JSON; fell back to line scan ({} chars)",
                response.len()
            ),
        }

        normalize(parsed.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::ScriptedGenerator;
    use crate::models::Entry;

    fn extractor(generator: &Arc<ScriptedGenerator>) -> StructuredExtractor {
        StructuredExtractor::new(generator.clone())
    }

    fn skill_texts(record: &StructuredRecord) -> Vec<&str> {
        record.skills.iter().filter_map(Entry::as_text).collect()
    }

    #[tokio::test]
    async fn test_empty_text_still_calls_generator() {
        let generator = Arc::new(ScriptedGenerator::replying(""));
        let record = extractor(&generator)
            .extract_structured_record("")
            .await
            .unwrap();
        assert_eq!(generator.calls(), 1);
        assert_eq!(record, StructuredRecord::default());
    }

    #[tokio::test]
    async fn test_json_response_is_normalized() {
        let generator = Arc::new(ScriptedGenerator::replying(
            r#"{"Name": "Jane Doe", "Email": "jane@x.com", "Skills": ["Go", "Rust"]}"#,
        ));
        let record = extractor(&generator)
            .extract_structured_record("Jane Doe, Go and Rust engineer")
            .await
            .unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.email, "jane@x.com");
        assert_eq!(record.github, "");
        assert_eq!(record.linkedin, "");
        assert_eq!(skill_texts(&record), vec!["Go", "Rust"]);
        assert!(record.education.is_empty());
        assert!(record.professional_experience.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.questions_and_answers.is_empty());
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 9);
    }

    #[tokio::test]
    async fn test_plain_text_response_uses_line_scan() {
        let generator = Arc::new(ScriptedGenerator::replying("Name\nJane Doe\nSkills\nGo\nRust"));
        let record = extractor(&generator)
            .extract_structured_record("irrelevant")
            .await
            .unwrap();
        assert_eq!(record.name, "Jane Doe");
        assert_eq!(skill_texts(&record), vec!["Go", "Rust"]);
        assert_eq!(record.email, "");
        assert!(record.projects.is_empty());
    }

    #[tokio::test]
    async fn test_prompt_carries_source_text() {
        let generator = Arc::new(ScriptedGenerator::replying("{}"));
        extractor(&generator)
            .extract_structured_record("Staff engineer at Globex since 2015")
            .await
            .unwrap();
        let prompts = generator.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Staff engineer at Globex since 2015"));
    }

    #[tokio::test]
    async fn test_generator_failure_is_wrapped_with_cause() {
        let generator = Arc::new(ScriptedGenerator::failing(429, "quota exceeded"));
        let err = extractor(&generator)
            .extract_structured_record("text")
            .await
            .unwrap_err();
        match &err {
            ExtractionError::Generation(GenerationError::Api { status, message }) => {
                assert_eq!(*status, 429);
                assert_eq!(message, "quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.is_transient());
        assert!(std::error::Error::source(&err).is_some());
    }

    #[tokio::test]
    async fn test_non_object_json_response_fails() {
        let generator = Arc::new(ScriptedGenerator::replying("[\"Jane\", \"Go\"]"));
        let err = extractor(&generator)
            .extract_structured_record("text")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractionError::NotAnObject { found: "array" }));
        assert!(!err.is_transient());
    }
}
