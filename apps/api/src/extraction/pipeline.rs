//! Resume Pipeline — document bytes to normalized record.
//!
//! Flow: extract_text (blocking pool) → StructuredExtractor → StructuredRecord.
//!
//! Each run owns its buffers and shares nothing with other runs. An optional
//! timeout bounds the whole run; when it fires the run is abandoned, never
//! resumed, and the error is transient so the caller may start over.

use std::time::Duration;

use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::document::{extract_text, DocumentFormatError};
use crate::extraction::{ExtractionError, StructuredExtractor};
use crate::models::StructuredRecord;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    DocumentFormat(#[from] DocumentFormatError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error("extraction did not finish within {0:?}")]
    TimedOut(Duration),

    #[error("text extraction worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

impl PipelineError {
    /// Whether re-running the whole pipeline on the same input might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            PipelineError::TimedOut(_) => true,
            PipelineError::Extraction(e) => e.is_transient(),
            PipelineError::DocumentFormat(_) | PipelineError::Worker(_) => false,
        }
    }
}

#[derive(Clone)]
pub struct ResumePipeline {
    extractor: StructuredExtractor,
    timeout: Option<Duration>,
}

impl ResumePipeline {
    pub fn new(extractor: StructuredExtractor) -> Self {
        Self {
            extractor,
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub async fn run(&self, document: Bytes) -> Result<StructuredRecord, PipelineError> {
        match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.run_to_completion(document))
                .await
                .map_err(|_| PipelineError::TimedOut(limit))?,
            None => self.run_to_completion(document).await,
        }
    }

    async fn run_to_completion(&self, document: Bytes) -> Result<StructuredRecord, PipelineError> {
        let text = extract_text_async(document).await?;
        debug!("Extracted {} chars of document text", text.len());
        Ok(self.extractor.extract_structured_record(&text).await?)
    }
}

/// Runs `extract_text` on the blocking pool so PDF parsing never stalls the executor.
pub async fn extract_text_async(document: Bytes) -> Result<String, PipelineError> {
    let text = tokio::task::spawn_blocking(move || extract_text(&document)).await??;
    Ok(text)
}
