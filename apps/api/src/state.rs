use std::sync::Arc;

use crate::config::Config;
use crate::extraction::ResumePipeline;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless between runs; each upload gets its own pipeline invocation.
    pub pipeline: ResumePipeline,
    /// Pluggable record storage. Default: InMemoryRecordStore.
    pub store: Arc<dyn RecordStore>,
    pub config: Config,
}
