//! Scripted `TextGenerator` for tests.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{GenerationError, GenerationRequest, TextGenerator};

pub enum Script {
    Reply(String),
    ApiFailure { status: u16, message: String },
    /// Never resolves; exercises caller timeouts.
    Hang,
}

/// Returns the scripted outcome for every call and records each prompt it saw.
pub struct ScriptedGenerator {
    script: Script,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    pub fn replying(text: &str) -> Self {
        Self::new(Script::Reply(text.to_string()))
    }

    pub fn failing(status: u16, message: &str) -> Self {
        Self::new(Script::ApiFailure {
            status,
            message: message.to_string(),
        })
    }

    pub fn hanging() -> Self {
        Self::new(Script::Hang)
    }

    fn new(script: Script) -> Self {
        Self {
            script,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &GenerationRequest<'_>) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::ApiFailure { status, message } => Err(GenerationError::Api {
                status: *status,
                message: message.clone(),
            }),
            Script::Hang => std::future::pending().await,
        }
    }
}
