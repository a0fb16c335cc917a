use std::sync::Arc;

use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::{ChatMessage, StructuredOutputFormat};
use schemars::JsonSchema;
use serde_json::Value;

use architext_core::{AiSettings, ValidationError};

/// JSON schema a model response must conform to, named for the task.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub schema: Value,
}

impl OutputSchema {
    pub fn of<T: JsonSchema>(name: &'static str) -> Self {
        let schema = serde_json::to_value(schemars::schema_for!(T)).unwrap_or_default();
        Self { name, schema }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum InvokeError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),

    #[error("build LLM: {0}")]
    Client(String),

    #[error("chat: {0}")]
    Transport(String),

    #[error("LLM returned empty text")]
    EmptyResponse,

    #[error("no JSON object in model output")]
    NoJson,

    #[error("model output does not fit the schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("model output violates the schema: {0}")]
    Nonconforming(#[from] ValidationError),
}

/// Sends one prompt plus an output schema to a generative model and returns
/// its raw text. A single attempt; timeouts are the implementation's concern.
#[async_trait]
pub trait ModelInvoker: Send + Sync {
    async fn invoke(
        &self,
        schema: &OutputSchema,
        system: &str,
        prompt: &str,
    ) -> Result<String, InvokeError>;

    /// Provider and model, for logs.
    fn describe(&self) -> String {
        "model".to_string()
    }
}

#[async_trait]
impl<T: ModelInvoker + ?Sized> ModelInvoker for Arc<T> {
    async fn invoke(
        &self,
        schema: &OutputSchema,
        system: &str,
        prompt: &str,
    ) -> Result<String, InvokeError> {
        (**self).invoke(schema, system, prompt).await
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}

fn map_backend(provider: &str) -> Result<LLMBackend, InvokeError> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(InvokeError::UnknownProvider(other.to_string())),
    }
}

fn structured_output(schema: &OutputSchema) -> Result<StructuredOutputFormat, InvokeError> {
    serde_json::from_value(serde_json::json!({
        "name": schema.name,
        "schema": schema.schema,
    }))
    .map_err(|e| InvokeError::Client(format!("structured output format: {e}")))
}

/// Model invocation through the `llm` crate, for any configured provider.
#[derive(Debug, Clone)]
pub struct LlmInvoker {
    settings: AiSettings,
}

impl LlmInvoker {
    pub fn new(settings: AiSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl ModelInvoker for LlmInvoker {
    async fn invoke(
        &self,
        schema: &OutputSchema,
        system: &str,
        prompt: &str,
    ) -> Result<String, InvokeError> {
        let backend = map_backend(&self.settings.provider)?;

        let mut builder = LLMBuilder::new()
            .backend(backend)
            .model(&self.settings.model)
            .system(system)
            .schema(structured_output(schema)?);

        if !self.settings.api_key.is_empty() {
            builder = builder.api_key(&self.settings.api_key);
        }
        if let Some(secs) = self.settings.timeout_secs {
            builder = builder.timeout_seconds(secs);
        }

        let llm = builder.build().map_err(|e| InvokeError::Client(e.to_string()))?;

        let messages = vec![ChatMessage::user().content(prompt).build()];

        let response = llm
            .chat(&messages)
            .await
            .map_err(|e| InvokeError::Transport(e.to_string()))?;

        match response.text() {
            Some(text) if !text.trim().is_empty() => Ok(text),
            _ => Err(InvokeError::EmptyResponse),
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.settings.provider, self.settings.model)
    }
}
