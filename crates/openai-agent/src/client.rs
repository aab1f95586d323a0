//! Chat-completion client for the OpenAI API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use agent_core::{AgentError, CompletionClient, ToolDefinition, Turn};

use crate::api_types::{ApiError, ChatCompletionRequest, ChatCompletionResponse};
use crate::config::OpenAiConfig;

/// Default HTTP timeout for API requests (60 seconds). A timeout surfaces
/// as a hard failure of the whole turn.
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 60;

/// A [`CompletionClient`] backed by the OpenAI chat-completions API.
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenAiConfig) -> Result<Self, AgentError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                AgentError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { client, config })
    }

    /// Create a client from environment variables.
    ///
    /// See [`OpenAiConfig::from_env`] for the variables consulted.
    pub fn from_env() -> Result<Self, AgentError> {
        Self::new(OpenAiConfig::from_env()?)
    }

    /// Get the configuration.
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(
        &self,
        messages: Vec<Turn>,
        tools: Option<Vec<ToolDefinition>>,
    ) -> Result<Turn, AgentError> {
        let url = format!("{}/v1/chat/completions", self.config.api_url);

        let request = ChatCompletionRequest {
            model: self.config.model.clone(),
            tool_choice: tools.as_ref().map(|_| "auto".to_string()),
            tools,
            messages,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        debug!("Sending request to completion API: {:?}", request);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AgentError::Network(format!("Failed to send request: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            // Try to parse as API error
            if let Ok(api_error) = serde_json::from_str::<ApiError>(&error_text) {
                return Err(AgentError::Completion(format!(
                    "API error ({}): {}",
                    status.as_u16(),
                    api_error.error.message
                )));
            }

            return Err(AgentError::Completion(format!(
                "API error ({}): {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AgentError::Completion(format!("Failed to parse response: {}", e)))?;

        debug!("Received response from completion API: {:?}", completion);

        if let Some(ref usage) = completion.usage {
            debug!(
                "Token usage - prompt: {}, completion: {}, total: {}",
                usage.prompt_tokens, usage.completion_tokens, usage.total_tokens
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AgentError::Completion("Response contained no choices".to_string()))?;

        // Normalize an empty tool_calls array to "no tool calls"
        let tool_calls = choice.message.tool_calls.filter(|calls| !calls.is_empty());

        Ok(Turn {
            role: "assistant".to_string(),
            content: choice.message.content,
            tool_calls,
            tool_call_id: None,
            name: None,
        })
    }
}
