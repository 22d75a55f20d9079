//! LLM API client abstraction for HuggingFace, OpenAI and Anthropic.

use async_openai::{
    Client as OpenAIClient,
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
};
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, error, info, instrument};

/// HuggingFace serverless inference base URL.
pub const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co/models";

/// LLM provider selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// HuggingFace hosted inference (text generation).
    HuggingFace,
    /// OpenAI (GPT models).
    OpenAI,
    /// Anthropic (Claude models).
    Anthropic,
}

impl LlmProvider {
    /// Environment variable holding this provider's API key.
    pub fn api_key_var(self) -> &'static str {
        match self {
            LlmProvider::HuggingFace => "HUGGINGFACE_API_KEY",
            LlmProvider::OpenAI => "OPENAI_API_KEY",
            LlmProvider::Anthropic => "ANTHROPIC_API_KEY",
        }
    }
}

/// Configuration for LLM client.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    provider: LlmProvider,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl LlmConfig {
    /// Creates a new LLM configuration.
    #[instrument(skip(api_key), fields(provider = ?provider, model = %model))]
    pub fn new(provider: LlmProvider, api_key: String, model: String, max_tokens: u32) -> Self {
        debug!("Creating LLM config");
        Self {
            provider,
            api_key,
            model,
            max_tokens,
        }
    }

    /// Gets the provider.
    pub fn provider(&self) -> LlmProvider {
        self.provider
    }

    /// Gets the API key.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Gets the model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Gets the max tokens.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

/// LLM client that abstracts over multiple providers.
#[derive(Debug, Clone)]
pub struct LlmClient {
    config: LlmConfig,
    http: reqwest::Client,
}

impl LlmClient {
    /// Creates a new LLM client.
    #[instrument(skip(config), fields(provider = ?config.provider()))]
    pub fn new(config: LlmConfig) -> Self {
        info!("Creating LLM client");
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Generates a completion from a system prompt and user message.
    #[instrument(skip(self, system_prompt, user_message), fields(provider = ?self.config.provider(), model = %self.config.model()))]
    pub async fn generate(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        debug!("Generating completion");
        let content = match self.config.provider() {
            LlmProvider::HuggingFace => {
                self.generate_huggingface(system_prompt, user_message).await?
            }
            LlmProvider::OpenAI => self.generate_openai(system_prompt, user_message).await?,
            LlmProvider::Anthropic => self.generate_anthropic(system_prompt, user_message).await?,
        };
        info!(content_length = content.len(), "Generated completion");
        Ok(content)
    }

    /// Generates a completion using the HuggingFace inference API.
    ///
    /// Text-generation endpoints take a single prompt, so the system prompt
    /// is prepended to the user message.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_huggingface(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let url = format!("{}/{}", HUGGINGFACE_INFERENCE_URL, self.config.model());
        let request_body = serde_json::json!({
            "inputs": format!("{}\n\n{}", system_prompt, user_message),
            "parameters": {
                "max_new_tokens": self.config.max_tokens(),
                "return_full_text": false
            }
        });

        debug!(url = %url, "Posting board prompt");
        let request = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key())
            .json(&request_body);
        let response_json: serde_json::Value = send(request, "HuggingFace").await?;

        huggingface_text(&response_json)
            .map(str::to_string)
            .ok_or_else(|| LlmError::new(format!("HuggingFace reply has no generated_text: {}", response_json)))
    }

    /// Generates a completion using the Anthropic messages API.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_anthropic(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let body = AnthropicRequest {
            model: self.config.model(),
            max_tokens: self.config.max_tokens(),
            system: system_prompt,
            messages: [AnthropicMessage {
                role: "user",
                content: user_message,
            }],
        };

        debug!("Posting board prompt");
        let request = self
            .http
            .post(ANTHROPIC_MESSAGES_URL)
            .header("x-api-key", self.config.api_key())
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body);
        let reply: AnthropicReply = send(request, "Anthropic").await?;

        reply
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or_else(|| LlmError::new("Anthropic reply has no text block".to_string()))
    }

    /// Generates a completion using the OpenAI chat API.
    #[instrument(skip(self, system_prompt, user_message))]
    async fn generate_openai(
        &self,
        system_prompt: &str,
        user_message: &str,
    ) -> Result<String, LlmError> {
        let client = OpenAIClient::with_config(
            OpenAIConfig::new().with_api_key(self.config.api_key()),
        );
        let request = CreateChatCompletionRequestArgs::default()
            .model(self.config.model())
            .messages(chat_messages(system_prompt, user_message)?)
            .max_tokens(self.config.max_tokens())
            .build()
            .map_err(|e| openai_error("build request", e))?;

        debug!("Posting board prompt");
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| openai_error("chat completion", e))?;

        response
            .choices
            .into_iter()
            .find_map(|choice| choice.message.content)
            .ok_or_else(|| LlmError::new("OpenAI reply has no message content".to_string()))
    }
}

/// Anthropic messages API endpoint.
const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header value.
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [AnthropicMessage<'a>; 1],
}

#[derive(Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct AnthropicReply {
    #[serde(default)]
    content: Vec<AnthropicBlock>,
}

#[derive(Deserialize)]
struct AnthropicBlock {
    #[serde(default)]
    text: Option<String>,
}

/// System and user turns for a single-shot chat completion.
fn chat_messages(
    system_prompt: &str,
    user_message: &str,
) -> Result<Vec<ChatCompletionRequestMessage>, LlmError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(system_prompt)
        .build()
        .map_err(|e| openai_error("build system message", e))?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(user_message)
        .build()
        .map_err(|e| openai_error("build user message", e))?;
    Ok(vec![
        ChatCompletionRequestMessage::System(system),
        ChatCompletionRequestMessage::User(user),
    ])
}

fn openai_error(stage: &str, e: OpenAIError) -> LlmError {
    LlmError::new(format!("OpenAI {} failed: {}", stage, e))
}

/// Sends `request` and decodes a successful JSON reply as `T`.
async fn send<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
    provider: &str,
) -> Result<T, LlmError> {
    let response = request
        .send()
        .await
        .map_err(|e| LlmError::new(format!("{} request failed: {}", provider, e)))?;
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| LlmError::new(format!("{} reply unreadable: {}", provider, e)))?;

    if !status.is_success() {
        return Err(LlmError::new(format!("{} returned {}: {}", provider, status, text)));
    }

    debug!(reply_length = text.len(), provider, "Decoding reply");
    serde_json::from_str(&text)
        .map_err(|e| LlmError::new(format!("{} reply is not the expected JSON: {}", provider, e)))
}

/// Extracts `generated_text` from either response shape the inference API uses.
pub fn huggingface_text(response: &serde_json::Value) -> Option<&str> {
    response["generated_text"]
        .as_str()
        .or_else(|| response[0]["generated_text"].as_str())
}

/// LLM client error.
#[derive(Debug, Clone, Display, Error)]
#[display("LLM error: {} at {}:{}", message, file, line)]
pub struct LlmError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl LlmError {
    /// Creates a new LLM error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        error!(error_message = %message, "LLM error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
