//! services/api/src/adapters/judge_llm.rs
//!
//! This module contains the adapter for the answer-judging LLM.
//! It implements the `JudgeService` port from the `core` crate against any
//! OpenAI-compatible chat completions endpoint (Groq by default).

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client, error::OpenAIError,
};
use async_trait::async_trait;
use guess_the_frame_core::ports::{JudgeService, PortError, PortResult};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `JudgeService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiJudgeAdapter {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiJudgeAdapter {
    /// Creates a new `OpenAiJudgeAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String) -> Self {
        Self { client, model }
    }

    /// Builds the client for an OpenAI-compatible endpoint such as Groq.
    pub fn client_for(api_key: &str, api_base: &str) -> Client<OpenAIConfig> {
        let config = OpenAIConfig::new()
            .with_api_key(api_key)
            .with_api_base(api_base);
        Client::with_config(config)
    }
}

//=========================================================================================
// `JudgeService` Trait Implementation
//=========================================================================================

#[async_trait]
impl JudgeService for OpenAiJudgeAdapter {
    async fn classify(&self, instruction: &str, prompt: &str) -> PortResult<String> {
        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(instruction)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        // Expect a single Yes/No token.
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_tokens(5u32)
            .temperature(0.0)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                PortError::Unexpected("Judge LLM response contained no text content.".to_string())
            })
    }
}
