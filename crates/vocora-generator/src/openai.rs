use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vocora_types::{Language, StoryLength};

use crate::prompt::{definition_prompt, story_prompt, translation_prompt};
use crate::{
    DefinitionGenerator, GenerateError, GeneratedDefinition, GeneratedStory, ProviderMetadata,
    StoryGenerator,
};

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    definition_model: String,
    story_model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiGenerator {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> Result<Self, GenerateError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            api_key,
            api_url,
            definition_model: "gpt-3.5-turbo".to_string(),
            story_model: "o1-mini-2024-09-12".to_string(),
        })
    }

    pub fn with_models(mut self, definition_model: String, story_model: String) -> Self {
        self.definition_model = definition_model;
        self.story_model = story_model;
        self
    }

    /// Send a single user message and return the trimmed reply
    async fn complete(&self, model: &str, prompt: &str) -> Result<String, GenerateError> {
        if self.api_key.is_empty() {
            return Err(GenerateError::AuthenticationError);
        }

        let request = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(GenerateError::RateLimitExceeded);
        }

        if status == 401 || status == 403 {
            return Err(GenerateError::AuthenticationError);
        }

        if !status.is_success() {
            return Err(GenerateError::Http {
                status: status.as_u16(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            GenerateError::MalformedResponse(format!("Failed to parse response: {e}"))
        })?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| GenerateError::MalformedResponse("No content in response".to_string()))?;

        tracing::debug!(model, chars = content.len(), "completion received");
        Ok(content)
    }
}

#[async_trait]
impl DefinitionGenerator for OpenAiGenerator {
    async fn generate(
        &self,
        word: &str,
        story: &str,
        language: Language,
    ) -> Result<GeneratedDefinition, GenerateError> {
        let prompt = definition_prompt(word, story, language);
        let content = self.complete(&self.definition_model, &prompt).await?;

        GeneratedDefinition::parse(&content).inspect_err(|e| {
            tracing::warn!(word, raw = %content, "rejected definition payload: {e}");
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "OpenAI".to_string(),
            model: self.definition_model.clone(),
            requires_api_key: true,
        }
    }
}

#[async_trait]
impl StoryGenerator for OpenAiGenerator {
    async fn generate_story(
        &self,
        words: &[String],
        length: StoryLength,
        practice: Language,
        user: Language,
    ) -> Result<GeneratedStory, GenerateError> {
        if words.iter().all(|w| w.trim().is_empty()) {
            return Err(GenerateError::InvalidRequest("No words provided".to_string()));
        }

        let story = self
            .complete(&self.story_model, &story_prompt(words, length, practice))
            .await?;
        let translation = self
            .complete(&self.story_model, &translation_prompt(&story, user))
            .await?;

        Ok(GeneratedStory { story, translation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generator(api_key: &str) -> OpenAiGenerator {
        OpenAiGenerator::new(
            api_key.to_string(),
            "http://127.0.0.1:9/v1/chat/completions".to_string(),
            Duration::from_secs(1),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_request() {
        let err = generator("")
            .generate("hola", "Hola, amigo.", Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::AuthenticationError));
    }

    #[tokio::test]
    async fn test_story_requires_words() {
        let err = generator("sk-test")
            .generate_story(&[], StoryLength::Short, Language::Es, Language::En)
            .await
            .unwrap_err();

        assert!(matches!(err, GenerateError::InvalidRequest(_)));
    }

    #[test]
    fn test_metadata_reports_definition_model() {
        let meta = generator("sk-test")
            .with_models("gpt-4o-mini".to_string(), "gpt-4o".to_string())
            .metadata();

        assert_eq!(meta.model, "gpt-4o-mini");
        assert!(meta.requires_api_key);
    }
}
