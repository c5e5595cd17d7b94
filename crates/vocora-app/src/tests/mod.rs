use std::sync::Arc;

use async_trait::async_trait;
use vocora_config::Config;
use vocora_generator::{
    DefinitionGenerator, GenerateError, GeneratedDefinition, GeneratedStory, ProviderMetadata, StoryGenerator,
};
use vocora_store::Stores;
use vocora_types::{Language, StoryLength};

use crate::state::AppState;

mod channel_tests;

/// Answers instantly with text derived from its input
pub struct EchoGenerator;

#[async_trait]
impl DefinitionGenerator for EchoGenerator {
    async fn generate(
        &self,
        word: &str,
        _story: &str,
        language: Language,
    ) -> Result<GeneratedDefinition, GenerateError> {
        Ok(GeneratedDefinition {
            translated_word: word.to_uppercase(),
            part_of_speech: "noun".to_string(),
            definition: format!("{word} in {language}"),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "echo".to_string(),
            model: "none".to_string(),
            requires_api_key: false,
        }
    }
}

#[async_trait]
impl StoryGenerator for EchoGenerator {
    async fn generate_story(
        &self,
        words: &[String],
        length: StoryLength,
        practice: Language,
        user: Language,
    ) -> Result<GeneratedStory, GenerateError> {
        Ok(GeneratedStory {
            story: format!("{} ({} sentences, {practice})", words.join(" "), length.sentences()),
            translation: format!("translated to {user}"),
        })
    }
}

pub fn offline_state(user_id: Option<&str>) -> Arc<AppState> {
    state_with_stores(user_id, Stores::memory())
}

pub fn state_with_stores(user_id: Option<&str>, stores: Stores) -> Arc<AppState> {
    let mut config = Config::default();
    config.session.user_id = user_id.map(str::to_string);
    config.session.practice_lang = Language::Es;

    let generator = Arc::new(EchoGenerator);
    Arc::new(AppState::with_parts(config, stores, generator.clone(), generator))
}
