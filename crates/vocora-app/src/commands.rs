use std::fs;
use std::path::Path;

use vocora_core::preprocess::clean_story;
use vocora_core::{AddOutcome, HighlightMarker, NormalizedWord, SelectionSet, Session, VocabList, apply_highlight, segment};
use vocora_types::{Language, StoryLength};

use crate::state::AppState;

pub fn read_story(path: &Path) -> anyhow::Result<String> {
    let text = fs::read_to_string(path)?;
    let story = clean_story(&text);
    anyhow::ensure!(!story.is_empty(), "{} is empty", path.display());
    Ok(story)
}

/// One line per token: index, kind, text and normalized form
pub fn segment_story(story: &str) -> String {
    segment(story)
        .iter()
        .enumerate()
        .map(|(index, token)| {
            let normalized = token.normalized().map(|w| w.to_string()).unwrap_or_default();
            format!("{index}\t{:?}\t{:?}\t{normalized}", token.kind, token.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn lookup(state: &AppState, word: &str, story: &str, language: Language) -> anyhow::Result<String> {
    let Some(word) = NormalizedWord::new(word) else {
        anyhow::bail!("'{word}' has no letters to look up");
    };

    let resolution = state.cache.lookup(&word, language, story).await;
    // the process exits right after printing
    state.cache.flush().await;

    let def = resolution.definition();
    Ok(format!(
        "{} = {} ({})\n{}",
        def.word, def.translated_word, def.part_of_speech, def.definition_text
    ))
}

pub async fn highlight(state: &AppState, words: &[String], story: &str) -> String {
    let marker = HighlightMarker::from_config(&state.config.read().await.hover);
    let selection: SelectionSet = words.iter().collect();
    apply_highlight(story, &selection, &marker)
}

async fn open_session(state: &AppState) -> Session {
    let session_config = state.config.read().await.session.clone();
    state.session.load(&session_config).await
}

async fn vocab_list(state: &AppState, session: &Session) -> anyhow::Result<VocabList> {
    let shared_owner = state.config.read().await.store.shared_user_id.clone();

    Ok(VocabList::load(
        state.stores.vocab.clone(),
        session.user_id.clone(),
        shared_owner,
        session.practice_lang,
    )
    .await?)
}

/// Practice story from `words`, or from the vocabulary list when none are given
pub async fn story(state: &AppState, words: &[String], length: StoryLength) -> anyhow::Result<String> {
    let session = open_session(state).await;

    let words = if words.is_empty() {
        vocab_list(state, &session).await?.words().to_vec()
    } else {
        words.to_vec()
    };
    anyhow::ensure!(!words.is_empty(), "no words to write a story with");

    let generated = state
        .stories
        .generate_story(&words, length, session.practice_lang, session.user_lang)
        .await?;

    Ok(format!("{}\n\n{}", generated.story, generated.translation))
}

pub enum VocabCommand {
    List,
    Add(String),
    Remove(String),
    Clear,
}

pub async fn vocab(state: &AppState, command: VocabCommand) -> anyhow::Result<String> {
    let session = open_session(state).await;
    let mut list = vocab_list(state, &session).await?;

    let message = match command {
        VocabCommand::List => list.words().join("\n"),
        VocabCommand::Add(word) => match list.add(&word).await? {
            AddOutcome::Added(word) => format!("added '{word}'"),
            AddOutcome::AlreadyPresent(word) => format!("'{word}' is already in your list"),
            AddOutcome::NoHover => String::new(),
        },
        VocabCommand::Remove(word) => {
            if list.remove(&word).await? {
                format!("removed '{word}'")
            } else {
                format!("'{word}' is not in your list")
            }
        }
        VocabCommand::Clear => {
            list.clear().await?;
            format!("cleared your {} words", list.language().display_name())
        }
    };

    Ok(message)
}
