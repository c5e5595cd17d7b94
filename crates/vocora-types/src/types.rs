use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages a learner can read in or be taught in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Es,
    Zh,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Es, Language::Zh];

    /// ISO 639-1 code
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Es => "es",
            Language::Zh => "zh",
        }
    }

    /// Name used when asking a model to write or translate
    pub fn display_name(self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Es => "Spanish",
            Language::Zh => "Mandarin Chinese",
        }
    }

    /// Register used for generated practice stories
    pub fn beginner_register(self) -> &'static str {
        match self {
            Language::En => "beginner English",
            Language::Es => "beginner Latin American Spanish",
            Language::Zh => "beginner Mandarin Chinese",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported language code: {0}")]
pub struct LanguageParseError(pub String);

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Language::En),
            "es" => Ok(Language::Es),
            "zh" => Ok(Language::Zh),
            other => Err(LanguageParseError(other.to_string())),
        }
    }
}

/// A word explained in a target language, as it was used in the story
/// that first asked for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
    pub word: String,
    pub language: Language,
    pub translated_word: String,
    pub part_of_speech: String,
    pub definition_text: String,
    /// SHA-256 hex of the story text the definition was generated from
    pub context_hash: String,
}

impl Definition {
    pub const UNAVAILABLE_TEXT: &'static str = "Error retrieving definition.";
    pub const UNKNOWN_PART_OF_SPEECH: &'static str = "Unknown";

    /// Display-safe stand-in returned when a definition could not be produced
    pub fn unavailable(word: &str, language: Language) -> Self {
        Self {
            word: word.to_string(),
            language,
            translated_word: String::new(),
            part_of_speech: Self::UNKNOWN_PART_OF_SPEECH.to_string(),
            definition_text: Self::UNAVAILABLE_TEXT.to_string(),
            context_hash: String::new(),
        }
    }
}

/// Requested length of a generated practice story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl StoryLength {
    pub fn sentences(self) -> u32 {
        match self {
            StoryLength::Short => 3,
            StoryLength::Medium => 5,
            StoryLength::Long => 8,
        }
    }
}

impl FromStr for StoryLength {
    type Err = String;

    /// Unknown lengths fall back to medium
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "short" => StoryLength::Short,
            "long" => StoryLength::Long,
            _ => StoryLength::Medium,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    LoadStory(String),
    PointerEnter(usize),
    PointerLeave,
    AddHoveredWord,
    ToggleSelection(String),
    ShowStory,
    ShowHighlight,
    SavePracticeLanguage(Language),
    Logout,
    Quit,
}
