use serde::{Deserialize, Serialize};
use vocora_core::StoreError;
use vocora_types::{Definition, Language};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DefinitionRow {
    pub word: String,
    pub lang: String,
    #[serde(default)]
    pub translated_word: Option<String>,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    pub definition: String,
    #[serde(default)]
    pub story_hash: Option<String>,
}

impl From<&Definition> for DefinitionRow {
    fn from(def: &Definition) -> Self {
        Self {
            word: def.word.clone(),
            lang: def.language.code().to_string(),
            translated_word: Some(def.translated_word.clone()),
            part_of_speech: Some(def.part_of_speech.clone()),
            definition: def.definition_text.clone(),
            story_hash: Some(def.context_hash.clone()),
        }
    }
}

impl TryFrom<DefinitionRow> for Definition {
    type Error = StoreError;

    fn try_from(row: DefinitionRow) -> Result<Self, Self::Error> {
        let language = row
            .lang
            .parse()
            .map_err(|e| StoreError::Decode(format!("row for '{}': {e}", row.word)))?;

        Ok(Definition {
            word: row.word,
            language,
            translated_word: row.translated_word.unwrap_or_default(),
            part_of_speech: row
                .part_of_speech
                .filter(|p| !p.trim().is_empty())
                .unwrap_or_else(|| Definition::UNKNOWN_PART_OF_SPEECH.to_string()),
            definition_text: row.definition,
            context_hash: row.story_hash.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct VocabRow {
    pub word: String,
    pub language: String,
    pub uid: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PreferenceRow {
    pub uid: String,
    pub practice_lang: Option<String>,
}

impl PreferenceRow {
    /// Unknown codes read as unset
    pub fn language(&self) -> Option<Language> {
        self.practice_lang.as_deref()?.parse().ok()
    }
}

/// `eq.` filter value
pub(crate) fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// `in.(...)` filter value with every item quoted
pub(crate) fn in_list(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("\"{}\"", v.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();
    format!("in.({})", quoted.join(","))
}

/// Keep the first occurrence of each word
pub(crate) fn dedupe_words(rows: Vec<VocabRow>) -> Vec<String> {
    let mut words: Vec<String> = Vec::with_capacity(rows.len());
    for row in rows {
        if !words.contains(&row.word) {
            words.push(row.word);
        }
    }
    words
}
