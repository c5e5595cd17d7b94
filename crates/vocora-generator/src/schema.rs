//! Validation of the JSON a model returns for a definition request.
//!
//! Completions are free text. Anything that is not a JSON object with a
//! non-blank `definition` string is rejected as malformed instead of being
//! passed on with missing fields.

use serde::{Deserialize, Serialize};
use vocora_types::Definition;

use crate::GenerateError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedDefinition {
    pub translated_word: String,
    pub part_of_speech: String,
    pub definition: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDefinition {
    #[serde(default)]
    translated_word: Option<String>,
    #[serde(default)]
    part_of_speech: Option<String>,
    #[serde(default)]
    definition: Option<String>,
}

impl GeneratedDefinition {
    /// Parse and validate a completion body
    pub fn parse(content: &str) -> Result<Self, GenerateError> {
        let body = strip_code_fence(content);

        let value: serde_json::Value = serde_json::from_str(body)
            .map_err(|e| GenerateError::MalformedResponse(format!("not JSON: {e}")))?;

        if !value.is_object() {
            return Err(GenerateError::MalformedResponse(
                "expected a JSON object".to_string(),
            ));
        }

        let raw: RawDefinition = serde_json::from_value(value)
            .map_err(|e| GenerateError::MalformedResponse(format!("unexpected field type: {e}")))?;

        let definition = non_blank(raw.definition).ok_or_else(|| {
            GenerateError::MalformedResponse("missing definition".to_string())
        })?;

        Ok(Self {
            translated_word: non_blank(raw.translated_word).unwrap_or_default(),
            part_of_speech: non_blank(raw.part_of_speech)
                .unwrap_or_else(|| Definition::UNKNOWN_PART_OF_SPEECH.to_string()),
            definition,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Models like to wrap JSON in a ```json fence
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    body.trim_end().trim_end_matches("```").trim()
}
