use vocora_types::{Language, StoryLength};

/// Ask for the meaning of `word` as used in `story`, answered as JSON in `language`
pub fn definition_prompt(word: &str, story: &str, language: Language) -> String {
    let lang = language.display_name();

    format!(
        r#"In the story below, analyze the use of the word "{word}".

Story:
"{story}"

Instructions:
- Determine how "{word}" is used in this specific story, not its general dictionary meaning.
- Return only a JSON object like this:
{{
    "translatedWord": "<translated word in {lang}>",
    "partOfSpeech": "<part of speech in {lang}>",
    "definition": "<definition in {lang}>"
}}
- Write every field in {lang}.
- If "{word}" refers to a person, explain it clearly as a name (proper noun).
- Do not mention specific story characters or sentences. Describe what the word means based on this usage."#
    )
}

pub fn story_prompt(words: &[String], length: StoryLength, practice: Language) -> String {
    format!(
        "Write a unique story with {} sentences using elementary-level words and this list: {}.\n\
         Vary the setting, characters, or conflict so each story is different.\n\
         Write the story in {}.\n\
         Do not include translations to other languages.",
        length.sentences(),
        words.join(", "),
        practice.beginner_register(),
    )
}

pub fn translation_prompt(story: &str, user: Language) -> String {
    format!(
        "Translate this story to {}, keeping the same meaning and tone:\n\n\"{}\"\n\n\
         Provide only the translation, no additional comments.",
        user.display_name(),
        story,
    )
}
