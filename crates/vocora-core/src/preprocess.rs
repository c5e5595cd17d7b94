use sha2::{Digest, Sha256};

/// Tidy story text before it is displayed and segmented
pub fn clean_story(text: &str) -> String {
    text.replace("\r\n", "\n").trim().to_string()
}

/// SHA-256 hex digest identifying the story a definition came from
pub fn story_hash(story: &str) -> String {
    format!("{:x}", Sha256::digest(story.as_bytes()))
}
