//! Word segmentation for Latin-script and Chinese story text.
//!
//! `segment` covers its input with no gaps: joining the token texts gives the
//! original string back. Latin letters, digits and "everything else" are
//! merged into runs, while every CJK ideograph is a token of its own since
//! Chinese has no spaces between words.

use std::borrow::Borrow;
use std::fmt;

use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Word,
    Number,
    Ideograph,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    /// Byte offset into the segmented text
    pub start: usize,
    pub kind: TokenKind,
}

impl Token {
    /// Lookup key for this token, `None` for punctuation and whitespace
    pub fn normalized(&self) -> Option<NormalizedWord> {
        match self.kind {
            TokenKind::Other => None,
            _ => NormalizedWord::new(&self.text),
        }
    }

    pub fn end(&self) -> usize {
        self.start + self.text.len()
    }
}

/// Lower-cased word with everything but letters, digits and ideographs removed
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedWord(String);

impl NormalizedWord {
    pub fn new(raw: &str) -> Option<Self> {
        let word = normalize(raw);
        (!word.is_empty()).then_some(Self(word))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn has_ideograph(&self) -> bool {
        self.0.chars().any(is_cjk_ideograph)
    }
}

impl fmt::Display for NormalizedWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedWord {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for NormalizedWord {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Basic Latin, Latin-1 letters (without × and ÷), Latin Extended-A/B and
/// Latin Extended Additional
pub fn is_latin_letter(c: char) -> bool {
    matches!(c,
        'A'..='Z'
        | 'a'..='z'
        | '\u{00C0}'..='\u{00D6}'
        | '\u{00D8}'..='\u{00F6}'
        | '\u{00F8}'..='\u{024F}'
        | '\u{1E00}'..='\u{1EFF}'
    )
}

/// CJK Unified Ideographs and Extension A
pub fn is_cjk_ideograph(c: char) -> bool {
    matches!(c, '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}')
}

pub fn classify(c: char) -> TokenKind {
    if is_latin_letter(c) {
        TokenKind::Word
    } else if is_cjk_ideograph(c) {
        TokenKind::Ideograph
    } else if c.is_ascii_digit() {
        TokenKind::Number
    } else {
        TokenKind::Other
    }
}

fn is_word_char(c: char) -> bool {
    is_latin_letter(c) || is_cjk_ideograph(c) || c.is_ascii_digit()
}

/// Split text into tokens, left to right, greedily
pub fn segment(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut run: Option<(TokenKind, usize)> = None;

    for (i, c) in text.char_indices() {
        let kind = classify(c);

        match run {
            Some((current, _)) if current == kind && kind != TokenKind::Ideograph => continue,
            Some((current, start)) => tokens.push(Token {
                text: text[start..i].to_string(),
                start,
                kind: current,
            }),
            None => {}
        }

        run = Some((kind, i));
    }

    if let Some((kind, start)) = run {
        tokens.push(Token {
            text: text[start..].to_string(),
            start,
            kind,
        });
    }

    tracing::trace!(tokens = tokens.len(), "segmented text");
    tokens
}

/// Canonical lookup form of a token; empty when nothing word-like remains.
///
/// Composes accents first so a decomposed `e` + U+0301 survives as `é`, and
/// filters after lower-casing since some capitals lower-case to a letter
/// followed by a combining mark.
pub fn normalize(text: &str) -> String {
    text.nfc()
        .flat_map(char::to_lowercase)
        .filter(|c| is_word_char(*c))
        .collect()
}
