use std::collections::BTreeSet;

use vocora_config::hover::HoverConfig;

use crate::language::{NormalizedWord, Token, TokenKind, is_cjk_ideograph, normalize, segment};

/// Markup placed around highlighted spans
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightMarker {
    pub open: String,
    pub close: String,
}

impl Default for HighlightMarker {
    fn default() -> Self {
        Self::from_config(&HoverConfig::default())
    }
}

impl HighlightMarker {
    pub fn from_config(config: &HoverConfig) -> Self {
        Self {
            open: config.marker_open.clone(),
            close: config.marker_close.clone(),
        }
    }
}

/// Words the learner chose to emphasise.
///
/// Entries are stored normalized. Multi-word vocabulary such as "ice cream"
/// keeps one space between its normalized parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    entries: BTreeSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn canonical(raw: &str) -> Option<String> {
        let parts: Vec<String> = raw
            .split_whitespace()
            .map(normalize)
            .filter(|p| !p.is_empty())
            .collect();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    /// Returns false when the entry normalizes to nothing or is already present
    pub fn insert(&mut self, raw: &str) -> bool {
        match Self::canonical(raw) {
            Some(entry) => self.entries.insert(entry),
            None => false,
        }
    }

    pub fn remove(&mut self, raw: &str) -> bool {
        match Self::canonical(raw) {
            Some(entry) => self.entries.remove(&entry),
            None => false,
        }
    }

    /// Flip membership; returns whether the entry is now selected
    pub fn toggle(&mut self, raw: &str) -> bool {
        if self.remove(raw) {
            false
        } else {
            self.insert(raw)
        }
    }

    pub fn contains(&self, word: &NormalizedWord) -> bool {
        self.entries.contains(word.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for word in iter {
            set.insert(word.as_ref());
        }
        set
    }
}

/// Wrap every occurrence of the selected words in `text`.
///
/// Entries with an ideograph match each of their ideographs on its own.
/// Other entries match whole tokens as `segment` splits them, so "cat"
/// matches in "cat5" and "cat_dog" but not in "cats". Matches are found
/// on the raw text first and merged, so each span is wrapped exactly once
/// and text outside the spans is copied unchanged. Always pass the raw
/// story, never a previously highlighted one.
pub fn apply_highlight(text: &str, selection: &SelectionSet, marker: &HighlightMarker) -> String {
    let mut spans: Vec<(usize, usize)> = Vec::new();
    let tokens = segment(text);
    let keys: Vec<Option<NormalizedWord>> = tokens.iter().map(Token::normalized).collect();

    for entry in selection.iter() {
        if entry.chars().any(is_cjk_ideograph) {
            let ideographs: BTreeSet<char> = entry.chars().filter(|c| is_cjk_ideograph(*c)).collect();
            for ideograph in ideographs {
                let mut buf = [0u8; 4];
                let needle: &str = ideograph.encode_utf8(&mut buf);
                spans.extend(
                    text.match_indices(needle)
                        .map(|(start, m)| (start, start + m.len())),
                );
            }
        } else {
            let parts: Vec<&str> = entry.split(' ').collect();
            spans.extend((0..tokens.len()).filter_map(|first| {
                let last = match_entry(&tokens, &keys, first, &parts)?;
                Some((tokens[first].start, tokens[last].end()))
            }));
        }
    }

    if spans.is_empty() {
        return text.to_string();
    }

    spans.sort_unstable();
    let mut merged: Vec<(usize, usize)> = Vec::with_capacity(spans.len());
    for (start, end) in spans {
        match merged.last_mut() {
            Some(last) if start < last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    let mut out = String::with_capacity(text.len() + merged.len() * (marker.open.len() + marker.close.len()));
    let mut cursor = 0;
    for (start, end) in merged {
        out.push_str(&text[cursor..start]);
        out.push_str(&marker.open);
        out.push_str(&text[start..end]);
        out.push_str(&marker.close);
        cursor = end;
    }
    out.push_str(&text[cursor..]);

    tracing::trace!(entries = selection.len(), "applied highlight");
    out
}

/// Index of the last token of `parts` when they start at token `first`.
///
/// A part may cover several adjacent tokens ("cat5" is "cat" then "5"), and
/// consecutive parts must be separated by whitespace only.
fn match_entry(tokens: &[Token], keys: &[Option<NormalizedWord>], first: usize, parts: &[&str]) -> Option<usize> {
    let mut index = first;

    for (n, part) in parts.iter().enumerate() {
        if n > 0 {
            let gap = tokens.get(index)?;
            if gap.kind != TokenKind::Other || !gap.text.chars().all(char::is_whitespace) {
                return None;
            }
            index += 1;
        }

        let mut rest = *part;
        while !rest.is_empty() {
            let key = keys.get(index)?.as_ref()?;
            rest = rest.strip_prefix(key.as_str())?;
            index += 1;
        }
    }

    index.checked_sub(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(text: &str, words: &[&str]) -> String {
        let selection: SelectionSet = words.iter().collect();
        apply_highlight(text, &selection, &HighlightMarker::default())
    }

    #[test]
    fn test_whole_word_match_only() {
        assert_eq!(highlight("The cats sat", &["cat"]), "The cats sat");
        assert_eq!(highlight("The cat sat", &["cat"]), "The <mark>cat</mark> sat");
    }

    #[test]
    fn test_case_insensitive_and_keeps_original_case() {
        assert_eq!(
            highlight("Cat and CAT and cat.", &["cat"]),
            "<mark>Cat</mark> and <mark>CAT</mark> and <mark>cat</mark>."
        );
    }

    #[test]
    fn test_ideographs_match_individually() {
        assert_eq!(highlight("我爱猫", &["爱"]), "我<mark>爱</mark>猫");
        assert_eq!(
            highlight("猫爱我，我爱猫", &["爱猫"]),
            "<mark>猫</mark><mark>爱</mark>我，我<mark>爱</mark><mark>猫</mark>"
        );
    }

    #[test]
    fn test_accented_word_boundaries() {
        assert_eq!(
            highlight("El niño y la niña.", &["niño"]),
            "El <mark>niño</mark> y la niña."
        );
        assert_eq!(highlight("Árbol, árboles", &["árbol"]), "<mark>Árbol</mark>, árboles");
    }

    #[test]
    fn test_phrase_entry() {
        assert_eq!(
            highlight("I like ice  cream and ice.", &["Ice Cream"]),
            "I like <mark>ice  cream</mark> and ice."
        );
    }

    #[test]
    fn test_overlapping_entries_wrap_once() {
        assert_eq!(
            highlight("ice cream", &["ice cream", "cream"]),
            "<mark>ice cream</mark>"
        );
    }

    #[test]
    fn test_marker_text_is_not_rematched() {
        assert_eq!(highlight("a mark b", &["mark", "b"]), "a <mark>mark</mark> <mark>b</mark>");
    }

    #[test]
    fn test_punctuation_in_entries_is_dropped() {
        assert_eq!(highlight("a.b axb ab", &["a.b"]), "a.b axb <mark>ab</mark>");
    }

    #[test]
    fn test_words_split_like_the_segmenter() {
        assert_eq!(highlight("mixed混合text文字", &["text"]), "mixed混合<mark>text</mark>文字");
        assert_eq!(
            highlight("cat5 cat_dog cats", &["cat"]),
            "<mark>cat</mark>5 <mark>cat</mark>_dog cats"
        );
        assert_eq!(highlight("cat5 cat 5", &["cat5"]), "<mark>cat5</mark> cat 5");
    }

    #[test]
    fn test_unmatched_text_is_preserved() {
        let text = "¡Hola! 你好 123\n";
        assert_eq!(highlight(text, &["adiós"]), text);
        assert_eq!(highlight(text, &[]), text);
    }

    #[test]
    fn test_custom_marker() {
        let selection: SelectionSet = ["sol"].iter().collect();
        let marker = HighlightMarker {
            open: "[".to_string(),
            close: "]".to_string(),
        };
        assert_eq!(apply_highlight("El sol sale", &selection, &marker), "El [sol] sale");
    }

    #[test]
    fn test_selection_normalizes_entries() {
        let mut selection = SelectionSet::new();
        assert!(selection.insert("¡Gato!"));
        assert!(!selection.insert("gato"));
        assert!(!selection.insert("..."));
        assert!(selection.contains(&NormalizedWord::new("GATO").unwrap()));
        assert!(!selection.toggle("gato"));
        assert!(selection.is_empty());
    }
}
