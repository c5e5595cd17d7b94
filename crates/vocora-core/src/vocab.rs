use std::sync::Arc;

use vocora_types::Language;

use crate::dictionary::VocabStore;
use crate::error::VocabError;
use crate::highlight::SelectionSet;

/// Result of asking to add a word
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    Added(String),
    AlreadyPresent(String),
    /// Nothing was hovered, so nothing was added
    NoHover,
}

/// A user's vocabulary for one practice language
pub struct VocabList {
    store: Arc<dyn VocabStore>,
    owner: Option<String>,
    shared_owner: Option<String>,
    language: Language,
    words: Vec<String>,
}

impl VocabList {
    /// Load the user's words together with the shared starter list
    pub async fn load(
        store: Arc<dyn VocabStore>,
        owner: Option<String>,
        shared_owner: Option<String>,
        language: Language,
    ) -> Result<Self, VocabError> {
        let mut list = Self {
            store,
            owner,
            shared_owner,
            language,
            words: Vec::new(),
        };
        list.reload().await?;
        Ok(list)
    }

    /// Re-read the list from the store
    pub async fn reload(&mut self) -> Result<(), VocabError> {
        let owners: Vec<String> = self
            .shared_owner
            .iter()
            .chain(self.owner.iter())
            .cloned()
            .collect();

        self.words = if owners.is_empty() {
            Vec::new()
        } else {
            self.store.list(&owners, self.language).await?
        };

        tracing::debug!(language = %self.language, count = self.words.len(), "vocabulary loaded");
        Ok(())
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        let word = word.trim().to_lowercase();
        self.words.iter().any(|w| w.to_lowercase() == word)
    }

    /// Words to emphasise when a story is shown
    pub fn selection(&self) -> SelectionSet {
        self.words.iter().collect()
    }

    fn owner(&self) -> Result<&str, VocabError> {
        self.owner.as_deref().ok_or(VocabError::NoUser)
    }

    /// Persist `word` unless the list already has it
    pub async fn add(&mut self, word: &str) -> Result<AddOutcome, VocabError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(VocabError::EmptyWord);
        }

        if self.contains(word) {
            return Ok(AddOutcome::AlreadyPresent(word.to_string()));
        }

        let owner = self.owner()?;
        self.store.add(owner, word, self.language).await?;
        self.words.push(word.to_string());

        tracing::info!(word, language = %self.language, "word added to vocabulary");
        Ok(AddOutcome::Added(word.to_string()))
    }

    /// Remove one of the user's own words; returns false if it was not listed
    pub async fn remove(&mut self, word: &str) -> Result<bool, VocabError> {
        let key = word.trim().to_lowercase();
        let Some(stored) = self.words.iter().find(|w| w.to_lowercase() == key).cloned() else {
            return Ok(false);
        };

        let owner = self.owner()?;
        self.store.remove(owner, &stored, self.language).await?;
        self.words.retain(|w| *w != stored);
        Ok(true)
    }

    /// Delete all of the user's words in this language.
    ///
    /// Shared starter words come back on the next reload.
    pub async fn clear(&mut self) -> Result<(), VocabError> {
        let owner = self.owner()?;
        self.store.clear(owner, self.language).await?;
        self.words.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    fn seeded() -> Arc<FakeStore> {
        let store = FakeStore::default();
        {
            let mut rows = store.vocab.lock().unwrap();
            rows.push(("shared".into(), "gato".into(), Language::Es));
            rows.push(("u1".into(), "perro".into(), Language::Es));
            rows.push(("u1".into(), "gato".into(), Language::Es));
            rows.push(("u1".into(), "cat".into(), Language::En));
            rows.push(("u2".into(), "casa".into(), Language::Es));
        }
        Arc::new(store)
    }

    #[tokio::test]
    async fn test_load_merges_shared_and_user_words() {
        let list = VocabList::load(seeded(), Some("u1".into()), Some("shared".into()), Language::Es)
            .await
            .unwrap();

        assert_eq!(list.words(), ["gato", "perro"]);
    }

    #[tokio::test]
    async fn test_add_is_noop_for_existing_word() {
        let store = seeded();
        let mut list = VocabList::load(store.clone(), Some("u1".into()), None, Language::Es)
            .await
            .unwrap();

        assert_eq!(
            list.add("Perro").await.unwrap(),
            AddOutcome::AlreadyPresent("Perro".to_string())
        );
        assert_eq!(
            list.add(" ratón ").await.unwrap(),
            AddOutcome::Added("ratón".to_string())
        );
        assert!(list.contains("ratón"));
        assert_eq!(store.vocab.lock().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_add_requires_user() {
        let mut list = VocabList::load(seeded(), None, Some("shared".into()), Language::Es)
            .await
            .unwrap();

        assert_eq!(list.add("ratón").await, Err(VocabError::NoUser));
        assert_eq!(list.add("   ").await, Err(VocabError::EmptyWord));
    }

    #[tokio::test]
    async fn test_store_failure_leaves_list_unchanged() {
        let store = Arc::new(FakeStore::failing_writes());
        let mut list = VocabList::load(store, Some("u1".into()), None, Language::En)
            .await
            .unwrap();

        assert!(matches!(list.add("dog").await, Err(VocabError::Store(_))));
        assert!(list.words().is_empty());
    }

    #[tokio::test]
    async fn test_remove_and_clear() {
        let store = seeded();
        let mut list = VocabList::load(store.clone(), Some("u1".into()), None, Language::Es)
            .await
            .unwrap();

        assert!(list.remove("perro").await.unwrap());
        assert!(!list.remove("perro").await.unwrap());
        list.clear().await.unwrap();

        assert!(list.words().is_empty());
        let rows = store.vocab.lock().unwrap();
        assert!(rows.iter().all(|(o, _, l)| !(o == "u1" && *l == Language::Es)));
        assert!(rows.iter().any(|(o, _, _)| o == "u2"));
    }

    #[tokio::test]
    async fn test_remove_ignores_case_and_spacing() {
        let store = seeded();
        let mut list = VocabList::load(store.clone(), Some("u1".into()), None, Language::Es)
            .await
            .unwrap();

        list.add("Ratón").await.unwrap();
        assert!(list.remove(" RATÓN ").await.unwrap());
        assert!(list.remove("Perro").await.unwrap());

        assert_eq!(list.words(), ["gato"]);
        let rows = store.vocab.lock().unwrap();
        assert!(!rows.iter().any(|(_, w, _)| w == "Ratón" || w == "perro"));
    }

    #[tokio::test]
    async fn test_reload_restores_shared_words_after_clear() {
        let mut list = VocabList::load(seeded(), Some("u1".into()), Some("shared".into()), Language::Es)
            .await
            .unwrap();

        list.clear().await.unwrap();
        list.reload().await.unwrap();

        assert_eq!(list.words(), ["gato"]);
    }

    #[tokio::test]
    async fn test_selection_from_words() {
        let list = VocabList::load(seeded(), Some("u1".into()), None, Language::Es)
            .await
            .unwrap();
        let selection = list.selection();

        assert_eq!(selection.iter().collect::<Vec<_>>(), vec!["gato", "perro"]);
    }
}
