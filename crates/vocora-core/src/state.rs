use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;
use vocora_config::session::SessionConfig;
use vocora_types::Language;

use crate::dictionary::PreferenceStore;
use crate::error::SessionError;

/// Who is reading and in which languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: Option<String>,
    pub user_lang: Language,
    pub practice_lang: Language,
}

/// Language and user context handed to every component that needs it.
///
/// Loaded once when a session starts, refreshed when the learner saves a
/// new practice language and torn down on logout.
#[derive(Clone)]
pub struct SessionContext {
    current: Arc<RwLock<Option<Session>>>,
    prefs: Arc<dyn PreferenceStore>,
}

impl SessionContext {
    pub fn new(prefs: Arc<dyn PreferenceStore>) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            prefs,
        }
    }

    /// Start a session, preferring the stored practice language over the configured one
    pub async fn load(&self, config: &SessionConfig) -> Session {
        let mut practice_lang = config.practice_lang;

        if let Some(user_id) = &config.user_id {
            match self.prefs.practice_language(user_id).await {
                Ok(Some(stored)) => practice_lang = stored,
                Ok(None) => tracing::debug!(user_id, "no stored practice language"),
                Err(e) => tracing::warn!(user_id, "could not read preferences: {e}"),
            }
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id: config.user_id.clone(),
            user_lang: config.user_lang,
            practice_lang,
        };

        tracing::info!(
            session = %session.id,
            user_lang = %session.user_lang,
            practice_lang = %session.practice_lang,
            "session loaded"
        );

        *self.current.write().await = Some(session.clone());
        session
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Persist a new practice language, then refresh the session
    pub async fn save_practice_language(&self, language: Language) -> Result<Session, SessionError> {
        let mut current = self.current.write().await;
        let session = current.as_mut().ok_or(SessionError::NotLoaded)?;
        let user_id = session.user_id.as_deref().ok_or(SessionError::NoUser)?;

        self.prefs.set_practice_language(user_id, language).await?;
        session.practice_lang = language;

        tracing::info!(session = %session.id, practice_lang = %language, "practice language saved");
        Ok(session.clone())
    }

    /// End the session; returns the one that was active
    pub async fn teardown(&self) -> Option<Session> {
        let ended = self.current.write().await.take();
        if let Some(session) = &ended {
            tracing::info!(session = %session.id, "session ended");
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    fn config(user_id: Option<&str>) -> SessionConfig {
        SessionConfig {
            user_id: user_id.map(str::to_string),
            user_lang: Language::En,
            practice_lang: Language::Es,
        }
    }

    #[tokio::test]
    async fn test_load_prefers_stored_practice_language() {
        let store = Arc::new(FakeStore::default());
        store.prefs.lock().unwrap().insert("u1".to_string(), Language::Zh);
        let ctx = SessionContext::new(store);

        let session = ctx.load(&config(Some("u1"))).await;

        assert_eq!(session.practice_lang, Language::Zh);
        assert_eq!(ctx.current().await, Some(session));
    }

    #[tokio::test]
    async fn test_load_falls_back_on_read_failure() {
        let ctx = SessionContext::new(Arc::new(FakeStore::failing_reads()));

        let session = ctx.load(&config(Some("u1"))).await;

        assert_eq!(session.practice_lang, Language::Es);
    }

    #[tokio::test]
    async fn test_save_refreshes_session() {
        let store = Arc::new(FakeStore::default());
        let ctx = SessionContext::new(store.clone());
        ctx.load(&config(Some("u1"))).await;

        let session = ctx.save_practice_language(Language::En).await.unwrap();

        assert_eq!(session.practice_lang, Language::En);
        assert_eq!(ctx.current().await.unwrap().practice_lang, Language::En);
        assert_eq!(store.prefs.lock().unwrap().get("u1"), Some(&Language::En));
    }

    #[tokio::test]
    async fn test_save_needs_session_and_user() {
        let ctx = SessionContext::new(Arc::new(FakeStore::default()));
        assert_eq!(
            ctx.save_practice_language(Language::Zh).await,
            Err(SessionError::NotLoaded)
        );

        ctx.load(&config(None)).await;
        assert_eq!(
            ctx.save_practice_language(Language::Zh).await,
            Err(SessionError::NoUser)
        );
    }

    #[tokio::test]
    async fn test_teardown_clears_session() {
        let ctx = SessionContext::new(Arc::new(FakeStore::default()));
        let session = ctx.load(&config(None)).await;

        assert_eq!(ctx.teardown().await, Some(session));
        assert_eq!(ctx.current().await, None);
        assert_eq!(ctx.teardown().await, None);
    }
}
