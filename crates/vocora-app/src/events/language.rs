use kanal::AsyncSender;
use vocora_core::VocabList;
use vocora_types::Language;

use crate::events::Reader;
use crate::state::AppState;
use crate::view::ViewUpdate;

/// Persist the practice language and switch the vocabulary list to it
pub async fn handle_practice_language(
    state: &AppState,
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    language: Language,
) -> anyhow::Result<()> {
    let session = match state.session.save_practice_language(language).await {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(%language, "could not save practice language: {e}");
            app_to_view_tx
                .send(ViewUpdate::Notice(format!("could not save practice language: {e}")))
                .await?;
            return Ok(());
        }
    };

    let shared_owner = state.config.read().await.store.shared_user_id.clone();
    let loaded = VocabList::load(
        state.stores.vocab.clone(),
        session.user_id.clone(),
        shared_owner,
        session.practice_lang,
    )
    .await;

    // the previous list stays active until a reload succeeds
    reader.vocab = match loaded {
        Ok(vocab) => vocab,
        Err(e) => {
            tracing::warn!(%language, "could not load vocabulary: {e}");
            app_to_view_tx
                .send(ViewUpdate::Notice(format!(
                    "could not load {} vocabulary: {e}",
                    language.display_name()
                )))
                .await?;
            return Ok(());
        }
    };
    reader.selection = reader.vocab.selection();

    app_to_view_tx
        .send(ViewUpdate::Notice(format!(
            "now practicing {} ({} words)",
            language.display_name(),
            reader.vocab.words().len()
        )))
        .await?;
    Ok(())
}
