use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocora_core::{HighlightMarker, HoverController, SelectionSet, Session, VocabList};
use vocora_types::AppEvent;

use crate::state::AppState;
use crate::view::ViewUpdate;

pub mod highlight;
pub mod hover;
pub mod language;
pub mod story;
pub mod vocab;

use highlight::{handle_show_highlight, handle_show_story, handle_toggle_selection};
use hover::{handle_hover_event, handle_pointer_enter, handle_pointer_leave};
use language::handle_practice_language;
use story::handle_load_story;
use vocab::handle_add_hovered_word;

/// Everything one open story needs, owned by the event loop
pub struct Reader {
    pub hover: HoverController,
    pub vocab: VocabList,
    pub selection: SelectionSet,
    pub marker: HighlightMarker,
}

impl Reader {
    pub async fn open(state: &AppState, session: &Session) -> anyhow::Result<Self> {
        let config = state.config.read().await;

        let hover = HoverController::from_config(state.cache.clone(), session.user_lang, &config.hover);
        let vocab = VocabList::load(
            state.stores.vocab.clone(),
            session.user_id.clone(),
            config.store.shared_user_id.clone(),
            session.practice_lang,
        )
        .await?;

        Ok(Self {
            hover,
            selection: vocab.selection(),
            vocab,
            marker: HighlightMarker::from_config(&config.hover),
        })
    }
}

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    input_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_view_tx: AsyncSender<ViewUpdate>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    // error returns must still release run_reader
    let _cancel_on_exit = cancel.clone().drop_guard();

    let session_config = state.config.read().await.session.clone();
    let session = state.session.load(&session_config).await;
    let mut reader = Reader::open(&state, &session).await?;
    let hover_rx = reader.hover.receiver();

    tracing::info!(session = %session.id, "reader ready");
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = input_to_app_rx.recv() => {
                let event = event?;
                tracing::debug!(?event, "event received");

                if !handle_events(&state, &mut reader, &app_to_view_tx, event).await? {
                    break;
                }
            }
            Ok(event) = hover_rx.recv() => {
                handle_hover_event(&mut reader, &app_to_view_tx, event).await?;
            }
        }
    }

    state.cache.flush().await;
    state.session.teardown().await;
    cancel.cancel();
    Ok(())
}

/// Returns false when the loop should stop
async fn handle_events(
    state: &AppState,
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    event: AppEvent,
) -> anyhow::Result<bool> {
    match event {
        AppEvent::LoadStory(text) => {
            handle_load_story(reader, app_to_view_tx, &text).await?;
        }
        AppEvent::PointerEnter(index) => {
            handle_pointer_enter(reader, app_to_view_tx, index).await?;
        }
        AppEvent::PointerLeave => handle_pointer_leave(reader),
        AppEvent::AddHoveredWord => {
            handle_add_hovered_word(reader, app_to_view_tx).await?;
        }
        AppEvent::ToggleSelection(word) => {
            handle_toggle_selection(reader, app_to_view_tx, &word).await?;
        }
        AppEvent::ShowStory => handle_show_story(reader, app_to_view_tx).await?,
        AppEvent::ShowHighlight => handle_show_highlight(reader, app_to_view_tx).await?,
        AppEvent::SavePracticeLanguage(language) => {
            handle_practice_language(state, reader, app_to_view_tx, language).await?;
        }
        AppEvent::Logout => {
            tracing::info!("logout requested");
            return Ok(false);
        }
        AppEvent::Quit => return Ok(false),
    }

    Ok(true)
}
