use kanal::AsyncSender;
use vocora_core::AddOutcome;

use crate::events::Reader;
use crate::view::ViewUpdate;

pub async fn handle_add_hovered_word(
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
) -> anyhow::Result<()> {
    let notice = match reader.hover.add_hovered_word_to_list(&mut reader.vocab).await {
        Ok(AddOutcome::Added(word)) => {
            reader.selection.insert(&word);
            format!("added '{word}' to your {} list", reader.vocab.language().display_name())
        }
        Ok(AddOutcome::AlreadyPresent(word)) => format!("'{word}' is already in your list"),
        Ok(AddOutcome::NoHover) => "hover a word first".to_string(),
        Err(e) => {
            tracing::warn!("could not add word: {e}");
            format!("could not add word: {e}")
        }
    };

    app_to_view_tx.send(ViewUpdate::Notice(notice)).await?;
    Ok(())
}
