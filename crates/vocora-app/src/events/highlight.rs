use kanal::AsyncSender;
use vocora_core::apply_highlight;

use crate::events::Reader;
use crate::view::{ViewUpdate, format_story};

pub async fn handle_toggle_selection(
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    word: &str,
) -> anyhow::Result<()> {
    let selected = reader.selection.toggle(word);
    tracing::debug!(word, selected, "selection toggled");

    let notice = if selected {
        format!("'{word}' selected")
    } else {
        format!("'{word}' unselected")
    };
    app_to_view_tx.send(ViewUpdate::Notice(notice)).await?;
    Ok(())
}

pub async fn handle_show_story(reader: &Reader, app_to_view_tx: &AsyncSender<ViewUpdate>) -> anyhow::Result<()> {
    let text = format_story(&reader.hover.render(&reader.selection));
    app_to_view_tx.send(ViewUpdate::Story(text)).await?;
    Ok(())
}

pub async fn handle_show_highlight(reader: &Reader, app_to_view_tx: &AsyncSender<ViewUpdate>) -> anyhow::Result<()> {
    let text = apply_highlight(reader.hover.story(), &reader.selection, &reader.marker);
    app_to_view_tx.send(ViewUpdate::Highlight(text)).await?;
    Ok(())
}
