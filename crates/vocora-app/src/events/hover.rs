use kanal::AsyncSender;
use vocora_core::HoverEvent;

use crate::events::Reader;
use crate::view::{ViewUpdate, format_tooltip};

pub async fn handle_pointer_enter(
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    index: usize,
) -> anyhow::Result<()> {
    if !reader.hover.pointer_enter(index) {
        app_to_view_tx
            .send(ViewUpdate::Notice(format!("token {index} has no definition")))
            .await?;
        return Ok(());
    }

    // known words show at once, others after the debounce
    show_tooltip(reader, app_to_view_tx).await
}

pub fn handle_pointer_leave(reader: &mut Reader) {
    reader.hover.pointer_leave();
}

/// Timer and lookup results coming back to the loop
pub async fn handle_hover_event(
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    event: HoverEvent,
) -> anyhow::Result<()> {
    if reader.hover.apply(event) {
        show_tooltip(reader, app_to_view_tx).await?;
    }
    Ok(())
}

async fn show_tooltip(reader: &Reader, app_to_view_tx: &AsyncSender<ViewUpdate>) -> anyhow::Result<()> {
    if let Some(tooltip) = reader.hover.tooltip() {
        let text = format_tooltip(&tooltip);
        app_to_view_tx.send(ViewUpdate::Tooltip(text)).await?;
    }
    Ok(())
}
