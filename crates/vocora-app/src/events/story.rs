use kanal::AsyncSender;
use vocora_core::preprocess::clean_story;

use crate::events::Reader;
use crate::events::highlight::handle_show_story;
use crate::view::ViewUpdate;

pub async fn handle_load_story(
    reader: &mut Reader,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
    text: &str,
) -> anyhow::Result<()> {
    let story = clean_story(text);
    if story.is_empty() {
        app_to_view_tx
            .send(ViewUpdate::Notice("story is empty".to_string()))
            .await?;
        return Ok(());
    }

    reader.hover.load_story(&story);
    tracing::info!(tokens = reader.hover.tokens().len(), "story opened");

    handle_show_story(reader, app_to_view_tx).await
}
