use std::io::Write;

use kanal::AsyncReceiver;
use tokio_util::sync::CancellationToken;
use vocora_core::{RenderedToken, Tooltip};

/// What the terminal view should print
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    /// Story with hoverable tokens numbered
    Story(String),
    Tooltip(String),
    Highlight(String),
    Notice(String),
}

/// `word[index]` for hoverable tokens, `*word*[index]` when selected
pub fn format_story(tokens: &[RenderedToken<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        match (token.eligible, token.selected) {
            (false, _) => out.push_str(token.text),
            (true, false) => out.push_str(&format!("{}[{}]", token.text, token.index)),
            (true, true) => out.push_str(&format!("*{}*[{}]", token.text, token.index)),
        }
    }
    out
}

pub fn format_tooltip(tooltip: &Tooltip<'_>) -> String {
    let def = tooltip.definition;
    if tooltip.failed {
        return format!("{}: {}", tooltip.target.word, def.definition_text);
    }

    if def.translated_word.is_empty() {
        format!("{} ({}): {}", tooltip.target.word, def.part_of_speech, def.definition_text)
    } else {
        format!(
            "{} = {} ({}): {}",
            tooltip.target.word, def.translated_word, def.part_of_speech, def.definition_text
        )
    }
}

/// Print updates until cancelled or the app side hangs up
pub async fn view_loop<W>(
    app_to_view_rx: AsyncReceiver<ViewUpdate>,
    cancel: CancellationToken,
    mut out: W,
) -> anyhow::Result<()>
where
    W: Write + Send,
{
    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            update = app_to_view_rx.recv() => {
                let Ok(update) = update else { break };
                match update {
                    ViewUpdate::Story(text) => writeln!(out, "\n{text}\n")?,
                    ViewUpdate::Tooltip(text) => writeln!(out, "  > {text}")?,
                    ViewUpdate::Highlight(text) => writeln!(out, "\n{text}\n")?,
                    ViewUpdate::Notice(text) => writeln!(out, "  ! {text}")?,
                }
                out.flush()?;
            }
        }
    }

    tracing::debug!("view loop stopped");
    Ok(())
}
