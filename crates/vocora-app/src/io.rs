use std::io::BufRead;

use kanal::AsyncSender;
use vocora_types::{AppEvent, Language};

use crate::view::ViewUpdate;

pub const USAGE: &str =
    "commands: enter N | leave | add | select WORD | show | highlight | lang en|es|zh | logout | quit";

/// Map one line of reader input to an event; blank lines map to nothing
pub fn parse_command(line: &str) -> Result<Option<AppEvent>, String> {
    let line = line.trim();
    let (command, arg) = match line.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (line, ""),
    };

    let event = match (command.to_ascii_lowercase().as_str(), arg) {
        ("", _) => return Ok(None),
        ("enter", index) => {
            let index = index
                .parse()
                .map_err(|_| format!("enter needs a token number, got '{index}'"))?;
            AppEvent::PointerEnter(index)
        }
        ("leave", "") => AppEvent::PointerLeave,
        ("add", "") => AppEvent::AddHoveredWord,
        ("select", "") => return Err("select needs a word".to_string()),
        ("select", word) => AppEvent::ToggleSelection(word.to_string()),
        ("show", "") => AppEvent::ShowStory,
        ("highlight", "") => AppEvent::ShowHighlight,
        ("lang", code) => {
            let language: Language = code.parse().map_err(|e| format!("{e}"))?;
            AppEvent::SavePracticeLanguage(language)
        }
        ("logout", "") => AppEvent::Logout,
        ("quit" | "exit", "") => AppEvent::Quit,
        _ => return Err(USAGE.to_string()),
    };

    Ok(Some(event))
}

/// Forward parsed commands from `input` until it ends or the app hangs up.
///
/// Runs on a plain thread; the channels must be unbounded so `try_send`
/// never drops a command.
pub fn forward_commands<R: BufRead>(
    input: R,
    input_to_app_tx: &AsyncSender<AppEvent>,
    app_to_view_tx: &AsyncSender<ViewUpdate>,
) -> anyhow::Result<()> {
    for line in input.lines() {
        match parse_command(&line?) {
            Ok(Some(event)) => {
                let stop = matches!(event, AppEvent::Quit | AppEvent::Logout);
                if !input_to_app_tx.try_send(event)? || stop {
                    return Ok(());
                }
            }
            Ok(None) => {}
            Err(message) => {
                app_to_view_tx.try_send(ViewUpdate::Notice(message))?;
            }
        }
    }

    // end of input closes the reader
    input_to_app_tx.try_send(AppEvent::Quit)?;
    Ok(())
}

/// Read commands from stdin on a detached thread so a pending read never
/// holds up shutdown
pub fn spawn_stdin_reader(input_to_app_tx: AsyncSender<AppEvent>, app_to_view_tx: AsyncSender<ViewUpdate>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        if let Err(e) = forward_commands(stdin.lock(), &input_to_app_tx, &app_to_view_tx) {
            tracing::debug!("stdin reader stopped: {e}");
        }
    });
}
