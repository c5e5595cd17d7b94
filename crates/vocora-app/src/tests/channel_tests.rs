use std::io::Cursor;
use std::time::Duration;

use tokio::time::timeout;
use vocora_types::{AppEvent, Language};

use crate::controller::ChannelSet;
use crate::io::{forward_commands, parse_command};
use crate::view::ViewUpdate;

#[test]
fn test_parse_commands() {
    assert_eq!(parse_command("enter 4"), Ok(Some(AppEvent::PointerEnter(4))));
    assert_eq!(parse_command("  LEAVE "), Ok(Some(AppEvent::PointerLeave)));
    assert_eq!(
        parse_command("select ice cream"),
        Ok(Some(AppEvent::ToggleSelection("ice cream".to_string())))
    );
    assert_eq!(
        parse_command("lang zh"),
        Ok(Some(AppEvent::SavePracticeLanguage(Language::Zh)))
    );
    assert_eq!(parse_command(""), Ok(None));
    assert!(parse_command("enter two").is_err());
    assert!(parse_command("lang fr").is_err());
    assert!(parse_command("select").is_err());
    assert!(parse_command("dance").is_err());
}

#[tokio::test]
async fn test_forward_commands_from_blocking_thread() {
    let channels = ChannelSet::new();
    let (input_tx, input_rx) = channels.input_to_app;
    let (view_tx, view_rx) = channels.app_to_view;

    let (thread_input_tx, thread_view_tx) = (input_tx.clone(), view_tx.clone());
    tokio::task::spawn_blocking(move || {
        let input = Cursor::new("enter 2\nnonsense\n\nadd\n");
        forward_commands(input, &thread_input_tx, &thread_view_tx)
    })
    .await
    .unwrap()
    .unwrap();

    let mut events = Vec::new();
    while let Ok(Some(event)) = input_rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![AppEvent::PointerEnter(2), AppEvent::AddHoveredWord, AppEvent::Quit]
    );

    let notice = timeout(Duration::from_secs(1), view_rx.recv()).await.unwrap().unwrap();
    assert!(matches!(notice, ViewUpdate::Notice(text) if text.starts_with("commands:")));
}

#[tokio::test]
async fn test_forward_stops_at_quit() {
    let (input_tx, input_rx) = kanal::unbounded_async::<AppEvent>();
    let (view_tx, _view_rx) = kanal::unbounded_async::<ViewUpdate>();

    forward_commands(Cursor::new("show\nquit\nenter 1\n"), &input_tx, &view_tx).unwrap();

    assert_eq!(input_rx.try_recv().unwrap(), Some(AppEvent::ShowStory));
    assert_eq!(input_rx.try_recv().unwrap(), Some(AppEvent::Quit));
    assert_eq!(input_rx.try_recv().unwrap(), None);
}

#[tokio::test]
async fn test_many_spawned_sends_arrive() {
    let (tx, rx) = kanal::unbounded_async::<AppEvent>();

    for i in 0..100 {
        let tx = tx.clone();
        tokio::spawn(async move {
            tx.send(AppEvent::PointerEnter(i)).await.expect("send failed");
        });
    }

    let mut count = 0;
    let result = timeout(Duration::from_secs(2), async {
        while count < 100 {
            rx.recv().await.expect("recv failed");
            count += 1;
        }
    })
    .await;

    assert!(result.is_ok(), "timeout waiting for events");
    assert_eq!(count, 100);
}
