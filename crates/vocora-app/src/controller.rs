use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vocora_types::AppEvent;

use crate::events::event_loop;
use crate::io::spawn_stdin_reader;
use crate::state::AppState;
use crate::view::{ViewUpdate, view_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub input_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_view: (AsyncSender<ViewUpdate>, AsyncReceiver<ViewUpdate>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            // stdin thread uses try_send, so neither side may fill up
            input_to_app: kanal::unbounded_async(),
            app_to_view: kanal::unbounded_async(),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Sender for events that do not come from stdin, such as the first story
    pub fn events(&self) -> AsyncSender<AppEvent> {
        self.channels.input_to_app.0.clone()
    }

    /// Start the event loop and the terminal view
    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.input_to_app.1.clone(),
            self.channels.app_to_view.0.clone(),
            self.cancel_token.clone(),
        ));

        tasks.spawn(view_loop(
            self.channels.app_to_view.1.clone(),
            self.cancel_token.child_token(),
            std::io::stdout(),
        ));

        tasks
    }

    pub fn spawn_stdin(&self) {
        spawn_stdin_reader(
            self.channels.input_to_app.0.clone(),
            self.channels.app_to_view.0.clone(),
        );
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel_token.clone()
    }
}
