//! Hover state for one displayed story.
//!
//! Pointer events arrive one at a time from the UI loop. Resting on a word
//! starts a debounce timer task; leaving the word cancels it, so jitter never
//! sends a request. When the timer fires, a lookup task asks the definition
//! cache. Both tasks report back through the controller's event channel and
//! the UI loop feeds those events to [`HoverController::apply`], which checks
//! that they still concern the current story and hover before using them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vocora_config::hover::HoverConfig;
use vocora_types::{Definition, Language};

use crate::error::VocabError;
use crate::highlight::SelectionSet;
use crate::language::{NormalizedWord, Token, segment};
use crate::lookup::{DefinitionCache, Resolution};
use crate::types::{HoverPhase, HoverTarget, RenderedToken, Tooltip};
use crate::vocab::{AddOutcome, VocabList};

/// Messages from timer and lookup tasks back to the controller
#[derive(Debug)]
pub enum HoverEvent {
    DebounceElapsed {
        ticket: u64,
    },
    LookupResolved {
        epoch: u64,
        word: NormalizedWord,
        resolution: Resolution,
    },
}

struct DebounceTimer {
    ticket: u64,
    target: HoverTarget,
    cancel: CancellationToken,
}

struct KnownDefinition {
    definition: Definition,
    failed: bool,
}

pub struct HoverController {
    cache: Arc<DefinitionCache>,
    language: Language,
    debounce: Duration,

    story: Arc<str>,
    tokens: Vec<Token>,
    /// Bumped whenever the story or language changes
    epoch: u64,

    phase: HoverPhase,
    definitions: HashMap<NormalizedWord, KnownDefinition>,
    in_flight: HashSet<NormalizedWord>,
    timer: Option<DebounceTimer>,
    next_ticket: u64,

    events_tx: AsyncSender<HoverEvent>,
    events_rx: AsyncReceiver<HoverEvent>,
}

impl HoverController {
    pub fn new(cache: Arc<DefinitionCache>, language: Language, debounce: Duration) -> Self {
        let (events_tx, events_rx) = kanal::unbounded_async();

        Self {
            cache,
            language,
            debounce,
            story: Arc::from(""),
            tokens: Vec::new(),
            epoch: 0,
            phase: HoverPhase::Idle,
            definitions: HashMap::new(),
            in_flight: HashSet::new(),
            timer: None,
            next_ticket: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn from_config(cache: Arc<DefinitionCache>, language: Language, config: &HoverConfig) -> Self {
        Self::new(cache, language, Duration::from_millis(config.debounce_ms))
    }

    /// Show a new story; all hover state and known definitions are dropped
    pub fn load_story(&mut self, text: &str) {
        self.reset();
        self.story = Arc::from(text);
        self.tokens = segment(text);
        tracing::debug!(epoch = self.epoch, tokens = self.tokens.len(), "story loaded");
    }

    /// Switch the language definitions are written in
    pub fn set_language(&mut self, language: Language) {
        if language != self.language {
            self.reset();
            self.language = language;
        }
    }

    fn reset(&mut self) {
        self.cancel_timer();
        self.epoch += 1;
        self.phase = HoverPhase::Idle;
        self.definitions.clear();
        self.in_flight.clear();
    }

    pub fn story(&self) -> &str {
        &self.story
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn phase(&self) -> &HoverPhase {
        &self.phase
    }

    pub fn hovered(&self) -> Option<&HoverTarget> {
        self.phase.target()
    }

    /// Definition already known for `word` in this story
    pub fn definition(&self, word: &str) -> Option<&Definition> {
        self.definitions.get(word).map(|known| &known.definition)
    }

    /// Channel the UI loop should poll and pass to [`apply`](Self::apply)
    pub fn receiver(&self) -> AsyncReceiver<HoverEvent> {
        self.events_rx.clone()
    }

    /// Pointer entered token `index`; returns false if the token is not hoverable
    pub fn pointer_enter(&mut self, index: usize) -> bool {
        let Some(word) = self.tokens.get(index).and_then(Token::normalized) else {
            return false;
        };
        let target = HoverTarget { word, index };

        if self.phase.target() == Some(&target) {
            return true;
        }

        self.cancel_timer();

        if let Some(known) = self.definitions.get(&target.word) {
            tracing::trace!(word = %target.word, "definition already known");
            self.phase = if known.failed {
                HoverPhase::Failed(target)
            } else {
                HoverPhase::Ready(target)
            };
            return true;
        }

        self.phase = HoverPhase::Hovering(target.clone());
        self.start_timer(target);
        true
    }

    pub fn pointer_leave(&mut self) {
        self.cancel_timer();
        self.phase = HoverPhase::Idle;
    }

    fn start_timer(&mut self, target: HoverTarget) {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let cancel = CancellationToken::new();

        let token = cancel.clone();
        let tx = self.events_tx.clone();
        let delay = self.debounce;
        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let _ = tx.send(HoverEvent::DebounceElapsed { ticket }).await;
                }
            }
        });

        self.timer = Some(DebounceTimer {
            ticket,
            target,
            cancel,
        });
    }

    fn cancel_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel.cancel();
        }
    }

    /// Apply a task event; returns true when the visible tooltip changed
    pub fn apply(&mut self, event: HoverEvent) -> bool {
        match event {
            HoverEvent::DebounceElapsed { ticket } => self.on_debounce(ticket),
            HoverEvent::LookupResolved {
                epoch,
                word,
                resolution,
            } => self.on_resolved(epoch, word, resolution),
        }
    }

    fn on_debounce(&mut self, ticket: u64) -> bool {
        let Some(timer) = self.timer.take_if(|t| t.ticket == ticket) else {
            tracing::trace!(ticket, "stale debounce ignored");
            return false;
        };
        let target = timer.target;

        if let Some(known) = self.definitions.get(&target.word) {
            self.phase = if known.failed {
                HoverPhase::Failed(target)
            } else {
                HoverPhase::Ready(target)
            };
            return true;
        }

        self.phase = HoverPhase::Pending(target.clone());

        if !self.in_flight.insert(target.word.clone()) {
            tracing::debug!(word = %target.word, "lookup already in flight");
            return false;
        }

        let cache = Arc::clone(&self.cache);
        let story = Arc::clone(&self.story);
        let tx = self.events_tx.clone();
        let epoch = self.epoch;
        let language = self.language;
        let word = target.word;

        tracing::debug!(%word, index = target.index, "requesting definition");
        tokio::spawn(async move {
            let resolution = cache.lookup(&word, language, &story).await;
            let _ = tx
                .send(HoverEvent::LookupResolved {
                    epoch,
                    word,
                    resolution,
                })
                .await;
        });

        false
    }

    fn on_resolved(&mut self, epoch: u64, word: NormalizedWord, resolution: Resolution) -> bool {
        if epoch != self.epoch {
            tracing::debug!(%word, "discarding definition for a previous story");
            return false;
        }

        self.in_flight.remove(&word);
        let failed = resolution.is_unavailable();
        self.definitions.insert(
            word.clone(),
            KnownDefinition {
                definition: resolution.into_definition(),
                failed,
            },
        );

        let target = match &self.phase {
            HoverPhase::Hovering(t) | HoverPhase::Pending(t) if t.word == word => t.clone(),
            _ => {
                tracing::debug!(%word, "pointer moved on, definition kept for later");
                return false;
            }
        };

        self.cancel_timer();
        self.phase = if failed {
            HoverPhase::Failed(target)
        } else {
            HoverPhase::Ready(target)
        };
        true
    }

    /// Wait for the next task event and apply it
    pub async fn step(&mut self) -> bool {
        match self.events_rx.recv().await {
            Ok(event) => self.apply(event),
            Err(_) => false,
        }
    }

    /// Apply every event already queued; returns how many were applied
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(Some(event)) = self.events_rx.try_recv() {
            self.apply(event);
            applied += 1;
        }
        applied
    }

    /// Definition to show for the hovered token, if it has arrived
    pub fn tooltip(&self) -> Option<Tooltip<'_>> {
        let (target, failed) = match &self.phase {
            HoverPhase::Ready(t) => (t, false),
            HoverPhase::Failed(t) => (t, true),
            _ => return None,
        };

        self.definitions.get(&target.word).map(|known| Tooltip {
            target,
            definition: &known.definition,
            failed,
        })
    }

    pub fn render(&self, selection: &SelectionSet) -> Vec<RenderedToken<'_>> {
        let tooltip = self.tooltip();

        self.tokens
            .iter()
            .enumerate()
            .map(|(index, token)| {
                let word = token.normalized();
                RenderedToken {
                    text: &token.text,
                    index,
                    eligible: word.is_some(),
                    selected: word.as_ref().is_some_and(|w| selection.contains(w)),
                    tooltip: tooltip.filter(|t| t.target.index == index),
                }
            })
            .collect()
    }

    /// Add the hovered word to `list`; hover and definition state are untouched
    pub async fn add_hovered_word_to_list(&self, list: &mut VocabList) -> Result<AddOutcome, VocabError> {
        match self.hovered() {
            Some(target) => list.add(target.word.as_str()).await,
            None => Ok(AddOutcome::NoHover),
        }
    }
}

impl Drop for HoverController {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
