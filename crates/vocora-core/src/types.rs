use vocora_types::Definition;

use crate::language::NormalizedWord;

/// The token under the pointer: its word and its position in the story
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HoverTarget {
    pub word: NormalizedWord,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverPhase {
    #[default]
    Idle,
    /// Pointer is resting on a token, debounce running
    Hovering(HoverTarget),
    /// Debounce elapsed, definition requested
    Pending(HoverTarget),
    Ready(HoverTarget),
    Failed(HoverTarget),
}

impl HoverPhase {
    pub fn target(&self) -> Option<&HoverTarget> {
        match self {
            HoverPhase::Idle => None,
            HoverPhase::Hovering(t)
            | HoverPhase::Pending(t)
            | HoverPhase::Ready(t)
            | HoverPhase::Failed(t) => Some(t),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, HoverPhase::Idle)
    }
}

/// Definition shown next to the hovered token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tooltip<'a> {
    pub target: &'a HoverTarget,
    pub definition: &'a Definition,
    /// The definition is a placeholder for a failed lookup
    pub failed: bool,
}

/// One token as the story view should draw it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedToken<'a> {
    pub text: &'a str,
    pub index: usize,
    /// Hoverable; false for punctuation and whitespace
    pub eligible: bool,
    /// Part of the learner's selection
    pub selected: bool,
    pub tooltip: Option<Tooltip<'a>>,
}
