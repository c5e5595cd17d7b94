pub mod dictionary;
pub mod error;
pub mod highlight;
pub mod hover;
pub mod language;
pub mod lookup;
pub mod preprocess;
pub mod state;
pub mod types;
pub mod vocab;

#[cfg(test)]
mod testing;

pub use dictionary::{DefinitionStore, PreferenceStore, StoreError, VocabStore};
pub use error::{LookupError, SessionError, VocabError};
pub use highlight::{HighlightMarker, SelectionSet, apply_highlight};
pub use hover::{HoverController, HoverEvent};
pub use language::{NormalizedWord, Token, TokenKind, normalize, segment};
pub use lookup::{DefinitionCache, Resolution};
pub use state::{Session, SessionContext};
pub use types::{HoverPhase, HoverTarget, RenderedToken, Tooltip};
pub use vocab::{AddOutcome, VocabList};
