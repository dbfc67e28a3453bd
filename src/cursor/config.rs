use crate::combination::IndexTuple;
use crate::DEFAULT_PHRASE_LENGTH;

/// Configuration parameters for a [`Cursor`](super::Cursor).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorConfig {
    /// Words per phrase `k`.
    pub phrase_length: usize,
    /// First tuple to yield; canonical `(0, …, k-1)` when `None`.
    pub start: Option<IndexTuple>,
    /// Last tuple to yield; canonical `(N-k, …, N-1)` when `None`.
    pub end: Option<IndexTuple>,
}

impl CursorConfig {
    /// Twelve-word phrases over the whole space.
    pub fn bip39() -> Self {
        Self {
            phrase_length: DEFAULT_PHRASE_LENGTH,
            start: None,
            end: None,
        }
    }

    /// Set the phrase length.
    pub fn with_phrase_length(mut self, phrase_length: usize) -> Self {
        self.phrase_length = phrase_length;
        self
    }

    /// Resume from `start` (for example a saved [`Cursor::position`](super::Cursor::position)).
    pub fn with_start(mut self, start: IndexTuple) -> Self {
        self.start = Some(start);
        self
    }

    /// Stop after yielding `end`.
    pub fn with_end(mut self, end: IndexTuple) -> Self {
        self.end = Some(end);
        self
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self::bip39()
    }
}
