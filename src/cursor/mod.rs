//! Combination cursor over a vocabulary
//!
//! Pairs a [`Combinations`] walk with a shared [`Vocabulary`] and hands out
//! one [`MnemonicPhrase`] per pull. The cursor's whole resumable state is
//! [`Cursor::position`].

mod config;

pub use config::CursorConfig;

use tracing::debug;

use crate::combination::{Combinations, IndexTuple};
use crate::vocabulary::{MnemonicPhrase, Vocabulary};
use crate::CursorError;

/// Result of one pull from a cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// Tuple that was yielded.
    pub indices: IndexTuple,
    /// Words for `indices`.
    pub phrase: MnemonicPhrase,
    /// False when `indices` was the final tuple.
    pub has_more: bool,
}

/// Stateful generator of phrases in lexicographic tuple order.
#[derive(Debug, Clone)]
pub struct Cursor {
    vocabulary: Vocabulary,
    walk: Combinations,
}

impl Cursor {
    /// Create a cursor over `vocabulary`.
    ///
    /// Fails if the phrase length is zero, the vocabulary is smaller than the
    /// phrase length, or a start/end tuple does not fit this vocabulary.
    pub fn new(vocabulary: Vocabulary, config: CursorConfig) -> Result<Self, CursorError> {
        let walk = Combinations::bounded(
            vocabulary.len(),
            config.phrase_length,
            config.start,
            config.end,
        )?;
        debug!(
            words = vocabulary.len(),
            phrase_length = walk.phrase_length(),
            start = %walk.current(),
            "cursor initialised"
        );
        Ok(Self { vocabulary, walk })
    }

    /// Yield the current phrase and advance.
    ///
    /// The first call returns the construction-time tuple. Once the final
    /// tuple has been returned (with `has_more == false`), further calls
    /// keep returning it with `has_more == false`.
    pub fn next_phrase(&mut self) -> Step {
        let (indices, has_more) = self.walk.step();
        let phrase = self.vocabulary.materialize(&indices);
        Step {
            indices,
            phrase,
            has_more,
        }
    }

    /// Tuple the next pull will yield; pass it as a start to resume.
    pub fn position(&self) -> &IndexTuple {
        self.walk.current()
    }

    /// Final tuple of this cursor.
    pub fn end(&self) -> &IndexTuple {
        self.walk.end()
    }

    /// Whether the final tuple has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.walk.is_exhausted()
    }

    /// Put a cursor sitting on its final tuple into the terminal state.
    pub(crate) fn finish(&mut self) -> Result<(), CursorError> {
        self.walk.finish()
    }

    /// Words per phrase.
    pub fn phrase_length(&self) -> usize {
        self.walk.phrase_length()
    }

    /// Vocabulary backing this cursor.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// C(N, k) for this vocabulary and phrase length.
    pub fn total(&self) -> Result<u128, CursorError> {
        self.walk.total()
    }

    /// Phrases still to be yielded, including the current one.
    pub fn remaining(&self) -> Result<u128, CursorError> {
        self.walk.remaining()
    }
}

impl Iterator for Cursor {
    type Item = MnemonicPhrase;

    /// Each phrase exactly once, then `None`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        Some(self.next_phrase().phrase)
    }
}

impl std::iter::FusedIterator for Cursor {}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary(n: usize) -> Vocabulary {
        Vocabulary::from_words((0..n).map(|i| format!("w{i}"))).unwrap()
    }

    #[test]
    fn test_first_pull_is_start_tuple() {
        let start = IndexTuple::new(vec![1, 3, 4]).unwrap();
        let mut cursor = Cursor::new(
            vocabulary(6),
            CursorConfig::bip39().with_phrase_length(3).with_start(start.clone()),
        )
        .unwrap();

        let step = cursor.next_phrase();
        assert_eq!(step.indices, start);
        assert_eq!(step.phrase.to_string(), "w1 w3 w4");
        assert!(step.has_more);
        assert_eq!(cursor.position().as_slice(), &[1, 3, 5]);
    }

    #[test]
    fn test_exhausted_cursor_repeats_last_phrase() {
        let mut cursor =
            Cursor::new(vocabulary(3), CursorConfig::bip39().with_phrase_length(3)).unwrap();
        for _ in 0..3 {
            let step = cursor.next_phrase();
            assert_eq!(step.phrase.to_string(), "w0 w1 w2");
            assert!(!step.has_more);
        }
        assert!(cursor.is_exhausted());
        assert_eq!(cursor.next(), None);
    }

    #[test]
    fn test_iterator_yields_each_phrase_once() {
        let cursor =
            Cursor::new(vocabulary(5), CursorConfig::bip39().with_phrase_length(2)).unwrap();
        let phrases: Vec<String> = cursor.map(|phrase| phrase.to_string()).collect();
        assert_eq!(phrases.len(), 10);
        assert_eq!(phrases.first().map(String::as_str), Some("w0 w1"));
        assert_eq!(phrases.last().map(String::as_str), Some("w3 w4"));
    }

    #[test]
    fn test_rejects_start_outside_vocabulary() {
        let start = IndexTuple::new(vec![0, 1, 6]).unwrap();
        let err = Cursor::new(
            vocabulary(6),
            CursorConfig::bip39().with_phrase_length(3).with_start(start),
        )
        .unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(matches!(err, CursorError::IndexOutOfRange { index: 6, .. }));
    }

    #[test]
    fn test_default_config_needs_twelve_words() {
        assert!(matches!(
            Cursor::new(vocabulary(11), CursorConfig::default()),
            Err(CursorError::VocabularyTooSmall { size: 11, phrase_length: 12 })
        ));
        let cursor = Cursor::new(vocabulary(12), CursorConfig::default()).unwrap();
        assert_eq!(cursor.total().unwrap(), 1);
    }
}
