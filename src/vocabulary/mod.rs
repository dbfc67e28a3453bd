//! Ordered word lists indexed by combination values.
//!
//! A [`Vocabulary`] is immutable once built and cheap to clone; every clone
//! shares the same word storage, so cursors on different threads read one
//! list without locking.

mod phrase;

pub use phrase::MnemonicPhrase;

use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::combination::IndexTuple;
use crate::CursorError;

/// Errors raised while loading or querying a vocabulary.
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// Word list could not be read.
    #[error("failed to read word list {path}: {source}")]
    Io {
        /// Path of the word list (`<reader>` for in-memory sources).
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// Source contained no words after skipping blank lines.
    #[error("word list is empty")]
    Empty,

    /// Word is not part of the vocabulary.
    #[error("unknown word '{0}'")]
    UnknownWord(String),

    /// Words did not map to a valid index tuple.
    #[error("words do not form a valid tuple: {0}")]
    InvalidTuple(#[from] CursorError),
}

/// Ordered, read-only word list.
#[derive(Clone)]
pub struct Vocabulary {
    words: Arc<[Arc<str>]>,
    positions: Arc<HashMap<Arc<str>, usize>>,
}

impl fmt::Debug for Vocabulary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vocabulary")
            .field("len", &self.words.len())
            .field("first", &self.words.first())
            .finish()
    }
}

impl Vocabulary {
    /// Build from words in order. Fails only when no words are supplied.
    pub fn from_words<I, S>(words: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = S>,
        S: Into<Arc<str>>,
    {
        let words: Arc<[Arc<str>]> = words.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut positions = HashMap::with_capacity(words.len());
        for (index, word) in words.iter().enumerate() {
            // first occurrence wins; uniqueness is not enforced
            positions.entry(Arc::clone(word)).or_insert(index);
        }

        Ok(Self {
            words,
            positions: Arc::new(positions),
        })
    }

    /// Read one word per line, trimming whitespace and skipping blank lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, VocabularyError> {
        Self::read_lines(reader, Path::new("<reader>"))
    }

    /// Load a line-delimited word list from disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| VocabularyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let vocabulary = Self::read_lines(BufReader::new(file), path)?;
        debug!(path = %path.display(), words = vocabulary.len(), "loaded vocabulary");
        Ok(vocabulary)
    }

    fn read_lines<R: BufRead>(reader: R, path: &Path) -> Result<Self, VocabularyError> {
        let mut words = Vec::new();
        for line in reader.lines() {
            let line = line.map_err(|source| VocabularyError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let word = line.trim();
            if !word.is_empty() {
                words.push(word.to_string());
            }
        }
        Self::from_words(words)
    }

    /// Number of words `N`.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Vocabularies are never empty; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Word at `index`.
    pub fn word(&self, index: usize) -> Option<&str> {
        self.words.get(index).map(|word| word.as_ref())
    }

    /// Index of the first occurrence of `word`.
    pub fn index_of(&self, word: &str) -> Option<usize> {
        self.positions.get(word).copied()
    }

    /// Map indices to words; `None` if any index is out of range.
    pub fn phrase(&self, indices: &[usize]) -> Option<MnemonicPhrase> {
        indices
            .iter()
            .map(|&index| self.words.get(index).cloned())
            .collect::<Option<Vec<_>>>()
            .map(MnemonicPhrase::new)
    }

    /// Map words back to a strictly increasing index tuple.
    pub fn tuple_for_words<S: AsRef<str>>(&self, words: &[S]) -> Result<IndexTuple, VocabularyError> {
        let indices = words
            .iter()
            .map(|word| {
                let word = word.as_ref();
                self.index_of(word)
                    .ok_or_else(|| VocabularyError::UnknownWord(word.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(IndexTuple::new(indices)?)
    }

    /// Hex BLAKE3 digest of the ordered word list.
    ///
    /// Two vocabularies share a fingerprint only if they hold the same words
    /// in the same order, which is what a saved position depends on.
    pub fn fingerprint(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for word in self.words.iter() {
            hasher.update(word.as_bytes());
            hasher.update(b"\n");
        }
        hasher.finalize().to_hex().to_string()
    }

    /// Phrase for a tuple already validated against this vocabulary.
    pub(crate) fn materialize(&self, tuple: &IndexTuple) -> MnemonicPhrase {
        MnemonicPhrase::new(
            tuple
                .as_slice()
                .iter()
                .map(|&index| Arc::clone(&self.words[index]))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reader_skips_blank_lines_and_trims() {
        let input = "abandon\n\n  ability \r\nable\n\n";
        let vocabulary = Vocabulary::from_reader(input.as_bytes()).unwrap();
        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.word(1), Some("ability"));
        assert_eq!(vocabulary.word(3), None);
    }

    #[test]
    fn test_empty_source() {
        assert!(matches!(
            Vocabulary::from_reader("\n \n".as_bytes()),
            Err(VocabularyError::Empty)
        ));
    }

    #[test]
    fn test_word_index_round_trip() {
        let vocabulary = Vocabulary::from_words(["w0", "w1", "w2", "w3"]).unwrap();
        let tuple = vocabulary.tuple_for_words(&["w1", "w3"]).unwrap();
        assert_eq!(tuple.as_slice(), &[1, 3]);
        assert_eq!(vocabulary.phrase(tuple.as_slice()).unwrap().to_string(), "w1 w3");

        assert!(matches!(
            vocabulary.tuple_for_words(&["w3", "w1"]),
            Err(VocabularyError::InvalidTuple(CursorError::NotStrictlyIncreasing { .. }))
        ));
        assert!(matches!(
            vocabulary.tuple_for_words(&["w9"]),
            Err(VocabularyError::UnknownWord(_))
        ));
        assert_eq!(vocabulary.phrase(&[0, 4]), None);
    }

    #[test]
    fn test_fingerprint_depends_on_order() {
        let a = Vocabulary::from_words(["alpha", "beta"]).unwrap();
        let b = Vocabulary::from_words(["beta", "alpha"]).unwrap();
        let c = Vocabulary::from_words(["alpha", "beta"]).unwrap();
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint(), c.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }
}
