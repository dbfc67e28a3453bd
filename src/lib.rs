//! # Resumable mnemonic combination enumeration
//!
//! Walks every strictly increasing k-tuple of indices into an N-word
//! vocabulary (k = 12, N = 2048 for the BIP-39 English list) in
//! lexicographic order, mapping each tuple to its words.
//!
//! ## Core idea
//!
//! 1. **Tuple is the state**: a cursor is exactly one strictly increasing
//!    index tuple, so any tuple it produced is a complete resume point
//! 2. **Yield, then advance**: each pull returns the current phrase and moves
//!    to the lexicographic successor by the rightmost-advanceable-digit rule
//! 3. **Explicit end**: exhaustion is detected by comparing against the last
//!    combination `(N-k, …, N-1)`, and the terminal state repeats forever
//!
//! Ranks (C(2048, 12) ≈ 1.1·10³¹ fits in `u128`) let the space be split into
//! shards that independent cursors walk in parallel.
//!
//! ## Usage Example
//!
//! ```
//! use mnemonic_cursor::{Cursor, CursorConfig, Vocabulary};
//!
//! let vocabulary = Vocabulary::from_words(["w0", "w1", "w2", "w3"])?;
//! let mut cursor = Cursor::new(vocabulary, CursorConfig::bip39().with_phrase_length(3))?;
//!
//! let step = cursor.next_phrase();
//! assert_eq!(step.phrase.to_string(), "w0 w1 w2");
//! assert!(step.has_more);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod checkpoint;  // Caller-level persistence of cursor positions
pub mod combination; // Index tuples, lexicographic walk, rank/unrank
pub mod cursor;      // Vocabulary-backed phrase cursor
pub mod partition;   // Splitting the combination space into shards
pub mod vocabulary;  // Word lists and phrases

pub use checkpoint::{Checkpoint, CheckpointError};
pub use combination::{binomial, Combinations, IndexTuple};
pub use cursor::{Cursor, CursorConfig, Step};
pub use partition::{shards, Shard};
pub use vocabulary::{MnemonicPhrase, Vocabulary, VocabularyError};

use thiserror::Error;

/// Words in a BIP-39 word list.
pub const BIP39_WORDLIST_SIZE: usize = 2048;

/// Words per enumerated phrase unless configured otherwise.
pub const DEFAULT_PHRASE_LENGTH: usize = 12;

/// Errors raised while configuring a walk or converting between tuples and ranks.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CursorError {
    /// Phrase length `k` must be at least one.
    #[error("phrase length must be greater than zero")]
    ZeroPhraseLength,

    /// Fewer words than the phrase length, so no combination exists.
    #[error("vocabulary of {size} words cannot form {phrase_length}-word combinations")]
    VocabularyTooSmall {
        /// Vocabulary size `N`.
        size: usize,
        /// Phrase length `k`.
        phrase_length: usize,
    },

    /// Tuple length differs from the phrase length.
    #[error("tuple has {actual} indices, expected {expected}")]
    StartLengthMismatch {
        /// Configured phrase length.
        expected: usize,
        /// Length of the supplied tuple.
        actual: usize,
    },

    /// Tuple value does not index into the vocabulary.
    #[error("index {index} at position {position} is outside a vocabulary of {size} words")]
    IndexOutOfRange {
        /// Position within the tuple.
        position: usize,
        /// Offending value.
        index: usize,
        /// Vocabulary size.
        size: usize,
    },

    /// Tuple contains a duplicate or decreasing pair.
    #[error("index {index} at position {position} does not exceed previous index {previous}")]
    NotStrictlyIncreasing {
        /// Position of the second element of the pair.
        position: usize,
        /// Value before it.
        previous: usize,
        /// Value at `position`.
        index: usize,
    },

    /// Tuple has no indices.
    #[error("tuple must contain at least one index")]
    EmptyTuple,

    /// Tuple text could not be parsed.
    #[error("malformed tuple '{input}': '{field}' is not an index")]
    MalformedTuple {
        /// Full text supplied.
        input: String,
        /// Field that failed to parse.
        field: String,
    },

    /// End bound precedes the start tuple.
    #[error("end tuple ({end}) precedes start tuple ({start})")]
    EndBeforeStart {
        /// Start tuple.
        start: String,
        /// End tuple.
        end: String,
    },

    /// Terminal state requested while the cursor is not on its final tuple.
    #[error("position ({position}) is not the final tuple ({end})")]
    NotAtEnd {
        /// Current tuple.
        position: String,
        /// Final tuple.
        end: String,
    },

    /// C(n, k) does not fit in `u128`.
    #[error("C({n}, {k}) overflows a 128-bit count")]
    CountOverflow {
        /// Vocabulary size.
        n: usize,
        /// Phrase length.
        k: usize,
    },

    /// Rank is not below the number of combinations.
    #[error("rank {rank} out of range (total {total})")]
    RankOutOfRange {
        /// Requested rank.
        rank: u128,
        /// Number of combinations.
        total: u128,
    },

    /// Partition requested with zero shards.
    #[error("shard count must be greater than zero")]
    ZeroShards,

    /// Shard id outside `1..=shards`.
    #[error("shard {shard_id} out of range (1..={shards})")]
    ShardOutOfRange {
        /// Requested shard id.
        shard_id: usize,
        /// Number of shards in the split.
        shards: usize,
    },
}

impl CursorError {
    /// Whether this error rejects a walk's configuration (phrase length,
    /// vocabulary size, or start/end tuple) rather than a counting request.
    pub fn is_invalid_configuration(&self) -> bool {
        !matches!(
            self,
            CursorError::CountOverflow { .. }
                | CursorError::RankOutOfRange { .. }
                | CursorError::ZeroShards
                | CursorError::ShardOutOfRange { .. }
        )
    }
}
