//! Lexicographic k-combination state machine
//!
//! State is one strictly increasing tuple. Each step yields it and moves to
//! the next tuple by the rightmost-advanceable-digit rule: position `i` can
//! grow while `t[i] < n - k + i`, and everything right of it is reset to
//! the smallest strictly increasing tail.

use tracing::debug;

use super::{rank, IndexTuple};
use crate::CursorError;

/// Resumable walk over the k-combinations of `{0, …, n-1}`.
#[derive(Debug, Clone)]
pub struct Combinations {
    n: usize,
    k: usize,
    current: IndexTuple,
    /// Tuple treated as the final combination (canonical last unless bounded).
    last: IndexTuple,
    exhausted: bool,
}

impl Combinations {
    /// Start at `start`, or at `(0, 1, …, k-1)` when absent.
    pub fn new(n: usize, k: usize, start: Option<IndexTuple>) -> Result<Self, CursorError> {
        Self::bounded(n, k, start, None)
    }

    /// Like [`Combinations::new`], but stop after yielding `end` instead of
    /// the canonical last combination.
    pub fn bounded(
        n: usize,
        k: usize,
        start: Option<IndexTuple>,
        end: Option<IndexTuple>,
    ) -> Result<Self, CursorError> {
        if k == 0 {
            return Err(CursorError::ZeroPhraseLength);
        }
        if n < k {
            return Err(CursorError::VocabularyTooSmall {
                size: n,
                phrase_length: k,
            });
        }

        let current = match start {
            Some(tuple) => {
                tuple.check_fits(n, k)?;
                tuple
            }
            None => IndexTuple::first(k)?,
        };

        let last = match end {
            Some(tuple) => {
                tuple.check_fits(n, k)?;
                if tuple < current {
                    return Err(CursorError::EndBeforeStart {
                        start: current.to_string(),
                        end: tuple.to_string(),
                    });
                }
                tuple
            }
            None => IndexTuple::last(n, k)?,
        };

        Ok(Self {
            n,
            k,
            current,
            last,
            exhausted: false,
        })
    }

    /// Vocabulary size `n`.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Tuple length `k`.
    pub fn phrase_length(&self) -> usize {
        self.k
    }

    /// Tuple the next step will yield.
    pub fn current(&self) -> &IndexTuple {
        &self.current
    }

    /// Final tuple of this walk.
    pub fn end(&self) -> &IndexTuple {
        &self.last
    }

    /// Whether the current tuple is the final one.
    pub fn is_last(&self) -> bool {
        self.current == self.last
    }

    /// Whether the final tuple has already been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Enter the terminal state without yielding. Only valid on the final
    /// tuple, where it matches the state left behind by the last `step`.
    pub(crate) fn finish(&mut self) -> Result<(), CursorError> {
        if !self.is_last() {
            return Err(CursorError::NotAtEnd {
                position: self.current.to_string(),
                end: self.last.to_string(),
            });
        }
        self.exhausted = true;
        Ok(())
    }

    /// Yield the current tuple and advance.
    ///
    /// The flag is `false` when the yielded tuple was the final one. From then
    /// on every call returns that same tuple with `false`.
    pub fn step(&mut self) -> (IndexTuple, bool) {
        let yielded = self.current.clone();
        if self.exhausted || self.is_last() {
            if !self.exhausted {
                debug!(last = %yielded, "combinations exhausted");
            }
            self.exhausted = true;
            return (yielded, false);
        }

        let advanced = self.advance();
        debug_assert!(advanced, "non-final tuple {yielded} had no advanceable position");
        (yielded, true)
    }

    /// Total number of k-combinations of n.
    pub fn total(&self) -> Result<u128, CursorError> {
        rank::combination_count(self.n, self.k)
    }

    /// Tuples still to be yielded, counting the current one.
    pub fn remaining(&self) -> Result<u128, CursorError> {
        if self.exhausted {
            return Ok(0);
        }
        let current = rank::rank(&self.current, self.n)?;
        let last = rank::rank(&self.last, self.n)?;
        Ok(last - current + 1)
    }

    /// Move to the lexicographic successor. Returns `false` only when every
    /// position already sits at its maximum.
    fn advance(&mut self) -> bool {
        let (n, k) = (self.n, self.k);
        let indices = self.current.indices_mut();

        let Some(pivot) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return false;
        };

        indices[pivot] += 1;
        for j in pivot + 1..k {
            indices[j] = indices[j - 1] + 1;
        }
        true
    }
}

impl Iterator for Combinations {
    type Item = IndexTuple;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        Some(self.step().0)
    }
}

impl std::iter::FusedIterator for Combinations {}
