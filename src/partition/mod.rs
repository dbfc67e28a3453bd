//! Splitting the combination space into contiguous shards.
//!
//! The ranks `[0, C(N, k))` are cut into near-equal ranges (the first
//! `total % count` shards take one extra tuple). Each shard carries its own
//! start and end tuples, so a bounded [`Cursor`] per shard walks it without
//! sharing anything but the vocabulary. Concatenating shard outputs in id
//! order reproduces the full enumeration.

use std::ops::Range;

use tracing::debug;

use crate::combination::{combination_count, unrank, IndexTuple};
use crate::cursor::{Cursor, CursorConfig};
use crate::vocabulary::Vocabulary;
use crate::CursorError;

/// One contiguous rank range of the combination space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shard {
    /// 1-indexed shard identifier.
    pub shard_id: usize,
    /// Ranks covered by the shard.
    pub ranks: Range<u128>,
    /// First tuple of the shard.
    pub start: IndexTuple,
    /// Last tuple of the shard (inclusive).
    pub end: IndexTuple,
}

impl Shard {
    /// Number of tuples in the shard.
    pub fn len(&self) -> u128 {
        self.ranks.end - self.ranks.start
    }

    /// Shards produced by [`shards`] are never empty.
    pub fn is_empty(&self) -> bool {
        self.ranks.end <= self.ranks.start
    }

    /// Cursor bounded to this shard.
    pub fn cursor(&self, vocabulary: Vocabulary) -> Result<Cursor, CursorError> {
        let config = CursorConfig::bip39()
            .with_phrase_length(self.start.len())
            .with_start(self.start.clone())
            .with_end(self.end.clone());
        Cursor::new(vocabulary, config)
    }
}

/// Effective shard count and per-shard sizing for `requested` shards.
fn layout(n: usize, k: usize, requested: usize) -> Result<(usize, u128, u128), CursorError> {
    if requested == 0 {
        return Err(CursorError::ZeroShards);
    }
    if k == 0 {
        return Err(CursorError::ZeroPhraseLength);
    }
    let total = combination_count(n, k)?;
    if total == 0 {
        return Err(CursorError::VocabularyTooSmall {
            size: n,
            phrase_length: k,
        });
    }

    // never more shards than tuples
    let count = if (requested as u128) > total {
        total as usize
    } else {
        requested
    };
    let count_wide = count as u128;
    Ok((count, total / count_wide, total % count_wide))
}

fn build(n: usize, k: usize, shard_id: usize, base: u128, extra: u128) -> Result<Shard, CursorError> {
    let i = (shard_id - 1) as u128;
    let first = i * base + i.min(extra);
    let len = base + u128::from(i < extra);
    Ok(Shard {
        shard_id,
        ranks: first..first + len,
        start: unrank(first, n, k)?,
        end: unrank(first + len - 1, n, k)?,
    })
}

/// Split all k-combinations of `n` into at most `count` shards.
///
/// Fewer shards are returned when there are fewer than `count` tuples.
pub fn shards(n: usize, k: usize, count: usize) -> Result<Vec<Shard>, CursorError> {
    let (count, base, extra) = layout(n, k, count)?;
    debug!(n, k, count, "partitioning combination space");
    (1..=count)
        .map(|shard_id| build(n, k, shard_id, base, extra))
        .collect()
}

/// Shard `shard_id` (1-indexed) of the split computed by [`shards`].
pub fn shard(n: usize, k: usize, count: usize, shard_id: usize) -> Result<Shard, CursorError> {
    let (count, base, extra) = layout(n, k, count)?;
    if shard_id == 0 || shard_id > count {
        return Err(CursorError::ShardOutOfRange {
            shard_id,
            shards: count,
        });
    }
    build(n, k, shard_id, base, extra)
}
