//! Counting and lexicographic ranking of k-combinations.
//!
//! Ranks are 0-based positions in the order the state machine visits tuples,
//! so `unrank(r)` is the tuple yielded by the `r`-th call from the canonical
//! start. C(2048, 12) is about 1.1e31, comfortably inside `u128`.

use super::IndexTuple;
use crate::CursorError;

/// Binomial coefficient C(n, k), or `None` if it does not fit in `u128`.
pub fn binomial(n: usize, k: usize) -> Option<u128> {
    if k > n {
        return Some(0);
    }
    let k = k.min(n - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // C(n, i+1) = C(n, i) * (n-i) / (i+1); divide first so only the
        // final value has to fit
        let (factor, divisor) = ((n - i) as u128, i as u128 + 1);
        let common = gcd(result, divisor);
        result = (result / common).checked_mul(factor / (divisor / common))?;
    }
    Some(result)
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Number of k-combinations of n, as an error-reporting wrapper over [`binomial`].
pub fn combination_count(n: usize, k: usize) -> Result<u128, CursorError> {
    binomial(n, k).ok_or(CursorError::CountOverflow { n, k })
}

/// Lexicographic rank of `tuple` among all `tuple.len()`-combinations of `n`.
///
/// Uses the complement identity `rank = C(n,k) - 1 - Σ C(n-1-t[i], k-i)`,
/// which needs one binomial per position.
pub fn rank(tuple: &IndexTuple, n: usize) -> Result<u128, CursorError> {
    let k = tuple.len();
    tuple.check_fits(n, k)?;
    let total = combination_count(n, k)?;

    let mut tail: u128 = 0;
    for (i, &index) in tuple.as_slice().iter().enumerate() {
        let term = binomial(n - 1 - index, k - i).ok_or(CursorError::CountOverflow { n, k })?;
        tail = tail
            .checked_add(term)
            .ok_or(CursorError::CountOverflow { n, k })?;
    }

    Ok(total - 1 - tail)
}

/// Tuple at lexicographic position `rank` among all k-combinations of `n`.
pub fn unrank(rank: u128, n: usize, k: usize) -> Result<IndexTuple, CursorError> {
    if k == 0 {
        return Err(CursorError::ZeroPhraseLength);
    }
    if n < k {
        return Err(CursorError::VocabularyTooSmall {
            size: n,
            phrase_length: k,
        });
    }
    let total = combination_count(n, k)?;
    if rank >= total {
        return Err(CursorError::RankOutOfRange { rank, total });
    }

    let mut remaining = rank;
    let mut indices = Vec::with_capacity(k);
    let mut value = 0;
    for i in 0..k {
        loop {
            // tuples sharing this prefix with `value` at position i
            let block = binomial(n - 1 - value, k - 1 - i)
                .ok_or(CursorError::CountOverflow { n, k })?;
            if remaining < block {
                break;
            }
            remaining -= block;
            value += 1;
        }
        indices.push(value);
        value += 1;
    }

    IndexTuple::new(indices)
}
