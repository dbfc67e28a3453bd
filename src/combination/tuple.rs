use std::fmt;
use std::str::FromStr;

use crate::CursorError;

/// Strictly increasing tuple of vocabulary indices.
///
/// Every tuple in circulation satisfies `t[0] < t[1] < … < t[k-1]`; the
/// constructor is the only way in and rejects anything else. Whether the
/// values fit a particular vocabulary is checked by whoever knows its size
/// (see [`Combinations::new`](super::Combinations::new)).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<usize>", into = "Vec<usize>")
)]
pub struct IndexTuple(Vec<usize>);

impl IndexTuple {
    /// Validate and wrap a vector of indices.
    pub fn new(indices: Vec<usize>) -> Result<Self, CursorError> {
        if indices.is_empty() {
            return Err(CursorError::EmptyTuple);
        }
        if let Some(position) = indices.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(CursorError::NotStrictlyIncreasing {
                position: position + 1,
                previous: indices[position],
                index: indices[position + 1],
            });
        }
        Ok(Self(indices))
    }

    /// Canonical first combination `(0, 1, …, k-1)`.
    pub fn first(k: usize) -> Result<Self, CursorError> {
        if k == 0 {
            return Err(CursorError::ZeroPhraseLength);
        }
        Ok(Self((0..k).collect()))
    }

    /// Canonical last combination `(n-k, …, n-1)`.
    pub fn last(n: usize, k: usize) -> Result<Self, CursorError> {
        if k == 0 {
            return Err(CursorError::ZeroPhraseLength);
        }
        if n < k {
            return Err(CursorError::VocabularyTooSmall {
                size: n,
                phrase_length: k,
            });
        }
        Ok(Self((n - k..n).collect()))
    }

    /// Number of indices (`k`).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for parity with `len`.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the raw indices.
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    /// Largest index, which bounds the vocabulary size needed.
    pub fn max_index(&self) -> usize {
        self.0[self.0.len() - 1]
    }

    /// Unwrap into the underlying vector.
    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }

    /// Check the tuple fits a k-of-n enumeration.
    pub(crate) fn check_fits(&self, n: usize, k: usize) -> Result<(), CursorError> {
        if self.len() != k {
            return Err(CursorError::StartLengthMismatch {
                expected: k,
                actual: self.len(),
            });
        }
        if let Some(position) = self.0.iter().position(|&index| index >= n) {
            return Err(CursorError::IndexOutOfRange {
                position,
                index: self.0[position],
                size: n,
            });
        }
        Ok(())
    }

    /// Mutable access for the state machine; callers must restore strict increase.
    pub(crate) fn indices_mut(&mut self) -> &mut [usize] {
        &mut self.0
    }
}

impl AsRef<[usize]> for IndexTuple {
    fn as_ref(&self) -> &[usize] {
        &self.0
    }
}

impl TryFrom<Vec<usize>> for IndexTuple {
    type Error = CursorError;

    fn try_from(indices: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(indices)
    }
}

impl From<IndexTuple> for Vec<usize> {
    fn from(tuple: IndexTuple) -> Self {
        tuple.0
    }
}

impl fmt::Display for IndexTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{index}")?;
        }
        Ok(())
    }
}

impl FromStr for IndexTuple {
    type Err = CursorError;

    /// Parse a comma-separated list such as `0,1,2`. Whitespace around
    /// values is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let indices = s
            .split(',')
            .map(|field| {
                let field = field.trim();
                field.parse::<usize>().map_err(|_| CursorError::MalformedTuple {
                    input: s.to_string(),
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(indices)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn test_serializes_as_plain_array() {
        let tuple = IndexTuple::new(vec![0, 5, 9]).unwrap();
        assert_eq!(serde_json::to_string(&tuple).unwrap(), "[0,5,9]");
        let parsed: IndexTuple = serde_json::from_str("[0,5,9]").unwrap();
        assert_eq!(parsed, tuple);
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<IndexTuple>("[2,1]").unwrap_err();
        assert!(err.to_string().contains("does not exceed previous index"), "{err}");
        assert!(serde_json::from_str::<IndexTuple>("[3,3]").is_err());
        assert!(serde_json::from_str::<IndexTuple>("[]").is_err());
    }
}
