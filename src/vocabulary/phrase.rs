use std::fmt;
use std::sync::Arc;

/// Ordered words obtained by mapping an index tuple through a vocabulary.
///
/// Words are shared with the vocabulary, so building a phrase copies `k`
/// reference-counted pointers and no string data.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MnemonicPhrase {
    words: Vec<Arc<str>>,
}

impl MnemonicPhrase {
    pub(crate) fn new(words: Vec<Arc<str>>) -> Self {
        Self { words }
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// True for a phrase with no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in order.
    pub fn words(&self) -> impl Iterator<Item = &str> + '_ {
        self.words.iter().map(|word| word.as_ref())
    }

    /// Owned copies of the words.
    pub fn to_vec(&self) -> Vec<String> {
        self.words().map(str::to_string).collect()
    }
}

impl fmt::Display for MnemonicPhrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, word) in self.words.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(word)?;
        }
        Ok(())
    }
}
