//! Persisted cursor positions
//!
//! A checkpoint records the tuple a cursor will yield next, plus enough
//! context to refuse resuming against the wrong word list. On disk it is
//! one `key=value` per line:
//!
//! ```text
//! vocabulary=<blake3 hex of the word list>
//! phrase_length=12
//! emitted=100
//! position=0,1,2,3,4,5,6,7,8,9,10,111
//! end=2036,2037,2038,2039,2040,2041,2042,2043,2044,2045,2046,2047
//! exhausted=false
//! ```
//!
//! `end` is optional and only present for bounded (shard) cursors.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::combination::IndexTuple;
use crate::cursor::{Cursor, CursorConfig};
use crate::vocabulary::Vocabulary;
use crate::CursorError;

const KEYS: [&str; 6] = [
    "vocabulary",
    "phrase_length",
    "emitted",
    "position",
    "end",
    "exhausted",
];

/// Errors raised while saving, loading or resuming a checkpoint.
#[derive(Debug, Error)]
pub enum CheckpointError {
    /// Checkpoint file could not be read or written.
    #[error("checkpoint I/O error on {path}: {source}")]
    Io {
        /// File involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },

    /// Checkpoint text is not in the expected format.
    #[error("malformed checkpoint at line {line}: {reason}")]
    Malformed {
        /// 1-indexed line (0 for whole-file problems such as a missing key).
        line: usize,
        /// What was wrong.
        reason: String,
    },

    /// Checkpoint was taken against a different word list.
    #[error("checkpoint vocabulary {expected} does not match word list {actual}")]
    FingerprintMismatch {
        /// Fingerprint stored in the checkpoint.
        expected: String,
        /// Fingerprint of the supplied vocabulary.
        actual: String,
    },

    /// Stored position is not valid for the vocabulary.
    #[error("checkpoint position rejected: {0}")]
    Cursor(#[from] CursorError),
}

/// Saved cursor position.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Checkpoint {
    /// Fingerprint of the vocabulary the cursor ran over.
    pub vocabulary: String,
    /// Words per phrase.
    pub phrase_length: usize,
    /// Phrases emitted so far by the caller.
    pub emitted: u64,
    /// Tuple the next pull will yield.
    pub position: IndexTuple,
    /// Bound of a shard cursor, if any.
    pub end: Option<IndexTuple>,
    /// Whether the final tuple has already been yielded.
    pub exhausted: bool,
}

impl Checkpoint {
    /// Capture the resumable state of `cursor`.
    ///
    /// The canonical last tuple is implied and not stored as an end bound.
    pub fn capture(cursor: &Cursor, emitted: u64) -> Self {
        let canonical_last = IndexTuple::last(cursor.vocabulary().len(), cursor.phrase_length()).ok();
        let end = match canonical_last {
            Some(last) if &last == cursor.end() => None,
            _ => Some(cursor.end().clone()),
        };
        Self {
            vocabulary: cursor.vocabulary().fingerprint(),
            phrase_length: cursor.phrase_length(),
            emitted,
            position: cursor.position().clone(),
            end,
            exhausted: cursor.is_exhausted(),
        }
    }

    /// Rebuild a cursor at the saved position.
    ///
    /// An exhausted checkpoint resumes into the terminal state: the iterator
    /// yields nothing and `next_phrase` repeats the final tuple with
    /// `has_more == false`, as the captured cursor would.
    pub fn resume(&self, vocabulary: Vocabulary) -> Result<Cursor, CheckpointError> {
        let actual = vocabulary.fingerprint();
        if actual != self.vocabulary {
            return Err(CheckpointError::FingerprintMismatch {
                expected: self.vocabulary.clone(),
                actual,
            });
        }

        let mut config = CursorConfig::bip39()
            .with_phrase_length(self.phrase_length)
            .with_start(self.position.clone());
        if let Some(end) = &self.end {
            config = config.with_end(end.clone());
        }
        let mut cursor = Cursor::new(vocabulary, config)?;
        if self.exhausted {
            cursor.finish()?;
        }
        debug!(
            position = %self.position,
            emitted = self.emitted,
            exhausted = self.exhausted,
            "resumed from checkpoint"
        );
        Ok(cursor)
    }

    /// Write in the line format described in the module docs.
    pub fn write_to<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "vocabulary={}", self.vocabulary)?;
        writeln!(writer, "phrase_length={}", self.phrase_length)?;
        writeln!(writer, "emitted={}", self.emitted)?;
        writeln!(writer, "position={}", self.position)?;
        if let Some(end) = &self.end {
            writeln!(writer, "end={end}")?;
        }
        writeln!(writer, "exhausted={}", self.exhausted)?;
        Ok(())
    }

    /// Parse the line format described in the module docs.
    pub fn read_from<R: BufRead>(reader: R) -> Result<Self, CheckpointError> {
        Self::parse(reader, Path::new("<reader>"))
    }

    /// Write to `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CheckpointError> {
        let path = path.as_ref();

        // staged write next to the target, then rename over it
        let staging = staging_path(path);
        let written = File::create(&staging).and_then(|mut file| {
            self.write_to(&mut file)?;
            file.sync_all()?;
            fs::rename(&staging, path)
        });
        if let Err(source) = written {
            fs::remove_file(&staging).ok();
            return Err(CheckpointError::Io {
                path: path.to_path_buf(),
                source,
            });
        }

        debug!(path = %path.display(), position = %self.position, "saved checkpoint");
        Ok(())
    }

    /// Load from `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CheckpointError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| CheckpointError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(BufReader::new(file), path)
    }

    fn parse<R: BufRead>(reader: R, path: &Path) -> Result<Self, CheckpointError> {
        let mut fields: HashMap<&'static str, (usize, String)> = HashMap::new();

        for (line_no, line) in reader.lines().enumerate() {
            let line_no = line_no + 1;
            let line = line.map_err(|source| CheckpointError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let (key, value) = line.split_once('=').ok_or_else(|| CheckpointError::Malformed {
                line: line_no,
                reason: format!("expected key=value, found '{line}'"),
            })?;
            let key = key.trim();
            let known = KEYS.iter().copied().find(|&known| known == key).ok_or_else(|| {
                CheckpointError::Malformed {
                    line: line_no,
                    reason: format!("unknown key '{key}'"),
                }
            })?;
            if fields.insert(known, (line_no, value.trim().to_string())).is_some() {
                return Err(CheckpointError::Malformed {
                    line: line_no,
                    reason: format!("duplicate key '{key}'"),
                });
            }
        }

        let vocabulary = required(&fields, "vocabulary")?.1.clone();
        let phrase_length = parse_field(&fields, "phrase_length", |v| v.parse::<usize>().ok())?;
        let emitted = parse_field(&fields, "emitted", |v| v.parse::<u64>().ok())?;
        let exhausted = parse_field(&fields, "exhausted", |v| v.parse::<bool>().ok())?;
        let position = tuple_field(&fields, "position")?;
        let end = if fields.contains_key("end") {
            Some(tuple_field(&fields, "end")?)
        } else {
            None
        };

        Ok(Self {
            vocabulary,
            phrase_length,
            emitted,
            position,
            end,
            exhausted,
        })
    }
}

/// `<path>.tmp`, keeping the full file name so no sibling is clobbered.
fn staging_path(path: &Path) -> PathBuf {
    let mut staging = path.as_os_str().to_owned();
    staging.push(".tmp");
    PathBuf::from(staging)
}

fn required<'a>(
    fields: &'a HashMap<&'static str, (usize, String)>,
    key: &str,
) -> Result<&'a (usize, String), CheckpointError> {
    fields.get(key).ok_or_else(|| CheckpointError::Malformed {
        line: 0,
        reason: format!("missing key '{key}'"),
    })
}

fn parse_field<T>(
    fields: &HashMap<&'static str, (usize, String)>,
    key: &str,
    parse: impl FnOnce(&str) -> Option<T>,
) -> Result<T, CheckpointError> {
    let (line, value) = required(fields, key)?;
    parse(value.as_str()).ok_or_else(|| CheckpointError::Malformed {
        line: *line,
        reason: format!("invalid value '{value}' for '{key}'"),
    })
}

fn tuple_field(
    fields: &HashMap<&'static str, (usize, String)>,
    key: &str,
) -> Result<IndexTuple, CheckpointError> {
    let (line, value) = required(fields, key)?;
    value.parse::<IndexTuple>().map_err(|err| CheckpointError::Malformed {
        line: *line,
        reason: format!("{key}: {err}"),
    })
}
