//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use mnemonic_cursor::{Cursor, CursorConfig, IndexTuple, Vocabulary};

/// Vocabulary `w0, w1, …, w{n-1}`.
pub fn vocabulary(n: usize) -> Vocabulary {
    Vocabulary::from_words((0..n).map(|i| format!("w{i}"))).expect("non-empty vocabulary")
}

/// Cursor over `vocabulary(n)` producing `k`-word phrases.
pub fn cursor(n: usize, k: usize, start: Option<IndexTuple>) -> Cursor {
    let mut config = CursorConfig::bip39().with_phrase_length(k);
    if let Some(start) = start {
        config = config.with_start(start);
    }
    Cursor::new(vocabulary(n), config).expect("valid cursor configuration")
}

/// Pull until `has_more` is false and return every yielded tuple.
pub fn drain(cursor: &mut Cursor) -> Vec<Vec<usize>> {
    let mut tuples = Vec::new();
    loop {
        let step = cursor.next_phrase();
        tuples.push(step.indices.into_inner());
        if !step.has_more {
            return tuples;
        }
    }
}

/// All k-subsets of `0..n` in lexicographic order, built recursively.
pub fn brute_force(n: usize, k: usize) -> Vec<Vec<usize>> {
    fn extend(n: usize, k: usize, from: usize, prefix: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
        if prefix.len() == k {
            out.push(prefix.clone());
            return;
        }
        for value in from..n {
            prefix.push(value);
            extend(n, k, value + 1, prefix, out);
            prefix.pop();
        }
    }

    let mut out = Vec::new();
    extend(n, k, 0, &mut Vec::with_capacity(k), &mut out);
    out
}

/// Unique path under the system temp directory for this test process.
pub fn temp_path(name: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let id = COUNTER.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "mnemonic-cursor-{}-{}-{}",
        std::process::id(),
        id,
        name
    ))
}
