//! Independent cursors over one shared vocabulary.

mod common;

use std::thread;

use common::{brute_force, vocabulary};
use mnemonic_cursor::partition;

#[test]
fn test_shards_walked_on_threads_cover_space() {
    let words = vocabulary(10);
    let shards = partition::shards(words.len(), 4, 3).unwrap();

    let handles: Vec<_> = shards
        .into_iter()
        .map(|shard| {
            let words = words.clone();
            thread::spawn(move || {
                shard
                    .cursor(words)
                    .unwrap()
                    .map(|phrase| phrase.to_string())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let joined: Vec<String> = handles
        .into_iter()
        .flat_map(|handle| handle.join().unwrap())
        .collect();

    let expected: Vec<String> = brute_force(10, 4)
        .into_iter()
        .map(|tuple| {
            tuple
                .iter()
                .map(|i| format!("w{i}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect();
    assert_eq!(joined, expected);
}
