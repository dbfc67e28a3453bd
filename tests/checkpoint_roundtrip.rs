//! Checkpoint persistence tests
//!
//! Saves a cursor part-way through, reloads the word list and checkpoint
//! from disk, and checks the resumed cursor continues where it stopped.

mod common;

use std::fs;
use std::path::Path;

use common::{cursor, drain, temp_path, vocabulary};
use mnemonic_cursor::{Checkpoint, CheckpointError, Cursor, CursorConfig, CursorError, Vocabulary};

#[test]
fn test_checkpoint_file_resumes_enumeration() {
    let wordlist = temp_path("words.txt");
    fs::write(&wordlist, "w0\nw1\n\nw2\nw3\n  w4\nw5\n\n").unwrap();
    let words = Vocabulary::from_path(&wordlist).unwrap();
    assert_eq!(words.fingerprint(), vocabulary(6).fingerprint());

    let mut original =
        Cursor::new(words, CursorConfig::bip39().with_phrase_length(3)).unwrap();
    for _ in 0..7 {
        original.next_phrase();
    }

    let path = temp_path("checkpoint.txt");
    Checkpoint::capture(&original, 7).save(&path).unwrap();

    let loaded = Checkpoint::load(&path).unwrap();
    assert_eq!(loaded.emitted, 7);
    assert_eq!(loaded.position.as_slice(), &[0, 3, 4]);
    assert!(!loaded.exhausted);

    let reloaded = Vocabulary::from_path(&wordlist).unwrap();
    let mut resumed = loaded.resume(reloaded).unwrap();
    assert_eq!(drain(&mut resumed), drain(&mut original));

    fs::remove_file(&path).ok();
    fs::remove_file(&wordlist).ok();
}

#[test]
fn test_exhausted_checkpoint() {
    let mut finished = cursor(4, 4, None);
    finished.next_phrase();
    let checkpoint = Checkpoint::capture(&finished, 1);
    assert!(checkpoint.exhausted);

    let resumed = checkpoint.resume(vocabulary(4)).unwrap();
    assert!(resumed.is_exhausted());
    assert_eq!(resumed.remaining().unwrap(), 0);
    assert_eq!(resumed.clone().count(), 0);

    let mut resumed = resumed;
    let step = resumed.next_phrase();
    assert_eq!(step.indices.as_slice(), &[0, 1, 2, 3]);
    assert!(!step.has_more);
}

#[test]
fn test_exhausted_checkpoint_must_sit_on_final_tuple() {
    let mut checkpoint = Checkpoint::capture(&cursor(6, 3, None), 0);
    checkpoint.exhausted = true;
    assert!(matches!(
        checkpoint.resume(vocabulary(6)),
        Err(CheckpointError::Cursor(CursorError::NotAtEnd { .. }))
    ));
}

#[test]
fn test_save_leaves_sibling_files_alone() {
    let path = temp_path("state.txt");
    let mut sibling = path.clone();
    sibling.set_extension("tmp");
    fs::write(&sibling, "unrelated").unwrap();

    Checkpoint::capture(&cursor(6, 3, None), 0).save(&path).unwrap();

    assert_eq!(fs::read_to_string(&sibling).unwrap(), "unrelated");
    let mut staging = path.clone().into_os_string();
    staging.push(".tmp");
    assert!(!Path::new(&staging).exists());
    assert!(Checkpoint::load(&path).is_ok());

    fs::remove_file(&path).ok();
    fs::remove_file(&sibling).ok();
}

#[test]
fn test_failed_save_removes_staging_file() {
    let dir = temp_path("checkpoint-dir");
    fs::create_dir_all(&dir).unwrap();

    // renaming a file over a directory fails after the staged write
    let err = Checkpoint::capture(&cursor(6, 3, None), 0).save(&dir).unwrap_err();
    assert!(matches!(err, CheckpointError::Io { .. }));
    let mut staging = dir.clone().into_os_string();
    staging.push(".tmp");
    assert!(!Path::new(&staging).exists());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_checkpoint_rejects_different_word_list() {
    let checkpoint = Checkpoint::capture(&cursor(6, 3, None), 0);
    let reordered = Vocabulary::from_words(["w1", "w0", "w2", "w3", "w4", "w5"]).unwrap();
    assert!(matches!(
        checkpoint.resume(reordered),
        Err(CheckpointError::FingerprintMismatch { .. })
    ));
}

#[test]
fn test_missing_checkpoint_file() {
    let err = Checkpoint::load(temp_path("does-not-exist.txt")).unwrap_err();
    assert!(matches!(err, CheckpointError::Io { .. }));
}

#[test]
fn test_missing_word_list() {
    assert!(Vocabulary::from_path(temp_path("no-words.txt")).is_err());
}
