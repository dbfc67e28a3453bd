use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mnemonic_cursor::combination::{combination_count, rank, unrank};
use mnemonic_cursor::{
    partition, Checkpoint, Cursor, CursorConfig, IndexTuple, Vocabulary, DEFAULT_PHRASE_LENGTH,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "mnemonic-cursor",
    about = "Enumerate mnemonic word combinations in lexicographic order"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct VocabularyArgs {
    /// Word list, one word per line (blank lines ignored).
    #[arg(long, default_value = "english.txt")]
    wordlist: PathBuf,
    /// Words per phrase [default: 12].
    #[arg(long)]
    phrase_length: Option<usize>,
}

impl VocabularyArgs {
    fn phrase_length(&self) -> usize {
        self.phrase_length.unwrap_or(DEFAULT_PHRASE_LENGTH)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print phrases from the canonical start, a given tuple, or a checkpoint.
    Enumerate {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
        /// Phrases to print before stopping.
        #[arg(long, default_value_t = 100)]
        count: u64,
        /// Tuple to start from, e.g. `0,1,2,3,4,5,6,7,8,9,10,100`.
        #[arg(long)]
        start: Option<IndexTuple>,
        /// Checkpoint file: resumed from when present, rewritten on exit.
        #[arg(long)]
        checkpoint: Option<PathBuf>,
        /// Walk only shard `i` of `m`, written `i/m`.
        #[arg(long, conflicts_with = "start")]
        shard: Option<ShardSpec>,
    },
    /// Print the number of combinations C(N, k).
    Count {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
    },
    /// Convert between a tuple and its lexicographic rank.
    Locate {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
        /// Tuple to rank.
        #[arg(long, conflicts_with = "rank", required_unless_present = "rank")]
        position: Option<IndexTuple>,
        /// Rank to convert into a tuple.
        #[arg(long)]
        rank: Option<u128>,
    },
    /// Split the combination space into contiguous shards.
    Shards {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
        /// Number of shards.
        #[arg(long)]
        shards: usize,
    },
}

/// `i/m`: shard `i` (1-indexed) of `m`.
#[derive(Debug, Clone, Copy)]
struct ShardSpec {
    shard_id: usize,
    shards: usize,
}

impl FromStr for ShardSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, total) = s
            .split_once('/')
            .ok_or_else(|| format!("expected i/m, found '{s}'"))?;
        let shard_id = id
            .trim()
            .parse()
            .map_err(|_| format!("invalid shard id '{id}'"))?;
        let shards = total
            .trim()
            .parse()
            .map_err(|_| format!("invalid shard count '{total}'"))?;
        Ok(Self { shard_id, shards })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Enumerate {
            vocabulary,
            count,
            start,
            checkpoint,
            shard,
        } => run_enumerate(vocabulary, count, start, checkpoint, shard)?,
        Commands::Count { vocabulary } => run_count(vocabulary)?,
        Commands::Locate {
            vocabulary,
            position,
            rank,
        } => run_locate(vocabulary, position, rank)?,
        Commands::Shards { vocabulary, shards } => run_shards(vocabulary, shards)?,
    }

    Ok(())
}

fn load_vocabulary(path: &Path) -> Result<Vocabulary> {
    Vocabulary::from_path(path)
        .with_context(|| format!("failed to load word list from {}", path.display()))
}

fn run_enumerate(
    args: VocabularyArgs,
    count: u64,
    start: Option<IndexTuple>,
    checkpoint_path: Option<PathBuf>,
    shard: Option<ShardSpec>,
) -> Result<()> {
    let vocabulary = load_vocabulary(&args.wordlist)?;
    let resume_from = match &checkpoint_path {
        Some(path) if start.is_none() && path.exists() => Some(
            Checkpoint::load(path)
                .with_context(|| format!("failed to load checkpoint {}", path.display()))?,
        ),
        _ => None,
    };

    let (mut cursor, mut emitted) = match (resume_from, start, shard) {
        (Some(saved), _, spec) => {
            if spec.is_some() {
                warn!("checkpoint present; ignoring --shard");
            }
            if let Some(requested) = args.phrase_length.filter(|&k| k != saved.phrase_length) {
                warn!(
                    requested,
                    saved = saved.phrase_length,
                    "checkpoint present; ignoring --phrase-length"
                );
            }
            info!(position = %saved.position, emitted = saved.emitted, "resuming from checkpoint");
            let cursor = saved
                .resume(vocabulary)
                .context("checkpoint does not fit this word list")?;
            if cursor.is_exhausted() {
                println!("Reached the end of combinations.");
                return Ok(());
            }
            (cursor, saved.emitted)
        }
        (None, Some(start), _) => {
            let config = CursorConfig::bip39()
                .with_phrase_length(args.phrase_length())
                .with_start(start);
            (Cursor::new(vocabulary, config).context("invalid start tuple")?, 0)
        }
        (None, None, Some(spec)) => {
            let shard = partition::shard(
                vocabulary.len(),
                args.phrase_length(),
                spec.shards,
                spec.shard_id,
            )
            .context("invalid shard")?;
            info!(shard = shard.shard_id, len = %shard.len(), start = %shard.start, "walking shard");
            (shard.cursor(vocabulary).context("invalid shard")?, 0)
        }
        (None, None, None) => {
            let config = CursorConfig::bip39().with_phrase_length(args.phrase_length());
            (Cursor::new(vocabulary, config).context("invalid cursor configuration")?, 0)
        }
    };

    for _ in 0..count {
        let step = cursor.next_phrase();
        emitted += 1;
        println!("Mnemonic #{}: {}", emitted, step.phrase);
        if !step.has_more {
            println!("Reached the end of combinations.");
            break;
        }
    }

    if let Some(path) = checkpoint_path {
        let checkpoint = Checkpoint::capture(&cursor, emitted);
        checkpoint
            .save(&path)
            .with_context(|| format!("failed to save checkpoint {}", path.display()))?;
        info!(position = %checkpoint.position, emitted, "checkpoint saved");
    }

    Ok(())
}

fn run_count(args: VocabularyArgs) -> Result<()> {
    let vocabulary = load_vocabulary(&args.wordlist)?;
    let k = args.phrase_length();
    let total = combination_count(vocabulary.len(), k)?;
    println!("C({}, {}) = {}", vocabulary.len(), k, total);
    Ok(())
}

fn run_locate(
    args: VocabularyArgs,
    position: Option<IndexTuple>,
    requested_rank: Option<u128>,
) -> Result<()> {
    let vocabulary = load_vocabulary(&args.wordlist)?;
    let n = vocabulary.len();

    let (tuple, tuple_rank) = match (position, requested_rank) {
        (Some(tuple), _) => {
            check_position_length(&tuple, args.phrase_length)?;
            let tuple_rank = rank(&tuple, n).context("cannot rank tuple")?;
            (tuple, tuple_rank)
        }
        (None, Some(r)) => (
            unrank(r, n, args.phrase_length()).context("cannot unrank")?,
            r,
        ),
        (None, None) => anyhow::bail!("either --position or --rank is required"),
    };

    let phrase = vocabulary
        .phrase(tuple.as_slice())
        .ok_or_else(|| anyhow::anyhow!("tuple {} does not fit the word list", tuple))?;
    println!("rank={}\tposition={}\tphrase={}", tuple_rank, tuple, phrase);
    Ok(())
}

/// A tuple's length is its phrase length; an explicit `--phrase-length` must agree.
fn check_position_length(tuple: &IndexTuple, phrase_length: Option<usize>) -> Result<()> {
    match phrase_length {
        Some(k) if k != tuple.len() => anyhow::bail!(
            "--position has {} indices but --phrase-length is {}",
            tuple.len(),
            k
        ),
        _ => Ok(()),
    }
}

fn run_shards(args: VocabularyArgs, count: usize) -> Result<()> {
    let vocabulary = load_vocabulary(&args.wordlist)?;
    let shards = partition::shards(vocabulary.len(), args.phrase_length(), count)
        .context("failed to partition combination space")?;

    for shard in shards {
        println!(
            "shard {}\tranks=[{}, {})\tlen={}\tstart={}\tend={}",
            shard.shard_id,
            shard.ranks.start,
            shard.ranks.end,
            shard.len(),
            shard.start,
            shard.end
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_length_must_match_explicit_phrase_length() {
        let tuple: IndexTuple = "0,1,2".parse().unwrap();
        assert!(check_position_length(&tuple, None).is_ok());
        assert!(check_position_length(&tuple, Some(3)).is_ok());
        assert!(check_position_length(&tuple, Some(12)).is_err());
    }

    #[test]
    fn test_phrase_length_defaults_to_twelve() {
        let cli = Cli::try_parse_from(["mnemonic-cursor", "count"]).unwrap();
        let Commands::Count { vocabulary } = cli.command else {
            panic!("expected count");
        };
        assert_eq!(vocabulary.phrase_length, None);
        assert_eq!(vocabulary.phrase_length(), DEFAULT_PHRASE_LENGTH);

        let cli = Cli::try_parse_from([
            "mnemonic-cursor",
            "locate",
            "--position",
            "0,1,2",
            "--phrase-length",
            "3",
        ])
        .unwrap();
        let Commands::Locate { vocabulary, position, .. } = cli.command else {
            panic!("expected locate");
        };
        assert_eq!(vocabulary.phrase_length, Some(3));
        assert!(check_position_length(&position.unwrap(), vocabulary.phrase_length).is_ok());
    }
}
