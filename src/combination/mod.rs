//! Strictly increasing index tuples and their lexicographic enumeration.

mod rank;
mod tuple;
mod walker;

pub use rank::{binomial, combination_count, rank, unrank};
pub use tuple::IndexTuple;
pub use walker::Combinations;
