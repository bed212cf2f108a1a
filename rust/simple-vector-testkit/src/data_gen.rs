//! Seeded data generation utilities for testing.
//!
//! Every generator takes an explicit seed so that a failing randomized test
//! can be replayed exactly.

/// Generates `len` random values in `range`.
pub fn random_i64s(seed: u64, len: usize, range: std::ops::Range<i64>) -> Vec<i64> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len).map(|_| rng.i64(range.clone())).collect()
}

/// Generates `len` random lowercase ASCII strings of up to `max_len` characters.
pub fn random_strings(seed: u64, len: usize, max_len: usize) -> Vec<String> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..len)
        .map(|_| {
            let n = rng.usize(0..=max_len);
            (0..n).map(|_| rng.lowercase()).collect()
        })
        .collect()
}

/// A single mutation in a randomized operation script.
///
/// Positions are raw random numbers; the consumer maps them into the valid
/// range of the container at the time the operation is applied (for example
/// `at % (len + 1)` for an insert).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    PushBack(i64),
    Insert { at: usize, value: i64 },
    PopBack,
    Erase { at: usize },
    Resize(usize),
    Reserve(usize),
    Clear,
}

/// Generates a script of `count` operations, biased towards appends and
/// inserts so that containers grow over the course of the script.
///
/// `max_len` bounds the sizes passed to `Resize` and `Reserve`.
pub fn random_ops(seed: u64, count: usize, max_len: usize) -> Vec<Op> {
    let mut rng = fastrand::Rng::with_seed(seed);
    (0..count)
        .map(|_| match rng.u32(0..100) {
            0..40 => Op::PushBack(rng.i64(-1000..1000)),
            40..60 => Op::Insert {
                at: rng.usize(..),
                value: rng.i64(-1000..1000),
            },
            60..70 => Op::PopBack,
            70..85 => Op::Erase { at: rng.usize(..) },
            85..92 => Op::Resize(rng.usize(0..=max_len)),
            92..98 => Op::Reserve(rng.usize(0..=max_len)),
            _ => Op::Clear,
        })
        .collect()
}
