//! An element type that records how many instances were constructed, cloned
//! and dropped.
//!
//! Counters are thread-local. The default test harness runs every test on its
//! own thread, so tests observe only their own instances; call [`reset`] at the
//! start of a test to be independent of the harness as well.

use std::cell::Cell;

thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static CLONED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
}

fn bump(counter: &'static std::thread::LocalKey<Cell<usize>>) {
    counter.with(|c| c.set(c.get() + 1));
}

/// Snapshot of the thread-local instance counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackedStats {
    /// Instances constructed, including clones and default values.
    pub created: usize,
    /// Instances constructed by `Clone`.
    pub cloned: usize,
    /// Instances dropped.
    pub dropped: usize,
}

impl TrackedStats {
    /// Number of instances currently alive on this thread.
    pub fn live(&self) -> usize {
        self.created - self.dropped
    }
}

/// Returns the current counters for this thread.
pub fn stats() -> TrackedStats {
    TrackedStats {
        created: CREATED.with(Cell::get),
        cloned: CLONED.with(Cell::get),
        dropped: DROPPED.with(Cell::get),
    }
}

/// Resets this thread's counters to zero.
///
/// Instances that are alive at the time of the reset will still be counted
/// when dropped, so reset only when no `Tracked` values exist.
pub fn reset() {
    CREATED.with(|c| c.set(0));
    CLONED.with(|c| c.set(0));
    DROPPED.with(|c| c.set(0));
}

/// An `i64` wrapper whose lifecycle is counted.
///
/// `Tracked::default()` holds `-1`, which makes default-constructed slots easy
/// to tell apart from values written by a test.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tracked {
    value: i64,
}

impl Tracked {
    pub const DEFAULT_VALUE: i64 = -1;

    pub fn new(value: i64) -> Tracked {
        bump(&CREATED);
        Tracked { value }
    }

    pub fn value(&self) -> i64 {
        self.value
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Tracked::new(Self::DEFAULT_VALUE)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        bump(&CLONED);
        Tracked::new(self.value)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        bump(&DROPPED);
    }
}
