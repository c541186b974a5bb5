//! Aggregate traits and optimistic-version primitives.

use crate::error::{LedgerError, LedgerResult};

/// Aggregate root marker + minimal interface.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Increments by one per applied ledger entry; used for optimistic
    /// concurrency on commit.
    fn version(&self) -> u64;
}

/// Optimistic concurrency expectation for a commit.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ExpectedVersion {
    /// Skip version checking (rebuilds, migrations).
    Any,
    /// Require the stored state to be at an exact version.
    Exact(u64),
}

impl ExpectedVersion {
    pub fn matches(self, actual: u64) -> bool {
        match self {
            ExpectedVersion::Any => true,
            ExpectedVersion::Exact(v) => v == actual,
        }
    }

    pub fn check(self, actual: u64) -> LedgerResult<()> {
        if self.matches(actual) {
            Ok(())
        } else {
            Err(LedgerError::conflict(format!(
                "optimistic concurrency check failed (expected: {self:?}, actual: {actual})"
            )))
        }
    }
}

/// Aggregate execution semantics (pure, deterministic).
///
/// - **Decision logic**: `handle(&self, cmd)` returns the ledger entry.
/// - **State mutation**: `apply(&mut self, entry)` evolves state.
///
/// Every accepted command records exactly one entry, so `handle` returns a
/// single event rather than a batch. Aggregates must not perform IO; `handle`
/// only decides, `apply` only evolves.
pub trait Aggregate: AggregateRoot {
    type Command: Clone + core::fmt::Debug;
    type Event: Clone + core::fmt::Debug;
    type Error: core::fmt::Debug;

    /// Decide the entry to record given the current state and a command.
    ///
    /// Must not mutate state. State evolution is done through `apply`.
    fn handle(&self, command: &Self::Command) -> Result<Self::Event, Self::Error>;

    /// Evolve in-memory state from a single entry (version +1).
    fn apply(&mut self, event: &Self::Event);
}
