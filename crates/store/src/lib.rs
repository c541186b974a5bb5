//! Infrastructure implementations of the ledger's store port.
//!
//! The in-memory store backs tests, demos, and single-process use; a
//! database-backed implementation slots in behind the same [`LedgerStore`]
//! trait without touching domain code.
//!
//! [`LedgerStore`]: stockbook_ledger::LedgerStore

pub mod demo;
pub mod memory;

pub use demo::seed_demo;
pub use memory::InMemoryLedgerStore;
