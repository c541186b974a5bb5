//! Validated actor boundary over an external identity/session provider.
//!
//! The provider hands back loosely-typed user metadata; this crate turns it
//! into an explicit, validated [`Actor`] at the edge so the ledger's pure
//! logic never sees raw provider blobs.

pub mod actor;
pub mod session;

pub use actor::{Actor, Role};
pub use session::{FixedSession, SessionProvider};
