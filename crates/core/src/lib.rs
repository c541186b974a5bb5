//! `stockbook-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (ids, errors, aggregate
//! traits). No IO and no infrastructure concerns.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use entity::Entity;
pub use error::{LedgerError, LedgerResult};
pub use id::{ActorId, MovementId, ProductId};
