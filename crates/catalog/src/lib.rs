//! Product catalog (descriptive metadata + reorder thresholds).
//!
//! Pure domain logic only: no IO, no persistence concerns. Stock levels are
//! owned by the ledger crate; the catalog owns the descriptive fields and the
//! `min_stock` threshold the ledger derives status from.

pub mod product;

pub use product::{NewProduct, Product, ProductEdit};
