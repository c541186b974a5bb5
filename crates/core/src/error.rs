//! Ledger error model.
//!
//! Deterministic, business-rule failures only. Every variant is recoverable by
//! the caller; nothing here is fatal to the process, and rejected operations
//! leave state unchanged.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the domain layer.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Domain-level error for ledger operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A movement quantity was zero (or an adjustment delta was zero).
    /// No-op movements would pollute history and are rejected.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// No stock record exists for the given product.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// An outbound movement (or negative adjustment) would drive stock
    /// below zero.
    #[error("insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: u32, requested: u32 },

    /// A movement type tag was not recognized at a boundary.
    #[error("invalid movement type: {0}")]
    InvalidMovementType(String),

    /// A value failed validation (e.g. blank field at a boundary).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A conflict occurred (stale version / duplicate registration).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl LedgerError {
    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn invalid_movement_type(msg: impl Into<String>) -> Self {
        Self::InvalidMovementType(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
