use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_core::{ActorId, LedgerError, LedgerResult, MovementId, ProductId};

/// Stored movement tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementType {
    In,
    Out,
    Adjustment,
}

impl core::str::FromStr for MovementType {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(MovementType::In),
            "out" => Ok(MovementType::Out),
            "adjustment" => Ok(MovementType::Adjustment),
            other => Err(LedgerError::invalid_movement_type(other)),
        }
    }
}

impl core::fmt::Display for MovementType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            MovementType::In => f.write_str("in"),
            MovementType::Out => f.write_str("out"),
            MovementType::Adjustment => f.write_str("adjustment"),
        }
    }
}

/// Requested movement with an explicit, tagged direction.
///
/// Adjustments carry a signed delta rather than letting callers infer
/// direction from the sign of a UI-entered number; the ambiguity is resolved
/// at this boundary, not inside the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MovementKind {
    In { quantity: u32 },
    Out { quantity: u32 },
    Adjustment { delta: i64 },
}

impl MovementKind {
    pub fn movement_type(&self) -> MovementType {
        match self {
            MovementKind::In { .. } => MovementType::In,
            MovementKind::Out { .. } => MovementType::Out,
            MovementKind::Adjustment { .. } => MovementType::Adjustment,
        }
    }

    /// Magnitude of the requested change.
    ///
    /// Rejects zero (a no-op movement) and adjustment deltas whose magnitude
    /// does not fit a stock quantity.
    pub fn magnitude(&self) -> LedgerResult<u32> {
        let magnitude = match self {
            MovementKind::In { quantity } | MovementKind::Out { quantity } => *quantity,
            MovementKind::Adjustment { delta } => u32::try_from(delta.unsigned_abs())
                .map_err(|_| LedgerError::invalid_quantity("adjustment magnitude out of range"))?,
        };
        if magnitude == 0 {
            return Err(LedgerError::invalid_quantity(
                "quantity must be a positive integer",
            ));
        }
        Ok(magnitude)
    }

    /// Whether the movement increases stock.
    pub fn is_increase(&self) -> bool {
        match self {
            MovementKind::In { .. } => true,
            MovementKind::Out { .. } => false,
            MovementKind::Adjustment { delta } => *delta > 0,
        }
    }
}

/// Command: record one stock movement against a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementRequest {
    pub product_id: ProductId,
    pub kind: MovementKind,
    pub reason: String,
    pub actor_id: ActorId,
    pub occurred_at: DateTime<Utc>,
}

/// Immutable ledger entry: one stock quantity change.
///
/// Once created a movement is never mutated or deleted; presentation layers
/// may filter, but history is never rewritten. `product_name` and `category`
/// are snapshots taken at recording time so reporting folds need no catalog
/// lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movement {
    pub id: MovementId,
    pub product_id: ProductId,
    pub product_name: String,
    pub category: String,
    pub movement_type: MovementType,
    /// Always positive; for adjustments the direction is recoverable from the
    /// stock snapshots below.
    pub quantity: u32,
    pub previous_stock: u32,
    pub new_stock: u32,
    pub reason: String,
    pub actor_id: ActorId,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_rejects_zero_quantity() {
        let err = MovementKind::In { quantity: 0 }.magnitude().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(_)));

        let err = MovementKind::Adjustment { delta: 0 }.magnitude().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(_)));
    }

    #[test]
    fn magnitude_of_negative_adjustment_is_absolute() {
        assert_eq!(MovementKind::Adjustment { delta: -7 }.magnitude().unwrap(), 7);
        assert!(!MovementKind::Adjustment { delta: -7 }.is_increase());
    }

    #[test]
    fn magnitude_rejects_oversized_adjustment() {
        let delta = i64::from(u32::MAX) + 1;
        let err = MovementKind::Adjustment { delta }.magnitude().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidQuantity(_)));
    }

    #[test]
    fn movement_type_parses_known_tags() {
        assert_eq!("in".parse::<MovementType>().unwrap(), MovementType::In);
        assert_eq!("out".parse::<MovementType>().unwrap(), MovementType::Out);
        assert_eq!(
            "adjustment".parse::<MovementType>().unwrap(),
            MovementType::Adjustment
        );
    }

    #[test]
    fn movement_type_rejects_unknown_tag() {
        let err = "transfer".parse::<MovementType>().unwrap_err();
        assert!(matches!(err, LedgerError::InvalidMovementType(_)));
    }
}
