use serde::{Deserialize, Serialize};

use stockbook_core::{
    Aggregate, AggregateRoot, LedgerError, LedgerResult, MovementId, ProductId,
};

use crate::movement::{Movement, MovementRequest};
use crate::status::{stock_status, StockStatus};

/// Per-product stock state.
///
/// Mutated exclusively through movements (decide with [`Aggregate::handle`],
/// evolve with [`Aggregate::apply`]) — never by direct field assignment.
/// Status is derived, not stored. `product_name` and `category` are catalog
/// snapshots carried so movements and alerts can be built without a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockRecord {
    product_id: ProductId,
    product_name: String,
    category: String,
    current_stock: u32,
    min_stock: u32,
    version: u64,
}

impl StockRecord {
    /// Fresh record at stock zero (product just entered the catalog).
    ///
    /// Creation is the first version; every applied movement adds one.
    pub fn new(
        product_id: ProductId,
        product_name: impl Into<String>,
        category: impl Into<String>,
        min_stock: u32,
    ) -> Self {
        Self {
            product_id,
            product_name: product_name.into(),
            category: category.into(),
            current_stock: 0,
            min_stock,
            version: 1,
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn current_stock(&self) -> u32 {
        self.current_stock
    }

    pub fn min_stock(&self) -> u32 {
        self.min_stock
    }

    /// Derived status; always a pure function of `(current_stock, min_stock)`.
    pub fn status(&self) -> StockStatus {
        stock_status(self.current_stock, self.min_stock)
    }

    /// Refresh catalog snapshots after a descriptive edit.
    ///
    /// Not a movement: thresholds and names are not stock changes, so nothing
    /// is appended to history, but the version still advances for optimistic
    /// concurrency.
    pub fn sync_catalog(
        &mut self,
        product_name: impl Into<String>,
        category: impl Into<String>,
        min_stock: u32,
    ) {
        self.product_name = product_name.into();
        self.category = category.into();
        self.min_stock = min_stock;
        self.version += 1;
    }

    fn decide(&self, request: &MovementRequest) -> LedgerResult<Movement> {
        if request.product_id != self.product_id {
            return Err(LedgerError::ProductNotFound(request.product_id));
        }

        let magnitude = request.kind.magnitude()?;
        let new_stock = if request.kind.is_increase() {
            self.current_stock
                .checked_add(magnitude)
                .ok_or_else(|| LedgerError::invalid_quantity("stock overflow"))?
        } else {
            self.current_stock
                .checked_sub(magnitude)
                .ok_or(LedgerError::InsufficientStock {
                    available: self.current_stock,
                    requested: magnitude,
                })?
        };

        Ok(Movement {
            id: MovementId::new(),
            product_id: self.product_id,
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            movement_type: request.kind.movement_type(),
            quantity: magnitude,
            previous_stock: self.current_stock,
            new_stock,
            reason: request.reason.clone(),
            actor_id: request.actor_id.clone(),
            created_at: request.occurred_at,
        })
    }
}

impl AggregateRoot for StockRecord {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product_id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

impl Aggregate for StockRecord {
    type Command = MovementRequest;
    type Event = Movement;
    type Error = LedgerError;

    fn handle(&self, command: &Self::Command) -> Result<Self::Event, Self::Error> {
        self.decide(command)
    }

    fn apply(&mut self, event: &Self::Event) {
        self.current_stock = event.new_stock;
        self.version += 1;
    }
}
