use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_catalog::Product;
use stockbook_core::{Aggregate, AggregateRoot, ExpectedVersion, LedgerError, LedgerResult, ProductId};

use crate::movement::{Movement, MovementRequest, MovementType};
use crate::record::StockRecord;

/// Read-side filter over the movement history.
///
/// All criteria are optional and combined with AND; the date range is
/// half-open on neither side (`from ≤ created_at ≤ until`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementFilter {
    pub product_id: Option<ProductId>,
    pub movement_type: Option<MovementType>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl MovementFilter {
    pub fn matches(&self, movement: &Movement) -> bool {
        if let Some(product_id) = self.product_id {
            if movement.product_id != product_id {
                return false;
            }
        }
        if let Some(movement_type) = self.movement_type {
            if movement.movement_type != movement_type {
                return false;
            }
        }
        if let Some(from) = self.from {
            if movement.created_at < from {
                return false;
            }
        }
        if let Some(until) = self.until {
            if movement.created_at > until {
                return false;
            }
        }
        true
    }
}

/// Ordering of a movement listing. Both directions are stable views over the
/// same insertion-ordered history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MovementOrder {
    OldestFirst,
    NewestFirst,
}

/// Persistence port for the ledger (repository pattern).
///
/// The ledger owns the shape of what is persisted and injects this port;
/// implementations own the storage. History is append-only: no method ever
/// mutates or deletes a stored movement.
pub trait LedgerStore: Send + Sync {
    /// Current stock record for a product, if registered.
    fn load_record(&self, product_id: ProductId) -> Option<StockRecord>;

    /// Persist a record, rejecting with [`LedgerError::Conflict`] when the
    /// stored version differs from `expected` (absent records count as
    /// version 0).
    fn save_record(&self, record: &StockRecord, expected: ExpectedVersion) -> LedgerResult<()>;

    /// Append one movement to the history.
    fn append_movement(&self, movement: &Movement) -> LedgerResult<()>;

    /// Movements matching `filter`, in insertion order.
    fn query_movements(&self, filter: &MovementFilter) -> Vec<Movement>;

    /// All stock records (reporting reads).
    fn list_records(&self) -> Vec<StockRecord>;

    /// Persist an updated record and its movement as one logical transaction.
    ///
    /// The default composes `save_record` + `append_movement`, which is only
    /// atomic under the single-writer model; stores that can be raced must
    /// override this with a genuinely atomic commit.
    fn commit(
        &self,
        record: &StockRecord,
        expected: ExpectedVersion,
        movement: &Movement,
    ) -> LedgerResult<()> {
        self.save_record(record, expected)?;
        self.append_movement(movement)
    }
}

/// The stock ledger service: check-then-commit stock mutations over an
/// injected store.
///
/// Holds no state of its own beyond the port, so an in-memory store serves
/// tests and a database-backed one serves production.
#[derive(Debug)]
pub struct StockLedger<S: LedgerStore> {
    store: S,
}

impl<S: LedgerStore> StockLedger<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Create the stock record for a product entering the catalog.
    ///
    /// Stock starts at zero; an initial receipt is an ordinary `In` movement
    /// recorded afterwards so it shows up in history like any other.
    pub fn register_product(&self, product: &Product) -> LedgerResult<StockRecord> {
        if self.store.load_record(product.id).is_some() {
            return Err(LedgerError::conflict(format!(
                "product already registered: {}",
                product.id
            )));
        }

        let record = StockRecord::new(
            product.id,
            product.name.clone(),
            product.category.clone(),
            product.min_stock,
        );
        self.store.save_record(&record, ExpectedVersion::Exact(0))?;
        Ok(record)
    }

    /// Record one stock movement: validate, decide, evolve, commit.
    ///
    /// A single atomic check-then-update per product: on any rejection no
    /// movement is created and stock is untouched; on success the movement and
    /// the updated record are committed together and both are returned. A
    /// racing writer that invalidates the version read here gets a
    /// [`LedgerError::Conflict`] instead of breaking the non-negative
    /// invariant.
    pub fn apply_movement(
        &self,
        request: MovementRequest,
    ) -> LedgerResult<(Movement, StockRecord)> {
        let mut record = self
            .store
            .load_record(request.product_id)
            .ok_or(LedgerError::ProductNotFound(request.product_id))?;

        let expected = ExpectedVersion::Exact(record.version());
        let movement = record.handle(&request)?;
        record.apply(&movement);

        self.store.commit(&record, expected, &movement)?;
        Ok((movement, record))
    }

    /// Current record for a product.
    pub fn record(&self, product_id: ProductId) -> LedgerResult<StockRecord> {
        self.store
            .load_record(product_id)
            .ok_or(LedgerError::ProductNotFound(product_id))
    }

    /// All records (reporting reads).
    pub fn records(&self) -> Vec<StockRecord> {
        self.store.list_records()
    }

    /// Refresh a record's catalog snapshots after a descriptive edit.
    ///
    /// Threshold changes alter derived status but are not movements; history
    /// stays untouched.
    pub fn sync_product(&self, product: &Product) -> LedgerResult<StockRecord> {
        let mut record = self
            .store
            .load_record(product.id)
            .ok_or(LedgerError::ProductNotFound(product.id))?;

        let expected = ExpectedVersion::Exact(record.version());
        record.sync_catalog(product.name.clone(), product.category.clone(), product.min_stock);
        self.store.save_record(&record, expected)?;
        Ok(record)
    }

    /// Movement history, filtered and ordered.
    ///
    /// Restartable: no cursor state, so repeated calls without intervening
    /// writes yield identical sequences.
    pub fn list_movements(&self, filter: &MovementFilter, order: MovementOrder) -> Vec<Movement> {
        let mut movements = self.store.query_movements(filter);
        if order == MovementOrder::NewestFirst {
            movements.reverse();
        }
        movements
    }
}
