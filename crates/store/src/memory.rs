use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;

use stockbook_core::{AggregateRoot, ExpectedVersion, LedgerError, LedgerResult, ProductId};
use stockbook_ledger::{LedgerStore, Movement, MovementFilter, StockRecord};

#[derive(Debug, Default)]
struct LedgerState {
    records: HashMap<ProductId, StockRecord>,
    /// Append-only; never truncated or rewritten.
    movements: Vec<Movement>,
}

impl LedgerState {
    fn stored_version(&self, product_id: ProductId) -> u64 {
        self.records
            .get(&product_id)
            .map(|record| record.version())
            .unwrap_or(0)
    }
}

/// In-memory ledger store.
///
/// Records and history live under one lock, so [`LedgerStore::commit`] is a
/// genuinely atomic save-plus-append: concurrent callers either see the state
/// before a commit or after it, never in between. Intended for tests/dev; not
/// optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryLedgerStore {
    inner: RwLock<LedgerState>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStore for InMemoryLedgerStore {
    fn load_record(&self, product_id: ProductId) -> Option<StockRecord> {
        let state = self.inner.read().ok()?;
        state.records.get(&product_id).cloned()
    }

    fn save_record(&self, record: &StockRecord, expected: ExpectedVersion) -> LedgerResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::conflict("lock poisoned"))?;

        expected.check(state.stored_version(record.product_id()))?;
        state.records.insert(record.product_id(), record.clone());
        Ok(())
    }

    fn append_movement(&self, movement: &Movement) -> LedgerResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::conflict("lock poisoned"))?;
        state.movements.push(movement.clone());
        Ok(())
    }

    fn query_movements(&self, filter: &MovementFilter) -> Vec<Movement> {
        let state = match self.inner.read() {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        state
            .movements
            .iter()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect()
    }

    fn list_records(&self) -> Vec<StockRecord> {
        let state = match self.inner.read() {
            Ok(s) => s,
            Err(_) => return vec![],
        };
        state.records.values().cloned().collect()
    }

    fn commit(
        &self,
        record: &StockRecord,
        expected: ExpectedVersion,
        movement: &Movement,
    ) -> LedgerResult<()> {
        let mut state = self
            .inner
            .write()
            .map_err(|_| LedgerError::conflict("lock poisoned"))?;

        expected.check(state.stored_version(record.product_id()))?;
        state.records.insert(record.product_id(), record.clone());
        state.movements.push(movement.clone());

        debug!(
            product_id = %record.product_id(),
            movement_type = %movement.movement_type,
            quantity = movement.quantity,
            new_stock = movement.new_stock,
            "committed stock movement"
        );
        Ok(())
    }
}
