//! Stock ledger: current stock levels, derived status, and an append-only
//! movement history under consistency invariants.
//!
//! Pure domain logic only: persistence is injected through the [`LedgerStore`]
//! port, and the ledger never logs or touches presentation concerns. A
//! rejected movement leaves state untouched; an accepted one commits the
//! movement and the updated record as a single logical transaction.

pub mod ledger;
pub mod movement;
pub mod record;
pub mod report;
pub mod status;

pub use ledger::{LedgerStore, MovementFilter, MovementOrder, StockLedger};
pub use movement::{Movement, MovementKind, MovementRequest, MovementType};
pub use record::StockRecord;
pub use report::{
    compute_aggregates, daily_flow, dashboard_stats, stock_alerts, top_products, AlertSeverity,
    DailyFlow, DashboardStats, Flow, MovementTotals, StockAlert, TimeRange, TopProduct,
};
pub use status::{stock_status, StockStatus};
