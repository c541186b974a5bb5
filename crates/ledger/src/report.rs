//! Pure reporting reductions over records and movement history.
//!
//! Everything here is a fold over borrowed data: no store access, no clock
//! access (callers supply "now"), tolerant of empty input.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use stockbook_catalog::Product;
use stockbook_core::ProductId;

use crate::movement::{Movement, MovementType};
use crate::record::StockRecord;
use crate::status::StockStatus;

/// Reporting window, resolved against a caller-supplied "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Today,
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    /// Inclusive lower bound of the window; `None` means unbounded.
    pub fn start(self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Today => Some(now.date_naive().and_time(NaiveTime::MIN).and_utc()),
            TimeRange::Week => Some(now - Duration::days(7)),
            TimeRange::Month => Some(now - Duration::days(30)),
            TimeRange::Year => Some(now - Duration::days(365)),
            TimeRange::All => None,
        }
    }

    pub fn contains(self, now: DateTime<Utc>, at: DateTime<Utc>) -> bool {
        match self.start(now) {
            Some(start) => at >= start,
            None => true,
        }
    }
}

/// Inbound/outbound quantity pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flow {
    pub inbound: u64,
    pub outbound: u64,
}

/// Totals over a movement sequence.
///
/// `total_in`/`total_out` sum the quantities of `in`-type and `out`-type
/// movements respectively; adjustments are corrections, not trade flow, and
/// are excluded from all flow totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementTotals {
    pub total_in: u64,
    pub total_out: u64,
    pub by_category: HashMap<String, Flow>,
    pub by_product: HashMap<ProductId, Flow>,
}

/// Reduce a movement sequence to totals, keyed by category and product.
///
/// Empty input yields zeroed totals, not an error.
pub fn compute_aggregates(
    movements: &[Movement],
    range: TimeRange,
    now: DateTime<Utc>,
) -> MovementTotals {
    let mut totals = MovementTotals::default();

    for movement in movements {
        if !range.contains(now, movement.created_at) {
            continue;
        }
        let quantity = u64::from(movement.quantity);
        match movement.movement_type {
            MovementType::In => {
                totals.total_in += quantity;
                totals
                    .by_category
                    .entry(movement.category.clone())
                    .or_default()
                    .inbound += quantity;
                totals
                    .by_product
                    .entry(movement.product_id)
                    .or_default()
                    .inbound += quantity;
            }
            MovementType::Out => {
                totals.total_out += quantity;
                totals
                    .by_category
                    .entry(movement.category.clone())
                    .or_default()
                    .outbound += quantity;
                totals
                    .by_product
                    .entry(movement.product_id)
                    .or_default()
                    .outbound += quantity;
            }
            MovementType::Adjustment => {}
        }
    }

    totals
}

/// One day of inflow/outflow (chart series point).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyFlow {
    pub date: NaiveDate,
    pub inbound: u64,
    pub outbound: u64,
}

/// Per-day inflow/outflow series over the window, ascending by date.
pub fn daily_flow(movements: &[Movement], range: TimeRange, now: DateTime<Utc>) -> Vec<DailyFlow> {
    let mut days: BTreeMap<NaiveDate, Flow> = BTreeMap::new();

    for movement in movements {
        if !range.contains(now, movement.created_at) {
            continue;
        }
        let flow = days.entry(movement.created_at.date_naive()).or_default();
        match movement.movement_type {
            MovementType::In => flow.inbound += u64::from(movement.quantity),
            MovementType::Out => flow.outbound += u64::from(movement.quantity),
            MovementType::Adjustment => {}
        }
    }

    days.into_iter()
        .map(|(date, flow)| DailyFlow {
            date,
            inbound: flow.inbound,
            outbound: flow.outbound,
        })
        .collect()
}

/// Product ranked by moved quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_id: ProductId,
    pub name: String,
    pub moved: u64,
    /// Share of all moved quantity in the window, in percent; 0 when the
    /// window is empty.
    pub percentage: f64,
}

/// Rank products by total moved quantity (all movement types count as
/// activity here, adjustments included).
pub fn top_products(
    movements: &[Movement],
    range: TimeRange,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<TopProduct> {
    let mut moved: HashMap<ProductId, (String, u64)> = HashMap::new();
    for movement in movements {
        if !range.contains(now, movement.created_at) {
            continue;
        }
        let entry = moved
            .entry(movement.product_id)
            .or_insert_with(|| (movement.product_name.clone(), 0));
        entry.1 += u64::from(movement.quantity);
    }

    let total: u64 = moved.values().map(|(_, q)| q).sum();
    let mut ranked: Vec<TopProduct> = moved
        .into_iter()
        .map(|(product_id, (name, quantity))| TopProduct {
            product_id,
            name,
            moved: quantity,
            percentage: if total == 0 {
                0.0
            } else {
                quantity as f64 * 100.0 / total as f64
            },
        })
        .collect();

    ranked.sort_by(|a, b| b.moved.cmp(&a.moved).then_with(|| a.name.cmp(&b.name)));
    ranked.truncate(limit);
    ranked
}

/// Alert severity for a product below its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Critical,
    Out,
}

/// Reorder alert derived from a stock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAlert {
    pub product_id: ProductId,
    pub product_name: String,
    pub current_stock: u32,
    pub min_stock: u32,
    pub severity: AlertSeverity,
}

/// Alerts for every record below its threshold.
///
/// Severity: `Out` at zero, `Critical` at or below half the threshold, `Low`
/// below the threshold. Records at or above threshold produce no alert.
pub fn stock_alerts(records: &[StockRecord]) -> Vec<StockAlert> {
    records
        .iter()
        .filter(|record| record.status() != StockStatus::InStock)
        .map(|record| {
            let severity = if record.current_stock() == 0 {
                AlertSeverity::Out
            } else if u64::from(record.current_stock()) * 2 <= u64::from(record.min_stock()) {
                AlertSeverity::Critical
            } else {
                AlertSeverity::Low
            };
            StockAlert {
                product_id: record.product_id(),
                product_name: record.product_name().to_string(),
                current_stock: record.current_stock(),
                min_stock: record.min_stock(),
                severity,
            }
        })
        .collect()
}

/// Headline dashboard numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_products: usize,
    pub low_stock_items: usize,
    pub out_of_stock_items: usize,
    pub total_movements: usize,
    /// Sum of `current_stock * price` in smallest currency unit.
    pub stock_value: u64,
}

/// Summarize records and history for the dashboard.
///
/// Products with no matching record contribute nothing to the valuation.
pub fn dashboard_stats(
    records: &[StockRecord],
    products: &[Product],
    movements: &[Movement],
) -> DashboardStats {
    let prices: HashMap<ProductId, u64> = products.iter().map(|p| (p.id, p.price)).collect();

    let mut stats = DashboardStats {
        total_products: records.len(),
        total_movements: movements.len(),
        ..DashboardStats::default()
    };

    for record in records {
        match record.status() {
            StockStatus::LowStock => stats.low_stock_items += 1,
            StockStatus::OutOfStock => stats.out_of_stock_items += 1,
            StockStatus::InStock => {}
        }
        if let Some(price) = prices.get(&record.product_id()) {
            stats.stock_value += u64::from(record.current_stock()) * price;
        }
    }

    stats
}
