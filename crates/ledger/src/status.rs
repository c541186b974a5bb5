use serde::{Deserialize, Serialize};

/// Classification of a product's current quantity relative to its threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
}

impl core::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StockStatus::InStock => f.write_str("in_stock"),
            StockStatus::LowStock => f.write_str("low_stock"),
            StockStatus::OutOfStock => f.write_str("out_of_stock"),
        }
    }
}

/// Derive stock status from quantity vs. threshold.
///
/// Pure and total: `OutOfStock` iff `current_stock == 0`, `LowStock` iff
/// `0 < current_stock < min_stock`, otherwise `InStock`. Status is never
/// stored; it is always recomputed from these two numbers so it cannot
/// desync.
pub fn stock_status(current_stock: u32, min_stock: u32) -> StockStatus {
    if current_stock == 0 {
        StockStatus::OutOfStock
    } else if current_stock < min_stock {
        StockStatus::LowStock
    } else {
        StockStatus::InStock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_out_of_stock() {
        assert_eq!(stock_status(0, 0), StockStatus::OutOfStock);
        assert_eq!(stock_status(0, 10), StockStatus::OutOfStock);
    }

    #[test]
    fn below_threshold_is_low() {
        assert_eq!(stock_status(3, 10), StockStatus::LowStock);
        assert_eq!(stock_status(9, 10), StockStatus::LowStock);
    }

    #[test]
    fn at_or_above_threshold_is_in_stock() {
        assert_eq!(stock_status(10, 10), StockStatus::InStock);
        assert_eq!(stock_status(11, 10), StockStatus::InStock);
        // A zero threshold means any stock at all counts as in stock.
        assert_eq!(stock_status(1, 0), StockStatus::InStock);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: out_of_stock ⟺ current_stock == 0.
            #[test]
            fn out_of_stock_iff_zero(current in 0u32.., min in 0u32..) {
                let status = stock_status(current, min);
                prop_assert_eq!(status == StockStatus::OutOfStock, current == 0);
            }

            /// Property: low_stock ⟺ 0 < current < min.
            #[test]
            fn low_stock_iff_between(current in 0u32.., min in 0u32..) {
                let status = stock_status(current, min);
                prop_assert_eq!(
                    status == StockStatus::LowStock,
                    current > 0 && current < min
                );
            }
        }
    }
}
