//! Demo dataset: a small catalog with seeded stock, for dev shells and tests.

use chrono::Utc;
use serde_json::json;

use stockbook_catalog::{NewProduct, Product};
use stockbook_core::{LedgerResult, ProductId};
use stockbook_identity::Actor;
use stockbook_ledger::{LedgerStore, MovementKind, MovementRequest, StockLedger};

fn demo_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            name: "Caneta Esferográfica Azul".to_string(),
            description: "Caneta 1.0mm, caixa com 50".to_string(),
            category: "Papelaria".to_string(),
            sku: "PAP-001".to_string(),
            barcode: Some("7891234567890".to_string()),
            price: 250,
            image_url: None,
            min_stock: 20,
        },
        NewProduct {
            name: "Caderno Universitário 200fl".to_string(),
            description: "Capa dura, 10 matérias".to_string(),
            category: "Papelaria".to_string(),
            sku: "PAP-014".to_string(),
            barcode: Some("7899876543210".to_string()),
            price: 1890,
            image_url: None,
            min_stock: 10,
        },
        NewProduct {
            name: "Mouse Óptico USB".to_string(),
            description: "1200dpi, 3 botões".to_string(),
            category: "Informática".to_string(),
            sku: "INF-031".to_string(),
            barcode: None,
            price: 3500,
            image_url: None,
            min_stock: 5,
        },
    ]
}

/// Seed the ledger with the demo catalog and an opening receipt per product.
///
/// Returns the created products and the demo actor the movements are
/// attributed to. Initial stock arrives as ordinary `In` movements so the
/// history starts populated.
pub fn seed_demo<S: LedgerStore>(ledger: &StockLedger<S>) -> LedgerResult<(Vec<Product>, Actor)> {
    // Same shape the identity provider hands back for the demo user.
    let metadata = json!({ "name": "Demo User", "role": "admin" });
    let actor = Actor::from_metadata("1", "demo@example.com", &metadata)?;

    let now = Utc::now();
    let mut products = Vec::new();

    for (details, opening) in demo_products().into_iter().zip([120u32, 8, 0]) {
        let product = Product::create(ProductId::new(), details, now)?;
        ledger.register_product(&product)?;

        if opening > 0 {
            ledger.apply_movement(MovementRequest {
                product_id: product.id,
                kind: MovementKind::In { quantity: opening },
                reason: "Estoque inicial".to_string(),
                actor_id: actor.id.clone(),
                occurred_at: now,
            })?;
        }
        products.push(product);
    }

    Ok((products, actor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryLedgerStore;
    use stockbook_ledger::{MovementFilter, StockStatus};

    #[test]
    fn demo_seed_covers_all_three_statuses() {
        let ledger = StockLedger::new(InMemoryLedgerStore::new());
        let (products, _actor) = seed_demo(&ledger).unwrap();
        assert_eq!(products.len(), 3);

        let statuses: Vec<StockStatus> = products
            .iter()
            .map(|p| ledger.record(p.id).unwrap().status())
            .collect();
        assert_eq!(
            statuses,
            vec![
                StockStatus::InStock,
                StockStatus::LowStock,
                StockStatus::OutOfStock
            ]
        );

        // One opening receipt per stocked product.
        let history = ledger.list_movements(
            &MovementFilter::default(),
            stockbook_ledger::MovementOrder::OldestFirst,
        );
        assert_eq!(history.len(), 2);
    }
}
