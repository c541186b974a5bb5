//! End-to-end ledger flows against the in-memory store.

use chrono::Utc;
use serde_json::json;

use stockbook_catalog::{NewProduct, Product, ProductEdit};
use stockbook_core::{ActorId, LedgerError, ProductId};
use stockbook_identity::{Actor, FixedSession, SessionProvider};
use stockbook_ledger::{
    compute_aggregates, stock_status, MovementFilter, MovementKind, MovementOrder,
    MovementRequest, MovementType, StockLedger, StockStatus, TimeRange,
};
use stockbook_store::InMemoryLedgerStore;

fn ledger() -> StockLedger<InMemoryLedgerStore> {
    stockbook_observability::init();
    StockLedger::new(InMemoryLedgerStore::new())
}

fn actor() -> Actor {
    let metadata = json!({ "name": "Demo User", "role": "admin" });
    Actor::from_metadata("1", "demo@example.com", &metadata).expect("demo actor")
}

fn product(name: &str, min_stock: u32) -> Product {
    Product::create(
        ProductId::new(),
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            category: "Papelaria".to_string(),
            sku: format!("SKU-{name}"),
            barcode: None,
            price: 250,
            image_url: None,
            min_stock,
        },
        Utc::now(),
    )
    .expect("valid product")
}

fn stocked(
    ledger: &StockLedger<InMemoryLedgerStore>,
    actor: &Actor,
    name: &str,
    opening: u32,
    min_stock: u32,
) -> Product {
    let product = product(name, min_stock);
    ledger.register_product(&product).expect("register");
    if opening > 0 {
        ledger
            .apply_movement(request(&product, actor, MovementKind::In { quantity: opening }))
            .expect("opening receipt");
    }
    product
}

fn request(product: &Product, actor: &Actor, kind: MovementKind) -> MovementRequest {
    MovementRequest {
        product_id: product.id,
        kind,
        reason: "Venda".to_string(),
        actor_id: actor.id.clone(),
        occurred_at: Utc::now(),
    }
}

#[test]
fn sale_reduces_stock_and_records_snapshot() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Caneta", 10, 5);

    let (movement, record) = ledger
        .apply_movement(request(&product, &actor, MovementKind::Out { quantity: 3 }))
        .unwrap();

    assert_eq!(movement.previous_stock, 10);
    assert_eq!(movement.new_stock, 7);
    assert_eq!(movement.reason, "Venda");
    assert_eq!(record.current_stock(), 7);
    assert_eq!(record.status(), StockStatus::InStock);

    // Exactly one sale in the per-product out-history.
    let sales = ledger.list_movements(
        &MovementFilter {
            product_id: Some(product.id),
            movement_type: Some(MovementType::Out),
            ..MovementFilter::default()
        },
        MovementOrder::OldestFirst,
    );
    assert_eq!(sales.len(), 1);
    assert_eq!(sales[0].id, movement.id);
}

#[test]
fn below_threshold_is_low_stock() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Caderno", 3, 10);

    assert_eq!(stock_status(3, 10), StockStatus::LowStock);
    assert_eq!(
        ledger.record(product.id).unwrap().status(),
        StockStatus::LowStock
    );
}

#[test]
fn draining_stock_exactly_goes_out_of_stock() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Mouse", 5, 5);

    let (_, record) = ledger
        .apply_movement(request(&product, &actor, MovementKind::Out { quantity: 5 }))
        .unwrap();
    assert_eq!(record.current_stock(), 0);
    assert_eq!(record.status(), StockStatus::OutOfStock);
}

#[test]
fn overdraw_rejects_without_any_state_change() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Teclado", 2, 5);

    let before_history = ledger.list_movements(&MovementFilter::default(), MovementOrder::OldestFirst);
    let err = ledger
        .apply_movement(request(&product, &actor, MovementKind::Out { quantity: 5 }))
        .unwrap_err();

    assert_eq!(
        err,
        LedgerError::InsufficientStock {
            available: 2,
            requested: 5
        }
    );
    assert_eq!(ledger.record(product.id).unwrap().current_stock(), 2);
    assert_eq!(
        ledger.list_movements(&MovementFilter::default(), MovementOrder::OldestFirst),
        before_history
    );
}

#[test]
fn zero_quantity_receipt_is_rejected() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Monitor", 1, 1);

    let err = ledger
        .apply_movement(request(&product, &actor, MovementKind::In { quantity: 0 }))
        .unwrap_err();
    assert!(matches!(err, LedgerError::InvalidQuantity(_)));
}

#[test]
fn unknown_product_is_rejected() {
    let ledger = ledger();
    let actor = actor();
    let phantom = product("Fantasma", 1);

    let err = ledger
        .apply_movement(request(&phantom, &actor, MovementKind::In { quantity: 1 }))
        .unwrap_err();
    assert!(matches!(err, LedgerError::ProductNotFound(_)));
}

#[test]
fn duplicate_registration_conflicts() {
    let ledger = ledger();
    let product = product("Caneta", 5);
    ledger.register_product(&product).unwrap();
    let err = ledger.register_product(&product).unwrap_err();
    assert!(matches!(err, LedgerError::Conflict(_)));
}

#[test]
fn reads_are_idempotent_and_orders_are_mirrors() {
    let ledger = ledger();
    let actor = actor();
    let product = stocked(&ledger, &actor, "Caneta", 50, 5);
    for quantity in [3, 7, 1] {
        ledger
            .apply_movement(request(&product, &actor, MovementKind::Out { quantity }))
            .unwrap();
    }

    let filter = MovementFilter::default();
    let oldest = ledger.list_movements(&filter, MovementOrder::OldestFirst);
    let again = ledger.list_movements(&filter, MovementOrder::OldestFirst);
    assert_eq!(oldest, again);

    let newest = ledger.list_movements(&filter, MovementOrder::NewestFirst);
    let mut reversed = oldest.clone();
    reversed.reverse();
    assert_eq!(newest, reversed);
    assert_eq!(oldest.len(), 4);
}

#[test]
fn aggregates_match_recorded_history() {
    let ledger = ledger();
    let actor = actor();
    let pen = stocked(&ledger, &actor, "Caneta", 100, 5);
    let mouse = stocked(&ledger, &actor, "Mouse", 40, 5);

    ledger
        .apply_movement(request(&pen, &actor, MovementKind::Out { quantity: 30 }))
        .unwrap();
    ledger
        .apply_movement(request(&mouse, &actor, MovementKind::Out { quantity: 5 }))
        .unwrap();
    ledger
        .apply_movement(request(&mouse, &actor, MovementKind::Adjustment { delta: -1 }))
        .unwrap();

    let history = ledger.list_movements(&MovementFilter::default(), MovementOrder::OldestFirst);
    let totals = compute_aggregates(&history, TimeRange::All, Utc::now());

    assert_eq!(totals.total_in, 140);
    assert_eq!(totals.total_out, 35);
    assert_eq!(totals.by_product[&pen.id].outbound, 30);
    assert_eq!(totals.by_category["Papelaria"].inbound, 140);
}

#[test]
fn min_stock_edit_changes_derived_status_without_history() {
    let ledger = ledger();
    let actor = actor();
    let mut product = stocked(&ledger, &actor, "Caderno", 3, 10);
    assert_eq!(
        ledger.record(product.id).unwrap().status(),
        StockStatus::LowStock
    );

    product
        .edit(
            ProductEdit {
                min_stock: Some(2),
                ..ProductEdit::default()
            },
            Utc::now(),
        )
        .unwrap();
    let record = ledger.sync_product(&product).unwrap();

    assert_eq!(record.status(), StockStatus::InStock);
    let history = ledger.list_movements(&MovementFilter::default(), MovementOrder::OldestFirst);
    assert_eq!(history.len(), 1); // only the opening receipt
}

#[test]
fn movement_is_attributed_to_session_actor() {
    let ledger = ledger();
    let session = FixedSession(actor());
    let current = session.current_actor().expect("signed in");
    let product = stocked(&ledger, &current, "Caneta", 10, 5);

    let (movement, _) = ledger
        .apply_movement(MovementRequest {
            product_id: product.id,
            kind: MovementKind::Out { quantity: 2 },
            reason: "Uso interno".to_string(),
            actor_id: current.id.clone(),
            occurred_at: Utc::now(),
        })
        .unwrap();

    assert_eq!(movement.actor_id, ActorId::new("1").unwrap());
}
