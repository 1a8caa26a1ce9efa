mod common;

use std::sync::Arc;

use anyhow::Result;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use bazaarcart_rs::models::{CartPhase, CheckoutMode, DispatchOutcome};
use bazaarcart_rs::repositories::{
    InMemoryCartRepository, InMemoryPendingCheckoutStore, KitchenDirectory,
};
use bazaarcart_rs::services::{CartService, CheckoutService, ReceiptService};
use bazaarcart_rs::Config;

use common::{add_request, RecordingGateway};

struct Session {
    cart: CartService,
    checkout: CheckoutService,
    receipts: ReceiptService,
    gateway: Arc<RecordingGateway>,
}

fn session() -> Session {
    let config = Config::default();
    let kitchens = Arc::new(KitchenDirectory::from_entries(vec![
        ("V1".to_string(), "kitchen-7".to_string()),
    ]));
    let gateway = Arc::new(RecordingGateway::new());

    Session {
        cart: CartService::new(
            Arc::new(InMemoryCartRepository::new()),
            kitchens,
            config.cart.max_item_quantity,
        ),
        checkout: CheckoutService::new(
            gateway.clone(),
            Arc::new(InMemoryPendingCheckoutStore::new()),
            config.cart.checkout_return_path,
        ),
        receipts: ReceiptService::new(),
        gateway,
    }
}

async fn fill_cart(s: &Session) -> Result<()> {
    s.cart
        .add_item("s1", add_request("a", "V1", "Idli plate", dec!(100), 2))
        .await?;
    s.cart
        .add_item("s1", add_request("b", "V1", "Filter coffee", dec!(50), 1))
        .await?;
    s.cart
        .add_item("s1", add_request("c", "V2", "Mango crate", dec!(30), 3))
        .await?;
    Ok(())
}

#[tokio::test]
async fn grouped_view_and_totals_agree() -> Result<()> {
    let s = session();
    fill_cart(&s).await?;

    let view = s.cart.get_cart("s1").await?;

    assert_eq!(view.phase, CartPhase::NonEmpty);
    assert_eq!(view.groups.len(), 2);
    assert_eq!(view.groups[0].vendor_id, "V1");
    assert_eq!(view.groups[0].vendor_total, dec!(250));
    assert_eq!(view.groups[1].vendor_total, dec!(90));
    assert_eq!(view.grand_total, dec!(340));

    let group_sum: Decimal = view.groups.iter().map(|g| g.vendor_total).sum();
    assert_eq!(group_sum, view.grand_total);

    // Continuation affordance only where a kitchen reference exists
    assert_eq!(s.cart.continuation_target("V1"), Some("kitchen-7".to_string()));
    assert_eq!(s.cart.continuation_target("V2"), None);
    Ok(())
}

#[tokio::test]
async fn quantity_edits_persist_across_reads() -> Result<()> {
    let s = session();
    fill_cart(&s).await?;

    s.cart.update_item_quantity("s1", "a", 1).await?;
    s.cart.update_item_quantity("s1", "stale-id", 9).await?; // no-op
    s.cart.update_item_quantity("s1", "b", 0).await?; // removal

    let view = s.cart.get_cart("s1").await?;
    assert_eq!(view.grand_total, dec!(100) + dec!(90));
    assert_eq!(view.total_items, 4);
    Ok(())
}

#[tokio::test]
async fn vendor_checkout_survives_authentication_detour() -> Result<()> {
    let s = session();
    fill_cart(&s).await?;

    let intent = s
        .cart
        .checkout_intent_for_vendor("s1", "V1", CheckoutMode::Food)
        .await?;
    assert_eq!(intent.items.len(), 2);

    // Unauthenticated: the dispatch parks the intent and points at the cart page
    let deferred = s.checkout.dispatch(intent.clone(), false).await?;
    let pending_id = match &deferred {
        DispatchOutcome::Deferred {
            pending_id,
            return_to,
        } => {
            assert_eq!(return_to, "/cart");
            *pending_id
        }
        other => panic!("Expected deferred dispatch, got {:?}", other),
    };
    assert!(s.gateway.submitted.lock().unwrap().is_empty());

    // Post-login resume carries exactly the parked selection
    let outcome = s.checkout.resume(&pending_id).await?;
    assert_eq!(outcome.phase(), CartPhase::CheckoutDispatched);

    let submitted = s.gateway.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 1);
    assert_eq!(submitted[0], intent);
    Ok(())
}

#[tokio::test]
async fn dispatched_order_renders_as_receipt() -> Result<()> {
    let s = session();
    fill_cart(&s).await?;

    let intent = s
        .cart
        .checkout_intent_for_vendor("s1", "V2", CheckoutMode::Food)
        .await?;
    let outcome = s.checkout.dispatch(intent, true).await?;

    let order = match outcome {
        DispatchOutcome::Dispatched(order) => order,
        other => panic!("Expected dispatched outcome, got {:?}", other),
    };

    let receipt = s.receipts.normalize(&order)?;
    assert_eq!(receipt.title, "Order placed");
    assert_eq!(receipt.order_id_short, "65f0c2");
    assert_eq!(receipt.line_items.len(), 1);
    assert_eq!(receipt.line_items[0].label, "Mango crate × 3");
    assert_eq!(receipt.line_items[0].amount, Some(dec!(90)));

    let totals = receipt.totals.expect("food receipts carry totals");
    assert_eq!(totals.subtotal, Some(dec!(90)));
    assert_eq!(totals.delivery_fee, Some(dec!(20)));
    assert_eq!(totals.total, dec!(110));
    Ok(())
}

#[tokio::test]
async fn full_cart_checkout_covers_every_vendor() -> Result<()> {
    let s = session();
    fill_cart(&s).await?;

    let intent = s.cart.checkout_intent("s1", CheckoutMode::Food).await?;
    assert_eq!(intent.items.len(), 3);

    let outcome = s.checkout.dispatch(intent, true).await?;
    let order = match outcome {
        DispatchOutcome::Dispatched(order) => order,
        other => panic!("Expected dispatched outcome, got {:?}", other),
    };

    let receipt = s.receipts.normalize(&order)?;
    let totals = receipt.totals.expect("food receipts carry totals");
    assert_eq!(totals.subtotal, Some(dec!(340)));
    assert_eq!(totals.total, dec!(360));
    Ok(())
}
