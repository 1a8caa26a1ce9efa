use async_trait::async_trait;
use rust_decimal::Decimal;
use serde_json::json;
use std::sync::Mutex;

use bazaarcart_rs::models::{
    AddCartItemRequest, CartItem, CheckoutIntent, OrderRecord, ServiceResult,
};
use bazaarcart_rs::services::CheckoutGateway;

pub fn add_request(item_id: &str, vendor_id: &str, name: &str, price: Decimal, qty: u32) -> AddCartItemRequest {
    AddCartItemRequest {
        item_id: item_id.to_string(),
        vendor_id: vendor_id.to_string(),
        name: name.to_string(),
        unit_price: price,
        quantity: qty,
    }
}

pub fn line_total(item: &CartItem) -> Decimal {
    item.unit_price * Decimal::from(item.quantity)
}

/// Checkout gateway double that records every submitted intent and answers
/// with an order record echoing the intent's contents, the way the real
/// backend does.
pub struct RecordingGateway {
    pub submitted: Mutex<Vec<CheckoutIntent>>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            submitted: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl CheckoutGateway for RecordingGateway {
    async fn submit(&self, intent: &CheckoutIntent) -> ServiceResult<OrderRecord> {
        let subtotal: Decimal = intent.items.iter().map(line_total).sum();
        let delivery_fee = Decimal::from(20);

        let order = serde_json::from_value(json!({
            "mode": intent.mode.to_string(),
            "_id": "65f0c2d9a1b2c3d4e5f6a7b8",
            "items": intent
                .items
                .iter()
                .map(|i| json!({"name": i.name, "price": i.unit_price, "qty": i.quantity}))
                .collect::<Vec<_>>(),
            "subtotal": subtotal,
            "deliveryFee": delivery_fee,
            "total": subtotal + delivery_fee,
        }))
        .expect("gateway order record is well-formed");

        self.submitted.lock().unwrap().push(intent.clone());
        Ok(order)
    }
}
