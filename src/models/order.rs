use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::numeric::{coerce_amount, coerce_quantity};

/// An order record as returned by the checkout collaborator.
///
/// The wire shape is heterogeneous: ids arrive as `id` or `_id`, item fields
/// under two generations of names, numerics as whatever the backend felt like
/// emitting. Every field except `mode` is optional and untyped numerics stay
/// as raw JSON until they pass through the safe-number coercion, so
/// deserialization never fails on an object-shaped payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderRecord {
    pub mode: String,
    pub id: Option<String>,
    #[serde(rename = "_id")]
    pub legacy_id: Option<String>,
    pub items: Vec<RawOrderItem>,
    pub subtotal: Option<Value>,
    pub delivery_fee: Option<Value>,
    pub total: Option<Value>,
    /// Epoch milliseconds, when present.
    pub delivery_eta: Option<Value>,
    pub details: Option<OrderDetails>,
}

/// Free-form detail block attached to quote requests and service bookings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// An order line as it appears on the wire, aliases and all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawOrderItem {
    pub name: Option<String>,
    pub qty: Option<Value>,
    pub quantity: Option<Value>,
    pub price: Option<Value>,
    pub rate: Option<Value>,
}

/// Canonical order line after alias resolution and numeric coercion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderLineItem {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub line_total: Decimal,
}

impl RawOrderItem {
    /// Resolve field aliases once: `qty` wins over `quantity` (default 1),
    /// `price` over `rate` (default 0). This is the only place the alias
    /// pairs are consulted.
    pub fn normalize(&self) -> OrderLineItem {
        let quantity = coerce_quantity(self.qty.as_ref().or(self.quantity.as_ref()), 1);
        let unit_price = coerce_amount(self.price.as_ref().or(self.rate.as_ref()));
        OrderLineItem {
            name: self
                .name
                .clone()
                .unwrap_or_else(|| "Unnamed item".to_string()),
            quantity,
            unit_price,
            line_total: unit_price * Decimal::from(quantity),
        }
    }
}

/// A single renderable receipt line. `amount` is absent for quote requests,
/// the unit price for service bookings, and the line total for food orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptLine {
    pub label: String,
    pub amount: Option<Decimal>,
}

/// Totals block of a receipt. Food orders carry all three figures, service
/// bookings the total only; quote requests have no totals block at all.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptTotals {
    pub subtotal: Option<Decimal>,
    pub delivery_fee: Option<Decimal>,
    pub total: Decimal,
}

/// Normalized, renderable receipt. Purely a projection of an
/// [`OrderRecord`] plus its mode; recomputed, never mutated in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReceiptView {
    pub title: String,
    pub subtitle: String,
    pub order_id_short: String,
    pub line_items: Vec<ReceiptLine>,
    pub totals: Option<ReceiptTotals>,
    pub eta: Option<String>,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_order_record_tolerates_minimal_payload() {
        let order: OrderRecord = serde_json::from_value(json!({"mode": "quote"})).unwrap();
        assert_eq!(order.mode, "quote");
        assert!(order.id.is_none());
        assert!(order.items.is_empty());
        assert!(order.totals_absent());
    }

    #[test]
    fn test_order_record_accepts_junk_numeric_fields() {
        let order: OrderRecord = serde_json::from_value(json!({
            "mode": "food",
            "subtotal": "oops",
            "deliveryFee": null,
            "total": {"cents": 100},
            "deliveryEta": [],
            "items": [{"name": "Idli", "price": "sixty", "qty": false}]
        }))
        .unwrap();

        assert_eq!(order.items.len(), 1);
        let line = order.items[0].normalize();
        assert_eq!(line.unit_price, dec!(0));
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_normalize_prefers_qty_and_price_over_aliases() {
        let raw: RawOrderItem = serde_json::from_value(json!({
            "name": "Dosa",
            "qty": 2,
            "quantity": 9,
            "price": 40,
            "rate": 99
        }))
        .unwrap();

        let line = raw.normalize();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.unit_price, dec!(40));
        assert_eq!(line.line_total, dec!(80));
    }

    #[test]
    fn test_normalize_falls_back_to_aliases_then_defaults() {
        let aliased: RawOrderItem = serde_json::from_value(json!({
            "name": "Deep clean",
            "quantity": 3,
            "rate": 500
        }))
        .unwrap();
        let line = aliased.normalize();
        assert_eq!(line.quantity, 3);
        assert_eq!(line.unit_price, dec!(500));
        assert_eq!(line.line_total, dec!(1500));

        let bare = RawOrderItem::default();
        let line = bare.normalize();
        assert_eq!(line.name, "Unnamed item");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, dec!(0));
        assert_eq!(line.line_total, dec!(0));
    }

    #[test]
    fn test_details_keep_unknown_keys() {
        let order: OrderRecord = serde_json::from_value(json!({
            "mode": "quote",
            "details": {"notes": "need 50 units", "urgency": "high"}
        }))
        .unwrap();

        let details = order.details.unwrap();
        assert_eq!(details.notes.as_deref(), Some("need 50 units"));
        assert_eq!(details.extra.get("urgency"), Some(&json!("high")));
    }

    impl OrderRecord {
        fn totals_absent(&self) -> bool {
            self.subtotal.is_none() && self.delivery_fee.is_none() && self.total.is_none()
        }
    }
}
