use chrono::Utc;
use tracing::{info, instrument};

use crate::models::numeric::{coerce_amount, coerce_epoch_millis};
use crate::models::{
    CheckoutMode, OrderLineItem, OrderRecord, ReceiptLine, ReceiptTotals, ReceiptView,
    ServiceResult,
};

const IMMINENT_ARRIVAL_LABEL: &str = "arriving imminently";
const SHORT_ID_LEN: usize = 6;

/// Turns a heterogeneous order record plus its mode tag into a stable,
/// renderable receipt.
///
/// Normalization is total for any object-shaped record carrying a valid
/// mode: lookup misses and malformed numerics degrade to defined defaults
/// and never surface. The one surfaced failure is an unknown mode, for which
/// no safe default messaging exists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReceiptService;

impl ReceiptService {
    pub fn new() -> Self {
        Self
    }

    /// Build the receipt view for an order record.
    #[instrument(skip(self, order), fields(mode = %order.mode))]
    pub fn normalize(&self, order: &OrderRecord) -> ServiceResult<ReceiptView> {
        let mode: CheckoutMode = order.mode.parse()?;
        let (title, subtitle) = Self::select_messages(mode);
        let now_ms = Utc::now().timestamp_millis();

        let view = ReceiptView {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            order_id_short: Self::normalize_id(order),
            line_items: order
                .items
                .iter()
                .map(|raw| Self::format_line(&raw.normalize(), mode))
                .collect(),
            totals: Self::build_totals(order, mode),
            eta: Self::format_eta(coerce_epoch_millis(order.delivery_eta.as_ref()), now_ms),
            notes: order.details.as_ref().and_then(|d| d.notes.clone()),
        };

        info!(
            "Receipt normalized: order={}, {} lines",
            view.order_id_short,
            view.line_items.len()
        );
        Ok(view)
    }

    /// Short display id: `id`, then `_id`, truncated to the first six
    /// characters. When both are absent the literal `"unknown"` is returned
    /// whole; only actual ids are truncated. An empty id string counts as
    /// absent.
    pub fn normalize_id(order: &OrderRecord) -> String {
        order
            .id
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| order.legacy_id.as_deref().filter(|s| !s.is_empty()))
            .map(|id| id.chars().take(SHORT_ID_LEN).collect())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Mode-keyed receipt messaging. The mode is already a closed variant,
    /// so every branch exists by construction.
    pub fn select_messages(mode: CheckoutMode) -> (&'static str, &'static str) {
        match mode {
            CheckoutMode::Food => (
                "Order placed",
                "Your order has been sent to the kitchen",
            ),
            CheckoutMode::Service => (
                "Booking confirmed",
                "The provider will contact you shortly",
            ),
            CheckoutMode::Quote => (
                "Quote requested",
                "The vendor will get back to you with a price",
            ),
        }
    }

    /// Render one normalized order line for the given mode: food shows the
    /// quantity multiplier and line total, service the unit price only,
    /// quote no numeric value at all.
    pub fn format_line(line: &OrderLineItem, mode: CheckoutMode) -> ReceiptLine {
        match mode {
            CheckoutMode::Food => ReceiptLine {
                label: format!("{} × {}", line.name, line.quantity),
                amount: Some(line.line_total),
            },
            CheckoutMode::Service => ReceiptLine {
                label: line.name.clone(),
                amount: Some(line.unit_price),
            },
            CheckoutMode::Quote => ReceiptLine {
                label: line.name.clone(),
                amount: None,
            },
        }
    }

    /// Countdown label for a delivery ETA in epoch milliseconds. Absent ETA
    /// shows nothing; a past ETA reads as imminent; a future one rounds up
    /// to whole minutes.
    pub fn format_eta(eta_ms: Option<i64>, now_ms: i64) -> Option<String> {
        let eta_ms = eta_ms?;
        // Saturating: the wire admits any i64, and an absurd timestamp must
        // still render rather than overflow
        let remaining = eta_ms.saturating_sub(now_ms);
        if remaining <= 0 {
            return Some(IMMINENT_ARRIVAL_LABEL.to_string());
        }

        let minutes = remaining.saturating_add(59_999) / 60_000;
        if minutes == 1 {
            Some("1 min".to_string())
        } else {
            Some(format!("{} mins", minutes))
        }
    }

    /// Totals block per mode. Each figure is coerced independently, so one
    /// malformed field never drags the others to zero.
    pub fn build_totals(order: &OrderRecord, mode: CheckoutMode) -> Option<ReceiptTotals> {
        match mode {
            CheckoutMode::Food => Some(ReceiptTotals {
                subtotal: Some(coerce_amount(order.subtotal.as_ref())),
                delivery_fee: Some(coerce_amount(order.delivery_fee.as_ref())),
                total: coerce_amount(order.total.as_ref()),
            }),
            CheckoutMode::Service => Some(ReceiptTotals {
                subtotal: None,
                delivery_fee: None,
                total: coerce_amount(order.total.as_ref()),
            }),
            CheckoutMode::Quote => None,
        }
    }
}
