use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::numeric::{deserialize_amount, deserialize_cart_quantity};
use super::CartPhase;

/// Shopping cart for a browsing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    pub session_id: String,
    pub items: Vec<CartItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Individual line in a shopping cart.
///
/// `unit_price` and `quantity` pass through the safe-number adapters when the
/// persistence collaborator hands us a cart, so a malformed field contributes
/// zero to totals instead of corrupting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub item_id: String,
    pub vendor_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_amount")]
    pub unit_price: Decimal,
    #[serde(default, deserialize_with = "deserialize_cart_quantity")]
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

/// The subset of cart items sharing one vendor, with its own subtotal.
/// Derived on every read, never persisted or independently mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VendorGroup {
    pub vendor_id: String,
    pub items: Vec<CartItem>,
    pub vendor_total: Decimal,
}

/// Request model for adding an item to the cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddCartItemRequest {
    pub item_id: String,
    pub vendor_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Request model for updating cart item quantity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateCartItemRequest {
    pub quantity: u32,
}

/// Read-only projection of a cart, grouped by vendor, consumed by rendering
/// surfaces. Recomputed on every read.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub session_id: String,
    pub groups: Vec<VendorGroup>,
    pub grand_total: Decimal,
    pub total_items: u32,
    pub phase: CartPhase,
    pub updated_at: DateTime<Utc>,
}

/// Group cart items by vendor, preserving first-seen vendor order.
///
/// Vendor identifiers are matched exactly (case-sensitive, no trimming);
/// callers are responsible for consistent identifiers. Every input item lands
/// in exactly one group.
pub fn group_by_vendor(items: &[CartItem]) -> Vec<VendorGroup> {
    let mut groups: Vec<VendorGroup> = Vec::new();

    for item in items {
        match groups.iter_mut().find(|g| g.vendor_id == item.vendor_id) {
            Some(group) => group.items.push(item.clone()),
            None => groups.push(VendorGroup {
                vendor_id: item.vendor_id.clone(),
                items: vec![item.clone()],
                vendor_total: Decimal::ZERO,
            }),
        }
    }

    for group in &mut groups {
        group.vendor_total = vendor_total(&group.items);
    }

    groups
}

/// Sum of `unit_price * quantity` over the given items; zero for an empty
/// slice. Malformed values were already coerced to zero at the boundary, so
/// the sum is always a well-formed decimal.
pub fn vendor_total(items: &[CartItem]) -> Decimal {
    items.iter().map(CartItem::line_total).sum()
}

impl Cart {
    /// Create a new empty cart for a session
    pub fn new(session_id: String) -> Self {
        let now = Utc::now();
        Self {
            session_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Add an item to the cart or merge quantity if the item id already
    /// exists. The merge saturates: persisted carts can carry any u32
    /// quantity, and the service-level cap rejects the result afterwards.
    pub fn add_item(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.item_id == item.item_id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
        } else {
            self.items.push(item);
        }
        self.updated_at = Utc::now();
    }

    /// Update the quantity of a specific item.
    ///
    /// A quantity of zero removes the item outright. An unknown item id is a
    /// no-op and returns `false`, which makes repeated calls with stale ids
    /// idempotent.
    pub fn update_item_quantity(&mut self, item_id: &str, new_quantity: u32) -> bool {
        if let Some(item) = self.items.iter_mut().find(|i| i.item_id == item_id) {
            if new_quantity == 0 {
                self.remove_item(item_id)
            } else {
                item.quantity = new_quantity;
                self.updated_at = Utc::now();
                true
            }
        } else {
            false
        }
    }

    /// Remove an item from the cart; no-op if absent
    pub fn remove_item(&mut self, item_id: &str) -> bool {
        let original_len = self.items.len();
        self.items.retain(|item| item.item_id != item_id);
        let removed = self.items.len() != original_len;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    /// Clear all items from the cart
    pub fn clear(&mut self) {
        self.items.clear();
        self.updated_at = Utc::now();
    }

    /// Derived vendor grouping over the current items
    pub fn vendor_groups(&self) -> Vec<VendorGroup> {
        group_by_vendor(&self.items)
    }

    /// Sum over the whole cart, independent of grouping. Always equals the
    /// sum of the vendor totals.
    pub fn grand_total(&self) -> Decimal {
        vendor_total(&self.items)
    }

    /// Total number of units across all items
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> CartPhase {
        if self.is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::NonEmpty
        }
    }

    /// Get a specific item from the cart
    pub fn get_item(&self, item_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.item_id == item_id)
    }

    pub fn contains_item(&self, item_id: &str) -> bool {
        self.items.iter().any(|item| item.item_id == item_id)
    }

    /// Items belonging to one vendor, in cart order
    pub fn items_for_vendor(&self, vendor_id: &str) -> Vec<CartItem> {
        self.items
            .iter()
            .filter(|item| item.vendor_id == vendor_id)
            .cloned()
            .collect()
    }

    /// Build the read-only projection handed to rendering surfaces
    pub fn to_view(&self) -> CartView {
        CartView {
            session_id: self.session_id.clone(),
            groups: self.vendor_groups(),
            grand_total: self.grand_total(),
            total_items: self.total_items(),
            phase: self.phase(),
            updated_at: self.updated_at,
        }
    }
}

impl CartItem {
    /// Create a new cart item
    pub fn new(item_id: String, vendor_id: String, name: String, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            item_id,
            vendor_id,
            name,
            unit_price,
            quantity,
            added_at: Utc::now(),
        }
    }

    /// Price contribution of this line (unit_price * quantity)
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

impl From<AddCartItemRequest> for CartItem {
    fn from(request: AddCartItemRequest) -> Self {
        CartItem::new(
            request.item_id,
            request.vendor_id,
            request.name,
            request.unit_price,
            request.quantity,
        )
    }
}
