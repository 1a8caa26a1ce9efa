use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{
    AddCartItemRequest, Cart, CartItem, CartView, CheckoutIntent, CheckoutMode, ServiceError,
    ServiceResult, validate_cart_quantity, validate_item_id, validate_session_id,
    validate_vendor_id,
};
use crate::repositories::{CartRepository, KitchenDirectory};

/// Maintains the working view of cart contents grouped by vendor and
/// produces checkout intents.
///
/// This service is the sole mutator of cart contents: rendering surfaces
/// route every write through it so the grouping and total invariants hold on
/// each read.
pub struct CartService {
    cart_repository: Arc<dyn CartRepository>,
    kitchens: Arc<KitchenDirectory>,
    max_item_quantity: u32,
}

impl CartService {
    /// Create a new CartService. The kitchen directory is the injected
    /// read-only collaborator resolving continuation affordances.
    pub fn new(
        cart_repository: Arc<dyn CartRepository>,
        kitchens: Arc<KitchenDirectory>,
        max_item_quantity: u32,
    ) -> Self {
        Self {
            cart_repository,
            kitchens,
            max_item_quantity,
        }
    }

    /// Get the vendor-grouped view of a session's cart. A missing cart reads
    /// as an empty one.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn get_cart(&self, session_id: &str) -> ServiceResult<CartView> {
        validate_session_id(session_id)?;

        let cart = self.load_or_new(session_id).await?;
        let view = cart.to_view();

        info!(
            "Cart read: {} vendor groups, grand_total={}",
            view.groups.len(),
            view.grand_total
        );
        Ok(view)
    }

    /// Add an item to the cart, merging quantity when the item id already
    /// exists.
    #[instrument(skip(self, request), fields(session_id = %session_id, item_id = %request.item_id, quantity = request.quantity))]
    pub async fn add_item(
        &self,
        session_id: &str,
        request: AddCartItemRequest,
    ) -> ServiceResult<CartView> {
        validate_session_id(session_id)?;
        validate_item_id(&request.item_id)?;
        validate_vendor_id(&request.vendor_id)?;
        if request.quantity == 0 {
            return Err(ServiceError::InvalidQuantity { quantity: 0 });
        }
        validate_cart_quantity(request.quantity, self.max_item_quantity)?;

        let mut cart = self.load_or_new(session_id).await?;
        let item_id = request.item_id.clone();
        cart.add_item(CartItem::from(request));

        if let Some(item) = cart.get_item(&item_id) {
            validate_cart_quantity(item.quantity, self.max_item_quantity)?;
        }

        let saved = self.cart_repository.save_cart(cart).await?;
        info!("Item added to cart");
        Ok(saved.to_view())
    }

    /// Replace an item's quantity. Zero (the UI's decrement-to-nothing)
    /// removes the item. An unknown item id is a no-op, which keeps repeated
    /// calls with stale ids harmless.
    #[instrument(skip(self), fields(session_id = %session_id, item_id = %item_id, quantity = new_quantity))]
    pub async fn update_item_quantity(
        &self,
        session_id: &str,
        item_id: &str,
        new_quantity: u32,
    ) -> ServiceResult<CartView> {
        validate_session_id(session_id)?;
        validate_item_id(item_id)?;
        validate_cart_quantity(new_quantity, self.max_item_quantity)?;

        let mut cart = self.load_or_new(session_id).await?;
        let changed = cart.update_item_quantity(item_id, new_quantity);

        if !changed {
            info!("Quantity update for unknown item id, no-op");
            return Ok(cart.to_view());
        }

        let saved = self.cart_repository.save_cart(cart).await?;
        info!("Cart item quantity updated");
        Ok(saved.to_view())
    }

    /// Remove an item from the cart; no-op if absent.
    #[instrument(skip(self), fields(session_id = %session_id, item_id = %item_id))]
    pub async fn remove_item(&self, session_id: &str, item_id: &str) -> ServiceResult<CartView> {
        validate_session_id(session_id)?;
        validate_item_id(item_id)?;

        let mut cart = self.load_or_new(session_id).await?;
        if !cart.remove_item(item_id) {
            info!("Removal of unknown item id, no-op");
            return Ok(cart.to_view());
        }

        let saved = self.cart_repository.save_cart(cart).await?;
        info!("Item removed from cart");
        Ok(saved.to_view())
    }

    /// Clear all items from the cart.
    #[instrument(skip(self), fields(session_id = %session_id))]
    pub async fn clear_cart(&self, session_id: &str) -> ServiceResult<CartView> {
        validate_session_id(session_id)?;

        let mut cart = self.load_or_new(session_id).await?;
        cart.clear();

        let saved = self.cart_repository.save_cart(cart).await?;
        info!("Cart cleared");
        Ok(saved.to_view())
    }

    /// Resolve the continuation affordance for a vendor: the kitchen
    /// reference that lets the user add more from that vendor. `None` means
    /// the affordance is omitted, never an error.
    pub fn continuation_target(&self, vendor_id: &str) -> Option<String> {
        self.kitchens.kitchen_for(vendor_id).map(str::to_string)
    }

    /// Build a checkout intent covering the whole cart.
    #[instrument(skip(self), fields(session_id = %session_id, mode = %mode))]
    pub async fn checkout_intent(
        &self,
        session_id: &str,
        mode: CheckoutMode,
    ) -> ServiceResult<CheckoutIntent> {
        validate_session_id(session_id)?;

        let cart = self.load_or_new(session_id).await?;
        if cart.is_empty() {
            return Err(ServiceError::EmptyCart {
                session_id: session_id.to_string(),
            });
        }

        Ok(CheckoutIntent::new(cart.items, mode))
    }

    /// Build a checkout intent covering a single vendor's items.
    #[instrument(skip(self), fields(session_id = %session_id, vendor_id = %vendor_id, mode = %mode))]
    pub async fn checkout_intent_for_vendor(
        &self,
        session_id: &str,
        vendor_id: &str,
        mode: CheckoutMode,
    ) -> ServiceResult<CheckoutIntent> {
        validate_session_id(session_id)?;
        validate_vendor_id(vendor_id)?;

        let cart = self.load_or_new(session_id).await?;
        let items = cart.items_for_vendor(vendor_id);
        if items.is_empty() {
            return Err(ServiceError::EmptyVendorCheckout {
                vendor_id: vendor_id.to_string(),
            });
        }

        Ok(CheckoutIntent::new(items, mode))
    }

    async fn load_or_new(&self, session_id: &str) -> ServiceResult<Cart> {
        Ok(match self.cart_repository.find_cart(session_id).await? {
            Some(cart) => cart,
            None => Cart::new(session_id.to_string()),
        })
    }
}
