use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::models::{
    CheckoutIntent, DispatchOutcome, OrderRecord, PendingCheckout, ServiceError, ServiceResult,
};
use crate::repositories::PendingCheckoutStore;

/// The external checkout flow. Receives a checkout intent and eventually
/// returns an order record; its internals (payment, persistence, retries)
/// are opaque to this crate.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn submit(&self, intent: &CheckoutIntent) -> ServiceResult<OrderRecord>;
}

/// Routes checkout intents through the authentication gate.
///
/// When the session is unauthenticated the intent itself is parked, not just
/// a navigation path: the resumed dispatch must carry exactly the items the
/// user selected, so a per-vendor checkout never silently widens into a
/// full-cart one after login.
pub struct CheckoutService {
    gateway: Arc<dyn CheckoutGateway>,
    pending: Arc<dyn PendingCheckoutStore>,
    return_path: String,
}

impl CheckoutService {
    pub fn new(
        gateway: Arc<dyn CheckoutGateway>,
        pending: Arc<dyn PendingCheckoutStore>,
        return_path: String,
    ) -> Self {
        Self {
            gateway,
            pending,
            return_path,
        }
    }

    /// Dispatch a checkout intent.
    ///
    /// Unauthenticated sessions get a `Deferred` outcome carrying a one-time
    /// handle and the return destination for the auth collaborator;
    /// authenticated sessions hand off to the checkout gateway immediately.
    /// No retry or at-most-once guarantee lives here; double-submission is
    /// prevented at the UI boundary (disable-on-submit).
    #[instrument(skip(self, intent), fields(mode = %intent.mode, item_count = intent.items.len()))]
    pub async fn dispatch(
        &self,
        intent: CheckoutIntent,
        is_authenticated: bool,
    ) -> ServiceResult<DispatchOutcome> {
        if intent.items.is_empty() {
            return Err(ServiceError::ValidationError {
                message: "Checkout intent has no items".to_string(),
            });
        }

        if !is_authenticated {
            let pending = PendingCheckout::new(intent, self.return_path.clone());
            let pending_id = pending.pending_id;
            let return_to = pending.return_to.clone();
            self.pending.save(pending).await?;

            info!("Checkout deferred for authentication");
            return Ok(DispatchOutcome::Deferred {
                pending_id,
                return_to,
            });
        }

        let order = self.gateway.submit(&intent).await?;
        info!("Checkout dispatched");
        Ok(DispatchOutcome::Dispatched(order))
    }

    /// Resume a checkout that was parked behind authentication.
    ///
    /// The stored intent is dispatched verbatim. The handle is single-use;
    /// an unknown or already-consumed handle is an explicit error so the
    /// caller can fall back to the cart page instead of guessing.
    #[instrument(skip(self), fields(pending_id = %pending_id))]
    pub async fn resume(&self, pending_id: &Uuid) -> ServiceResult<DispatchOutcome> {
        match self.pending.take(pending_id).await? {
            Some(parked) => {
                info!("Resuming deferred checkout");
                self.dispatch(parked.intent, true).await
            }
            None => Err(ServiceError::PendingCheckoutNotFound {
                pending_id: pending_id.to_string(),
            }),
        }
    }
}
