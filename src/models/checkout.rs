use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::{CartItem, OrderRecord, ServiceError};

/// Order category controlling checkout routing and receipt layout.
///
/// Modeled as a closed variant and validated wherever a mode string crosses
/// into the core; an unrecognized value is [`ServiceError::UnknownMode`],
/// never a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    Food,
    Service,
    Quote,
}

impl FromStr for CheckoutMode {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "food" => Ok(CheckoutMode::Food),
            "service" => Ok(CheckoutMode::Service),
            "quote" => Ok(CheckoutMode::Quote),
            other => Err(ServiceError::UnknownMode {
                mode: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for CheckoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutMode::Food => write!(f, "food"),
            CheckoutMode::Service => write!(f, "service"),
            CheckoutMode::Quote => write!(f, "quote"),
        }
    }
}

/// The immutable item-subset-plus-mode payload handed to the external
/// checkout flow. Never persisted by the cart itself; a deferred dispatch
/// stores it verbatim so the same selection survives an authentication
/// detour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutIntent {
    pub items: Vec<CartItem>,
    pub mode: CheckoutMode,
}

impl CheckoutIntent {
    /// Pure construction; does not touch the cart.
    pub fn new(items: Vec<CartItem>, mode: CheckoutMode) -> Self {
        Self { items, mode }
    }
}

/// A checkout intent parked across an authentication detour, keyed by a
/// one-time handle the auth collaborator carries through the login flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingCheckout {
    pub pending_id: Uuid,
    pub intent: CheckoutIntent,
    pub return_to: String,
    pub created_at: DateTime<Utc>,
}

impl PendingCheckout {
    pub fn new(intent: CheckoutIntent, return_to: String) -> Self {
        Self {
            pending_id: Uuid::new_v4(),
            intent,
            return_to,
            created_at: Utc::now(),
        }
    }
}

/// Result of a checkout dispatch attempt.
#[derive(Debug, Clone)]
pub enum DispatchOutcome {
    /// Handed off to the checkout collaborator; terminal for this core.
    Dispatched(OrderRecord),
    /// Parked behind authentication; the caller routes the user through
    /// login and resumes with `pending_id`.
    Deferred { pending_id: Uuid, return_to: String },
}

impl DispatchOutcome {
    pub fn phase(&self) -> CartPhase {
        match self {
            DispatchOutcome::Dispatched(_) => CartPhase::CheckoutDispatched,
            DispatchOutcome::Deferred { .. } => CartPhase::CheckoutPending,
        }
    }
}

/// Cart-page session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartPhase {
    Empty,
    NonEmpty,
    CheckoutPending,
    CheckoutDispatched,
}
