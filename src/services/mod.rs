pub use self::cart_service::CartService;
pub use self::checkout_service::{CheckoutGateway, CheckoutService};
pub use self::receipt_service::ReceiptService;

pub mod cart_service;
pub mod checkout_service;
pub mod receipt_service;
