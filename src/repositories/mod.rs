pub use self::cart_repository::{CartRepository, InMemoryCartRepository};
pub use self::kitchen_directory::KitchenDirectory;
pub use self::pending_checkout::{InMemoryPendingCheckoutStore, PendingCheckoutStore};

mod cart_repository;
mod kitchen_directory;
mod pending_checkout;
