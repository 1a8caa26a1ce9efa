// Re-export all model types
pub use self::cart::*;
pub use self::checkout::*;
pub use self::errors::*;
pub use self::order::*;
pub use self::validation::*;

mod cart;
mod checkout;
mod errors;
pub mod numeric;
mod order;
mod validation;
