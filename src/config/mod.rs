use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

impl From<envy::Error> for ConfigError {
    fn from(err: envy::Error) -> Self {
        ConfigError::LoadError {
            message: err.to_string(),
        }
    }
}

/// Crate configuration, loaded once at startup from `BAZAARCART_*`
/// environment variables. Every field has a default so an empty environment
/// is a valid one.
#[derive(Debug, Clone)]
pub struct Config {
    pub service: ServiceConfig,
    pub cart: CartConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CartConfig {
    /// Destination handed to the auth collaborator so a deferred checkout
    /// returns to the cart page after login.
    #[serde(default = "default_checkout_return_path")]
    pub checkout_return_path: String,
    /// Upper bound on a single line's quantity.
    #[serde(default = "default_max_item_quantity")]
    pub max_item_quantity: u32,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let service: ServiceConfig = envy::prefixed("BAZAARCART_").from_env()?;
        let cart: CartConfig = envy::prefixed("BAZAARCART_").from_env()?;

        let config = Self { service, cart };
        config.validate()?;

        info!(
            "Configuration loaded: service={}, return_path={}, max_item_quantity={}",
            config.service.service_name,
            config.cart.checkout_return_path,
            config.cart.max_item_quantity
        );
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.cart.max_item_quantity == 0 {
            return Err(ConfigError::ValidationError {
                message: "max_item_quantity must be at least 1".to_string(),
            });
        }
        if !self.cart.checkout_return_path.starts_with('/') {
            return Err(ConfigError::ValidationError {
                message: "checkout_return_path must be an absolute path".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            service: ServiceConfig::default(),
            cart: CartConfig::default(),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            enable_json_logging: false,
        }
    }
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            checkout_return_path: default_checkout_return_path(),
            max_item_quantity: default_max_item_quantity(),
        }
    }
}

fn default_service_name() -> String {
    "bazaarcart-rs".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_checkout_return_path() -> String {
    "/cart".to_string()
}

fn default_max_item_quantity() -> u32 {
    100
}

#[cfg(test)]
mod tests;
