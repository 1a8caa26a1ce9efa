use super::*;

#[test]
fn test_defaults_are_sane() {
    let config = Config::default();

    assert_eq!(config.service.service_name, "bazaarcart-rs");
    assert_eq!(config.service.log_level, "info");
    assert!(!config.service.enable_json_logging);
    assert_eq!(config.cart.checkout_return_path, "/cart");
    assert_eq!(config.cart.max_item_quantity, 100);
    assert!(config.validate().is_ok());
}

#[test]
fn test_validation_rejects_zero_quantity_cap() {
    let mut config = Config::default();
    config.cart.max_item_quantity = 0;

    match config.validate() {
        Err(ConfigError::ValidationError { message }) => {
            assert!(message.contains("max_item_quantity"));
        }
        other => panic!("Expected validation error, got {:?}", other),
    }
}

#[test]
fn test_validation_rejects_relative_return_path() {
    let mut config = Config::default();
    config.cart.checkout_return_path = "cart".to_string();

    assert!(config.validate().is_err());
}

#[test]
fn test_deserializes_from_empty_source() {
    // envy maps an empty environment to all-defaults; an empty JSON object
    // exercises the same serde defaults without mutating process env.
    let service: ServiceConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(service.service_name, "bazaarcart-rs");

    let cart: CartConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cart.max_item_quantity, 100);
}

#[test]
fn test_overrides_win_over_defaults() {
    let cart: CartConfig = serde_json::from_str(
        r#"{"checkout_return_path": "/basket", "max_item_quantity": 25}"#,
    )
    .unwrap();

    assert_eq!(cart.checkout_return_path, "/basket");
    assert_eq!(cart.max_item_quantity, 25);
}
