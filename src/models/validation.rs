use super::errors::{ValidationError, ValidationResult};

/// Validate a session identifier
pub fn validate_session_id(session_id: &str) -> ValidationResult<()> {
    if session_id.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "session_id".to_string(),
        });
    }
    Ok(())
}

/// Validate an item identifier
pub fn validate_item_id(item_id: &str) -> ValidationResult<()> {
    if item_id.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "item_id".to_string(),
        });
    }
    Ok(())
}

/// Validate a vendor identifier
pub fn validate_vendor_id(vendor_id: &str) -> ValidationResult<()> {
    if vendor_id.trim().is_empty() {
        return Err(ValidationError::RequiredField {
            field: "vendor_id".to_string(),
        });
    }
    Ok(())
}

/// Validate a requested cart quantity against the configured cap.
///
/// Zero is allowed: a zero quantity is the remove path.
pub fn validate_cart_quantity(quantity: u32, max: u32) -> ValidationResult<()> {
    if quantity > max {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            max: max.to_string(),
            value: quantity.to_string(),
        });
    }
    Ok(())
}
