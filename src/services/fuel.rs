// SPDX-License-Identifier: MIT

//! Fuel ledger calculator.
//!
//! Derives the leftover quantity for a fuel transaction before it is
//! persisted. Truck replenishment adds to the quantity on hand; everything
//! else dispenses from it and must not exceed what is available.

use crate::error::AppError;
use crate::models::CustomerType;

/// Compute the quantity left in the truck after a transaction.
///
/// Pure and deterministic. Dispensing never produces a negative result
/// because the precondition `start_quantity >= liters` is enforced here.
pub fn compute_left_over(
    start_quantity: f64,
    liters: f64,
    customer_type: CustomerType,
) -> Result<f64, AppError> {
    if !start_quantity.is_finite() || !liters.is_finite() {
        return Err(AppError::Validation(
            "quantity must be a number".to_string(),
        ));
    }
    if liters <= 0.0 {
        return Err(AppError::Validation(
            "quantity must be positive".to_string(),
        ));
    }
    if start_quantity < 0.0 {
        return Err(AppError::Validation(
            "start quantity must not be negative".to_string(),
        ));
    }

    if customer_type.is_dispensing() {
        if start_quantity < liters {
            return Err(AppError::Validation(
                "dispensed amount exceeds available quantity".to_string(),
            ));
        }
        Ok(start_quantity - liters)
    } else {
        // Replenishment: no upper bound on the truck.
        Ok(start_quantity + liters)
    }
}

/// Round a quantity to one decimal place for display.
///
/// Stored values keep full precision; only presentation is rounded.
pub fn display_quantity(quantity: f64) -> f64 {
    (quantity * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_dispense() {
        let left = compute_left_over(65.0, 25.5, CustomerType::Company).unwrap();
        assert_eq!(left, 39.5);
    }

    #[test]
    fn test_external_dispense() {
        let left = compute_left_over(100.0, 40.0, CustomerType::External).unwrap();
        assert_eq!(left, 60.0);
    }

    #[test]
    fn test_refueling_adds() {
        let left = compute_left_over(120.0, 35.0, CustomerType::Refueling).unwrap();
        assert_eq!(left, 155.0);
    }

    #[test]
    fn test_dispense_entire_quantity() {
        let left = compute_left_over(50.0, 50.0, CustomerType::Company).unwrap();
        assert_eq!(left, 0.0);
    }

    #[test]
    fn test_dispense_exceeding_available_fails() {
        let err = compute_left_over(10.0, 25.0, CustomerType::Company).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("exceeds available"));
    }

    #[test]
    fn test_refueling_has_no_upper_bound() {
        // Same inputs that fail for dispensing are fine for replenishment.
        let left = compute_left_over(10.0, 25.0, CustomerType::Refueling).unwrap();
        assert_eq!(left, 35.0);
    }

    #[test]
    fn test_zero_liters_rejected() {
        let err = compute_left_over(65.0, 0.0, CustomerType::Company).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("must be positive"));
    }

    #[test]
    fn test_negative_liters_rejected() {
        let err = compute_left_over(65.0, -5.0, CustomerType::Refueling).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_negative_start_quantity_rejected() {
        let err = compute_left_over(-1.0, 5.0, CustomerType::Refueling).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_nan_rejected() {
        let err = compute_left_over(f64::NAN, 5.0, CustomerType::Company).unwrap_err();
        assert!(err.to_string().contains("must be a number"));

        let err = compute_left_over(65.0, f64::INFINITY, CustomerType::Company).unwrap_err();
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn test_dispense_never_negative() {
        for (start, liters) in [(100.0, 99.9), (0.5, 0.5), (1000.0, 1.0)] {
            let left = compute_left_over(start, liters, CustomerType::External).unwrap();
            assert!(left >= 0.0, "start={start} liters={liters} left={left}");
        }
    }

    #[test]
    fn test_stored_precision_vs_display_rounding() {
        let left = compute_left_over(100.0, 0.25, CustomerType::Company).unwrap();
        assert_eq!(left, 99.75);
        assert_eq!(display_quantity(left), 99.8);
    }

    #[test]
    fn test_display_quantity_rounding() {
        assert_eq!(display_quantity(39.44), 39.4);
        assert_eq!(display_quantity(39.45), 39.5);
        assert_eq!(display_quantity(155.0), 155.0);
    }
}
