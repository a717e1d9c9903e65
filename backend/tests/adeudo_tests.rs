//! Material debt tests
//!
//! Tests for debt tracking including:
//! - Return quantity validation
//! - Debt settlement on full return
//! - Debts never restock the ledger

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::validate_devolucion;

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test return quantity bounds
    #[test]
    fn test_return_quantity_bounds() {
        let pendiente = dec("5.0");

        assert!(validate_devolucion(dec("5.0"), pendiente).is_ok());
        assert!(validate_devolucion(dec("2.5"), pendiente).is_ok());
        assert!(validate_devolucion(Decimal::ZERO, pendiente).is_err());
        assert!(validate_devolucion(dec("-1.0"), pendiente).is_err());
        assert!(validate_devolucion(dec("5.1"), pendiente).is_err());
    }

    /// Test partial return leaves a remainder
    #[test]
    fn test_partial_return_remainder() {
        let pendiente = dec("10.0");
        let devuelto = dec("4.0");

        assert!(validate_devolucion(devuelto, pendiente).is_ok());
        assert_eq!(pendiente - devuelto, dec("6.0"));
    }

    /// Test full return settles the debt exactly
    #[test]
    fn test_full_return_settles() {
        let pendiente = dec("3.250");

        assert!(validate_devolucion(pendiente, pendiente).is_ok());
        assert_eq!(pendiente - pendiente, Decimal::ZERO);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    fn quantity_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..=1_000_000i64).prop_map(|n| Decimal::new(n, 3))
    }

    proptest! {
        /// Property: a valid return never leaves a negative remainder
        #[test]
        fn prop_remainder_non_negative(
            pendiente in quantity_strategy(),
            fraction in 1u32..=100u32
        ) {
            let devuelto = pendiente * Decimal::from(fraction) / Decimal::from(100u32);
            if validate_devolucion(devuelto, pendiente).is_ok() {
                prop_assert!(pendiente - devuelto >= Decimal::ZERO);
            }
        }

        /// Property: returning more than owed is always rejected
        #[test]
        fn prop_over_return_rejected(
            pendiente in quantity_strategy(),
            excess in quantity_strategy()
        ) {
            prop_assert!(validate_devolucion(pendiente + excess, pendiente).is_err());
        }

        /// Property: sequential partial returns settle iff they sum to the
        /// original debt
        #[test]
        fn prop_sequential_returns(
            parts in prop::collection::vec(quantity_strategy(), 1..10)
        ) {
            let total: Decimal = parts.iter().sum();
            let mut pendiente = total;

            for part in &parts {
                prop_assert!(validate_devolucion(*part, pendiente).is_ok());
                pendiente -= *part;
            }

            prop_assert_eq!(pendiente, Decimal::ZERO);
        }
    }
}

// ============================================================================
// Integration Test Helpers (for use with actual database)
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;

    /// Simulate applying a return against a debt; `None` means settled
    pub fn simulate_return(
        pendiente: Decimal,
        devuelto: Decimal,
    ) -> Result<Option<Decimal>, &'static str> {
        validate_devolucion(devuelto, pendiente)?;

        let restante = pendiente - devuelto;
        if restante.is_zero() {
            Ok(None)
        } else {
            Ok(Some(restante))
        }
    }

    #[test]
    fn test_simulate_return_partial() {
        let remaining = simulate_return(dec("10.0"), dec("3.0")).unwrap();
        assert_eq!(remaining, Some(dec("7.0")));
    }

    #[test]
    fn test_simulate_return_settles() {
        let remaining = simulate_return(dec("10.0"), dec("10.0")).unwrap();
        assert_eq!(remaining, None);
    }

    #[test]
    fn test_simulate_return_rejects_overage() {
        assert!(simulate_return(dec("10.0"), dec("10.001")).is_err());
    }
}
