//! Validation utilities for the LabStock platform
//!
//! Plain functions shared by the backend and the clients so both sides agree
//! on what a well-formed input looks like before it reaches the server.

use rust_decimal::Decimal;

// ============================================================================
// Quantity Validations
// ============================================================================

/// Validate a requested quantity (must be strictly positive)
pub fn validate_cantidad(cantidad: Decimal) -> Result<(), &'static str> {
    if cantidad <= Decimal::ZERO {
        return Err("Quantity must be positive");
    }
    Ok(())
}

/// Validate a delivered quantity against the requested quantity.
/// Delivering zero is allowed (full shortfall); exceeding the request is not.
pub fn validate_cantidad_entregada(
    entregada: Decimal,
    solicitada: Decimal,
) -> Result<(), &'static str> {
    if entregada < Decimal::ZERO {
        return Err("Delivered quantity cannot be negative");
    }
    if entregada > solicitada {
        return Err("Delivered quantity cannot exceed requested quantity");
    }
    Ok(())
}

/// Validate a returned quantity against an outstanding debt balance
pub fn validate_devolucion(
    devuelta: Decimal,
    pendiente: Decimal,
) -> Result<(), &'static str> {
    if devuelta <= Decimal::ZERO {
        return Err("Returned quantity must be positive");
    }
    if devuelta > pendiente {
        return Err("Returned quantity cannot exceed outstanding balance");
    }
    Ok(())
}

// ============================================================================
// General Validations
// ============================================================================

/// Validate email format (basic check)
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if email.contains('@') && email.contains('.') && email.len() >= 5 {
        Ok(())
    } else {
        Err("Invalid email format")
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters");
    }
    Ok(())
}

/// Validate a folio format: `SOL-<year>-<six digits>`
pub fn validate_folio(folio: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = folio.split('-').collect();
    if parts.len() != 3 || parts[0] != "SOL" {
        return Err("Folio must look like SOL-2025-000123");
    }
    if parts[1].len() != 4 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Folio year must be four digits");
    }
    if parts[2].len() != 6 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Folio sequence must be six digits");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn cantidad_must_be_positive() {
        assert!(validate_cantidad(dec("0.5")).is_ok());
        assert!(validate_cantidad(Decimal::ZERO).is_err());
        assert!(validate_cantidad(dec("-1")).is_err());
    }

    #[test]
    fn entregada_bounded_by_solicitada() {
        assert!(validate_cantidad_entregada(dec("300"), dec("500")).is_ok());
        assert!(validate_cantidad_entregada(dec("500"), dec("500")).is_ok());
        assert!(validate_cantidad_entregada(Decimal::ZERO, dec("500")).is_ok());
        assert!(validate_cantidad_entregada(dec("501"), dec("500")).is_err());
        assert!(validate_cantidad_entregada(dec("-1"), dec("500")).is_err());
    }

    #[test]
    fn devolucion_bounded_by_pendiente() {
        assert!(validate_devolucion(dec("200"), dec("200")).is_ok());
        assert!(validate_devolucion(dec("201"), dec("200")).is_err());
        assert!(validate_devolucion(Decimal::ZERO, dec("200")).is_err());
    }

    #[test]
    fn valid_folios() {
        assert!(validate_folio("SOL-2025-000123").is_ok());
        assert!(validate_folio("SOL-1999-999999").is_ok());
    }

    #[test]
    fn invalid_folios() {
        assert!(validate_folio("SOL-25-000123").is_err());
        assert!(validate_folio("VAL-2025-000123").is_err());
        assert!(validate_folio("SOL-2025-123").is_err());
        assert!(validate_folio("SOL-2025-ABCDEF").is_err());
    }

    #[test]
    fn email_and_password_checks() {
        assert!(validate_email("ana@uni.edu").is_ok());
        assert!(validate_email("ana").is_err());
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }
}
