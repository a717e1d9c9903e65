//! Authentication and role tests
//!
//! Tests for account rules including:
//! - Role parsing and request eligibility
//! - Email and password validation

use proptest::prelude::*;

use shared::{validate_email, validate_password, Role};

const ALL_ROLES: [Role; 4] = [Role::Student, Role::Teacher, Role::Storekeeper, Role::Admin];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test role string round-trip
    #[test]
    fn test_role_round_trip() {
        for role in ALL_ROLES {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("superuser"), None);
    }

    /// Test which roles may open requests
    #[test]
    fn test_request_eligibility() {
        assert!(Role::Student.can_request());
        assert!(Role::Teacher.can_request());
        assert!(!Role::Storekeeper.can_request());
        assert!(!Role::Admin.can_request());
    }

    /// Test email validation
    #[test]
    fn test_email_validation() {
        assert!(validate_email("ana@uni.edu.mx").is_ok());
        assert!(validate_email("ana").is_err());
        assert!(validate_email("").is_err());
        assert!(validate_email("ana.uni.mx").is_err());
        assert!(validate_email("ana@uni").is_err());
    }

    /// Test password validation
    #[test]
    fn test_password_validation() {
        assert!(validate_password("correct-horse-battery").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password("").is_err());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        /// Property: role serialization is stable under round-trip
        #[test]
        fn prop_role_round_trip(idx in 0usize..4) {
            let role = ALL_ROLES[idx];
            prop_assert_eq!(Role::parse(role.as_str()), Some(role));
        }

        /// Property: short passwords are always rejected
        #[test]
        fn prop_short_passwords_rejected(password in "[a-zA-Z0-9]{0,7}") {
            prop_assert!(validate_password(&password).is_err());
        }

        /// Property: emails without an at-sign are always rejected
        #[test]
        fn prop_email_needs_at(local in "[a-z]{1,20}") {
            prop_assert!(validate_email(&local).is_err());
        }
    }
}
