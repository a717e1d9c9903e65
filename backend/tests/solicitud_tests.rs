//! Solicitud lifecycle tests
//!
//! Tests for the request state machine including:
//! - Legal and illegal state transitions
//! - Delivery quantity validation and shortfall computation
//! - Folio format

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::{validate_cantidad, validate_cantidad_entregada, validate_folio, EstadoSolicitud};

// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

const ALL_STATES: [EstadoSolicitud; 7] = [
    EstadoSolicitud::Pendiente,
    EstadoSolicitud::Aprobada,
    EstadoSolicitud::EntregaPendiente,
    EstadoSolicitud::Entregada,
    EstadoSolicitud::Rechazada,
    EstadoSolicitud::Cancelado,
    EstadoSolicitud::SinRecoleccion,
];

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test the happy path of a student request
    #[test]
    fn test_student_request_happy_path() {
        assert!(EstadoSolicitud::Pendiente.can_transition_to(EstadoSolicitud::Aprobada));
        assert!(EstadoSolicitud::Aprobada.can_transition_to(EstadoSolicitud::EntregaPendiente));
        assert!(EstadoSolicitud::EntregaPendiente.can_transition_to(EstadoSolicitud::Entregada));
    }

    /// Test rejection is legal before delivery readiness only
    #[test]
    fn test_rejection_window() {
        assert!(EstadoSolicitud::Pendiente.can_transition_to(EstadoSolicitud::Rechazada));
        assert!(EstadoSolicitud::Aprobada.can_transition_to(EstadoSolicitud::Rechazada));
        assert!(!EstadoSolicitud::EntregaPendiente.can_transition_to(EstadoSolicitud::Rechazada));
        assert!(!EstadoSolicitud::Entregada.can_transition_to(EstadoSolicitud::Rechazada));
    }

    /// Test cancellation windows
    #[test]
    fn test_cancellation_window() {
        assert!(EstadoSolicitud::Pendiente.can_transition_to(EstadoSolicitud::Cancelado));
        assert!(EstadoSolicitud::EntregaPendiente.can_transition_to(EstadoSolicitud::Cancelado));
        assert!(!EstadoSolicitud::Aprobada.can_transition_to(EstadoSolicitud::Cancelado));
        assert!(!EstadoSolicitud::Entregada.can_transition_to(EstadoSolicitud::Cancelado));
    }

    /// Test expiry is only reachable from delivery readiness
    #[test]
    fn test_expiry_source_state() {
        for from in ALL_STATES {
            let legal = from.can_transition_to(EstadoSolicitud::SinRecoleccion);
            assert_eq!(legal, from == EstadoSolicitud::EntregaPendiente);
        }
    }

    /// Test terminal states have no outgoing edges
    #[test]
    fn test_terminal_states_are_sinks() {
        let terminals = [
            EstadoSolicitud::Entregada,
            EstadoSolicitud::Rechazada,
            EstadoSolicitud::Cancelado,
            EstadoSolicitud::SinRecoleccion,
        ];

        for from in terminals {
            assert!(from.is_terminal());
            for to in ALL_STATES {
                assert!(!from.can_transition_to(to));
            }
        }
    }

    /// Test no state transitions to itself
    #[test]
    fn test_no_self_transitions() {
        for state in ALL_STATES {
            assert!(!state.can_transition_to(state));
        }
    }

    /// Test delivered quantity bounds
    #[test]
    fn test_delivered_quantity_bounds() {
        let solicitada = dec("500.0");

        assert!(validate_cantidad_entregada(dec("500.0"), solicitada).is_ok());
        assert!(validate_cantidad_entregada(dec("300.0"), solicitada).is_ok());
        assert!(validate_cantidad_entregada(Decimal::ZERO, solicitada).is_ok());
        assert!(validate_cantidad_entregada(dec("500.1"), solicitada).is_err());
        assert!(validate_cantidad_entregada(dec("-1.0"), solicitada).is_err());
    }

    /// Test folio format
    #[test]
    fn test_folio_format() {
        assert!(validate_folio("SOL-2026-000001").is_ok());
        assert!(validate_folio("SOL-2026-123456").is_ok());
        assert!(validate_folio("SOL-26-000001").is_err());
        assert!(validate_folio("2026-000001").is_err());
        assert!(validate_folio("SOL-2026-1").is_err());
    }

    /// Test state string round-trip
    #[test]
    fn test_state_string_round_trip() {
        for state in ALL_STATES {
            assert_eq!(EstadoSolicitud::parse(state.as_str()), Some(state));
        }
        assert_eq!(EstadoSolicitud::parse("unknown"), None);
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

    fn state_strategy() -> impl Strategy<Value = EstadoSolicitud> {
        prop::sample::select(ALL_STATES.to_vec())
    }

    proptest! {
        /// Property: the transition relation is acyclic; no state can reach
        /// itself again
        #[test]
        fn prop_no_cycles(start in state_strategy()) {
            let mut reachable = Vec::new();
            let mut frontier = vec![start];

            while let Some(from) = frontier.pop() {
                for to in ALL_STATES {
                    if from.can_transition_to(to) && !reachable.contains(&to) {
                        reachable.push(to);
                        frontier.push(to);
                    }
                }
            }

            prop_assert!(!reachable.contains(&start), "cycle through {:?}", start);
        }

        /// Property: terminal states never transition
        #[test]
        fn prop_terminal_means_sink(from in state_strategy(), to in state_strategy()) {
            if from.is_terminal() {
                prop_assert!(!from.can_transition_to(to));
            }
        }

        /// Property: shortfall is requested minus delivered, never negative
        #[test]
        fn prop_shortfall_non_negative(
            solicitada in quantity_strategy(),
            fraction in 0u32..=100u32
        ) {
            let entregada = solicitada * Decimal::from(fraction) / Decimal::from(100u32);
            prop_assert!(validate_cantidad_entregada(entregada, solicitada).is_ok());

            let faltante = solicitada - entregada;
            prop_assert!(faltante >= Decimal::ZERO);
            prop_assert_eq!(entregada + faltante, solicitada);
        }

        /// Property: over-delivery is always rejected
        #[test]
        fn prop_over_delivery_rejected(
            solicitada in quantity_strategy(),
            excess in quantity_strategy()
        ) {
            prop_assert!(validate_cantidad_entregada(solicitada + excess, solicitada).is_err());
        }
    }
}

// ============================================================================
// Integration Test Helpers (for use with actual database)
// ============================================================================

#[cfg(test)]
mod integration_helpers {
    use super::*;

    /// Simulate the approval decision for a request
    pub fn simulate_approval(estado: EstadoSolicitud) -> Result<EstadoSolicitud, &'static str> {
        if !estado.can_transition_to(EstadoSolicitud::Aprobada) {
            return Err("request is not pending approval");
        }
        // Approval immediately readies the request for pickup
        Ok(EstadoSolicitud::EntregaPendiente)
    }

    #[test]
    fn test_simulate_approval_from_pending() {
        let result = simulate_approval(EstadoSolicitud::Pendiente).unwrap();
        assert_eq!(result, EstadoSolicitud::EntregaPendiente);
    }

    #[test]
    fn test_simulate_approval_rejected_elsewhere() {
        assert!(simulate_approval(EstadoSolicitud::Entregada).is_err());
        assert!(simulate_approval(EstadoSolicitud::EntregaPendiente).is_err());
        assert!(simulate_approval(EstadoSolicitud::Cancelado).is_err());
    }

    /// Simulate the janitor's expiry cutoff for unclaimed pickups
    pub fn is_expired(
        estado: EstadoSolicitud,
        fecha_recoleccion: chrono::NaiveDate,
        today: chrono::NaiveDate,
        grace_days: i64,
    ) -> bool {
        estado == EstadoSolicitud::EntregaPendiente
            && fecha_recoleccion < today - chrono::Duration::days(grace_days)
    }

    #[test]
    fn test_expiry_cutoff_respects_grace() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let pickup = chrono::NaiveDate::from_ymd_opt(2026, 3, 8).unwrap();

        assert!(is_expired(EstadoSolicitud::EntregaPendiente, pickup, today, 1));
        assert!(!is_expired(EstadoSolicitud::EntregaPendiente, pickup, today, 2));
        // The grace day itself has not elapsed
        let yesterday = chrono::NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert!(!is_expired(EstadoSolicitud::EntregaPendiente, yesterday, today, 1));
    }

    #[test]
    fn test_expiry_only_applies_to_unclaimed_pickups() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let long_ago = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();

        assert!(!is_expired(EstadoSolicitud::Pendiente, long_ago, today, 1));
        assert!(!is_expired(EstadoSolicitud::Entregada, long_ago, today, 1));
    }

    /// Simulate item initialization at request creation. The delivered
    /// quantity starts equal to the requested quantity; only the delivery
    /// step reduces it.
    pub fn simulate_alta_item(
        cantidad_solicitada: Decimal,
    ) -> Result<(Decimal, Decimal), &'static str> {
        validate_cantidad(cantidad_solicitada)?;
        Ok((cantidad_solicitada, cantidad_solicitada))
    }

    #[test]
    fn test_new_items_start_at_the_requested_quantity() {
        let (solicitada, entregada) = simulate_alta_item(dec("500.0")).unwrap();
        assert_eq!(entregada, solicitada);

        // Reading a request before delivery must not show a zero
        assert_ne!(entregada, Decimal::ZERO);
    }

    #[test]
    fn test_new_items_reject_non_positive_quantities() {
        assert!(simulate_alta_item(Decimal::ZERO).is_err());
        assert!(simulate_alta_item(dec("-1.0")).is_err());
    }

    /// Simulate one janitor expiry pass over a batch of requests. Returns
    /// the expired indices paired with their notices; the pass stores both
    /// together, so the pairing holds for every request in the batch.
    pub fn simulate_expiry_pass(
        requests: &[(EstadoSolicitud, chrono::NaiveDate)],
        today: chrono::NaiveDate,
        grace_days: i64,
    ) -> Vec<(usize, String)> {
        requests
            .iter()
            .enumerate()
            .filter(|(_, (estado, pickup))| is_expired(*estado, *pickup, today, grace_days))
            .map(|(i, _)| (i, format!("solicitud {} expiró por falta de recolección", i)))
            .collect()
    }

    #[test]
    fn test_expiry_pass_notifies_every_expired_request_once() {
        let today = chrono::NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
        let stale = chrono::NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let fresh = chrono::NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();

        let requests = [
            (EstadoSolicitud::EntregaPendiente, stale),
            (EstadoSolicitud::EntregaPendiente, fresh),
            (EstadoSolicitud::Entregada, stale),
            (EstadoSolicitud::EntregaPendiente, stale),
        ];

        let notices = simulate_expiry_pass(&requests, today, 1);
        let indices: Vec<usize> = notices.iter().map(|(i, _)| *i).collect();

        assert_eq!(indices, vec![0, 3]);
        for (_, mensaje) in &notices {
            assert!(mensaje.contains("falta de recolección"));
        }
    }
}
