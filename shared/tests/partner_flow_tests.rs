//! Counterparty flow tests
//!
//! Exercises the path from the stock dialog to the movement history:
//! - Submitting a stock change records a pending partner
//! - The confirmed movement is matched back to it and remembered by id
//! - Pending entries are consumed once and expire after the window

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use shared::clock::ManualClock;
use shared::config::ClientConfig;
use shared::history::build_movement_rows;
use shared::storage::MemoryStore;
use shared::{
    compose_note_with_partner, extract_counterparty_from_note, Movement, MovementType,
    PartnerReconciler, StockChangeForm, StockDirection,
};

const T0: i64 = 1_714_557_600_000;
const MINUTE: i64 = 60 * 1000;

fn backend_movement(json: &str) -> Movement {
    serde_json::from_str(json).unwrap()
}

// ============================================================================
// End-to-end
// ============================================================================

#[test]
fn test_submitted_partner_is_shown_for_confirmed_movement() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let config = ClientConfig::from_json("{}").unwrap();
    let reconciler = PartnerReconciler::with_config(&store, &clock, config.partner_cache.clone());

    // User adds 10 units of product 5 bought from Acme Ltd
    let submission = StockChangeForm {
        product_id: 5,
        direction: StockDirection::Increase,
        amount: 10,
        partner: "Acme Ltd".to_string(),
        note: String::new(),
    }
    .into_submission()
    .unwrap();
    assert_eq!(submission.request.note, "Acme Ltd");
    reconciler.add_pending_partner(&submission.pending.unwrap());
    assert_eq!(reconciler.pending_entries().len(), 1);

    // Backend returns the movement two seconds later without a counterparty
    clock.advance(2_000);
    let movement = backend_movement(&format!(
        r#"{{"id": 77, "productId": 5, "type": "SATIN_ALMA", "quantity": 10, "createdAt": {}}}"#,
        T0 + 2_000
    ));

    let matched = reconciler.match_pending_partner(&movement).unwrap();
    assert_eq!(matched.partner, "Acme Ltd");
    assert!(reconciler.pending_entries().is_empty());
}

#[test]
fn test_history_rows_remember_resolved_partner() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    let config = ClientConfig::from_json("{}").unwrap();
    let reconciler = PartnerReconciler::with_config(&store, &clock, config.partner_cache.clone());

    let submission = StockChangeForm {
        product_id: 5,
        direction: StockDirection::Decrease,
        amount: 4,
        partner: "Beta AŞ".to_string(),
        note: "2 koli".to_string(),
    }
    .into_submission()
    .unwrap();
    reconciler.add_pending_partner(&submission.pending.unwrap());

    clock.advance(5_000);
    let movements = vec![backend_movement(&format!(
        r#"{{"id": 81, "product": {{"id": 5, "name": "Conta"}}, "type": "SATIS", "quantity": -4, "createdAt": "{}"}}"#,
        Utc.timestamp_millis_opt(T0 + 3_000).unwrap().to_rfc3339()
    ))];

    let rows = build_movement_rows(&reconciler, &movements, &config.labels);
    assert_eq!(rows[0].counterparty, "Beta AŞ");
    assert_eq!(rows[0].quantity, 4);

    // Hours later the pending entry would have expired, but the id cache holds
    clock.advance(6 * 60 * MINUTE);
    let rows = build_movement_rows(&reconciler, &movements, &config.labels);
    assert_eq!(rows[0].counterparty, "Beta AŞ");
}

#[test]
fn test_cache_survives_a_new_reconciler_on_the_same_store() {
    let store = MemoryStore::new();
    let clock = ManualClock::new(T0);
    PartnerReconciler::new(&store, &clock).store_movement_partner(12, "Gamma");

    // A page reload builds a fresh reconciler over the same storage
    let reloaded = PartnerReconciler::new(&store, &clock);
    assert_eq!(reloaded.get_stored_movement_partner(12), "Gamma");
}

#[test]
fn test_unknown_label_counterparty_without_note() {
    let movement = backend_movement(
        r#"{"id": 3, "productId": 1, "type": "SATIS", "quantity": 1, "counterparty": "Bilinmeyen Müşteri"}"#,
    );
    assert_eq!(shared::get_movement_counterparty(&movement), "Bilinmeyen Müşteri");
    assert_eq!(movement.movement_type, MovementType::Sale);
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Entries younger than the window always match a movement stamped at
    /// submission time; older ones never do.
    #[test]
    fn prop_expiry_follows_the_window(age in 0i64..(20 * MINUTE)) {
        let store = MemoryStore::new();
        let clock = ManualClock::new(T0);
        let reconciler = PartnerReconciler::new(&store, &clock);
        reconciler.add_pending_partner(&shared::PendingPartner {
            product_id: 1,
            movement_type: MovementType::Purchase,
            quantity: 2,
            partner: "Acme".to_string(),
        });

        clock.advance(age);
        let movement = Movement {
            id: Some(1),
            product_id: Some(1),
            movement_type: MovementType::Purchase,
            quantity: 2,
            created_at: Utc.timestamp_millis_opt(T0).single(),
            ..Default::default()
        };
        let matched = reconciler.match_pending_partner(&movement).is_some();
        prop_assert_eq!(matched, age <= 10 * MINUTE);
    }

    /// Any number of identical submissions is consumed exactly once each
    #[test]
    fn prop_each_entry_matches_once(count in 1usize..6) {
        let store = MemoryStore::new();
        let clock = ManualClock::new(T0);
        let reconciler = PartnerReconciler::new(&store, &clock);
        for i in 0..count {
            reconciler.add_pending_partner(&shared::PendingPartner {
                product_id: 9,
                movement_type: MovementType::Sale,
                quantity: 1,
                partner: format!("P{}", i),
            });
        }

        let movement = Movement {
            product_id: Some(9),
            movement_type: MovementType::Sale,
            quantity: -1,
            created_at: Utc.timestamp_millis_opt(T0).single(),
            ..Default::default()
        };
        let partners: Vec<String> = (0..count + 1)
            .filter_map(|_| reconciler.match_pending_partner(&movement))
            .map(|e| e.partner)
            .collect();
        let expected: Vec<String> = (0..count).map(|i| format!("P{}", i)).collect();
        prop_assert_eq!(partners, expected);
    }

    #[test]
    fn prop_partner_survives_note_encoding(
        partner in "[A-Za-z][A-Za-z0-9 ]{0,20}",
        note in "[a-z0-9 ]{0,20}",
    ) {
        let composed = compose_note_with_partner(&partner, &note);
        prop_assert_eq!(extract_counterparty_from_note(&composed), partner.trim());
    }
}
