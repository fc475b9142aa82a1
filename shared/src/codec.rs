//! Note codec
//!
//! The backend stores a single free-text `note` per movement. The client
//! packs the counterparty into it as `partner · note` and reads it back out
//! when the backend has no dedicated counterparty attribute. The encoding is
//! lossy: a note that itself contains the separator splits at its first
//! occurrence.

use crate::config::CounterpartyLabels;
use crate::models::{Movement, MovementType};

/// Joins partner and note inside the stored note string
pub const NOTE_SEPARATOR: &str = " · ";

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn is_unknown_label(value: &str, marker: &str) -> bool {
    !marker.is_empty() && value.to_lowercase().contains(&marker.to_lowercase())
}

/// Pack a partner and a note into one string
pub fn compose_note_with_partner(partner: &str, note: &str) -> String {
    let partner = partner.trim();
    let note = note.trim();
    match (partner.is_empty(), note.is_empty()) {
        (false, false) => format!("{}{}{}", partner, NOTE_SEPARATOR, note),
        (false, true) => partner.to_string(),
        _ => note.to_string(),
    }
}

/// First segment of the note. For notes never composed with a partner this
/// is the whole note text.
pub fn extract_counterparty_from_note(note: &str) -> String {
    if is_blank(note) {
        return String::new();
    }
    note.split(NOTE_SEPARATOR)
        .next()
        .map(|first| first.trim().to_string())
        .unwrap_or_default()
}

/// Everything after the first separator, or empty when there is none
pub fn get_movement_note_body(note: &str) -> String {
    if is_blank(note) {
        return String::new();
    }
    match note.split_once(NOTE_SEPARATOR) {
        Some((_, body)) => body.trim().to_string(),
        None => String::new(),
    }
}

/// Display counterparty using the default placeholder labels
pub fn get_movement_counterparty(movement: &Movement) -> String {
    get_movement_counterparty_with(movement, &CounterpartyLabels::default())
}

/// Display counterparty for a movement.
///
/// A meaningful `counterparty` attribute wins, then the partner packed into
/// the note, then an unknown placeholder the backend sent, then the default
/// for the movement type.
pub fn get_movement_counterparty_with(movement: &Movement, labels: &CounterpartyLabels) -> String {
    if let Some(known) = known_counterparty(movement, labels) {
        return known.to_string();
    }

    let from_field = movement
        .counterparty
        .as_deref()
        .map(str::trim)
        .unwrap_or("");

    let from_note = extract_counterparty_from_note(movement.note.as_deref().unwrap_or(""));
    if !from_note.is_empty() {
        return from_note;
    }

    if !from_field.is_empty() {
        return from_field.to_string();
    }

    default_counterparty(&movement.movement_type, labels).to_string()
}

/// The movement's own `counterparty` attribute, trimmed, when it names a
/// real party rather than a placeholder
pub fn known_counterparty<'a>(movement: &'a Movement, labels: &CounterpartyLabels) -> Option<&'a str> {
    movement
        .counterparty
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty() && !is_unknown_label(value, &labels.unknown_marker))
}

/// Placeholder shown when nothing is known about the counterparty
pub fn default_counterparty<'a>(movement_type: &MovementType, labels: &'a CounterpartyLabels) -> &'a str {
    match movement_type {
        MovementType::Sale => labels.unknown_customer.as_str(),
        MovementType::Purchase => labels.unknown_supplier.as_str(),
        MovementType::Other(_) => labels.unknown_party.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn movement(movement_type: MovementType, counterparty: Option<&str>, note: Option<&str>) -> Movement {
        Movement {
            movement_type,
            counterparty: counterparty.map(str::to_string),
            note: note.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_compose_edge_cases() {
        assert_eq!(compose_note_with_partner("", ""), "");
        assert_eq!(compose_note_with_partner("Acme", ""), "Acme");
        assert_eq!(compose_note_with_partner("", "hello"), "hello");
        assert_eq!(compose_note_with_partner("  Acme ", " hello  "), "Acme · hello");
        assert_eq!(compose_note_with_partner("   ", "   "), "");
    }

    #[test]
    fn test_extract_counterparty() {
        assert_eq!(extract_counterparty_from_note(""), "");
        assert_eq!(extract_counterparty_from_note("   "), "");
        assert_eq!(extract_counterparty_from_note("Acme · fatura"), "Acme");
        // A plain note is taken as the partner
        assert_eq!(extract_counterparty_from_note("sayım farkı"), "sayım farkı");
        assert_eq!(extract_counterparty_from_note(" · only body"), "");
    }

    #[test]
    fn test_note_body_keeps_embedded_separators() {
        assert_eq!(get_movement_note_body("Acme"), "");
        assert_eq!(get_movement_note_body(""), "");
        assert_eq!(get_movement_note_body("Acme · a · b "), "a · b");
    }

    #[test]
    fn test_counterparty_attribute_wins() {
        let m = movement(MovementType::Sale, Some(" Beta AŞ "), Some("Acme · x"));
        assert_eq!(get_movement_counterparty(&m), "Beta AŞ");
    }

    #[test]
    fn test_counterparty_from_note_when_attribute_is_placeholder() {
        let m = movement(MovementType::Sale, Some("Bilinmeyen Müşteri"), Some("Acme · x"));
        assert_eq!(get_movement_counterparty(&m), "Acme");
    }

    #[test]
    fn test_unknown_placeholder_returned_as_is() {
        let m = movement(MovementType::Purchase, Some("Bilinmeyen Müşteri"), None);
        assert_eq!(get_movement_counterparty(&m), "Bilinmeyen Müşteri");
        let m = movement(MovementType::Purchase, Some("BILINMEYEN firma"), Some("  "));
        assert_eq!(get_movement_counterparty(&m), "BILINMEYEN firma");
    }

    #[test]
    fn test_type_defaults() {
        let labels = CounterpartyLabels::default();
        assert_eq!(
            get_movement_counterparty(&movement(MovementType::Sale, None, None)),
            labels.unknown_customer
        );
        assert_eq!(
            get_movement_counterparty(&movement(MovementType::Purchase, Some("  "), None)),
            labels.unknown_supplier
        );
        assert_eq!(
            get_movement_counterparty(&movement(MovementType::from("IADE"), None, None)),
            labels.unknown_party
        );
    }

    #[test]
    fn test_custom_labels() {
        let labels = CounterpartyLabels {
            unknown_marker: "unknown".to_string(),
            unknown_customer: "Unknown customer".to_string(),
            unknown_supplier: "Unknown supplier".to_string(),
            unknown_party: "Unknown".to_string(),
        };
        let m = movement(MovementType::Sale, Some("Unknown buyer"), None);
        assert_eq!(get_movement_counterparty_with(&m, &labels), "Unknown buyer");
        let m = movement(MovementType::Sale, None, None);
        assert_eq!(get_movement_counterparty_with(&m, &labels), "Unknown customer");
    }

    fn partner_strategy() -> impl Strategy<Value = String> {
        "[A-Za-z0-9çğıöşüÇĞİÖŞÜ .&-]{0,30}"
            .prop_filter("partner must have content", |s| !s.trim().is_empty())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_extract_recovers_partner(partner in partner_strategy(), note in ".{0,40}") {
            let composed = compose_note_with_partner(&partner, &note);
            prop_assert_eq!(extract_counterparty_from_note(&composed), partner.trim());
        }

        #[test]
        fn prop_body_recovers_note(
            partner in partner_strategy(),
            note in ".{0,40}".prop_filter("note must have content", |s| !s.trim().is_empty()),
        ) {
            let composed = compose_note_with_partner(&partner, &note);
            prop_assert_eq!(get_movement_note_body(&composed), note.trim());
        }
    }
}
