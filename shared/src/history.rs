//! Movement history rows for list and report views

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::codec::{get_movement_counterparty_with, get_movement_note_body, known_counterparty};
use crate::config::CounterpartyLabels;
use crate::models::{Movement, MovementType};
use crate::reconcile::PartnerReconciler;
use crate::storage::KeyValueStore;
use crate::types::EntityId;

/// Whether a movement adds to or removes from stock
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementDirection {
    In,
    Out,
}

impl MovementDirection {
    /// Purchases come in and sales go out; other types follow the sign
    pub fn of(movement: &Movement) -> Self {
        match movement.movement_type {
            MovementType::Purchase => MovementDirection::In,
            MovementType::Sale => MovementDirection::Out,
            MovementType::Other(_) if movement.quantity < 0 => MovementDirection::Out,
            MovementType::Other(_) => MovementDirection::In,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MovementDirection::In => "Giriş",
            MovementDirection::Out => "Çıkış",
        }
    }
}

/// One display-ready line of the movement history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MovementRow {
    pub id: Option<EntityId>,
    pub product_name: String,
    pub quantity: u64,
    pub direction: MovementDirection,
    pub type_label: String,
    pub counterparty: String,
    pub note_body: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Resolve the counterparty for a movement.
///
/// A backend attribute that carries a real name wins. Next comes a partner
/// already remembered for the movement id. Otherwise a pending submission
/// is matched and, when the movement has an id, remembered for next time.
/// Finally the note codec and the placeholder labels decide.
pub fn resolve_counterparty<S, C>(
    reconciler: &PartnerReconciler<S, C>,
    movement: &Movement,
    labels: &CounterpartyLabels,
) -> String
where
    S: KeyValueStore,
    C: Clock,
{
    if let Some(known) = known_counterparty(movement, labels) {
        return known.to_string();
    }

    if let Some(id) = movement.id {
        let stored = reconciler.get_stored_movement_partner(id);
        if !stored.is_empty() {
            return stored;
        }
    }

    if let Some(entry) = reconciler.match_pending_partner(movement) {
        if let Some(id) = movement.id {
            reconciler.store_movement_partner(id, &entry.partner);
        }
        return entry.partner;
    }

    get_movement_counterparty_with(movement, labels)
}

/// Build rows in the order the backend returned the movements
pub fn build_movement_rows<S, C>(
    reconciler: &PartnerReconciler<S, C>,
    movements: &[Movement],
    labels: &CounterpartyLabels,
) -> Vec<MovementRow>
where
    S: KeyValueStore,
    C: Clock,
{
    movements
        .iter()
        .map(|movement| MovementRow {
            id: movement.id,
            product_name: movement.product_name().to_string(),
            quantity: movement.magnitude(),
            direction: MovementDirection::of(movement),
            type_label: movement.movement_type.display_label().to_string(),
            counterparty: resolve_counterparty(reconciler, movement, labels),
            note_body: get_movement_note_body(movement.note.as_deref().unwrap_or("")),
            created_at: movement.created_at,
        })
        .collect()
}
