//! Counterparty cache records

use serde::{Deserialize, Serialize};

use super::MovementType;
use crate::types::{EntityId, TimestampMillis};

/// Stock-change parameters captured at submission time, before the
/// backend has assigned a movement id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingPartner {
    pub product_id: EntityId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: i64,
    pub partner: String,
}

/// A submitted movement waiting to be matched to its server record.
///
/// Serialized in the same camelCase layout the browser cache has always used.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PendingPartnerEntry {
    pub product_id: EntityId,
    #[serde(rename = "type")]
    pub movement_type: MovementType,
    pub quantity: u64,
    pub partner: String,
    pub created_at: TimestampMillis,
}

impl PendingPartnerEntry {
    /// Build an entry stamped at `created_at`. Returns `None` for a blank
    /// partner since an entry without a counterparty has nothing to offer.
    pub fn from_pending(pending: &PendingPartner, created_at: TimestampMillis) -> Option<Self> {
        let partner = pending.partner.trim();
        if partner.is_empty() {
            return None;
        }
        Some(Self {
            product_id: pending.product_id,
            movement_type: pending.movement_type.clone(),
            quantity: pending.quantity.unsigned_abs(),
            partner: partner.to_string(),
            created_at,
        })
    }
}

/// Counterparty confirmed for a specific movement id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPartnerRecord {
    pub partner: String,
    pub saved_at: TimestampMillis,
}
