//! Pending-partner reconciliation
//!
//! When the user submits a stock change the client knows the counterparty,
//! but the movement id the backend will assign is not known yet. A pending
//! entry is recorded by content and later matched against the movement
//! history by `(type, product, |quantity|)` within a time window. Once a
//! movement id is known the partner can be remembered for that id directly.
//!
//! Everything here is best-effort: storage failures read as an empty cache
//! and are only logged.

use std::collections::BTreeMap;

use crate::clock::Clock;
use crate::config::PartnerCacheConfig;
use crate::models::{Movement, PendingPartner, PendingPartnerEntry, ResolvedPartnerRecord};
use crate::storage::{read_json_or, write_json, KeyValueStore};
use crate::types::{EntityId, TimestampMillis};

type ResolvedMap = BTreeMap<String, ResolvedPartnerRecord>;

/// Counterparty cache bound to one store and one clock
pub struct PartnerReconciler<S, C> {
    store: S,
    clock: C,
    config: PartnerCacheConfig,
}

impl<S: KeyValueStore, C: Clock> PartnerReconciler<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self::with_config(store, clock, PartnerCacheConfig::default())
    }

    pub fn with_config(store: S, clock: C, config: PartnerCacheConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// Record a just-submitted movement. Identical entries may coexist; they
    /// are consumed oldest first.
    pub fn add_pending_partner(&self, pending: &PendingPartner) -> Option<PendingPartnerEntry> {
        let now = self.clock.now_millis();
        let Some(entry) = PendingPartnerEntry::from_pending(pending, now) else {
            tracing::debug!(
                "Skipping pending partner without a name for product {}",
                pending.product_id
            );
            return None;
        };

        let (mut list, _) = self.read_pruned(now);
        list.push(entry.clone());
        write_json(&self.store, &self.config.pending_key, &list);
        Some(entry)
    }

    /// Pending entries still inside the window, oldest first
    pub fn pending_entries(&self) -> Vec<PendingPartnerEntry> {
        let (list, _) = self.read_pruned(self.clock.now_millis());
        list
    }

    /// Find and consume the pending entry that most plausibly produced
    /// `movement`.
    ///
    /// Entries older than the window relative to now are discarded first.
    /// The first remaining entry with the same type, product and quantity
    /// magnitude, created within the window of the movement's own timestamp,
    /// is removed and returned.
    pub fn match_pending_partner(&self, movement: &Movement) -> Option<PendingPartnerEntry> {
        let now = self.clock.now_millis();
        let movement_time = movement.created_at_millis().unwrap_or(now);
        let window = self.config.window_ms.unsigned_abs();
        let (mut list, pruned) = self.read_pruned(now);

        let position = movement
            .product_id()
            .and_then(|product_id| {
                list.iter().position(|entry| {
                    entry.movement_type == movement.movement_type
                        && entry.product_id == product_id
                        && entry.quantity == movement.magnitude()
                        && entry.created_at.abs_diff(movement_time) < window
                })
            });

        let matched = position.map(|index| list.remove(index));
        if matched.is_some() || pruned > 0 {
            write_json(&self.store, &self.config.pending_key, &list);
        }

        match &matched {
            Some(entry) => tracing::debug!(
                "Matched movement {:?} to pending partner {}",
                movement.id,
                entry.partner
            ),
            None => tracing::debug!("No pending partner for movement {:?}", movement.id),
        }
        matched
    }

    /// Remember the partner confirmed for a movement id
    pub fn store_movement_partner(&self, movement_id: EntityId, partner: &str) {
        let partner = partner.trim();
        if partner.is_empty() {
            return;
        }
        let mut map: ResolvedMap = read_json_or(&self.store, &self.config.resolved_key, ResolvedMap::new());
        map.insert(
            movement_id.to_string(),
            ResolvedPartnerRecord {
                partner: partner.to_string(),
                saved_at: self.clock.now_millis(),
            },
        );
        write_json(&self.store, &self.config.resolved_key, &map);
    }

    /// Partner remembered for a movement id, or empty
    pub fn get_stored_movement_partner(&self, movement_id: EntityId) -> String {
        let map: ResolvedMap = read_json_or(&self.store, &self.config.resolved_key, ResolvedMap::new());
        map.get(&movement_id.to_string())
            .map(|record| record.partner.clone())
            .unwrap_or_default()
    }

    fn read_pending(&self) -> Vec<PendingPartnerEntry> {
        read_json_or(&self.store, &self.config.pending_key, Vec::new())
    }

    /// Returns the surviving entries and how many were dropped
    fn read_pruned(&self, now: TimestampMillis) -> (Vec<PendingPartnerEntry>, usize) {
        let cutoff = now.saturating_sub(self.config.window_ms);
        let mut list = self.read_pending();
        let before = list.len();
        list.retain(|entry| entry.created_at >= cutoff);
        let pruned = before - list.len();
        if pruned > 0 {
            tracing::debug!("Pruned {} expired pending partner(s)", pruned);
        }
        (list, pruned)
    }
}
