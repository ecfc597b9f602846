// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! In-process DNS provider.
//!
//! Holds zones and record sets behind a mutex. Changesets are applied
//! all-or-nothing: if any addition collides with an existing record set of the
//! same type and name, nothing is written. Every trait call is counted so
//! callers can assert how many provider round trips an operation made.

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tracing::{debug, info};

use super::{Changeset, DnsProvider, ResourceRecordSet, Zone};
use crate::config::ProviderKind;
use crate::dns_errors::DnsError;

/// Provider operation, used to inject failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    ListZones,
    ListRecords,
    ApplyChangeset,
}

#[derive(Debug, Default)]
struct MemoryState {
    zones: Vec<(Zone, Vec<ResourceRecordSet>)>,
    failing: HashSet<Operation>,
}

/// Zone store kept entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryProvider {
    state: Mutex<MemoryState>,
    list_zones_calls: AtomicUsize,
    list_records_calls: AtomicUsize,
    apply_calls: AtomicUsize,
}

impl MemoryProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemoryProvider::insert_zone`].
    #[must_use]
    pub fn with_zone(self, zone: Zone) -> Self {
        self.insert_zone(zone);
        self
    }

    /// Builder-style variant of [`MemoryProvider::insert_record`].
    #[must_use]
    pub fn with_record(self, zone_id: &str, record: ResourceRecordSet) -> Self {
        self.insert_record(zone_id, record);
        self
    }

    /// Add an empty zone.
    pub fn insert_zone(&self, zone: Zone) {
        self.lock().zones.push((zone, Vec::new()));
    }

    /// Add a record set to the zone with ID `zone_id`; ignored if no such zone.
    pub fn insert_record(&self, zone_id: &str, record: ResourceRecordSet) {
        let mut state = self.lock();
        if let Some((_, records)) = state.zones.iter_mut().find(|(z, _)| z.id == zone_id) {
            records.push(record);
        }
    }

    /// Snapshot of the record sets in the zone with ID `zone_id`.
    #[must_use]
    pub fn records(&self, zone_id: &str) -> Vec<ResourceRecordSet> {
        self.lock()
            .zones
            .iter()
            .find(|(z, _)| z.id == zone_id)
            .map(|(_, records)| records.clone())
            .unwrap_or_default()
    }

    /// Make every later call of `operation` fail.
    pub fn fail(&self, operation: Operation) {
        self.lock().failing.insert(operation);
    }

    #[must_use]
    pub fn list_zones_calls(&self) -> usize {
        self.list_zones_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn list_records_calls(&self) -> usize {
        self.list_records_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn apply_calls(&self) -> usize {
        self.apply_calls.load(Ordering::SeqCst)
    }

    /// Total number of provider calls of any kind.
    #[must_use]
    pub fn total_calls(&self) -> usize {
        self.list_zones_calls() + self.list_records_calls() + self.apply_calls()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        // A panic while holding the lock leaves plain data behind; keep using it.
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[async_trait]
impl DnsProvider for MemoryProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Memory
    }

    async fn list_zones(&self) -> Result<Vec<Zone>, DnsError> {
        self.list_zones_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.failing.contains(&Operation::ListZones) {
            return Err(DnsError::ZoneLookupFailed {
                reason: "injected failure".to_string(),
            });
        }
        Ok(state.zones.iter().map(|(z, _)| z.clone()).collect())
    }

    async fn list_records(&self, zone: &Zone) -> Result<Vec<ResourceRecordSet>, DnsError> {
        self.list_records_calls.fetch_add(1, Ordering::SeqCst);
        let state = self.lock();
        if state.failing.contains(&Operation::ListRecords) {
            return Err(DnsError::RecordListFailed {
                zone: zone.name.clone(),
                reason: "injected failure".to_string(),
            });
        }
        state
            .zones
            .iter()
            .find(|(z, _)| z.id == zone.id)
            .map(|(_, records)| records.clone())
            .ok_or_else(|| DnsError::RecordListFailed {
                zone: zone.name.clone(),
                reason: format!("no zone with id \"{}\"", zone.id),
            })
    }

    async fn apply_changeset(&self, changeset: &Changeset) -> Result<(), DnsError> {
        self.apply_calls.fetch_add(1, Ordering::SeqCst);
        let zone = changeset.zone();
        let apply_failed = |reason: String| DnsError::ChangesetApplyFailed {
            zone: zone.name.clone(),
            records: changeset.names(),
            reason,
        };

        let mut state = self.lock();
        if state.failing.contains(&Operation::ApplyChangeset) {
            return Err(apply_failed("injected failure".to_string()));
        }

        let Some((_, records)) = state.zones.iter_mut().find(|(z, _)| z.id == zone.id) else {
            return Err(apply_failed(format!("no zone with id \"{}\"", zone.id)));
        };

        let mut keys: HashSet<String> = records.iter().map(ResourceRecordSet::key).collect();
        for addition in changeset.additions() {
            if !keys.insert(addition.key()) {
                debug!(key = %addition.key(), "Changeset addition collides with existing record");
                return Err(apply_failed(format!(
                    "record set {} already exists",
                    addition.key()
                )));
            }
        }

        records.extend(changeset.additions().iter().cloned());
        info!(
            zone = %zone.name,
            count = changeset.len(),
            "Applied changeset to in-memory zone"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
