// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS provider abstraction.
//!
//! A provider is treated as a transactional store of resource record sets
//! grouped into zones. Backends implement [`DnsProvider`] and are selected at
//! startup from a [`ProviderConfig`] via [`build_provider`]:
//!
//! - [`memory::MemoryProvider`] - in-process zone store with call counters
//! - [`http::HttpProvider`] - hosted-zone REST API
//!
//! Writes go through a [`Changeset`]: a batch of additions built locally and
//! submitted in one [`DnsProvider::apply_changeset`] call.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use hickory_proto::rr::RecordType;
use std::sync::Arc;
use tracing::debug;

use crate::config::{ProviderConfig, ProviderKind};
use crate::constants::RECORD_KEY_SEPARATOR;
use crate::dns_errors::DnsError;

pub use http::HttpProvider;
pub use memory::MemoryProvider;

/// Strip a single trailing dot from a DNS name.
#[must_use]
pub fn trim_trailing_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Lookup key for a record set: `<TYPE>::<name without trailing dot>`.
#[must_use]
pub fn record_key(record_type: RecordType, name: &str) -> String {
    format!(
        "{record_type}{RECORD_KEY_SEPARATOR}{}",
        trim_trailing_dot(name)
    )
}

/// A hosted zone as reported by the provider.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Zone {
    /// Opaque provider identifier
    pub id: String,
    /// Zone apex name, possibly with a trailing dot
    pub name: String,
}

impl Zone {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Zone name without its trailing dot.
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        trim_trailing_dot(&self.name)
    }
}

/// A typed, named set of record values with a TTL.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceRecordSet {
    pub name: String,
    pub record_type: RecordType,
    /// Record values; empty for alias-style entries managed elsewhere
    pub rrdatas: Vec<String>,
    pub ttl: u32,
}

impl ResourceRecordSet {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        rrdatas: Vec<String>,
        ttl: u32,
        record_type: RecordType,
    ) -> Self {
        Self {
            name: name.into(),
            record_type,
            rrdatas,
            ttl,
        }
    }

    /// Record name without its trailing dot.
    #[must_use]
    pub fn normalized_name(&self) -> &str {
        trim_trailing_dot(&self.name)
    }

    /// Key used to detect existing records while diffing.
    #[must_use]
    pub fn key(&self) -> String {
        record_key(self.record_type, &self.name)
    }
}

/// A batch of record additions for one zone.
///
/// Built locally; nothing reaches the provider until the changeset is passed
/// to [`DnsProvider::apply_changeset`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Changeset {
    zone: Zone,
    additions: Vec<ResourceRecordSet>,
}

impl Changeset {
    #[must_use]
    pub fn new(zone: Zone) -> Self {
        Self {
            zone,
            additions: Vec::new(),
        }
    }

    /// Queue a record set for creation.
    pub fn add(&mut self, record: ResourceRecordSet) {
        debug!(
            zone = %self.zone.name,
            name = %record.name,
            record_type = %record.record_type,
            "Queued record addition"
        );
        self.additions.push(record);
    }

    /// Queue a record set for creation from its parts.
    pub fn add_record(&mut self, name: &str, values: Vec<String>, ttl: u32, record_type: RecordType) {
        self.add(ResourceRecordSet::new(name, values, ttl, record_type));
    }

    #[must_use]
    pub fn zone(&self) -> &Zone {
        &self.zone
    }

    #[must_use]
    pub fn additions(&self) -> &[ResourceRecordSet] {
        &self.additions
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.additions.len()
    }

    /// Names of all queued additions, in queue order.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.additions.iter().map(|r| r.name.clone()).collect()
    }
}

/// Capability interface implemented by every DNS backend.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Which backend this is.
    fn kind(&self) -> ProviderKind;

    /// List every zone visible to the provider credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ZoneLookupFailed`] if the listing fails.
    async fn list_zones(&self) -> Result<Vec<Zone>, DnsError>;

    /// List every resource record set in `zone`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::RecordListFailed`] if the listing fails.
    async fn list_records(&self, zone: &Zone) -> Result<Vec<ResourceRecordSet>, DnsError>;

    /// Apply all additions in `changeset` as a single provider write.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ChangesetApplyFailed`] if the provider rejects the write.
    async fn apply_changeset(&self, changeset: &Changeset) -> Result<(), DnsError>;
}

/// Build the backend named by `config`.
///
/// # Errors
///
/// Returns [`DnsError::ProviderUnavailable`] if the backend cannot be constructed.
pub fn build_provider(config: &ProviderConfig) -> Result<Arc<dyn DnsProvider>, DnsError> {
    debug!(provider = %config.kind, "Building DNS provider");
    match config.kind {
        ProviderKind::Memory => Ok(Arc::new(MemoryProvider::new())),
        ProviderKind::Http => {
            let endpoint =
                config
                    .endpoint
                    .as_deref()
                    .ok_or_else(|| DnsError::ProviderUnavailable {
                        reason: "http provider requires an endpoint".to_string(),
                    })?;
            let provider = HttpProvider::new(endpoint, config.token.clone())?;
            Ok(Arc::new(provider))
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod mod_tests;
