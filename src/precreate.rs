// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Pre-create placeholder `A` records for the hostnames a cluster needs.
//!
//! Resolvers cache negative answers for a long time. Creating the names up
//! front with a dummy address means the first lookups during boot get a short
//! TTL positive answer instead, so the real address is picked up quickly once
//! it is published. Getting a name wrong here only costs an extra record.
//!
//! The reconciliation is add-only and idempotent:
//!
//! - an existing `A` record with values is left untouched
//! - an existing `A` record without values is treated as an alias managed
//!   elsewhere and also left untouched
//! - every missing name is queued once into a single [`Changeset`]
//! - the changeset is applied only if something was queued

use hickory_proto::rr::RecordType;
use std::collections::{HashMap, HashSet};
use std::time::Instant;
use tracing::{debug, info, trace};

use crate::cluster::Cluster;
use crate::config::DnsPolicy;
use crate::dns_errors::DnsError;
use crate::hostnames::build_precreate_hostnames;
use crate::metrics;
use crate::provider::{
    record_key, trim_trailing_dot, Changeset, DnsProvider, ResourceRecordSet, Zone,
};
use crate::zone::find_zone;

const OPERATION: &str = "precreate";

/// What a pre-create run did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PrecreateReport {
    /// Zone the records were reconciled in; `None` if the run was skipped
    pub zone: Option<Zone>,
    /// Hostnames written by this run
    pub created: Vec<String>,
    /// Hostnames that already had an `A` record with values
    pub existing: Vec<String>,
    /// Hostnames with an empty `A` record, left alone as alias targets
    pub aliases: Vec<String>,
}

impl PrecreateReport {
    /// Whether this run wrote anything.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Pre-create placeholder records for `cluster`.
///
/// Returns an empty report without touching the provider when pre-creation
/// is disabled or the cluster needs no hostnames.
///
/// # Errors
///
/// - any error from [`find_zone`]
/// - [`DnsError::RecordListFailed`] if the zone's records cannot be listed
/// - [`DnsError::ChangesetApplyFailed`] if the write is rejected
pub async fn precreate_dns(
    cluster: &Cluster,
    provider: &dyn DnsProvider,
    policy: &DnsPolicy,
) -> Result<PrecreateReport, DnsError> {
    if !policy.precreate_enabled {
        debug!("Skipping DNS record pre-creation because feature flag not enabled");
        metrics::record_operation_skipped(OPERATION);
        return Ok(PrecreateReport::default());
    }

    let hostnames = build_precreate_hostnames(cluster, policy);
    if hostnames.is_empty() {
        info!("No DNS records to pre-create");
        metrics::record_operation_skipped(OPERATION);
        return Ok(PrecreateReport::default());
    }

    info!(count = hostnames.len(), "Pre-creating DNS records");

    let start = Instant::now();
    let result = reconcile_placeholders(cluster, provider, policy, &hostnames).await;
    match &result {
        Ok(_) => metrics::record_operation_success(OPERATION, start.elapsed()),
        Err(e) => metrics::record_operation_error(OPERATION, e.status_reason(), start.elapsed()),
    }
    result
}

async fn reconcile_placeholders(
    cluster: &Cluster,
    provider: &dyn DnsProvider,
    policy: &DnsPolicy,
    hostnames: &[String],
) -> Result<PrecreateReport, DnsError> {
    let zone = find_zone(provider, &cluster.spec.dns_zone).await?;

    let records = provider.list_records(&zone).await?;
    let existing: HashMap<String, ResourceRecordSet> =
        records.into_iter().map(|r| (r.key(), r)).collect();

    let mut changeset = Changeset::new(zone.clone());
    let mut report = PrecreateReport::default();
    let mut seen = HashSet::new();

    for hostname in hostnames {
        let hostname = trim_trailing_dot(hostname);
        let key = record_key(RecordType::A, hostname);
        if !seen.insert(key.clone()) {
            continue;
        }

        match existing.get(&key) {
            Some(record) if !record.rrdatas.is_empty() => {
                trace!(
                    hostname = %hostname,
                    rrdatas = ?record.rrdatas,
                    "Found DNS record; won't create"
                );
                report.existing.push(hostname.to_string());
            }
            Some(_) => {
                // Probably an alias target; leave it alone.
                trace!(hostname = %hostname, "Found DNS record, but no records");
                report.aliases.push(hostname.to_string());
            }
            None => {
                debug!(
                    hostname = %hostname,
                    placeholder = %policy.placeholder_ip,
                    "Pre-creating DNS record"
                );
                changeset.add_record(
                    hostname,
                    vec![policy.placeholder_value()],
                    policy.placeholder_ttl,
                    RecordType::A,
                );
                report.created.push(hostname.to_string());
            }
        }
    }

    if !changeset.is_empty() {
        provider.apply_changeset(&changeset).await?;
        metrics::record_records_precreated(changeset.len());
        info!(zone = %zone.name, created = ?report.created, "Pre-created DNS names");
    }

    report.zone = Some(zone);
    Ok(report)
}

#[cfg(test)]
#[path = "precreate_tests.rs"]
mod precreate_tests;
