// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Check that a cluster's DNS zone is delegated on the public internet.
//!
//! Private-DNS clusters are skipped outright. Otherwise the zone is resolved
//! through the provider and its NS record set is looked up through a public
//! resolver. The nameserver hostnames are only logged, never compared against
//! an expected delegation.

use std::time::Instant;
use tracing::{debug, info, warn};

use crate::cluster::Cluster;
use crate::config::DnsPolicy;
use crate::constants::ENV_IGNORE_NS_CHECK;
use crate::dns_errors::DnsError;
use crate::metrics;
use crate::nameservers::NameserverLookup;
use crate::provider::DnsProvider;
use crate::zone::find_zone;

const OPERATION: &str = "validate";

/// Validate that the cluster's DNS zone resolves publicly.
///
/// # Errors
///
/// - any error from [`find_zone`]
/// - [`DnsError::NsLookupFailed`] if the NS lookup cannot be answered
/// - [`DnsError::NoNsRecords`] if the zone has no NS records and
///   `policy.ignore_ns_check` is not set
pub async fn validate_dns(
    cluster: &Cluster,
    provider: &dyn DnsProvider,
    nameservers: &dyn NameserverLookup,
    policy: &DnsPolicy,
) -> Result<(), DnsError> {
    if cluster.use_private_dns() {
        info!("Private DNS: skipping DNS validation");
        metrics::record_operation_skipped(OPERATION);
        return Ok(());
    }

    let start = Instant::now();
    let result = check_nameservers(cluster, provider, nameservers, policy).await;
    match &result {
        Ok(()) => metrics::record_operation_success(OPERATION, start.elapsed()),
        Err(e) => metrics::record_operation_error(OPERATION, e.status_reason(), start.elapsed()),
    }
    result
}

async fn check_nameservers(
    cluster: &Cluster,
    provider: &dyn DnsProvider,
    nameservers: &dyn NameserverLookup,
    policy: &DnsPolicy,
) -> Result<(), DnsError> {
    let zone = find_zone(provider, &cluster.spec.dns_zone).await?;
    let dns_name = zone.normalized_name();

    debug!(dns_name = %dns_name, "Doing DNS lookup to verify NS records");
    let hosts = nameservers.lookup_ns(dns_name).await?;

    if hosts.is_empty() {
        if !policy.ignore_ns_check {
            return Err(DnsError::NoNsRecords {
                name: dns_name.to_string(),
            });
        }
        warn!(
            dns_name = %dns_name,
            "Ignoring failed NS record check because {} is set",
            ENV_IGNORE_NS_CHECK
        );
    } else {
        debug!(dns_name = %dns_name, nameservers = ?hosts, "Found NS records");
    }

    Ok(())
}

#[cfg(test)]
#[path = "validate_tests.rs"]
mod validate_tests;
