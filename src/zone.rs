// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resolve a cluster's DNS zone identifier to exactly one provider zone.
//!
//! The identifier may be a provider zone ID or a DNS name. A zone matches if
//! its ID equals the identifier verbatim, or if its name equals the identifier
//! once a trailing dot is stripped from both.

use tracing::{debug, info};

use crate::dns_errors::DnsError;
use crate::provider::{trim_trailing_dot, DnsProvider, Zone};

/// Return every zone in `zones` matching `target` by ID or by name.
#[must_use]
pub fn match_zones<'a>(zones: &'a [Zone], target: &str) -> Vec<&'a Zone> {
    let find_name = trim_trailing_dot(target);
    zones
        .iter()
        .filter(|zone| zone.id == target || zone.normalized_name() == find_name)
        .collect()
}

/// Find the single zone identified by `dns_zone`.
///
/// # Errors
///
/// - [`DnsError::ZoneLookupFailed`] if the provider cannot list zones
/// - [`DnsError::ZoneNotFound`] if nothing matches
/// - [`DnsError::AmbiguousZone`] if more than one zone matches
pub async fn find_zone(provider: &dyn DnsProvider, dns_zone: &str) -> Result<Zone, DnsError> {
    let zones = provider.list_zones().await?;
    debug!(
        dns_zone = %dns_zone,
        zone_count = zones.len(),
        "Listed DNS zones"
    );

    let matches = match_zones(&zones, dns_zone);
    match matches.as_slice() {
        [] => Err(DnsError::ZoneNotFound {
            zone: dns_zone.to_string(),
        }),
        [zone] => {
            info!(
                dns_zone = %dns_zone,
                zone_id = %zone.id,
                zone_name = %zone.name,
                "Resolved DNS zone"
            );
            Ok((*zone).clone())
        }
        many => Err(DnsError::AmbiguousZone {
            zone: dns_zone.to_string(),
            matches: many.iter().map(|z| z.id.clone()).collect(),
        }),
    }
}

#[cfg(test)]
#[path = "zone_tests.rs"]
mod zone_tests;
