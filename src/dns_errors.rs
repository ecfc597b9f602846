// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for zone resolution, DNS validation and record pre-creation.
//!
//! Every variant carries the zone, hostname or operation it relates to so the
//! message is actionable on its own. All errors are terminal to the calling
//! operation; retry policy belongs to whoever drives the provisioning run.

use thiserror::Error;

/// Errors returned by the zone resolver, the DNS validator and the precreator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// A DNS provider handle could not be built
    ///
    /// Returned when the configured backend is unknown or its client cannot be
    /// constructed (bad endpoint URL, TLS setup failure).
    #[error("error building DNS provider: {reason}")]
    ProviderUnavailable {
        /// Why the provider could not be built
        reason: String,
    },

    /// Listing zones from the provider failed
    #[error("error listing DNS zones: {reason}")]
    ZoneLookupFailed {
        /// Provider error message
        reason: String,
    },

    /// No zone matched the cluster's DNS zone by ID or by name
    #[error(
        "cannot find DNS Zone \"{zone}\". Please pre-create the zone and set up NS records so that it resolves."
    )]
    ZoneNotFound {
        /// The zone identifier from the cluster spec
        zone: String,
    },

    /// More than one zone matched the cluster's DNS zone
    ///
    /// Ambiguity is a configuration error; the resolver never guesses.
    #[error("found multiple DNS Zones matching \"{zone}\": {matches:?}")]
    AmbiguousZone {
        /// The zone identifier from the cluster spec
        zone: String,
        /// IDs of every zone that matched
        matches: Vec<String>,
    },

    /// The public NS lookup itself failed
    #[error("error doing DNS lookup for NS records for \"{name}\": {reason}")]
    NsLookupFailed {
        /// Zone name that was looked up
        name: String,
        /// Resolver error message
        reason: String,
    },

    /// The public NS lookup succeeded but returned no NS records
    #[error("NS records not found for \"{name}\" - please make sure they are correctly configured")]
    NoNsRecords {
        /// Zone name that was looked up
        name: String,
    },

    /// Listing resource record sets in a zone failed
    #[error("error listing DNS resource records for \"{zone}\": {reason}")]
    RecordListFailed {
        /// Zone name
        zone: String,
        /// Provider error message
        reason: String,
    },

    /// Applying a changeset failed; none of its additions should be assumed present
    #[error("error pre-creating DNS records {records:?} in \"{zone}\": {reason}")]
    ChangesetApplyFailed {
        /// Zone name
        zone: String,
        /// Hostnames queued in the failed changeset
        records: Vec<String>,
        /// Provider error message
        reason: String,
    },

    /// The cluster spec could not be read or parsed
    #[error("invalid cluster spec {source_name}: {reason}")]
    InvalidClusterSpec {
        /// File path or other origin of the cluster definition
        source_name: String,
        /// Parse or I/O error message
        reason: String,
    },
}

impl DnsError {
    /// Returns a stable reason code for this error.
    ///
    /// Used as a structured logging field and as a metrics label.
    #[must_use]
    pub fn status_reason(&self) -> &'static str {
        match self {
            Self::ProviderUnavailable { .. } => "ProviderUnavailable",
            Self::ZoneLookupFailed { .. } => "ZoneLookupFailed",
            Self::ZoneNotFound { .. } => "ZoneNotFound",
            Self::AmbiguousZone { .. } => "AmbiguousZone",
            Self::NsLookupFailed { .. } => "NSLookupFailed",
            Self::NoNsRecords { .. } => "NoNSRecords",
            Self::RecordListFailed { .. } => "RecordListFailed",
            Self::ChangesetApplyFailed { .. } => "ChangesetApplyFailed",
            Self::InvalidClusterSpec { .. } => "InvalidClusterSpec",
        }
    }
}

#[cfg(test)]
#[path = "dns_errors_tests.rs"]
mod dns_errors_tests;
