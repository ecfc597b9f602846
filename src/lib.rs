// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # dnsprep - DNS preparation for cluster provisioning
//!
//! dnsprep checks and seeds the DNS state a cluster needs before it boots:
//!
//! - it locates the hosted zone for the cluster's configured domain
//! - it verifies the zone's nameservers resolve from the public internet
//!   (skipped for private DNS)
//! - it pre-creates placeholder `A` records for the hostnames the cluster will
//!   publish, so resolvers never cache a negative answer for them
//!
//! ## Modules
//!
//! - [`zone`] - Resolve a zone identifier (ID or name) to exactly one zone
//! - [`validate`] - Public NS delegation check
//! - [`precreate`] - Idempotent placeholder record reconciliation
//! - [`hostnames`] - Hostnames derived from the cluster spec
//! - [`provider`] - DNS backend capability trait and implementations
//! - [`nameservers`] - Public NS lookups
//! - [`cluster`] - Read-only cluster model
//! - [`config`] - Policy and backend selection
//!
//! ## Example
//!
//! ```rust,no_run
//! use dnsprep::cluster::Cluster;
//! use dnsprep::config::DnsPolicy;
//! use dnsprep::precreate::precreate_dns;
//! use dnsprep::provider::{MemoryProvider, Zone};
//!
//! # async fn example() -> Result<(), dnsprep::dns_errors::DnsError> {
//! let cluster = Cluster::from_file(std::path::Path::new("cluster.yaml"))?;
//! let provider = MemoryProvider::new().with_zone(Zone::new("Z1", "example.com."));
//!
//! let report = precreate_dns(&cluster, &provider, &DnsPolicy::from_env()).await?;
//! println!("created: {:?}", report.created);
//! # Ok(())
//! # }
//! ```

pub mod cluster;
pub mod config;
pub mod constants;
pub mod dns_errors;
pub mod hostnames;
pub mod metrics;
pub mod nameservers;
pub mod precreate;
pub mod provider;
pub mod validate;
pub mod zone;
