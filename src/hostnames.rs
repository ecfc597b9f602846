// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hostnames a cluster needs before it boots.
//!
//! The list is derived fresh from the cluster spec on every run:
//!
//! 1. the master public name, if set
//! 2. the master internal name, if set
//! 3. one internal name per etcd member:
//!    `<prefix>-<etcd cluster>-<member>.internal.<cluster object name>`,
//!    where the etcd cluster segment is dropped for the main etcd cluster
//!
//! Duplicates are kept; the precreator's diff absorbs them.

use tracing::warn;

use crate::cluster::Cluster;
use crate::config::DnsPolicy;
use crate::constants::INTERNAL_DOMAIN_INFIX;

/// Hostname of one etcd member.
#[must_use]
pub fn etcd_member_hostname(
    policy: &DnsPolicy,
    etcd_cluster: &str,
    member: &str,
    cluster_name: &str,
) -> String {
    let prefix = if etcd_cluster == policy.etcd_main_cluster {
        policy.etcd_prefix.clone()
    } else {
        format!("{}-{etcd_cluster}", policy.etcd_prefix)
    };
    format!("{prefix}-{member}.{INTERNAL_DOMAIN_INFIX}.{cluster_name}")
}

/// Hostnames to pre-create for `cluster`, in cluster definition order.
#[must_use]
pub fn build_precreate_hostnames(cluster: &Cluster, policy: &DnsPolicy) -> Vec<String> {
    let mut hostnames = Vec::new();

    match cluster.spec.master_public_name.as_deref() {
        Some(name) if !name.is_empty() => hostnames.push(name.to_string()),
        _ => warn!("cannot pre-create MasterPublicName - not set"),
    }

    match cluster.spec.master_internal_name.as_deref() {
        Some(name) if !name.is_empty() => hostnames.push(name.to_string()),
        _ => warn!("cannot pre-create MasterInternalName - not set"),
    }

    for etcd_cluster in &cluster.spec.etcd_clusters {
        for member in &etcd_cluster.members {
            hostnames.push(etcd_member_hostname(
                policy,
                &etcd_cluster.name,
                &member.name,
                cluster.name(),
            ));
        }
    }

    hostnames
}

#[cfg(test)]
#[path = "hostnames_tests.rs"]
mod hostnames_tests;
