// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Read-only cluster model consumed by the validator and the precreator.
//!
//! Only the fields that influence DNS are modelled. Unknown fields in a
//! cluster manifest are ignored so full manifests can be fed in unchanged.
//!
//! # Example
//!
//! ```rust
//! use dnsprep::cluster::Cluster;
//!
//! let cluster = Cluster::from_yaml_str(
//!     r#"
//! metadata:
//!   name: foo.example.com
//! spec:
//!   dnsZone: example.com
//!   masterPublicName: api.foo.example.com
//! "#,
//!     "inline",
//! )
//! .unwrap();
//!
//! assert_eq!(cluster.name(), "foo.example.com");
//! assert!(!cluster.use_private_dns());
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dns_errors::DnsError;

/// A cluster definition.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    /// Object metadata; `metadata.name` is the cluster object name
    #[serde(default)]
    pub metadata: ObjectMeta,
    /// Desired cluster configuration
    #[serde(default)]
    pub spec: ClusterSpec,
}

/// Cluster object metadata.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectMeta {
    /// Cluster object name, used as the suffix of internal hostnames
    #[serde(default)]
    pub name: String,
}

/// DNS-relevant portion of the cluster spec.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClusterSpec {
    /// Provider zone ID or DNS name of the hosted zone (trailing dot optional)
    #[serde(default)]
    pub dns_zone: String,

    /// Public API hostname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_public_name: Option<String>,

    /// Cluster-internal API hostname
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_internal_name: Option<String>,

    /// Etcd clusters backing the control plane
    #[serde(default)]
    pub etcd_clusters: Vec<EtcdClusterSpec>,

    /// Network topology; carries the DNS visibility mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topology: Option<TopologySpec>,
}

/// One etcd cluster and its members.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdClusterSpec {
    /// Etcd cluster name (e.g., "main", "events")
    pub name: String,

    /// Members of this etcd cluster
    #[serde(default, rename = "etcdMembers", alias = "members")]
    pub members: Vec<EtcdMemberSpec>,
}

/// A single etcd member.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EtcdMemberSpec {
    /// Member name (e.g., "a", "us-east-1a")
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_group: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopologySpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns: Option<DnsTopology>,
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DnsTopology {
    #[serde(rename = "type", default)]
    pub dns_type: DnsType,
}

/// Visibility of the cluster's DNS zone.
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum DnsType {
    /// Names are expected to resolve from the public internet
    #[default]
    Public,
    /// Names only resolve inside the cluster's network
    Private,
}

impl Cluster {
    /// Parse a cluster from YAML (or JSON, which is a YAML subset).
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::InvalidClusterSpec`] if the document cannot be parsed.
    pub fn from_yaml_str(contents: &str, source_name: &str) -> Result<Self, DnsError> {
        serde_yaml::from_str(contents).map_err(|e| DnsError::InvalidClusterSpec {
            source_name: source_name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Load a cluster from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::InvalidClusterSpec`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, DnsError> {
        let source_name = path.display().to_string();
        let contents =
            std::fs::read_to_string(path).map_err(|e| DnsError::InvalidClusterSpec {
                source_name: source_name.clone(),
                reason: e.to_string(),
            })?;
        Self::from_yaml_str(&contents, &source_name)
    }

    /// Cluster object name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Whether the cluster uses private DNS, in which case its zone is not
    /// expected to resolve publicly.
    #[must_use]
    pub fn use_private_dns(&self) -> bool {
        self.spec
            .topology
            .as_ref()
            .and_then(|t| t.dns.as_ref())
            .is_some_and(|dns| dns.dns_type == DnsType::Private)
    }
}

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod cluster_tests;
