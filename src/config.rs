// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Runtime configuration for dnsprep.
//!
//! Policy toggles that used to be process-wide (the pre-create feature flag and
//! the NS check override) are collected into [`DnsPolicy`] and passed to the
//! validator and precreator explicitly. [`ProviderConfig`] selects the DNS
//! backend at startup and [`PublicResolver`] selects the upstream used for NS
//! lookups.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;
use tracing::{debug, warn};

use crate::constants::{
    ENV_FEATURE_FLAGS, ENV_IGNORE_NS_CHECK, ETCD_HOSTNAME_PREFIX, ETCD_MAIN_CLUSTER_NAME,
    FEATURE_DNS_PRECREATE, PLACEHOLDER_IP, PLACEHOLDER_TTL_SECS,
};

/// Policy values for validation and pre-creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsPolicy {
    /// Pre-create placeholder records at all
    pub precreate_enabled: bool,

    /// Demote "zero NS records" from an error to a warning
    pub ignore_ns_check: bool,

    /// Address written into placeholder `A` records
    pub placeholder_ip: Ipv4Addr,

    /// TTL of placeholder records in seconds
    pub placeholder_ttl: u32,

    /// Etcd cluster name whose hostnames drop the cluster-name segment
    pub etcd_main_cluster: String,

    /// Prefix used for etcd member hostnames
    pub etcd_prefix: String,
}

impl Default for DnsPolicy {
    fn default() -> Self {
        Self {
            precreate_enabled: true,
            ignore_ns_check: false,
            placeholder_ip: PLACEHOLDER_IP,
            placeholder_ttl: PLACEHOLDER_TTL_SECS,
            etcd_main_cluster: ETCD_MAIN_CLUSTER_NAME.to_string(),
            etcd_prefix: ETCD_HOSTNAME_PREFIX.to_string(),
        }
    }
}

impl DnsPolicy {
    /// Build a policy from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a policy from an arbitrary key lookup.
    ///
    /// - `DNS_IGNORE_NS_CHECK`: any non-empty value sets `ignore_ns_check`
    /// - `DNSPREP_FEATURE_FLAGS`: `DNSPreCreate`/`+DNSPreCreate` enables,
    ///   `-DNSPreCreate` disables pre-creation
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut policy = Self::default();

        if let Some(value) = lookup(ENV_IGNORE_NS_CHECK) {
            policy.ignore_ns_check = !value.is_empty();
        }

        if let Some(flags) = lookup(ENV_FEATURE_FLAGS) {
            for (name, enabled) in parse_feature_flags(&flags) {
                if name == FEATURE_DNS_PRECREATE {
                    policy.precreate_enabled = enabled;
                } else {
                    warn!(flag = %name, "Unknown feature flag, ignoring");
                }
            }
        }

        debug!(
            precreate_enabled = policy.precreate_enabled,
            ignore_ns_check = policy.ignore_ns_check,
            "DNS policy loaded"
        );
        policy
    }

    /// Placeholder address rendered for record data.
    #[must_use]
    pub fn placeholder_value(&self) -> String {
        self.placeholder_ip.to_string()
    }
}

/// Parse a comma-separated feature flag list into `(name, enabled)` pairs.
///
/// A leading `+` or no prefix enables the flag, a leading `-` disables it.
/// Later entries override earlier ones. Empty entries are skipped.
#[must_use]
pub fn parse_feature_flags(flags: &str) -> Vec<(String, bool)> {
    flags
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            if let Some(name) = s.strip_prefix('-') {
                (name.trim().to_string(), false)
            } else if let Some(name) = s.strip_prefix('+') {
                (name.trim().to_string(), true)
            } else {
                (s.to_string(), true)
            }
        })
        .collect()
}

/// DNS provider backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// In-process zone store; nothing leaves the process
    #[default]
    Memory,
    /// Hosted-zone REST API
    Http,
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "http" => Ok(Self::Http),
            other => Err(format!("unknown DNS provider \"{other}\"")),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => write!(f, "memory"),
            Self::Http => write!(f, "http"),
        }
    }
}

/// Backend selection and connection settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfig {
    pub kind: ProviderKind,

    /// Base URL for the HTTP backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Bearer token for the HTTP backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// Upstream resolver used for public NS lookups.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublicResolver {
    #[default]
    Google,
    Cloudflare,
    Quad9,
    /// Whatever the host's resolver configuration points at
    System,
}

impl FromStr for PublicResolver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "cloudflare" => Ok(Self::Cloudflare),
            "quad9" => Ok(Self::Quad9),
            "system" => Ok(Self::System),
            other => Err(format!("unknown public resolver \"{other}\"")),
        }
    }
}

impl fmt::Display for PublicResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Google => "google",
            Self::Cloudflare => "cloudflare",
            Self::Quad9 => "quad9",
            Self::System => "system",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
