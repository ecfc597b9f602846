// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for dnsprep.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

use std::net::Ipv4Addr;

// ============================================================================
// Placeholder Record Constants
// ============================================================================

/// Address written into pre-created placeholder `A` records.
///
/// Taken from TEST-NET-3 (RFC 5737) so it can never route to a real host.
pub const PLACEHOLDER_IP: Ipv4Addr = Ipv4Addr::new(203, 0, 113, 123);

/// TTL for placeholder records (10 seconds)
///
/// Kept short so the real address replaces the placeholder quickly once the
/// cluster publishes it.
pub const PLACEHOLDER_TTL_SECS: u32 = 10;

/// Separator between record type and record name in record lookup keys
pub const RECORD_KEY_SEPARATOR: &str = "::";

// ============================================================================
// Hostname Derivation Constants
// ============================================================================

/// Etcd cluster name that collapses to the bare prefix
pub const ETCD_MAIN_CLUSTER_NAME: &str = "main";

/// Hostname prefix for etcd members
pub const ETCD_HOSTNAME_PREFIX: &str = "etcd";

/// Infix placed between an etcd member name and the cluster object name
pub const INTERNAL_DOMAIN_INFIX: &str = "internal";

// ============================================================================
// Environment & Feature Flag Constants
// ============================================================================

/// Any non-empty value demotes a missing NS record set to a warning
pub const ENV_IGNORE_NS_CHECK: &str = "DNS_IGNORE_NS_CHECK";

/// Comma-separated feature flag list (`+Flag`, `-Flag`, or bare `Flag`)
pub const ENV_FEATURE_FLAGS: &str = "DNSPREP_FEATURE_FLAGS";

/// Feature flag gating placeholder record pre-creation
pub const FEATURE_DNS_PRECREATE: &str = "DNSPreCreate";

/// Provider backend selection (`memory` or `http`)
pub const ENV_PROVIDER: &str = "DNSPREP_PROVIDER";

/// Base URL of the hosted-zone HTTP API
pub const ENV_PROVIDER_ENDPOINT: &str = "DNSPREP_PROVIDER_ENDPOINT";

/// Bearer token for the hosted-zone HTTP API
pub const ENV_PROVIDER_TOKEN: &str = "DNSPREP_PROVIDER_TOKEN";

/// Upstream used for public NS lookups (`google`, `cloudflare`, `quad9`, `system`)
pub const ENV_PUBLIC_RESOLVER: &str = "DNSPREP_PUBLIC_RESOLVER";

// ============================================================================
// HTTP Provider Constants
// ============================================================================

/// Request timeout for hosted-zone API calls (30 seconds)
pub const HTTP_PROVIDER_TIMEOUT_SECS: u64 = 30;
