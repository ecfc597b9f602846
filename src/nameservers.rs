// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Public NS lookups.
//!
//! [`NameserverLookup`] is the seam the validator resolves through;
//! [`HickoryNameserverLookup`] implements it against a public recursive
//! resolver using `hickory-resolver`.

use async_trait::async_trait;
use hickory_proto::op::ResponseCode;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::{ResolveError, ResolveErrorKind};
use hickory_resolver::TokioAsyncResolver;
use tracing::debug;

use crate::config::PublicResolver;
use crate::dns_errors::DnsError;

/// Resolves the NS record set of a domain.
#[async_trait]
pub trait NameserverLookup: Send + Sync {
    /// Return the nameserver hostnames for `domain`.
    ///
    /// An empty list means the lookup completed but no NS records exist.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::NsLookupFailed`] if no answer could be obtained.
    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsError>;
}

/// NS lookups through `hickory-resolver`.
pub struct HickoryNameserverLookup {
    resolver: TokioAsyncResolver,
}

impl HickoryNameserverLookup {
    /// Build a resolver pointed at `upstream`.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::NsLookupFailed`] if `upstream` is
    /// [`PublicResolver::System`] and the host resolver configuration cannot be read.
    pub fn new(upstream: PublicResolver) -> Result<Self, DnsError> {
        let resolver = match upstream {
            PublicResolver::Google => {
                TokioAsyncResolver::tokio(ResolverConfig::google(), ResolverOpts::default())
            }
            PublicResolver::Cloudflare => {
                TokioAsyncResolver::tokio(ResolverConfig::cloudflare(), ResolverOpts::default())
            }
            PublicResolver::Quad9 => {
                TokioAsyncResolver::tokio(ResolverConfig::quad9(), ResolverOpts::default())
            }
            PublicResolver::System => {
                TokioAsyncResolver::tokio_from_system_conf().map_err(|e| {
                    DnsError::NsLookupFailed {
                        name: String::new(),
                        reason: format!("failed to read system resolver configuration: {e}"),
                    }
                })?
            }
        };

        debug!(upstream = %upstream, "Public NS resolver ready");
        Ok(Self { resolver })
    }
}

#[async_trait]
impl NameserverLookup for HickoryNameserverLookup {
    async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsError> {
        match self.resolver.ns_lookup(domain).await {
            Ok(answer) => Ok(answer.iter().map(|ns| ns.0.to_utf8()).collect()),
            Err(e) => ns_answer_from_error(domain, &e),
        }
    }
}

/// Classify a failed NS lookup.
///
/// NODATA (the name exists but has no NS set) is an empty answer. Anything
/// else, NXDOMAIN included, is a lookup failure.
pub(crate) fn ns_answer_from_error(
    domain: &str,
    error: &ResolveError,
) -> Result<Vec<String>, DnsError> {
    match error.kind() {
        ResolveErrorKind::NoRecordsFound {
            response_code: ResponseCode::NoError,
            ..
        } => {
            debug!(domain = %domain, "NS lookup returned no records");
            Ok(Vec::new())
        }
        _ => Err(DnsError::NsLookupFailed {
            name: domain.to_string(),
            reason: error.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "nameservers_tests.rs"]
mod nameservers_tests;
