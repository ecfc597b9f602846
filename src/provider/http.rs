// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Hosted-zone REST API provider.
//!
//! Talks to a JSON API with three endpoints, relative to the configured base URL:
//!
//! | Method | Path | Purpose |
//! |---|---|---|
//! | `GET` | `zones` | List zones (`{"zones": [{"id", "name"}]}`) |
//! | `GET` | `zones/{id}/rrsets` | List record sets (`{"rrsets": [{"name", "type", "rrdatas", "ttl"}]}`) |
//! | `POST` | `zones/{id}/changes` | Apply a changeset (`{"additions": [...]}`) |
//!
//! Requests carry `Authorization: Bearer <token>` when a token is configured.
//! There is no retry here; a failed call surfaces as the operation's error.

use async_trait::async_trait;
use hickory_proto::rr::RecordType;
use reqwest::{Client as HttpClient, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

use super::{Changeset, DnsProvider, ResourceRecordSet, Zone};
use crate::config::ProviderKind;
use crate::constants::HTTP_PROVIDER_TIMEOUT_SECS;
use crate::dns_errors::DnsError;

/// Zone as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ZoneDto {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListZonesResponse {
    #[serde(default)]
    pub zones: Vec<ZoneDto>,
}

/// Record set as exchanged with the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RrsetDto {
    pub name: String,
    #[serde(rename = "type")]
    pub record_type: String,
    #[serde(default)]
    pub rrdatas: Vec<String>,
    #[serde(default)]
    pub ttl: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListRrsetsResponse {
    #[serde(default)]
    pub rrsets: Vec<RrsetDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeRequest {
    pub additions: Vec<RrsetDto>,
}

impl From<&ResourceRecordSet> for RrsetDto {
    fn from(rrset: &ResourceRecordSet) -> Self {
        Self {
            name: rrset.name.clone(),
            record_type: rrset.record_type.to_string(),
            rrdatas: rrset.rrdatas.clone(),
            ttl: rrset.ttl,
        }
    }
}

/// Failure of a single API call.
#[derive(Debug)]
enum HttpFailure {
    Status { status: StatusCode, body: String },
    Transport(String),
}

impl std::fmt::Display for HttpFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, body } => write!(f, "HTTP {status}: {body}"),
            Self::Transport(reason) => write!(f, "{reason}"),
        }
    }
}

/// Provider backed by a hosted-zone HTTP API.
#[derive(Debug, Clone)]
pub struct HttpProvider {
    client: HttpClient,
    base_url: Url,
    token: Option<String>,
}

impl HttpProvider {
    /// Create a provider for the API rooted at `endpoint`.
    ///
    /// # Errors
    ///
    /// Returns [`DnsError::ProviderUnavailable`] if `endpoint` is not an
    /// `http(s)` URL or the HTTP client cannot be built.
    pub fn new(endpoint: &str, token: Option<String>) -> Result<Self, DnsError> {
        let unavailable = |reason: String| DnsError::ProviderUnavailable { reason };

        let base_url = Url::parse(endpoint)
            .map_err(|e| unavailable(format!("invalid endpoint \"{endpoint}\": {e}")))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.cannot_be_a_base() {
            return Err(unavailable(format!(
                "endpoint \"{endpoint}\" must be an http or https URL"
            )));
        }

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(HTTP_PROVIDER_TIMEOUT_SECS))
            .build()
            .map_err(|e| unavailable(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn url(&self, segments: &[&str]) -> Result<Url, HttpFailure> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| HttpFailure::Transport(format!("cannot extend {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, HttpFailure> {
        let url = self.url(segments)?;
        let request = self.client.get(url.clone());
        let text = self.send(request, "GET", &url).await?;
        serde_json::from_str(&text)
            .map_err(|e| HttpFailure::Transport(format!("invalid response from {url}: {e}")))
    }

    async fn post_json<B: Serialize>(&self, segments: &[&str], body: &B) -> Result<(), HttpFailure> {
        let url = self.url(segments)?;
        let request = self.client.post(url.clone()).json(body);
        self.send(request, "POST", &url).await.map(|_| ())
    }

    async fn send(
        &self,
        mut request: reqwest::RequestBuilder,
        method: &str,
        url: &Url,
    ) -> Result<String, HttpFailure> {
        debug!(
            method = %method,
            url = %url,
            auth_enabled = self.token.is_some(),
            "HTTP API request to DNS provider"
        );

        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            HttpFailure::Transport(format!("failed to send HTTP request to {url}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(
                method = %method,
                url = %url,
                status = %status,
                error = %body,
                "HTTP API request failed"
            );
            return Err(HttpFailure::Status { status, body });
        }

        response
            .text()
            .await
            .map_err(|e| HttpFailure::Transport(format!("failed to read response body: {e}")))
    }
}

#[async_trait]
impl DnsProvider for HttpProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Http
    }

    async fn list_zones(&self) -> Result<Vec<Zone>, DnsError> {
        let response: ListZonesResponse =
            self.get_json(&["zones"])
                .await
                .map_err(|e| DnsError::ZoneLookupFailed {
                    reason: e.to_string(),
                })?;

        Ok(response
            .zones
            .into_iter()
            .map(|z| Zone::new(z.id, z.name))
            .collect())
    }

    async fn list_records(&self, zone: &Zone) -> Result<Vec<ResourceRecordSet>, DnsError> {
        let response: ListRrsetsResponse = self
            .get_json(&["zones", &zone.id, "rrsets"])
            .await
            .map_err(|e| DnsError::RecordListFailed {
                zone: zone.name.clone(),
                reason: e.to_string(),
            })?;

        let mut records = Vec::with_capacity(response.rrsets.len());
        for dto in response.rrsets {
            // hickory only accepts upper-case mnemonics.
            match RecordType::from_str(&dto.record_type.to_ascii_uppercase()) {
                Ok(record_type) => records.push(ResourceRecordSet::new(
                    dto.name,
                    dto.rrdatas,
                    dto.ttl,
                    record_type,
                )),
                Err(_) => debug!(
                    zone = %zone.name,
                    name = %dto.name,
                    record_type = %dto.record_type,
                    "Skipping record set with unrecognised type"
                ),
            }
        }
        Ok(records)
    }

    async fn apply_changeset(&self, changeset: &Changeset) -> Result<(), DnsError> {
        let zone = changeset.zone();
        let body = ChangeRequest {
            additions: changeset.additions().iter().map(RrsetDto::from).collect(),
        };

        self.post_json(&["zones", &zone.id, "changes"], &body)
            .await
            .map_err(|e| DnsError::ChangesetApplyFailed {
                zone: zone.name.clone(),
                records: changeset.names(),
                reason: e.to_string(),
            })?;

        info!(
            zone = %zone.name,
            count = changeset.len(),
            "Applied changeset via DNS provider API"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod http_tests;
