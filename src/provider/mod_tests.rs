// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider types and backend selection.

#[cfg(test)]
mod tests {
    use crate::config::{ProviderConfig, ProviderKind};
    use crate::dns_errors::DnsError;
    use crate::provider::{
        build_provider, record_key, trim_trailing_dot, Changeset, ResourceRecordSet, Zone,
    };
    use hickory_proto::rr::RecordType;

    #[test]
    fn test_trim_trailing_dot_strips_only_one() {
        assert_eq!(trim_trailing_dot("example.com."), "example.com");
        assert_eq!(trim_trailing_dot("example.com"), "example.com");
        assert_eq!(trim_trailing_dot("example.com.."), "example.com.");
        assert_eq!(trim_trailing_dot(""), "");
    }

    #[test]
    fn test_record_key_normalizes_name() {
        assert_eq!(record_key(RecordType::A, "api.example.com."), "A::api.example.com");
        assert_eq!(
            record_key(RecordType::CNAME, "www.example.com"),
            "CNAME::www.example.com"
        );
    }

    #[test]
    fn test_record_set_key_matches_record_key() {
        let rrset = ResourceRecordSet::new(
            "etcd-a.internal.foo.",
            vec!["10.0.0.1".to_string()],
            60,
            RecordType::A,
        );
        assert_eq!(rrset.key(), record_key(RecordType::A, "etcd-a.internal.foo"));
        assert_eq!(rrset.normalized_name(), "etcd-a.internal.foo");
    }

    #[test]
    fn test_zone_normalized_name() {
        let zone = Zone::new("Z123", "example.com.");
        assert_eq!(zone.normalized_name(), "example.com");
    }

    #[test]
    fn test_changeset_tracks_additions() {
        let mut changeset = Changeset::new(Zone::new("Z1", "example.com."));
        assert!(changeset.is_empty());

        changeset.add_record(
            "api.example.com",
            vec!["203.0.113.123".to_string()],
            10,
            RecordType::A,
        );
        changeset.add_record(
            "etcd-a.internal.example.com",
            vec!["203.0.113.123".to_string()],
            10,
            RecordType::A,
        );

        assert!(!changeset.is_empty());
        assert_eq!(changeset.len(), 2);
        assert_eq!(changeset.zone().id, "Z1");
        assert_eq!(
            changeset.names(),
            vec!["api.example.com", "etcd-a.internal.example.com"]
        );
        assert_eq!(changeset.additions()[0].ttl, 10);
    }

    #[test]
    fn test_build_memory_provider() {
        let provider = build_provider(&ProviderConfig::default()).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Memory);
    }

    #[test]
    fn test_build_http_provider_requires_endpoint() {
        let config = ProviderConfig {
            kind: ProviderKind::Http,
            endpoint: None,
            token: None,
        };

        let err = build_provider(&config).err().unwrap();
        assert!(matches!(err, DnsError::ProviderUnavailable { .. }));
    }

    #[test]
    fn test_build_http_provider_rejects_bad_endpoint() {
        let config = ProviderConfig {
            kind: ProviderKind::Http,
            endpoint: Some("not a url".to_string()),
            token: None,
        };

        let err = build_provider(&config).err().unwrap();
        assert_eq!(err.status_reason(), "ProviderUnavailable");
    }

    #[test]
    fn test_build_http_provider() {
        let config = ProviderConfig {
            kind: ProviderKind::Http,
            endpoint: Some("https://dns.example.net/api/".to_string()),
            token: Some("secret".to_string()),
        };

        let provider = build_provider(&config).unwrap();
        assert_eq!(provider.kind(), ProviderKind::Http);
    }
}
