// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for placeholder record pre-creation.

#[cfg(test)]
mod tests {
    use crate::cluster::{Cluster, EtcdClusterSpec, EtcdMemberSpec};
    use crate::config::DnsPolicy;
    use crate::constants::{PLACEHOLDER_IP, PLACEHOLDER_TTL_SECS};
    use crate::dns_errors::DnsError;
    use crate::precreate::precreate_dns;
    use crate::provider::memory::{MemoryProvider, Operation};
    use crate::provider::{ResourceRecordSet, Zone};
    use hickory_proto::rr::RecordType;

    fn cluster() -> Cluster {
        let mut cluster = Cluster::default();
        cluster.metadata.name = "foo.example.com".to_string();
        cluster.spec.dns_zone = "example.com".to_string();
        cluster.spec.master_public_name = Some("api.foo.example.com".to_string());
        cluster.spec.master_internal_name = Some("api.internal.foo.example.com".to_string());
        cluster.spec.etcd_clusters = vec![
            EtcdClusterSpec {
                name: "main".to_string(),
                members: vec![EtcdMemberSpec {
                    name: "a".to_string(),
                    instance_group: None,
                }],
            },
            EtcdClusterSpec {
                name: "events".to_string(),
                members: vec![EtcdMemberSpec {
                    name: "a".to_string(),
                    instance_group: None,
                }],
            },
        ];
        cluster
    }

    fn provider() -> MemoryProvider {
        MemoryProvider::new().with_zone(Zone::new("Z1", "example.com."))
    }

    fn a_record(name: &str, rrdatas: &[&str]) -> ResourceRecordSet {
        ResourceRecordSet::new(
            name,
            rrdatas.iter().map(|v| (*v).to_string()).collect(),
            300,
            RecordType::A,
        )
    }

    #[tokio::test]
    async fn test_precreate_creates_all_missing_records() {
        let provider = provider();

        let report = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert_eq!(
            report.created,
            vec![
                "api.foo.example.com",
                "api.internal.foo.example.com",
                "etcd-a.internal.foo.example.com",
                "etcd-events-a.internal.foo.example.com",
            ]
        );
        assert!(report.changed());
        assert_eq!(report.zone.unwrap().id, "Z1");
        assert_eq!(provider.apply_calls(), 1);

        let records = provider.records("Z1");
        assert_eq!(records.len(), 4);
        for record in records {
            assert_eq!(record.record_type, RecordType::A);
            assert_eq!(record.rrdatas, vec![PLACEHOLDER_IP.to_string()]);
            assert_eq!(record.ttl, PLACEHOLDER_TTL_SECS);
        }
    }

    #[tokio::test]
    async fn test_precreate_is_idempotent() {
        let provider = provider();
        let policy = DnsPolicy::default();

        let first = precreate_dns(&cluster(), &provider, &policy).await.unwrap();
        assert_eq!(first.created.len(), 4);
        assert_eq!(provider.apply_calls(), 1);

        let second = precreate_dns(&cluster(), &provider, &policy).await.unwrap();
        assert!(second.created.is_empty());
        assert_eq!(second.existing.len(), 4);
        assert_eq!(provider.apply_calls(), 1, "second run must not write");
        assert_eq!(provider.records("Z1").len(), 4);
    }

    #[tokio::test]
    async fn test_precreate_leaves_existing_records_alone() {
        let provider = provider().with_record(
            "Z1",
            a_record("api.foo.example.com.", &["198.51.100.7"]),
        );

        let report = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert_eq!(report.existing, vec!["api.foo.example.com"]);
        assert_eq!(report.created.len(), 3);
        assert!(!report.created.contains(&"api.foo.example.com".to_string()));

        let api = provider
            .records("Z1")
            .into_iter()
            .find(|r| r.normalized_name() == "api.foo.example.com")
            .unwrap();
        assert_eq!(api.rrdatas, vec!["198.51.100.7"]);
    }

    #[tokio::test]
    async fn test_precreate_preserves_alias_records() {
        let provider = provider().with_record("Z1", a_record("api.foo.example.com", &[]));

        let report = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert_eq!(report.aliases, vec!["api.foo.example.com"]);
        assert!(!report.created.contains(&"api.foo.example.com".to_string()));

        let api: Vec<_> = provider
            .records("Z1")
            .into_iter()
            .filter(|r| r.normalized_name() == "api.foo.example.com")
            .collect();
        assert_eq!(api.len(), 1);
        assert!(api[0].rrdatas.is_empty(), "alias must not be overwritten");
    }

    #[tokio::test]
    async fn test_precreate_ignores_other_record_types() {
        let provider = provider().with_record(
            "Z1",
            ResourceRecordSet::new(
                "api.foo.example.com.",
                vec!["lb.example.net.".to_string()],
                300,
                RecordType::CNAME,
            ),
        );

        let report = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap();

        // Only A records count as present.
        assert!(report.created.contains(&"api.foo.example.com".to_string()));
    }

    #[tokio::test]
    async fn test_precreate_nothing_missing_skips_apply() {
        let provider = provider()
            .with_record("Z1", a_record("api.foo.example.com.", &["10.0.0.1"]))
            .with_record("Z1", a_record("api.internal.foo.example.com.", &["10.0.0.2"]))
            .with_record("Z1", a_record("etcd-a.internal.foo.example.com.", &["10.0.0.3"]))
            .with_record(
                "Z1",
                a_record("etcd-events-a.internal.foo.example.com", &[]),
            );

        let report = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert!(!report.changed());
        assert_eq!(report.existing.len(), 3);
        assert_eq!(report.aliases.len(), 1);
        assert_eq!(provider.apply_calls(), 0);
    }

    #[tokio::test]
    async fn test_precreate_deduplicates_hostnames() {
        let mut cluster = cluster();
        cluster.spec.master_internal_name = Some("api.foo.example.com.".to_string());
        let provider = provider();

        let report = precreate_dns(&cluster, &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert_eq!(
            report
                .created
                .iter()
                .filter(|h| *h == "api.foo.example.com")
                .count(),
            1
        );
        assert_eq!(provider.records("Z1").len(), 3);
    }

    #[tokio::test]
    async fn test_precreate_disabled_makes_no_provider_calls() {
        let provider = provider();
        let policy = DnsPolicy {
            precreate_enabled: false,
            ..DnsPolicy::default()
        };

        let report = precreate_dns(&cluster(), &provider, &policy).await.unwrap();

        assert_eq!(report, Default::default());
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_precreate_no_hostnames_makes_no_provider_calls() {
        let provider = provider();
        let mut cluster = Cluster::default();
        cluster.spec.dns_zone = "example.com".to_string();

        let report = precreate_dns(&cluster, &provider, &DnsPolicy::default())
            .await
            .unwrap();

        assert!(report.zone.is_none());
        assert_eq!(provider.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_precreate_uses_policy_placeholder() {
        let provider = provider();
        let policy = DnsPolicy {
            placeholder_ip: "192.0.2.1".parse().unwrap(),
            placeholder_ttl: 30,
            ..DnsPolicy::default()
        };

        precreate_dns(&cluster(), &provider, &policy).await.unwrap();

        let record = &provider.records("Z1")[0];
        assert_eq!(record.rrdatas, vec!["192.0.2.1"]);
        assert_eq!(record.ttl, 30);
    }

    #[tokio::test]
    async fn test_precreate_zone_not_found() {
        let provider = MemoryProvider::new().with_zone(Zone::new("Z1", "example.org."));

        let err = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DnsError::ZoneNotFound { .. }));
        assert_eq!(provider.list_records_calls(), 0);
    }

    #[tokio::test]
    async fn test_precreate_record_list_failure() {
        let provider = provider();
        provider.fail(Operation::ListRecords);

        let err = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap_err();

        assert!(matches!(err, DnsError::RecordListFailed { .. }));
        assert_eq!(provider.apply_calls(), 0);
    }

    #[tokio::test]
    async fn test_precreate_apply_failure_writes_nothing() {
        let provider = provider().with_record(
            "Z1",
            a_record("api.foo.example.com.", &["198.51.100.7"]),
        );
        provider.fail(Operation::ApplyChangeset);

        let err = precreate_dns(&cluster(), &provider, &DnsPolicy::default())
            .await
            .unwrap_err();

        match err {
            DnsError::ChangesetApplyFailed { records, .. } => assert_eq!(records.len(), 3),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(provider.records("Z1").len(), 1);
    }
}
