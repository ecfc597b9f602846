// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for runtime configuration.

#[cfg(test)]
mod tests {
    use crate::config::{
        parse_feature_flags, DnsPolicy, ProviderConfig, ProviderKind, PublicResolver,
    };
    use crate::constants::{PLACEHOLDER_IP, PLACEHOLDER_TTL_SECS};
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_policy() {
        let policy = DnsPolicy::default();

        assert!(policy.precreate_enabled);
        assert!(!policy.ignore_ns_check);
        assert_eq!(policy.placeholder_ip, PLACEHOLDER_IP);
        assert_eq!(policy.placeholder_value(), "203.0.113.123");
        assert_eq!(policy.placeholder_ttl, PLACEHOLDER_TTL_SECS);
        assert_eq!(policy.placeholder_ttl, 10);
        assert_eq!(policy.etcd_main_cluster, "main");
        assert_eq!(policy.etcd_prefix, "etcd");
    }

    #[test]
    fn test_policy_from_empty_environment() {
        let policy = DnsPolicy::from_lookup(lookup_from(&[]));
        assert_eq!(policy, DnsPolicy::default());
    }

    #[test]
    fn test_ignore_ns_check_any_non_empty_value() {
        let policy = DnsPolicy::from_lookup(lookup_from(&[("DNS_IGNORE_NS_CHECK", "1")]));
        assert!(policy.ignore_ns_check);

        let policy = DnsPolicy::from_lookup(lookup_from(&[("DNS_IGNORE_NS_CHECK", "false")]));
        assert!(policy.ignore_ns_check, "any non-empty value counts as set");

        let policy = DnsPolicy::from_lookup(lookup_from(&[("DNS_IGNORE_NS_CHECK", "")]));
        assert!(!policy.ignore_ns_check);
    }

    #[test]
    fn test_precreate_feature_flag() {
        let policy =
            DnsPolicy::from_lookup(lookup_from(&[("DNSPREP_FEATURE_FLAGS", "-DNSPreCreate")]));
        assert!(!policy.precreate_enabled);

        let policy = DnsPolicy::from_lookup(lookup_from(&[(
            "DNSPREP_FEATURE_FLAGS",
            "-DNSPreCreate,+DNSPreCreate",
        )]));
        assert!(policy.precreate_enabled, "later entries win");

        let policy = DnsPolicy::from_lookup(lookup_from(&[(
            "DNSPREP_FEATURE_FLAGS",
            "SomethingElse, -DNSPreCreate",
        )]));
        assert!(!policy.precreate_enabled);
    }

    #[test]
    fn test_parse_feature_flags() {
        assert_eq!(
            parse_feature_flags(" +A, -B ,C,,"),
            vec![
                ("A".to_string(), true),
                ("B".to_string(), false),
                ("C".to_string(), true),
            ]
        );
        assert!(parse_feature_flags("").is_empty());
    }

    #[test]
    fn test_provider_kind_parse_and_display() {
        assert_eq!("HTTP".parse::<ProviderKind>().unwrap(), ProviderKind::Http);
        assert_eq!("memory".parse::<ProviderKind>().unwrap(), ProviderKind::Memory);
        assert_eq!(ProviderKind::Http.to_string(), "http");
        assert_eq!(ProviderConfig::default().kind, ProviderKind::Memory);

        let err = "bind".parse::<ProviderKind>().unwrap_err();
        assert!(err.contains("bind"));
    }

    #[test]
    fn test_public_resolver_parse_and_display() {
        for name in ["google", "cloudflare", "quad9", "system"] {
            let resolver: PublicResolver = name.parse().unwrap();
            assert_eq!(resolver.to_string(), name);
        }
        assert_eq!(PublicResolver::default(), PublicResolver::Google);
        assert!("opendns".parse::<PublicResolver>().is_err());
    }
}
