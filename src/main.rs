// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use dnsprep::{
    cluster::Cluster,
    config::{DnsPolicy, ProviderConfig, ProviderKind, PublicResolver},
    constants::{ENV_PROVIDER, ENV_PROVIDER_ENDPOINT, ENV_PROVIDER_TOKEN, ENV_PUBLIC_RESOLVER},
    hostnames::build_precreate_hostnames,
    metrics::gather_metrics,
    nameservers::HickoryNameserverLookup,
    precreate::precreate_dns,
    provider::{build_provider, DnsProvider, MemoryProvider, Zone},
    validate::validate_dns,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

/// Zone ID used by the in-memory backend for dry runs
const DRY_RUN_ZONE_ID: &str = "dry-run";

/// Validate and pre-populate DNS for a cluster being provisioned.
#[derive(Parser, Debug)]
#[command(name = "dnsprep")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// DNS provider backend (`memory` performs a dry run against an empty zone)
    #[arg(long, env = ENV_PROVIDER, default_value = "memory", global = true)]
    provider: ProviderKind,

    /// Base URL of the hosted-zone API (http provider)
    #[arg(long, env = ENV_PROVIDER_ENDPOINT, global = true)]
    endpoint: Option<String>,

    /// Bearer token for the hosted-zone API (http provider)
    #[arg(long, env = ENV_PROVIDER_TOKEN, hide_env_values = true, global = true)]
    token: Option<String>,

    /// Print Prometheus metrics to stdout when done
    #[arg(long, global = true)]
    print_metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the cluster's DNS zone has public NS records
    Validate(ValidateArgs),

    /// Create placeholder A records for names the cluster will need
    Precreate(PrecreateArgs),

    /// Print the hostnames that would be pre-created
    Hostnames(ClusterArgs),
}

#[derive(Args, Debug)]
struct ClusterArgs {
    /// Cluster spec (YAML or JSON)
    #[arg(short, long)]
    cluster: PathBuf,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    #[command(flatten)]
    cluster: ClusterArgs,

    /// Public resolver used for the NS lookup
    #[arg(long, env = ENV_PUBLIC_RESOLVER, default_value = "google")]
    resolver: PublicResolver,

    /// Warn instead of failing when the zone has no NS records
    #[arg(long)]
    ignore_ns_check: bool,
}

#[derive(Args, Debug)]
struct PrecreateArgs {
    #[command(flatten)]
    cluster: ClusterArgs,

    /// Skip pre-creation regardless of feature flags
    #[arg(long)]
    no_precreate: bool,
}

fn main() -> Result<()> {
    // Every step is a sequential chain of network calls; one thread is enough.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .thread_name("dnsprep")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    // Respects RUST_LOG (default: info) and RUST_LOG_FORMAT (json|text)
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    let cli = Cli::parse();

    let provider_config = ProviderConfig {
        kind: cli.provider,
        endpoint: cli.endpoint.clone(),
        token: cli.token.clone(),
    };
    let mut policy = DnsPolicy::from_env();

    match &cli.command {
        Commands::Validate(args) => {
            let cluster = load_cluster(&args.cluster)?;
            if args.ignore_ns_check {
                policy.ignore_ns_check = true;
            }
            let provider = provider_for(&provider_config, &cluster)?;
            let nameservers = HickoryNameserverLookup::new(args.resolver)?;

            validate_dns(&cluster, provider.as_ref(), &nameservers, &policy).await?;
            info!(cluster = %cluster.name(), "DNS validation passed");
        }
        Commands::Precreate(args) => {
            let cluster = load_cluster(&args.cluster)?;
            if args.no_precreate {
                policy.precreate_enabled = false;
            }
            let provider = provider_for(&provider_config, &cluster)?;

            let report = precreate_dns(&cluster, provider.as_ref(), &policy).await?;
            for hostname in &report.created {
                println!("created\t{hostname}");
            }
            for hostname in &report.existing {
                println!("exists\t{hostname}");
            }
            for hostname in &report.aliases {
                println!("alias\t{hostname}");
            }
        }
        Commands::Hostnames(args) => {
            let cluster = load_cluster(args)?;
            for hostname in build_precreate_hostnames(&cluster, &policy) {
                println!("{hostname}");
            }
        }
    }

    if cli.print_metrics {
        print!("{}", gather_metrics().context("Failed to encode metrics")?);
    }

    Ok(())
}

fn load_cluster(args: &ClusterArgs) -> Result<Cluster> {
    let cluster = Cluster::from_file(&args.cluster)?;
    debug!(
        cluster = %cluster.name(),
        dns_zone = %cluster.spec.dns_zone,
        "Loaded cluster spec"
    );
    Ok(cluster)
}

/// Build the configured provider; the in-memory backend gets an empty copy of
/// the cluster's zone so runs against it show what would change.
fn provider_for(config: &ProviderConfig, cluster: &Cluster) -> Result<Arc<dyn DnsProvider>> {
    if config.kind == ProviderKind::Memory {
        info!(
            dns_zone = %cluster.spec.dns_zone,
            "Using in-memory DNS provider (dry run)"
        );
        let provider =
            MemoryProvider::new().with_zone(Zone::new(DRY_RUN_ZONE_ID, &cluster.spec.dns_zone));
        return Ok(Arc::new(provider));
    }
    Ok(build_provider(config)?)
}
