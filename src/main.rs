// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

use anyhow::Result;
use axum::routing::get;
use axum::Router;
use clap::Parser;
use dnsync::constants::{DEFAULT_METRICS_ADDR, DEFAULT_REQUEUE_SECONDS, ERROR_REQUEUE_SECONDS};
use dnsync::crd::DNSEndpoint;
use dnsync::metrics::gather_metrics;
use dnsync::reconciler::{error_policy, reconcile_dnsendpoint, Context};
use dnsync::status_client::api::ApiStatusClient;
use dnsync::status_client::rest::RestStatusClient;
use dnsync::status_client::StatusClient;
use dnsync::status_updater::StatusUpdater;
use futures::StreamExt;
use kube::runtime::watcher::Config;
use kube::runtime::Controller;
use kube::{Api, Client};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

/// Transport used for DNSEndpoint status writes.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum StatusTransport {
    /// Typed kube Api client
    Api,
    /// Direct REST requests against the apiserver
    Rest,
}

/// External DNS synchronization status operator for Kubernetes
#[derive(Parser, Debug)]
#[command(name = "dnsync", version, about)]
struct Args {
    /// Bind address for the metrics and health endpoint server
    #[arg(long, default_value = DEFAULT_METRICS_ADDR)]
    metrics_addr: String,

    /// Interval between periodic re-reconciles of settled resources, in seconds
    #[arg(long, default_value_t = DEFAULT_REQUEUE_SECONDS)]
    requeue_interval: u64,

    /// Transport for status subresource writes
    #[arg(long, value_enum, default_value_t = StatusTransport::Api)]
    status_transport: StatusTransport,
}

fn main() -> Result<()> {
    // Build Tokio runtime with custom thread names
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(4)
        .thread_name("dnsync-controller")
        .enable_all()
        .build()?;

    runtime.block_on(async_main())
}

async fn async_main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging with custom format
    // Format: timestamp file:line LEVEL message
    //
    // Respects RUST_LOG environment variable if set, otherwise defaults to INFO level
    // Example: RUST_LOG=debug cargo run
    //
    // Respects RUST_LOG_FORMAT environment variable for output format
    // Example: RUST_LOG_FORMAT=json cargo run
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let log_format = std::env::var("RUST_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    match log_format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .json()
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_file(true)
                .with_line_number(true)
                .with_thread_names(true)
                .with_target(false)
                .with_ansi(true)
                .compact()
                .init();
        }
    }

    info!("Starting dnsync status operator");

    debug!("Initializing Kubernetes client");
    let client = Client::try_default().await?;
    debug!("Kubernetes client initialized successfully");

    // Transport is a constructor-time choice; nothing downstream branches on it
    let status_client: Arc<dyn StatusClient> = match args.status_transport {
        StatusTransport::Api => Arc::new(ApiStatusClient::new(client.clone())),
        StatusTransport::Rest => Arc::new(RestStatusClient::new(client.clone())),
    };
    let status =
        Arc::new(StatusUpdater::new(status_client).with_event_recorder(client.clone()));

    let ctx = Arc::new(Context {
        status,
        requeue_interval: Duration::from_secs(args.requeue_interval),
        error_requeue_interval: Duration::from_secs(ERROR_REQUEUE_SECONDS),
    });

    // Controllers should never exit - if one fails, we log it and exit the main process
    tokio::select! {
        result = run_dnsendpoint_controller(client, ctx) => {
            error!("CRITICAL: DNSEndpoint controller exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("DNSEndpoint controller exited unexpectedly without error")
        }
        result = serve_metrics(args.metrics_addr) => {
            error!("CRITICAL: metrics server exited unexpectedly: {:?}", result);
            result?;
            anyhow::bail!("metrics server exited unexpectedly without error")
        }
    }
}

/// Run the `DNSEndpoint` controller
async fn run_dnsendpoint_controller(client: Client, ctx: Arc<Context>) -> Result<()> {
    info!("Starting DNSEndpoint controller");

    let api = Api::<DNSEndpoint>::all(client);

    Controller::new(api, Config::default())
        .run(reconcile_dnsendpoint, error_policy, ctx)
        .for_each(|_| futures::future::ready(()))
        .await;

    Ok(())
}

/// Serve `/metrics`, `/healthz`, and `/readyz`
async fn serve_metrics(addr: String) -> Result<()> {
    let router = Router::new()
        .route(
            "/metrics",
            get(|| async {
                gather_metrics().unwrap_or_else(|e| format!("# metrics encoding failed: {e}\n"))
            }),
        )
        .route("/healthz", get(|| async { "ok" }))
        .route("/readyz", get(|| async { "ok" }));

    info!(addr = %addr, "Serving metrics and health endpoints");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
