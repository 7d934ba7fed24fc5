use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use approval_monitor::config;
use approval_monitor::models::job::InitParam;
use approval_monitor::monitor::{self, MonitorContext};
use approval_monitor::notification::NotificationsClient;

mod cli;

/// Stand-in for the upstream input asset; the monitor never reads it.
const SAMPLE_ROW: &str = r#"
    { "foo": 2.2,
      "bar": 1.3,
      "strvalue": "foo",
      "objectvalue": {
        "val1": 0.8392,
        "val2": 0.987
      }
    }
"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();
    init_tracing(args.json_logs);

    let result = run(args).await;
    if let Err(ref e) = result {
        tracing::error!("approval monitor failed: {:#}", e);
    }
    result
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "approval_monitor=info".into()),
    );

    // stdout carries the summary, logs go to stderr
    let (plain, json) = if json {
        (
            None,
            Some(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)),
        )
    } else {
        (
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
            None,
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(plain)
        .with(json)
        .init();
}

async fn run(args: cli::Cli) -> anyhow::Result<()> {
    let mut cfg = config::load()?;
    if let Some(location) = args.gateway_location {
        cfg = cfg.with_gateway_location(location);
    }

    let raw_json = tokio::fs::read_to_string(&args.job)
        .await
        .with_context(|| format!("failed to read job file {}", args.job.display()))?;
    let ctx = MonitorContext::init(&InitParam::new(raw_json)).context("failed to initialize monitor")?;

    let client = NotificationsClient::new(&cfg)?;
    tracing::info!(endpoint = %client.endpoint(), "querying notification service");

    let rows: Vec<serde_json::Value> =
        vec![serde_json::from_str(SAMPLE_ROW).context("invalid sample row")?];
    let summary = monitor::summarize(&ctx, &client, &rows)
        .await
        .context("failed to summarize approvals")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
