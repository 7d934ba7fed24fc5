use std::path::PathBuf;

use clap::Parser;

/// Approval monitor: summarize a model's approval notifications
#[derive(Parser)]
#[command(name = "approval-monitor", version, about)]
pub struct Cli {
    /// Job descriptor JSON; its `referenceModel` names the monitored model
    #[arg(short, long, default_value = "demos/example_job.json")]
    pub job: PathBuf,

    /// Gateway base URL (overrides MODELOP_GATEWAY_LOCATION from the environment)
    #[arg(long, env = "MODELOP_GATEWAY_LOCATION")]
    pub gateway_location: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
