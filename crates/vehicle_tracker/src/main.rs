use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vehicle_tracker::config::Config;
use vehicle_tracker::dynamodb::{
    create_client, AwsConfig, DynamoTableService, ProvisionOutcome, Provisioner,
};
use vehicle_tracker_core::table::{format_provision_plan, BillingMode, TableOption, TableSpec};

/// Create the VehicleTracker DynamoDB table if it does not exist yet
#[derive(Parser, Debug)]
#[command(name = "vehicle_tracker")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Table name (defaults to VehicleTracker)
    #[arg(long)]
    table_name: Option<String>,

    /// AWS region
    #[arg(long, default_value = "us-east-1", env = "AWS_REGION")]
    region: String,

    /// Custom endpoint URL, e.g. http://localhost:8000 for local DynamoDB
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    endpoint_url: Option<String>,

    /// Billing mode (defaults to provisioned)
    #[arg(long, value_enum)]
    billing_mode: Option<BillingModeArg>,

    /// Provisioned read capacity units
    #[arg(long, requires = "write_capacity")]
    read_capacity: Option<i64>,

    /// Provisioned write capacity units
    #[arg(long, requires = "read_capacity")]
    write_capacity: Option<i64>,

    /// Seconds to wait for the table to become active
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Seconds between table status polls
    #[arg(long)]
    poll_interval_secs: Option<u64>,

    /// Print the provisioning plan and exit without creating anything
    #[arg(long)]
    plan: bool,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum BillingModeArg {
    Provisioned,
    PayPerRequest,
}

impl From<BillingModeArg> for BillingMode {
    fn from(arg: BillingModeArg) -> Self {
        match arg {
            BillingModeArg::Provisioned => BillingMode::Provisioned,
            BillingModeArg::PayPerRequest => BillingMode::PayPerRequest,
        }
    }
}

impl Cli {
    /// Overrides requested on the command line, in a fixed order.
    fn table_options(&self) -> Vec<TableOption> {
        let mut options = Vec::new();
        if let Some(name) = &self.table_name {
            options.push(TableOption::TableName(name.clone()));
        }
        if let (Some(read), Some(write)) = (self.read_capacity, self.write_capacity) {
            options.push(TableOption::ProvisionedThroughput { read, write });
        }
        if let Some(billing_mode) = self.billing_mode {
            options.push(TableOption::BillingMode(billing_mode.into()));
        }
        options
    }

    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout_secs = timeout_secs;
        }
        if let Some(poll_interval_secs) = self.poll_interval_secs {
            config.poll_interval_secs = poll_interval_secs;
        }
        config
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vehicle_tracker=info,vehicle_tracker_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let spec = TableSpec::with_options(cli.table_options())?;
    let config = cli.config();
    let aws_config = AwsConfig {
        endpoint_url: cli.endpoint_url.clone(),
        region: cli.region.clone(),
    };

    tracing::info!(
        target = %aws_config.target_display(),
        table_name = spec.table_name(),
        "Provisioning table"
    );

    let client = create_client(&aws_config).await;

    // Single cancellation token, tripped by Ctrl+C or SIGTERM
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let provisioner = Provisioner::new(DynamoTableService::new(client))
        .with_settings(config.provision_settings())
        .with_cancellation(cancel);

    if cli.plan {
        let plan = provisioner.plan(&spec).await?;
        for line in format_provision_plan(&plan) {
            println!("{}", line);
        }
        return Ok(());
    }

    match provisioner.create_if_not_exist(&spec).await? {
        ProvisionOutcome::Created => {
            tracing::info!(table_name = spec.table_name(), "Table is ready")
        }
        ProvisionOutcome::AlreadyExists => {
            tracing::info!(table_name = spec.table_name(), "Nothing to do")
        }
    }

    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, cancelling...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, cancelling...");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_yields_default_spec() {
        let cli = Cli::parse_from(["vehicle_tracker"]);

        let spec = TableSpec::with_options(cli.table_options()).unwrap();

        assert_eq!(spec, TableSpec::default());
    }

    #[test]
    fn test_flags_become_table_options() {
        let cli = Cli::parse_from([
            "vehicle_tracker",
            "--table-name",
            "Fleet",
            "--read-capacity",
            "10",
            "--write-capacity",
            "4",
            "--billing-mode",
            "pay-per-request",
        ]);

        assert_eq!(
            cli.table_options(),
            vec![
                TableOption::TableName("Fleet".to_string()),
                TableOption::ProvisionedThroughput { read: 10, write: 4 },
                TableOption::BillingMode(BillingMode::PayPerRequest),
            ]
        );
    }

    #[test]
    fn test_invalid_table_name_is_rejected() {
        let cli = Cli::parse_from(["vehicle_tracker", "--table-name", "no spaces"]);

        assert!(TableSpec::with_options(cli.table_options()).is_err());
    }

    #[test]
    fn test_capacity_flags_require_each_other() {
        let result = Cli::try_parse_from(["vehicle_tracker", "--read-capacity", "10"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_timeout_flag_overrides_config() {
        let cli = Cli::parse_from(["vehicle_tracker", "--timeout-secs", "42"]);
        assert_eq!(cli.config().timeout_secs, 42);
    }
}
