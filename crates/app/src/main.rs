use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use hensai_client::ApiClient;
use hensai_core::{PeriodFilter, SortDirection, StatusFilter, SystemClock};

mod commands;
mod config;
mod error;

use error::AppError;

#[derive(Parser, Debug)]
#[command(name = "hensai", version, about = "Scholarship loan repayment tracker")]
struct Cli {
    /// Base URL of the repayment service (overrides env and config file)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show summary statistics and the installments nearest today
    Dashboard {
        /// Number of installments in the preview
        #[arg(long, default_value_t = 5)]
        window: usize,
    },
    /// List the schedule with filters, sorting, and pagination
    List {
        /// all | completed | scheduled | delayed
        #[arg(long, default_value = "all")]
        status: StatusFilter,
        /// all | this-month | next-month | this-year
        #[arg(long, default_value = "all")]
        period: PeriodFilter,
        /// Substring match on the due date or the amount
        #[arg(long)]
        search: Option<String>,
        /// asc | desc
        #[arg(long, default_value = "desc")]
        sort: SortDirection,
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 5)]
        per_page: usize,
    },
    /// Reconcile a bank statement CSV (Shift-JIS) against the schedule
    Reconcile {
        /// Statement file exported from the bank
        file: PathBuf,
        /// Regex marking repayment transfers in the description column
        #[arg(long)]
        marker: Option<String>,
        /// Submit the resulting status transitions to the service
        #[arg(long)]
        upload: bool,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        tracing::error!(kind = ?e.kind, "{}", e.message);
        eprintln!("{}", e.user_message());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = config::load(cli.config.as_deref(), cli.endpoint)?;
    let client = ApiClient::new(&config.endpoint);
    let clock = SystemClock;

    match cli.command {
        Command::Dashboard { window } => commands::dashboard(&client, &clock, window).await,
        Command::List {
            status,
            period,
            search,
            sort,
            page,
            per_page,
        } => {
            commands::list(
                &client,
                &clock,
                commands::ListOptions {
                    status,
                    period,
                    search,
                    sort,
                    page,
                    per_page,
                },
            )
            .await
        }
        Command::Reconcile {
            file,
            marker,
            upload,
        } => {
            let marker = marker.as_deref().or(config.transfer_marker.as_deref());
            commands::reconcile_csv(&client, &clock, &file, marker, upload).await
        }
    }
}
