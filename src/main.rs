use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use departure_planner::config::Config;
use departure_planner::google::GoogleDirectionsClient;
use departure_planner::planner::{MAX_STOPS, PlanOptions, PlanRequest, optimize};
use departure_planner::report::render_plan;
use departure_planner::schedule::{BusinessHours, DEFAULT_FIRST_HOUR, DEFAULT_LAST_HOUR};

#[derive(Parser)]
#[command(author, version, about = "Pick the delivery stop order and departure hour with the least driving time", long_about = None)]
struct Cli {
    /// Delivery address, repeat for up to five stops
    #[arg(short, long = "stop", value_name = "ADDRESS")]
    stops: Vec<String>,

    /// Delivery date as YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Depot address (default: DEPOT_ADDRESS from the environment)
    #[arg(long)]
    depot: Option<String>,

    /// Evaluate departure times one at a time
    #[arg(long)]
    sequential: bool,

    /// First departure hour of the business day
    #[arg(long, default_value_t = DEFAULT_FIRST_HOUR)]
    first_hour: u32,

    /// Last departure hour of the business day (inclusive)
    #[arg(long, default_value_t = DEFAULT_LAST_HOUR)]
    last_hour: u32,

    /// Log every oracle call
    #[arg(short, long)]
    debug: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let stops: Vec<String> = cli
        .stops
        .into_iter()
        .map(|stop| stop.trim().to_string())
        .filter(|stop| !stop.is_empty())
        .collect();
    if stops.is_empty() {
        anyhow::bail!("enter at least one delivery address (up to {}) with --stop", MAX_STOPS);
    }

    let config = Config::from_env().context("failed to load configuration")?;
    let depot = cli.depot.unwrap_or(config.depot_address);
    let oracle = GoogleDirectionsClient::new(config.directions)
        .context("failed to build Directions client")?;

    let now = Local::now();
    let request = PlanRequest {
        depot,
        stops,
        date: cli.date.unwrap_or_else(|| now.date_naive()),
    };
    let options = PlanOptions {
        hours: BusinessHours::new(cli.first_hour, cli.last_hour)?,
        parallel: !cli.sequential,
    };

    let plan = optimize(&oracle, &request, &now, &options)?;
    print!("{}", render_plan(&plan));

    if plan.optimal.is_none() {
        std::process::exit(1);
    }
    Ok(())
}
