use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use surge_readiness::alert::{Alert, AlertId};
use surge_readiness::config::{Config, ConfigOverrides};
use surge_readiness::engine::{evaluate, evaluate_alerts, DashboardView};
use surge_readiness::forecast::insights::{summarize_window, ForecastInsights};
use surge_readiness::metrics::MetricOverrides;
use surge_readiness::output::csv::{alerts_to_csv, loads_to_csv, plan_to_csv};
use surge_readiness::output::json::{render_json, render_json_line};
use surge_readiness::output::table::{
    render_alert_table, render_dashboard, render_insights_table, render_recommendations_table,
};
use surge_readiness::recommendations::{recommend, RecommendationPlan};
use surge_readiness::refresh::{refresh_with, LatestView};
use surge_readiness::server::run_server;
use surge_readiness::snapshot::{DashboardSnapshot, SnapshotSource};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Debug, Parser)]
#[command(
    name = "surge-readiness",
    about = "Surge risk and readiness scoring for hospital operations"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long)]
    snapshot: Option<String>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[command(flatten)]
    metrics: MetricArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Default)]
struct MetricArgs {
    #[arg(long = "surge-score", allow_negative_numbers = true)]
    surge_score: Option<f64>,
    #[arg(long = "bed-occupancy")]
    bed_occupancy_pct: Option<f64>,
    #[arg(long)]
    aqi: Option<u32>,
}

impl From<MetricArgs> for MetricOverrides {
    fn from(value: MetricArgs) -> Self {
        Self {
            surge_score: value.surge_score,
            bed_occupancy_pct: value.bed_occupancy_pct,
            aqi: value.aqi,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Evaluate,
    Alerts,
    Insights,
    /// Staffing, supplies, beds and advisories for the next surge event.
    Recommendations {
        /// Reference date for picking the active event (defaults to today).
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },
    Watch {
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
        #[arg(long, default_value_t = 1)]
        iterations: u32,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    Sample {
        /// Also write the sample to the configured snapshot path.
        #[arg(long)]
        write: bool,
    },
    Config {
        #[arg(long)]
        init: bool,
        #[arg(long)]
        show: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        snapshot_path: cli.snapshot.clone(),
    });
    let source = SnapshotSource::open(config.resolved_snapshot_path());
    let overrides: MetricOverrides = cli.metrics.clone().into();

    match &cli.command {
        Commands::Config { init, show } => {
            handle_config_command(*init, *show, &config, &config_path)?;
        }
        Commands::Serve { host, port } => {
            let host = host.clone().unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let bind = format!("{host}:{port}");
            let addr: SocketAddr = bind
                .parse()
                .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
            run_server(config, addr).await?;
        }
        Commands::Sample { write } => {
            let sample = DashboardSnapshot::sample(Local::now().date_naive());
            if *write {
                source.write_sample(&sample)?;
                info!("wrote sample snapshot to {}", source.path().display());
            }
            println!("{}", render_json(&sample)?);
        }
        Commands::Evaluate => {
            let snapshot = load_snapshot(&source, &overrides)?;
            print_dashboard(&evaluate(&snapshot), cli.output)?;
        }
        Commands::Alerts => {
            let snapshot = load_snapshot(&source, &overrides)?;
            print_alerts(&evaluate_alerts(&snapshot), cli.output)?;
        }
        Commands::Insights => {
            let snapshot = load_snapshot(&source, &overrides)?;
            print_insights(&summarize_window(&snapshot.forecast), cli.output)?;
        }
        Commands::Recommendations { as_of } => {
            let snapshot = load_snapshot(&source, &overrides)?;
            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            let plan = recommend(&snapshot, as_of)
                .ok_or_else(|| anyhow!("snapshot lists no events to plan for"))?;
            print_recommendations(&plan, cli.output)?;
        }
        Commands::Watch {
            interval_secs,
            iterations,
        } => {
            run_watch_loop(&source, &overrides, *interval_secs, *iterations, cli.output).await?;
        }
    }

    Ok(())
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &PathBuf,
) -> Result<()> {
    if init {
        Config::write_template(config_path)?;
        println!("Wrote config template to {}", config_path.display());
    }
    if show || !init {
        println!("{}", render_json(config)?);
    }
    Ok(())
}

fn load_snapshot(
    source: &SnapshotSource,
    overrides: &MetricOverrides,
) -> Result<DashboardSnapshot> {
    let snapshot = source
        .load()
        .with_context(|| "run `surge-readiness sample --write` to create a demo snapshot")?;
    if overrides.is_empty() {
        return Ok(snapshot);
    }
    info!("applying metric overrides: {overrides:?}");
    Ok(snapshot.with_overrides(overrides))
}

async fn run_watch_loop(
    source: &SnapshotSource,
    overrides: &MetricOverrides,
    interval_secs: u64,
    iterations: u32,
    format: OutputFormat,
) -> Result<()> {
    let latest = LatestView::new();
    let interval = Duration::from_secs(interval_secs.max(1));
    let mut previous_ids: BTreeSet<AlertId> = BTreeSet::new();

    let total_iterations = iterations.max(1);
    for i in 0..total_iterations {
        info!("watch iteration {}", i + 1);
        match load_snapshot(source, overrides) {
            Ok(snapshot) => {
                let published = refresh_with(&snapshot, &latest).await;
                let ids = published
                    .view
                    .alerts
                    .iter()
                    .map(|a| a.id)
                    .collect::<BTreeSet<_>>();
                for id in ids.difference(&previous_ids) {
                    info!("new alert: {id}");
                }
                for id in previous_ids.difference(&ids) {
                    info!("cleared alert: {id}");
                }
                previous_ids = ids;

                match format {
                    OutputFormat::Json => println!("{}", render_json_line(&published)?),
                    _ => print_alerts(&published.view.alerts, format)?,
                }
            }
            Err(err) => warn!("refresh skipped: {err:#}"),
        }

        if i + 1 < total_iterations {
            tokio::time::sleep(interval).await;
        }
    }
    Ok(())
}

fn print_dashboard(view: &DashboardView, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_dashboard(view)),
        OutputFormat::Json => println!("{}", render_json(view)?),
        OutputFormat::Csv => {
            println!("{}", loads_to_csv(&view.department_loads)?);
            println!("{}", alerts_to_csv(&view.alerts)?);
        }
    }
    Ok(())
}

fn print_alerts(alerts: &[Alert], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_alert_table(alerts)),
        OutputFormat::Json => println!("{}", render_json(alerts)?),
        OutputFormat::Csv => println!("{}", alerts_to_csv(alerts)?),
    }
    Ok(())
}

fn print_insights(insights: &ForecastInsights, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_insights_table(insights)),
        OutputFormat::Json => println!("{}", render_json(insights)?),
        OutputFormat::Csv => {
            warn!("CSV output for insights not implemented, using JSON");
            println!("{}", render_json(insights)?);
        }
    }
    Ok(())
}

fn print_recommendations(plan: &RecommendationPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", render_recommendations_table(plan)),
        OutputFormat::Json => println!("{}", render_json(plan)?),
        OutputFormat::Csv => println!("{}", plan_to_csv(plan)?),
    }
    Ok(())
}
