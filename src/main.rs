use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use metris_planner::config::{Config, ConfigOverrides};
use metris_planner::optimizer::constraints::ConstraintOverrides;
use metris_planner::optimizer::{ranked_candidates, OptimizationResult, Scenario};
use metris_planner::output::csv::{catalog_to_csv, result_to_csv};
use metris_planner::output::json::{catalog_json, render_json, scenario_json};
use metris_planner::output::table::{
    render_catalog_table, render_result_table, render_scenario_table, render_simulation_table,
    render_weekly_table,
};
use metris_planner::server::run_server;
use metris_planner::simulation::PlannerSession;
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
    name = "metris-planner",
    about = "Constrained remediation planning for the METRIS governance demo"
)]
struct Cli {
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(long)]
    catalog: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
    #[arg(long = "current-score")]
    current_score: Option<f64>,
    #[arg(long = "current-exposure")]
    current_exposure: Option<f64>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, clap::Args, Clone, Copy, Default)]
struct ConstraintArgs {
    #[arg(long = "risk-tolerance")]
    risk_tolerance: Option<f64>,
    #[arg(long)]
    budget: Option<f64>,
    #[arg(long = "target-score")]
    target_score: Option<f64>,
    #[arg(long)]
    timeline: Option<u32>,
}

impl From<ConstraintArgs> for ConstraintOverrides {
    fn from(value: ConstraintArgs) -> Self {
        Self {
            risk_tolerance: value.risk_tolerance,
            budget_constraint: value.budget,
            target_score: value.target_score,
            timeline: value.timeline,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    Catalog {
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    Optimize {
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    Apply {
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    Scenario {
        #[arg(long)]
        scenario: Option<String>,
        #[command(flatten)]
        constraints: ConstraintArgs,
    },
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
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
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load(Some(&config_path))?;
    config.apply_overrides(ConfigOverrides {
        catalog_path: cli.catalog.clone(),
        current_score: cli.current_score,
        current_exposure: cli.current_exposure,
    });

    if let Commands::Config { init, show } = &cli.command {
        return handle_config_command(*init, *show, &config, &config_path);
    }

    let catalog = config.load_catalog()?;
    info!(source = %catalog.source, fixes = catalog.len(), "catalog ready");

    if let Commands::Serve { host, port } = &cli.command {
        let host = host.clone().unwrap_or_else(|| config.server.host.clone());
        let port = port.unwrap_or(config.server.port);
        let bind = format!("{host}:{port}");
        let addr: SocketAddr = bind
            .parse()
            .map_err(|e| anyhow!("invalid bind address {bind}: {e}"))?;
        return run_server(config, catalog, addr).await;
    }

    let mut session = PlannerSession::new(catalog, config.baseline(), config.constraints);

    match &cli.command {
        Commands::Catalog { constraints } => {
            adjust_constraints(&mut session, *constraints);
            let ranked = ranked_candidates(session.catalog().fixes(), session.constraints());
            match cli.output {
                OutputFormat::Table => println!(
                    "{}",
                    render_catalog_table(&ranked, &session.catalog().raw_hash)
                ),
                OutputFormat::Json => println!(
                    "{}",
                    render_json(&catalog_json(session.catalog(), &ranked))?
                ),
                OutputFormat::Csv => println!("{}", catalog_to_csv(&ranked)?),
            }
        }
        Commands::Optimize { constraints } => {
            adjust_constraints(&mut session, *constraints);
            let result = session.result();
            print_result(&result, cli.output)?;
        }
        Commands::Apply { constraints } => {
            adjust_constraints(&mut session, *constraints);
            let result = session.result();
            session.apply(&result);
            let snapshot = session.snapshot();
            match cli.output {
                OutputFormat::Table => println!("{}", render_simulation_table(&snapshot)),
                OutputFormat::Json => println!("{}", render_json(&snapshot)?),
                OutputFormat::Csv => {
                    warn!("CSV output for apply not implemented, using JSON");
                    println!("{}", render_json(&snapshot)?);
                }
            }
        }
        Commands::Scenario {
            scenario,
            constraints,
        } => {
            let scenario = scenario
                .as_deref()
                .map(str::parse::<Scenario>)
                .transpose()?;
            adjust_constraints(&mut session, *constraints);
            let band = session
                .result()
                .exposure_band(session.baseline(), config.scenarios.spread);
            match (cli.output, scenario) {
                (OutputFormat::Table, Some(s)) => println!("{s}: ${:.0}", band.value(s)),
                (OutputFormat::Table, None) => println!("{}", render_scenario_table(&band)),
                (OutputFormat::Json, _) => {
                    println!("{}", render_json(&scenario_json(&band, scenario))?)
                }
                (OutputFormat::Csv, _) => {
                    warn!("CSV output for scenario not implemented, using JSON");
                    println!("{}", render_json(&scenario_json(&band, scenario))?);
                }
            }
        }
        Commands::Config { .. } | Commands::Serve { .. } => {}
    }

    Ok(())
}

fn adjust_constraints(session: &mut PlannerSession, args: ConstraintArgs) {
    let overrides = ConstraintOverrides::from(args);
    if overrides.is_empty() {
        return;
    }
    let constraints = session.constraints().with_overrides(overrides.clamped());
    session.set_constraints(constraints);
}

fn handle_config_command(
    init: bool,
    show: bool,
    config: &Config,
    config_path: &Path,
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

fn print_result(result: &OptimizationResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            println!("{}", render_result_table(result));
            if !result.weekly_breakdown.is_empty() {
                println!("{}", render_weekly_table(&result.weekly_breakdown));
            }
        }
        OutputFormat::Json => println!("{}", render_json(result)?),
        OutputFormat::Csv => println!("{}", result_to_csv(result)?),
    }
    Ok(())
}
