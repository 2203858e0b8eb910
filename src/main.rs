//! Info Mundo server and command-line tools
//!
//! Run with: cargo run -- serve
//!
//! # Configuration
//!
//! Configuration is read from `--config`, or else from the first of
//! `<config_dir>/infomundo/config.toml`, `/etc/infomundo/config.toml` and
//! `./config.toml`. `INFOMUNDO_*` environment variables override the file;
//! `RUST_LOG` overrides the log filter.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use infomundo::api::{serve, AppState};
use infomundo::charts::{build_chart, ChartKind, Scope};
use infomundo::config::{generate_default_config, Config, LoggingConfig};
use infomundo::data::Dataset;
use infomundo::session::{Dashboard, DashboardEvent, SelectionState, WORLD};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "infomundo")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "World development indicators dashboard backend")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: search the standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Dataset directory, overrides the config file
    #[arg(long, global = true)]
    pub data_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP and WebSocket server (default)
    Serve,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the detail cards and chart options for a country
    Inspect {
        /// Country name as it appears in the dropdown, ISO3 code, or `Mundo`
        country: String,
    },

    /// Load the datasets and render every chart once
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Config { output } => write_config(output)?,
        Commands::Serve => {
            let (config, dataset) = setup(cli.config, cli.data_dir)?;
            tracing::info!("Starting Info Mundo v{}", env!("CARGO_PKG_VERSION"));
            let state = AppState::new(dataset, config.api.clone(), config.sessions.clone());
            serve(state, &config.api).await?;
        }
        Commands::Inspect { country } => {
            let (_, dataset) = setup(cli.config, cli.data_dir)?;
            let name = if country == WORLD {
                WORLD.to_string()
            } else {
                match dataset.find_country(&country) {
                    Some(record) => record.name.clone(),
                    None => bail!("Unknown country: {}", country),
                }
            };
            inspect(Dashboard::new(dataset), &name)?;
        }
        Commands::Check => {
            let (_, dataset) = setup(cli.config, cli.data_dir)?;
            check(&dataset)?;
        }
    }

    Ok(())
}

fn write_config(output: Option<PathBuf>) -> anyhow::Result<()> {
    let content = generate_default_config();
    match output {
        Some(path) => {
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("Config written to {}", path.display());
        }
        None => print!("{}", content),
    }
    Ok(())
}

/// Load config, start logging and read the datasets
fn setup(
    config_path: Option<PathBuf>,
    data_dir: Option<String>,
) -> anyhow::Result<(Config, Arc<Dataset>)> {
    let (mut config, source) = match config_path {
        Some(path) => (Config::load_with_env(&path)?, Some(path)),
        None => Config::load_default(),
    };
    if let Some(data_dir) = data_dir {
        config.data.data_dir = data_dir;
    }

    init_logging(&config.logging)?;
    match source {
        Some(path) => tracing::info!(path = %path.display(), "Configuration loaded"),
        None => tracing::info!("No config file found, using defaults"),
    }

    let dataset = Dataset::load(&config.data, &config.assets)
        .with_context(|| format!("Failed to load datasets from {}", config.data.data_dir))?;
    tracing::info!(countries = dataset.store.len(), "Datasets loaded");

    Ok((config, Arc::new(dataset)))
}

/// Initialize tracing from the logging section
fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("infomundo={},tower_http=debug", config.level).into());

    let writer = match &config.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path))?;
            BoxMakeWriter::new(Arc::new(file))
        }
        None => BoxMakeWriter::new(std::io::stderr),
    };

    let registry = tracing_subscriber::registry().with(filter);
    match config.format.as_str() {
        "json" => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
            .init(),
        _ => registry
            .with(tracing_subscriber::fmt::layer().with_writer(writer))
            .init(),
    }

    Ok(())
}

fn inspect(dashboard: Dashboard, country: &str) -> anyhow::Result<()> {
    let mut state = SelectionState::default();
    dashboard.apply(
        &mut state,
        DashboardEvent::SelectCountry {
            value: Some(country.to_string()),
        },
    );

    let view = dashboard.view(&state);
    let cards = &view.cards;

    match dashboard.dataset().registry.iso3_for_name(&view.selection_label) {
        Some(iso3) => println!("{} ({})", view.selection_label, iso3),
        None => println!("{}", view.selection_label),
    }
    println!("  Flag:                {}", cards.flag_url);
    println!("  Population:          {}", cards.population);
    println!("  World population:    {}", cards.world_population_share);
    println!("  HDI rank:            {}", cards.hdi_rank);
    println!("  HDI:                 {}", cards.hdi);
    println!("  Capital:             {}", cards.capital);
    println!("  Income per capita:   {}", cards.income);
    println!("  Life expectancy:     {}", cards.life_expectancy);
    println!("  Area:                {}", cards.area);
    println!();
    println!("Charts:");
    for option in &view.chart_options {
        println!("  {:<28} {}", option.value, option.label);
    }

    Ok(())
}

/// Every world chart once, every country chart for every country.
fn check(dataset: &Dataset) -> anyhow::Result<()> {
    let store = &dataset.store;
    println!("Countries:        {}", store.len());
    println!("Map features:     {}", dataset.registry.feature_count());

    let unmapped = dataset.unmapped_countries();
    println!("Without polygon:  {}", unmapped.len());
    for record in &unmapped {
        println!("  {} ({})", record.name, record.iso3);
    }

    let mut failures = 0usize;
    for kind in ChartKind::ALL {
        let countries: Vec<Option<&str>> = match kind.scope() {
            Scope::World => vec![None],
            Scope::Country => {
                store.iter().map(|record| Some(record.name.as_str())).collect()
            }
        };

        for country in countries {
            if let Err(e) = build_chart(kind, store, country) {
                failures += 1;
                tracing::error!(kind = %kind, country = ?country, error = %e, "Chart failed");
            }
        }
    }

    if failures > 0 {
        bail!("{} chart(s) failed to render", failures);
    }
    println!("All charts rendered");
    Ok(())
}
