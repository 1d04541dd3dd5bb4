use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use tracing::{info, warn};

use fonds_scraper::apis::sources_for_territory;
use fonds_scraper::clock::{Clock, SystemClock};
use fonds_scraper::config::Config;
use fonds_scraper::dashboard::export::{export_filename, export_to_file};
use fonds_scraper::dashboard::{format_amount, RunCache, Summary};
use fonds_scraper::domain::Territory;
use fonds_scraper::logging;
use fonds_scraper::pipeline::{Pipeline, PipelineRun};
use fonds_scraper::server::{start_server, AppState};

#[derive(Parser)]
#[command(name = "fonds_scraper")]
#[command(about = "European funds scraper and dashboard for the French overseas territories")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape and normalize one territory, printing a summary
    Fetch {
        /// Territory slug or code (e.g. reunion, SPM)
        #[arg(long)]
        territory: Option<String>,
        /// Print the normalized table as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Scrape one territory and write the `;`-separated CSV export
    Export {
        #[arg(long)]
        territory: Option<String>,
        /// Defaults to fonds_europeens_<territory>_<timestamp>.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Serve the dashboard for one territory
    Serve {
        #[arg(long)]
        territory: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// List supported territories
    Territories,
}

fn resolve_territory(flag: Option<String>, config: &Config) -> anyhow::Result<Territory> {
    let value = flag
        .or_else(|| config.default_territory.clone())
        .ok_or_else(|| anyhow!("No territory given; pass --territory or set default_territory"))?;
    Ok(Territory::from_str(&value)?)
}

async fn run_once(territory: Territory, config: &Config) -> anyhow::Result<PipelineRun> {
    let sources = sources_for_territory(territory, &config.http)?;
    let mut rng = StdRng::from_entropy();
    Ok(Pipeline::run(territory, &sources, &mut rng, &SystemClock).await)
}

fn print_run(run: &PipelineRun) {
    let summary = Summary::compute(&run.table);

    println!("\n📊 Fonds européens - {}", run.territory.label());
    for outcome in &run.outcomes {
        println!("   {}: {} enregistrements", outcome.source_name, outcome.records);
    }
    if run.synthetic {
        println!("⚠️  Données de démonstration (aucune source disponible)");
    }
    println!("   Projets retenus : {}", summary.project_count);
    println!("   Montant engagé  : {}", format_amount(summary.total_engage));
    println!(
        "   Montant payé    : {} ({:.1} %)",
        format_amount(summary.total_paye),
        summary.paid_percent
    );
    println!("   Projets terminés: {}", summary.completed_count);
    println!("   Réalisation moy.: {:.1} %", summary.mean_taux_realisation);
    for stat in &summary.par_programme {
        println!(
            "   {:<10} {:>16} ({} projets)",
            stat.label,
            format_amount(stat.total),
            stat.count
        );
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match cli.command {
        Commands::Fetch { territory, json } => {
            let territory = resolve_territory(territory, &config)?;
            let run = run_once(territory, &config).await?;
            if run.report.dropped_out_of_range > 0 {
                warn!(
                    "{} records dropped outside the amount range",
                    run.report.dropped_out_of_range
                );
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&run.table)?);
            } else {
                print_run(&run);
            }
        }
        Commands::Export { territory, output } => {
            let territory = resolve_territory(territory, &config)?;
            let run = run_once(territory, &config).await?;
            let path = output
                .unwrap_or_else(|| PathBuf::from(export_filename(territory, SystemClock.now())));
            export_to_file(&path, &run.table)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✅ {} projets exportés vers {}", run.table.len(), path.display());
        }
        Commands::Serve { territory, port } => {
            let territory = resolve_territory(territory, &config)?;
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{}:{}", config.server.host, port)
                .parse()
                .with_context(|| format!("Invalid listen address {}:{}", config.server.host, port))?;

            let sources = sources_for_territory(territory, &config.http)?;
            info!("Serving {} with {} sources", territory.slug(), sources.len());
            let state = AppState::new(territory, sources, RunCache::new(config.cache.ttl()));
            start_server(state, addr).await?;
        }
        Commands::Territories => {
            for territory in Territory::ALL {
                println!("{:<26} {:<5} {}", territory.slug(), territory.code(), territory.label());
            }
        }
    }
    Ok(())
}
