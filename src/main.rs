use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use baseline_engine::config::AppConfig;
use baseline_engine::engine::BaselineEngine;
use baseline_engine::models::{PlayerId, RecommendationResult, RoundScore, Season};
use baseline_engine::storage::jsonl::JsonlReader;
use baseline_engine::storage::RoundStore;

#[derive(Parser)]
#[command(name = "baseline-engine")]
#[command(about = "Recommend a season-average or last-8-rounds baseline for golf progress tracking")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend a baseline for a player's upcoming season
    Recommend {
        /// Player identifier
        #[arg(long)]
        player: String,

        /// Season the baseline is for; rounds from the season before are used
        #[arg(long)]
        season: Season,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Exit with an error if rounds cannot be loaded instead of falling back
        #[arg(long)]
        strict: bool,
    },

    /// Import rounds from a JSONL file into the store
    Import {
        /// Player identifier
        #[arg(long)]
        player: String,

        /// Season the rounds were played in
        #[arg(long)]
        season: Season,

        /// JSONL file with one {"score", "date"} object per line
        #[arg(long)]
        file: PathBuf,

        /// Replace the stored season instead of appending. Appends skip rounds
        /// whose date is already stored
        #[arg(long)]
        replace: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    config.validate()?;

    init_tracing(&config.log_level, cli.json_logs);
    tracing::info!("Starting baseline-engine v{}", env!("CARGO_PKG_VERSION"));

    let store = RoundStore::new(config.storage());

    match cli.command {
        Commands::Recommend {
            player,
            season,
            json,
            strict,
        } => {
            let player = PlayerId::from(player);
            let engine = BaselineEngine::new(Arc::new(store));

            let result = if strict {
                engine.try_recommend_baseline(&player, season).await?
            } else {
                engine.recommend_baseline(&player, season).await
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_report(&player, season, &result);
            }
        }
        Commands::Import {
            player,
            season,
            file,
            replace,
        } => {
            let player = PlayerId::from(player);
            let reader: JsonlReader<RoundScore> = JsonlReader::new(file.clone());
            let rounds = reader
                .read_all()
                .with_context(|| format!("Failed to read rounds from {:?}", file))?;

            let written = if replace {
                store.write_season(&player, season, &rounds)?
            } else {
                store.append_rounds(&player, season, &rounds)?
            };

            tracing::info!(
                player = %player,
                season,
                "Imported {} rounds from {:?}",
                written,
                file
            );
            println!("Imported {} rounds for {} ({})", written, player, season);
        }
    }

    Ok(())
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn print_report(player: &PlayerId, season: Season, result: &RecommendationResult) {
    let m = &result.metrics;

    println!("\n=== Baseline Recommendation: {} ({}) ===", player, season);
    println!("Recommended:      {}", result.recommended.label());
    println!("Confidence:       {}%", result.confidence);
    println!();
    println!("Season average:   {:.1} (std dev {:.1})", m.season_avg, m.season_std_dev);
    println!("Last 8 average:   {:.1} (std dev {:.1})", m.last8_avg, m.last8_std_dev);
    println!("Trend:            {} ({:.2}/round)", m.trend_direction, m.trend_strength);
    println!("Consistency:      {:.0}/100", m.consistency_score);
    println!();
    println!("Reasoning:");
    for line in &result.reasoning {
        println!("  - {}", line);
    }
}
