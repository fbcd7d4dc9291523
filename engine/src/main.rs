// stock-graph entry point: load quote bars, print the latest snapshot as JSON
use anyhow::{Context, Result};
use clap::Parser;
use engine::config::EngineSettings;
use engine::data::QuoteCsvParser;
use engine::indicators::simple_moving_average;
use engine::services::build_snapshot;
use serde::Serialize;
use shared::models::closes;
use shared::utils::partition;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "stock-graph")]
#[command(about = "Moving averages and short-term trend slopes for a series of quote bars")]
#[command(version)]
struct Cli {
    /// Path to a CSV of quote bars (Date,Open,High,Low,Close,Volume)
    #[arg(short, long)]
    data: PathBuf,

    /// Symbol to label the bars with
    #[arg(short, long, default_value = "AAPL")]
    symbol: String,

    /// JSON settings file
    #[arg(short, long, env = "STOCK_GRAPH_CONFIG")]
    config: Option<PathBuf>,

    /// Trailing samples used for the price and volume slopes
    #[arg(short, long)]
    window: Option<usize>,

    /// Width of one sample on the x-axis
    #[arg(long)]
    x_step: Option<f64>,

    /// Also report the SMA of each of this many chunks of the close series
    #[arg(short, long)]
    partitions: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct ChunkAverage {
    chunk: usize,
    samples: usize,
    sma: Option<f64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut settings = match &cli.config {
        Some(path) => EngineSettings::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    if let Some(window) = cli.window {
        settings.slope_window = window;
    }
    if let Some(x_step) = cli.x_step {
        settings.x_step = x_step;
    }
    if cli.partitions.is_some() {
        settings.partitions = cli.partitions;
    }
    settings.validate()?;

    let candles = QuoteCsvParser::load_candles_from_csv(&cli.data, &cli.symbol)
        .with_context(|| format!("loading quote bars from {}", cli.data.display()))?;
    info!(symbol = %cli.symbol, bars = candles.len(), "Loaded quote bars");

    let snapshot = build_snapshot(&candles, &settings)?;
    info!(
        symbol = %snapshot.symbol,
        price_slope = snapshot.price_slope,
        volume_slope = snapshot.volume_slope,
        "Current trend"
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    if let Some(k) = settings.partitions {
        let chunks: Vec<ChunkAverage> = partition(&closes(&candles), k)
            .iter()
            .enumerate()
            .map(|(chunk, series)| {
                let sma = match simple_moving_average(series) {
                    Ok((sma, _)) => Some(sma),
                    Err(e) => {
                        warn!(chunk, error = %e, "Skipping chunk average");
                        None
                    }
                };
                ChunkAverage { chunk, samples: series.len(), sma }
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&chunks)?);
    }

    Ok(())
}
