//! CLI entry point for the case spread map.
//!
//! Downloads the cumulative case table, ranks countries into tiers and
//! renders a time-animated map. With no arguments it fetches the default
//! source and writes `animated_map.html`.

use anyhow::Result;
use case_spread_map::{
    config::{DEFAULT_CACHE_PATH, DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_URL, PipelineConfig},
    features::to_feature_collection,
    fetch::{BasicClient, acquire},
    output::{log_tiers, print_json, print_pretty, write_geojson, write_tier_csv},
    pipeline::{prepare, run},
};
use clap::{Parser, Subcommand};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "case_spread_map")]
#[command(about = "Render a time-animated map of cumulative case counts", long_about = None)]
struct Cli {
    /// URL of the wide per-date case table
    #[arg(long, global = true, default_value = DEFAULT_SOURCE_URL)]
    source_url: String,

    /// Where the downloaded table is cached
    #[arg(long, global = true, default_value = DEFAULT_CACHE_PATH)]
    cache: PathBuf,

    /// Use the cached table instead of downloading when it exists
    #[arg(long, global = true, default_value_t = false)]
    offline: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the animated HTML map (default)
    Render {
        /// HTML file to write
        #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
        output: PathBuf,
    },
    /// Rank countries by total and show their tiers
    Tiers {
        /// Optional CSV file to write the tier table to
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Write the map features as a GeoJSON file
    Export {
        /// GeoJSON file to write
        #[arg(short, long, default_value = "features.geojson")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/case_spread_map.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("case_spread_map.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig {
        source_url: cli.source_url,
        cache_path: cli.cache,
        offline: cli.offline,
        ..Default::default()
    };
    let client = BasicClient::new();

    match cli.command.unwrap_or(Commands::Render {
        output: DEFAULT_OUTPUT_PATH.into(),
    }) {
        Commands::Render { output } => {
            config.output_path = output;
            let summary = run(&client, &config)?;
            print_pretty(&summary);
            print_json(&summary)?;
        }
        Commands::Tiers { csv } => {
            let bytes = acquire(&client, &config)?;
            let data = prepare(&bytes, &config)?;

            log_tiers(&data.tiers);
            if let Some(path) = csv {
                write_tier_csv(&path, &data.tiers)?;
                info!(path = %path.display(), "Tier table written");
            }
        }
        Commands::Export { output } => {
            let bytes = acquire(&client, &config)?;
            let data = prepare(&bytes, &config)?;

            write_geojson(&output, &to_feature_collection(&data.points))?;
            print_json(&data.summary)?;
        }
    }

    Ok(())
}
