mod commands;

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use isomap_core::LatLng;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "isomap")]
#[command(about = "Fetch drive-time isochrones and print map-ready polygons")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the reachable-range polygon around an origin.
    Isochrone {
        /// Origin as "lat,lng" (defaults to `ISOMAP_ORIGIN`).
        #[arg(long, allow_hyphen_values = true)]
        origin: Option<LatLng>,
        /// Travel-time budget in seconds (defaults to `ISOMAP_TIME_BUDGET_SECS`).
        #[arg(long)]
        budget_secs: Option<u32>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the built-in demonstration polygon.
    Demo {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the loaded configuration with secrets redacted.
    Config,
}

#[derive(Debug, Clone, Args)]
struct OutputArgs {
    #[arg(long, value_enum, default_value_t = Format::Geojson)]
    format: Format,
    /// Viewport width in pixels, used to fit the camera to the polygon.
    #[arg(long, default_value_t = 800)]
    width: u32,
    /// Viewport height in pixels.
    #[arg(long, default_value_t = 500)]
    height: u32,
    #[arg(long)]
    pretty: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// GeoJSON feature, longitude first.
    Geojson,
    /// `{lat, lng}` path with polygon options.
    Path,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = isomap_core::load_app_config_from_env()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Isochrone {
            origin,
            budget_secs,
            output,
        } => commands::run_isochrone(&config, origin, budget_secs, &output).await,
        Commands::Demo { output } => commands::run_demo(&config, &output),
        Commands::Config => {
            println!("{config:#?}");
            Ok(ExitCode::SUCCESS)
        }
    }
}
