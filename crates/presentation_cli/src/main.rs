//! addrcast CLI
//!
//! Look up the National Weather Service forecast for a US address.

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::{ForecastService, GeocodingPort};
use clap::{Args, Parser, Subcommand};
use domain::{
    AddressInput, ApiError, Coordinates, GeocodeOptions, ReturnType, SearchType, StructuredAddress,
};
use infrastructure::{AppConfig, GeocodingAdapter, WeatherAdapter, init_logging};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// addrcast CLI
#[derive(Parser)]
#[command(name = "addrcast")]
#[command(author, version, about = "Weather forecasts for US addresses", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Geocode an address and print its forecast
    ///
    /// Example: addrcast forecast "1600 Pennsylvania Ave NW, Washington, DC 20500"
    Forecast {
        /// Full one-line US address
        address: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve an address to coordinates
    ///
    /// Example: addrcast geocode --street "4600 Silver Hill Rd" --city Washington --state DC
    Geocode(GeocodeArgs),

    /// Check whether a point is inside NWS coverage (no network)
    Coverage {
        /// Latitude in degrees
        #[arg(allow_negative_numbers = true)]
        latitude: f64,

        /// Longitude in degrees
        #[arg(allow_negative_numbers = true)]
        longitude: f64,
    },
}

#[derive(Args)]
struct GeocodeArgs {
    /// One-line address (omit to use the structured fields)
    #[arg(conflicts_with_all = ["street", "city", "state", "zip", "urb", "municipio"])]
    address: Option<String>,

    /// House number and street name
    #[arg(long)]
    street: Option<String>,

    /// City
    #[arg(long)]
    city: Option<String>,

    /// State name or abbreviation
    #[arg(long)]
    state: Option<String>,

    /// ZIP code
    #[arg(long)]
    zip: Option<String>,

    /// Use the Puerto Rico address search
    #[arg(long)]
    puerto_rico: bool,

    /// Urbanization (Puerto Rico only)
    #[arg(long, requires = "puerto_rico")]
    urb: Option<String>,

    /// Municipio (Puerto Rico only)
    #[arg(long, requires = "puerto_rico")]
    municipio: Option<String>,

    /// locations or geographies (default: from configuration)
    #[arg(long)]
    return_type: Option<ReturnType>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

impl GeocodeArgs {
    fn input(&self) -> AddressInput {
        self.address.as_ref().map_or_else(
            || {
                AddressInput::Structured(StructuredAddress {
                    street: self.street.clone(),
                    city: self.city.clone(),
                    state: self.state.clone(),
                    zip: self.zip.clone(),
                    urb: self.urb.clone(),
                    municipio: self.municipio.clone(),
                })
            },
            |line| AddressInput::from(line.as_str()),
        )
    }

    fn options(&self, config: &AppConfig) -> GeocodeOptions {
        GeocodeOptions {
            return_type: self.return_type.unwrap_or(config.geocoding.return_type),
            search_type: if self.puerto_rico {
                SearchType::AddressPr
            } else if self.address.is_some() {
                SearchType::OneLineAddress
            } else {
                SearchType::Address
            },
            vintage: config.geocoding.vintage.clone(),
        }
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => AppConfig::load().context("Failed to load configuration")?,
    };
    config.validate().map_err(anyhow::Error::msg)?;
    Ok(config)
}

/// Print an [`ApiError`] and exit with status 1
fn fail(err: &ApiError) -> ! {
    eprintln!("{}", render::error_line(err));
    std::process::exit(1);
}

/// Cancel `token` on Ctrl-C
fn cancel_on_interrupt(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling");
            token.cancel();
        }
    });
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.telemetry, cli.verbose)?;
    debug!(
        geocoder = %config.geocoding.base_url,
        weather = %config.weather.base_url,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Forecast { address, json } => {
            let geocoding = GeocodingAdapter::with_config(config.geocoding.clone())
                .unwrap_or_else(|e| fail(&e));
            let weather =
                WeatherAdapter::with_config(config.weather.clone()).unwrap_or_else(|e| fail(&e));
            let service = ForecastService::new(Arc::new(geocoding), Arc::new(weather))
                .with_options(GeocodeOptions {
                    return_type: config.geocoding.return_type,
                    vintage: config.geocoding.vintage.clone(),
                    ..GeocodeOptions::default()
                });

            let token = CancellationToken::new();
            cancel_on_interrupt(token.clone());

            let forecast = service
                .run_with_cancellation(&address, &token)
                .await
                .unwrap_or_else(|e| fail(&e));

            if json {
                println!("{}", serde_json::to_string_pretty(&forecast)?);
            } else {
                print!("{}", render::forecast_text(&forecast));
            }
        }

        Commands::Geocode(args) => {
            let adapter = GeocodingAdapter::with_config(config.geocoding.clone())
                .unwrap_or_else(|e| fail(&e));
            let options = args.options(&config);

            let found = adapter
                .lookup(&args.input(), &options)
                .await
                .unwrap_or_else(|e| fail(&e));

            if args.json {
                println!("{}", serde_json::to_string_pretty(&found)?);
            } else {
                print!("{}", render::geocoded_text(&found));
            }
        }

        Commands::Coverage {
            latitude,
            longitude,
        } => {
            let coordinates = Coordinates::new(latitude, longitude)?;
            println!("{}", render::coverage_text(&coordinates));
        }
    }

    Ok(())
}
