//! Weather widget CLI
//!
//! Shows current conditions for a city, either once (`show`) or as an
//! interactive prompt that keeps the widget on screen.

#![allow(clippy::print_stdout)]

mod interactive;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use application::{Submission, WidgetService};
use chrono::Utc;
use clap::{Parser, Subcommand};
use domain::ThemeMode;
use infrastructure::{AppConfig, WeatherAdapter, filter_for_verbosity, init_tracing};
use render::RenderMode;
use secrecy::SecretString;
use tracing::{info, warn};

/// Weather widget
#[derive(Parser)]
#[command(name = "weather-widget")]
#[command(author, version, about = "Current weather for any city", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// OpenWeatherMap API key, overrides the configuration file
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the widget for one city and exit
    ///
    /// Example: weather-widget show "New York" --dark
    Show {
        /// City to look up (default: the configured default city)
        city: Option<String>,

        /// Render in dark mode
        #[arg(long)]
        dark: bool,
    },

    /// Keep the widget open and read searches from stdin
    Interactive {
        /// Start in dark mode
        #[arg(long)]
        dark: bool,
    },
}

fn initial_theme(dark_flag: bool, config: &AppConfig) -> ThemeMode {
    if dark_flag {
        ThemeMode::Dark
    } else {
        config.widget.theme()
    }
}

fn build_service(config: &AppConfig, api_key: Option<String>) -> anyhow::Result<WidgetService> {
    let api_key = match api_key.map(SecretString::from) {
        Some(key) => key,
        None => config.weather.api_key.clone().unwrap_or_else(|| {
            warn!("No weather API key configured; lookups will be rejected");
            SecretString::from(String::new())
        }),
    };

    let adapter = WeatherAdapter::new(config.weather.client_config(), api_key)
        .context("Failed to create weather client")?;
    let default_city = config
        .widget
        .city()
        .context("Invalid widget.default_city")?;

    Ok(WidgetService::new(Arc::new(adapter), default_city)
        .with_offset_precision(config.widget.offset_precision()))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(filter_for_verbosity(cli.verbose), config.logging.format)?;

    let service = build_service(&config, cli.api_key)?;

    match cli.command.unwrap_or(Commands::Interactive { dark: false }) {
        Commands::Show { city, dark } => {
            let service = service.with_theme(initial_theme(dark, &config));

            let submission = match city {
                Some(city) => {
                    service.set_query(city);
                    service.submit().await
                },
                None => Submission::Ignored,
            };
            if submission == Submission::Ignored {
                service.mount().await;
            }

            println!(
                "{}",
                render::render(&service.view(Utc::now()), RenderMode::OneShot)
            );
        },

        Commands::Interactive { dark } => {
            let service = service.with_theme(initial_theme(dark, &config));
            info!(city = %service.default_city(), "Starting interactive widget");
            interactive::run(Arc::new(service)).await?;
        },
    }

    Ok(())
}
