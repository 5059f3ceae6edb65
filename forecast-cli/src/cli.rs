use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{Config, Session, WeatherProvider, provider_from_config};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and 4-day forecast for a city")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show current weather and forecast for a city.
    Show {
        /// City name, passed to the service as typed.
        city: String,

        /// Print the session as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },

    /// Prompt for city names until an empty line or Esc.
    Interactive,
}

/// Log to stderr so tables on stdout stay clean.
pub fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config);
                debug!(?provider, city = %city, "Searching");
                let session = Session::search(provider.as_ref(), &city).await;

                if json {
                    let out = serde_json::to_string_pretty(&session)
                        .context("Failed to serialize results to JSON")?;
                    println!("{out}");
                } else {
                    print!("{}", render::session(&session, config.icon_base_url()));
                }
                Ok(())
            }
            Command::Interactive => {
                let config = Config::load()?;
                let provider = provider_from_config(&config);
                interactive(provider.as_ref(), config.icon_base_url()).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load_file()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key.trim().to_string());
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn interactive(provider: &dyn WeatherProvider, icon_base_url: &str) -> anyhow::Result<()> {
    let mut session = Session::default();

    loop {
        let input = Text::new("City:")
            .with_placeholder("Enter city name Eg. Singapore")
            .with_initial_value(&session.city)
            .prompt();

        let city = match input {
            Ok(city) if city.trim().is_empty() => break,
            Ok(city) => city,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read city name"),
        };

        debug!(city = %city, previous = %session.city, "Searching");
        session = Session::search(provider, &city).await;
        print!("{}", render::session(&session, icon_base_url));
    }

    Ok(())
}
