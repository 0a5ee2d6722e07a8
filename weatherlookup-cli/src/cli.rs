use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{ArgAction, Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode, Text};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weatherlookup_core::{
    Config, DisplayZone, FetchOutcome, ViewController, ViewState, provider_from_config,
    render_card,
};

use crate::app::App;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherlookup", version, about = "Current weather for a city")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and default location.
    Configure,

    /// Look up weather interactively, starting from the configured location.
    #[command(alias = "ui")]
    Interactive,

    /// Fetch once and print the result.
    Show {
        /// City name; defaults to the configured city.
        #[arg(long)]
        city: Option<String>,

        /// Country name; defaults to the configured country.
        #[arg(long)]
        country: Option<String>,

        /// Print the view state as JSON instead of a card.
        #[arg(long)]
        json: bool,
    },
}

fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

impl Cli {
    /// `RUST_LOG` wins over `-v` when set.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(self.verbose)));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Interactive => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let zone = config.display_zone()?;
                let state = ViewState::with_location(config.city, config.country);
                App::new(ViewController::with_state(Arc::new(provider), state), zone).run().await
            }
            Command::Show { city, country, json } => {
                let config = Config::load()?;
                let provider = provider_from_config(&config)?;
                let zone = config.display_zone()?;
                let state = ViewState::with_location(
                    city.unwrap_or(config.city),
                    country.unwrap_or(config.country),
                );

                let mut controller = ViewController::with_state(Arc::new(provider), state);
                if controller.refresh().await != FetchOutcome::Applied {
                    bail!(
                        "Could not fetch weather for {}, {}. Run with -v for details.",
                        controller.state().city,
                        controller.state().country
                    );
                }

                if json {
                    println!("{}", serde_json::to_string_pretty(controller.state())?);
                } else {
                    println!("{}", render_card(controller.state(), &zone.now_as_of()));
                }
                Ok(())
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.set_api_key(api_key);
    }

    config.city = Text::new("Default city:")
        .with_initial_value(&config.city)
        .prompt()
        .context("Failed to read city")?;
    config.country = Text::new("Default country:")
        .with_initial_value(&config.country)
        .prompt()
        .context("Failed to read country")?;

    let current_offset = config.utc_offset.clone().unwrap_or_else(|| "local".to_string());
    let offset = Text::new("Timezone for sunrise/sunset:")
        .with_initial_value(&current_offset)
        .with_help_message("'local' or an offset such as +05:30")
        .prompt()
        .context("Failed to read timezone")?;
    let zone: DisplayZone = offset.parse()?;
    config.utc_offset = match zone {
        DisplayZone::Local => None,
        DisplayZone::Fixed(_) => Some(zone.to_string()),
    };

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
