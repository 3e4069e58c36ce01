use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use country_core::{
    AlertSink, Config, Coordinates, CountryWidget, FetchOutcome, PositionOverride,
    position_source_from_config, services_from_config,
};
use inquire::{Confirm, CustomType, InquireError, Text, validator::Validation};
use std::sync::Arc;
use tracing::debug;

use crate::{logging, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "country", version, about = "Country lookup CLI")]
pub struct Cli {
    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the default location used on startup.
    Configure,

    /// Show the country for the current location, or for NAME.
    Show {
        /// Country name to search for after the location lookup.
        name: Option<String>,

        #[command(flatten)]
        location: LocationArgs,
    },

    /// Keep prompting for country names until cancelled.
    Interactive {
        #[command(flatten)]
        location: LocationArgs,
    },
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct LocationArgs {
    /// Latitude of the current position (overrides config).
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the current position (overrides config).
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// Skip the location lookup, as if access was denied.
    #[arg(long, conflicts_with_all = ["lat", "lon"])]
    pub no_locate: bool,
}

impl From<LocationArgs> for PositionOverride {
    fn from(args: LocationArgs) -> Self {
        PositionOverride {
            coordinates: args.lat.zip(args.lon).map(|(lat, lon)| Coordinates::new(lat, lon)),
            disabled: args.no_locate,
        }
    }
}

/// Alerts go to stderr, next to the rendered output.
#[derive(Debug)]
struct StderrAlerts;

impl AlertSink for StderrAlerts {
    fn alert(&self, message: &str) {
        eprintln!("! {message}");
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        logging::init(self.verbose);

        match self.command {
            Command::Configure => configure(),
            Command::Show { name, location } => show(name, location).await,
            Command::Interactive { location } => interactive(location).await,
        }
    }
}

fn build_widget(location: LocationArgs) -> anyhow::Result<CountryWidget> {
    let config = Config::load()?;
    debug!(?config, "loaded configuration");
    let services = services_from_config(&config)?;
    let position = position_source_from_config(&config, location.into());

    Ok(CountryWidget::from_services(&services, position, Arc::new(StderrAlerts)))
}

async fn show(name: Option<String>, location: LocationArgs) -> anyhow::Result<()> {
    let widget = build_widget(location)?;
    widget.mount().await;

    if let Some(name) = name {
        widget.set_input(name).await;
        widget.submit_search().await;
    }

    println!("{}", render::render(widget.display().await.as_ref()));
    Ok(())
}

async fn interactive(location: LocationArgs) -> anyhow::Result<()> {
    let widget = build_widget(location)?;
    widget.mount().await;
    println!("{}", render::render(widget.display().await.as_ref()));

    loop {
        let current = widget.input().await;
        let answer = Text::new("Enter country name:")
            .with_initial_value(&current)
            .with_help_message("Enter to search, Esc to quit")
            .prompt();

        match answer {
            Ok(term) => {
                widget.set_input(term).await;
                if let FetchOutcome::Displayed(_) = widget.submit_search().await {
                    let shown = widget.display().await;
                    println!("{}", render::render(shown.as_ref()));
                }
            }
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err).context("Failed to read search term"),
        }
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    config.geolocation = Confirm::new("Look up the current location on startup?")
        .with_default(config.geolocation)
        .prompt()
        .context("Failed to read answer")?;

    if config.geolocation {
        let previous = config.coordinates();

        let latitude = prompt_degrees("Latitude:", 90.0, previous.map(|c| c.latitude))?;
        let longitude = prompt_degrees("Longitude:", 180.0, previous.map(|c| c.longitude))?;

        config.set_location(Coordinates::new(latitude, longitude));
    } else {
        config.clear_location();
    }

    config.save()?;
    println!("Configuration saved to {}", Config::config_file_path()?.display());

    Ok(())
}

fn prompt_degrees(message: &str, limit: f64, default: Option<f64>) -> anyhow::Result<f64> {
    let mut prompt = CustomType::<f64>::new(message)
        .with_error_message("Please type a number, e.g. 48.8566")
        .with_validator(move |value: &f64| {
            if value.abs() <= limit {
                Ok(Validation::Valid)
            } else {
                Ok(Validation::Invalid(format!("Must be between -{limit} and {limit}").into()))
            }
        });

    if let Some(default) = default {
        prompt = prompt.with_default(default);
    }

    prompt.prompt().context("Failed to read coordinate")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn show_parses_name_and_coordinates() {
        let cli = Cli::try_parse_from([
            "country", "show", "France", "--lat", "-33.87", "--lon", "151.21",
        ])
        .expect("arguments must parse");

        match cli.command {
            Command::Show { name, location } => {
                assert_eq!(name.as_deref(), Some("France"));
                let overrides = PositionOverride::from(location);
                assert_eq!(overrides.coordinates, Some(Coordinates::new(-33.87, 151.21)));
                assert!(!overrides.disabled);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["country", "show", "--lat", "10"]).is_err());
    }

    #[test]
    fn no_locate_conflicts_with_coordinates() {
        let res = Cli::try_parse_from([
            "country",
            "interactive",
            "--no-locate",
            "--lat",
            "1",
            "--lon",
            "2",
        ]);
        assert!(res.is_err());
    }

    #[test]
    fn no_locate_disables_position() {
        let cli = Cli::try_parse_from(["country", "-v", "show", "--no-locate"]).unwrap();
        assert!(cli.verbose);

        let Command::Show { name, location } = cli.command else {
            panic!("expected show");
        };
        assert!(name.is_none());
        assert!(PositionOverride::from(location).disabled);
    }
}
