use anyhow::Context;
use clap::{Parser, Subcommand};
use forecast_core::{
    Config, ForecastReducer, Lookup, LookupStatus, config::check_max_days,
    provider::provider_from_config,
};
use inquire::{
    CustomType, CustomUserError, Password, PasswordDisplayMode, Text, validator::Validation,
};
use std::process::ExitCode;

use crate::view::TerminalView;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "City weather and daily forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and the number of days to show.
    Configure,

    /// Show current weather and the daily forecast for a city.
    Show {
        /// City name; prompted for when absent.
        city: Vec<String>,

        /// Maximum number of distinct days, including today.
        #[arg(long, value_parser = clap::value_parser!(u16).range(1..))]
        days: Option<u16>,

        /// Print the digest as JSON instead of formatted panels.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => configure().map(|()| ExitCode::SUCCESS),
            Command::Show { city, days, json } => show(city, days, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    cfg.set_api_key(api_key.trim().to_string());

    cfg.max_days = CustomType::<usize>::new("Days to show (including today):")
        .with_default(cfg.max_days)
        .with_error_message("Please enter a whole number")
        .with_validator(validate_days)
        .prompt()
        .context("Failed to read number of days")?;

    cfg.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

fn validate_days(days: &usize) -> Result<Validation, CustomUserError> {
    Ok(match check_max_days(*days) {
        Ok(_) => Validation::Valid,
        Err(err) => Validation::Invalid(err.to_string().into()),
    })
}

async fn show(city: Vec<String>, days: Option<u16>, json: bool) -> anyhow::Result<ExitCode> {
    let cfg = Config::load()?;
    let client = provider_from_config(&cfg)?;
    let max_days = days.map_or(cfg.max_days, usize::from);

    let input = if city.is_empty() {
        Text::new("City:").prompt().context("Failed to read city name")?
    } else {
        city.join(" ")
    };

    let lookup = Lookup::new(client.clone(), ForecastReducer::new(client, max_days));
    let mut view = TerminalView::default();

    match lookup.search(&input, &mut view).await {
        Ok(LookupStatus::Skipped) => Ok(ExitCode::SUCCESS),
        Ok(LookupStatus::Rendered(digest)) => {
            if json {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&digest).context("Failed to serialize forecast")?
                );
            } else {
                print!("{}", view.render());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(?err, "lookup failed");
            for alert in view.alerts() {
                eprintln!("{alert}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
