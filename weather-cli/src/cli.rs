use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, Text};
use tracing::{info, warn};
use weather_core::{Config, RequestState, WeatherApiProvider, WeatherClient, config::API_KEY_ENV};

use crate::render::{LOADING_TEXT, OutputFormat, render};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather and 3-day forecast")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weatherapi.com API key and the default location.
    Configure,

    /// Show weather for a location once.
    Show {
        /// Location query, e.g. "Delhi, IN". Defaults to the configured location.
        location: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Interactive search: shows the default location, then prompts for more.
    Search {
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<ExitCode> {
        match self.command {
            Command::Configure => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Command::Show { location, format } => {
                let mut client = client_from_config()?;
                let query = location.unwrap_or_else(|| client.default_location().to_string());

                show_loading(format);
                let state = client.fetch_weather(&query).await;
                print_state(state, format)?;

                Ok(exit_code(state))
            }
            Command::Search { format } => {
                let mut client = client_from_config()?;
                search(&mut client, format).await?;
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn client_from_config() -> anyhow::Result<WeatherClient<WeatherApiProvider>> {
    let config = Config::resolve()?;
    if !config.has_api_key() {
        warn!(
            "No API key configured; requests will be rejected. \
             Run `weather configure` or set {API_KEY_ENV}."
        );
    }

    let provider = WeatherApiProvider::from_config(&config);
    Ok(WeatherClient::new(provider, config.default_location))
}

async fn search(
    client: &mut WeatherClient<WeatherApiProvider>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    show_loading(format);
    print_state(client.startup().await, format)?;

    loop {
        let query = match Text::new("Search:")
            .with_placeholder("Enter city (e.g. Delhi, IN)")
            .prompt()
        {
            Ok(query) => query,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                info!("Search session ended");
                return Ok(());
            }
            Err(err) => return Err(err).context("Failed to read location"),
        };

        if query.trim().is_empty() {
            continue;
        }

        show_loading(format);
        if client.submit(&query).await {
            print_state(client.state(), format)?;
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("weatherapi.com API key:")
        .without_confirmation()
        .with_help_message("Leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;
    if !api_key.trim().is_empty() {
        config.api_key = Some(api_key.trim().to_string());
    }

    let location = Text::new("Default location:")
        .with_default(&config.default_location)
        .prompt()
        .context("Failed to read default location")?;
    config.default_location = location;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn show_loading(format: OutputFormat) {
    if format == OutputFormat::Text {
        println!("{LOADING_TEXT}");
    }
}

fn print_state(state: &RequestState, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", render(state, format)?);
    Ok(())
}

fn exit_code(state: &RequestState) -> ExitCode {
    match state {
        RequestState::Failed { .. } => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
