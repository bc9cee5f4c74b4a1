use anyhow::{Context, Result};
use atmosphere_core::{
    Config, Coordinates, Dashboard, TemperatureUnit, WeatherRetriever, WeatherService,
    client_from_config, location::locator_for,
};
use chrono::Local;
use clap::{Parser, Subcommand};
use inquire::{InquireError, Password, PasswordDisplayMode, Text};
use tracing::debug;

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "atmosphere", version, about = "AI-grounded weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Latitude for "use my location"; overrides the configured position.
    #[arg(long, global = true, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude for "use my location"; overrides the configured position.
    #[arg(long, global = true, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the API key, model and default city.
    Configure,

    /// Show weather once and exit.
    Show {
        /// City or free-text location. Defaults to the configured city.
        query: Option<String>,

        /// Display temperatures in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,

        /// Use the current position instead of a query.
        #[arg(long, conflicts_with = "query")]
        here: bool,
    },

    /// Interactive dashboard with history and unit toggle.
    Dashboard {
        /// Start in Fahrenheit.
        #[arg(long)]
        fahrenheit: bool,
    },
}

/// One line of dashboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(String),
    ToggleUnit,
    Replay(usize),
    Here,
    Quit,
    Nothing,
}

impl Action {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input {
            "" => Action::Nothing,
            ":q" | ":quit" => Action::Quit,
            ":u" | ":unit" => Action::ToggleUnit,
            ":here" => Action::Here,
            _ => match input.strip_prefix(':').and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => Action::Replay(n),
                None => Action::Search(input.to_owned()),
            },
        }
    }
}

fn unit_for(fahrenheit: bool) -> TemperatureUnit {
    if fahrenheit { TemperatureUnit::Fahrenheit } else { TemperatureUnit::Celsius }
}

impl Cli {
    fn position(&self, config: &Config) -> Option<Coordinates> {
        match (self.lat, self.lon) {
            (Some(latitude), Some(longitude)) => Some(Coordinates { latitude, longitude }),
            _ => config.location,
        }
    }

    pub async fn run(self) -> Result<()> {
        let config = Config::load()?;

        match &self.command {
            Command::Configure => configure(config),
            Command::Show { query, fahrenheit, here } => {
                let mut dashboard = build_dashboard(&config)?.with_unit(unit_for(*fahrenheit));

                if *here {
                    let locator = locator_for(self.position(&config));
                    dashboard.use_current_location(locator.as_ref()).await;
                } else if let Some(q) = query.as_deref().filter(|q| !q.trim().is_empty()) {
                    dashboard.submit_search(q).await;
                } else {
                    dashboard.initialize().await;
                }

                print!("{}", render::dashboard(&dashboard, Local::now().date_naive()));
                Ok(())
            }
            Command::Dashboard { fahrenheit } => {
                let dashboard = build_dashboard(&config)?.with_unit(unit_for(*fahrenheit));
                interactive(dashboard, self.position(&config)).await
            }
        }
    }
}

fn build_dashboard(
    config: &Config,
) -> Result<Dashboard<WeatherService<Box<dyn atmosphere_core::ModelClient>>>> {
    let client = client_from_config(config)?;
    Ok(Dashboard::new(WeatherService::new(client)).with_default_city(config.default_city()))
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("Gemini API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_owned());

    let model = Text::new("Model:")
        .with_default(config.model())
        .prompt()
        .context("Failed to read model name")?;
    config.model = Some(model.trim().to_owned()).filter(|m| !m.is_empty());

    let city = Text::new("Default city:")
        .with_default(config.default_city())
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = Some(city.trim().to_owned()).filter(|c| !c.is_empty());

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn redraw<R: WeatherRetriever>(dashboard: &Dashboard<R>) {
    println!();
    print!("{}", render::dashboard(dashboard, Local::now().date_naive()));
}

async fn interactive<R: WeatherRetriever>(
    mut dashboard: Dashboard<R>,
    position: Option<Coordinates>,
) -> Result<()> {
    let locator = locator_for(position);

    println!("{}", render::LOADING_LINE);
    dashboard.initialize().await;
    redraw(&dashboard);

    loop {
        let input = match Text::new("Search city:")
            .with_help_message(":u unit · :1-5 history · :here location · :q quit")
            .prompt()
        {
            Ok(line) => line,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e).context("Failed to read input"),
        };

        let action = Action::parse(&input);
        debug!(?action, "dashboard input");

        match action {
            Action::Quit => break,
            Action::Nothing => continue,
            Action::ToggleUnit => dashboard.toggle_unit(),
            Action::Here => {
                println!("{}", render::LOADING_LINE);
                dashboard.use_current_location(locator.as_ref()).await;
            }
            Action::Replay(n) => {
                let Some(city) = n.checked_sub(1).and_then(|i| dashboard.history().get(i)) else {
                    println!("No history entry {n}.");
                    continue;
                };
                let city = city.to_owned();
                println!("{}", render::LOADING_LINE);
                dashboard.replay_history(&city).await;
            }
            Action::Search(text) => {
                dashboard.set_query(text.as_str());
                println!("{}", render::LOADING_LINE);
                dashboard.submit_search(&text).await;
            }
        }

        redraw(&dashboard);
    }

    Ok(())
}
