use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Select, Text};
use meteo_core::{Config, Units, WeatherService, service_from_config};
use serde_json::to_string_pretty;

use crate::render;

/// Queries shorter than this are not sent when picking interactively.
const MIN_PICK_QUERY_LEN: usize = 3;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "meteo", version, about = "Weather lookup powered by Open-Meteo")]
pub struct Cli {
    /// Print normalized data as JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Override configured display units ("metric" or "imperial").
    #[arg(long, global = true, value_parser = parse_units)]
    pub units: Option<Units>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit default city, units and API endpoints.
    Configure,

    /// Current conditions for a city.
    Current {
        /// City name; defaults to the configured city.
        city: Option<String>,
    },

    /// Five-day forecast for a city.
    Forecast {
        /// City name; defaults to the configured city.
        city: Option<String>,
    },

    /// Current conditions and forecast together.
    Show {
        /// City name; defaults to the configured city.
        city: Option<String>,
    },

    /// Find cities matching a query.
    Search {
        query: String,

        /// Choose one of the matches and show its weather.
        #[arg(long)]
        pick: bool,
    },
}

fn parse_units(value: &str) -> Result<Units, String> {
    Units::try_from(value).map_err(|e| e.to_string())
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let config = Config::load()?;

        if let Command::Configure = self.command {
            return configure(config);
        }

        let units = self.units.unwrap_or(config.units);
        let service = service_from_config(&config)?;

        match self.command {
            Command::Configure => Ok(()),
            Command::Current { city } => {
                let city = config.city_or_default(city.as_deref());
                let current = service
                    .current_weather(city)
                    .await
                    .with_context(|| format!("Couldn't load weather for '{city}'"))?;

                if self.json {
                    println!("{}", to_string_pretty(&current)?);
                } else {
                    print!("{}", render::current(&current, units));
                }
                Ok(())
            }
            Command::Forecast { city } => {
                let city = config.city_or_default(city.as_deref());
                let forecast = service
                    .forecast_weather(city)
                    .await
                    .with_context(|| format!("Couldn't load forecast for '{city}'"))?;

                if self.json {
                    println!("{}", to_string_pretty(&forecast)?);
                } else {
                    print!("{}", render::forecast(&forecast, units));
                }
                Ok(())
            }
            Command::Show { city } => {
                let city = config.city_or_default(city.as_deref());
                show(&service, city, self.json, units).await
            }
            Command::Search { query, pick } => {
                if pick {
                    return pick_and_show(&service, &query, self.json, units).await;
                }

                let found = service
                    .search_cities(&query)
                    .await
                    .context("City search failed")?;

                if self.json {
                    println!("{}", to_string_pretty(&found)?);
                } else {
                    print!("{}", render::suggestions(&found));
                }
                Ok(())
            }
        }
    }
}

async fn show(
    service: &WeatherService,
    city: &str,
    json: bool,
    units: Units,
) -> anyhow::Result<()> {
    let dashboard = service
        .dashboard(city)
        .await
        .with_context(|| format!("Couldn't load weather for '{city}'. Try another city"))?;

    if json {
        println!("{}", to_string_pretty(&dashboard)?);
    } else {
        print!("{}", render::current(&dashboard.current, units));
        println!();
        print!("{}", render::forecast(&dashboard.forecast, units));
    }
    Ok(())
}

async fn pick_and_show(
    service: &WeatherService,
    query: &str,
    json: bool,
    units: Units,
) -> anyhow::Result<()> {
    if query.trim().chars().count() < MIN_PICK_QUERY_LEN {
        println!("Type at least {MIN_PICK_QUERY_LEN} characters to search.");
        return Ok(());
    }

    let found = service.search_cities(query).await.context("City search failed")?;
    if found.is_empty() {
        println!("No cities match '{}'.", query.trim());
        return Ok(());
    }

    let options: Vec<String> = found.iter().map(render::suggestion_label).collect();
    let choice = Select::new("Which city?", options).raw_prompt()?;
    let city = &found[choice.index].name;

    tracing::debug!(%city, "picked search result");
    show(service, city, json, units).await
}

fn configure(mut config: Config) -> anyhow::Result<()> {
    config.default_city = Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()?
        .trim()
        .to_string();

    let start = Units::all().iter().position(|u| *u == config.units).unwrap_or(0);
    config.units = Select::new("Units:", Units::all().to_vec())
        .with_starting_cursor(start)
        .prompt()?;

    config.api_base_url = Text::new("Forecast API base URL:")
        .with_default(&config.api_base_url)
        .prompt()?;

    config.geo_base_url = Text::new("Geocoding API base URL:")
        .with_default(&config.geo_base_url)
        .prompt()?;

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());
    Ok(())
}
