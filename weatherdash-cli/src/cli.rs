use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{Password, Select};
use weatherdash_core::{
    BookmarkState, Bookmarks, City, Config, Dashboard, FileStore, JsonStore, TemperatureUnit,
    WeatherProvider, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "City weather dashboard")]
pub struct Cli {
    /// AccuWeather API key; overrides the configured one.
    #[arg(long, global = true, env = "WEATHERDASH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the API key and preferred unit interactively.
    Configure,

    /// List cities matching a name.
    Search {
        /// City name, e.g. "Paris".
        query: String,
    },

    /// Show current weather, 5-day forecast and the next 12 hours for a city.
    Show {
        /// City name, e.g. "Paris".
        query: String,

        /// Choose among matching cities instead of taking the first.
        #[arg(long)]
        pick: bool,

        /// Display unit: celsius or fahrenheit.
        #[arg(long, value_parser = parse_unit)]
        unit: Option<TemperatureUnit>,
    },

    /// Show a city and toggle whether it is saved.
    Bookmark {
        /// City name, e.g. "Paris".
        query: String,

        /// Choose among matching cities instead of taking the first.
        #[arg(long)]
        pick: bool,
    },

    /// List saved cities with the weather they were saved with.
    Saved,

    /// Remove a saved city by its location key.
    Unsave {
        /// Location key, as shown by `saved`.
        key: String,
    },
}

fn parse_unit(value: &str) -> Result<TemperatureUnit> {
    TemperatureUnit::try_from(value)
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut config = Config::load()?;
        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }

        match self.command {
            Command::Configure => configure(config),
            Command::Search { query } => {
                let provider = provider_from_config(&config)?;
                let cities = provider
                    .search_cities(&query)
                    .await
                    .with_context(|| format!("Failed to search for '{query}'"))?;
                print!("{}", render::candidates(&cities));
                Ok(())
            }
            Command::Show { query, pick, unit } => {
                let unit = unit.unwrap_or(config.unit);
                show(&config, &query, pick, unit).await.map(|_| ())
            }
            Command::Bookmark { query, pick } => {
                let Some((dashboard, bookmarks)) = show(&config, &query, pick, config.unit).await?
                else {
                    return Ok(());
                };

                let state = dashboard.snapshot();
                let Some(city) = state.selection.as_ref() else {
                    return Ok(());
                };

                let new_state = bookmarks
                    .toggle(city, state.current_weather())
                    .context("Failed to update saved cities")?;

                match new_state {
                    BookmarkState::Bookmarked => println!("Saved {}", city.display_name()),
                    BookmarkState::NotBookmarked => println!("Removed {}", city.display_name()),
                }
                Ok(())
            }
            Command::Saved => {
                print!("{}", render::saved(&bookmarks()?.saved(), config.unit));
                Ok(())
            }
            Command::Unsave { key } => {
                if bookmarks()?.remove(&key).context("Failed to update saved cities")? {
                    println!("Removed {key}");
                } else {
                    println!("No saved city with key {key}");
                }
                Ok(())
            }
        }
    }
}

fn configure(mut config: Config) -> Result<()> {
    let api_key = Password::new("AccuWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let current = TemperatureUnit::all().iter().position(|u| *u == config.unit).unwrap_or(0);
    config.unit = Select::new("Display unit:", TemperatureUnit::all().to_vec())
        .with_starting_cursor(current)
        .prompt()
        .context("Failed to read display unit")?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

fn bookmarks() -> Result<Bookmarks> {
    let store = FileStore::new(Config::data_dir()?);
    Ok(Bookmarks::new(JsonStore::new(Arc::new(store))))
}

/// Resolve `query` to a city, load its weather and print the dashboard.
///
/// Returns `None` when no city matched.
async fn show(
    config: &Config,
    query: &str,
    pick: bool,
    unit: TemperatureUnit,
) -> Result<Option<(Dashboard, Bookmarks)>> {
    let provider = Arc::new(provider_from_config(config)?);

    let candidates = provider
        .search_cities(query)
        .await
        .with_context(|| format!("Failed to search for '{query}'"))?;
    tracing::debug!(query, candidates = candidates.len(), "city search finished");

    let dashboard = Dashboard::new(provider, unit);
    let bookmarks = bookmarks()?;

    let Some(city) = choose(candidates, pick)? else {
        print!("{}", render::dashboard(&dashboard.snapshot(), BookmarkState::NotBookmarked));
        return Ok(None);
    };

    dashboard.select_city(city).settle().await;

    let state = dashboard.snapshot();
    let marker = state
        .selected_key()
        .map(|key| bookmarks.state_of(key))
        .unwrap_or(BookmarkState::NotBookmarked);
    print!("{}", render::dashboard(&state, marker));

    Ok(Some((dashboard, bookmarks)))
}

fn choose(candidates: Vec<City>, pick: bool) -> Result<Option<City>> {
    if !pick || candidates.len() < 2 {
        return Ok(candidates.into_iter().next());
    }

    let labels: Vec<String> =
        candidates.iter().map(|c| format!("{} ({})", c.display_name(), c.key)).collect();

    let chosen = Select::new("Which city?", labels.clone()).prompt().context("No city chosen")?;
    let index = labels.iter().position(|l| *l == chosen).unwrap_or(0);

    Ok(candidates.into_iter().nth(index))
}
