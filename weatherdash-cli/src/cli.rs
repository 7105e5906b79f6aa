use std::sync::Arc;

use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use tracing::debug;
use weatherdash_core::{
    Config, ConfiguredLocator, Coordinates, DisplayWeather, FixedLocator, JsonFileStore,
    LocationKey, Locator, Session, WeatherError, provider_from_config,
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherdash", version, about = "Current weather and forecast in your terminal")]
pub struct Cli {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeather API key, default city and home location.
    Configure,

    /// Show weather for a city.
    Show {
        /// City name; defaults to the configured default city.
        city: Option<String>,

        /// Add the city to favorites.
        #[arg(long)]
        save: bool,

        /// Print the display model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show weather at your current location.
    Here {
        #[command(flatten)]
        position: PositionArgs,

        /// Add the location to favorites.
        #[arg(long)]
        save: bool,

        /// Print the display model as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Manage saved locations.
    Favorites {
        #[command(subcommand)]
        command: FavoritesCommand,
    },
}

/// Explicit coordinates; when absent the configured home location is used.
#[derive(Debug, clap::Args)]
pub struct PositionArgs {
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,
}

impl PositionArgs {
    fn locator(&self, config: &Config) -> Box<dyn Locator> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Box::new(FixedLocator(Coordinates::new(lat, lon))),
            _ => Box::new(ConfiguredLocator::new(config.location.clone())),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum FavoritesCommand {
    /// Show current weather for every saved location.
    List,

    /// Save a city, or your current location with --here.
    Add {
        #[arg(required_unless_present = "here", conflicts_with = "here")]
        city: Option<String>,

        #[arg(long)]
        here: bool,

        #[command(flatten)]
        position: PositionArgs,
    },

    /// Remove a saved city, or the saved location with --coords.
    Remove {
        #[arg(required_unless_present = "coords", conflicts_with = "coords")]
        city: Option<String>,

        #[arg(long)]
        coords: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { city, save, json } => {
                let config = Config::load()?;
                let mut session = open_session(&config)?;
                let city = city.unwrap_or_else(|| config.default_city.clone());

                let weather = session
                    .search(&city)
                    .await
                    .map_err(|e| search_error(&city, e))?;
                print_weather(&weather, json)?;

                if save {
                    report_saved(session.save_current()?);
                }
                Ok(())
            }
            Command::Here {
                position,
                save,
                json,
            } => {
                let config = Config::load()?;
                let mut session = open_session(&config)?;
                let locator = position.locator(&config);

                let weather = session
                    .locate(locator.as_ref())
                    .await
                    .map_err(location_error)?;
                print_weather(&weather, json)?;

                if save {
                    report_saved(session.save_current()?);
                }
                Ok(())
            }
            Command::Favorites { command } => favorites(command).await,
        }
    }
}

async fn favorites(command: FavoritesCommand) -> anyhow::Result<()> {
    let config = Config::load()?;
    let mut session = open_session(&config)?;

    match command {
        FavoritesCommand::List => {
            let reports = session.refresh_favorites().await;
            print!("{}", render::favorites(&reports));
        }
        FavoritesCommand::Add {
            city: Some(city), ..
        } => report_saved(session.add_city(&city)?),
        FavoritesCommand::Add { position, .. } => {
            let locator = position.locator(&config);
            session
                .locate(locator.as_ref())
                .await
                .map_err(location_error)?;
            report_saved(session.save_current()?);
        }
        FavoritesCommand::Remove { city, coords } => {
            let key = match (city, coords) {
                (_, true) => LocationKey::CurrentLocation,
                (Some(name), false) => LocationKey::City(name),
                (None, false) => bail!("Nothing to remove: pass a city name or --coords"),
            };
            let removed = session.remove(&key)?;
            println!("Removed {removed} saved location(s).");
        }
    }
    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let city = inquire::Text::new("Default city:")
        .with_default(&config.default_city)
        .prompt()
        .context("Failed to read default city")?;
    config.default_city = city.trim().to_string();

    let set_home = inquire::Confirm::new("Set a home location for `weatherdash here`?")
        .with_default(config.location.coordinates().is_some())
        .prompt()?;
    if set_home {
        let lat = inquire::CustomType::<f64>::new("Latitude:").prompt()?;
        let lon = inquire::CustomType::<f64>::new("Longitude:").prompt()?;
        let home = Coordinates::new(lat, lon);
        if !home.is_valid() {
            return Err(WeatherError::InvalidCoordinates.into());
        }
        config.set_home(home);
    }

    config.save()?;
    println!(
        "Configuration saved to {}",
        Config::config_file_path()?.display()
    );
    Ok(())
}

fn open_session(config: &Config) -> anyhow::Result<Session> {
    let provider = provider_from_config(config)?;
    let store = JsonFileStore::new(Config::favorites_file_path()?);
    debug!(path = %store.path().display(), "loading favorites");
    Session::open(provider, Arc::new(store))
}

fn print_weather(weather: &DisplayWeather, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(weather)?);
    } else {
        print!("{}", render::weather(weather));
        println!("\nUpdated {}", chrono::Local::now().format("%H:%M"));
    }
    Ok(())
}

fn report_saved(added: bool) {
    if added {
        println!("✅ Saved!");
    } else {
        println!("Already saved.");
    }
}

fn search_error(city: &str, err: WeatherError) -> anyhow::Error {
    let msg = match err {
        WeatherError::EmptyQuery => "Please enter a city name.".to_string(),
        _ => format!(
            "Weather data not found for \"{city}\". Please check the spelling and try again."
        ),
    };
    anyhow::Error::new(err).context(msg)
}

fn location_error(err: WeatherError) -> anyhow::Error {
    if matches!(err, WeatherError::InvalidCoordinates) {
        return anyhow!(err);
    }
    let msg = if err.is_geolocation() {
        "Unable to retrieve your location. Please search for a city instead."
    } else {
        "Failed to get weather for your location."
    };
    anyhow::Error::new(err).context(msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn show_defaults() {
        let cli = Cli::try_parse_from(["weatherdash", "show"]).expect("parse");
        match cli.command {
            Command::Show { city, save, json } => {
                assert!(city.is_none());
                assert!(!save && !json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn here_accepts_negative_coordinates() {
        let cli = Cli::try_parse_from(["weatherdash", "here", "--lat", "-33.9", "--lon", "18.4"])
            .expect("parse");
        match cli.command {
            Command::Here { position, .. } => {
                assert_eq!(position.lat, Some(-33.9));
                assert_eq!(position.lon, Some(18.4));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["weatherdash", "here", "--lat", "10"]).is_err());
    }

    #[test]
    fn remove_needs_a_target() {
        assert!(Cli::try_parse_from(["weatherdash", "favorites", "remove"]).is_err());
        assert!(Cli::try_parse_from(["weatherdash", "favorites", "remove", "Paris", "--coords"]).is_err());
        assert!(Cli::try_parse_from(["weatherdash", "favorites", "remove", "--coords"]).is_ok());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["weatherdash", "-vv", "favorites", "list"]).expect("parse");
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn search_error_message() {
        let err = search_error("Atlantis", WeatherError::NotFound { query: "Atlantis".into() });
        assert_eq!(
            err.to_string(),
            "Weather data not found for \"Atlantis\". Please check the spelling and try again."
        );
    }

    #[test]
    fn location_error_messages() {
        assert_eq!(
            location_error(WeatherError::GeolocationDenied).to_string(),
            "Unable to retrieve your location. Please search for a city instead."
        );
        assert_eq!(
            location_error(WeatherError::EmptyQuery).to_string(),
            "Failed to get weather for your location."
        );
    }
}
