//! Core library for the `weatherdash` CLI.
//!
//! This crate defines:
//! - Configuration handling
//! - The OpenWeather provider and the concurrent current + forecast lookup
//! - Normalization of raw provider payloads into a display model
//! - Favorites persistence and the session state tying it all together
//!
//! It is used by `weatherdash-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod favorites;
pub mod icon;
pub mod location;
pub mod model;
pub mod normalize;
pub mod provider;
pub mod session;

pub use config::Config;
pub use error::WeatherError;
pub use favorites::{Favorite, FavoriteStore, JsonFileStore};
pub use location::{ConfiguredLocator, FixedLocator, Locator};
pub use model::{Coordinates, DisplayWeather, LocationKey, LocationQuery};
pub use normalize::{normalize, normalize_in};
pub use provider::{WeatherProvider, lookup, provider_from_config};
pub use session::{FavoriteReport, Session};
