use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lon)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4},{:.4}", self.lat, self.lon)
    }
}

/// What to ask the provider for.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coords(Coordinates),
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationQuery::City(name) => write!(f, "\"{name}\""),
            LocationQuery::Coords(c) => write!(f, "coordinates {c}"),
        }
    }
}

/// Identifies the location currently on screen, and the target of a favorite removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationKey {
    City(String),
    CurrentLocation,
}

// Raw OpenWeather payloads (units=metric).

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawCondition {
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMain {
    pub temp: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub pressure: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawWind {
    pub speed: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSys {
    #[serde(default)]
    pub country: String,
}

/// Body of the `/weather` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawCurrentConditions {
    pub name: String,
    pub sys: RawSys,
    pub main: RawMain,
    /// Meters. The provider omits it for some stations.
    #[serde(default)]
    pub visibility: Option<f64>,
    pub wind: RawWind,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastMain {
    pub temp: f64,
}

/// One 3-hour step of the `/forecast` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastEntry {
    #[serde(with = "chrono::serde::ts_seconds")]
    pub dt: DateTime<Utc>,
    pub main: RawForecastMain,
    #[serde(default)]
    pub weather: Vec<RawCondition>,
}

/// Body of the `/forecast` endpoint; only the ordered list is used.
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecast {
    pub list: Vec<RawForecastEntry>,
}

impl RawCurrentConditions {
    pub fn condition(&self) -> Option<&RawCondition> {
        self.weather.first()
    }
}

impl RawForecastEntry {
    pub fn condition(&self) -> Option<&RawCondition> {
        self.weather.first()
    }
}

// Display model.

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentDisplay {
    pub temp: i64,
    pub description: String,
    pub icon: &'static str,
    pub humidity: u8,
    /// km/h
    pub wind_speed: i64,
    /// hPa
    pub pressure: f64,
    pub feels_like: i64,
    /// km; `None` when the provider did not report visibility.
    pub visibility: Option<i64>,
    pub uv_index: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub time: String,
    pub temp: i64,
    pub icon: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyEntry {
    pub day: String,
    pub high: i64,
    pub low: i64,
    pub icon: &'static str,
    pub desc: String,
}

/// Weather for one location, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayWeather {
    pub location: String,
    pub current: CurrentDisplay,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}

impl DisplayWeather {
    /// City part of `location`, e.g. `Paris` for `Paris, FR`.
    pub fn city(&self) -> &str {
        self.location
            .split(',')
            .next()
            .unwrap_or(self.location.as_str())
    }
}
