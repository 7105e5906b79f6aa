use reqwest::StatusCode;
use thiserror::Error;

/// Errors produced while looking up weather for a single location.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The provider has no data for the requested place or coordinates.
    #[error("Weather data not found for {query}")]
    NotFound { query: String },

    /// The provider answered with a non-success status other than 404.
    #[error("OpenWeather request failed with status {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body did not match the expected payload shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Location permission denied")]
    GeolocationDenied,

    #[error("Location service unavailable")]
    GeolocationUnavailable,

    #[error("Invalid coordinates: latitude must be -90 to 90, longitude must be -180 to 180")]
    InvalidCoordinates,

    #[error("Empty location query")]
    EmptyQuery,
}

impl WeatherError {
    /// True for failures of the locator rather than of the weather provider.
    pub fn is_geolocation(&self) -> bool {
        matches!(
            self,
            WeatherError::GeolocationDenied | WeatherError::GeolocationUnavailable
        )
    }
}
