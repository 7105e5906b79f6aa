use async_trait::async_trait;

use crate::{WeatherError, config::LocationConfig, model::Coordinates};

/// Resolves the user's current position.
#[async_trait]
pub trait Locator: Send + Sync {
    async fn current_position(&self) -> Result<Coordinates, WeatherError>;
}

/// Position taken from the `[location]` section of the config file.
#[derive(Debug, Clone)]
pub struct ConfiguredLocator {
    settings: LocationConfig,
}

impl ConfiguredLocator {
    pub fn new(settings: LocationConfig) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Locator for ConfiguredLocator {
    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        if !self.settings.share {
            return Err(WeatherError::GeolocationDenied);
        }
        let coords = self
            .settings
            .coordinates()
            .ok_or(WeatherError::GeolocationUnavailable)?;
        validate(coords)
    }
}

/// Position given explicitly, e.g. on the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocator(pub Coordinates);

#[async_trait]
impl Locator for FixedLocator {
    async fn current_position(&self) -> Result<Coordinates, WeatherError> {
        validate(self.0)
    }
}

fn validate(coords: Coordinates) -> Result<Coordinates, WeatherError> {
    if coords.is_valid() {
        Ok(coords)
    } else {
        Err(WeatherError::InvalidCoordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(share: bool, lat: Option<f64>, lon: Option<f64>) -> LocationConfig {
        LocationConfig {
            share,
            latitude: lat,
            longitude: lon,
        }
    }

    #[tokio::test]
    async fn configured_position() {
        let locator = ConfiguredLocator::new(settings(true, Some(51.5), Some(-0.12)));
        let coords = locator.current_position().await.expect("position");
        assert_eq!(coords, Coordinates::new(51.5, -0.12));
    }

    #[tokio::test]
    async fn sharing_disabled_is_denied() {
        let locator = ConfiguredLocator::new(settings(false, Some(51.5), Some(-0.12)));
        let err = locator.current_position().await.unwrap_err();
        assert!(matches!(err, WeatherError::GeolocationDenied));
    }

    #[tokio::test]
    async fn missing_coordinates_are_unavailable() {
        let locator = ConfiguredLocator::new(settings(true, Some(51.5), None));
        let err = locator.current_position().await.unwrap_err();
        assert!(matches!(err, WeatherError::GeolocationUnavailable));
    }

    #[tokio::test]
    async fn out_of_range_is_rejected() {
        let err = FixedLocator(Coordinates::new(120.0, 0.0))
            .current_position()
            .await
            .unwrap_err();
        assert!(matches!(err, WeatherError::InvalidCoordinates));
    }
}
