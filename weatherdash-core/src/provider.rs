use crate::{
    Config, WeatherError,
    model::{DisplayWeather, LocationQuery, RawCurrentConditions, RawForecast},
    normalize::normalize,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;
use tracing::{debug, instrument};

pub mod openweather;

/// Source of raw current-conditions and forecast payloads.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<RawCurrentConditions, WeatherError>;

    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<RawForecast, WeatherError>;
}

/// Fetch current conditions and forecast concurrently, then normalize.
///
/// Either request failing fails the whole lookup.
#[instrument(skip_all, fields(query = %query))]
pub async fn lookup(
    provider: &dyn WeatherProvider,
    query: &LocationQuery,
) -> Result<DisplayWeather, WeatherError> {
    let (current, forecast) = tokio::try_join!(
        provider.fetch_current(query),
        provider.fetch_forecast(query)
    )?;

    debug!(steps = forecast.list.len(), "normalizing weather");
    Ok(normalize(&current, &forecast.list))
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No API key configured.\n\
                 Hint: run `weatherdash configure` and enter your OpenWeather API key."
        )
    })?;

    let provider = OpenWeatherProvider::new(
        api_key.to_owned(),
        config.base_url.clone(),
        config.timeout(),
    )?;

    Ok(Box::new(provider))
}
