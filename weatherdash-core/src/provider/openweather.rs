use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    WeatherError,
    model::{LocationQuery, RawCurrentConditions, RawForecast},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, WeatherError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn query_params(&self, query: &LocationQuery) -> Vec<(&'static str, String)> {
        let mut params = match query {
            LocationQuery::City(name) => vec![("q", name.clone())],
            LocationQuery::Coords(c) => vec![("lat", c.lat.to_string()), ("lon", c.lon.to_string())],
        };
        params.push(("appid", self.api_key.clone()));
        params.push(("units", "metric".to_string()));
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &LocationQuery,
    ) -> Result<T, WeatherError> {
        let url = format!("{}/{}", self.base_url, endpoint);

        let res = self
            .http
            .get(&url)
            .query(&self.query_params(query))
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if status == StatusCode::NOT_FOUND {
            debug!(endpoint, %query, "location not found");
            return Err(WeatherError::NotFound {
                query: query.to_string(),
            });
        }

        if !status.is_success() {
            warn!(endpoint, %status, "OpenWeather request failed");
            return Err(WeatherError::Api {
                status,
                message: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            WeatherError::MalformedResponse(format!("OpenWeather {endpoint} JSON: {e}"))
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip_all, fields(query = %query))]
    async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<RawCurrentConditions, WeatherError> {
        self.get_json("weather", query).await
    }

    #[instrument(skip_all, fields(query = %query))]
    async fn fetch_forecast(&self, query: &LocationQuery) -> Result<RawForecast, WeatherError> {
        self.get_json("forecast", query).await
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
