use crate::{
    Config, ForecastSample, Location, LookupError, provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// First lookup stage: free-text place name to coordinates.
///
/// Callers only pass non-empty, trimmed names.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    async fn resolve(&self, place: &str) -> Result<Location, LookupError>;
}

/// Raw forecast feed for a location, chronologically ordered.
#[async_trait]
pub trait ForecastSource: Send + Sync + Debug {
    async fn fetch_samples(&self, location: &Location) -> Result<Vec<ForecastSample>, LookupError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherClient> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `forecast configure` or set OPENWEATHER_API_KEY."
        )
    })?;

    Ok(OpenWeatherClient::with_endpoints(
        api_key.to_owned(),
        config.endpoints.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn provider_from_config_errors_when_missing_api_key() {
        let cfg = Config::default();
        let err = provider_from_config(&cfg).unwrap_err();

        let msg = err.to_string();
        assert!(msg.contains("No OpenWeather API key configured"));
        assert!(msg.contains("Hint: run `forecast configure`"));
    }

    #[test]
    fn provider_from_config_uses_configured_endpoints() {
        let mut cfg = Config::default();
        cfg.set_api_key("KEY".to_string());
        cfg.endpoints.forecast_url = "http://localhost:9999/forecast".to_string();

        let client = provider_from_config(&cfg).expect("client should build");
        assert_eq!(client.endpoints().forecast_url, "http://localhost:9999/forecast");
    }
}
