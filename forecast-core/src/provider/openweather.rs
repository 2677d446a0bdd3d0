use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::{debug, instrument, warn};

use crate::{
    config::Endpoints,
    error::{LookupError, Stage},
    model::{ForecastSample, Location},
};

use super::{ForecastSource, Geocoder};

const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// OpenWeather client serving both lookup stages with one API key.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    endpoints: Endpoints,
    http: Client,
}

impl OpenWeatherClient {
    pub fn with_endpoints(api_key: String, endpoints: Endpoints) -> Self {
        Self {
            api_key,
            endpoints,
            http: Client::new(),
        }
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        what: &str,
    ) -> Result<T> {
        let res = self
            .http
            .get(url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .with_context(|| format!("Failed to send request to OpenWeather ({what})"))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read OpenWeather {what} response body"))?;

        if !status.is_success() {
            return Err(anyhow!(
                "OpenWeather {what} request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        serde_json::from_str(&body).with_context(|| format!("Failed to parse OpenWeather {what} JSON"))
    }

    async fn fetch_feed(&self, location: &Location) -> Result<Vec<ForecastSample>> {
        let lat = location.latitude.to_string();
        let lon = location.longitude.to_string();

        let parsed: OwForecastResponse = self
            .get_json(
                &self.endpoints.forecast_url,
                &[("lat", lat.as_str()), ("lon", lon.as_str())],
                "forecast",
            )
            .await?;

        parsed.list.into_iter().map(ForecastSample::try_from).collect()
    }
}

#[derive(Debug, Deserialize)]
struct OwGeoCandidate {
    name: String,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt_txt: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    list: Vec<OwForecastEntry>,
}

impl TryFrom<OwForecastEntry> for ForecastSample {
    type Error = anyhow::Error;

    fn try_from(entry: OwForecastEntry) -> Result<Self> {
        let timestamp = NaiveDateTime::parse_from_str(&entry.dt_txt, DT_TXT_FORMAT)
            .with_context(|| format!("Invalid forecast timestamp '{}'", entry.dt_txt))?;

        let weather = entry
            .weather
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Forecast entry {} has no weather condition", entry.dt_txt))?;

        Ok(ForecastSample {
            timestamp,
            temperature_kelvin: entry.main.temp,
            wind_speed_mps: entry.wind.speed,
            humidity_pct: entry.main.humidity,
            condition: weather.description,
            icon_id: weather.icon,
        })
    }
}

#[async_trait]
impl Geocoder for OpenWeatherClient {
    #[instrument(skip(self))]
    async fn resolve(&self, place: &str) -> Result<Location, LookupError> {
        let candidates: Vec<OwGeoCandidate> = self
            .get_json(
                &self.endpoints.geocoding_url,
                &[("q", place), ("limit", "1")],
                "geocoding",
            )
            .await
            .map_err(|err| {
                warn!("geocoding failed: {err:#}");
                LookupError::Network(Stage::Geocoding)
            })?;

        let first = candidates
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(place.to_string()))?;

        debug!(name = %first.name, lat = first.lat, lon = first.lon, "resolved place");

        Ok(Location {
            name: first.name,
            latitude: first.lat,
            longitude: first.lon,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherClient {
    #[instrument(skip(self, location), fields(lat = %location.latitude, lon = %location.longitude))]
    async fn fetch_samples(&self, location: &Location) -> Result<Vec<ForecastSample>, LookupError> {
        let samples = self.fetch_feed(location).await.map_err(|err| {
            warn!("forecast fetch failed: {err:#}");
            LookupError::Network(Stage::Forecast)
        })?;

        debug!(entries = samples.len(), "fetched forecast feed");
        Ok(samples)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(dt_txt: &str, weather: Vec<OwWeather>) -> OwForecastEntry {
        OwForecastEntry {
            dt_txt: dt_txt.to_string(),
            main: OwMain { temp: 285.4, humidity: 81 },
            weather,
            wind: OwWind { speed: 4.2 },
        }
    }

    fn clouds() -> Vec<OwWeather> {
        vec![OwWeather { description: "broken clouds".into(), icon: "04d".into() }]
    }

    #[test]
    fn entry_converts_to_sample() {
        let sample = ForecastSample::try_from(entry("2024-01-15 12:00:00", clouds())).expect("valid entry");

        assert_eq!(sample.date_label(), "2024-01-15");
        assert_eq!(sample.temperature_kelvin, 285.4);
        assert_eq!(sample.humidity_pct, 81);
        assert_eq!(sample.wind_speed_mps, 4.2);
        assert_eq!(sample.condition, "broken clouds");
        assert_eq!(sample.icon_id, "04d");
    }

    #[test]
    fn entry_without_weather_is_rejected() {
        let err = ForecastSample::try_from(entry("2024-01-15 12:00:00", vec![])).unwrap_err();
        assert!(err.to_string().contains("no weather condition"));
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        let err = ForecastSample::try_from(entry("15/01/2024", clouds())).unwrap_err();
        assert!(err.to_string().contains("Invalid forecast timestamp"));
    }

    #[test]
    fn forecast_response_parses_upstream_shape() {
        let json = r#"{
            "cod": "200",
            "cnt": 1,
            "list": [{
                "dt": 1705320000,
                "main": {"temp": 280.32, "feels_like": 278.1, "humidity": 66},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
                "wind": {"speed": 2.06, "deg": 240},
                "dt_txt": "2024-01-15 12:00:00"
            }],
            "city": {"name": "Paris", "country": "FR"}
        }"#;

        let parsed: OwForecastResponse = serde_json::from_str(json).expect("valid forecast JSON");
        assert_eq!(parsed.list.len(), 1);
        assert_eq!(parsed.list[0].weather[0].icon, "01d");
    }

    #[test]
    fn truncate_body_keeps_short_bodies() {
        assert_eq!(truncate_body("short"), "short");
        let long = "x".repeat(250);
        assert_eq!(truncate_body(&long).len(), 203);
    }
}
