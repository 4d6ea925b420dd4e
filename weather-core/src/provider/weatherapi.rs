use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::{
    Config, FetchError,
    model::{CurrentConditions, ForecastDay, WeatherReport},
};

use super::WeatherProvider;

/// Forecast horizon requested from the provider.
pub const FORECAST_DAYS: u8 = 3;

#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { api_key, base_url, http: Client::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.api_key_or_empty().to_string(), config.base_url.as_str())
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast.json", self.base_url)
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    #[instrument(skip(self), fields(provider = "weatherapi"))]
    async fn fetch_report(&self, query: &str) -> Result<WeatherReport, FetchError> {
        let url = self.forecast_url();
        let days = FORECAST_DAYS.to_string();
        debug!(url = %url, "Fetching forecast");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        parse_report(&body)
    }
}

/// Top level of the response. Sections are kept raw so a malformed one can
/// be dropped without failing the others.
#[derive(Debug, Deserialize)]
struct WaResponse {
    location: Option<serde_json::Value>,
    current: Option<serde_json::Value>,
    forecast: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    humidity: u8,
    wind_kph: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaDay {
    avgtemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastDay {
    date: NaiveDate,
    day: WaDay,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastDay>,
}

/// Map a 2xx body into a report. Only a body that isn't a JSON object is fatal.
pub fn parse_report(body: &str) -> Result<WeatherReport, FetchError> {
    let raw: WaResponse = serde_json::from_str(body)?;

    Ok(WeatherReport {
        current: map_current(raw.current, raw.location),
        forecast: map_forecast(raw.forecast),
    })
}

fn map_current(
    current: Option<serde_json::Value>,
    location: Option<serde_json::Value>,
) -> Option<CurrentConditions> {
    let current: WaCurrent = section(current?, "current")?;
    let Some(location) = location.and_then(|v| section::<WaLocation>(v, "location")) else {
        warn!("Response has current conditions but no location; dropping them");
        return None;
    };

    Some(CurrentConditions {
        location_name: location.name,
        country: location.country,
        temperature_c: current.temp_c,
        condition: current.condition.text,
        icon: current.condition.icon,
        humidity_pct: current.humidity,
        wind_kph: current.wind_kph,
    })
}

fn map_forecast(forecast: Option<serde_json::Value>) -> Vec<ForecastDay> {
    let Some(forecast) = forecast.and_then(|v| section::<WaForecast>(v, "forecast")) else {
        return Vec::new();
    };

    forecast
        .forecastday
        .into_iter()
        .map(|d| ForecastDay {
            date: d.date,
            avg_temperature_c: d.day.avgtemp_c,
            condition: d.day.condition.text,
            icon: d.day.condition.icon,
        })
        .collect()
}

fn section<T: DeserializeOwned>(value: serde_json::Value, name: &str) -> Option<T> {
    match serde_json::from_value(value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            warn!(section = name, error = %err, "Ignoring malformed response section");
            None
        }
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
