use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Weather at the resolved location right now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub condition: String,
    /// Icon path exactly as the provider sent it (usually protocol-relative).
    pub icon: String,
    pub humidity_pct: u8,
    pub wind_kph: f64,
}

impl CurrentConditions {
    /// "Name, Country" as reported by the provider.
    pub fn location_line(&self) -> String {
        format!("{}, {}", self.location_name, self.country)
    }

    pub fn icon_url(&self) -> String {
        resolve_icon_url(&self.icon)
    }

    pub fn display_temperature(&self) -> i64 {
        display_temperature(self.temperature_c)
    }
}

/// One day of the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub avg_temperature_c: f64,
    pub condition: String,
    pub icon: String,
}

impl ForecastDay {
    pub fn icon_url(&self) -> String {
        resolve_icon_url(&self.icon)
    }

    pub fn display_temperature(&self) -> i64 {
        display_temperature(self.avg_temperature_c)
    }
}

/// Everything a successful fetch produced. Either part may be empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub current: Option<CurrentConditions>,
    /// Chronological, in the order the provider returned it.
    pub forecast: Vec<ForecastDay>,
}

/// Status of the session's latest fetch. Data only exists inside `Success`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum RequestState {
    #[default]
    Idle,
    Loading,
    Success(WeatherReport),
    Failed { message: String },
}

impl RequestState {
    pub fn is_loading(&self) -> bool {
        matches!(self, RequestState::Loading)
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            RequestState::Success(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Whole-degree value for display; halves round up (toward +inf).
pub fn display_temperature(celsius: f64) -> i64 {
    (celsius + 0.5).floor() as i64
}

/// Turn a provider icon path into an absolute `https:` URL.
pub fn resolve_icon_url(icon: &str) -> String {
    if icon.starts_with("https://") || icon.starts_with("http://") {
        icon.to_string()
    } else {
        format!("https:{icon}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_temperature_rounds_to_nearest_degree() {
        assert_eq!(display_temperature(21.3), 21);
        assert_eq!(display_temperature(19.7), 20);
        assert_eq!(display_temperature(2.5), 3);
        assert_eq!(display_temperature(-2.5), -2);
        assert_eq!(display_temperature(-0.3), 0);
        assert_eq!(display_temperature(-7.8), -8);
    }

    #[test]
    fn protocol_relative_icon_gets_https_prefix() {
        assert_eq!(resolve_icon_url("//x/sun.png"), "https://x/sun.png");
        assert_eq!(
            resolve_icon_url("//cdn.weatherapi.com/weather/64x64/day/113.png"),
            "https://cdn.weatherapi.com/weather/64x64/day/113.png"
        );
    }

    #[test]
    fn absolute_icon_is_left_alone() {
        assert_eq!(resolve_icon_url("https://x/sun.png"), "https://x/sun.png");
    }

    #[test]
    fn failed_state_has_no_report() {
        let state = RequestState::Failed { message: "boom".into() };
        assert!(state.report().is_none());
        assert_eq!(state.error(), Some("boom"));
        assert!(!state.is_loading());
    }
}
