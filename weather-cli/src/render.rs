//! Human-friendly (and JSON) output for a [`RequestState`].

use std::fmt::Write as _;

use weather_core::{CurrentConditions, ForecastDay, RequestState};

pub const LOADING_TEXT: &str = "Loading...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render(state: &RequestState, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(state)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(state)?),
    }
}

pub fn render_text(state: &RequestState) -> String {
    match state {
        RequestState::Idle => String::new(),
        RequestState::Loading => LOADING_TEXT.to_string(),
        RequestState::Failed { message } => format!("❌ {message}"),
        RequestState::Success(report) => {
            let mut out = String::new();
            if let Some(current) = &report.current {
                render_current(&mut out, current);
            }
            if !report.forecast.is_empty() {
                if !out.is_empty() {
                    out.push('\n');
                }
                render_forecast(&mut out, &report.forecast);
            }
            out.trim_end().to_string()
        }
    }
}

fn render_current(out: &mut String, current: &CurrentConditions) {
    let _ = writeln!(out, "{}", current.location_line());
    let _ = writeln!(out, "{}°C", current.display_temperature());
    let _ = writeln!(out, "{} ({})", current.condition, current.icon_url());
    let _ = writeln!(out, "💧 Humidity: {}%", current.humidity_pct);
    let _ = writeln!(out, "🌬️ Wind: {} kph", current.wind_kph);
}

fn render_forecast(out: &mut String, days: &[ForecastDay]) {
    for day in days {
        let temperature = format!("{}°C", day.display_temperature());
        let _ = writeln!(
            out,
            "{}  {temperature:>5}  {} ({})",
            day.date.format("%a"),
            day.condition,
            day.icon_url(),
        );
    }
}
