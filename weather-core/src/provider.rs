use crate::{FetchError, WeatherReport};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod weatherapi;

/// Source of weather reports. The client only talks to this trait, so tests
/// can swap in a stub.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// One request for current conditions plus the short forecast at `query`.
    async fn fetch_report(&self, query: &str) -> Result<WeatherReport, FetchError>;
}

