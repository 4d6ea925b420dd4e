//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weatherapi.com fetch-and-map provider
//! - The session state machine (`WeatherClient`)
//! - Shared view models (current conditions, forecast days, request state)
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;

pub use client::{RequestId, WeatherClient};
pub use config::Config;
pub use error::FetchError;
pub use model::{CurrentConditions, ForecastDay, RequestState, WeatherReport};
pub use provider::{WeatherProvider, weatherapi::WeatherApiProvider};
