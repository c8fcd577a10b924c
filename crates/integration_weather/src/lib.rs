//! National Weather Service integration
//!
//! Client for the NWS API (<https://api.weather.gov>). Turns coordinates
//! into the ordered list of forecast periods for their grid cell. No API key
//! is required, but every request carries an identifying User-Agent.

pub mod client;
mod models;

pub use client::{NwsWeatherClient, PUBLIC_BASE_URL, WeatherClient, WeatherConfig};
pub use models::GridPoint;
