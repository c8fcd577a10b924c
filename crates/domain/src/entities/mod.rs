//! Domain entities

mod weather_period;

pub use weather_period::{QuantitativeValue, WeatherPeriod};
