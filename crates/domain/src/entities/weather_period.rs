//! Forecast period entity

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A measured value with its WMO unit code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuantitativeValue {
    /// Unit code such as `wmoUnit:percent`
    #[serde(default)]
    pub unit_code: String,
    /// The value, absent when upstream has no data
    #[serde(default)]
    pub value: Option<f64>,
}

/// One forecast interval
///
/// Periods are returned in upstream order, which is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherPeriod {
    /// Position in the forecast, starting at 1
    pub number: u32,
    /// Display name such as "Tonight" or "Wednesday"
    #[serde(default)]
    pub name: String,
    /// Interval start
    pub start_time: DateTime<FixedOffset>,
    /// Interval end
    pub end_time: DateTime<FixedOffset>,
    /// Daytime flag
    pub is_daytime: bool,
    /// Temperature in `temperature_unit`
    pub temperature: f64,
    /// "F" or "C"
    pub temperature_unit: String,
    /// "rising", "falling" or none
    #[serde(default)]
    pub temperature_trend: Option<String>,
    /// Wind speed text such as "5 to 10 mph"
    #[serde(default)]
    pub wind_speed: String,
    /// Compass direction such as "NW"
    #[serde(default)]
    pub wind_direction: String,
    /// Icon URL
    #[serde(default)]
    pub icon: String,
    /// Short summary
    #[serde(default)]
    pub short_forecast: String,
    /// Long summary
    #[serde(default)]
    pub detailed_forecast: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability_of_precipitation: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dewpoint: Option<QuantitativeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_humidity: Option<QuantitativeValue>,
}

impl WeatherPeriod {
    /// Precipitation chance in percent, when reported
    #[must_use]
    pub fn precipitation_chance(&self) -> Option<f64> {
        self.probability_of_precipitation
            .as_ref()
            .and_then(|p| p.value)
    }

    /// Temperature with its unit, e.g. "45°F"
    #[must_use]
    pub fn temperature_display(&self) -> String {
        format!("{}°{}", self.temperature, self.temperature_unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PERIOD_JSON: &str = r#"{
        "number": 1,
        "name": "Tonight",
        "startTime": "2024-01-15T18:00:00-05:00",
        "endTime": "2024-01-16T06:00:00-05:00",
        "isDaytime": false,
        "temperature": 28,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 20 },
        "dewpoint": { "unitCode": "wmoUnit:degC", "value": -5.0 },
        "relativeHumidity": { "unitCode": "wmoUnit:percent", "value": 73 },
        "windSpeed": "5 mph",
        "windDirection": "NW",
        "icon": "https://api.weather.gov/icons/land/night/few?size=medium",
        "shortForecast": "Mostly Clear",
        "detailedForecast": "Mostly clear, with a low around 28."
    }"#;

    #[test]
    fn deserializes_upstream_period() {
        let period: WeatherPeriod = serde_json::from_str(PERIOD_JSON).expect("valid period");
        assert_eq!(period.number, 1);
        assert_eq!(period.name, "Tonight");
        assert!(!period.is_daytime);
        assert!(period.temperature_trend.is_none());
        assert_eq!(period.precipitation_chance(), Some(20.0));
        assert_eq!(period.temperature_display(), "28°F");
    }

    #[test]
    fn optional_measurements_may_be_absent_or_null() {
        let json = r#"{
            "number": 2,
            "name": "Tuesday",
            "startTime": "2024-01-16T06:00:00-05:00",
            "endTime": "2024-01-16T18:00:00-05:00",
            "isDaytime": true,
            "temperature": 41,
            "temperatureUnit": "F",
            "temperatureTrend": "falling",
            "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": null },
            "windSpeed": "10 mph",
            "windDirection": "W",
            "icon": "",
            "shortForecast": "Sunny",
            "detailedForecast": "Sunny."
        }"#;
        let period: WeatherPeriod = serde_json::from_str(json).expect("valid period");
        assert_eq!(period.temperature_trend.as_deref(), Some("falling"));
        assert_eq!(period.precipitation_chance(), None);
        assert!(period.dewpoint.is_none());
        assert!(period.relative_humidity.is_none());
    }

    #[test]
    fn serializes_with_upstream_field_names() {
        let period: WeatherPeriod = serde_json::from_str(PERIOD_JSON).expect("valid period");
        let value = serde_json::to_value(&period).expect("serialize");
        assert_eq!(value["startTime"], "2024-01-15T18:00:00-05:00");
        assert_eq!(value["shortForecast"], "Mostly Clear");
        assert!(value.get("probabilityOfPrecipitation").is_some());

        let back: WeatherPeriod = serde_json::from_value(value).expect("deserialize");
        assert_eq!(back, period);
    }
}
