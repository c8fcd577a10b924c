//! Integration tests for the NWS client using wiremock
//!
//! These tests verify the two-step grid/forecast resolution against a mock
//! HTTP server, including every error mapping.

use domain::{Coordinates, WeatherPeriod};
use integration_weather::{NwsWeatherClient, WeatherClient, WeatherConfig};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

const USER_AGENT: &str = "Weather Forecast Geocoder App (contact: developer@example.com)";

fn washington() -> Coordinates {
    Coordinates::new_unchecked(38.897_676_523, -77.036_529_871)
}

/// Points response whose forecast URL points back at the mock server
fn points_response(forecast_url: &str) -> serde_json::Value {
    serde_json::json!({
        "@context": ["https://geojson.org/geojson-ld/geojson-context.jsonld"],
        "type": "Feature",
        "properties": {
            "forecast": forecast_url,
            "forecastHourly": format!("{forecast_url}/hourly"),
            "gridId": "LWX",
            "gridX": 96,
            "gridY": 70,
            "timeZone": "America/New_York"
        }
    })
}

fn period(
    number: u32,
    name: &str,
    start: &str,
    end: &str,
    daytime: bool,
    temp: i32,
) -> serde_json::Value {
    serde_json::json!({
        "number": number,
        "name": name,
        "startTime": start,
        "endTime": end,
        "isDaytime": daytime,
        "temperature": temp,
        "temperatureUnit": "F",
        "temperatureTrend": null,
        "probabilityOfPrecipitation": { "unitCode": "wmoUnit:percent", "value": 20 },
        "windSpeed": "5 to 10 mph",
        "windDirection": "NW",
        "icon": "https://api.weather.gov/icons/land/day/few?size=medium",
        "shortForecast": "Sunny",
        "detailedForecast": "Sunny, with a high near 45."
    })
}

fn forecast_response() -> serde_json::Value {
    let morning = "2024-01-15T06:00:00-05:00";
    let evening = "2024-01-15T18:00:00-05:00";
    let next = "2024-01-16T06:00:00-05:00";
    serde_json::json!({
        "type": "Feature",
        "properties": {
            "units": "us",
            "periods": [
                period(1, "Today", morning, evening, true, 45),
                period(2, "Tonight", evening, next, false, 28)
            ]
        }
    })
}

/// Create a test client configured to use the mock server
fn create_test_client(mock_server: &MockServer) -> NwsWeatherClient {
    let config = WeatherConfig {
        base_url: mock_server.uri(),
        ..WeatherConfig::for_testing()
    };
    #[allow(clippy::expect_used)]
    NwsWeatherClient::new(config).expect("Failed to create client")
}

async fn mount_points(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/points/38.8977,-77.0365"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

async fn mount_forecast(mock_server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/gridpoints/LWX/96,70/forecast"))
        .respond_with(response)
        .mount(mock_server)
        .await;
}

async fn mount_happy_path(mock_server: &MockServer) {
    let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());
    mount_points(
        mock_server,
        ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)),
    )
    .await;
    mount_forecast(
        mock_server,
        ResponseTemplate::new(200).set_body_json(forecast_response()),
    )
    .await;
}

// ============================================================================
// Success scenarios
// ============================================================================

#[tokio::test]
async fn test_get_forecast_returns_periods_in_order() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    let client = create_test_client(&mock_server);
    let result = client.get_forecast(&washington()).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
    let periods = result.unwrap();

    let expected: Vec<WeatherPeriod> =
        serde_json::from_value(forecast_response()["properties"]["periods"].clone()).unwrap();
    assert_eq!(periods, expected);
    assert_eq!(periods[0].name, "Today");
    assert_eq!(periods[1].name, "Tonight");
    assert!(periods[0].start_time < periods[1].start_time);
}

#[tokio::test]
async fn test_requests_carry_identifying_headers() {
    let mock_server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/points/38.8977,-77.0365"))
        .and(header("user-agent", USER_AGENT))
        .and(header("accept", "application/geo+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/gridpoints/LWX/96,70/forecast"))
        .and(header("user-agent", USER_AGENT))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    assert!(client.get_forecast(&washington()).await.is_ok());
}

#[tokio::test]
async fn test_public_forecast_url_is_routed_through_configured_base() {
    let mock_server = MockServer::start().await;
    mount_points(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(points_response(
            "https://api.weather.gov/gridpoints/LWX/96,70/forecast",
        )),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let periods = client.get_forecast(&washington()).await.unwrap();
    assert_eq!(periods.len(), 2);
}

#[tokio::test]
async fn test_resolve_grid_exposes_grid_metadata() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    let client = create_test_client(&mock_server);
    let grid = client.resolve_grid(&washington()).await.unwrap();

    assert_eq!(grid.grid_id.as_deref(), Some("LWX"));
    assert_eq!((grid.grid_x, grid.grid_y), (Some(96), Some(70)));
    assert!(grid.forecast_url.ends_with("/LWX/96,70/forecast"));
}

#[tokio::test]
async fn test_repeated_calls_are_idempotent() {
    let mock_server = MockServer::start().await;
    mount_happy_path(&mock_server).await;

    let client = create_test_client(&mock_server);
    let first = client.get_forecast(&washington()).await.unwrap();
    let second = client.get_forecast(&washington()).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_empty_period_list_is_returned_as_is() {
    let mock_server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());
    mount_points(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)),
    )
    .await;
    let body = serde_json::json!({ "properties": { "periods": [] } });
    mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    assert!(client.get_forecast(&washington()).await.unwrap().is_empty());
}

// ============================================================================
// Coverage guard
// ============================================================================

#[tokio::test]
async fn test_unsupported_coordinates_make_no_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client
        .get_forecast(&Coordinates::new_unchecked(51.5074, -0.1278))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    let message = err.message();
    assert!(message.contains("Northern Canada/Alaska border region"));
}

// ============================================================================
// Points errors
// ============================================================================

#[tokio::test]
async fn test_points_not_found_names_region() {
    let mock_server = MockServer::start().await;
    mount_points(&mock_server, ResponseTemplate::new(404)).await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(err.message().starts_with(
        "Weather data not available for this location (Continental United States)."
    ));
}

#[tokio::test]
async fn test_points_server_error_passes_status_through() {
    let mock_server = MockServer::start().await;
    mount_points(
        &mock_server,
        ResponseTemplate::new(503).set_body_string("upstream busy"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(
        err.message(),
        "Weather service temporarily unavailable (503). Please try again in a few moments."
    );
}

#[tokio::test]
async fn test_points_without_forecast_url() {
    let mock_server = MockServer::start().await;
    let body = serde_json::json!({ "properties": { "gridId": "LWX" } });
    mount_points(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.message(),
        "Invalid weather service response. Forecast data is not available."
    );
}

#[tokio::test]
async fn test_points_invalid_json() {
    let mock_server = MockServer::start().await;
    mount_points(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("not valid json"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    let message = err.message();
    assert!(message.starts_with("Failed to get weather information."));
}

/// Base URL of a local port that refuses connections
fn closed_port_url() -> String {
    #[allow(clippy::expect_used)]
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind local port");
    #[allow(clippy::expect_used)]
    let port = listener.local_addr().expect("local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn test_unreachable_server() {
    #[allow(clippy::expect_used)]
    let client = NwsWeatherClient::new(WeatherConfig {
        base_url: closed_port_url(),
        ..WeatherConfig::for_testing()
    })
    .expect("Failed to create client");

    let err = client.get_forecast(&washington()).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.message(),
        "Failed to get weather information. Please check your internet connection and try again."
    );
}

// ============================================================================
// Forecast errors
// ============================================================================

#[tokio::test]
async fn test_forecast_server_error_passes_status_through() {
    let mock_server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());
    mount_points(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)),
    )
    .await;
    mount_forecast(&mock_server, ResponseTemplate::new(500)).await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.message(),
        "Failed to fetch weather forecast (500). Please try again."
    );
}

#[tokio::test]
async fn test_forecast_periods_missing_or_not_a_list() {
    for body in [
        serde_json::json!({ "properties": {} }),
        serde_json::json!({ "properties": { "periods": "soon" } }),
        serde_json::json!({}),
    ] {
        let mock_server = MockServer::start().await;
        let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());
        mount_points(
            &mock_server,
            ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)),
        )
        .await;
        mount_forecast(&mock_server, ResponseTemplate::new(200).set_body_json(body)).await;

        let client = create_test_client(&mock_server);
        let err = client.get_forecast(&washington()).await.unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert_eq!(
            err.message(),
            "Invalid forecast data format received from weather service."
        );
    }
}

#[tokio::test]
async fn test_forecast_invalid_json() {
    let mock_server = MockServer::start().await;
    let forecast_url = format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri());
    mount_points(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(points_response(&forecast_url)),
    )
    .await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_string("<html>"),
    )
    .await;

    let client = create_test_client(&mock_server);
    let err = client.get_forecast(&washington()).await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(
        err.message(),
        "Failed to get weather forecast. Please check your internet connection and try again."
    );
}

#[tokio::test]
async fn test_fetch_periods_directly() {
    let mock_server = MockServer::start().await;
    mount_forecast(
        &mock_server,
        ResponseTemplate::new(200).set_body_json(forecast_response()),
    )
    .await;

    let client = create_test_client(&mock_server);
    let periods = client
        .fetch_periods(&format!("{}/gridpoints/LWX/96,70/forecast", mock_server.uri()))
        .await
        .unwrap();

    let numbers: Vec<u32> = periods.iter().map(|p| p.number).collect();
    assert_eq!(numbers, [1, 2]);
}
