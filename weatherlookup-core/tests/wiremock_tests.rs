//! OpenWeather client and view controller against a mock HTTP server.

use std::{sync::Arc, time::Duration};

use weatherlookup_core::{
    DisplayZone, FetchOutcome, Field, Input, LocationQuery, OpenWeatherProvider, ViewController,
    ViewState, WeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

/// Sample OpenWeather "current weather" response for Lucknow.
fn sample_weather_response() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": 80.9167, "lat": 26.85 },
        "weather": [
            { "id": 721, "main": "Haze", "description": "haze", "icon": "50n" }
        ],
        "base": "stations",
        "main": {
            "temp": 18.99,
            "feels_like": 18.42,
            "temp_min": 18,
            "temp_max": 19.5,
            "pressure": 1015,
            "humidity": 64
        },
        "visibility": 2500,
        "wind": { "speed": 1.54, "deg": 300 },
        "clouds": { "all": 0 },
        "dt": 1700020000,
        "sys": {
            "type": 1,
            "id": 9176,
            "country": "IN",
            "sunrise": 1700000000,
            "sunset": 1700040000
        },
        "timezone": 19800,
        "id": 1264733,
        "name": "Lucknow",
        "cod": 200
    })
}

fn create_test_provider(mock_server: &MockServer) -> OpenWeatherProvider {
    OpenWeatherProvider::new("TEST_KEY".to_string())
        .with_base_url(mock_server.uri())
        .with_zone("+05:30".parse::<DisplayZone>().expect("valid offset"))
}

fn create_test_controller(mock_server: &MockServer) -> ViewController {
    ViewController::new(Arc::new(create_test_provider(mock_server)))
}

// ============================================================================
// Weather client
// ============================================================================

#[tokio::test]
async fn test_get_weather_maps_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lucknow,India"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let report = provider
        .get_weather(&LocationQuery::new("Lucknow", "India"))
        .await
        .expect("fetch should succeed");

    assert!((report.current_temperature - 18.99).abs() < f64::EPSILON);
    assert_eq!(report.temperature_range, "18/19.5");
    assert_eq!(report.country_code, "IN");
    assert_eq!(report.weather_type, "Haze");
    assert_eq!(report.description, "haze");
    assert_eq!(report.humidity, 64);
    assert_eq!(report.pressure, 1015);
    assert_eq!(report.visibility, 2500);
    assert!((report.wind_speed - 1.54).abs() < f64::EPSILON);
    assert_eq!(report.wind_direction, 300);
    // Fixed +05:30 zone; local-zone output is machine dependent.
    assert_eq!(report.sunrise, "3:43:20 AM");
    assert_eq!(report.sunset, "2:50:00 PM");
}

#[tokio::test]
async fn test_location_with_spaces_is_sent_as_single_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "New York,United States"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.get_weather(&LocationQuery::new("New York", "United States")).await;

    assert!(result.is_ok(), "Expected success, got: {result:?}");
}

#[tokio::test]
async fn test_not_found_status_is_fetch_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({ "cod": "404", "message": "city not found" })),
        )
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let err = provider
        .get_weather(&LocationQuery::new("Atlantis", "Nowhere"))
        .await
        .expect_err("404 must fail");

    assert!(err.reason().contains("404"));
    assert!(err.reason().contains("city not found"));
}

#[tokio::test]
async fn test_malformed_body_is_fetch_failed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&mock_server)
        .await;

    let provider = create_test_provider(&mock_server);
    let result = provider.get_weather(&LocationQuery::new("Lucknow", "India")).await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_unreachable_server_is_fetch_failed() {
    let mock_server = MockServer::start().await;
    let uri = mock_server.uri();
    drop(mock_server);

    let provider = OpenWeatherProvider::new("TEST_KEY".to_string()).with_base_url(uri);
    let result = provider.get_weather(&LocationQuery::new("Lucknow", "India")).await;

    assert!(result.is_err());
}

// ============================================================================
// View controller end to end
// ============================================================================

#[tokio::test]
async fn test_mount_issues_exactly_one_request_for_defaults() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lucknow,India"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut controller = create_test_controller(&mock_server);
    let ticket = controller.mount().expect("mount triggers a fetch");
    assert!(controller.mount().is_none());

    let completion = ticket.run(controller.provider().as_ref()).await;
    assert_eq!(controller.complete(completion), FetchOutcome::Applied);

    let state = controller.state();
    assert_eq!(state.city, "Lucknow");
    assert_eq!(state.country, "India");
    assert_eq!(state.country_code, "IN");
    assert_eq!(state.weather_type, "Haze");
    assert_eq!(state.sunrise, "3:43:20 AM");

    mock_server.verify().await;
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_weather() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lucknow,India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Atlantis,India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "main": { "temp": 1.0 }
        })))
        .mount(&mock_server)
        .await;

    let mut controller = create_test_controller(&mock_server);
    assert_eq!(controller.refresh().await, FetchOutcome::Applied);

    controller.handle(Input::Edit(Field::City, "Atlantis".into()));
    let before: ViewState = controller.state().clone();

    assert_eq!(controller.refresh().await, FetchOutcome::Failed);
    assert_eq!(controller.state(), &before);
    assert_eq!(controller.state().city, "Atlantis");
    assert_eq!(controller.state().description, "haze");
}

#[tokio::test]
async fn test_slow_older_response_is_discarded() {
    let mock_server = MockServer::start().await;

    let mut slow = sample_weather_response();
    slow["weather"][0]["main"] = "Rain".into();
    slow["weather"][0]["description"] = "slow rain".into();

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Lucknow,India"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(slow)
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/weather"))
        .and(query_param("q", "Kanpur,India"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_weather_response()))
        .mount(&mock_server)
        .await;

    let mut controller = create_test_controller(&mock_server);
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();

    let first = controller.handle(Input::Submit).expect("submit triggers");
    controller.handle(Input::Edit(Field::City, "Kanpur".into()));
    let second = controller.handle(Input::Enter(Field::City)).expect("enter triggers");

    for ticket in [first, second] {
        let provider = controller.provider();
        let tx = tx.clone();
        tokio::spawn(async move {
            let completion = ticket.run(provider.as_ref()).await;
            let _ = tx.send(completion);
        });
    }
    drop(tx);

    let mut outcomes = Vec::new();
    while let Some(completion) = rx.recv().await {
        outcomes.push(controller.complete(completion));
    }

    assert_eq!(outcomes, vec![FetchOutcome::Applied, FetchOutcome::Stale]);
    assert_eq!(controller.state().city, "Kanpur");
    assert_eq!(controller.state().weather_type, "Haze");
    assert_eq!(controller.in_flight(), 0);
}
