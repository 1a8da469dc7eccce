use wearcast_core::{OpenMeteoSource, Place, PlaceQuery, SourceError, WeatherSource};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GEO_JSON: &str = r#"{
    "results": [
        {"name": "London", "admin1": "England", "country": "United Kingdom",
         "latitude": 51.50853, "longitude": -0.12574},
        {"name": "London", "admin1": "Ontario", "country": "Canada",
         "latitude": 42.98339, "longitude": -81.23304}
    ],
    "generationtime_ms": 0.7
}"#;

const CURRENT_JSON: &str = r#"{
    "latitude": 51.5,
    "longitude": -0.12,
    "current_units": {"temperature_2m": "°C", "wind_speed_10m": "km/h"},
    "current": {
        "time": 1754560800,
        "temperature_2m": 12.3,
        "relative_humidity_2m": 82,
        "precipitation": 0.4,
        "rain": 0.4,
        "wind_speed_10m": 24.5
    }
}"#;

fn source_for(server: &MockServer) -> OpenMeteoSource {
    OpenMeteoSource::with_base_urls(
        format!("{}/v1/search", server.uri()),
        format!("{}/v1/forecast", server.uri()),
    )
}

fn query(name: &str) -> PlaceQuery {
    PlaceQuery {
        name: name.to_string(),
        limit: 5,
        language: "en".to_string(),
    }
}

fn place_at(latitude: f64, longitude: f64) -> Place {
    Place {
        name: "Testville".to_string(),
        admin1: None,
        country: None,
        latitude,
        longitude,
    }
}

#[tokio::test]
async fn geocoding_decodes_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "London"))
        .and(query_param("count", "5"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(GEO_JSON, "application/json"))
        .mount(&server)
        .await;

    let places = source_for(&server)
        .search_places(&query("London"))
        .await
        .expect("geocoding must succeed");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].label(), "London, England, United Kingdom");
    assert_eq!(places[1].label(), "London, Ontario, Canada");
    assert!((places[0].latitude - 51.50853).abs() < 1e-9);
}

#[tokio::test]
async fn geocoding_with_no_matches_returns_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"generationtime_ms":0.3}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let places = source_for(&server)
        .search_places(&query("Xyzzyville"))
        .await
        .expect("empty result set is not an error");

    assert!(places.is_empty());
}

#[tokio::test]
async fn current_conditions_decode_and_map_rain() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("timeformat", "unixtime"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(CURRENT_JSON, "application/json"))
        .mount(&server)
        .await;

    let conditions = source_for(&server)
        .current_conditions(&place_at(51.5, -0.12))
        .await
        .expect("forecast must succeed");

    assert_eq!(conditions.temperature_c, 12.3);
    assert_eq!(conditions.wind_speed_kmh, 24.5);
    assert_eq!(conditions.humidity_pct, 82.0);
    assert_eq!(conditions.observed_at.timestamp(), 1_754_560_800);

    let sample = conditions.sample();
    assert!(sample.is_raining);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .current_conditions(&place_at(51.5, -0.12))
        .await
        .expect_err("429 must surface as an error");

    match err {
        SourceError::Status { status, body, .. } => {
            assert_eq!(status.as_u16(), 429);
            assert!(body.contains("rate limited"));
        }
        other => panic!("expected Status error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = source_for(&server)
        .search_places(&query("London"))
        .await
        .expect_err("bad JSON must surface as an error");

    assert!(matches!(err, SourceError::Decode { .. }));
}
