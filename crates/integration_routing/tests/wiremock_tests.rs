//! Integration tests for the geocoding and routing clients (wiremock-based)

use std::time::Duration;

use domain::GeoLocation;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use integration_routing::{
    GeocodingClient, GeocodingError, NominatimConfig, NominatimGeocodingClient, OsrmRoutingClient,
    RoutingClient, RoutingConfig, RoutingError,
};

fn nominatim_for_mock(base_url: &str) -> NominatimConfig {
    NominatimConfig {
        base_url: base_url.to_string(),
        ..NominatimConfig::for_testing()
    }
}

fn osrm_for_mock(base_url: &str) -> RoutingConfig {
    RoutingConfig {
        base_url: base_url.to_string(),
        ..RoutingConfig::for_testing()
    }
}

fn point(lat: f64, lon: f64) -> GeoLocation {
    GeoLocation::new(lat, lon).unwrap()
}

const fn sample_search_json() -> &'static str {
    r#"[{
        "place_id": 123,
        "lat": "-1.2833",
        "lon": "36.8167",
        "display_name": "Nairobi Central, Nairobi, Kenya"
    }]"#
}

const fn sample_route_json() -> &'static str {
    r#"{
        "code": "Ok",
        "routes": [
            {
                "duration": 120.0,
                "distance": 1500.5,
                "geometry": {"type": "LineString", "coordinates": [[2.0, 1.0], [4.0, 3.0]]}
            },
            {
                "duration": 95.0,
                "distance": 1800.0,
                "geometry": {"type": "LineString", "coordinates": [[2.0, 1.0], [3.0, 2.0], [4.0, 3.0]]}
            }
        ],
        "waypoints": [
            {"name": "A Street", "location": [2.0, 1.0]},
            {"name": "B Road", "location": [4.0, 3.0]}
        ]
    }"#
}

// ============================================================================
// Nominatim
// ============================================================================

#[tokio::test]
async fn search_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Nairobi CBD"))
        .and(query_param("format", "jsonv2"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_search_json()))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let matches = client.search("Nairobi CBD").await.unwrap();

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].display_name(), "Nairobi Central, Nairobi, Kenya");
    assert!((matches[0].longitude() - 36.8167).abs() < 1e-9);
}

#[tokio::test]
async fn search_sends_user_agent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(header("user-agent", "route-optimizer-tests/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        user_agent: "route-optimizer-tests/1.0".to_string(),
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    client.search("anything").await.unwrap();
}

#[tokio::test]
async fn search_applies_country_filter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("countrycodes", "ke"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_search_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        country_filter: "ke".to_string(),
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    assert_eq!(client.search("Nairobi").await.unwrap().len(), 1);
}

#[tokio::test]
async fn search_no_match_is_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let matches = client.search("Nowhereville").await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn search_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Nairobi").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RequestFailed(ref m) if m.contains("503")));
}

#[tokio::test]
async fn search_rate_limited_upstream() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Nairobi").await.unwrap_err();
    assert!(matches!(err, GeocodingError::RateLimitExceeded));
}

#[tokio::test]
async fn search_invalid_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let client = NominatimGeocodingClient::new(&nominatim_for_mock(&server.uri())).unwrap();
    let err = client.search("Nairobi").await.unwrap_err();
    assert!(matches!(err, GeocodingError::ParseError(_)));
}

#[tokio::test]
async fn search_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = NominatimConfig {
        timeout_secs: 1,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();
    let err = client.search("Nairobi").await.unwrap_err();
    assert!(matches!(err, GeocodingError::Timeout));
}

#[tokio::test]
async fn search_results_are_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_search_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = NominatimConfig {
        cache_ttl_secs: 60,
        ..nominatim_for_mock(&server.uri())
    };
    let client = NominatimGeocodingClient::new(&config).unwrap();

    let first = client.search("Nairobi CBD").await.unwrap();
    let second = client.search("nairobi cbd").await.unwrap();
    assert_eq!(first, second);
}

// ============================================================================
// OSRM
// ============================================================================

#[tokio::test]
async fn route_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2,1;4,3"))
        .and(query_param("alternatives", "true"))
        .and(query_param("overview", "full"))
        .and(query_param("geometries", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let response = client.route(&point(1.0, 2.0), &point(3.0, 4.0)).await.unwrap();

    assert!(response.is_ok());
    let routes = response.routes.unwrap();
    assert_eq!(routes.len(), 2);
    assert!((routes[0].duration - 120.0).abs() < f64::EPSILON);
    assert!((routes[1].duration - 95.0).abs() < f64::EPSILON);
    assert_eq!(routes[1].geometry["coordinates"].as_array().unwrap().len(), 3);
    assert_eq!(response.waypoints.len(), 2);
}

#[tokio::test]
async fn route_uses_configured_profile() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/cycling/2,1;4,3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(sample_route_json()))
        .expect(1)
        .mount(&server)
        .await;

    let config = RoutingConfig {
        profile: "cycling".to_string(),
        ..osrm_for_mock(&server.uri())
    };
    let client = OsrmRoutingClient::new(&config).unwrap();
    assert!(client.route(&point(1.0, 2.0), &point(3.0, 4.0)).await.is_ok());
}

#[tokio::test]
async fn route_error_code_is_passed_through() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2,1;4,3"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string(r#"{"code": "NoRoute", "message": "Impossible route between points"}"#),
        )
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let response = client.route(&point(1.0, 2.0), &point(3.0, 4.0)).await.unwrap();

    assert!(!response.is_ok());
    assert_eq!(response.code, "NoRoute");
    assert_eq!(
        response.message.as_deref(),
        Some("Impossible route between points")
    );
    assert!(response.routes.is_none());
}

#[tokio::test]
async fn route_ok_with_no_routes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2,1;4,3"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code": "Ok", "routes": []}"#))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let response = client.route(&point(1.0, 2.0), &point(3.0, 4.0)).await.unwrap();

    assert!(response.is_ok());
    assert_eq!(response.routes.map(|r| r.len()), Some(0));
}

#[tokio::test]
async fn route_server_error_without_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2,1;4,3"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let err = client
        .route(&point(1.0, 2.0), &point(3.0, 4.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RoutingError::RequestFailed(ref m) if m.contains("502")));
}

#[tokio::test]
async fn route_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/route/v1/driving/2,1;4,3"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "30"))
        .mount(&server)
        .await;

    let client = OsrmRoutingClient::new(&osrm_for_mock(&server.uri())).unwrap();
    let err = client
        .route(&point(1.0, 2.0), &point(3.0, 4.0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RoutingError::RateLimitExceeded {
            retry_after_secs: Some(30)
        }
    ));
}

#[tokio::test]
async fn route_unreachable_server() {
    let config = osrm_for_mock("http://127.0.0.1:1");
    let client = OsrmRoutingClient::new(&config).unwrap();
    let err = client
        .route(&point(1.0, 2.0), &point(3.0, 4.0))
        .await
        .unwrap_err();
    assert!(matches!(err, RoutingError::ConnectionFailed(_)));
}
