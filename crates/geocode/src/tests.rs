use std::time::Duration;

use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::provider::GeocodeProvider;
use crate::{LocationResolver, NominatimProvider, PhotonProvider};

const TIMEOUT: Duration = Duration::from_secs(2);

async fn resolver_for(nominatim: &MockServer, photon: &MockServer) -> LocationResolver {
    LocationResolver::new(&nominatim.uri(), &photon.uri(), TIMEOUT).unwrap()
}

fn nominatim_body(lat: &str, lon: &str) -> serde_json::Value {
    serde_json::json!([{"lat": lat, "lon": lon, "display_name": "somewhere"}])
}

fn photon_body(lon: f64, lat: f64) -> serde_json::Value {
    serde_json::json!({
        "type": "FeatureCollection",
        "features": [{
            "type": "Feature",
            "geometry": {"type": "Point", "coordinates": [lon, lat]},
            "properties": {}
        }]
    })
}

#[tokio::test]
async fn nominatim_match_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Zwickau"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(nominatim_body("50.7", "12.5")))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(&server.uri(), TIMEOUT).unwrap();
    let coord = provider.lookup("Zwickau").await.unwrap().unwrap();
    assert_eq!(coord.to_string(), "50.70000, 12.50000");
}

#[tokio::test]
async fn nominatim_empty_array_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(&server.uri(), TIMEOUT).unwrap();
    assert!(provider.lookup("Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn nominatim_malformed_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let provider = NominatimProvider::new(&server.uri(), TIMEOUT).unwrap();
    assert!(provider.lookup("Zwickau").await.is_err());
}

#[tokio::test]
async fn photon_geojson_lon_lat_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .and(query_param("q", "Zwickau"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photon_body(12.5, 50.7)))
        .mount(&server)
        .await;

    let provider = PhotonProvider::new(&server.uri(), TIMEOUT).unwrap();
    let coord = provider.lookup("Zwickau").await.unwrap().unwrap();
    assert_eq!(coord.to_string(), "50.70000, 12.50000");
}

#[tokio::test]
async fn photon_empty_features_is_no_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": []
        })))
        .mount(&server)
        .await;

    let provider = PhotonProvider::new(&server.uri(), TIMEOUT).unwrap();
    assert!(provider.lookup("Atlantis").await.unwrap().is_none());
}

#[tokio::test]
async fn resolver_short_circuits_on_coordinate_input() {
    // Servers with no mounted mocks: any request would 404 and the
    // resolver would log a failure, so a resolved result proves the
    // network was never consulted.
    let nominatim = MockServer::start().await;
    let photon = MockServer::start().await;
    let resolver = resolver_for(&nominatim, &photon).await;

    let coord = resolver.resolve("50.83, 12.48").await.unwrap();
    assert_eq!(coord.to_string(), "50.83000, 12.48000");
    assert!(nominatim.received_requests().await.unwrap().is_empty());
    assert!(photon.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn resolver_falls_back_to_photon_on_nominatim_failure() {
    let nominatim = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&nominatim)
        .await;

    let photon = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photon_body(12.5, 50.7)))
        .mount(&photon)
        .await;

    let resolver = resolver_for(&nominatim, &photon).await;
    let coord = resolver.resolve("Zwickau").await.unwrap();
    assert_eq!(coord.to_string(), "50.70000, 12.50000");
}

#[tokio::test]
async fn resolver_falls_back_on_empty_nominatim_result() {
    let nominatim = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .mount(&nominatim)
        .await;

    let photon = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(photon_body(12.5, 50.7)))
        .mount(&photon)
        .await;

    let resolver = resolver_for(&nominatim, &photon).await;
    assert!(resolver.resolve("Zwickau").await.is_some());
}

#[tokio::test]
async fn resolver_returns_none_when_all_providers_fail() {
    let nominatim = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&nominatim)
        .await;

    let photon = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "type": "FeatureCollection",
            "features": []
        })))
        .mount(&photon)
        .await;

    let resolver = resolver_for(&nominatim, &photon).await;
    assert!(resolver.resolve("Atlantis").await.is_none());
}

#[tokio::test]
async fn resolver_ignores_empty_input() {
    let nominatim = MockServer::start().await;
    let photon = MockServer::start().await;
    let resolver = resolver_for(&nominatim, &photon).await;
    assert!(resolver.resolve("").await.is_none());
    assert!(resolver.resolve("   ").await.is_none());
}
