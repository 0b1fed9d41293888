//! End-to-end shop searches against a wiremock geocoder.

use agridash_core::{parse_trusted_shops, Coordinate, EARTH_RADIUS_M};
use agridash_shops::{
    LocationIqClient, PipelineSettings, RemoteStatus, SearchOutcome, ShopRecord,
    ShopSearchPipeline,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TRUSTED_YAML: &str = r"
shops:
  - name: Susi Seeds
    lat: 13.0487
    lon: 80.2461
    address: { road: Natesan St, city: Chennai }
  - name: Sakthi Seeds (High Priority)
    lat: 13.0488
    lon: 80.2461
  - name: TANSCO
    lat: 13.067439
    lon: 80.237617
";

const DEFAULT_CENTER: Coordinate = Coordinate::new(13.0487, 80.2461);

fn trusted() -> Vec<ShopRecord> {
    parse_trusted_shops(TRUSTED_YAML)
        .expect("fixture should parse")
        .shops
        .iter()
        .map(ShopRecord::from_trusted)
        .collect()
}

fn pipeline(base_url: &str) -> ShopSearchPipeline<LocationIqClient> {
    let client = LocationIqClient::with_base_url("test-key", 5, base_url)
        .expect("client construction should not fail");
    ShopSearchPipeline::new(client, PipelineSettings::new(trusted(), DEFAULT_CENTER))
}

fn trusted_names(outcome: &SearchOutcome) -> Vec<String> {
    outcome.shops.iter().map(|s| s.name.clone()).collect()
}

#[tokio::test]
async fn matching_place_is_merged_with_trusted_shops() {
    let server = MockServer::start().await;
    let remote_lat = DEFAULT_CENTER.lat + (2000.0 / EARTH_RADIUS_M).to_degrees();

    let body = serde_json::json!([
        {
            "place_id": "1",
            "display_name": "Adyar Seed Depot, Chennai",
            "lat": remote_lat.to_string(),
            "lon": "80.2461",
            "address": { "road": "LB Road", "suburb": "Adyar" }
        },
        {
            "place_id": "2",
            "name": "Hotel Saravana",
            "lat": "13.05",
            "lon": "80.25"
        }
    ]);

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("key", "test-key"))
        .and(query_param("q", "seed"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "30"))
        .and(query_param("bounded", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let p = pipeline(&format!("{}/v1", server.uri()));
    let outcome = p.search("seed", Some(DEFAULT_CENTER)).await.unwrap();

    assert_eq!(outcome.shops.len(), 4);
    assert_eq!(
        outcome.remote,
        RemoteStatus::Ok {
            returned: 2,
            accepted: 1
        }
    );
    let remote = outcome
        .shops
        .iter()
        .find(|s| !s.is_trusted)
        .expect("remote shop merged");
    assert_eq!(remote.name, "Adyar Seed Depot, Chennai");
    assert_eq!(remote.address_line(), "LB Road, Adyar");
    assert_eq!(remote.distance_label(), "2.00 km");
    assert!(outcome
        .shops
        .windows(2)
        .all(|w| w[0].distance_meters <= w[1].distance_meters));
}

#[tokio::test]
async fn not_found_status_falls_back_to_trusted_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "error": "Unable to geocode" })),
        )
        .mount(&server)
        .await;

    let outcome = pipeline(&server.uri())
        .search("seed", Some(Coordinate::new(12.0, 79.0)))
        .await
        .expect("fallback policy never errors");

    assert_eq!(outcome.shops.len(), 3);
    assert!(outcome.shops.iter().all(|s| s.is_trusted));
    assert_eq!(outcome.view.center, DEFAULT_CENTER);
    assert_eq!(outcome.view.zoom, 11);
    assert!(matches!(outcome.remote, RemoteStatus::Unavailable { .. }));
}

#[tokio::test]
async fn non_array_payload_counts_as_no_places() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "error": "Unable to geocode" })),
        )
        .mount(&server)
        .await;

    let center = Coordinate::new(11.0, 77.0);
    let outcome = pipeline(&server.uri()).search("seed", Some(center)).await.unwrap();

    assert_eq!(outcome.shops.len(), 3);
    assert!(outcome.shops.iter().all(|s| s.is_trusted));
    assert_eq!(outcome.view.center, center);
    assert_eq!(outcome.view.zoom, 13);
    assert_eq!(
        outcome.remote,
        RemoteStatus::Ok {
            returned: 0,
            accepted: 0
        }
    );
}

#[tokio::test]
async fn junk_elements_do_not_discard_valid_places() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "junk",
            { "name": "Krishi Seeds", "lat": "11.01", "lon": "77.0" }
        ])))
        .mount(&server)
        .await;

    let center = Coordinate::new(11.0, 77.0);
    let outcome = pipeline(&server.uri()).search("seed", Some(center)).await.unwrap();

    assert_eq!(outcome.shops.len(), 4);
    assert_eq!(outcome.shops[0].name, "Krishi Seeds");
    assert!(!outcome.shops[0].is_trusted);
    assert_eq!(
        outcome.remote,
        RemoteStatus::Ok {
            returned: 1,
            accepted: 1
        }
    );
    assert_eq!(outcome.view.center, center);
}

#[tokio::test]
async fn unparseable_body_falls_back_to_trusted_list() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway timeout</html>"))
        .mount(&server)
        .await;

    let outcome = pipeline(&server.uri()).search("seed", None).await.unwrap();
    let expected: Vec<String> = trusted().into_iter().map(|s| s.name).collect();
    assert_eq!(trusted_names(&outcome), expected);
    assert_eq!(outcome.view.center, DEFAULT_CENTER);
    assert_eq!(outcome.view.zoom, 11);
    assert!(matches!(outcome.remote, RemoteStatus::Unavailable { .. }));
}

#[tokio::test]
async fn network_error_returns_trusted_list_at_default_center() {
    // Nothing listens on port 1.
    let outcome = pipeline("http://127.0.0.1:1")
        .search("fertilizer", None)
        .await
        .expect("fallback policy never errors");

    let expected: Vec<String> = trusted().into_iter().map(|s| s.name).collect();
    assert_eq!(trusted_names(&outcome), expected);
    assert_eq!(outcome.view.center, DEFAULT_CENTER);
    assert_eq!(outcome.view.zoom, 11);
}

#[tokio::test]
async fn blank_query_sends_default_term() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "agro shop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = pipeline(&server.uri()).search("  ", None).await.unwrap();
    assert_eq!(outcome.shops.len(), 3);
    assert_eq!(outcome.view.zoom, 13);
}
