//! Integration tests using wiremock to simulate the Geoapify API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use geoapify::{
    BatchResult, CancelToken, Client, Error, Format, Location, RetryConfig, TravelMode,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

fn retrying_client_for(server: &MockServer, max_retries: u32) -> Client {
    Client::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .retry(RetryConfig::new(
            max_retries,
            Duration::from_millis(1),
            Duration::from_millis(20),
        ))
        .build()
        .unwrap()
}

fn geocode_body() -> serde_json::Value {
    json!({
        "results": [
            {
                "formatted": "1313 Broadway, Tacoma, WA",
                "city": "Tacoma",
                "lat": 47.2529,
                "lon": -122.4443
            }
        ],
        "query": { "text": "1313 Broadway, Tacoma, WA" }
    })
}

#[tokio::test]
async fn successful_search_decodes_results_and_sends_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .and(query_param("text", "1313 Broadway, Tacoma, WA"))
        .and(query_param("limit", "5"))
        .and(query_param("apiKey", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .geocoding()
        .search("1313 Broadway, Tacoma, WA")
        .limit(5)
        .send()
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].city.as_deref(), Some("Tacoma"));
    assert_eq!(response.results[0].lat, 47.2529);
    assert_eq!(
        response.query.unwrap().text.as_deref(),
        Some("1313 Broadway, Tacoma, WA")
    );
}

#[tokio::test]
async fn api_error_prefers_json_message_field() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "text missing",
            "error": "Bad Request"
        })))
        .mount(&server)
        .await;

    let result = client_for(&server).geocoding().search("x").send().await;

    match result {
        Err(Error::Api(api_error)) => {
            assert_eq!(api_error.status.as_u16(), 400);
            assert_eq!(api_error.message, "text missing");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
}

#[tokio::test]
async fn api_error_falls_back_to_error_field_then_raw_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocode/reverse"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Forbidden"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/ipinfo"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let err = client
        .geocoding()
        .reverse(51.5, -0.1)
        .send()
        .await
        .unwrap_err();
    assert_eq!(err.as_api_error().unwrap().message, "Forbidden");

    let err = client.ip_geolocation().lookup().send().await.unwrap_err();
    let api_error = err.as_api_error().unwrap();
    assert_eq!(api_error.status.as_u16(), 502);
    assert_eq!(api_error.message, "bad gateway");
    assert_eq!(api_error.raw_body, b"bad gateway");
}

#[tokio::test]
async fn persistent_500_consumes_exactly_max_retries_plus_one_attempts() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(500).set_body_json(json!({"message": "server error"}))
        })
        .mount(&server)
        .await;

    let result = retrying_client_for(&server, 2)
        .geocoding()
        .search("x")
        .send()
        .await;

    let err = result.unwrap_err();
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    // initial attempt + 2 retries
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn client_errors_are_never_retried() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(400).set_body_json(json!({"message": "bad request"}))
        })
        .mount(&server)
        .await;

    let result = retrying_client_for(&server, 5)
        .geocoding()
        .search("x")
        .send()
        .await;

    assert_eq!(result.unwrap_err().status().map(|s| s.as_u16()), Some(400));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn always_401_fails_after_one_attempt_with_message() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(401).set_body_json(json!({"message": "Invalid key"}))
        })
        .mount(&server)
        .await;

    let err = retrying_client_for(&server, 5)
        .geocoding()
        .search("x")
        .send()
        .await
        .unwrap_err();

    match err {
        Error::Api(api_error) => {
            assert_eq!(api_error.status.as_u16(), 401);
            assert_eq!(api_error.message, "Invalid key");
        }
        other => panic!("expected Error::Api, got {other:?}"),
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn rate_limited_calls_recover_within_the_retry_budget() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    // Two 429s, then success.
    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                ResponseTemplate::new(429).set_body_json(json!({"message": "rate limited"}))
            } else {
                ResponseTemplate::new(200).set_body_json(geocode_body())
            }
        })
        .mount(&server)
        .await;

    let response = retrying_client_for(&server, 5)
        .geocoding()
        .search("1313 Broadway, Tacoma, WA")
        .send()
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn retry_after_header_overrides_computed_backoff() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "1")
                    .set_body_json(json!({"message": "rate limited"}))
            } else {
                ResponseTemplate::new(200).set_body_json(geocode_body())
            }
        })
        .mount(&server)
        .await;

    // The configured backoff is ~1ms; only the header can explain a 1s wait.
    let started = Instant::now();
    let response = retrying_client_for(&server, 3)
        .geocoding()
        .search("x")
        .send()
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(
        started.elapsed() >= Duration::from_millis(900),
        "waited only {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn cancelling_during_a_retry_wait_stops_the_call() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(500).set_body_json(json!({"message": "server error"}))
        })
        .mount(&server)
        .await;

    let client = Client::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .retry(RetryConfig::new(
            10,
            Duration::from_secs(30),
            Duration::from_secs(60),
        ))
        .build()
        .unwrap();

    let token = CancelToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let result = client
        .geocoding()
        .search("x")
        .cancel_token(token)
        .send()
        .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    // The first attempt ran, the 30s backoff wait did not.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn invalid_json_on_success_surfaces_a_decode_error() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(200).set_body_string("not json")
        })
        .mount(&server)
        .await;

    let result = retrying_client_for(&server, 5)
        .geocoding()
        .search("x")
        .send()
        .await;

    assert!(matches!(result, Err(Error::Decode(_))));
    // Decode failures carry no retry hint.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn route_matrix_posts_a_json_body() {
    let server = MockServer::start().await;

    let expected_body = json!({
        "mode": "drive",
        "sources": [{"location": [13.4, 52.5]}],
        "targets": [{"location": [11.6, 48.1]}]
    });

    Mock::given(method("POST"))
        .and(path("/v1/routematrix"))
        .and(query_param("apiKey", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(&expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sources": [{"original_location": [13.4, 52.5], "location": [13.4, 52.5]}],
            "targets": [{"original_location": [11.6, 48.1], "location": [11.6, 48.1]}],
            "sources_to_targets": [
                [{"distance": 585000.0, "time": 19000.0, "source_index": 0, "target_index": 0}]
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .route_matrix()
        .calculate()
        .mode(TravelMode::Drive)
        .sources([Location::new(52.5, 13.4)])
        .targets([Location::new(48.1, 11.6)])
        .send()
        .await
        .unwrap();

    assert_eq!(response.sources_to_targets[0][0].distance, 585000.0);
    assert_eq!(response.sources_to_targets[0][0].time, 19000.0);
}

#[tokio::test]
async fn routing_serializes_waypoints_and_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/routing"))
        .and(query_param("waypoints", "51.5,-0.1|48.1,11.6"))
        .and(query_param("mode", "drive"))
        .and(query_param("type", "short"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{
                "distance": 1143000.0,
                "time": 41000.0,
                "legs": [{"distance": 1143000.0, "time": 41000.0, "steps": []}]
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .routing()
        .waypoints([Location::new(51.5, -0.1), Location::new(48.1, 11.6)])
        .mode(TravelMode::Drive)
        .route_type(geoapify::RouteType::Short)
        .send()
        .await
        .unwrap();

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].legs.len(), 1);
}

#[tokio::test]
async fn places_and_isoline_serialize_list_parameters() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/places"))
        .and(query_param("categories", "catering.restaurant,catering.cafe"))
        .and(query_param("filter", "circle:13.4,52.5,5000"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "properties": {"name": "Cafe Adler"}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/isoline"))
        .and(query_param("lat", "52.5"))
        .and(query_param("lon", "13.4"))
        .and(query_param("type", "time"))
        .and(query_param("range", "600,1200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "FeatureCollection",
            "features": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);

    let places = client
        .places()
        .categories(["catering.restaurant", "catering.cafe"])
        .filter(geoapify::filter::circle(13.4, 52.5, 5000.0))
        .limit(10)
        .send()
        .await
        .unwrap();
    assert_eq!(places.features.len(), 1);

    let isoline = client
        .isolines()
        .at(52.5, 13.4)
        .isoline_type(geoapify::IsolineType::Time)
        .range([600, 1200])
        .send()
        .await
        .unwrap();
    assert_eq!(isoline.collection_type, "FeatureCollection");
}

#[tokio::test]
async fn format_parameter_is_forwarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocode/autocomplete"))
        .and(query_param("text", "Ber"))
        .and(query_param("format", "geojson"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .geocoding()
        .autocomplete("Ber")
        .format(Format::GeoJson)
        .send()
        .await
        .unwrap();

    assert!(response.results.is_empty());
}

#[tokio::test]
async fn batch_jobs_are_submitted_and_polled_until_complete() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/batch/geocode/search"))
        .and(body_json(json!(["1313 Broadway, Tacoma, WA", "Main St, Olympia"])))
        .respond_with(ResponseTemplate::new(202).set_body_json(json!({
            "id": "job-42",
            "status": "pending",
            "url": "https://api.geoapify.com/v1/batch/geocode/search?id=job-42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let polls = Arc::new(AtomicUsize::new(0));
    let counter = polls.clone();
    Mock::given(method("GET"))
        .and(path("/v1/batch/geocode/search"))
        .and(query_param("id", "job-42"))
        .respond_with(move |_req: &wiremock::Request| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                ResponseTemplate::new(200)
                    .set_body_json(json!({"id": "job-42", "status": "pending"}))
            } else {
                ResponseTemplate::new(200).set_body_json(json!([
                    {"formatted": "1313 Broadway, Tacoma, WA", "lat": 47.25, "lon": -122.44},
                    {"formatted": "Main St, Olympia", "lat": 47.04, "lon": -122.9}
                ]))
            }
        })
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let batch = client.batch_geocoding();

    let job = batch
        .submit_forward(["1313 Broadway, Tacoma, WA", "Main St, Olympia"])
        .send()
        .await
        .unwrap();
    assert_eq!(job.id, "job-42");
    assert_eq!(job.status, "pending");

    let first_poll = batch.forward_result(job.id.as_str()).send().await.unwrap();
    assert!(first_poll.is_pending());

    let second_poll = batch.forward_result(job.id.as_str()).send().await.unwrap();
    match second_poll {
        BatchResult::Complete(addresses) => {
            assert_eq!(addresses.len(), 2);
            assert_eq!(
                addresses[0].formatted.as_deref(),
                Some("1313 Broadway, Tacoma, WA")
            );
        }
        BatchResult::Pending { .. } => panic!("job should be complete"),
    }
}

#[tokio::test]
async fn client_without_retry_config_makes_a_single_attempt() {
    let server = MockServer::start().await;
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(move |_req: &wiremock::Request| {
            counter.fetch_add(1, Ordering::SeqCst);
            ResponseTemplate::new(503).set_body_json(json!({"message": "unavailable"}))
        })
        .mount(&server)
        .await;

    let err = client_for(&server)
        .geocoding()
        .search("x")
        .send()
        .await
        .unwrap_err();

    assert_eq!(err.status().map(|s| s.as_u16()), Some(503));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/geocode/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(geocode_body()))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut handles = Vec::new();
    for _ in 0..8 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.geocoding().search("x").send().await
        }));
    }

    for handle in handles {
        let response = handle.await.unwrap().unwrap();
        assert_eq!(response.results.len(), 1);
    }
}
