//! HTTP-level tests for the Kidsout client.
//!
//! Each test runs the client against a local wiremock server and checks the
//! request it sends and how the response is decoded.

use kidsout::{
    BoundingBox, Client, Corner, Error, NewsParams, RegionView, ReviewsParams,
    SearchSittersParams, SitterView, Sort,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> Client {
    Client::builder().base_url(server.uri()).build().unwrap()
}

fn sitters_body() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": "1",
                "type": "users",
                "attributes": {"first_name": "Alice", "rate": "500", "unexpected": [1, 2]},
                "relationships": {
                    "avatars": {"data": [{"id": "10", "type": "avatars"}]},
                    "inaccurate_location": {"data": {"id": "20", "type": "inaccurate_locations"}}
                }
            },
            {
                "id": "2",
                "type": "users",
                "attributes": {"first_name": "Bob"},
                "relationships": {"avatars": {"data": []}}
            }
        ],
        "included": [
            {"id": "10", "type": "avatars", "attributes": {"image": {"url": "https://x/a.png", "thumb": "https://x/t.png"}}},
            {"id": "20", "type": "inaccurate_locations", "attributes": {"latitude": 55.75, "longitude": 37.61}}
        ],
        "meta": {"current_page": 1, "total": 2, "total_pages": 1}
    })
}

// ============================================================================
// Sitter search
// ============================================================================

#[tokio::test]
async fn test_search_sitters_sends_flattened_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("date", "2024-05-01"))
        .and(query_param("start", "09:00"))
        .and(query_param("per_page", "10"))
        .and(query_param("perks", "1,2"))
        .and(query_param("sort", "-rate"))
        .and(query_param("include", "avatars,inaccurate_location"))
        .and(query_param("fields[users]", "first_name,rate"))
        .and(query_param("bbox[bl][lat]", "55.5"))
        .and(query_param("bbox[tr][lon]", "38"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sitters_body()))
        .expect(1)
        .mount(&server)
        .await;

    let params = SearchSittersParams {
        date: Some("2024-05-01".into()),
        start: Some("09:00".into()),
        per_page: Some(10),
        perks: vec![1, 2],
        sort: Some(Sort::RateDesc),
        include: vec!["avatars".into(), "inaccurate_location".into()],
        fields: [(
            "users".to_string(),
            vec!["first_name".to_string(), "rate".to_string()],
        )]
        .into_iter()
        .collect(),
        bbox: Some(BoundingBox::new(
            Corner::new(55.5, 37.0),
            Corner::new(56.0, 38.0),
        )),
        ..Default::default()
    };

    let response = client_for(&server).search_sitters(&params).await.unwrap();
    assert_eq!(response.data.len(), 2);
    assert_eq!(response.meta.total, 2);
    assert_eq!(
        response.data[0].attributes.extra["unexpected"],
        json!([1, 2])
    );
}

#[tokio::test]
async fn test_search_sitters_views_resolve_included() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sitters_body()))
        .mount(&server)
        .await;

    let response = client_for(&server)
        .search_sitters(&SearchSittersParams::default())
        .await
        .unwrap();
    let sitters = SitterView::from_list_response(response);

    assert_eq!(sitters.len(), 2);
    assert_eq!(sitters[0].id(), "1");
    assert_eq!(sitters[1].id(), "2");

    let avatar = sitters[0].avatar().unwrap();
    assert_eq!(avatar.attributes.best_url(), Some("https://x/a.png"));
    assert_eq!(
        sitters[0].inaccurate_location().unwrap().attributes.longitude,
        Some(37.61)
    );
    assert!(sitters[0].meta_tags().is_none());

    assert!(sitters[1].avatar().is_none());
}

#[tokio::test]
async fn test_search_sitters_validates_before_sending() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sitters_body()))
        .expect(0)
        .mount(&server)
        .await;

    let params = SearchSittersParams {
        distance: Some(5.0),
        bbox: Some(BoundingBox::new(Corner::new(1.0, 2.0), Corner::new(3.0, 4.0))),
        ..Default::default()
    };

    let err = client_for(&server).search_sitters(&params).await.unwrap_err();
    match err {
        Error::Validation { message, .. } => {
            assert_eq!(message, "distance and bbox are mutually exclusive")
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ============================================================================
// Reference data endpoints
// ============================================================================

#[tokio::test]
async fn test_get_regions_with_default_place() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {
                    "id": "1",
                    "type": "regions",
                    "attributes": {
                        "name": "Moscow",
                        "search_location": {
                            "address": "Moscow",
                            "latitude": 55.75,
                            "longitude": 37.61,
                            "viewport": {
                                "lower_left": {"latitude": 55.1, "longitude": 36.8},
                                "upper_right": {"latitude": 56.0, "longitude": 38.0}
                            }
                        }
                    },
                    "relationships": {"default_place": {"data": {"id": "p1", "type": "places"}}}
                },
                {
                    "id": "2",
                    "type": "regions",
                    "attributes": {"name": "Saint Petersburg"},
                    "relationships": {"default_place": {"data": {"id": "p2", "type": "places"}}}
                }
            ],
            "included": [{"id": "p1", "type": "places", "attributes": {"address": "Red Square"}}],
            "meta": {"current_page": 1, "total": 2, "total_pages": 1}
        })))
        .mount(&server)
        .await;

    let regions = RegionView::from_list_response(client_for(&server).get_regions().await.unwrap());

    assert_eq!(
        regions[0].default_place().unwrap().attributes.address.as_deref(),
        Some("Red Square")
    );
    assert_eq!(regions[0].search_location().unwrap().latitude, 55.75);
    assert!(regions[1].default_place().is_none());
    assert!(regions[1].search_location().is_none());
}

#[tokio::test]
async fn test_get_currencies_and_perks() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "1", "type": "currencies", "attributes": {"code": "RUB", "symbol": "₽"}}],
            "meta": {"current_page": 1, "total": 1, "total_pages": 1}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/perks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "3", "type": "perks", "attributes": {"name": "Cooking"}}],
            "meta": {"current_page": 1, "total": 1, "total_pages": 1}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let currencies = client.get_currencies().await.unwrap();
    assert_eq!(currencies.data[0].attributes.code.as_deref(), Some("RUB"));

    let perks = client.get_perks().await.unwrap();
    assert_eq!(perks.data[0].attributes.name.as_deref(), Some("Cooking"));
}

#[tokio::test]
async fn test_get_reviews_and_news_query() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reviews"))
        .and(query_param("user_id", "240466"))
        .and(query_param("per_page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "meta": {"current_page": 1, "total": 0, "total_pages": 0}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/news"))
        .and(query_param("before", "1700000000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "title": "Hello", "body": "World", "published_at": "2024-01-01T00:00:00Z", "is_read": true}],
            "meta": {"current_page": 1, "total": 1, "total_pages": 1}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let reviews = client
        .get_reviews(&ReviewsParams {
            user_id: Some(240466),
            per_page: Some(1),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(reviews.data.is_empty());
    assert_eq!(reviews.meta.current_page, 1);

    let news = client
        .get_news(&NewsParams {
            before: Some(1_700_000_000),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(news.data[0].title, "Hello");
    assert!(news.data[0].is_read);
}

#[tokio::test]
async fn test_get_currency_rates() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currencies/rates"))
        .and(query_param("base", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": "USD-RUB", "type": "currency_rates", "attributes": {"from": "USD", "to": "RUB", "rate": 92.5}}]
        })))
        .mount(&server)
        .await;

    let rates = client_for(&server)
        .get_currency_rates(Some("USD"))
        .await
        .unwrap();
    let rates = kidsout::CurrencyRateView::from_list_response(rates);
    assert_eq!(rates[0].from(), "USD");
    assert_eq!(rates[0].to(), "RUB");
    assert_eq!(rates[0].rate(), 92.5);
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn test_authorization_header_when_api_key_set() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perks"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(header_exists("User-Agent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let client = Client::builder()
        .base_url(server.uri())
        .api_key("test-api-key")
        .build()
        .unwrap();
    client.get_perks().await.unwrap();
}

#[tokio::test]
async fn test_no_authorization_header_without_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    client_for(&server).get_perks().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

// ============================================================================
// Errors
// ============================================================================

#[tokio::test]
async fn test_not_found_maps_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let err = client_for(&server).get_regions().await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        Error::NotFound(message) => assert_eq!(message, "Not Found"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/currencies"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server).get_currencies().await.unwrap_err();
    match err {
        Error::Api { status, message, .. } => {
            assert_eq!(status, 503);
            assert_eq!(message, "Unknown error");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_rate_limit_and_auth_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perks"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "7")
                .set_body_json(json!({"error": "slow down"})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/regions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "bad token"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    match client.get_perks().await.unwrap_err() {
        Error::RateLimit {
            retry_after,
            message,
        } => {
            assert_eq!(retry_after, 7);
            assert_eq!(message, "slow down");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        client.get_regions().await.unwrap_err(),
        Error::Authentication(m) if m == "bad token"
    ));
}

#[tokio::test]
async fn test_malformed_body_is_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perks"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).get_perks().await.unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn test_slow_response_maps_to_timeout() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/perks"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"data": []}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = Client::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get_perks().await.unwrap_err();
    assert!(matches!(err, Error::Timeout), "unexpected error: {err:?}");
    assert_eq!(err.status(), None);
}
