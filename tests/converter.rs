use cmc_scraper::converter::PriceClient;
use cmc_scraper::{Conversion, ScrapeError};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn with_supported(codes: serde_json::Value) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/supported_vs_currencies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(codes))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn validates_fiat_case_insensitively() {
    let server = with_supported(json!(["btc", "eth", "usd", "eur", "gbp"])).await;
    let client = PriceClient::new(server.uri()).unwrap();

    assert!(client.validate_fiat("usd").await);
    assert!(client.validate_fiat("EUR").await);
    assert!(client.validate_fiat(" Gbp ").await);
    assert!(!client.validate_fiat("xyz").await);
    assert!(!client.validate_fiat("").await);
}

#[tokio::test]
async fn fiat_validation_fails_closed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/supported_vs_currencies"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = PriceClient::new(server.uri()).unwrap();
    assert!(!client.validate_fiat("usd").await);

    let err = client.supported_currencies().await.unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 503, .. }));

    // Nothing listens on port 9 here.
    let unreachable = PriceClient::new("http://127.0.0.1:9/api/v3").unwrap();
    assert!(!unreachable.validate_fiat("usd").await);
}

#[tokio::test]
async fn converts_using_the_unit_price() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .and(query_param("vs_currencies", "usd"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 50000}})))
        .expect(1)
        .mount(&server)
        .await;
    let client = PriceClient::new(format!("{}/", server.uri())).unwrap();

    let conversion = client.convert("bitcoin", 2.0, "usd").await;

    assert_eq!(
        conversion,
        Some(Conversion {
            unit_price: 50000.0,
            total: 100000.0,
            currency: "usd".to_string(),
        })
    );
}

#[tokio::test]
async fn lowercases_identifiers_before_querying() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "ethereum"))
        .and(query_param("vs_currencies", "eur"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ethereum": {"eur": 2500.5}})))
        .mount(&server)
        .await;
    let client = PriceClient::new(server.uri()).unwrap();

    let conversion = client.convert("Ethereum", 0.5, "EUR").await.unwrap();

    assert_eq!(conversion.unit_price, 2500.5);
    assert_eq!(conversion.total, 1250.25);
    assert_eq!(conversion.currency, "eur");
}

#[tokio::test]
async fn unknown_id_or_pairing_is_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "notacoin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .and(query_param("ids", "bitcoin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {}})))
        .mount(&server)
        .await;
    let client = PriceClient::new(server.uri()).unwrap();

    assert_eq!(client.try_convert("notacoin", 1.0, "usd").await.unwrap(), None);
    assert_eq!(client.try_convert("bitcoin", 1.0, "zzz").await.unwrap(), None);
    assert_eq!(client.convert("bitcoin", 1.0, "zzz").await, None);
}

#[tokio::test]
async fn server_errors_collapse_to_no_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/simple/price"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;
    let client = PriceClient::new(server.uri()).unwrap();

    assert_eq!(client.convert("bitcoin", 1.0, "usd").await, None);
    let err = client.try_convert("bitcoin", 1.0, "usd").await.unwrap_err();
    assert!(matches!(err, ScrapeError::Status { status: 429, .. }));
}

#[tokio::test]
async fn non_positive_quantity_is_rejected_without_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"bitcoin": {"usd": 1}})))
        .expect(0)
        .mount(&server)
        .await;
    let client = PriceClient::new(server.uri()).unwrap();

    assert_eq!(client.convert("bitcoin", 0.0, "usd").await, None);
    assert_eq!(client.convert("bitcoin", -1.0, "usd").await, None);
}
