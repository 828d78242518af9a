//! Exchange rate client against a mock HTTP server
//!
//! Run with: cargo test -p tallycore --test exchange_rates_test

use pretty_assertions::assert_eq;
use serde_json::json;
use tallycore::services::{ExchangeRateApi, RateProvider, RateQuote};
use tallycore::AppError;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn api_for(server: &MockServer) -> ExchangeRateApi {
    ExchangeRateApi::new(Some(format!("{}/v6/test-key/latest/USD", server.uri()))).unwrap()
}

#[tokio::test]
async fn test_latest_quote_from_usd_table() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v6/test-key/latest/USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "result": "success",
            "base_code": "USD",
            "conversion_rates": { "USD": 1, "RUB": 90.0, "EUR": 0.5 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let quote = api_for(&server).await.latest().await.unwrap();

    assert_eq!(
        quote,
        RateQuote {
            usd_rub: 90.0,
            eur_rub: 180.0
        }
    );
}

#[tokio::test]
async fn test_error_status_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = api_for(&server).await.latest().await.unwrap_err();

    assert!(matches!(err, AppError::HttpStatus(status) if status.as_u16() == 500));
}

#[tokio::test]
async fn test_missing_currency_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "conversion_rates": { "USD": 1, "RUB": 90.0 }
        })))
        .mount(&server)
        .await;

    let err = api_for(&server).await.latest().await.unwrap_err();

    assert!(matches!(err, AppError::MalformedRates(ref m) if m.contains("EUR")));
}

#[tokio::test]
async fn test_non_json_body_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = api_for(&server).await.latest().await.unwrap_err();

    assert!(matches!(err, AppError::Http(_)));
}
