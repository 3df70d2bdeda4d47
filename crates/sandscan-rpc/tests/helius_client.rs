use sandscan_core::{traits::TransactionSource, Error};
use sandscan_rpc::{HeliusClient, HeliusConfig};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MINT: &str = "Mint111";

fn client(server: &MockServer, page_size: usize) -> HeliusClient {
    let config = HeliusConfig {
        base_url: server.uri(),
        retry_delay: Duration::from_millis(5),
        call_delay: Duration::ZERO,
        max_retries: 2,
        page_size,
        ..HeliusConfig::new("test-key")
    };
    HeliusClient::new(config).unwrap()
}

fn listed(sig: &str, ts: i64) -> Value {
    json!({
        "signature": sig,
        "timestamp": ts,
        "feePayer": "payer",
        "instructions": [{"programId": "Dex111"}],
        "tokenTransfers": []
    })
}

fn listing_path() -> String {
    format!("/v0/addresses/{}/transactions", MINT)
}

#[tokio::test]
async fn paginates_with_before() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(query_param("before", "s2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("s3", 97)])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .and(query_param("api-key", "test-key"))
        .and(query_param("limit", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("s1", 99), listed("s2", 98)])))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;

    let txs = client(&server, 2).fetch_token_transactions(MINT, 3).await.unwrap();
    let sigs: Vec<_> = txs.iter().map(|t| t.signature.clone().unwrap()).collect();
    assert_eq!(sigs, vec!["s1", "s2", "s3"]);
}

#[tokio::test]
async fn short_page_stops_pagination() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("s1", 99)])))
        .expect(1)
        .mount(&server)
        .await;

    let txs = client(&server, 100).fetch_token_transactions(MINT, 50).await.unwrap();
    assert_eq!(txs.len(), 1);
}

#[tokio::test]
async fn retries_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("s1", 99)])))
        .expect(1)
        .mount(&server)
        .await;

    let txs = client(&server, 100).fetch_token_transactions(MINT, 10).await.unwrap();
    assert_eq!(txs.len(), 1);
}

#[tokio::test]
async fn gives_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let err = client(&server, 100).fetch_token_transactions(MINT, 10).await.unwrap_err();
    assert!(matches!(err, Error::RpcError(_)));
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let err = client(&server, 100).fetch_token_transactions(MINT, 10).await.unwrap_err();
    match err {
        Error::RpcError(msg) => assert!(msg.contains("401")),
        other => panic!("erro inesperado: {other:?}"),
    }
}

#[tokio::test]
async fn non_array_payload_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "bad"})))
        .mount(&server)
        .await;

    let err = client(&server, 100).fetch_token_transactions(MINT, 10).await.unwrap_err();
    assert!(matches!(err, Error::DecodeError(_)));
}

#[tokio::test]
async fn details_complete_entries_without_instructions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"signature": "bare", "timestamp": 99},
            listed("full", 98)
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/transactions"))
        .and(query_param("api-key", "test-key"))
        .and(body_json(json!({"transactions": ["bare"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("bare", 99)])))
        .expect(1)
        .mount(&server)
        .await;

    let txs = client(&server, 100).recent_transactions(MINT, 10).await.unwrap();
    assert_eq!(txs.len(), 2);
    assert_eq!(txs[0].signature.as_deref(), Some("bare"));
    assert!(txs[0].instructions.is_some());
    assert_eq!(txs[0].fee_payer.as_deref(), Some("payer"));
}

#[tokio::test]
async fn failed_details_keep_listing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"signature": "bare", "timestamp": 99}])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v0/transactions"))
        .respond_with(ResponseTemplate::new(400))
        .mount(&server)
        .await;

    let txs = client(&server, 100).recent_transactions(MINT, 10).await.unwrap();
    assert_eq!(txs.len(), 1);
    assert!(txs[0].instructions.is_none());
}

#[tokio::test]
async fn cache_serves_repeated_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([listed("s1", 99)])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server, 100);
    let first = client.recent_transactions(MINT, 10).await.unwrap();
    let second = client.recent_transactions(MINT, 10).await.unwrap();
    assert_eq!(first, second);

    let stats = client.cache_stats();
    assert_eq!(stats.total_entries, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);

    client.clear_cache();
    assert_eq!(client.cache_stats().total_entries, 0);
}

#[tokio::test]
async fn null_collections_and_bad_entries_do_not_abort_the_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(listing_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            listed("s1", 99),
            {
                "signature": "s2",
                "timestamp": 98,
                "instructions": [{"programId": "Dex111", "innerInstructions": null}],
                "tokenTransfers": null,
                "nativeTransfers": null
            },
            {"signature": "s3", "timestamp": "amanhã"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let txs = client(&server, 100).recent_transactions(MINT, 10).await.unwrap();
    let sigs: Vec<_> = txs.iter().map(|t| t.signature.clone().unwrap()).collect();
    assert_eq!(sigs, vec!["s1", "s2"]);
    assert!(txs[1].token_transfers.is_empty());
}
