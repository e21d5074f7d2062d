use std::sync::Arc;

use chrono::NaiveDate;
use inventory_api::types::{PurchaseOrderInput, PurchaseOrderStatus};
use inventory_api::{
    AuthTokens, Client, CredentialProvider, Error, MemoryCredentials, ProductQuery, Query,
    SalesReportQuery,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn signed_in(token: &str, refresh: Option<&str>) -> Arc<MemoryCredentials> {
    Arc::new(MemoryCredentials::with_tokens(AuthTokens {
        token: token.to_string(),
        refresh_token: refresh.map(str::to_string),
    }))
}

#[tokio::test]
async fn get_products_sends_bearer_token() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("products.json");

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(header("authorization", "Bearer t1"))
        .and(query_param("page", "0"))
        .and(query_param("size", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let query = ProductQuery::default().with_page(0).with_page_size(100);
    let resp = client.get_products(&query).await.unwrap();

    assert_eq!(resp["data"]["content"].as_array().unwrap().len(), 2);
    assert_eq!(resp["data"]["content"][0]["sku"], "SKU-001");
}

#[tokio::test]
async fn get_products_without_token_sends_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), Arc::new(MemoryCredentials::new())).unwrap();
    let resp = client.get_products(&ProductQuery::default()).await.unwrap();
    assert_eq!(resp, json!([]));

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn get_suppliers_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suppliers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let result = client.get_suppliers().await;
    assert!(matches!(result, Err(Error::HttpStatus { status: 500, .. })));
}

#[tokio::test]
async fn get_suppliers_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suppliers"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let result = client.get_suppliers().await;
    assert!(matches!(result, Err(Error::ParseFailed(_))));
}

#[tokio::test]
async fn unauthorized_request_is_replayed_after_refresh() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("purchase_orders.json");

    Mock::given(method("GET"))
        .and(path("/purchase-orders"))
        .and(header("authorization", "Bearer stale"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .and(body_partial_json(json!({"refreshToken": "r1"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"data": {"token": "fresh"}})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/purchase-orders"))
        .and(header("authorization", "Bearer fresh"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let creds = signed_in("stale", Some("r1"));
    let client = Client::new(&mock_server.uri(), creds.clone()).unwrap();
    let resp = client
        .get_purchase_orders(&Default::default())
        .await
        .unwrap();

    assert_eq!(resp["data"].as_array().unwrap().len(), 2);
    assert_eq!(creds.access_token().as_deref(), Some("fresh"));
    assert_eq!(creds.refresh_token().as_deref(), Some("r1"));
}

#[tokio::test]
async fn unauthorized_without_refresh_token_clears_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suppliers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let creds = signed_in("stale", None);
    let client = Client::new(&mock_server.uri(), creds.clone()).unwrap();
    let result = client.get_suppliers().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(creds.access_token(), None);
}

#[tokio::test]
async fn failed_refresh_clears_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/suppliers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/auth/refresh"))
        .respond_with(ResponseTemplate::new(403).set_body_string("expired"))
        .mount(&mock_server)
        .await;

    let creds = signed_in("stale", Some("r-expired"));
    let client = Client::new(&mock_server.uri(), creds.clone()).unwrap();
    let result = client.get_suppliers().await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(creds.access_token(), None);
    assert_eq!(creds.refresh_token(), None);
}

#[tokio::test]
async fn login_stores_tokens_from_wrapped_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_partial_json(json!({"username": "maria", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"token": "t-123", "refreshToken": "r-456", "role": "MANAGER"}
        })))
        .mount(&mock_server)
        .await;

    let creds = Arc::new(MemoryCredentials::new());
    let client = Client::new(&mock_server.uri(), creds.clone()).unwrap();
    let session = client.login("maria", "s3cret").await.unwrap();

    assert_eq!(session.username, "maria");
    assert_eq!(session.role, "MANAGER");
    assert_eq!(creds.access_token().as_deref(), Some("t-123"));
    assert_eq!(creds.refresh_token().as_deref(), Some("r-456"));

    client.logout();
    assert_eq!(creds.access_token(), None);
}

#[tokio::test]
async fn login_without_token_is_unauthorized() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "bad credentials"})))
        .mount(&mock_server)
        .await;

    let creds = Arc::new(MemoryCredentials::new());
    let client = Client::new(&mock_server.uri(), creds.clone()).unwrap();
    let result = client.login("maria", "wrong").await;

    assert!(matches!(result, Err(Error::Unauthorized)));
    assert_eq!(creds.access_token(), None);
}

#[tokio::test]
async fn create_purchase_order_posts_camel_case_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/purchase-orders"))
        .and(body_partial_json(json!({
            "orderNumber": "PO-2001",
            "supplierId": 4,
            "expectedDate": "2024-06-01",
            "status": "Pending"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {"id": 99, "orderNumber": "PO-2001", "supplierId": 4, "status": "Pending"}
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let input = PurchaseOrderInput {
        order_number: "PO-2001".to_string(),
        supplier_id: 4,
        expected_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        notes: String::new(),
        status: PurchaseOrderStatus::Pending,
    };
    let resp = client.create_purchase_order(&input).await.unwrap();
    assert_eq!(resp["data"]["id"], 99);
}

#[tokio::test]
async fn delete_purchase_order_accepts_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/purchase-orders/11"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    assert!(client.delete_purchase_order("11").await.is_ok());
}

#[tokio::test]
async fn stock_by_product_sends_product_id_param() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/stock/SKU-001"))
        .and(query_param("productId", "SKU-001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{"batchNumber": "B-1", "quantity": 12}]
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let resp = client.get_stock_by_product("SKU-001").await.unwrap();
    assert_eq!(resp["content"][0]["batchNumber"], "B-1");
}

#[tokio::test]
async fn sales_report_sends_date_range() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/reports/sales"))
        .and(query_param("from", "2024-01-01"))
        .and(query_param("to", "2024-01-07"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"sales": []})))
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let query = SalesReportQuery::new(
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 1, 7).unwrap(),
    );
    let resp = client.get_sales_report(&query).await.unwrap();
    assert_eq!(resp, json!({"sales": []}));
}

#[tokio::test]
async fn server_message_is_exposed_on_validation_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/suppliers"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"message": "Email already in use"})),
        )
        .mount(&mock_server)
        .await;

    let client = Client::new(&mock_server.uri(), signed_in("t1", None)).unwrap();
    let input = inventory_api::types::SupplierInput {
        name: "Acme".to_string(),
        email: "sales@acme.test".to_string(),
        phone: String::new(),
        address: None,
        contact_person: None,
        is_active: true,
    };
    let err = client.create_supplier(&input).await.unwrap_err();
    assert_eq!(err.server_message().as_deref(), Some("Email already in use"));
}
