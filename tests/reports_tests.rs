mod common;

use common::{client, REPORTS_BASE};
use payu_client::{ErrorCode, Parameter, ParameterMap, PayUError};
use serde_json::json;

#[tokio::test]
async fn test_order_detail() {
    let (client, transport) = client();
    transport.respond(
        200,
        r#"{"code":"SUCCESS","result":{"payload":{"id":844182,"creationDate":"2024-03-01 10:15:00"}}}"#,
    );

    let params = ParameterMap::new().with(Parameter::OrderId, "844182");
    let payload = client.reports.order_detail(&params).await.unwrap();
    assert_eq!(
        payload.as_json().unwrap()["result"]["payload"]["creationDate"],
        json!("2024-03-01T10:15:00.000Z")
    );

    let request = transport.last();
    assert_eq!(request.url, REPORTS_BASE);
    let body = request.json();
    assert_eq!(body["command"], json!("ORDER_DETAIL"));
    assert_eq!(body["details"], json!({"orderId": 844182}));
}

#[tokio::test]
async fn test_order_id_must_be_numeric() {
    let (client, transport) = client();
    let params = ParameterMap::new().with(Parameter::OrderId, "abc");
    let err = client.reports.order_detail(&params).await.unwrap_err();
    assert!(matches!(err, PayUError::InvalidArgument(_)));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_transaction_response_detail() {
    let (client, transport) = client();
    transport.respond(200, r#"{"code":"ERROR","error":"transaction not found"}"#);

    let params = ParameterMap::new().with(Parameter::TransactionId, "tx-1");
    let err = client
        .reports
        .transaction_response_detail(&params)
        .await
        .unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::ApiError));

    let body = transport.last().json();
    assert_eq!(body["command"], json!("TRANSACTION_RESPONSE_DETAIL"));
    assert_eq!(body["details"], json!({"transactionId": "tx-1"}));
}

#[tokio::test]
async fn test_reports_ping() {
    let (client, transport) = client();
    transport.respond(200, r#"{"code":"SUCCESS"}"#);
    assert!(client.reports.ping(&ParameterMap::new()).await.is_ok());
    assert_eq!(transport.last().json()["command"], json!("PING"));
}
