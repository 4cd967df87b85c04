mod common;

use common::{client, client_with, sandbox_config, API_KEY, SUBSCRIPTIONS_BASE};
use payu_client::core::config::SUBSCRIPTIONS_URL;
use payu_client::core::types::EnvironmentMode;
use payu_client::services::subscriptions::types::SubscriptionSummary;
use payu_client::{ApiPayload, ErrorCode, Parameter, ParameterMap, PayUError, Service};
use reqwest::Method;
use serde_json::json;

fn card_subscription() -> ParameterMap {
    ParameterMap::new()
        .with(Parameter::PlanCode, "basic-plan")
        .with(Parameter::CustomerName, "Ana Perez")
        .with(Parameter::CustomerEmail, "ana@example.com")
        .with(Parameter::Quantity, "1")
        .with(Parameter::CreditCardNumber, "4242424242424242")
        .with(Parameter::CreditCardExpirationDate, "2030/01")
        .with(Parameter::PaymentMethod, "VISA")
        .with(Parameter::PayerName, "Ana Perez")
}

#[tokio::test]
async fn test_find_subscription() {
    let (client, transport) = client();
    transport.respond(200, r#"{"id":"123","state":"ACTIVE"}"#);

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "123");
    let payload = client.subscriptions.subscriptions.find(&params).await.unwrap();
    assert_eq!(payload, ApiPayload::Json(json!({"id": "123", "state": "ACTIVE"})));

    let request = transport.last();
    assert_eq!(request.method, Method::GET);
    assert_eq!(request.url, format!("{}/subscriptions/123", SUBSCRIPTIONS_BASE));
    assert!(request.body.is_none());
    assert!(request.header("Authorization").unwrap().starts_with("Basic "));
    assert_eq!(request.header("Accept-Language"), Some("es"));
}

#[tokio::test]
async fn test_not_found_is_domain_error() {
    let (client, transport) = client();
    transport.respond(404, r#"{"type":"NOT_FOUND","description":"no such subscription"}"#);

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "999");
    let err = client.subscriptions.subscriptions.find(&params).await.unwrap_err();
    match err {
        PayUError::DomainError { code, message } => {
            assert_eq!(code, ErrorCode::ApiError);
            assert_eq!(message, "no such subscription");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_cancel_acknowledged_without_body() {
    let (client, transport) = client();
    transport.respond(204, "");

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "123");
    let payload = client.subscriptions.subscriptions.cancel(&params).await.unwrap();
    assert_eq!(payload, ApiPayload::Acknowledged);

    let request = transport.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(request.url, format!("{}/subscriptions/123", SUBSCRIPTIONS_BASE));
}

#[tokio::test]
async fn test_create_with_credit_card() {
    let (client, transport) = client();
    transport.respond(201, r#"{"id":"sub-1","plan":{"planCode":"basic-plan"}}"#);

    let payload = client
        .subscriptions
        .subscriptions
        .create(&card_subscription())
        .await
        .unwrap();
    assert_eq!(payload.as_json().unwrap()["id"], json!("sub-1"));

    let request = transport.last();
    assert_eq!(request.method, Method::POST);
    assert_eq!(request.url, format!("{}/subscriptions", SUBSCRIPTIONS_BASE));
    let body = request.json();
    assert_eq!(body["customer"]["creditCards"][0]["expMonth"], json!("01"));
    assert!(body["customer"].get("bankAccounts").is_none());
    assert!(!request.body.unwrap().contains(API_KEY));
}

#[tokio::test]
async fn test_both_payment_methods_rejected_before_sending() {
    let (client, transport) = client();
    let params = card_subscription().with(Parameter::BankAccountId, "acc-1");

    let err = client.subscriptions.subscriptions.create(&params).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidParameters));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_no_payment_method_rejected_before_sending() {
    let (client, transport) = client();
    let params = ParameterMap::new()
        .with(Parameter::PlanCode, "basic-plan")
        .with(Parameter::CustomerId, "cus-1");

    let err = client.subscriptions.subscriptions.create(&params).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::InvalidParameters));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_update_uses_put_on_subscription_path() {
    let (client, transport) = client();
    transport.respond(200, r#"{"id":"sub-1"}"#);

    let params = ParameterMap::new()
        .with(Parameter::SubscriptionId, "sub-1")
        .with(Parameter::TokenId, "tok-1");
    client.subscriptions.subscriptions.update(&params).await.unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::PUT);
    assert_eq!(request.url, format!("{}/subscriptions/sub-1", SUBSCRIPTIONS_BASE));
    assert_eq!(request.json()["customer"]["creditCards"][0], json!({"token": "tok-1"}));
}

#[tokio::test]
async fn test_find_by_plan_builds_query() {
    let (client, transport) = client();
    transport.respond(200, r#"{"subscriptionList":[]}"#);

    let params = ParameterMap::new()
        .with(Parameter::PlanCode, "plan a")
        .with(Parameter::Limit, 10);
    client
        .subscriptions
        .subscriptions
        .find_by_plan_or_customer_or_account(&params)
        .await
        .unwrap();

    let url = transport.last().url;
    assert!(url.starts_with(&format!("{}/subscriptions/?", SUBSCRIPTIONS_BASE)));
    assert!(url.contains("planCode=plan+a"));
    assert!(url.contains("limit=10"));
}

#[tokio::test]
async fn test_missing_subscription_id() {
    let (client, transport) = client();
    let err = client
        .subscriptions
        .subscriptions
        .find(&ParameterMap::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PayUError::InvalidArgument(ref m) if m.contains("subscriptionId")));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_override_url_wins() {
    let config = sandbox_config()
        .mode(EnvironmentMode::Production)
        .override_url(Service::Subscriptions, "http://localhost:8080/rest".to_string());
    let (client, transport) = client_with(config);
    transport.respond(200, r#"{"id":"1"}"#);

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "1");
    client.subscriptions.subscriptions.find(&params).await.unwrap();
    assert_eq!(transport.last().url, "http://localhost:8080/rest/subscriptions/1");
}

#[tokio::test]
async fn test_production_mode_uses_production_url() {
    let (client, transport) = client_with(sandbox_config().mode(EnvironmentMode::Production));
    transport.respond(200, r#"{"id":"1"}"#);

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "1");
    client.subscriptions.subscriptions.find(&params).await.unwrap();
    assert_eq!(transport.last().url, format!("{}/subscriptions/1", SUBSCRIPTIONS_URL));
}

#[tokio::test]
async fn test_response_dates_normalized() {
    let (client, transport) = client();
    transport.respond(
        200,
        r#"{"id":"1","dateBegin":1700000000000,"currentPeriodEnd":null}"#,
    );

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "1");
    let payload = client.subscriptions.subscriptions.find(&params).await.unwrap();
    let body = payload.into_json().unwrap();
    assert_eq!(body["dateBegin"], json!("2023-11-14T22:13:20.000Z"));
    assert!(body.get("currentPeriodEnd").is_none());
}

#[tokio::test]
async fn test_recurring_bill_items_lifecycle() {
    let (client, transport) = client();
    let items = &client.subscriptions.recurring_bill_items;

    transport.respond(201, r#"{"id":"item-1"}"#);
    let params = ParameterMap::new()
        .with(Parameter::SubscriptionId, "sub-1")
        .with(Parameter::Description, "setup fee")
        .with(Parameter::ItemValue, "15000")
        .with(Parameter::Currency, "COP");
    items.create(&params).await.unwrap();
    let request = transport.last();
    assert_eq!(
        request.url,
        format!("{}/subscriptions/sub-1/recurringBillItems", SUBSCRIPTIONS_BASE)
    );
    assert_eq!(
        request.json()["additionalValues"],
        json!([{"name": "ITEM_VALUE", "value": "15000", "currency": "COP"}])
    );

    let err = items.find_list(&ParameterMap::new()).await.unwrap_err();
    assert!(matches!(err, PayUError::InvalidArgument(_)));

    transport.respond(204, "");
    let params = ParameterMap::new().with(Parameter::RecurringBillItemId, "item-1");
    assert_eq!(items.delete(&params).await.unwrap(), ApiPayload::Acknowledged);
    assert_eq!(
        transport.last().url,
        format!("{}/recurringBillItems/item-1", SUBSCRIPTIONS_BASE)
    );
}

#[tokio::test]
async fn test_credit_card_delete_path() {
    let (client, transport) = client();
    transport.respond(200, "");

    let params = ParameterMap::new()
        .with(Parameter::CustomerId, "cus-1")
        .with(Parameter::TokenId, "tok-9");
    client.subscriptions.credit_cards.delete(&params).await.unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(
        request.url,
        format!("{}/customers/cus-1/creditCards/tok-9", SUBSCRIPTIONS_BASE)
    );
}

#[tokio::test]
async fn test_recurring_bills_list_query() {
    let (client, transport) = client();
    transport.respond(200, r#"{"recurringBillList":[]}"#);

    let params = ParameterMap::new()
        .with(Parameter::CustomerId, "cus-1")
        .with(Parameter::RecurringBillState, "PAID");
    client.subscriptions.recurring_bills.list(&params).await.unwrap();

    let url = transport.last().url;
    assert!(url.starts_with(&format!("{}/recurringBill?", SUBSCRIPTIONS_BASE)));
    assert!(url.contains("customerId=cus-1"));
    assert!(url.contains("state=PAID"));
}

#[tokio::test]
async fn test_empty_body_with_other_status_is_decoding_error() {
    let (client, transport) = client();
    transport.respond(201, "");

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "1");
    let err = client.subscriptions.subscriptions.find(&params).await.unwrap_err();
    assert_eq!(err.code(), Some(ErrorCode::JsonDeserializationError));
}

#[tokio::test]
async fn test_cancel_keeps_crafted_id_in_one_segment() {
    let (client, transport) = client();
    transport.respond(204, "");

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "123/../../customers/9?x=1");
    client.subscriptions.subscriptions.cancel(&params).await.unwrap();

    let request = transport.last();
    assert_eq!(request.method, Method::DELETE);
    assert_eq!(
        request.url,
        format!(
            "{}/subscriptions/123%2F..%2F..%2Fcustomers%2F9%3Fx=1",
            SUBSCRIPTIONS_BASE
        )
    );
}

#[tokio::test]
async fn test_find_parses_into_summary() {
    let (client, transport) = client();
    transport.respond(200, r#"{"id":"123","state":"ACTIVE","quantity":1,"plan":{"id":"p"}}"#);

    let params = ParameterMap::new().with(Parameter::SubscriptionId, "123");
    let summary: SubscriptionSummary = client
        .subscriptions
        .subscriptions
        .find(&params)
        .await
        .unwrap()
        .parse()
        .unwrap();
    assert_eq!(summary.id, "123");
    assert_eq!(summary.quantity, Some(1));
}
