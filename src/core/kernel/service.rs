use crate::core::config::PayUConfig;
use crate::core::errors::{ErrorCode, PayUError};
use crate::core::kernel::classifier::classifier_for;
use crate::core::kernel::json_tree::{format_dates, normalize_text, remove_nulls, transaction_order_mut};
use crate::core::kernel::rest::{HttpRequestDescriptor, HttpTransport};
use crate::core::kernel::signer::{DigestSigner, Signer};
use crate::core::kernel::url::UrlResolver;
use crate::core::types::{ApiPayload, ResponseOutcome};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, instrument, trace, warn};

/// Name of the order member holding the transaction value
pub const TX_VALUE: &str = "TX_VALUE";

/// Orchestrates one request: prune, normalize, sign, serialize, send,
/// decode and classify
pub struct ApiService<T: HttpTransport> {
    transport: Arc<T>,
    resolver: UrlResolver,
    signer: Arc<dyn Signer>,
    merchant_id: String,
    remove_null_values: bool,
}

impl<T: HttpTransport> Clone for ApiService<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            resolver: self.resolver.clone(),
            signer: Arc::clone(&self.signer),
            merchant_id: self.merchant_id.clone(),
            remove_null_values: self.remove_null_values,
        }
    }
}

impl<T: HttpTransport> std::fmt::Debug for ApiService<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiService")
            .field("resolver", &self.resolver)
            .field("merchant_id", &self.merchant_id)
            .field("remove_null_values", &self.remove_null_values)
            .finish_non_exhaustive()
    }
}

impl<T: HttpTransport> ApiService<T> {
    pub fn new(transport: Arc<T>, config: &PayUConfig) -> Self {
        let signer = Arc::new(DigestSigner::new(
            config.merchant.api_key().to_string(),
            config.digest_algorithm,
        ));
        Self::with_signer(transport, config, signer)
    }

    /// Use a custom signer instead of the configured digest
    pub fn with_signer(transport: Arc<T>, config: &PayUConfig, signer: Arc<dyn Signer>) -> Self {
        Self {
            transport,
            resolver: UrlResolver::new(config.environment.clone()),
            signer,
            merchant_id: config.merchant.merchant_id.clone(),
            remove_null_values: config.remove_null_values,
        }
    }

    pub const fn resolver(&self) -> &UrlResolver {
        &self.resolver
    }

    /// Send a request and return its classified outcome
    ///
    /// # Arguments
    /// * `request` - Request object, `None` for an absent body
    /// * `descriptor` - Target service, method, path and headers
    /// * `remove_nulls_override` - Overrides the configured null-removal policy
    #[instrument(skip(self, request, descriptor), fields(service = %descriptor.service, method = %descriptor.method, path = %descriptor.path))]
    pub async fn send<R: Serialize + Sync>(
        &self,
        request: Option<&R>,
        descriptor: &HttpRequestDescriptor,
        remove_nulls_override: Option<bool>,
    ) -> Result<ResponseOutcome, PayUError> {
        let remove = remove_nulls_override.unwrap_or(self.remove_null_values);

        let payload = match request {
            Some(request) => Some(self.prepare(request, remove)?),
            None => None,
        };

        let url = self.resolver.join(descriptor.service, &descriptor.path);
        let sent = self
            .transport
            .send(
                descriptor.method.clone(),
                &url,
                &descriptor.headers(),
                payload,
            )
            .await;

        let raw = match sent {
            Ok(raw) => raw,
            // the gateway answered with a failure status: surface it as an outcome
            Err(PayUError::ConnectionError {
                status: Some(status),
                ..
            }) => {
                warn!(status, "transport failure status");
                return Ok(ResponseOutcome::TransportError { status });
            }
            Err(e) => return Err(e),
        };

        trace!(status = raw.status, body_len = raw.body.len(), "raw response");

        if (raw.status == 200 || raw.status == 204) && raw.body.trim().is_empty() {
            debug!(status = raw.status, "acknowledged without body");
            return Ok(ResponseOutcome::Success(ApiPayload::Acknowledged));
        }

        // the body is never echoed back: it can hold payment data
        let mut response: Value = serde_json::from_str(&raw.body).map_err(|_| {
            PayUError::domain(
                ErrorCode::JsonDeserializationError,
                "Error decoding the json response; the body is not included in this message",
            )
        })?;

        if remove {
            response = remove_nulls(&response);
        }
        format_dates(&mut response);

        let outcome = classifier_for(descriptor.service).classify(response);
        match &outcome {
            ResponseOutcome::DomainError { code, message } => {
                warn!(%code, %message, "gateway rejected request");
            }
            _ => debug!(success = outcome.is_success(), "response classified"),
        }
        Ok(outcome)
    }

    /// Send and convert the outcome into the caller-facing result
    pub async fn execute<R: Serialize + Sync>(
        &self,
        request: Option<&R>,
        descriptor: &HttpRequestDescriptor,
    ) -> Result<ApiPayload, PayUError> {
        self.send(request, descriptor, None).await?.into_result()
    }

    /// Execute a request that carries no body
    pub async fn execute_empty(
        &self,
        descriptor: &HttpRequestDescriptor,
    ) -> Result<ApiPayload, PayUError> {
        self.execute::<Value>(None, descriptor).await
    }

    fn prepare<R: Serialize>(&self, request: &R, remove: bool) -> Result<String, PayUError> {
        let mut tree = serde_json::to_value(request).map_err(|e| {
            PayUError::domain(
                ErrorCode::JsonSerializationError,
                format!("Failed to serialize request: {}", e),
            )
        })?;

        if remove {
            tree = remove_nulls(&tree);
        }
        normalize_text(&mut tree);

        if let Some(order) = transaction_order_mut(&mut tree) {
            let signature = self.sign_order(order)?;
            order.insert("signature".to_string(), Value::String(signature));
        }

        serde_json::to_string(&tree).map_err(|e| {
            PayUError::domain(
                ErrorCode::JsonSerializationError,
                format!("Failed to serialize request: {}", e),
            )
        })
    }

    fn sign_order(&self, order: &Map<String, Value>) -> Result<String, PayUError> {
        let reference_code = order
            .get("referenceCode")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PayUError::InvalidArgument("the order to sign has no referenceCode".to_string())
            })?;

        let tx_value = order
            .get("additionalValues")
            .and_then(|values| values.get(TX_VALUE))
            .ok_or_else(|| {
                PayUError::InvalidArgument(format!("the order to sign has no {}", TX_VALUE))
            })?;

        let amount = match tx_value.get("value") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => {
                return Err(PayUError::InvalidArgument(
                    "the order to sign has no amount".to_string(),
                ))
            }
        };
        let currency = tx_value
            .get("currency")
            .and_then(Value::as_str)
            .ok_or_else(|| {
                PayUError::InvalidArgument("the order to sign has no currency".to_string())
            })?;

        self.signer
            .sign(&self.merchant_id, reference_code, &amount, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::kernel::rest::RawResponse;
    use crate::core::types::{EnvironmentMode, Service};
    use async_trait::async_trait;
    use reqwest::Method;
    use serde_json::json;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CannedTransport {
        response: Option<RawResponse>,
        failure_status: Option<u16>,
        bodies: Mutex<Vec<Option<String>>>,
    }

    #[async_trait]
    impl HttpTransport for CannedTransport {
        async fn send(
            &self,
            _method: Method,
            _url: &str,
            _headers: &[(String, String)],
            body: Option<String>,
        ) -> Result<RawResponse, PayUError> {
            self.bodies.lock().unwrap().push(body);
            self.response.clone().ok_or_else(|| PayUError::ConnectionError {
                status: self.failure_status,
                message: "refused".to_string(),
            })
        }
    }

    fn service(response: Option<RawResponse>) -> (ApiService<CannedTransport>, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport {
            response,
            ..Default::default()
        });
        let config = PayUConfig::new(
            "508029".to_string(),
            "pRRXKOl8ikMmt9u".to_string(),
            "4Vj8eK4rloUd272L48hsrarnUA".to_string(),
        )
        .mode(EnvironmentMode::Sandbox);
        (ApiService::new(Arc::clone(&transport), &config), transport)
    }

    fn descriptor(service: Service) -> HttpRequestDescriptor {
        HttpRequestDescriptor::new(service, Method::POST, "")
    }

    #[tokio::test]
    async fn test_signature_injected_into_transaction_order() {
        let (api, transport) = service(Some(RawResponse::new(200, r#"{"code":"SUCCESS"}"#)));
        let request = json!({
            "transaction": {"order": {
                "referenceCode": "TestPayU",
                "additionalValues": {"TX_VALUE": {"value": "3", "currency": "USD"}},
                "signature": null
            }}
        });

        let outcome = api
            .send(Some(&request), &descriptor(Service::Payments), None)
            .await
            .unwrap();
        assert!(outcome.is_success());

        let sent = transport.bodies.lock().unwrap()[0].clone().unwrap();
        let sent: Value = serde_json::from_str(&sent).unwrap();
        assert_eq!(
            sent["transaction"]["order"]["signature"],
            json!("ba9ffa71559580175585e45ce70b6c37")
        );
    }

    #[tokio::test]
    async fn test_nulls_kept_when_policy_disabled() {
        let (api, transport) = service(Some(RawResponse::new(204, "")));
        let request = json!({"id": "1", "plan": null});

        api.send(Some(&request), &descriptor(Service::Subscriptions), Some(false))
            .await
            .unwrap();
        api.send(Some(&request), &descriptor(Service::Subscriptions), Some(true))
            .await
            .unwrap();

        let bodies = transport.bodies.lock().unwrap();
        assert_eq!(bodies[0].as_deref(), Some(r#"{"id":"1","plan":null}"#));
        assert_eq!(bodies[1].as_deref(), Some(r#"{"id":"1"}"#));
    }

    #[tokio::test]
    async fn test_null_request_sends_no_body() {
        let (api, transport) = service(Some(RawResponse::new(200, "")));
        let outcome = api
            .send::<Value>(None, &descriptor(Service::Subscriptions), None)
            .await
            .unwrap();
        assert_eq!(outcome, ResponseOutcome::Success(ApiPayload::Acknowledged));
        assert_eq!(transport.bodies.lock().unwrap()[0], None);
    }

    #[tokio::test]
    async fn test_undecodable_body_hides_payload() {
        let (api, _) = service(Some(RawResponse::new(200, "<html>card 4111111111111111</html>")));
        let err = api
            .send::<Value>(None, &descriptor(Service::Payments), None)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some(ErrorCode::JsonDeserializationError));
        assert!(!err.to_string().contains("4111"));
    }

    #[tokio::test]
    async fn test_empty_body_with_other_status_fails_decoding() {
        for status in [201, 404] {
            let (api, _) = service(Some(RawResponse::new(status, "")));
            let err = api
                .send::<Value>(None, &descriptor(Service::Subscriptions), None)
                .await
                .unwrap_err();
            assert_eq!(err.code(), Some(ErrorCode::JsonDeserializationError));
        }
    }

    #[tokio::test]
    async fn test_response_nulls_pruned_by_default() {
        let (api, _) = service(Some(RawResponse::new(200, r#"{"id":"1","plan":null}"#)));
        let outcome = api
            .send::<Value>(None, &descriptor(Service::Subscriptions), None)
            .await
            .unwrap();
        assert_eq!(outcome, ResponseOutcome::Success(ApiPayload::Json(json!({"id": "1"}))));

        let (api, _) = service(Some(RawResponse::new(200, r#"{"id":"1","plan":null}"#)));
        let outcome = api
            .send::<Value>(None, &descriptor(Service::Subscriptions), Some(false))
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ResponseOutcome::Success(ApiPayload::Json(json!({"id": "1", "plan": null})))
        );
    }

    #[tokio::test]
    async fn test_connection_error_propagates() {
        let (api, _) = service(None);
        let err = api
            .send::<Value>(None, &descriptor(Service::Reports), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PayUError::ConnectionError { .. }));
    }

    #[tokio::test]
    async fn test_failure_status_becomes_transport_error() {
        let transport = Arc::new(CannedTransport {
            failure_status: Some(503),
            ..Default::default()
        });
        let config = PayUConfig::new("508029".to_string(), "login".to_string(), "key".to_string());
        let api = ApiService::new(transport, &config);

        let outcome = api
            .send::<Value>(None, &descriptor(Service::Payments), None)
            .await
            .unwrap();
        assert_eq!(outcome, ResponseOutcome::TransportError { status: 503 });
        assert!(matches!(
            outcome.into_result(),
            Err(PayUError::ConnectionError { status: Some(503), .. })
        ));
    }

    #[tokio::test]
    async fn test_order_without_reference_is_rejected_before_sending() {
        let (api, transport) = service(Some(RawResponse::new(200, "")));
        let request = json!({"transaction": {"order": {"additionalValues": {}}}});
        let err = api
            .send(Some(&request), &descriptor(Service::Payments), None)
            .await
            .unwrap_err();
        assert!(matches!(err, PayUError::InvalidArgument(_)));
        assert!(transport.bodies.lock().unwrap().is_empty());
    }
}
