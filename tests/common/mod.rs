#![allow(dead_code)]

use async_trait::async_trait;
use payu_client::core::kernel::{HttpTransport, RawResponse};
use payu_client::core::types::EnvironmentMode;
use payu_client::{PayUBuilder, PayUClient, PayUConfig, PayUError};
use reqwest::Method;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const MERCHANT_ID: &str = "508029";
pub const API_LOGIN: &str = "pRRXKOl8ikMmt9u";
pub const API_KEY: &str = "4Vj8eK4rloUd272L48hsrarnUA";
pub const ACCOUNT_ID: &str = "512321";

pub const SUBSCRIPTIONS_BASE: &str = "https://sandbox.api.payulatam.com/payments-api/rest/v4.3";
pub const PAYMENTS_BASE: &str = "https://sandbox.api.payulatam.com/payments-api/4.0/service.cgi";
pub const REPORTS_BASE: &str = "https://sandbox.api.payulatam.com/reports-api/4.0/service.cgi";

/// One request as seen by the transport
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn json(&self) -> Value {
        let body = self.body.as_deref().expect("request has no body");
        serde_json::from_str(body).expect("request body is not json")
    }
}

/// In-memory transport answering with queued responses and recording every call
#[derive(Default)]
pub struct RecordingTransport {
    responses: Mutex<VecDeque<Result<RawResponse, PayUError>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Ok(RawResponse::new(status, body)));
    }

    pub fn fail(&self, error: PayUError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last(&self) -> RecordedRequest {
        self.requests().pop().expect("no request was sent")
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> Result<RawResponse, PayUError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            method,
            url: url.to_string(),
            headers: headers.to_vec(),
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(204, "")))
    }
}

/// Sandbox configuration with the public PayU test merchant
pub fn sandbox_config() -> PayUConfig {
    PayUConfig::new(
        MERCHANT_ID.to_string(),
        API_LOGIN.to_string(),
        API_KEY.to_string(),
    )
    .account_id(ACCOUNT_ID.to_string())
    .mode(EnvironmentMode::Sandbox)
}

pub fn client() -> (PayUClient<RecordingTransport>, Arc<RecordingTransport>) {
    client_with(sandbox_config())
}

pub fn client_with(config: PayUConfig) -> (PayUClient<RecordingTransport>, Arc<RecordingTransport>) {
    let transport = RecordingTransport::new();
    let client = PayUBuilder::new()
        .with_config(config)
        .build_with_transport(Arc::clone(&transport))
        .expect("client should build");
    (client, transport)
}
