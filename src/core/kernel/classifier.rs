use crate::core::errors::ErrorCode;
use crate::core::types::{ApiPayload, ResponseOutcome, Service};
use serde_json::Value;

/// Success code carried by payments and reports responses
pub const SUCCESS_CODE: &str = "SUCCESS";

/// Subscriptions-service `type` values that mark an error body
pub const SUBSCRIPTION_ERROR_TYPES: [&str; 3] = ["BAD_REQUEST", "NOT_FOUND", "MALFORMED_REQUEST"];

/// Decides the outcome of a decoded response for one service family
pub trait ResponseClassifier: Send + Sync {
    fn classify(&self, response: Value) -> ResponseOutcome;
}

/// Payments and reports: a `code` field equal to `SUCCESS` means success,
/// otherwise `error` carries the message
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeClassifier;

impl ResponseClassifier for CodeClassifier {
    fn classify(&self, response: Value) -> ResponseOutcome {
        if response.get("code").and_then(Value::as_str) == Some(SUCCESS_CODE) {
            return ResponseOutcome::Success(ApiPayload::Json(response));
        }

        let message = match response.get("error") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => "the gateway reported an error without a message".to_string(),
            Some(other) => other.to_string(),
        };
        ResponseOutcome::DomainError {
            code: ErrorCode::ApiError,
            message,
        }
    }
}

/// Subscriptions: success unless `type` is one of the error types, in which
/// case `description` carries the message
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeClassifier;

impl ResponseClassifier for TypeClassifier {
    fn classify(&self, response: Value) -> ResponseOutcome {
        let is_error = response
            .get("type")
            .and_then(Value::as_str)
            .is_some_and(|kind| SUBSCRIPTION_ERROR_TYPES.contains(&kind));

        if !is_error {
            return ResponseOutcome::Success(ApiPayload::Json(response));
        }

        let message = response
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or("the gateway rejected the request")
            .to_string();
        ResponseOutcome::DomainError {
            code: ErrorCode::ApiError,
            message,
        }
    }
}

/// Classifier for the service a request was sent to
pub fn classifier_for(service: Service) -> &'static dyn ResponseClassifier {
    match service {
        Service::Payments | Service::Reports => &CodeClassifier,
        Service::Subscriptions => &TypeClassifier,
    }
}
