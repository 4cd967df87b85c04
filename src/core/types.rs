use crate::core::errors::{ErrorCode, PayUError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The three gateway service families, each with its own base URL pair
/// and response convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Service {
    Payments,
    Reports,
    Subscriptions,
}

impl Service {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Payments => "PAYMENTS_API",
            Self::Reports => "REPORTS_API",
            Self::Subscriptions => "SUBSCRIPTIONS_API",
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resource types addressable through URL templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Subscription,
    RecurringBill,
    RecurringBillItem,
    CreditCard,
    BankAccount,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Subscription => "SUBSCRIPTION",
            Self::RecurringBill => "RECURRING_BILL",
            Self::RecurringBillItem => "RECURRING_BILL_ITEM",
            Self::CreditCard => "CREDIT_CARD",
            Self::BankAccount => "BANK_ACCOUNT",
        };
        f.write_str(name)
    }
}

/// CRUD-style actions used together with [`Entity`] to pick a template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Get,
    Add,
    Edit,
    Delete,
    Query,
    GetList,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Get => "GET",
            Self::Add => "ADD",
            Self::Edit => "EDIT",
            Self::Delete => "DELETE",
            Self::Query => "QUERY",
            Self::GetList => "GET_LIST",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
    Pt,
}

impl Language {
    /// Language for an ISO 639-1 code, `None` for unsupported codes
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().as_str() {
            "es" => Some(Self::Es),
            "en" => Some(Self::En),
            "pt" => Some(Self::Pt),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnvironmentMode {
    Production,
    #[default]
    Sandbox,
}

/// Decoded success payload handed back to callers
#[derive(Debug, Clone, PartialEq)]
pub enum ApiPayload {
    /// Bare 200/204 confirmation without a body
    Acknowledged,
    Json(Value),
}

impl ApiPayload {
    pub fn as_json(&self) -> Option<&Value> {
        match self {
            Self::Acknowledged => None,
            Self::Json(value) => Some(value),
        }
    }

    pub fn into_json(self) -> Option<Value> {
        match self {
            Self::Acknowledged => None,
            Self::Json(value) => Some(value),
        }
    }

    /// Deserialize the JSON payload into a typed response
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, PayUError> {
        let value = self.into_json().ok_or_else(|| {
            PayUError::domain(
                ErrorCode::JsonDeserializationError,
                "the response carried no body to deserialize",
            )
        })?;
        serde_json::from_value(value).map_err(|e| {
            PayUError::domain(
                ErrorCode::JsonDeserializationError,
                format!("Failed to deserialize response: {}", e),
            )
        })
    }
}

/// Outcome of a single request/response round trip
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseOutcome {
    Success(ApiPayload),
    DomainError { code: ErrorCode, message: String },
    TransportError { status: u16 },
}

impl ResponseOutcome {
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn into_result(self) -> Result<ApiPayload, PayUError> {
        match self {
            Self::Success(payload) => Ok(payload),
            Self::DomainError { code, message } => Err(PayUError::DomainError { code, message }),
            Self::TransportError { status } => Err(PayUError::ConnectionError {
                status: Some(status),
                message: format!("the gateway answered with http status {}", status),
            }),
        }
    }
}
