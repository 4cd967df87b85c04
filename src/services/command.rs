//! Command envelope shared by the payments and reports services.
//!
//! Both services expose a single endpoint; the operation is selected by the
//! `command` member of the JSON body and the merchant authenticates inside
//! the body instead of through headers.

use crate::core::config::PayUConfig;
use crate::core::errors::PayUError;
use crate::core::kernel::{ApiService, HttpRequestDescriptor, HttpTransport};
use crate::core::params::ParameterMap;
use crate::core::types::{ApiPayload, Language, Service};
use crate::services::payments::types::Transaction;
use crate::services::requested_language;
use reqwest::Method;
use secrecy::{ExposeSecret, Secret};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Command {
    Ping,
    SubmitTransaction,
    GetPaymentMethods,
    OrderDetail,
    TransactionResponseDetail,
}

/// Merchant credentials as carried inside a command body
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantAuth {
    pub api_login: String,
    #[serde(serialize_with = "expose")]
    pub api_key: Secret<String>,
}

fn expose<S: Serializer>(secret: &Secret<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

impl MerchantAuth {
    pub fn from_config(config: &PayUConfig) -> Self {
        Self {
            api_login: config.merchant.api_login().to_string(),
            api_key: config.merchant.api_key.clone(),
        }
    }
}

impl fmt::Debug for MerchantAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MerchantAuth")
            .field("api_login", &self.api_login)
            .finish_non_exhaustive()
    }
}

/// Body sent to the payments and reports endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub language: Language,
    pub command: Command,
    pub merchant: MerchantAuth,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction: Option<Transaction>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub details: BTreeMap<String, Value>,
    /// `true` unless the environment resolves to production
    pub test: bool,
}

/// Typed wrapper around `ApiService` for one command-style service
pub struct CommandRest<T: HttpTransport> {
    api: ApiService<T>,
    service: Service,
    merchant: MerchantAuth,
}

impl<T: HttpTransport> Clone for CommandRest<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            service: self.service,
            merchant: self.merchant.clone(),
        }
    }
}

impl<T: HttpTransport> CommandRest<T> {
    pub fn new(api: ApiService<T>, service: Service, merchant: MerchantAuth) -> Self {
        Self {
            api,
            service,
            merchant,
        }
    }

    pub const fn service(&self) -> Service {
        self.service
    }

    /// Envelope for `command`, with the test flag taken from the current mode
    pub fn request(
        &self,
        command: Command,
        params: &ParameterMap,
    ) -> Result<CommandRequest, PayUError> {
        Ok(CommandRequest {
            language: requested_language(params)?.unwrap_or_default(),
            command,
            merchant: self.merchant.clone(),
            transaction: None,
            details: BTreeMap::new(),
            test: !self.api.resolver().environment().is_production(),
        })
    }

    pub async fn execute(&self, request: &CommandRequest) -> Result<ApiPayload, PayUError> {
        debug!(service = %self.service, command = ?request.command, test = request.test, "sending command");
        let descriptor = HttpRequestDescriptor::new(self.service, Method::POST, "")
            .with_language(Some(request.language));
        self.api.execute(Some(request), &descriptor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shape() {
        let request = CommandRequest {
            language: Language::Es,
            command: Command::Ping,
            merchant: MerchantAuth {
                api_login: "pRRXKOl8ikMmt9u".to_string(),
                api_key: Secret::new("4Vj8eK4rloUd272L48hsrarnUA".to_string()),
            },
            transaction: None,
            details: BTreeMap::new(),
            test: true,
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "language": "es",
                "command": "PING",
                "merchant": {"apiLogin": "pRRXKOl8ikMmt9u", "apiKey": "4Vj8eK4rloUd272L48hsrarnUA"},
                "test": true
            })
        );
        assert!(!format!("{:?}", request).contains("4Vj8eK4rloUd272L48hsrarnUA"));
    }

    #[test]
    fn test_command_names() {
        assert_eq!(
            serde_json::to_value(Command::TransactionResponseDetail).unwrap(),
            json!("TRANSACTION_RESPONSE_DETAIL")
        );
    }
}
