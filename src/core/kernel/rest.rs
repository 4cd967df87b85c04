use crate::core::errors::PayUError;
use crate::core::types::{Language, Service};
use async_trait::async_trait;
use base64::engine::general_purpose;
use base64::Engine;
use reqwest::{Client, Method};
use secrecy::{ExposeSecret, Secret};
use tracing::{instrument, trace};

pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
pub const ACCEPT: &str = "application/json";

/// Raw status and body as returned by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// HTTP transport collaborator
///
/// Performs exactly one request per call. Connection-level failures are
/// reported as [`PayUError::ConnectionError`]; any response that reached the
/// gateway is returned as-is for the caller to interpret.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `url` - Fully resolved URL including query string
    /// * `headers` - Header name/value pairs
    /// * `body` - JSON payload, `None` for an absent body
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> Result<RawResponse, PayUError>;
}

/// Basic-auth credentials attached to a request descriptor
#[derive(Clone)]
pub struct BasicAuth {
    pub user: String,
    pub password: Secret<String>,
}

impl BasicAuth {
    pub fn new(user: String, password: String) -> Self {
        Self {
            user,
            password: Secret::new(password),
        }
    }

    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.user, self.password.expose_secret());
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

impl std::fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BasicAuth")
            .field("user", &self.user)
            .finish_non_exhaustive()
    }
}

/// Everything needed to address one request; immutable once built
#[derive(Debug, Clone)]
pub struct HttpRequestDescriptor {
    pub service: Service,
    pub method: Method,
    /// Path appended to the service base URL, empty for single-endpoint services
    pub path: String,
    pub language: Language,
    pub credentials: Option<BasicAuth>,
}

impl HttpRequestDescriptor {
    pub fn new(service: Service, method: Method, path: impl Into<String>) -> Self {
        Self {
            service,
            method,
            path: path.into(),
            language: Language::default(),
            credentials: None,
        }
    }

    #[must_use]
    pub fn with_language(mut self, language: Option<Language>) -> Self {
        self.language = language.unwrap_or_default();
        self
    }

    #[must_use]
    pub fn with_credentials(mut self, credentials: BasicAuth) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Header set sent with every request
    pub fn headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![
            ("Content-Type".to_string(), CONTENT_TYPE.to_string()),
            ("Accept".to_string(), ACCEPT.to_string()),
            ("Accept-Language".to_string(), self.language.as_str().to_string()),
        ];
        if let Some(credentials) = &self.credentials {
            headers.push(("Authorization".to_string(), credentials.header_value()));
        }
        headers
    }
}

/// Configuration for the reqwest transport
#[derive(Clone, Debug)]
pub struct RestClientConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string to include in requests
    pub user_agent: String,
}

impl Default for RestClientConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "payu-client/0.1".to_string(),
        }
    }
}

impl RestClientConfig {
    pub fn with_timeout(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }
}

/// Builder for the reqwest transport
pub struct RestClientBuilder {
    config: RestClientConfig,
}

impl RestClientBuilder {
    pub fn new(config: RestClientConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> Result<ReqwestTransport, PayUError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(self.config.timeout_seconds))
            .user_agent(&self.config.user_agent)
            .build()
            .map_err(|e| {
                PayUError::ConfigurationError(format!("Failed to build HTTP client: {}", e))
            })?;

        Ok(ReqwestTransport {
            client,
            config: self.config,
        })
    }
}

/// Implementation of `HttpTransport` using reqwest
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: RestClientConfig,
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    pub fn new(config: RestClientConfig) -> Result<Self, PayUError> {
        RestClientBuilder::new(config).build()
    }
}

/// Statuses the transport reports as connection failures instead of responses
pub fn is_connection_failure(status: u16) -> bool {
    status >= 500 || status == 401 || status == 403
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, headers, body), fields(method = %method, url = %url, has_body = body.is_some()))]
    async fn send(
        &self,
        method: Method,
        url: &str,
        headers: &[(String, String)],
        body: Option<String>,
    ) -> Result<RawResponse, PayUError> {
        let mut request = self.client.request(method, url);
        for (key, value) in headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| PayUError::ConnectionError {
            status: e.status().map(|s| s.as_u16()),
            message: format!("Request failed: {}", e),
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| PayUError::ConnectionError {
            status: Some(status),
            message: format!("Failed to read response body: {}", e),
        })?;

        trace!(status, body_len = body.len(), "response received");

        if is_connection_failure(status) {
            return Err(PayUError::ConnectionError {
                status: Some(status),
                message: format!("the gateway answered with http status {}", status),
            });
        }

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headers_without_credentials() {
        let descriptor = HttpRequestDescriptor::new(Service::Payments, Method::POST, "")
            .with_language(Some(Language::En));
        let headers = descriptor.headers();
        assert_eq!(headers.len(), 3);
        assert!(headers.contains(&("Accept-Language".to_string(), "en".to_string())));
    }

    #[test]
    fn test_basic_auth_header() {
        let descriptor = HttpRequestDescriptor::new(Service::Subscriptions, Method::GET, "/x")
            .with_credentials(BasicAuth::new("login".to_string(), "key".to_string()));
        let headers = descriptor.headers();
        assert!(headers.contains(&(
            "Authorization".to_string(),
            "Basic bG9naW46a2V5".to_string()
        )));
        assert!(!format!("{:?}", descriptor).contains("key\""));
    }

    #[test]
    fn test_connection_failure_statuses() {
        assert!(is_connection_failure(503));
        assert!(is_connection_failure(401));
        assert!(!is_connection_failure(404));
        assert!(!is_connection_failure(204));
    }

    #[test]
    fn test_build_transport() {
        let transport = RestClientBuilder::new(RestClientConfig::default().with_timeout(5)).build();
        assert!(transport.is_ok());
    }
}
