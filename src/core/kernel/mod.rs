//! # Kernel
//!
//! Service-agnostic building blocks shared by every PayU service connector.
//!
//! - [`rest`]: the `HttpTransport` collaborator and the reqwest implementation,
//!   plus `HttpRequestDescriptor` (service, method, path, language, credentials)
//! - [`url`]: the `(entity, operation)` template table and `UrlResolver`
//! - [`signer`]: transaction signatures (`Signer`, `DigestSigner`)
//! - [`json_tree`]: null pruning, text and date normalization over JSON trees
//! - [`classifier`]: per-service-family response classification
//! - [`service`]: `ApiService`, which runs one request end to end
//!
//! ```rust,no_run
//! use payu_client::core::config::PayUConfig;
//! use payu_client::core::kernel::*;
//! use payu_client::core::types::{Entity, Operation, Service};
//! use reqwest::Method;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), payu_client::PayUError> {
//! let config = PayUConfig::new("508029".into(), "login".into(), "key".into());
//! let transport = Arc::new(ReqwestTransport::new(RestClientConfig::default())?);
//! let api = ApiService::new(transport, &config);
//!
//! let path = api.resolver().segment(Entity::Subscription, Operation::Get, &["123"])?;
//! let descriptor = HttpRequestDescriptor::new(Service::Subscriptions, Method::GET, path);
//! let payload = api.execute_empty(&descriptor).await?;
//! # Ok(())
//! # }
//! ```
pub mod classifier;
pub mod json_tree;
pub mod rest;
pub mod service;
pub mod signer;
pub mod url;

// Re-export key types for convenience
pub use classifier::{classifier_for, CodeClassifier, ResponseClassifier, TypeClassifier};
pub use rest::{
    BasicAuth, HttpRequestDescriptor, HttpTransport, RawResponse, ReqwestTransport,
    RestClientBuilder, RestClientConfig,
};
pub use service::ApiService;
pub use signer::{DigestSigner, Signer};
pub use url::{add_query_params, UrlResolver};
