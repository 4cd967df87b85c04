use crate::core::errors::PayUError;
use crate::core::kernel::{add_query_params, ApiService, BasicAuth, HttpRequestDescriptor, HttpTransport};
use crate::core::params::ParameterMap;
use crate::core::types::{ApiPayload, Entity, Operation, Service};
use crate::services::requested_language;
use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Thin typed wrapper around `ApiService` for the subscriptions service
///
/// Every call is authenticated with basic auth built from the merchant's
/// api login and api key.
pub struct SubscriptionsRest<T: HttpTransport> {
    api: ApiService<T>,
    auth: BasicAuth,
}

impl<T: HttpTransport> Clone for SubscriptionsRest<T> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            auth: self.auth.clone(),
        }
    }
}

impl<T: HttpTransport> SubscriptionsRest<T> {
    pub fn new(api: ApiService<T>, auth: BasicAuth) -> Self {
        Self { api, auth }
    }

    /// Path segment for an entity operation
    pub fn path(
        &self,
        entity: Entity,
        operation: Operation,
        path_args: &[&str],
    ) -> Result<String, PayUError> {
        self.api.resolver().segment(entity, operation, path_args)
    }

    /// Path segment with the filter's fields appended as a query string
    pub fn query_path<F: Serialize>(
        &self,
        entity: Entity,
        operation: Operation,
        filter: &F,
    ) -> Result<String, PayUError> {
        add_query_params(&self.path(entity, operation, &[])?, filter)
    }

    fn descriptor(
        &self,
        method: Method,
        path: String,
        params: &ParameterMap,
    ) -> Result<HttpRequestDescriptor, PayUError> {
        Ok(HttpRequestDescriptor::new(Service::Subscriptions, method, path)
            .with_language(requested_language(params)?)
            .with_credentials(self.auth.clone()))
    }

    /// Send a JSON body
    pub async fn send_json<R: Serialize + Sync>(
        &self,
        method: Method,
        path: String,
        request: &R,
        params: &ParameterMap,
    ) -> Result<ApiPayload, PayUError> {
        let descriptor = self.descriptor(method, path, params)?;
        self.api.execute(Some(request), &descriptor).await
    }

    /// Send without a body (reads and deletes)
    pub async fn send_empty(
        &self,
        method: Method,
        path: String,
        params: &ParameterMap,
    ) -> Result<ApiPayload, PayUError> {
        let descriptor = self.descriptor(method, path, params)?;
        self.api.execute::<Value>(None, &descriptor).await
    }
}
