use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::{ApiPayload, Entity, Operation};
use crate::services::subscriptions::builder::{
    build_new_subscription, build_subscription_filter, build_subscription_update, required_text,
};
use crate::services::subscriptions::rest::SubscriptionsRest;
use reqwest::Method;
use tracing::instrument;

/// Subscription lifecycle
pub struct Subscriptions<T: HttpTransport> {
    rest: SubscriptionsRest<T>,
}

impl<T: HttpTransport> Subscriptions<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    /// Create a subscription with either a credit card or a bank account
    #[instrument(skip_all)]
    pub async fn create(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let subscription = build_new_subscription(params)?;
        let path = self.rest.path(Entity::Subscription, Operation::Add, &[])?;
        self.rest
            .send_json(Method::POST, path, &subscription, params)
            .await
    }

    /// Update the payment method or customer of a subscription
    #[instrument(skip_all)]
    pub async fn update(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let (id, subscription) = build_subscription_update(params)?;
        let path = self.rest.path(Entity::Subscription, Operation::Edit, &[id.as_str()])?;
        self.rest
            .send_json(Method::PUT, path, &subscription, params)
            .await
    }

    #[instrument(skip_all)]
    pub async fn cancel(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::SubscriptionId)?;
        let path = self.rest.path(Entity::Subscription, Operation::Delete, &[id.as_str()])?;
        self.rest.send_empty(Method::DELETE, path, params).await
    }

    #[instrument(skip_all)]
    pub async fn find(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::SubscriptionId)?;
        let path = self.rest.path(Entity::Subscription, Operation::Get, &[id.as_str()])?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    /// List subscriptions filtered by plan, customer, account or state
    #[instrument(skip_all)]
    pub async fn find_by_plan_or_customer_or_account(
        &self,
        params: &ParameterMap,
    ) -> Result<ApiPayload, PayUError> {
        let filter = build_subscription_filter(params);
        let path = self
            .rest
            .query_path(Entity::Subscription, Operation::GetList, &filter)?;
        self.rest.send_empty(Method::GET, path, params).await
    }
}
