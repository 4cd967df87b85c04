use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::{ApiPayload, Entity, Operation};
use crate::services::subscriptions::builder::{build_customer_credit_card, required_text};
use crate::services::subscriptions::rest::SubscriptionsRest;
use reqwest::Method;
use tracing::instrument;

/// Tokenized credit cards registered under a customer
pub struct CreditCards<T: HttpTransport> {
    rest: SubscriptionsRest<T>,
}

impl<T: HttpTransport> CreditCards<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    /// Register a card; the response carries its token
    #[instrument(skip_all)]
    pub async fn create(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let (customer_id, card) = build_customer_credit_card(params)?;
        let path = self
            .rest
            .path(Entity::CreditCard, Operation::Add, &[customer_id.as_str()])?;
        self.rest.send_json(Method::POST, path, &card, params).await
    }

    pub async fn find(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let token = required_text(params, Parameter::TokenId)?;
        let path = self.rest.path(Entity::CreditCard, Operation::Get, &[token.as_str()])?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    #[instrument(skip_all)]
    pub async fn delete(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        params.require(&[Parameter::CustomerId, Parameter::TokenId])?;
        let customer_id = required_text(params, Parameter::CustomerId)?;
        let token = required_text(params, Parameter::TokenId)?;
        let path = self.rest.path(
            Entity::CreditCard,
            Operation::Delete,
            &[customer_id.as_str(), token.as_str()],
        )?;
        self.rest.send_empty(Method::DELETE, path, params).await
    }
}
