use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::{ApiPayload, Entity, Operation};
use crate::services::subscriptions::builder::{
    build_bank_account, build_customer_bank_account, required_text,
};
use crate::services::subscriptions::rest::SubscriptionsRest;
use reqwest::Method;
use tracing::instrument;

/// Bank accounts registered under a customer
pub struct BankAccounts<T: HttpTransport> {
    rest: SubscriptionsRest<T>,
}

impl<T: HttpTransport> BankAccounts<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    #[instrument(skip_all)]
    pub async fn create(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let (customer_id, account) = build_customer_bank_account(params)?;
        let path = self
            .rest
            .path(Entity::BankAccount, Operation::Add, &[customer_id.as_str()])?;
        self.rest.send_json(Method::POST, path, &account, params).await
    }

    pub async fn find(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::BankAccountId)?;
        let path = self.rest.path(Entity::BankAccount, Operation::Get, &[id.as_str()])?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    /// Update the holder data of an account; only supplied fields are sent
    #[instrument(skip_all)]
    pub async fn update(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::BankAccountId)?;
        let mut account = build_bank_account(params);
        // the id travels in the path
        account.id = Default::default();
        let path = self.rest.path(Entity::BankAccount, Operation::Edit, &[id.as_str()])?;
        self.rest.send_json(Method::PUT, path, &account, params).await
    }

    #[instrument(skip_all)]
    pub async fn delete(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        params.require(&[Parameter::CustomerId, Parameter::BankAccountId])?;
        let customer_id = required_text(params, Parameter::CustomerId)?;
        let id = required_text(params, Parameter::BankAccountId)?;
        let path = self.rest.path(
            Entity::BankAccount,
            Operation::Delete,
            &[customer_id.as_str(), id.as_str()],
        )?;
        self.rest.send_empty(Method::DELETE, path, params).await
    }
}
