use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::{ApiPayload, Entity, Operation};
use crate::services::subscriptions::builder::{build_recurring_bill_filter, required_text};
use crate::services::subscriptions::rest::SubscriptionsRest;
use reqwest::Method;

/// Read-only access to the bills generated for subscriptions
pub struct RecurringBills<T: HttpTransport> {
    rest: SubscriptionsRest<T>,
}

impl<T: HttpTransport> RecurringBills<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    pub async fn find(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::RecurringBillId)?;
        let path = self.rest.path(Entity::RecurringBill, Operation::Get, &[id.as_str()])?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    pub async fn list(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let filter = build_recurring_bill_filter(params);
        let path = self
            .rest
            .query_path(Entity::RecurringBill, Operation::Query, &filter)?;
        self.rest.send_empty(Method::GET, path, params).await
    }
}
