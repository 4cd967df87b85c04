use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Parameter, ParameterMap};
use crate::core::types::{ApiPayload, Entity, Operation};
use crate::services::subscriptions::builder::{
    build_recurring_bill_item, build_recurring_bill_item_filter, required_text,
};
use crate::services::subscriptions::rest::SubscriptionsRest;
use reqwest::Method;
use tracing::instrument;

const CREATE_REQUIRED: &[Parameter] = &[
    Parameter::SubscriptionId,
    Parameter::Description,
    Parameter::ItemValue,
    Parameter::Currency,
];

/// Extra charges added to a subscription's next bills
pub struct RecurringBillItems<T: HttpTransport> {
    rest: SubscriptionsRest<T>,
}

impl<T: HttpTransport> RecurringBillItems<T> {
    pub fn new(rest: &SubscriptionsRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    #[instrument(skip_all)]
    pub async fn create(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        params.require(CREATE_REQUIRED)?;
        let subscription_id = required_text(params, Parameter::SubscriptionId)?;
        let item = build_recurring_bill_item(params)?;
        let path = self.rest.path(
            Entity::RecurringBillItem,
            Operation::Add,
            &[subscription_id.as_str()],
        )?;
        self.rest.send_json(Method::POST, path, &item, params).await
    }

    pub async fn find(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::RecurringBillItemId)?;
        let path = self.rest.path(Entity::RecurringBillItem, Operation::Get, &[id.as_str()])?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    /// Items of a subscription, or items matching a description
    pub async fn find_list(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let filter = build_recurring_bill_item_filter(params)?;
        let path = self
            .rest
            .query_path(Entity::RecurringBillItem, Operation::GetList, &filter)?;
        self.rest.send_empty(Method::GET, path, params).await
    }

    #[instrument(skip_all)]
    pub async fn update(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::RecurringBillItemId)?;
        let item = build_recurring_bill_item(params)?;
        let path = self.rest.path(Entity::RecurringBillItem, Operation::Edit, &[id.as_str()])?;
        self.rest.send_json(Method::PUT, path, &item, params).await
    }

    #[instrument(skip_all)]
    pub async fn delete(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let id = required_text(params, Parameter::RecurringBillItemId)?;
        let path = self
            .rest
            .path(Entity::RecurringBillItem, Operation::Delete, &[id.as_str()])?;
        self.rest.send_empty(Method::DELETE, path, params).await
    }
}
