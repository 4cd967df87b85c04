use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::{Nullable, Parameter, ParameterMap};
use crate::core::types::ApiPayload;
use crate::services::command::{Command, CommandRest};
use crate::services::subscriptions::builder::required_text;
use serde_json::Value;

/// Reports service: order and transaction lookups
pub struct ReportsConnector<T: HttpTransport> {
    rest: CommandRest<T>,
}

impl<T: HttpTransport> ReportsConnector<T> {
    pub fn new(rest: &CommandRest<T>) -> Self {
        Self { rest: rest.clone() }
    }

    pub async fn ping(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let request = self.rest.request(Command::Ping, params)?;
        self.rest.execute(&request).await
    }

    /// Order by its numeric gateway id
    pub async fn order_detail(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let order_id = match params.integer(Parameter::OrderId)? {
            Nullable::Value(id) => id,
            _ => return Err(PayUError::missing_parameter(Parameter::OrderId.as_str())),
        };

        let mut request = self.rest.request(Command::OrderDetail, params)?;
        request
            .details
            .insert(Parameter::OrderId.as_str().to_string(), Value::from(order_id));
        self.rest.execute(&request).await
    }

    pub async fn transaction_response_detail(
        &self,
        params: &ParameterMap,
    ) -> Result<ApiPayload, PayUError> {
        let transaction_id = required_text(params, Parameter::TransactionId)?;

        let mut request = self.rest.request(Command::TransactionResponseDetail, params)?;
        request.details.insert(
            Parameter::TransactionId.as_str().to_string(),
            Value::String(transaction_id),
        );
        self.rest.execute(&request).await
    }
}
