use crate::core::errors::PayUError;
use crate::core::kernel::HttpTransport;
use crate::core::params::ParameterMap;
use crate::core::types::ApiPayload;
use crate::services::command::{Command, CommandRest};
use crate::services::payments::builder::build_transaction;
use tracing::instrument;

/// Payments service: availability check, payment methods and transactions
pub struct PaymentsConnector<T: HttpTransport> {
    rest: CommandRest<T>,
    account_id: Option<String>,
}

impl<T: HttpTransport> PaymentsConnector<T> {
    pub fn new(rest: &CommandRest<T>, account_id: Option<String>) -> Self {
        Self {
            rest: rest.clone(),
            account_id,
        }
    }

    pub async fn ping(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let request = self.rest.request(Command::Ping, params)?;
        self.rest.execute(&request).await
    }

    pub async fn get_payment_methods(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let request = self.rest.request(Command::GetPaymentMethods, params)?;
        self.rest.execute(&request).await
    }

    /// Submit a transaction; the order is signed on the way out
    #[instrument(skip_all)]
    pub async fn submit_transaction(&self, params: &ParameterMap) -> Result<ApiPayload, PayUError> {
        let mut request = self.rest.request(Command::SubmitTransaction, params)?;
        request.transaction = Some(build_transaction(
            params,
            self.account_id.as_deref(),
            request.language,
        )?);
        self.rest.execute(&request).await
    }
}
