use crate::core::config::PayUConfig;
use crate::core::errors::PayUError;
use crate::core::kernel::{
    ApiService, BasicAuth, HttpTransport, ReqwestTransport, RestClientConfig, Signer,
};
use crate::core::types::Service;
use crate::services::command::{CommandRest, MerchantAuth};
use crate::services::payments::PaymentsConnector;
use crate::services::reports::ReportsConnector;
use crate::services::subscriptions::{SubscriptionsConnector, SubscriptionsRest};
use std::sync::Arc;
use tracing::info;

/// Entry point composing every service connector over one transport
pub struct PayUClient<T: HttpTransport = ReqwestTransport> {
    pub subscriptions: SubscriptionsConnector<T>,
    pub payments: PaymentsConnector<T>,
    pub reports: ReportsConnector<T>,
    config: PayUConfig,
}

impl PayUClient<ReqwestTransport> {
    /// Client over a reqwest transport configured from `config`
    pub fn new(config: PayUConfig) -> Result<Self, PayUError> {
        PayUBuilder::new().with_config(config).build()
    }
}

impl<T: HttpTransport> PayUClient<T> {
    pub fn with_transport(transport: Arc<T>, config: PayUConfig) -> Self {
        let api = ApiService::new(transport, &config);
        Self::from_service(api, config)
    }

    /// Client whose transaction signatures come from a custom signer
    pub fn with_signer(transport: Arc<T>, config: PayUConfig, signer: Arc<dyn Signer>) -> Self {
        let api = ApiService::with_signer(transport, &config, signer);
        Self::from_service(api, config)
    }

    fn from_service(api: ApiService<T>, config: PayUConfig) -> Self {
        let auth = BasicAuth::new(
            config.merchant.api_login().to_string(),
            config.merchant.api_key().to_string(),
        );
        let subscriptions_rest = SubscriptionsRest::new(api.clone(), auth);

        let merchant = MerchantAuth::from_config(&config);
        let payments_rest = CommandRest::new(api.clone(), Service::Payments, merchant.clone());
        let reports_rest = CommandRest::new(api, Service::Reports, merchant);

        Self {
            subscriptions: SubscriptionsConnector::new(&subscriptions_rest),
            payments: PaymentsConnector::new(&payments_rest, config.merchant.account_id.clone()),
            reports: ReportsConnector::new(&reports_rest),
            config,
        }
    }

    pub const fn config(&self) -> &PayUConfig {
        &self.config
    }
}

/// Fluent construction of a [`PayUClient`]
#[derive(Debug, Default)]
pub struct PayUBuilder {
    config: Option<PayUConfig>,
}

impl PayUBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(mut self, config: PayUConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load the configuration from `{prefix}_*` environment variables
    pub fn from_env(prefix: &str) -> Result<Self, PayUError> {
        Ok(Self::new().with_config(PayUConfig::from_env(prefix)?))
    }

    fn take_config(self) -> Result<PayUConfig, PayUError> {
        let config = self.config.ok_or_else(|| {
            PayUError::ConfigurationError("no merchant configuration was provided".to_string())
        })?;
        if !config.merchant.has_credentials() {
            return Err(PayUError::ConfigurationError(
                "the merchant api login and api key must not be empty".to_string(),
            ));
        }
        Ok(config)
    }

    /// Build over a reqwest transport using the configured timeout and user agent
    pub fn build(self) -> Result<PayUClient<ReqwestTransport>, PayUError> {
        let config = self.take_config()?;
        let rest_config = RestClientConfig::default()
            .with_timeout(config.timeout_seconds)
            .with_user_agent(config.user_agent.clone());
        let transport = Arc::new(ReqwestTransport::new(rest_config)?);

        info!(
            merchant_id = %config.merchant.merchant_id,
            production = config.environment.is_production(),
            "PayU client ready"
        );
        Ok(PayUClient::with_transport(transport, config))
    }

    /// Build over a caller-supplied transport
    pub fn build_with_transport<T: HttpTransport>(
        self,
        transport: Arc<T>,
    ) -> Result<PayUClient<T>, PayUError> {
        Ok(PayUClient::with_transport(transport, self.take_config()?))
    }
}
