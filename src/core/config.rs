use crate::core::types::{EnvironmentMode, Service};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::env;

pub const PAYMENTS_URL: &str = "https://api.payulatam.com/payments-api/4.0/service.cgi";
pub const PAYMENTS_SANDBOX_URL: &str =
    "https://sandbox.api.payulatam.com/payments-api/4.0/service.cgi";
pub const REPORTS_URL: &str = "https://api.payulatam.com/reports-api/4.0/service.cgi";
pub const REPORTS_SANDBOX_URL: &str =
    "https://sandbox.api.payulatam.com/reports-api/4.0/service.cgi";
pub const SUBSCRIPTIONS_URL: &str = "https://api.payulatam.com/payments-api/rest/v4.3";
pub const SUBSCRIPTIONS_SANDBOX_URL: &str =
    "https://sandbox.api.payulatam.com/payments-api/rest/v4.3";

/// Environment variable consulted when no explicit mode is configured
pub const DEFAULT_MODE_VARIABLE: &str = "PAYU_ENVIRONMENT";

/// Digest used for transaction signatures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DigestAlgorithm {
    #[default]
    Md5,
    Sha256,
    HmacSha256,
}

impl std::str::FromStr for DigestAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "hmac-sha256" | "hmac_sha256" => Ok(Self::HmacSha256),
            other => Err(ConfigError::InvalidConfiguration(format!(
                "Unknown digest algorithm '{}'",
                other
            ))),
        }
    }
}

/// Where the production/sandbox decision comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModeSource {
    Fixed(EnvironmentMode),
    /// Re-read on every resolution so the mode can change between calls
    EnvVar(String),
}

impl Default for ModeSource {
    fn default() -> Self {
        Self::EnvVar(DEFAULT_MODE_VARIABLE.to_string())
    }
}

impl ModeSource {
    /// Current mode; anything other than an explicit production signal is sandbox
    pub fn current(&self) -> EnvironmentMode {
        match self {
            Self::Fixed(mode) => *mode,
            Self::EnvVar(name) => env::var(name)
                .ok()
                .map_or(EnvironmentMode::Sandbox, |value| parse_mode(&value)),
        }
    }
}

fn parse_mode(value: &str) -> EnvironmentMode {
    match value.trim().to_ascii_lowercase().as_str() {
        "production" | "prod" | "live" => EnvironmentMode::Production,
        _ => EnvironmentMode::Sandbox,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceUrls {
    pub payments: Option<String>,
    pub reports: Option<String>,
    pub subscriptions: Option<String>,
}

impl ServiceUrls {
    pub fn get(&self, service: Service) -> Option<&str> {
        match service {
            Service::Payments => self.payments.as_deref(),
            Service::Reports => self.reports.as_deref(),
            Service::Subscriptions => self.subscriptions.as_deref(),
        }
    }

    pub fn set(&mut self, service: Service, url: String) {
        match service {
            Service::Payments => self.payments = Some(url),
            Service::Reports => self.reports = Some(url),
            Service::Subscriptions => self.subscriptions = Some(url),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub mode: ModeSource,
    pub overrides: ServiceUrls,
}

impl EnvironmentConfig {
    pub fn fixed(mode: EnvironmentMode) -> Self {
        Self {
            mode: ModeSource::Fixed(mode),
            overrides: ServiceUrls::default(),
        }
    }

    /// Base URL for a service: override first, then the mode's default
    pub fn base_url(&self, service: Service) -> String {
        if let Some(url) = self.overrides.get(service) {
            return url.to_string();
        }
        let production = self.mode.current() == EnvironmentMode::Production;
        let url = match (service, production) {
            (Service::Payments, true) => PAYMENTS_URL,
            (Service::Payments, false) => PAYMENTS_SANDBOX_URL,
            (Service::Reports, true) => REPORTS_URL,
            (Service::Reports, false) => REPORTS_SANDBOX_URL,
            (Service::Subscriptions, true) => SUBSCRIPTIONS_URL,
            (Service::Subscriptions, false) => SUBSCRIPTIONS_SANDBOX_URL,
        };
        url.to_string()
    }

    pub fn is_production(&self) -> bool {
        self.mode.current() == EnvironmentMode::Production
    }
}

#[derive(Debug, Clone)]
pub struct MerchantCredentials {
    pub merchant_id: String,
    pub account_id: Option<String>,
    pub api_login: Secret<String>,
    pub api_key: Secret<String>,
}

impl MerchantCredentials {
    pub fn new(merchant_id: String, api_login: String, api_key: String) -> Self {
        Self {
            merchant_id,
            account_id: None,
            api_login: Secret::new(api_login),
            api_key: Secret::new(api_key),
        }
    }

    /// Get API login (use carefully - exposes secret)
    pub fn api_login(&self) -> &str {
        self.api_login.expose_secret()
    }

    /// Get API key (use carefully - exposes secret)
    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_login.expose_secret().is_empty() && !self.api_key.expose_secret().is_empty()
    }
}

// Never expose secrets in serialization
impl Serialize for MerchantCredentials {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("MerchantCredentials", 4)?;
        state.serialize_field("merchant_id", &self.merchant_id)?;
        state.serialize_field("account_id", &self.account_id)?;
        state.serialize_field("api_login", "[REDACTED]")?;
        state.serialize_field("api_key", "[REDACTED]")?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for MerchantCredentials {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct MerchantCredentialsHelper {
            merchant_id: String,
            account_id: Option<String>,
            api_login: String,
            api_key: String,
        }

        let helper = MerchantCredentialsHelper::deserialize(deserializer)?;
        Ok(Self {
            merchant_id: helper.merchant_id,
            account_id: helper.account_id,
            api_login: Secret::new(helper.api_login),
            api_key: Secret::new(helper.api_key),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayUConfig {
    pub merchant: MerchantCredentials,
    pub environment: EnvironmentConfig,
    /// Strip null fields from requests and responses unless a call says otherwise
    pub remove_null_values: bool,
    pub digest_algorithm: DigestAlgorithm,
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl PayUConfig {
    /// Create a new configuration with merchant credentials
    #[must_use]
    pub fn new(merchant_id: String, api_login: String, api_key: String) -> Self {
        Self {
            merchant: MerchantCredentials::new(merchant_id, api_login, api_key),
            environment: EnvironmentConfig::default(),
            remove_null_values: true,
            digest_algorithm: DigestAlgorithm::default(),
            timeout_seconds: 30,
            user_agent: "payu-client/0.1".to_string(),
        }
    }

    /// Create configuration from environment variables
    ///
    /// Expected environment variables:
    /// - `{PREFIX}_MERCHANT_ID`, `{PREFIX}_API_LOGIN`, `{PREFIX}_API_KEY`
    /// - `{PREFIX}_ACCOUNT_ID` (optional)
    /// - `{PREFIX}_ENVIRONMENT` (optional, the variable is re-read per request)
    /// - `{PREFIX}_PAYMENTS_URL`, `{PREFIX}_REPORTS_URL`, `{PREFIX}_SUBSCRIPTIONS_URL` (optional overrides)
    /// - `{PREFIX}_REMOVE_NULL_VALUES` (optional, defaults to true)
    /// - `{PREFIX}_DIGEST` (optional: md5, sha256, hmac-sha256)
    pub fn from_env(prefix: &str) -> Result<Self, ConfigError> {
        let prefix = prefix.to_uppercase();
        let var = |suffix: &str| format!("{}_{}", prefix, suffix);
        let required = |name: String| {
            env::var(&name).map_err(|_| ConfigError::MissingEnvironmentVariable(name))
        };

        let merchant_id = required(var("MERCHANT_ID"))?;
        let api_login = required(var("API_LOGIN"))?;
        let api_key = required(var("API_KEY"))?;

        let mut config = Self::new(merchant_id, api_login, api_key);
        config.merchant.account_id = env::var(var("ACCOUNT_ID")).ok();
        config.environment.mode = ModeSource::EnvVar(var("ENVIRONMENT"));

        for (suffix, service) in [
            ("PAYMENTS_URL", Service::Payments),
            ("REPORTS_URL", Service::Reports),
            ("SUBSCRIPTIONS_URL", Service::Subscriptions),
        ] {
            if let Ok(url) = env::var(var(suffix)) {
                config.environment.overrides.set(service, url);
            }
        }

        if let Ok(value) = env::var(var("REMOVE_NULL_VALUES")) {
            config.remove_null_values = value.parse::<bool>().map_err(|_| {
                ConfigError::InvalidConfiguration(format!(
                    "{} must be true or false",
                    var("REMOVE_NULL_VALUES")
                ))
            })?;
        }

        if let Ok(value) = env::var(var("DIGEST")) {
            config.digest_algorithm = value.parse()?;
        }

        Ok(config)
    }

    /// Create configuration from .env file and environment variables
    ///
    /// **Security Warning**: Never commit .env files to version control!
    #[cfg(feature = "env-file")]
    pub fn from_env_file(prefix: &str) -> Result<Self, ConfigError> {
        Self::from_env_file_with_path(prefix, ".env")
    }

    /// Create configuration from a specific .env file path
    #[cfg(feature = "env-file")]
    pub fn from_env_file_with_path(prefix: &str, env_file_path: &str) -> Result<Self, ConfigError> {
        match dotenv::from_path(env_file_path) {
            Ok(()) => {}
            Err(dotenv::Error::Io(io_err)) if io_err.kind() == std::io::ErrorKind::NotFound => {
                // no .env file, fall back to the process environment
            }
            Err(e) => {
                return Err(ConfigError::InvalidConfiguration(format!(
                    "Failed to load .env file '{}': {}",
                    env_file_path, e
                )));
            }
        }

        Self::from_env(prefix)
    }

    #[must_use]
    pub fn account_id(mut self, account_id: String) -> Self {
        self.merchant.account_id = Some(account_id);
        self
    }

    #[must_use]
    pub fn mode(mut self, mode: EnvironmentMode) -> Self {
        self.environment.mode = ModeSource::Fixed(mode);
        self
    }

    /// Set a custom base URL for one service; it wins over the mode
    #[must_use]
    pub fn override_url(mut self, service: Service, url: String) -> Self {
        self.environment.overrides.set(service, url);
        self
    }

    #[must_use]
    pub const fn remove_null_values(mut self, remove: bool) -> Self {
        self.remove_null_values = remove;
        self
    }

    #[must_use]
    pub const fn digest_algorithm(mut self, algorithm: DigestAlgorithm) -> Self {
        self.digest_algorithm = algorithm;
        self
    }

    #[must_use]
    pub const fn timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvironmentVariable(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins_over_mode() {
        let env = EnvironmentConfig::fixed(EnvironmentMode::Production);
        assert_eq!(env.base_url(Service::Payments), PAYMENTS_URL);

        let mut env = EnvironmentConfig::fixed(EnvironmentMode::Sandbox);
        assert_eq!(env.base_url(Service::Subscriptions), SUBSCRIPTIONS_SANDBOX_URL);
        env.overrides
            .set(Service::Subscriptions, "http://localhost:9000".to_string());
        assert_eq!(env.base_url(Service::Subscriptions), "http://localhost:9000");
        assert_eq!(env.base_url(Service::Reports), REPORTS_SANDBOX_URL);
    }

    #[test]
    fn test_env_var_mode_is_reread_each_time() {
        let name = "PAYU_CONFIG_TEST_MODE_SWITCH";
        let source = ModeSource::EnvVar(name.to_string());

        env::remove_var(name);
        assert_eq!(source.current(), EnvironmentMode::Sandbox);

        env::set_var(name, "Production");
        assert_eq!(source.current(), EnvironmentMode::Production);

        env::set_var(name, "staging");
        assert_eq!(source.current(), EnvironmentMode::Sandbox);
        env::remove_var(name);
    }

    #[test]
    fn test_serialization_redacts_secrets() {
        let config = PayUConfig::new(
            "508029".to_string(),
            "login".to_string(),
            "super-secret".to_string(),
        );
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("super-secret"));
    }

    #[test]
    fn test_digest_algorithm_parsing() {
        assert_eq!("MD5".parse::<DigestAlgorithm>().unwrap(), DigestAlgorithm::Md5);
        assert_eq!(
            "hmac-sha256".parse::<DigestAlgorithm>().unwrap(),
            DigestAlgorithm::HmacSha256
        );
        assert!("crc32".parse::<DigestAlgorithm>().is_err());
    }

    #[test]
    fn test_from_env_missing_variable() {
        let err = PayUConfig::from_env("PAYU_NEVER_SET_PREFIX").unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvironmentVariable(ref v) if v == "PAYU_NEVER_SET_PREFIX_MERCHANT_ID"));
    }
}
